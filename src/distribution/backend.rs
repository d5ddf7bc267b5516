//! 分发后端抽象
//!
//! 更新桥只依赖这个 trait，真实实现见 [`http`](super::http)，
//! 测试里用带调用计数的打桩实现替换。

use async_trait::async_trait;

use super::release::ReleaseInfo;
use crate::AppResult;

/// 分发后端客户端：登录、查询、触发三个操作各自独立失败
///
/// 会话状态（登录凭证）由实现自行持有，桥不感知也不持久化；
/// 实现必须允许非阻塞的并发调用（`Send + Sync`）。
#[async_trait]
pub trait DistributionBackend: Send + Sync {
    /// 登录测试者身份，已登录时幂等成功
    async fn authenticate(&self) -> AppResult<()>;

    /// 查询最新发布，`None` 表示后端从未发布过任何构建
    async fn latest_release(&self) -> AppResult<Option<ReleaseInfo>>;

    /// 触发下载安装流程，不等待安装完成
    async fn start_update(&self, release: &ReleaseInfo) -> AppResult<()>;
}
