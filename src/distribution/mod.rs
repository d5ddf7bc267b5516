//! 应用分发更新桥
//!
//! dev 风味专属模块：向分发后端查询是否发布了比本机更新的测试版本，
//! 有则触发下载。对前端只暴露 `app_distribution` 通道上的一条
//! `checkForUpdate` 命令，见 [`channel`]。

pub mod backend;
pub mod bridge;
pub mod channel;
pub mod http;
pub mod metadata;
pub mod release;

pub use backend::DistributionBackend;
pub use bridge::UpdateBridge;
pub use metadata::PackageMetadata;
pub use release::{ReleaseInfo, VersionCode};

/// 一次更新检查的最终结果，每次调用恰好产生一个
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckOutcome {
    /// 发现更新且已触发下载
    UpdateInProgress,
    /// 远端没有发布、或版本不比本机新
    NoUpdateAvailable,
    /// 登录、读取本地版本或查询发布失败
    Error(String),
}
