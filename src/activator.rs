//! 宿主激活器
//!
//! 决定本次构建是否带有更新检查能力。`app-distribution` feature
//! 对应 dev 风味：开启时返回真实的 `app_distribution` 通道插件，
//! 关闭时（prod 风味）返回 `None`——缺席是正常取值，不是被吞掉的
//! 异常。两种风味下宿主启动流程完全一致，唯一区别是通道命令是否
//! 存在。

use tauri::{plugin::TauriPlugin, Runtime};

/// 解析可选的更新桥插件，每次应用启动恰好调用一次
#[cfg(feature = "app-distribution")]
pub fn resolve<R: Runtime>() -> Option<TauriPlugin<R>> {
    Some(crate::distribution::channel::init())
}

/// prod 风味的空实现：更新桥未编译进本构建
#[cfg(not(feature = "app-distribution"))]
pub fn resolve<R: Runtime>() -> Option<TauriPlugin<R>> {
    None
}
