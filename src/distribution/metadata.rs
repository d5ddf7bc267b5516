//! 本地包元数据读取
//!
//! 每次检查都重新读取，不做缓存——升级后无需重启检查逻辑。

use tauri::{AppHandle, Runtime};

use super::release::VersionCode;
use crate::AppResult;

/// 本地版本号来源，注入给 [`UpdateBridge`](super::UpdateBridge)
pub trait PackageMetadata: Send + Sync {
    fn version_code(&self) -> AppResult<VersionCode>;
}

/// 从 Tauri 包信息读取本地版本号
///
/// Tauri 没有 Android 那样的独立 versionCode，这里用包版本
/// 换算（见 [`VersionCode::from_parts`]），与分发后端上传构建时
/// 的换算规则一致。
pub struct TauriPackageMetadata<R: Runtime> {
    app: AppHandle<R>,
}

impl<R: Runtime> TauriPackageMetadata<R> {
    pub fn new(app: AppHandle<R>) -> Self {
        Self { app }
    }
}

impl<R: Runtime> PackageMetadata for TauriPackageMetadata<R> {
    fn version_code(&self) -> AppResult<VersionCode> {
        let info = self.app.package_info();
        let v = &info.version;

        VersionCode::from_parts(v.major, v.minor, v.patch).ok_or_else(|| {
            crate::AppError::LocalMetadata(format!(
                "package version {v} does not fit the version code scheme"
            ))
        })
    }
}
