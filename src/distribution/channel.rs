//! `app_distribution` 通道
//!
//! 薄层命令入口，对应原生侧的 MethodChannel：一条 `checkForUpdate`
//! 方法，其余方法名一律回 `notImplemented`。业务逻辑全部委托给
//! [`UpdateBridge`](super::UpdateBridge)。

use std::sync::Arc;

use serde::Serialize;
use tauri::{
    plugin::{Builder, TauriPlugin},
    Manager, Runtime, State,
};

use super::bridge::UpdateBridge;
use super::http::{DistributionConfig, HttpBackend};
use super::metadata::TauriPackageMetadata;
use super::CheckOutcome;

/// 通道名，与 UI 层约定一致
pub const CHANNEL: &str = "app_distribution";

/// 唯一支持的方法名
pub const METHOD_CHECK_FOR_UPDATE: &str = "checkForUpdate";

/// 所有桥内失败统一使用的错误码
pub const ERROR_CODE: &str = "APPDIST_ERROR";

/// 通道响应：每次方法调用在自己的结果槽里恰好收到一个
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum ChannelResponse {
    /// 检查完成。`updating = true` 表示已触发下载
    #[serde(rename_all = "camelCase")]
    Ok { updating: bool },
    /// 检查失败，携带错误码和诊断消息
    #[serde(rename_all = "camelCase")]
    Error { code: String, message: String },
    /// 未知方法名
    NotImplemented,
}

/// 按方法名分发，任何结果（包括失败）都走响应值，不跨通道抛异常
pub async fn dispatch(bridge: &UpdateBridge, method: &str) -> ChannelResponse {
    match method {
        METHOD_CHECK_FOR_UPDATE => match bridge.check_for_update().await {
            CheckOutcome::UpdateInProgress => ChannelResponse::Ok { updating: true },
            CheckOutcome::NoUpdateAvailable => ChannelResponse::Ok { updating: false },
            CheckOutcome::Error(message) => ChannelResponse::Error {
                code: ERROR_CODE.to_string(),
                message,
            },
        },
        _ => ChannelResponse::NotImplemented,
    }
}

/// 通用入口：前端按方法名调用，保持 MethodChannel 的调用形态
#[tauri::command]
async fn invoke_method(
    bridge: State<'_, UpdateBridge>,
    method: String,
) -> crate::AppResult<ChannelResponse> {
    Ok(dispatch(&bridge, &method).await)
}

/// 便捷入口：直接发起更新检查
#[tauri::command]
async fn check_for_update(bridge: State<'_, UpdateBridge>) -> crate::AppResult<ChannelResponse> {
    Ok(dispatch(&bridge, METHOD_CHECK_FOR_UPDATE).await)
}

/// 构建通道插件，由激活器在 dev 风味下注册
pub fn init<R: Runtime>() -> TauriPlugin<R> {
    Builder::new(CHANNEL)
        .invoke_handler(tauri::generate_handler![invoke_method, check_for_update])
        .setup(|app, _api| {
            let config = DistributionConfig::from_env();
            let backend = Arc::new(HttpBackend::new(app.clone(), config));
            let metadata = Arc::new(TauriPackageMetadata::new(app.clone()));
            app.manage(UpdateBridge::new(backend, metadata));
            Ok(())
        })
        .build()
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;

    use super::*;
    use crate::distribution::backend::DistributionBackend;
    use crate::distribution::metadata::PackageMetadata;
    use crate::distribution::release::{ReleaseInfo, VersionCode};
    use crate::{AppError, AppResult};

    /// 固定脚本后端：要么返回给定发布，要么返回给定错误
    struct ScriptedBackend {
        release: Option<ReleaseInfo>,
        query_error: Option<String>,
    }

    #[async_trait]
    impl DistributionBackend for ScriptedBackend {
        async fn authenticate(&self) -> AppResult<()> {
            Ok(())
        }

        async fn latest_release(&self) -> AppResult<Option<ReleaseInfo>> {
            match &self.query_error {
                Some(msg) => Err(AppError::BackendQuery(msg.clone())),
                None => Ok(self.release.clone()),
            }
        }

        async fn start_update(&self, _release: &ReleaseInfo) -> AppResult<()> {
            Ok(())
        }
    }

    struct FixedVersion(i64);

    impl PackageMetadata for FixedVersion {
        fn version_code(&self) -> AppResult<VersionCode> {
            Ok(VersionCode(self.0))
        }
    }

    fn bridge_with(release: Option<ReleaseInfo>, query_error: Option<&str>) -> UpdateBridge {
        UpdateBridge::new(
            Arc::new(ScriptedBackend {
                release,
                query_error: query_error.map(str::to_string),
            }),
            Arc::new(FixedVersion(5)),
        )
    }

    fn release(version_code: i64) -> ReleaseInfo {
        ReleaseInfo {
            version_code: VersionCode(version_code),
            display_version: format!("0.0.{version_code}"),
            download_url: "https://dist.example.com/builds/latest.apk".to_string(),
            release_notes: None,
            binary_type: Default::default(),
        }
    }

    #[tokio::test]
    async fn check_for_update_reports_updating_true() {
        let bridge = bridge_with(Some(release(6)), None);
        let resp = dispatch(&bridge, METHOD_CHECK_FOR_UPDATE).await;
        assert_eq!(resp, ChannelResponse::Ok { updating: true });
    }

    #[tokio::test]
    async fn check_for_update_reports_updating_false() {
        let bridge = bridge_with(None, None);
        let resp = dispatch(&bridge, METHOD_CHECK_FOR_UPDATE).await;
        assert_eq!(resp, ChannelResponse::Ok { updating: false });
    }

    #[tokio::test]
    async fn bridge_failure_maps_to_appdist_error_code() {
        let bridge = bridge_with(None, Some("release feed is down"));
        let resp = dispatch(&bridge, METHOD_CHECK_FOR_UPDATE).await;
        assert_eq!(
            resp,
            ChannelResponse::Error {
                code: ERROR_CODE.to_string(),
                message: "release feed is down".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn unknown_method_is_not_implemented_not_error() {
        let bridge = bridge_with(None, None);
        let resp = dispatch(&bridge, "downloadNow").await;
        assert_eq!(resp, ChannelResponse::NotImplemented);
    }

    #[test]
    fn responses_serialize_to_the_agreed_wire_shape() {
        let ok = serde_json::to_value(ChannelResponse::Ok { updating: true }).unwrap();
        assert_eq!(ok, serde_json::json!({ "status": "ok", "updating": true }));

        let err = serde_json::to_value(ChannelResponse::Error {
            code: ERROR_CODE.to_string(),
            message: "boom".to_string(),
        })
        .unwrap();
        assert_eq!(
            err,
            serde_json::json!({ "status": "error", "code": "APPDIST_ERROR", "message": "boom" })
        );

        let ni = serde_json::to_value(ChannelResponse::NotImplemented).unwrap();
        assert_eq!(ni, serde_json::json!({ "status": "notImplemented" }));
    }
}
