//! HTTP 分发后端客户端
//!
//! 对接分发服务的三个端点：测试者登录、最新发布查询、下载触发。
//! 会话 token 由客户端自持（后端托管的瞬态会话），桥每次检查都
//! 重新走一遍 [`authenticate`](DistributionBackend::authenticate)。

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tauri::{AppHandle, Emitter, Runtime};
use tauri_plugin_http::reqwest::{Client, Response, StatusCode};
use tokio::sync::Mutex;
use tracing::{debug, info};

use super::backend::DistributionBackend;
use super::release::ReleaseInfo;
use crate::{events, AppError, AppResult};

/// 默认分发服务地址，dev 风味构建编译进二进制
const DEFAULT_API_BASE: &str = "https://dist.one80.app/api";

/// 后端不给消息时的兜底诊断串
const UNKNOWN_MESSAGE: &str = "Unknown";

/// 分发后端连接配置
#[derive(Debug, Clone)]
pub struct DistributionConfig {
    pub api_base: String,
    pub app_id: String,
    /// 测试者分发凭证，随 dev 构建下发
    pub tester_token: String,
}

impl Default for DistributionConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            app_id: "com.one80.appdist".to_string(),
            tester_token: String::new(),
        }
    }
}

impl DistributionConfig {
    /// 编译默认值 + 环境变量覆盖
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(base) = std::env::var("APPDIST_API_BASE") {
            config.api_base = base;
        }
        if let Ok(app_id) = std::env::var("APPDIST_APP_ID") {
            config.app_id = app_id;
        }
        if let Ok(token) = std::env::var("APPDIST_TESTER_TOKEN") {
            config.tester_token = token;
        }
        config
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SignInRequest<'a> {
    app_id: &'a str,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SignInResponse {
    session_token: String,
}

/// HTTP 后端实现
pub struct HttpBackend<R: Runtime> {
    app: AppHandle<R>,
    http: Client,
    config: DistributionConfig,
    session: Mutex<Option<String>>,
}

impl<R: Runtime> HttpBackend<R> {
    pub fn new(app: AppHandle<R>, config: DistributionConfig) -> Self {
        Self {
            app,
            http: Client::new(),
            config,
            session: Mutex::new(None),
        }
    }
}

/// 从失败响应里提取后端消息，逐字传回；空响应体用兜底串
async fn error_message(resp: Response) -> String {
    let body = resp.text().await.unwrap_or_default();
    fallback_message(body)
}

fn fallback_message(body: String) -> String {
    let body = body.trim();
    if body.is_empty() {
        UNKNOWN_MESSAGE.to_string()
    } else {
        body.to_string()
    }
}

#[async_trait]
impl<R: Runtime> DistributionBackend for HttpBackend<R> {
    async fn authenticate(&self) -> AppResult<()> {
        let mut session = self.session.lock().await;
        if session.is_some() {
            debug!("tester already signed in");
            return Ok(());
        }

        let resp = self
            .http
            .post(format!("{}/v1/testers/sign-in", self.config.api_base))
            .bearer_auth(&self.config.tester_token)
            .json(&SignInRequest {
                app_id: &self.config.app_id,
            })
            .send()
            .await?;

        if !resp.status().is_success() {
            return Err(AppError::Authentication(error_message(resp).await));
        }

        let body: SignInResponse = resp.json().await?;
        *session = Some(body.session_token);
        info!("tester signed in");
        Ok(())
    }

    async fn latest_release(&self) -> AppResult<Option<ReleaseInfo>> {
        let session = self.session.lock().await;
        let token = session
            .as_deref()
            .ok_or_else(|| AppError::Authentication("tester not signed in".to_string()))?;

        let resp = self
            .http
            .get(format!(
                "{}/v1/apps/{}/releases/latest",
                self.config.api_base, self.config.app_id
            ))
            .bearer_auth(token)
            .send()
            .await?;

        match resp.status() {
            // 后端没有任何发布
            StatusCode::NOT_FOUND | StatusCode::NO_CONTENT => Ok(None),
            s if s.is_success() => Ok(Some(resp.json().await?)),
            _ => Err(AppError::BackendQuery(error_message(resp).await)),
        }
    }

    async fn start_update(&self, release: &ReleaseInfo) -> AppResult<()> {
        info!(version = %release.version_code, "starting update download");

        // 通知 UI 层下载已经开始
        self.app.emit(events::UPDATE_DOWNLOAD_STARTED, release)?;

        #[cfg(target_os = "android")]
        {
            use tauri::Manager;
            let installer = self
                .app
                .try_state::<crate::mobile::InstallerPlugin<R>>()
                .ok_or_else(|| {
                    AppError::Installer("android installer plugin not registered".to_string())
                })?;
            installer.install_apk(release.download_url.clone())?;
        }

        #[cfg(not(target_os = "android"))]
        tauri_plugin_opener::open_url(&release.download_url, None::<&str>)?;

        Ok(())
    }
}
