//! 应用错误处理模块
//!
//! Tauri 命令的错误必须实现 Serialize 才能传递给前端

use serde::Serialize;
use thiserror::Error;

/// 应用统一错误类型
///
/// 注意：携带后端诊断信息的变体（`Authentication`、`BackendQuery`）
/// Display 时原样输出后端消息，不加前缀——通道层承诺把后端消息
/// 逐字传回调用方。
#[derive(Debug, Error)]
pub enum AppError {
    /// 本地包元数据不可读（版本号缺失或无法换算）
    #[error("failed to read local version: {0}")]
    LocalMetadata(String),

    /// 测试者登录失败，载荷为后端消息
    #[error("{0}")]
    Authentication(String),

    /// 发布版本查询失败，载荷为后端消息
    #[error("{0}")]
    BackendQuery(String),

    /// 安装器插件调用失败
    #[error("installer error: {0}")]
    Installer(String),

    /// HTTP 传输层错误
    #[error("HTTP error: {0}")]
    Http(#[from] tauri_plugin_http::reqwest::Error),

    /// 打开下载链接失败
    #[error("opener error: {0}")]
    Opener(#[from] tauri_plugin_opener::Error),

    /// Tauri 错误
    #[error("Tauri error: {0}")]
    Tauri(#[from] tauri::Error),
}

/// 传递给前端的序列化错误格式
impl Serialize for AppError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeStruct;

        let mut state = serializer.serialize_struct("AppError", 2)?;

        let (kind, message) = match self {
            AppError::LocalMetadata(_) => ("LocalMetadata", self.to_string()),
            AppError::Authentication(msg) => ("Authentication", msg.clone()),
            AppError::BackendQuery(msg) => ("BackendQuery", msg.clone()),
            AppError::Installer(_) => ("Installer", self.to_string()),
            AppError::Http(e) => ("Http", e.to_string()),
            AppError::Opener(e) => ("Opener", e.to_string()),
            AppError::Tauri(e) => ("Tauri", e.to_string()),
        };

        state.serialize_field("kind", kind)?;
        state.serialize_field("message", &message)?;
        state.end()
    }
}

// ============ 便捷类型别名 ============

/// Result 类型别名
pub type AppResult<T> = Result<T, AppError>;
