pub mod activator;
#[cfg(feature = "app-distribution")]
pub mod distribution;
pub mod error;
pub mod events;
#[cfg(feature = "app-distribution")]
pub mod mobile;
pub use error::{AppError, AppResult};

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn init_tracing() {
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("appdist=debug")),
        )
        .init();
}

#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    init_tracing();

    tauri::Builder::default()
        .plugin(tauri_plugin_opener::init())
        .plugin(tauri_plugin_http::init())
        .setup(|app| {
            // 安装器插件只在更新桥同时编译进来时才有意义
            #[cfg(feature = "app-distribution")]
            app.handle().plugin(crate::mobile::init())?;

            // 更新桥是尽力而为的可选能力，注册失败不阻塞启动
            match activator::resolve() {
                Some(plugin) => {
                    if let Err(e) = app.handle().plugin(plugin) {
                        tracing::warn!("Failed to register app distribution channel: {e}");
                    }
                }
                None => {
                    tracing::debug!("app distribution bridge not compiled into this flavor");
                }
            }

            Ok(())
        })
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}
