//! Android 移动端插件桥接
//!
//! 通过 Tauri Plugin Builder 注册 Kotlin 插件到运行时，
//! 实际的 APK 安装流程在 InstallerPlugin.kt 中实现。

use tauri::{
    plugin::{Builder, TauriPlugin},
    Runtime,
};

#[cfg(target_os = "android")]
const PLUGIN_IDENTIFIER: &str = "com.one80.appdist";

/// Android 安装器插件句柄（仅 Android 编译）
#[cfg(target_os = "android")]
pub struct InstallerPlugin<R: Runtime>(tauri::plugin::PluginHandle<R>);

#[cfg(target_os = "android")]
impl<R: Runtime> InstallerPlugin<R> {
    /// 把已发布的 APK 下载地址交给系统安装流程
    pub fn install_apk(&self, url: String) -> crate::AppResult<()> {
        #[derive(serde::Serialize)]
        struct Payload {
            url: String,
        }

        self.0
            .run_mobile_plugin("installApk", Payload { url })
            .map_err(|e| crate::AppError::Installer(e.to_string()))
    }
}

/// 构建 Android 安装器插件
pub fn init<R: Runtime>() -> TauriPlugin<R> {
    Builder::new("android-installer")
        .setup(|app, api| {
            #[cfg(target_os = "android")]
            {
                use tauri::Manager;
                let handle =
                    api.register_android_plugin(PLUGIN_IDENTIFIER, "InstallerPlugin")?;
                app.manage(InstallerPlugin(handle));
            }

            #[cfg(not(target_os = "android"))]
            let _ = (app, api);

            Ok(())
        })
        .build()
}
