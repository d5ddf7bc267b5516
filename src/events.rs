//! Tauri 事件名常量
//!
//! 所有后端 → 前端的事件名集中定义，避免硬编码字符串散落各模块。

// === 应用更新 ===
pub const UPDATE_DOWNLOAD_STARTED: &str = "update-download-started";
