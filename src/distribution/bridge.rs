//! 更新检查桥
//!
//! 一次检查按固定顺序走完四步：登录 → 读本地版本 → 查最新发布 →
//! 严格比较，任何一步失败都短路成 [`CheckOutcome::Error`]，后续
//! 步骤不再执行。下载触发是发射后不管的，失败只记日志，不影响
//! 已经报出的结果。

use std::sync::Arc;

use tracing::{info, warn};

use super::backend::DistributionBackend;
use super::metadata::PackageMetadata;
use super::CheckOutcome;

/// 更新桥，持有两个注入的依赖缝
///
/// 自身无可变状态，`&self` 即可发起检查；调用方约定不并发发起
/// 重叠的检查，桥不做去重。
pub struct UpdateBridge {
    backend: Arc<dyn DistributionBackend>,
    metadata: Arc<dyn PackageMetadata>,
}

impl UpdateBridge {
    pub fn new(backend: Arc<dyn DistributionBackend>, metadata: Arc<dyn PackageMetadata>) -> Self {
        Self { backend, metadata }
    }

    /// 执行一次完整的更新检查，恰好产生一个结果
    pub async fn check_for_update(&self) -> CheckOutcome {
        // 1. 登录：后端按测试者身份放行发布元数据
        if let Err(e) = self.backend.authenticate().await {
            warn!("tester sign-in failed: {e}");
            return CheckOutcome::Error(e.to_string());
        }

        // 2. 本地版本每次现读，失败时不再碰发布查询
        let local = match self.metadata.version_code() {
            Ok(v) => v,
            Err(e) => {
                warn!("local version unreadable: {e}");
                return CheckOutcome::Error(e.to_string());
            }
        };

        // 3. 查询最新发布
        let release = match self.backend.latest_release().await {
            Ok(release) => release,
            Err(e) => {
                warn!("release query failed: {e}");
                return CheckOutcome::Error(e.to_string());
            }
        };

        // 4. 比较。没有发布和不够新走同一条路
        let Some(release) = release else {
            info!("no release published on the backend");
            return CheckOutcome::NoUpdateAvailable;
        };

        if release.version_code > local {
            info!(
                local = %local,
                remote = %release.version_code,
                "newer release found, triggering download"
            );

            // 发射后不管：不等安装流程，失败只告警
            let backend = Arc::clone(&self.backend);
            tokio::spawn(async move {
                if let Err(e) = backend.start_update(&release).await {
                    warn!("failed to start update download: {e}");
                }
            });

            CheckOutcome::UpdateInProgress
        } else {
            info!(local = %local, remote = %release.version_code, "no newer release");
            CheckOutcome::NoUpdateAvailable
        }
    }
}
