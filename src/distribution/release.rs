use serde::{Deserialize, Serialize};

/// 整数构建号，对应 Android 的 versionCode
///
/// 比较只用严格大于：远端等于或小于本机都不算更新。
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct VersionCode(pub i64);

impl VersionCode {
    /// 从语义化版本号换算构建号：major·1_000_000 + minor·1_000 + patch
    ///
    /// 溢出或分量超界返回 `None`，由调用方转成本地元数据错误。
    pub fn from_parts(major: u64, minor: u64, patch: u64) -> Option<Self> {
        if minor >= 1_000 || patch >= 1_000 {
            return None;
        }
        let major: i64 = major.try_into().ok()?;
        let code = major
            .checked_mul(1_000_000)?
            .checked_add((minor * 1_000 + patch) as i64)?;
        Some(Self(code))
    }
}

impl std::fmt::Display for VersionCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// 安装包类型
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum BinaryType {
    #[default]
    Apk,
    Aab,
    Ipa,
}

/// 后端发布描述符：分发服务上最新一次发布的元数据
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReleaseInfo {
    pub version_code: VersionCode,
    /// 展示用版本字符串，如 "1.4.2"
    pub display_version: String,
    pub download_url: String,
    #[serde(default)]
    pub release_notes: Option<String>,
    #[serde(default)]
    pub binary_type: BinaryType,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_code_from_parts() {
        assert_eq!(VersionCode::from_parts(1, 4, 2), Some(VersionCode(1_004_002)));
        assert_eq!(VersionCode::from_parts(0, 0, 0), Some(VersionCode(0)));

        // 分量超界
        assert_eq!(VersionCode::from_parts(1, 1_000, 0), None);
        assert_eq!(VersionCode::from_parts(1, 0, 1_000), None);

        // major 溢出
        assert_eq!(VersionCode::from_parts(u64::MAX, 0, 0), None);
    }

    #[test]
    fn version_code_ordering_is_strict() {
        assert!(VersionCode(6) > VersionCode(5));
        assert!(!(VersionCode(5) > VersionCode(5)));
        assert!(!(VersionCode(4) > VersionCode(5)));
    }

    #[test]
    fn release_info_deserializes_backend_payload() {
        let json = serde_json::json!({
            "versionCode": 1_004_002,
            "displayVersion": "1.4.2",
            "downloadUrl": "https://dist.example.com/builds/1004002.apk",
            "releaseNotes": "fix crash on startup",
            "binaryType": "APK"
        });

        let release: ReleaseInfo = serde_json::from_value(json).unwrap();
        assert_eq!(release.version_code, VersionCode(1_004_002));
        assert_eq!(release.binary_type, BinaryType::Apk);
        assert_eq!(release.release_notes.as_deref(), Some("fix crash on startup"));
    }

    #[test]
    fn release_info_tolerates_minimal_payload() {
        // 后端老版本只带版本号和下载地址
        let json = serde_json::json!({
            "versionCode": 7,
            "displayVersion": "0.0.7",
            "downloadUrl": "https://dist.example.com/builds/7.apk"
        });

        let release: ReleaseInfo = serde_json::from_value(json).unwrap();
        assert_eq!(release.version_code, VersionCode(7));
        assert!(release.release_notes.is_none());
        assert_eq!(release.binary_type, BinaryType::Apk);
    }
}
