//! デプロイパラメータとイメージタグ

use crate::error::{DeployError, Result};
use std::fmt;
use std::str::FromStr;

/// デフォルトのコンテナレジストリ
pub const DEFAULT_REGISTRY: &str = "ghcr.io";

/// HuggingFace Space ページの基底 URL
pub const SPACE_BASE_URL: &str = "https://huggingface.co/spaces";

/// ターゲットプラットフォーム
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Platform {
    #[default]
    Amd64,
    Arm64,
}

impl Platform {
    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Amd64 => "amd64",
            Platform::Arm64 => "arm64",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Platform {
    type Err = DeployError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "amd64" => Ok(Platform::Amd64),
            "arm64" => Ok(Platform::Arm64),
            other => Err(DeployError::InvalidParams(format!(
                "unknown platform '{}' (expected amd64 or arm64)",
                other
            ))),
        }
    }
}

/// 1回のデプロイ実行に必要なパラメータ
#[derive(Clone)]
pub struct DeployParams {
    pub registry: String,
    /// イメージリポジトリ（例: `org/grok2api`）
    pub repository: String,
    pub version: String,
    pub platform: Platform,
    /// 更新対象の Space（例: `user/grok2api-space`）
    pub space_name: Option<String>,
    pub hf_token: Option<String>,
    /// イメージのプッシュまでで終了し、Space は更新しない
    pub push_only: bool,
    pub dry_run: bool,
}

impl fmt::Debug for DeployParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeployParams")
            .field("registry", &self.registry)
            .field("repository", &self.repository)
            .field("version", &self.version)
            .field("platform", &self.platform)
            .field("space_name", &self.space_name)
            .field("hf_token", &self.hf_token.as_ref().map(|_| "****"))
            .field("push_only", &self.push_only)
            .field("dry_run", &self.dry_run)
            .finish()
    }
}

impl DeployParams {
    pub fn new(repository: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            registry: DEFAULT_REGISTRY.to_string(),
            repository: repository.into(),
            version: version.into(),
            platform: Platform::default(),
            space_name: None,
            hf_token: None,
            push_only: false,
            dry_run: false,
        }
    }

    /// タグ部分（`hf-{platform}-{version}`）
    pub fn tag(&self) -> String {
        format!("hf-{}-{}", self.platform, self.version)
    }

    /// 完全なイメージタグ（`{registry}/{repository}:hf-{platform}-{version}`）
    pub fn image_tag(&self) -> String {
        format!("{}/{}:{}", self.registry, self.repository, self.tag())
    }

    /// 指定された Space 名（空文字は未指定扱い）
    pub fn space(&self) -> Option<&str> {
        self.space_name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
    }

    /// 指定されたトークン（空文字は未指定扱い）
    pub fn token(&self) -> Option<&str> {
        self.hf_token.as_deref().filter(|token| !token.is_empty())
    }

    /// Space のページ URL
    pub fn space_url(&self) -> Option<String> {
        self.space().map(|name| format!("{}/{}", SPACE_BASE_URL, name))
    }

    /// Space の更新まで行うか
    pub fn updates_space(&self) -> bool {
        self.space().is_some() && !self.push_only && !self.dry_run
    }

    /// サブプロセスを起動する前のパラメータ検証
    pub fn validate(&self) -> Result<()> {
        if self.registry.trim().is_empty() {
            return Err(DeployError::InvalidParams("registry is empty".to_string()));
        }
        if self.repository.trim().is_empty() {
            return Err(DeployError::InvalidParams(
                "repository is empty".to_string(),
            ));
        }
        if self.version.is_empty() {
            return Err(DeployError::InvalidParams("version is empty".to_string()));
        }
        validate_tag(&self.tag())
    }
}

/// タグのバリデーション
///
/// Docker タグの制約:
/// - 128文字以下
/// - 英数字、ピリオド、ハイフン、アンダースコアのみ
/// - 先頭はピリオドまたはハイフンではない
pub fn validate_tag(tag: &str) -> Result<()> {
    if tag.is_empty() {
        return Err(DeployError::InvalidTag {
            tag: "(empty)".to_string(),
        });
    }

    if tag.len() > 128 {
        return Err(DeployError::InvalidTag {
            tag: format!("Tag too long ({} characters, max 128)", tag.len()),
        });
    }

    if tag.starts_with('.') || tag.starts_with('-') {
        return Err(DeployError::InvalidTag {
            tag: tag.to_string(),
        });
    }

    for c in tag.chars() {
        if !c.is_ascii_alphanumeric() && c != '.' && c != '-' && c != '_' {
            return Err(DeployError::InvalidTag {
                tag: format!("Invalid character '{}' in tag: {}", c, tag),
            });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_tag_arm64() {
        let mut params = DeployParams::new("org/img", "1.2.3");
        params.registry = "r".to_string();
        params.platform = Platform::Arm64;
        assert_eq!(params.image_tag(), "r/org/img:hf-arm64-1.2.3");
    }

    #[test]
    fn test_image_tag_defaults() {
        let params = DeployParams::new("gdtiti/grok2api", "v0.4.0");
        assert_eq!(params.image_tag(), "ghcr.io/gdtiti/grok2api:hf-amd64-v0.4.0");
    }

    #[test]
    fn test_space_url() {
        let mut params = DeployParams::new("org/img", "1");
        assert_eq!(params.space_url(), None);
        params.space_name = Some("user/space".to_string());
        assert_eq!(
            params.space_url().as_deref(),
            Some("https://huggingface.co/spaces/user/space")
        );
    }

    #[test]
    fn test_blank_space_name_is_absent() {
        for blank in ["", "   "] {
            let mut params = DeployParams::new("org/img", "1");
            params.space_name = Some(blank.to_string());
            assert_eq!(params.space(), None);
            assert_eq!(params.space_url(), None);
            assert!(!params.updates_space());
            assert!(params.validate().is_ok());
        }
    }

    #[test]
    fn test_empty_token_is_absent() {
        let mut params = DeployParams::new("org/img", "1");
        params.hf_token = Some(String::new());
        assert_eq!(params.token(), None);

        params.hf_token = Some("hf_x".to_string());
        assert_eq!(params.token(), Some("hf_x"));
    }

    #[test]
    fn test_updates_space() {
        let mut params = DeployParams::new("org/img", "1");
        assert!(!params.updates_space());

        params.space_name = Some("user/space".to_string());
        assert!(params.updates_space());

        params.push_only = true;
        assert!(!params.updates_space());

        params.push_only = false;
        params.dry_run = true;
        assert!(!params.updates_space());
    }

    #[test]
    fn test_platform_from_str() {
        assert_eq!("amd64".parse::<Platform>().unwrap(), Platform::Amd64);
        assert_eq!("arm64".parse::<Platform>().unwrap(), Platform::Arm64);
        assert!("x86_64".parse::<Platform>().is_err());
    }

    #[test]
    fn test_debug_redacts_token() {
        let mut params = DeployParams::new("org/img", "1");
        params.hf_token = Some("hf_secret".to_string());
        let debug = format!("{:?}", params);
        assert!(!debug.contains("hf_secret"));
        assert!(debug.contains("****"));
    }

    #[test]
    fn test_validate_ok() {
        let params = DeployParams::new("org/img", "1.2.3");
        assert!(params.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_version() {
        let params = DeployParams::new("org/img", "1.2.3+build");
        assert!(matches!(
            params.validate(),
            Err(DeployError::InvalidTag { .. })
        ));

        let params = DeployParams::new("org/img", "");
        assert!(matches!(
            params.validate(),
            Err(DeployError::InvalidParams(_))
        ));
    }

    #[test]
    fn test_validate_rejects_empty_repository() {
        let params = DeployParams::new("  ", "1");
        assert!(matches!(
            params.validate(),
            Err(DeployError::InvalidParams(_))
        ));
    }

    #[test]
    fn test_validate_tag_rules() {
        assert!(validate_tag("hf-amd64-1.0_rc1").is_ok());
        assert!(validate_tag("").is_err());
        assert!(validate_tag(".hidden").is_err());
        assert!(validate_tag("-dash").is_err());
        assert!(validate_tag(&"a".repeat(129)).is_err());
        assert!(validate_tag(&"a".repeat(128)).is_ok());
    }
}
