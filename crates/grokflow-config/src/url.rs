//! URL 解決
//!
//! 基底 URL は構築時に末尾の `/` を取り除いて保持し、以降は変更されません。

use crate::{
    DEFAULT_API_BASE_URL, DEFAULT_ASSETS_BASE_URL, ENV_API_BASE_URL, ENV_ASSETS_BASE_URL,
    ENV_USE_MIRROR, parse_bool_flag,
};
use serde::Serialize;

/// URL 設定（構築後は不変）
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UrlConfig {
    use_mirror: bool,
    api_base_url: String,
    assets_base_url: String,
}

impl Default for UrlConfig {
    fn default() -> Self {
        Self::new(false, DEFAULT_API_BASE_URL, DEFAULT_ASSETS_BASE_URL)
    }
}

impl UrlConfig {
    /// 値を直接指定して作成
    pub fn new(
        use_mirror: bool,
        api_base_url: impl AsRef<str>,
        assets_base_url: impl AsRef<str>,
    ) -> Self {
        Self {
            use_mirror,
            api_base_url: api_base_url.as_ref().trim_end_matches('/').to_string(),
            assets_base_url: assets_base_url.as_ref().trim_end_matches('/').to_string(),
        }
    }

    /// プロセスの環境変数から作成
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// 任意の参照関数から作成
    ///
    /// 未設定の変数はデフォルト値にフォールバックします。
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let use_mirror = lookup(ENV_USE_MIRROR)
            .map(|v| parse_bool_flag(&v))
            .unwrap_or(false);
        let api_base_url =
            lookup(ENV_API_BASE_URL).unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string());
        let assets_base_url =
            lookup(ENV_ASSETS_BASE_URL).unwrap_or_else(|| DEFAULT_ASSETS_BASE_URL.to_string());

        Self::new(use_mirror, api_base_url, assets_base_url)
    }

    pub fn use_mirror(&self) -> bool {
        self.use_mirror
    }

    pub fn api_base_url(&self) -> &str {
        &self.api_base_url
    }

    pub fn assets_base_url(&self) -> &str {
        &self.assets_base_url
    }
}

/// Grok の URL を組み立てるリゾルバ
#[derive(Debug, Clone)]
pub struct UrlResolver {
    config: UrlConfig,
}

impl UrlResolver {
    /// 設定からリゾルバを作成し、現在のモードをログに出力
    pub fn new(config: UrlConfig) -> Self {
        if config.use_mirror {
            tracing::info!("[UrlResolver] mirror mode enabled");
            tracing::info!("[UrlResolver] API base URL: {}", config.api_base_url);
            tracing::info!("[UrlResolver] assets base URL: {}", config.assets_base_url);
        } else {
            tracing::info!("[UrlResolver] using official URLs");
        }

        Self { config }
    }

    /// 環境変数から作成
    pub fn from_env() -> Self {
        Self::new(UrlConfig::from_env())
    }

    /// API の URL を取得
    ///
    /// `path` 先頭の `/` はすべて取り除いてから結合します。
    pub fn resolve_api(&self, path: &str) -> String {
        join(&self.config.api_base_url, path)
    }

    /// 静的リソースの URL を取得
    pub fn resolve_assets(&self, path: &str) -> String {
        join(&self.config.assets_base_url, path)
    }

    /// imagine ページの URL を取得
    pub fn resolve_imagine(&self, post_id: &str) -> String {
        format!("{}/imagine/{}", self.config.api_base_url, post_id)
    }

    /// Referer ヘッダー用の URL
    pub fn resolve_referer(&self) -> String {
        format!("{}/", self.config.api_base_url)
    }

    pub fn is_mirror_enabled(&self) -> bool {
        self.config.use_mirror
    }

    /// 診断用に設定を返す
    pub fn describe_config(&self) -> &UrlConfig {
        &self.config
    }
}

fn join(base: &str, path: &str) -> String {
    format!("{}/{}", base, path.trim_start_matches('/'))
}
