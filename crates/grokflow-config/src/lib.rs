//! grokflow-config — Grok の API / 静的リソース URL 設定
//!
//! 環境変数から基底 URL を一度だけ読み込み、パス結合を行う [`UrlResolver`] を提供します。
//! 設定はプロセス全体のシングルトンではなく、呼び出し側で明示的に構築して渡します。
//!
//! # 環境変数
//!
//! - `GROK_USE_MIRROR`: ミラーモードの有効化 (`true` / `1` / `yes` / `on`)
//! - `GROK_API_BASE_URL`: API 基底 URL (デフォルト: `https://grok.com`)
//! - `GROK_ASSETS_BASE_URL`: 静的リソース基底 URL (デフォルト: `https://assets.grok.com`)

pub mod url;

pub use url::{UrlConfig, UrlResolver};

/// ミラーモード切り替えの環境変数名
pub const ENV_USE_MIRROR: &str = "GROK_USE_MIRROR";
/// API 基底 URL の環境変数名
pub const ENV_API_BASE_URL: &str = "GROK_API_BASE_URL";
/// 静的リソース基底 URL の環境変数名
pub const ENV_ASSETS_BASE_URL: &str = "GROK_ASSETS_BASE_URL";

pub const DEFAULT_API_BASE_URL: &str = "https://grok.com";
pub const DEFAULT_ASSETS_BASE_URL: &str = "https://assets.grok.com";

/// 真偽値として解釈する文字列
///
/// 大文字小文字は区別しない。これ以外の値（空文字を含む）はすべて `false`。
pub fn parse_bool_flag(value: &str) -> bool {
    matches!(
        value.to_lowercase().as_str(),
        "true" | "1" | "yes" | "on"
    )
}
