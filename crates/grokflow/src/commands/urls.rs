use colored::Colorize;
use grokflow_config::UrlResolver;

pub fn handle(json: bool) -> anyhow::Result<()> {
    let resolver = UrlResolver::from_env();
    let config = resolver.describe_config();

    if json {
        let mut value = serde_json::to_value(config)?;
        value["referer"] = serde_json::Value::String(resolver.resolve_referer());
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    println!("{}", "Grok URL 設定:".bold());
    let mirror = if resolver.is_mirror_enabled() {
        "有効".green()
    } else {
        "無効".normal()
    };
    println!("  ミラーモード: {}", mirror);
    println!("  API 基底 URL: {}", config.api_base_url().cyan());
    println!("  リソース基底 URL: {}", config.assets_base_url().cyan());
    println!("  Referer: {}", resolver.resolve_referer().cyan());

    Ok(())
}
