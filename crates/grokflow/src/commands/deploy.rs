use colored::Colorize;
use grokflow_deploy::{DeployParams, DeployReport, SystemCommandRunner};

pub async fn handle(params: DeployParams) -> anyhow::Result<()> {
    tracing::debug!("deploy params: {:?}", params);

    println!("{}", "HuggingFace Space へのデプロイを開始します...".blue().bold());
    println!("イメージ: {}", params.image_tag().cyan());
    println!("プラットフォーム: {}", params.platform.to_string().cyan());
    if let Some(space) = params.space() {
        println!("Space: {}", space.cyan());
    }
    if params.dry_run {
        println!(
            "{}",
            "dry-run: コマンドを表示するだけで実行しません".yellow()
        );
    }

    let report = match grokflow_deploy::deploy(&SystemCommandRunner, &params).await {
        Ok(report) => report,
        Err(e) => {
            // 致命的なエラーは案内付きで表示して exit code 1
            eprintln!();
            eprintln!("{} {}", "Error:".red().bold(), e.user_message());
            std::process::exit(1);
        }
    };

    print_summary(&params, &report);
    Ok(())
}

fn print_summary(params: &DeployParams, report: &DeployReport) {
    if let Some(space) = params.space() {
        match report.space_updated() {
            Some(true) => {
                println!();
                println!(
                    "{}",
                    format!("✅ HuggingFace Space {} の更新に成功しました", space).green()
                );
            }
            Some(false) => {
                println!();
                println!(
                    "{}",
                    format!(
                        "⚠️ Space {} の Docker イメージを手動で更新してください: {}",
                        space, report.image_tag
                    )
                    .yellow()
                );
            }
            None => {}
        }
    }

    println!();
    if params.dry_run {
        println!("{}", "🎉 dry-run 完了!".green().bold());
    } else {
        println!("{}", "🎉 デプロイ完了!".green().bold());
    }
    println!("イメージ: {}", report.image_tag.cyan());
    if let Some(url) = params.space_url() {
        println!("Space: {}", url.cyan());
    }
}
