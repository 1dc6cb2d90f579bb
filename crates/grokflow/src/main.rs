mod commands;

use clap::{Parser, Subcommand, ValueEnum};
use grokflow_deploy::{DEFAULT_REGISTRY, Platform};

#[derive(Parser)]
#[command(name = "grokflow")]
#[command(about = "grok2api のイメージを HuggingFace Space へデプロイする", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Space 用イメージをビルド・プッシュし、Space を更新
    Deploy(DeployArgs),
    /// Grok の URL 設定を表示
    Urls {
        /// JSON で出力
        #[arg(long)]
        json: bool,
    },
    /// バージョン情報を表示
    Version,
}

/// deploy サブコマンドの引数
#[derive(clap::Args)]
struct DeployArgs {
    /// Docker イメージレジストリ
    #[arg(long, default_value = DEFAULT_REGISTRY)]
    registry: String,
    /// イメージリポジトリ名（例: gdtiti/grok2api）
    #[arg(long)]
    repository: String,
    /// バージョンタグ
    #[arg(long)]
    version: String,
    /// HuggingFace Space 名（例: username/grok2api-space）
    #[arg(long)]
    space_name: Option<String>,
    /// HuggingFace アクセストークン
    #[arg(long, env = "HF_TOKEN", hide_env_values = true)]
    hf_token: Option<String>,
    /// ターゲットプラットフォーム
    #[arg(long, value_enum, default_value_t = PlatformArg::Amd64)]
    platform: PlatformArg,
    /// イメージのプッシュのみ行い、Space は更新しない
    #[arg(long)]
    push_only: bool,
    /// 実行するコマンドを表示するだけで実行しない
    #[arg(long)]
    dry_run: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum PlatformArg {
    Amd64,
    Arm64,
}

impl From<PlatformArg> for Platform {
    fn from(arg: PlatformArg) -> Self {
        match arg {
            PlatformArg::Amd64 => Platform::Amd64,
            PlatformArg::Arm64 => Platform::Arm64,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // ログは stderr に出力（stdout は進捗とサマリー用）
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    match cli.command {
        Commands::Deploy(args) => {
            commands::deploy::handle(args.into_params()).await?;
        }
        Commands::Urls { json } => {
            commands::urls::handle(json)?;
        }
        Commands::Version => {
            println!("grokflow {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}

impl DeployArgs {
    fn into_params(self) -> grokflow_deploy::DeployParams {
        grokflow_deploy::DeployParams {
            registry: self.registry,
            repository: self.repository,
            version: self.version,
            platform: self.platform.into(),
            space_name: self.space_name,
            hf_token: self.hf_token,
            push_only: self.push_only,
            dry_run: self.dry_run,
        }
    }
}
