//! 必須ツールの事前チェック

use crate::command::{CommandRunner, CommandSpec};
use crate::error::{DeployError, Result};
use crate::plan::{DOCKER, HUGGINGFACE_CLI};

/// デプロイに必要な外部ツール
pub const REQUIRED_TOOLS: [&str; 2] = [DOCKER, HUGGINGFACE_CLI];

/// 各ツールが `--version` に正常応答するか確認
///
/// 最初に見つからなかったツールで即座に失敗します。
pub async fn check(runner: &dyn CommandRunner, tools: &[&str]) -> Result<()> {
    for tool in tools {
        let spec = CommandSpec::new(*tool).arg("--version");

        match runner.run(&spec).await {
            Ok(output) if output.success() => {
                tracing::debug!("{} found: {}", tool, output.stdout.trim());
            }
            Ok(output) => {
                tracing::debug!(
                    "{} --version exited with {:?}: {}",
                    tool,
                    output.code,
                    output.stderr.trim()
                );
                return Err(DeployError::ToolNotFound(tool.to_string()));
            }
            Err(e) => {
                tracing::debug!("{} could not be started: {}", tool, e);
                return Err(DeployError::ToolNotFound(tool.to_string()));
            }
        }
    }

    Ok(())
}
