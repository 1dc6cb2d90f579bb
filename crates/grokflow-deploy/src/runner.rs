//! ステップの実行
//!
//! [`DeployPlan`] のステップを順番に1つずつ実行し、失敗時は
//! ステップごとの [`FailurePolicy`] に従って中断または警告にします。

use crate::command::{CommandOutput, CommandRunner};
use crate::error::{DeployError, Result};
use crate::params::DeployParams;
use crate::plan::{DeployPlan, FailurePolicy, Step, StepKind};
use crate::preflight::{self, REQUIRED_TOOLS};
use colored::Colorize;

/// 警告に格下げされたステップの失敗
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepWarning {
    pub step: StepKind,
    pub message: String,
}

/// デプロイの実行結果
#[derive(Debug, Clone)]
pub struct DeployReport {
    pub image_tag: String,
    /// 正常終了したステップ
    pub succeeded: Vec<StepKind>,
    /// 失敗したが続行したステップ
    pub warnings: Vec<StepWarning>,
    /// dry-run で実行しなかったステップ
    pub skipped: Vec<StepKind>,
}

impl DeployReport {
    pub fn new(image_tag: impl Into<String>) -> Self {
        Self {
            image_tag: image_tag.into(),
            succeeded: Vec::new(),
            warnings: Vec::new(),
            skipped: Vec::new(),
        }
    }

    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }

    /// Space 更新の結果（試行していなければ `None`）
    pub fn space_updated(&self) -> Option<bool> {
        if self.succeeded.contains(&StepKind::UpdateSpace) {
            Some(true)
        } else if self.warnings.iter().any(|w| w.step == StepKind::UpdateSpace) {
            Some(false)
        } else {
            None
        }
    }
}

/// ステップを順番に実行するランナー
pub struct StepRunner<'a> {
    runner: &'a dyn CommandRunner,
    dry_run: bool,
}

impl<'a> StepRunner<'a> {
    pub fn new(runner: &'a dyn CommandRunner, dry_run: bool) -> Self {
        Self { runner, dry_run }
    }

    /// 全ステップを実行
    ///
    /// `Abort` のステップが失敗した時点で `Err` を返し、残りは実行しません。
    pub async fn run(&self, plan: &DeployPlan) -> Result<DeployReport> {
        let mut report = DeployReport::new(plan.image_tag());
        let total = plan.len();

        for (i, step) in plan.steps().iter().enumerate() {
            println!();
            println!(
                "{}",
                format!("【Step {}/{}】{}", i + 1, total, step.description)
                    .blue()
                    .bold()
            );

            if self.dry_run {
                println!("  {} {}", "(dry-run)".yellow(), step.command);
                report.skipped.push(step.kind);
                continue;
            }

            println!("  → 実行: {}", step.command.to_string().cyan());
            tracing::debug!("step {} running: {}", step.kind, step.command);

            match self.runner.run(&step.command).await {
                Ok(output) => {
                    echo_output(&output);
                    if output.success() {
                        println!("  {} {}", "✓".green(), step.kind);
                        report.succeeded.push(step.kind);
                    } else {
                        self.handle_failure(step, output.code, &output.stderr, &mut report)?;
                    }
                }
                Err(e) => {
                    let message = e.to_string();
                    println!("    {}", message.dimmed());
                    self.handle_failure(step, None, &message, &mut report)?;
                }
            }
        }

        Ok(report)
    }

    fn handle_failure(
        &self,
        step: &Step,
        code: Option<i32>,
        stderr: &str,
        report: &mut DeployReport,
    ) -> Result<()> {
        match step.policy {
            FailurePolicy::Abort => {
                tracing::debug!("step {} failed with {:?}, aborting", step.kind, code);
                Err(match step.kind {
                    StepKind::WhoAmI => DeployError::NotAuthenticated,
                    kind => DeployError::StepFailed {
                        step: kind,
                        command: step.command.to_string(),
                        code,
                        stderr: stderr.to_string(),
                    },
                })
            }
            FailurePolicy::WarnAndContinue => {
                let message = step
                    .remediation
                    .clone()
                    .unwrap_or_else(|| format!("{} に失敗しました", step.kind));
                tracing::warn!("step {} failed with {:?}; continuing", step.kind, code);

                println!("  {} {} に失敗しました", "⚠".yellow(), step.kind);
                println!("  {}", message.yellow());

                report.warnings.push(StepWarning {
                    step: step.kind,
                    message,
                });
                Ok(())
            }
        }
    }
}

/// キャプチャした出力をコンソールに表示
fn echo_output(output: &CommandOutput) {
    let stdout = output.stdout.trim();
    if !stdout.is_empty() {
        for line in stdout.lines() {
            println!("    {}", line);
        }
    }

    let stderr = output.stderr.trim();
    if !stderr.is_empty() {
        for line in stderr.lines() {
            println!("    {}", line.dimmed());
        }
    }
}

/// デプロイ全体を実行
///
/// パラメータ検証 → 必須ツール確認 → 手順の組み立て → 実行
pub async fn deploy(runner: &dyn CommandRunner, params: &DeployParams) -> Result<DeployReport> {
    params.validate()?;
    preflight::check(runner, &REQUIRED_TOOLS).await?;

    let plan = DeployPlan::from_params(params);
    tracing::debug!("deploy plan: {:?}", plan.kinds());

    StepRunner::new(runner, params.dry_run).run(&plan).await
}
