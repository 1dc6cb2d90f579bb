//! デプロイ手順の組み立て
//!
//! パラメータから実行すべきステップを順番に並べます。
//! 各ステップは失敗時の扱い（[`FailurePolicy`]）を持ちます。

use crate::command::CommandSpec;
use crate::params::DeployParams;
use std::fmt;

pub const DOCKER: &str = "docker";
pub const HUGGINGFACE_CLI: &str = "huggingface-cli";

/// Space 用イメージの Dockerfile
pub const DOCKERFILE: &str = "hf/Dockerfile";
pub const BUILD_CONTEXT: &str = ".";

/// huggingface-cli が参照するトークンの環境変数
pub const HF_TOKEN_ENV: &str = "HF_TOKEN";

/// ステップの種類
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepKind {
    /// トークンで HuggingFace にログイン
    Login,
    /// 既存ログインの確認
    WhoAmI,
    Build,
    Push,
    /// Space を新しいイメージに向ける
    UpdateSpace,
}

impl fmt::Display for StepKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StepKind::Login => write!(f, "login"),
            StepKind::WhoAmI => write!(f, "whoami"),
            StepKind::Build => write!(f, "build"),
            StepKind::Push => write!(f, "push"),
            StepKind::UpdateSpace => write!(f, "update-space"),
        }
    }
}

/// ステップ失敗時の扱い
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailurePolicy {
    /// デプロイ全体を中断
    Abort,
    /// 警告を出して次へ進む
    WarnAndContinue,
}

/// 1つのデプロイステップ
#[derive(Debug, Clone)]
pub struct Step {
    pub kind: StepKind,
    pub description: String,
    pub command: CommandSpec,
    pub policy: FailurePolicy,
    /// 失敗時に表示する手動対応の案内
    pub remediation: Option<String>,
}

impl Step {
    fn new(
        kind: StepKind,
        description: impl Into<String>,
        command: CommandSpec,
        policy: FailurePolicy,
    ) -> Self {
        Self {
            kind,
            description: description.into(),
            command,
            policy,
            remediation: None,
        }
    }

    fn with_remediation(mut self, remediation: impl Into<String>) -> Self {
        self.remediation = Some(remediation.into());
        self
    }
}

/// 実行順に並んだステップの一覧
#[derive(Debug, Clone)]
pub struct DeployPlan {
    image_tag: String,
    steps: Vec<Step>,
}

impl DeployPlan {
    /// パラメータから手順を組み立てる
    ///
    /// - 認証: dry-run 以外。トークンがあれば login、なければ whoami で確認
    /// - ビルド: 常に含める（dry-run では表示のみ）
    /// - プッシュ: dry-run 以外
    /// - Space 更新: Space 指定あり、かつ push-only / dry-run でない場合のみ
    pub fn from_params(params: &DeployParams) -> Self {
        let image_tag = params.image_tag();
        let mut steps = Vec::new();

        if !params.dry_run {
            steps.push(auth_step(params.token()));
        }

        steps.push(Step::new(
            StepKind::Build,
            format!("HuggingFace Space イメージをビルド: {}", image_tag),
            CommandSpec::new(DOCKER).args([
                "build",
                "-f",
                DOCKERFILE,
                "-t",
                image_tag.as_str(),
                BUILD_CONTEXT,
            ]),
            FailurePolicy::Abort,
        ));

        if !params.dry_run {
            steps.push(Step::new(
                StepKind::Push,
                format!("イメージをプッシュ: {}", image_tag),
                CommandSpec::new(DOCKER).args(["push", image_tag.as_str()]),
                FailurePolicy::Abort,
            ));
        }

        if params.updates_space()
            && let Some(space) = params.space()
        {
            let mut command = CommandSpec::new(HUGGINGFACE_CLI).args([
                "space",
                "run",
                space,
                "--docker-image",
                image_tag.as_str(),
            ]);
            if let Some(token) = params.token() {
                command = command.env(HF_TOKEN_ENV, token);
            }

            steps.push(
                Step::new(
                    StepKind::UpdateSpace,
                    format!("HuggingFace Space を更新: {}", space),
                    command,
                    FailurePolicy::WarnAndContinue,
                )
                .with_remediation(format!(
                    "Space {} の Docker イメージを手動で次に更新してください: {}",
                    space, image_tag
                )),
            );
        }

        Self { image_tag, steps }
    }

    pub fn image_tag(&self) -> &str {
        &self.image_tag
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn kinds(&self) -> Vec<StepKind> {
        self.steps.iter().map(|s| s.kind).collect()
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

fn auth_step(token: Option<&str>) -> Step {
    match token {
        Some(token) => Step::new(
            StepKind::Login,
            "HuggingFace にログイン",
            CommandSpec::new(HUGGINGFACE_CLI)
                .args(["login", "--token"])
                .secret_arg(token)
                .env(HF_TOKEN_ENV, token),
            FailurePolicy::Abort,
        ),
        None => Step::new(
            StepKind::WhoAmI,
            "HuggingFace のログイン状態を確認",
            CommandSpec::new(HUGGINGFACE_CLI).arg("whoami"),
            FailurePolicy::Abort,
        ),
    }
}
