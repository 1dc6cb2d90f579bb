use crate::plan::StepKind;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DeployError {
    #[error("Required tool not found: {0}")]
    ToolNotFound(String),

    #[error("Not logged in to HuggingFace")]
    NotAuthenticated,

    #[error("Step '{step}' failed: {command}")]
    StepFailed {
        step: StepKind,
        command: String,
        code: Option<i32>,
        stderr: String,
    },

    #[error("Invalid image tag: {tag}")]
    InvalidTag { tag: String },

    #[error("Invalid deploy parameters: {0}")]
    InvalidParams(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl DeployError {
    /// ユーザー向けの分かりやすいエラーメッセージ
    pub fn user_message(&self) -> String {
        match self {
            DeployError::ToolNotFound(tool) => {
                format!(
                    "{} が見つかりません。先にインストールしてください\n\
                     \n\
                     `{} --version` が正常終了することを確認してください。",
                    tool, tool
                )
            }
            DeployError::NotAuthenticated => "HuggingFace にログインしていません\n\
                 \n\
                 解決方法:\n\
                 1. `huggingface-cli login` を実行してください\n\
                 2. または --hf-token (環境変数 HF_TOKEN) でトークンを指定してください"
                .to_string(),
            // stderr はステップ実行時に表示済み
            DeployError::StepFailed {
                step,
                command,
                code,
                ..
            } => {
                let code = code
                    .map(|c| c.to_string())
                    .unwrap_or_else(|| "-".to_string());
                format!(
                    "{} に失敗しました (exit code: {})\n  コマンド: {}",
                    step, code, command
                )
            }
            _ => format!("{}", self),
        }
    }
}

pub type Result<T> = std::result::Result<T, DeployError>;
