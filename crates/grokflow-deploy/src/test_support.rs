use crate::command::{CommandOutput, CommandRunner, CommandSpec};
use crate::error::Result;
use async_trait::async_trait;
use std::sync::Mutex;

/// 実行されたコマンドを記録し、指定したコマンドだけ失敗させるランナー
#[derive(Default)]
pub struct ScriptedRunner {
    calls: Mutex<Vec<CommandSpec>>,
    /// (program, subcommand) が一致したら exit code 1
    failing: Vec<(String, String)>,
    /// 起動できない（未インストール）プログラム
    missing: Vec<String>,
}

impl ScriptedRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_on(mut self, program: &str, subcommand: &str) -> Self {
        self.failing
            .push((program.to_string(), subcommand.to_string()));
        self
    }

    pub fn missing(mut self, program: &str) -> Self {
        self.missing.push(program.to_string());
        self
    }

    pub fn calls(&self) -> Vec<CommandSpec> {
        self.calls.lock().unwrap().clone()
    }

    /// `program subcommand` 形式の呼び出し履歴
    pub fn call_names(&self) -> Vec<String> {
        self.calls()
            .iter()
            .map(|c| format!("{} {}", c.program(), c.subcommand().unwrap_or("")))
            .collect()
    }
}

#[async_trait]
impl CommandRunner for ScriptedRunner {
    async fn run(&self, command: &CommandSpec) -> Result<CommandOutput> {
        self.calls.lock().unwrap().push(command.clone());

        if self.missing.iter().any(|p| p == command.program()) {
            return Err(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("{}: not found", command.program()),
            )
            .into());
        }

        let subcommand = command.subcommand().unwrap_or("");
        let fails = self
            .failing
            .iter()
            .any(|(p, s)| p == command.program() && s == subcommand);

        if fails {
            Ok(CommandOutput {
                code: Some(1),
                stdout: String::new(),
                stderr: format!("{} {} failed", command.program(), subcommand),
            })
        } else {
            Ok(CommandOutput {
                code: Some(0),
                stdout: "ok\n".to_string(),
                stderr: String::new(),
            })
        }
    }
}
