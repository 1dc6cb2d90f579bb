use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// `docker` / `huggingface-cli` の代わりに呼び出しを記録するスクリプト群
pub struct FakeTools {
    pub root: TempDir,
}

impl FakeTools {
    pub fn new() -> Self {
        let root = tempfile::tempdir().unwrap();
        let tools = Self { root };
        fs::create_dir_all(tools.bin_dir()).unwrap();
        tools.install("docker");
        tools.install("huggingface-cli");
        tools
    }

    /// `bin/` に偽のツールを作成
    ///
    /// 呼び出しを calls.log に追記し、`fail-{tool}-{subcommand}` があれば exit 1。
    pub fn install(&self, name: &str) {
        let dir = self.root.path().display().to_string();
        let script = format!(
            "#!/bin/sh\n\
             name=\"${{0##*/}}\"\n\
             echo \"$name $*\" >> \"{dir}/calls.log\"\n\
             if [ -e \"{dir}/fail-$name-$1\" ]; then\n\
               echo \"$name $1 failed\" >&2\n\
               exit 1\n\
             fi\n\
             echo \"$name ok\"\n\
             exit 0\n"
        );
        let path = self.bin_dir().join(name);
        fs::write(&path, script).unwrap();
        make_executable(&path);
    }

    pub fn remove(&self, name: &str) {
        fs::remove_file(self.bin_dir().join(name)).unwrap();
    }

    pub fn fail(&self, tool: &str, subcommand: &str) {
        fs::write(
            self.root.path().join(format!("fail-{}-{}", tool, subcommand)),
            "",
        )
        .unwrap();
    }

    pub fn bin_dir(&self) -> PathBuf {
        self.root.path().join("bin")
    }

    /// 呼び出し履歴（`tool args...` 形式）
    pub fn calls(&self) -> Vec<String> {
        fs::read_to_string(self.root.path().join("calls.log"))
            .unwrap_or_default()
            .lines()
            .map(str::to_string)
            .collect()
    }
}

#[cfg(unix)]
fn make_executable(path: &Path) {
    use std::os::unix::fs::PermissionsExt;
    let mut perms = fs::metadata(path).unwrap().permissions();
    perms.set_mode(0o755);
    fs::set_permissions(path, perms).unwrap();
}

#[cfg(not(unix))]
fn make_executable(_path: &Path) {}
