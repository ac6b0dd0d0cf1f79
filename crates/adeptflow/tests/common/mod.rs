use assert_cmd::Command;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// 設定ディレクトリと作業ディレクトリを一時領域に隔離したテスト環境
pub struct TestEnv {
    pub home: TempDir,
    pub work: TempDir,
}

impl TestEnv {
    pub fn new() -> Self {
        Self {
            home: tempfile::tempdir().unwrap(),
            work: tempfile::tempdir().unwrap(),
        }
    }

    /// 隔離済みの `adept` コマンド
    pub fn adept(&self) -> Command {
        #[allow(deprecated)]
        let mut cmd = Command::cargo_bin("adept").unwrap();
        cmd.current_dir(self.work.path())
            .env("ADEPTFLOW_HOME", self.home.path())
            .env_remove("ADEPTFLOW_CONFIG_PATH")
            .env_remove("AWS_REGION")
            .env_remove("AWS_ACCESS_KEY_ID")
            .env_remove("AWS_SECRET_ACCESS_KEY")
            .env_remove("OPENAI_API_KEY")
            .env_remove("RUST_LOG");
        cmd
    }

    pub fn work_path(&self) -> &Path {
        self.work.path()
    }

    pub fn storage_file(&self) -> PathBuf {
        self.home.path().join("credentials.json")
    }

    #[allow(dead_code)]
    pub fn write_settings(&self, content: &str) {
        std::fs::write(self.work.path().join("adeptflow.yml"), content).unwrap();
    }
}
