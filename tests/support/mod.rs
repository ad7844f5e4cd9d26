use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use serde_json::Value;
use tempfile::TempDir;

/// A throwaway working directory plus a throwaway home directory
pub struct TestEnv {
    work: TempDir,
    home: TempDir,
}

impl TestEnv {
    pub fn new() -> Self {
        Self {
            work: tempfile::tempdir().expect("failed to create work dir"),
            home: tempfile::tempdir().expect("failed to create home dir"),
        }
    }

    pub fn work(&self) -> &Path {
        self.work.path()
    }

    pub fn home(&self) -> &Path {
        self.home.path()
    }

    pub fn local_file(&self) -> PathBuf {
        self.work().join("tasks.json")
    }

    pub fn global_file(&self) -> PathBuf {
        self.home().join("tasks_global.json")
    }

    /// `todo` running inside the work dir with HOME pointed at the temp home
    pub fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("todo").expect("binary");
        cmd.current_dir(self.work())
            .env("HOME", self.home())
            .env("NO_COLOR", "1")
            .env_remove("TODO_LOCAL_FILE")
            .env_remove("TODO_GLOBAL_FILE")
            .env_remove("TODO_CONFIG")
            .env_remove("RUST_LOG");
        cmd
    }

    /// Run once with no flags so both files exist
    pub fn bootstrap(&self) {
        self.cmd().assert().success();
    }

    pub fn run(&self, args: &[&str]) -> String {
        let output = self.cmd().args(args).output().expect("run todo");
        assert!(output.status.success(), "todo {args:?} failed");
        String::from_utf8(output.stdout).expect("utf8 stdout")
    }

    pub fn write(&self, path: &Path, contents: &str) {
        fs::write(path, contents).expect("write file");
    }

    pub fn read_json(&self, path: &Path) -> Value {
        let raw = fs::read_to_string(path).expect("read file");
        serde_json::from_str(&raw).expect("valid json")
    }

    pub fn descriptions(&self, path: &Path, key: &str) -> Vec<String> {
        self.read_json(path)[key]
            .as_array()
            .expect("task array")
            .iter()
            .map(|task| task["description"].as_str().expect("description").to_string())
            .collect()
    }
}
