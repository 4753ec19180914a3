use assert_cmd::{cargo::cargo_bin_cmd, Command};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A journal folder plus an isolated settings directory
pub struct TestJournal {
    dir: TempDir,
}

impl TestJournal {
    pub fn new() -> Self {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("journal")).unwrap();
        fs::create_dir_all(dir.path().join("config")).unwrap();
        TestJournal { dir }
    }

    pub fn root(&self) -> PathBuf {
        self.dir.path().join("journal")
    }

    pub fn config_dir(&self) -> PathBuf {
        self.dir.path().join("config")
    }

    /// Write a file relative to the journal root
    pub fn write(&self, rel: &str, content: &str) -> &Self {
        let path = self.root().join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
        self
    }

    /// Command with settings isolated but no journal selected
    pub fn bare_cmd(&self) -> Command {
        diarist(&self.config_dir())
    }

    /// Command pointed at this journal via --root
    pub fn cmd(&self) -> Command {
        let mut cmd = self.bare_cmd();
        cmd.arg("--root").arg(self.root());
        cmd
    }

    /// Run a JSON command and parse stdout
    pub fn json(&self, args: &[&str]) -> serde_json::Value {
        let output = self
            .cmd()
            .args(["--format", "json"])
            .args(args)
            .output()
            .unwrap();
        assert!(
            output.status.success(),
            "command failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );
        serde_json::from_slice(&output.stdout).unwrap()
    }
}

/// Get a Command for diarist with settings read from `config_dir`
pub fn diarist(config_dir: &Path) -> Command {
    let mut cmd = cargo_bin_cmd!("diarist");
    cmd.env("DIARIST_CONFIG_DIR", config_dir)
        .env_remove("DIARIST_ROOT")
        .env_remove("DIARIST_LOG")
        .env_remove("RUST_LOG");
    cmd
}
