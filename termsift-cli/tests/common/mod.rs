#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Output;

use assert_cmd::Command;
use tempfile::TempDir;

/// Input file name used for every set
pub const PROTEINS: &str = "proteins.faa";

/// Two sets sharing terms, one with a masked `AAA` run
pub const SET1_FASTA: &str = ">a first protein\nMKVLAAAG\n";
pub const SET2_FASTA: &str = ">b\nMKVLAAG\n";
pub const SET3_FASTA: &str = ">c\nMKVLQ\n>d\nMKVLW\n";

/// A temporary directory holding the configuration file, set directories
/// and the summary directory.
pub struct Workspace {
    dir: TempDir,
}

impl Workspace {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().unwrap(),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn config_path(&self) -> PathBuf {
        self.path().join("config.yaml")
    }

    pub fn summary_dir(&self) -> PathBuf {
        self.path().join("summary")
    }

    pub fn set_dir(&self, name: &str) -> PathBuf {
        self.path().join(name)
    }

    /// The binary pointed at this workspace's configuration, isolated from
    /// the caller's environment.
    pub fn termsift(&self) -> Command {
        let mut cmd = Command::cargo_bin("termsift").unwrap();
        cmd.env_remove("TERMSIFT_CONFIG")
            .env_remove("TERMSIFT_LOG")
            .arg("--config")
            .arg(self.config_path());
        cmd
    }

    pub fn run(&self, args: &[&str]) {
        self.termsift().args(args).assert().success();
    }

    pub fn run_failing(&self, args: &[&str]) -> String {
        let output: Output = self.termsift().args(args).output().unwrap();
        assert!(!output.status.success(), "Expected failure for {:?}", args);
        String::from_utf8_lossy(&output.stderr).into_owned()
    }

    /// Writes `fasta` as the set's input and defines the set.
    pub fn add_set(&self, name: &str, fasta: &str) {
        let dir = self.set_dir(name);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(PROTEINS), fasta).unwrap();
        self.run(&["define-set", name, dir.to_str().unwrap()]);
    }

    /// Three sets, a summary directory and runlength simplicity.
    pub fn with_three_sets() -> Self {
        let workspace = Self::new();
        workspace.add_set("set1", SET1_FASTA);
        workspace.add_set("set2", SET2_FASTA);
        workspace.add_set("set3", SET3_FASTA);
        workspace.run(&[
            "define-summary",
            workspace.summary_dir().to_str().unwrap(),
        ]);
        workspace.run(&["define-simplicity", "runlength"]);
        workspace
    }

    pub fn read(&self, path: impl AsRef<Path>) -> String {
        fs::read_to_string(self.path().join(path)).unwrap()
    }
}
