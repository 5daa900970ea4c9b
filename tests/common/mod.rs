//! Shared testing utilities for sovseas CLI tests.

use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Campaign draft that passes validation for the foreseeable future.
#[allow(dead_code)]
pub const VALID_CAMPAIGN: &str = r#"
name = "Celo Builders Season"
description = "A month-long hackathon for teams shipping public goods on Celo. Projects are voted on by the community and share the pool."
campaignType = "hackathon"
category = "public-goods"
startDate = "2099-03-01T09:00"
endDate = "2099-03-31T21:00"
prizePool = "500"
maxWinners = "0"
adminFee = "5"
tags = ["celo", "public-goods"]
"#;

/// Project draft in JSON form.
#[allow(dead_code)]
pub const VALID_PROJECT: &str = r#"{
  "name": "Seaside",
  "description": "A public goods savings protocol that lets Celo communities pool and grow shared funds.",
  "category": "defi",
  "contactEmail": "team@seaside.xyz",
  "smartContracts": ["0x765de816845861e75a25fca122bb6898b8b1282a"],
  "teamMembers": [{ "name": "Ada", "role": "Engineer" }]
}"#;

/// Testing harness providing an isolated environment for CLI exercises.
#[allow(dead_code)]
pub struct TestContext {
    root: TempDir,
    work_dir: PathBuf,
}

#[allow(dead_code)]
impl TestContext {
    /// Create a new isolated environment.
    pub fn new() -> Self {
        let root = TempDir::new().expect("Failed to create temp directory for tests");
        let work_dir = root.path().join("work");
        fs::create_dir_all(&work_dir).expect("Failed to create test work directory");
        Self { root, work_dir }
    }

    /// Path to the workspace directory used for CLI invocations.
    pub fn work_dir(&self) -> &Path {
        &self.work_dir
    }

    /// Build a command for invoking the compiled `sovseas` binary within the workspace.
    pub fn cli(&self) -> Command {
        let mut cmd = Command::cargo_bin("sovseas").expect("Failed to locate sovseas binary");
        cmd.current_dir(&self.work_dir)
            .env("HOME", self.root.path())
            .env("RUST_LOG", "error")
            .env_remove("SOVSEAS_CONTRACT_ADDRESS")
            .env_remove("PINATA_JWT");
        cmd
    }

    /// Write a file relative to the workspace and return its path.
    pub fn write(&self, relative: &str, content: &str) -> PathBuf {
        let path = self.work_dir.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        fs::write(&path, content).expect("Failed to write test file");
        path
    }

    pub fn read(&self, relative: &str) -> String {
        fs::read_to_string(self.work_dir.join(relative)).expect("Failed to read test file")
    }
}
