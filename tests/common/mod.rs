#![allow(dead_code)]

pub mod fake_api;
pub mod mock_data;

use std::fs;
use std::path::PathBuf;
use std::process::{Command, Output};
use tempfile::TempDir;

/// Address nothing listens on, so any network call fails fast.
pub const UNREACHABLE_API: &str = "http://127.0.0.1:9";

/// Helper struct to run shoplist commands with an isolated config file
pub struct ShoplistTest {
    pub temp_dir: TempDir,
    binary_path: String,
}

impl ShoplistTest {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        ShoplistTest {
            temp_dir,
            binary_path: env!("CARGO_BIN_EXE_shoplist").to_string(),
        }
    }

    pub fn config_path(&self) -> PathBuf {
        self.temp_dir.path().join("config.yaml")
    }

    pub fn run(&self, args: &[&str]) -> Output {
        Command::new(&self.binary_path)
            .args(args)
            .current_dir(self.temp_dir.path())
            .env("SHOPLIST_CONFIG", self.config_path())
            .env("SHOPLIST_API_URL", UNREACHABLE_API)
            .env_remove("SHOPLIST_LOG")
            .output()
            .expect("Failed to execute shoplist command")
    }

    pub fn run_success(&self, args: &[&str]) -> String {
        let output = self.run(args);
        if !output.status.success() {
            panic!(
                "Command {:?} failed with status {:?}\nstdout: {}\nstderr: {}",
                args,
                output.status,
                String::from_utf8_lossy(&output.stdout),
                String::from_utf8_lossy(&output.stderr)
            );
        }
        String::from_utf8_lossy(&output.stdout).to_string()
    }

    pub fn run_failure(&self, args: &[&str]) -> String {
        let output = self.run(args);
        assert!(
            !output.status.success(),
            "Expected command {:?} to fail, but it succeeded",
            args
        );
        String::from_utf8_lossy(&output.stderr).to_string()
    }

    pub fn read_config(&self) -> String {
        fs::read_to_string(self.config_path()).expect("Failed to read config file")
    }

    pub fn write_config(&self, content: &str) {
        fs::write(self.config_path(), content).expect("Failed to write config file");
    }
}

impl Default for ShoplistTest {
    fn default() -> Self {
        Self::new()
    }
}
