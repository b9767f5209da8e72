#![allow(dead_code)]

use assert_cmd::Command;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

pub fn tagshift_cmd() -> Command {
    let mut cmd = Command::cargo_bin("tagshift").unwrap();
    cmd.env_remove("TAGSHIFT_ROOT");
    cmd.env_remove("RUST_LOG");
    cmd
}

/// Create an initialized vault in a fresh temp directory.
pub fn init_vault() -> TempDir {
    let temp = TempDir::new().unwrap();
    tagshift_cmd().arg("init").arg(temp.path()).assert().success();
    temp
}

pub fn write_note(root: &Path, name: &str, content: &str) {
    let path = root.join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

pub fn read_note(root: &Path, name: &str) -> String {
    fs::read_to_string(root.join(name)).unwrap()
}
