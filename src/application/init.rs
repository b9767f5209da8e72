//! Initialize vault use case

use crate::error::Result;
use crate::infrastructure::{Config, FileSystemRepository, VaultRepository};
use std::fs;
use std::path::Path;
use tracing::info;

/// Initialize a new vault at the specified path.
pub fn init(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)?;
    }

    let repo = FileSystemRepository::new(path.to_path_buf());
    repo.initialize()?;
    repo.save_config(&Config::new())?;

    info!(root = %path.display(), "initialized vault");
    println!("Initialized tagshift vault at {}", path.display());

    Ok(())
}
