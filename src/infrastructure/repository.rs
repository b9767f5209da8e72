//! File system repository

use crate::error::{Result, TagshiftError};
use crate::infrastructure::config::{Config, VAULT_DIR};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

/// Abstract repository for vault operations
pub trait VaultRepository {
    /// Get the root directory of this vault
    fn root(&self) -> &Path;

    /// Load configuration from .tagshift/config.toml
    fn load_config(&self) -> Result<Config>;

    /// Save configuration to .tagshift/config.toml
    fn save_config(&self, config: &Config) -> Result<()>;

    /// Check if .tagshift directory exists
    fn is_initialized(&self) -> bool;

    /// Create .tagshift directory structure
    fn initialize(&self) -> Result<()>;
}

/// File system implementation of VaultRepository
#[derive(Debug, Clone)]
pub struct FileSystemRepository {
    pub root: PathBuf,
}

impl FileSystemRepository {
    /// Create a new repository with the given root directory
    pub fn new(root: PathBuf) -> Self {
        FileSystemRepository { root }
    }

    /// Discover the vault root.
    /// Checks TAGSHIFT_ROOT first, then walks up from the current directory.
    pub fn discover() -> Result<Self> {
        if let Ok(root_path) = std::env::var("TAGSHIFT_ROOT") {
            let path = PathBuf::from(root_path);
            if Self::has_vault_dir(&path) {
                return Ok(FileSystemRepository::new(path));
            } else {
                return Err(TagshiftError::Config(format!(
                    "TAGSHIFT_ROOT is set to '{}' but no .tagshift directory found. \
                    Run 'tagshift init' in that directory or unset TAGSHIFT_ROOT.",
                    path.display()
                )));
            }
        }

        let current_dir = std::env::current_dir()?;
        Self::discover_from(&current_dir)
    }

    /// Discover the vault root by walking up from a specific starting directory
    pub fn discover_from(start: &Path) -> Result<Self> {
        let mut current = start.to_path_buf();

        loop {
            if Self::has_vault_dir(&current) {
                debug!(root = %current.display(), "found vault");
                return Ok(FileSystemRepository::new(current));
            }

            match current.parent() {
                Some(parent) => current = parent.to_path_buf(),
                None => return Err(TagshiftError::NotVaultDirectory(start.to_path_buf())),
            }
        }
    }

    fn has_vault_dir(path: &Path) -> bool {
        path.join(VAULT_DIR).is_dir()
    }
}

impl VaultRepository for FileSystemRepository {
    fn root(&self) -> &Path {
        &self.root
    }

    fn load_config(&self) -> Result<Config> {
        Config::load_from_dir(&self.root)
    }

    fn save_config(&self, config: &Config) -> Result<()> {
        config.save_to_dir(&self.root)
    }

    fn is_initialized(&self) -> bool {
        Self::has_vault_dir(&self.root)
    }

    fn initialize(&self) -> Result<()> {
        let vault_dir = self.root.join(VAULT_DIR);

        if vault_dir.exists() {
            return Err(TagshiftError::Config(format!(
                "Directory already initialized: {}",
                self.root.display()
            )));
        }

        fs::create_dir(&vault_dir)?;
        Ok(())
    }
}

// Note operations (filesystem-specific)
impl FileSystemRepository {
    /// Read note content (returns empty string if file doesn't exist)
    pub fn read_note(&self, filename: &str) -> Result<String> {
        let path = self.root.join(filename);

        if !path.exists() {
            return Ok(String::new());
        }

        fs::read_to_string(&path).map_err(TagshiftError::Io)
    }

    /// Write note content using a best-effort atomic replace:
    /// write to a temp file in the same directory, then rename into place.
    ///
    /// On Windows, `rename` does not overwrite existing files, so we remove the destination first.
    pub fn write_note_atomic(&self, filename: &str, content: &str) -> Result<()> {
        let path = self.root.join(filename);

        if let Some(parent) = path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let tmp_name = format!(
            "{}.tagshift-tmp-{}",
            path.file_name()
                .and_then(|s| s.to_str())
                .unwrap_or("note.md"),
            std::process::id()
        );
        let tmp_path = path.with_file_name(tmp_name);

        fs::write(&tmp_path, content)?;

        if cfg!(windows) && path.exists() {
            fs::remove_file(&path)?;
        }

        fs::rename(&tmp_path, &path)?;
        Ok(())
    }

    fn normalize_relative_path(path: &Path) -> Option<String> {
        let parts: Vec<&str> = path
            .iter()
            .map(|part| part.to_str())
            .collect::<Option<_>>()?;
        Some(parts.join("/"))
    }

    /// List every markdown note below the root, as sorted `/`-separated
    /// relative paths. Dot-directories and ignored directories are skipped.
    pub fn list_notes(&self, config: &Config) -> Result<Vec<String>> {
        let walker = WalkDir::new(&self.root).into_iter().filter_entry(|entry| {
            if entry.depth() == 0 || !entry.file_type().is_dir() {
                return true;
            }
            entry
                .file_name()
                .to_str()
                .is_none_or(|name| !name.starts_with('.') && !config.is_ignored(name))
        });

        let mut notes = Vec::new();
        for entry in walker {
            let entry = entry.map_err(|e| {
                TagshiftError::Io(std::io::Error::other(format!(
                    "Failed to walk vault: {}",
                    e
                )))
            })?;
            if !entry.file_type().is_file() {
                continue;
            }
            if entry.path().extension().and_then(|ext| ext.to_str()) != Some("md") {
                continue;
            }
            let Ok(rel) = entry.path().strip_prefix(&self.root) else {
                continue;
            };
            if let Some(filename) = Self::normalize_relative_path(rel) {
                notes.push(filename);
            }
        }

        notes.sort();
        debug!(count = notes.len(), "listed notes");
        Ok(notes)
    }
}
