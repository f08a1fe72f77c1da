//! Workspace discovery and layout
//!
//! A workspace is any directory holding a `.stockroom/` folder. The folder
//! carries the workspace config and, unless configured otherwise, the
//! SQLite database.

use std::path::{Path, PathBuf};

use miette::Diagnostic;
use thiserror::Error;

/// Name of the workspace marker directory
pub const WORKSPACE_DIR: &str = ".stockroom";

/// Default database file name inside the workspace directory
pub const DATABASE_FILE: &str = "inventory.db";

/// A stockroom workspace on disk
#[derive(Debug, Clone)]
pub struct Workspace {
    /// Directory containing `.stockroom/`
    root: PathBuf,
}

impl Workspace {
    /// Find the workspace by walking up from the current directory
    pub fn discover() -> Result<Self, WorkspaceError> {
        let current = std::env::current_dir().map_err(|e| WorkspaceError::Io(e.to_string()))?;
        Self::discover_from(&current)
    }

    /// Find the workspace by walking up from `start`
    pub fn discover_from(start: &Path) -> Result<Self, WorkspaceError> {
        let mut current = start
            .canonicalize()
            .map_err(|e| WorkspaceError::Io(e.to_string()))?;

        loop {
            if current.join(WORKSPACE_DIR).is_dir() {
                return Ok(Self { root: current });
            }

            if !current.pop() {
                return Err(WorkspaceError::NotFound {
                    searched_from: start.to_path_buf(),
                });
            }
        }
    }

    /// Create the workspace layout at `path`
    ///
    /// Fails with [`WorkspaceError::AlreadyExists`] when `.stockroom/` is
    /// already there; an existing workspace is never overwritten.
    pub fn init(path: &Path) -> Result<Self, WorkspaceError> {
        let root = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());

        let dir = root.join(WORKSPACE_DIR);
        if dir.exists() {
            return Err(WorkspaceError::AlreadyExists(root));
        }

        std::fs::create_dir_all(&dir).map_err(|e| WorkspaceError::Io(e.to_string()))?;
        std::fs::write(dir.join("config.yaml"), Self::default_config())
            .map_err(|e| WorkspaceError::Io(e.to_string()))?;

        Ok(Self { root })
    }

    fn default_config() -> &'static str {
        r#"# Stockroom workspace configuration

# SQLite database file; relative paths are resolved against the workspace root
# database: .stockroom/inventory.db

# Default output format (auto, yaml, tsv, json, csv, md, id)
# default_format: auto
"#
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The `.stockroom/` directory
    pub fn dir(&self) -> PathBuf {
        self.root.join(WORKSPACE_DIR)
    }

    pub fn config_path(&self) -> PathBuf {
        self.dir().join("config.yaml")
    }

    /// Database location used when the config does not name one
    pub fn default_database(&self) -> PathBuf {
        self.dir().join(DATABASE_FILE)
    }
}

#[derive(Debug, Error, Diagnostic)]
pub enum WorkspaceError {
    #[error("not a stockroom workspace (searched from {searched_from:?})")]
    #[diagnostic(
        code(stockroom::workspace::not_found),
        help("run `stockroom init` or pass --db <path>")
    )]
    NotFound { searched_from: PathBuf },

    #[error("stockroom workspace already exists at {0:?}")]
    #[diagnostic(code(stockroom::workspace::exists))]
    AlreadyExists(PathBuf),

    #[error("IO error: {0}")]
    #[diagnostic(code(stockroom::workspace::io))]
    Io(String),
}
