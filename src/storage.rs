//! Local disk storage for uploaded files.
//!
//! Callers pick the destination path and are expected to keep it unique
//! (see [`crate::random::unique_file_name`]). Nothing here checks for `..`
//! segments or caps the stream size; upload handlers must do that before
//! calling in.

use log::{debug, warn};
use std::env;
use std::fs::{self, File};
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::config::AppConfig;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("failed to resolve path {}: {source}", .path.display())]
    Resolve {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to create directory {}: {source}", .path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to create file {}: {source}", .path.display())]
    CreateFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to write file {}: {source}", .path.display())]
    Copy {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to remove file {}: {source}", .path.display())]
    Remove {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl StorageError {
    pub fn io_error(&self) -> &io::Error {
        match self {
            Self::Resolve { source, .. }
            | Self::CreateDir { source, .. }
            | Self::CreateFile { source, .. }
            | Self::Copy { source, .. }
            | Self::Remove { source, .. } => source,
        }
    }

    pub fn kind(&self) -> io::ErrorKind {
        self.io_error().kind()
    }

    pub fn path(&self) -> &Path {
        match self {
            Self::Resolve { path, .. }
            | Self::CreateDir { path, .. }
            | Self::CreateFile { path, .. }
            | Self::Copy { path, .. }
            | Self::Remove { path, .. } => path,
        }
    }
}

pub trait FileStorage: Send + Sync {
    /// Writes the whole stream to `dest`, replacing any file already there,
    /// and returns the public URL for it.
    fn save_file(&self, src: &mut dyn Read, dest: &str) -> Result<String, StorageError>;

    fn delete_file(&self, path: &str) -> Result<(), StorageError>;
}

#[derive(Clone, Debug)]
pub struct LocalFileStorage {
    base_url: String,
    root: PathBuf,
}

impl LocalFileStorage {
    /// Relative paths resolve against the working directory as it is now,
    /// not as it is when a later call runs.
    pub fn new(base_url: impl Into<String>) -> io::Result<Self> {
        Ok(Self::with_root(base_url, env::current_dir()?))
    }

    pub fn with_root(base_url: impl Into<String>, root: impl Into<PathBuf>) -> Self {
        Self {
            base_url: base_url.into(),
            root: root.into(),
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::with_root(config.file_base_url.clone(), config.upload_storage_path())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn url_for(&self, dest: &str) -> String {
        format!("{}/{}", self.base_url, normalize_path(dest))
    }

    fn resolve(&self, path: &str) -> Result<PathBuf, StorageError> {
        let joined = self.root.join(path);
        if joined.is_absolute() {
            return Ok(joined);
        }
        // only reached when the root itself was configured relative
        let cwd = env::current_dir().map_err(|source| StorageError::Resolve {
            path: joined.clone(),
            source,
        })?;
        Ok(cwd.join(joined))
    }
}

impl FileStorage for LocalFileStorage {
    fn save_file(&self, src: &mut dyn Read, dest: &str) -> Result<String, StorageError> {
        let result = save_to(&self.resolve(dest)?, src);
        match result {
            Ok(written) => {
                let url = self.url_for(dest);
                debug!("saved {} bytes to {} ({})", written, dest, url);
                Ok(url)
            }
            Err(err) => {
                warn!("save {} failed: {}", dest, err);
                Err(err)
            }
        }
    }

    fn delete_file(&self, path: &str) -> Result<(), StorageError> {
        let abs = self.resolve(path)?;
        fs::remove_file(&abs).map_err(|source| {
            warn!("delete {} failed: {}", abs.display(), source);
            StorageError::Remove {
                path: abs.clone(),
                source,
            }
        })?;
        debug!("deleted {}", abs.display());
        Ok(())
    }
}

fn save_to(path: &Path, src: &mut dyn Read) -> Result<u64, StorageError> {
    if let Some(parent) = path.parent() {
        create_dirs(parent).map_err(|source| StorageError::CreateDir {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    let mut file = File::create(path).map_err(|source| StorageError::CreateFile {
        path: path.to_path_buf(),
        source,
    })?;

    io::copy(src, &mut file).map_err(|source| StorageError::Copy {
        path: path.to_path_buf(),
        source,
    })
}

fn create_dirs(dir: &Path) -> io::Result<()> {
    let mut builder = fs::DirBuilder::new();
    builder.recursive(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(0o755);
    }
    builder.create(dir)
}

/// Forward slashes only, minus one leading `./`.
pub fn normalize_path(path: &str) -> String {
    let path = path.replace('\\', "/");
    match path.strip_prefix("./") {
        Some(rest) => rest.to_string(),
        None => path,
    }
}
