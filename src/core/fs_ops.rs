// src/core/fs_ops.rs
//! File system operations for the uploads root

use anyhow::{Context, Result};
use chrono::Utc;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::error::StorageError;

/// Prefix every stored picture path starts with, relative to the web root
pub const UPLOADS_PREFIX: &str = "uploads/";

/// Destination for accepted profile pictures
pub trait ImageStore: Send + Sync {
    /// Write `bytes` under a freshly generated name and return the relative
    /// path (`uploads/<name>`) to keep in the record.
    fn store(&self, bytes: &[u8], extension: &str) -> Result<String, StorageError>;
}

pub struct LocalImageStore {
    root: PathBuf,
}

impl LocalImageStore {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl ImageStore for LocalImageStore {
    fn store(&self, bytes: &[u8], extension: &str) -> Result<String, StorageError> {
        std::fs::create_dir_all(&self.root).map_err(|source| StorageError {
            path: self.root.clone(),
            source,
        })?;

        let file_name = FsOps::generate_picture_name(extension);
        let destination = self.root.join(&file_name);

        std::fs::write(&destination, bytes).map_err(|source| StorageError {
            path: destination.clone(),
            source,
        })?;

        info!("Stored profile picture: {}", destination.display());
        Ok(format!("{}{}", UPLOADS_PREFIX, file_name))
    }
}

pub struct FsOps;

impl FsOps {
    /// Ensure directory exists
    pub async fn ensure_dir_exists(path: &Path) -> Result<()> {
        if !path.exists() {
            tokio::fs::create_dir_all(path)
                .await
                .with_context(|| format!("Failed to create directory: {}", path.display()))?;
            info!("Created directory: {}", path.display());
        }
        Ok(())
    }

    /// `profile_<unix seconds>_<8 hex chars>.<ext>`
    pub fn generate_picture_name(extension: &str) -> String {
        format!(
            "profile_{}_{:08x}.{}",
            Utc::now().timestamp(),
            rand::random::<u32>(),
            extension
        )
    }
}
