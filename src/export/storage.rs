//! Export destination file operations

use anyhow::{Context, Result};
use std::path::PathBuf;
use tokio::fs;
use tracing::debug;

use crate::utils::sanitize_filename;
use crate::xspf::XspfDocument;

/// Extension of written playlist files
pub const PLAYLIST_EXTENSION: &str = "xspf";

/// Manages file operations under the export destination
pub struct ExportStorage {
    root: PathBuf,
    flat: bool,
}

impl ExportStorage {
    /// Create a storage manager; `flat` ignores folder paths entirely
    pub fn new(root: PathBuf, flat: bool) -> Self {
        Self { root, flat }
    }

    /// Create the destination directory
    ///
    /// An existing directory is fine; any other failure is reported with the path.
    pub async fn init(&self) -> Result<()> {
        fs::create_dir_all(&self.root)
            .await
            .with_context(|| format!("Failed to create destination {}", self.root.display()))?;

        debug!("Initialized export destination at {}", self.root.display());
        Ok(())
    }

    /// Directory a playlist under `folder_path` is written to
    pub fn folder_dir(&self, folder_path: &[String]) -> PathBuf {
        let mut dir = self.root.clone();
        if !self.flat {
            for folder in folder_path {
                dir.push(sanitize_filename(folder));
            }
        }
        dir
    }

    /// Full path of the file for a playlist
    pub fn playlist_path(&self, name: &str, folder_path: &[String]) -> PathBuf {
        let filename = format!("{}.{}", sanitize_filename(name), PLAYLIST_EXTENSION);
        self.folder_dir(folder_path).join(filename)
    }

    /// Write a serialized playlist, creating its folders as needed
    ///
    /// Returns the full path of the written file
    pub async fn write_playlist(
        &self,
        name: &str,
        folder_path: &[String],
        document: &XspfDocument,
    ) -> Result<PathBuf> {
        let dir = self.folder_dir(folder_path);
        fs::create_dir_all(&dir)
            .await
            .with_context(|| format!("Failed to create folder {}", dir.display()))?;

        let path = self.playlist_path(name, folder_path);
        let xml = document.to_xml_string()?;

        fs::write(&path, xml)
            .await
            .with_context(|| format!("Failed to write playlist {}", path.display()))?;

        debug!("Wrote playlist: {}", path.display());
        Ok(path)
    }
}
