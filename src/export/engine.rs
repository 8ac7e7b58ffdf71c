//! Export orchestration

use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use tracing::{debug, error, info, warn};

use super::storage::ExportStorage;
use crate::library::{ContainerEntry, ContainerWalker, Diagnostic};
use crate::xspf::generate_xspf;

/// Result of an export run
#[derive(Debug, Default)]
pub struct ExportResult {
    pub playlists_written: usize,
    pub tracks_written: usize,
    /// Playlists whose file could not be written
    pub failed: Vec<String>,
    /// Files written, or that would be written in a dry run
    pub paths: Vec<PathBuf>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Walks a container and writes each playlist as an XSPF file
pub struct ExportEngine {
    storage: ExportStorage,
    dry_run: bool,
    show_progress: bool,
}

impl ExportEngine {
    pub fn new(storage: ExportStorage) -> Self {
        Self {
            storage,
            dry_run: false,
            show_progress: true,
        }
    }

    /// Only compute target paths, write nothing
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn show_progress(mut self, show: bool) -> Self {
        self.show_progress = show;
        self
    }

    /// Export every playlist in the container
    ///
    /// Playlists are written in container order. A failed write is logged and
    /// the export moves on; a malformed folder hierarchy aborts it.
    pub async fn run(&self, entries: Vec<ContainerEntry>) -> Result<ExportResult> {
        let mut result = ExportResult::default();

        if !self.dry_run {
            self.storage.init().await?;
        }

        let progress = if self.show_progress {
            ProgressBar::new(entries.len() as u64)
        } else {
            ProgressBar::hidden()
        };
        progress.set_style(
            ProgressStyle::with_template("{spinner:.green} [{bar:30.cyan/blue}] {msg}")?
                .progress_chars("=> "),
        );

        let mut walker = ContainerWalker::new(entries).on_progress(|current, total| {
            progress.set_length(total as u64);
            progress.set_position(current as u64);
            progress.set_message(format!("Loading {} of {}...", current, total));
        });

        for walked in walker.by_ref() {
            let walked = match walked {
                Ok(walked) => walked,
                Err(e) => {
                    progress.abandon_with_message("Export aborted");
                    return Err(e.into());
                }
            };

            let track_count = walked.model.tracks.len();

            if self.dry_run {
                let path = self.storage.playlist_path(&walked.name, &walked.folder_path);
                debug!("Would write {} ({} tracks)", path.display(), track_count);
                result.paths.push(path);
                result.playlists_written += 1;
                result.tracks_written += track_count;
                continue;
            }

            let document = generate_xspf(&walked.model);
            match self
                .storage
                .write_playlist(&walked.name, &walked.folder_path, &document)
                .await
            {
                Ok(path) => {
                    info!("Exported playlist: {} ({} tracks)", walked.name, track_count);
                    result.paths.push(path);
                    result.playlists_written += 1;
                    result.tracks_written += track_count;
                }
                Err(e) => {
                    error!("Failed to export playlist {}: {:#}", walked.name, e);
                    result.failed.push(walked.name);
                }
            }
        }

        result.diagnostics = walker.into_diagnostics();
        progress.finish_with_message(format!(
            "Exported {} playlist(s)",
            result.playlists_written
        ));

        if !result.diagnostics.is_empty() {
            warn!("Skipped {} unrecognized entries", result.diagnostics.len());
        }

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::library::error::LibraryError;
    use crate::library::{PlaylistModel, RawEntry, TrackModel};
    use crate::xspf::XspfDocument;

    fn playlist(name: &str, tracks: usize) -> ContainerEntry {
        ContainerEntry::Playlist(PlaylistModel {
            name: name.to_string(),
            owner: "owner".to_string(),
            link: format!("spotify:playlist:{}", name),
            tracks: (0..tracks)
                .map(|i| TrackModel {
                    link: format!("spotify:track:{}", i),
                    title: format!("Track {}", i),
                    index: i as u32 + 1,
                    ..Default::default()
                })
                .collect(),
            ..Default::default()
        })
    }

    fn start(name: &str) -> ContainerEntry {
        ContainerEntry::FolderStart {
            name: name.to_string(),
        }
    }

    fn engine(root: PathBuf, flat: bool) -> ExportEngine {
        ExportEngine::new(ExportStorage::new(root, flat)).show_progress(false)
    }

    fn track_count(path: &std::path::Path) -> usize {
        let xml = std::fs::read_to_string(path).unwrap();
        let doc = XspfDocument::parse(&xml).unwrap();
        doc.root
            .child("trackList")
            .expect("trackList present")
            .children_named("track")
            .count()
    }

    #[tokio::test]
    async fn test_export_with_folders() {
        let dir = tempfile::tempdir().unwrap();
        let entries = vec![
            start("Rock"),
            playlist("P1", 1),
            ContainerEntry::FolderEnd,
            playlist("P2", 0),
        ];

        let result = engine(dir.path().to_path_buf(), false)
            .run(entries)
            .await
            .unwrap();

        assert_eq!(result.playlists_written, 2);
        assert_eq!(result.tracks_written, 1);
        assert_eq!(
            result.paths,
            vec![
                dir.path().join("Rock").join("P1.xspf"),
                dir.path().join("P2.xspf"),
            ]
        );
        assert_eq!(track_count(&result.paths[0]), 1);
        assert_eq!(track_count(&result.paths[1]), 0);
    }

    #[tokio::test]
    async fn test_export_flat() {
        let dir = tempfile::tempdir().unwrap();
        let entries = vec![start("Rock"), playlist("P1", 2), ContainerEntry::FolderEnd];

        let result = engine(dir.path().to_path_buf(), true)
            .run(entries)
            .await
            .unwrap();

        assert_eq!(result.paths, vec![dir.path().join("P1.xspf")]);
        assert!(!dir.path().join("Rock").exists());
    }

    #[tokio::test]
    async fn test_dry_run_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("dest");

        let result = engine(root.clone(), false)
            .dry_run(true)
            .run(vec![start("A/B"), playlist("Mix;1", 3)])
            .await
            .unwrap();

        assert_eq!(result.paths, vec![root.join("A-B").join("Mix-1.xspf")]);
        assert_eq!(result.tracks_written, 3);
        assert!(!root.exists());
    }

    #[tokio::test]
    async fn test_malformed_hierarchy_aborts() {
        let dir = tempfile::tempdir().unwrap();
        let entries = vec![playlist("Before", 0), ContainerEntry::FolderEnd, playlist("After", 0)];

        let err = engine(dir.path().to_path_buf(), false)
            .run(entries)
            .await
            .unwrap_err();

        assert!(matches!(
            err.downcast_ref::<LibraryError>(),
            Some(LibraryError::MalformedHierarchy { position: 1 })
        ));
        assert!(dir.path().join("Before.xspf").exists());
        assert!(!dir.path().join("After.xspf").exists());
    }

    #[tokio::test]
    async fn test_unknown_entries_reported() {
        let dir = tempfile::tempdir().unwrap();
        let entries = vec![
            ContainerEntry::Unrecognized(RawEntry {
                kind: "str".to_string(),
                value: "legacy".to_string(),
            }),
            playlist("Only", 0),
        ];

        let result = engine(dir.path().to_path_buf(), false)
            .run(entries)
            .await
            .unwrap();

        assert_eq!(result.playlists_written, 1);
        assert_eq!(result.diagnostics.len(), 1);
    }

    #[tokio::test]
    async fn test_failed_write_continues() {
        let dir = tempfile::tempdir().unwrap();
        // A file where the folder should go makes that playlist unwritable
        std::fs::write(dir.path().join("Blocked"), "").unwrap();
        let entries = vec![
            start("Blocked"),
            playlist("Lost", 0),
            ContainerEntry::FolderEnd,
            playlist("Kept", 0),
        ];

        let result = engine(dir.path().to_path_buf(), false)
            .run(entries)
            .await
            .unwrap();

        assert_eq!(result.failed, vec!["Lost".to_string()]);
        assert_eq!(result.paths, vec![dir.path().join("Kept.xspf")]);
    }
}
