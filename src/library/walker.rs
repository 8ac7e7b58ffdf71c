//! Container walker
//!
//! Turns the flat marker stream of a playlist container into playlists
//! annotated with the folder path they were found under.

use tracing::{debug, warn};

use super::error::{Diagnostic, LibraryError};
use super::models::{ContainerEntry, PlaylistModel};

/// A playlist emitted by the walker, with the folders enclosing it
#[derive(Debug, Clone, PartialEq)]
pub struct WalkedPlaylist {
    pub name: String,
    /// Open folders from the root down, captured when the playlist was reached
    pub folder_path: Vec<String>,
    pub model: PlaylistModel,
}

type ProgressFn<'a> = Box<dyn FnMut(usize, usize) + Send + 'a>;

/// Lazy walk over a container's entries
///
/// Yields one item per playlist in source order. A folder end marker with no
/// open folder yields `LibraryError::MalformedHierarchy` and ends the walk.
pub struct ContainerWalker<'a, I> {
    entries: I,
    position: usize,
    total: usize,
    folders: Vec<String>,
    diagnostics: Vec<Diagnostic>,
    on_progress: Option<ProgressFn<'a>>,
    done: bool,
}

impl<'a, I> ContainerWalker<'a, I>
where
    I: Iterator<Item = ContainerEntry>,
{
    /// Start a walk at the root of the hierarchy
    pub fn new<T>(entries: T) -> Self
    where
        T: IntoIterator<IntoIter = I>,
    {
        let entries = entries.into_iter();
        let (lower, upper) = entries.size_hint();
        Self {
            entries,
            position: 0,
            total: upper.unwrap_or(lower),
            folders: Vec::new(),
            diagnostics: Vec::new(),
            on_progress: None,
            done: false,
        }
    }

    /// Report `(current, total)` before each entry is handled
    pub fn on_progress(mut self, callback: impl FnMut(usize, usize) + Send + 'a) -> Self {
        self.on_progress = Some(Box::new(callback));
        self
    }

    /// Diagnostics collected during the walk
    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }
}

impl<I> Iterator for ContainerWalker<'_, I>
where
    I: Iterator<Item = ContainerEntry>,
{
    type Item = Result<WalkedPlaylist, LibraryError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        loop {
            let Some(entry) = self.entries.next() else {
                if !self.folders.is_empty() {
                    debug!("Container ended with open folders: {:?}", self.folders);
                }
                self.done = true;
                return None;
            };

            let position = self.position;
            self.position += 1;

            if let Some(report) = self.on_progress.as_mut() {
                report(position + 1, self.total.max(position + 1));
            }
            debug!("Loading {} of {}...", position + 1, self.total);

            match entry {
                ContainerEntry::Playlist(model) => {
                    return Some(Ok(WalkedPlaylist {
                        name: model.name.clone(),
                        folder_path: self.folders.clone(),
                        model,
                    }));
                }
                ContainerEntry::FolderStart { name } => {
                    debug!("Entering folder: {}", name);
                    self.folders.push(name);
                }
                ContainerEntry::FolderEnd => {
                    if self.folders.pop().is_none() {
                        self.done = true;
                        return Some(Err(LibraryError::MalformedHierarchy { position }));
                    }
                }
                ContainerEntry::Unrecognized(raw) => {
                    warn!(
                        "Don't know what to do with {} entry {}: {}",
                        raw.kind, position, raw.value
                    );
                    self.diagnostics.push(Diagnostic::UnknownEntry {
                        position,
                        kind: raw.kind,
                        value: raw.value,
                    });
                }
            }
        }
    }
}
