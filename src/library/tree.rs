//! Folder hierarchy of a playlist container

use tracing::{debug, warn};

use super::error::{Diagnostic, LibraryError};
use super::models::{ContainerEntry, PlaylistModel};

/// A node of the playlist hierarchy
#[derive(Debug, Clone, PartialEq)]
pub enum LibraryNode {
    Playlist(PlaylistModel),
    Folder {
        name: String,
        children: Vec<LibraryNode>,
    },
}

/// Playlist hierarchy rebuilt from the container's marker stream
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LibraryTree {
    pub roots: Vec<LibraryNode>,
    pub diagnostics: Vec<Diagnostic>,
}

impl LibraryTree {
    /// Build the tree from a flat sequence of container entries
    ///
    /// Folders still open at the end of the sequence are closed implicitly.
    pub fn from_entries<I>(entries: I) -> Result<Self, LibraryError>
    where
        I: IntoIterator<Item = ContainerEntry>,
    {
        // Each open folder keeps its name and the children collected so far
        let mut open: Vec<(String, Vec<LibraryNode>)> = Vec::new();
        let mut roots = Vec::new();
        let mut diagnostics = Vec::new();

        for (position, entry) in entries.into_iter().enumerate() {
            let node = match entry {
                ContainerEntry::Playlist(model) => LibraryNode::Playlist(model),
                ContainerEntry::FolderStart { name } => {
                    open.push((name, Vec::new()));
                    continue;
                }
                ContainerEntry::FolderEnd => {
                    let (name, children) = open
                        .pop()
                        .ok_or(LibraryError::MalformedHierarchy { position })?;
                    LibraryNode::Folder { name, children }
                }
                ContainerEntry::Unrecognized(raw) => {
                    warn!("Skipping unknown {} entry {}: {}", raw.kind, position, raw.value);
                    diagnostics.push(Diagnostic::UnknownEntry {
                        position,
                        kind: raw.kind,
                        value: raw.value,
                    });
                    continue;
                }
            };

            match open.last_mut() {
                Some((_, children)) => children.push(node),
                None => roots.push(node),
            }
        }

        while let Some((name, children)) = open.pop() {
            debug!("Closing unterminated folder: {}", name);
            let node = LibraryNode::Folder { name, children };
            match open.last_mut() {
                Some((_, parent)) => parent.push(node),
                None => roots.push(node),
            }
        }

        Ok(Self { roots, diagnostics })
    }

    /// Total number of playlists in the tree
    pub fn playlist_count(&self) -> usize {
        fn count(nodes: &[LibraryNode]) -> usize {
            nodes
                .iter()
                .map(|node| match node {
                    LibraryNode::Playlist(_) => 1,
                    LibraryNode::Folder { children, .. } => count(children),
                })
                .sum()
        }
        count(&self.roots)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::library::walker::ContainerWalker;

    fn playlist(name: &str) -> ContainerEntry {
        ContainerEntry::Playlist(PlaylistModel {
            name: name.to_string(),
            ..Default::default()
        })
    }

    fn start(name: &str) -> ContainerEntry {
        ContainerEntry::FolderStart {
            name: name.to_string(),
        }
    }

    #[test]
    fn test_builds_nested_folders() {
        let tree = LibraryTree::from_entries(vec![
            start("Rock"),
            playlist("P1"),
            start("Live"),
            ContainerEntry::FolderEnd,
            ContainerEntry::FolderEnd,
            playlist("P2"),
        ])
        .unwrap();

        assert_eq!(tree.roots.len(), 2);
        match &tree.roots[0] {
            LibraryNode::Folder { name, children } => {
                assert_eq!(name, "Rock");
                assert_eq!(children.len(), 2);
                assert!(matches!(
                    &children[1],
                    LibraryNode::Folder { name, children } if name == "Live" && children.is_empty()
                ));
            }
            other => panic!("expected folder, got {:?}", other),
        }
        assert_eq!(tree.playlist_count(), 2);
    }

    #[test]
    fn test_unmatched_end_fails() {
        let err = LibraryTree::from_entries(vec![playlist("P"), ContainerEntry::FolderEnd])
            .unwrap_err();
        assert!(matches!(err, LibraryError::MalformedHierarchy { position: 1 }));
    }

    #[test]
    fn test_unterminated_folders_are_closed() {
        let tree = LibraryTree::from_entries(vec![start("A"), start("B"), playlist("Deep")])
            .unwrap();

        assert_eq!(
            tree.roots,
            vec![LibraryNode::Folder {
                name: "A".to_string(),
                children: vec![LibraryNode::Folder {
                    name: "B".to_string(),
                    children: vec![LibraryNode::Playlist(PlaylistModel {
                        name: "Deep".to_string(),
                        ..Default::default()
                    })],
                }],
            }]
        );
    }

    #[test]
    fn test_tree_agrees_with_walker() {
        let entries = vec![
            playlist("Top"),
            start("Genres"),
            start("Jazz"),
            playlist("Bebop"),
            ContainerEntry::FolderEnd,
            playlist("Misc"),
            ContainerEntry::FolderEnd,
        ];

        fn paths(nodes: &[LibraryNode], prefix: &mut Vec<String>, out: &mut Vec<String>) {
            for node in nodes {
                match node {
                    LibraryNode::Playlist(_) => out.push(prefix.join("/")),
                    LibraryNode::Folder { name, children } => {
                        prefix.push(name.clone());
                        paths(children, prefix, out);
                        prefix.pop();
                    }
                }
            }
        }

        let tree = LibraryTree::from_entries(entries.clone()).unwrap();
        let mut from_tree = Vec::new();
        paths(&tree.roots, &mut Vec::new(), &mut from_tree);

        let from_walker: Vec<_> = ContainerWalker::new(entries)
            .map(|p| p.unwrap().folder_path.join("/"))
            .collect();
        assert_eq!(from_tree, from_walker);
        assert_eq!(from_walker, vec!["", "Genres/Jazz", "Genres"]);
    }
}
