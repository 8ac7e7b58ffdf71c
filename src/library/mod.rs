//! Playlist container: models, loading and traversal

pub mod error;
pub mod models;
pub mod source;
pub mod tree;
pub mod walker;

pub use error::Diagnostic;
pub use models::*;
pub use source::load_container;
pub use tree::{LibraryNode, LibraryTree};
pub use walker::ContainerWalker;
