//! XSPF (XML Shareable Playlist Format) output

mod document;
mod generate;

pub use document::{Element, XspfDocument};
pub use generate::{XSPF_VERSION, generate_xspf};
