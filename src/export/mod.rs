//! Writing a playlist container out as XSPF files

pub mod config;
pub mod engine;
pub mod storage;

pub use config::ExportConfig;
pub use engine::ExportEngine;
pub use storage::ExportStorage;
