//! Media module for download targets and post page parsing.

pub mod item;
pub mod parser;

pub use item::DownloadTarget;
pub use parser::{extract, extract_with_misses, ExtractionMiss, MetaProperty};
