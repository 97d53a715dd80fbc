//! Filesystem module.
//!
//! Provides:
//! - Owner-scoped path layout
//! - File and directory name checks

pub mod naming;
pub mod paths;

pub use naming::{sanitize_filename, sanitize_owner_id};
pub use paths::{owner_dir, target_path};
