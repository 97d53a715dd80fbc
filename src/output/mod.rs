//! Output module for console output and progress.
//!
//! Provides:
//! - Colored console output and feed listings
//! - Progress bars
//! - Statistics reporting

pub mod console;
pub mod progress;
pub mod stats;

pub use console::{
    format_node, print_banner, print_config_summary, print_error, print_info, print_node,
    print_warning,
};
pub use progress::{create_download_bar, create_spinner};
pub use stats::{print_global_stats, print_user_stats};
