//! Statistics reporting.

use console::style;

use crate::download::{DownloadState, GlobalState};

/// Print statistics for a single profile.
pub fn print_user_stats(state: &DownloadState) {
    println!();
    println!(
        "{}",
        style(format!("Statistics for {}:", state.username)).bold()
    );
    if let Some(user_id) = &state.user_id {
        println!("  User id:  {}", user_id);
    }
    println!("  Pages:    {}", state.pages_fetched);
    println!("  Items:    {}", state.items_seen);
    println!("  Pictures: {}", state.pic_count);
    println!("  Videos:   {}", state.vid_count);
    if state.failed_count > 0 {
        println!("  Failed:   {}", style(state.failed_count).red());
    }
    println!("  Total:    {} downloaded", state.total_downloaded());
}

/// Print global statistics across all profiles.
pub fn print_global_stats(state: &GlobalState) {
    println!();
    println!("{}", style("═".repeat(50)).dim());
    println!("{}", style("Global Statistics:").bold());
    println!("  Users processed: {}", state.users_processed);
    if state.users_failed > 0 {
        println!("  Users failed:    {}", style(state.users_failed).red());
    }
    println!("  Items:    {}", state.items_seen);
    println!("  Pictures: {}", state.pic_count);
    println!("  Videos:   {}", state.vid_count);
    if state.failed_count > 0 {
        println!("  Failed:   {}", style(state.failed_count).red());
    }
    println!("  Total:    {} downloaded", state.total_downloaded());
    println!("{}", style("═".repeat(50)).dim());
}
