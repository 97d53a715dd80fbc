//! Console output utilities.

use console::style;

use crate::api::types::MediaNode;

/// Print an info message.
pub fn print_info(message: &str) {
    println!("{} {}", style("INFO").cyan().bold(), message);
}

/// Print a warning message.
pub fn print_warning(message: &str) {
    println!("{} {}", style("WARN").yellow().bold(), message);
}

/// Print an error message.
pub fn print_error(message: &str) {
    eprintln!("{} {}", style("ERROR").red().bold(), message);
}

/// Print the application banner.
pub fn print_banner() {
    let banner = r#"
╔═══════════════════════════════════════════════════════╗
║     Insta Downloader                                  ║
║     Profile feeds and single posts to disk            ║
╚═══════════════════════════════════════════════════════╝
"#;
    println!("{}", style(banner).cyan());
}

/// Print configuration summary.
pub fn print_config_summary(
    usernames: &[String],
    download_mode: &str,
    continuation: &str,
    download_dir: &str,
) {
    println!();
    println!("{}", style("Configuration:").bold());
    if !usernames.is_empty() {
        println!("  Users: {}", usernames.join(", "));
    }
    println!("  Mode: {}", download_mode);
    println!("  Continuation: {}", continuation);
    println!("  Directory: {}", download_dir);
    println!();
}

/// One-line summary of a feed item.
pub fn format_node(node: &MediaNode) -> String {
    let kind = if node.is_video { "video" } else { "image" };
    let taken = node
        .taken_at()
        .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| "-".to_string());
    let caption = node.caption();
    let caption = caption.lines().next().unwrap_or("");

    format!(
        "{} [{}] {} {} likes, {} comments {}",
        node.shortcode,
        kind,
        taken,
        node.like_count(),
        node.comment_count(),
        caption
    )
    .trim_end()
    .to_string()
}

/// Print a feed item instead of downloading it.
pub fn print_node(node: &MediaNode) {
    println!("  {}", style(format_node(node)).dim());
    if !node.display_url.is_empty() {
        println!("    {}", node.display_url);
    }
}
