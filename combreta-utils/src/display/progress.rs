//! Progress bars for long download loops

use indicatif::{ProgressBar, ProgressStyle};

/// Bar with a leading message, position counter and ETA
pub fn create_progress_bar(total: u64, message: &str) -> ProgressBar {
    let pb = ProgressBar::new(total);
    let style = ProgressStyle::default_bar()
        .template("{msg} [{bar:40.cyan/blue}] {pos:>4}/{len:4} ({eta})")
        .map(|s| s.progress_chars("━━─"))
        .unwrap_or_else(|_| ProgressStyle::default_bar());
    pb.set_style(style);
    pb.set_message(message.to_string());
    pb
}
