//! Display and formatting utilities

pub mod format;
pub mod output;
pub mod progress;

// Re-export commonly used types
pub use format::{coverage_bar, format_duration, format_percent};
pub use output::{
    create_standard_table, error, format_number, header_cell, info, section_header, success,
    tree_section, warning, TreeNode,
};
pub use progress::create_progress_bar;
