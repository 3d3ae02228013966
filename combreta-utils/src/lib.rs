//! Shared console utilities for Combreta
//!
//! Status messages, tables, coverage bars and progress indicators used by
//! the pipeline stages.

pub mod display;

// Re-export commonly used types
pub use display::{
    coverage_bar, create_progress_bar, create_standard_table, error,
    format_duration, format_number, format_percent, header_cell, info, section_header, success,
    tree_section, warning, TreeNode,
};
