pub mod paths;

// Re-export commonly used functions
pub use paths::{
    consolidated_file_name, generate_timestamp, list_fasta_files, pair_file_name,
    sanitize_name, split_pair_stem,
};
