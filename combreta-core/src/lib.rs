//! Core utilities and types shared across all Combreta crates

pub mod config;
pub mod error;
pub mod system;
pub mod types;

// Re-export commonly used types
pub use config::{load_config, save_config, Config};
pub use error::{CombretaError, CombretaResult};

pub use types::{Catalog, FunctionalGroup, LengthBounds, Marker, MarkerKind, Species};

pub use system::{
    consolidated_file_name, generate_timestamp, list_fasta_files, pair_file_name,
    sanitize_name, split_pair_stem,
};

/// Version information for the Combreta project
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
