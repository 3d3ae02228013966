pub mod beast;
pub mod fasta;
pub mod nexus;
pub mod tnt;

// Re-export commonly used functions
pub use beast::{BeastDocument, CalibrationTaxa};
pub use fasta::{
    format_fasta_record, parse_fasta, parse_fasta_str, parse_fasta_str_with_case,
    parse_fasta_with_case, write_fasta, ResidueCase,
};
pub use nexus::{is_nexus, parse_nexus};
pub use tnt::{format_tnt, parse_tnt, write_tnt};
