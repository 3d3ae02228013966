//! Sequence handling for the Combreta pipeline: FASTA records, curation
//! scoring and alignment formats (NEXUS in, TNT and BEAST 2 XML out)

pub mod alignment;
pub mod curation;
pub mod formats;
pub mod sequence;

// Re-export commonly used types
pub use alignment::{read_alignment, AlignedTaxon, Alignment};
pub use curation::{score_sequence, CurationOutcome, Curator, Selection};
pub use formats::{parse_fasta, write_fasta, BeastDocument};
pub use sequence::{LengthStats, Sequence, AMBIGUOUS_BASES};
