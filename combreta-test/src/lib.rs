//! Test utilities for the Combreta workspace
//!
//! Common helpers shared by the crates' integration tests:
//!
//! - **Test Environment**: temporary pipeline directories with automatic cleanup
//! - **Fixtures**: deterministic FASTA content for curation and conversion tests
//! - **Assertions**: FASTA-shaped checks on produced files

pub mod assertions;
pub mod environment;
pub mod fixtures;

// Re-export commonly used items
pub use assertions::{assert_line_width, assert_valid_fasta, count_records};
pub use environment::TestEnvironment;
pub use fixtures::{ambiguous_dna, fasta_document, random_dna, TestSequence};
