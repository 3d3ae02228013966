pub mod stats;
pub mod types;

// Re-export commonly used types
pub use stats::LengthStats;
pub use types::{Sequence, AMBIGUOUS_BASES};
