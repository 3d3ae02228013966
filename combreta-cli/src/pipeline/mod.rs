//! Pipeline stages. Each reads its inputs, writes its outputs and returns a
//! summary for the command to print.

pub mod consolidator;
pub mod curator;
pub mod fetcher;
pub mod report;

pub use consolidator::consolidate_directory;
pub use curator::curate_directory;
pub use fetcher::Fetcher;
