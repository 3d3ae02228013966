//! Domain types shared across all Combreta crates
pub mod catalog;
pub mod marker;
pub mod taxon;

pub use catalog::Catalog;
pub use marker::{LengthBounds, Marker, MarkerKind};
pub use taxon::{FunctionalGroup, Species};
