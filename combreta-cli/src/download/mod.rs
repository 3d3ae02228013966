pub mod entrez;

pub use entrez::{EntrezClient, NucleotideDatabase, SearchHits};
