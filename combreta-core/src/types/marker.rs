//! Genetic markers and their curation length windows
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarkerKind {
    Nuclear,
    PlastidConserved,
    PlastidVariable,
}

impl fmt::Display for MarkerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Nuclear => "nuclear",
            Self::PlastidConserved => "plastid_conserved",
            Self::PlastidVariable => "plastid_variable",
        };
        f.write_str(name)
    }
}

/// Acceptable and optimal lengths (bp) of a curated sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LengthBounds {
    pub min: usize,
    pub max: usize,
    pub optimal: usize,
}

impl LengthBounds {
    pub const fn new(min: usize, max: usize, optimal: usize) -> Self {
        Self { min, max, optimal }
    }

    pub fn distance_to_optimal(&self, length: usize) -> usize {
        length.abs_diff(self.optimal)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Marker {
    pub name: String,
    /// Entrez query fragments, tried in order
    pub queries: Vec<String>,
    pub kind: MarkerKind,
    #[serde(default)]
    pub reference: String,
    pub bounds: LengthBounds,
}

impl Marker {
    pub fn new(name: impl Into<String>, kind: MarkerKind, bounds: LengthBounds) -> Self {
        Self {
            name: name.into(),
            queries: Vec::new(),
            kind,
            reference: String::new(),
            bounds,
        }
    }

    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.queries.push(query.into());
        self
    }

    pub fn with_reference(mut self, reference: impl Into<String>) -> Self {
        self.reference = reference.into();
        self
    }

    /// Full search terms restricting each marker query to one organism
    pub fn organism_queries(&self, organism: &str) -> Vec<String> {
        self.queries
            .iter()
            .map(|q| format!("(\"{}\"[Organism]) AND ({})", organism, q))
            .collect()
    }
}
