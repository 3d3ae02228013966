//! Species records of the sampling design
use serde::{Deserialize, Serialize};
use std::fmt;

/// Functional group a species was sampled for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum FunctionalGroup {
    /// Group A: mangroves, the focal taxa
    #[serde(rename = "A")]
    Mangrove,
    /// Group B: neotropical terrestrial Combretaceae
    #[serde(rename = "B")]
    NeotropicalTerrestrial,
    /// Group C: paleotropical terrestrial Combretaceae
    #[serde(rename = "C")]
    PaleotropicalTerrestrial,
    /// Group D: Lythraceae outgroup
    #[serde(rename = "D")]
    Outgroup,
}

impl FunctionalGroup {
    pub const ALL: [FunctionalGroup; 4] = [
        FunctionalGroup::Mangrove,
        FunctionalGroup::NeotropicalTerrestrial,
        FunctionalGroup::PaleotropicalTerrestrial,
        FunctionalGroup::Outgroup,
    ];

    /// Single-letter code used in summaries
    pub fn code(&self) -> &'static str {
        match self {
            Self::Mangrove => "A",
            Self::NeotropicalTerrestrial => "B",
            Self::PaleotropicalTerrestrial => "C",
            Self::Outgroup => "D",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Mangrove => "Mangroves",
            Self::NeotropicalTerrestrial => "Neotropical terrestrial",
            Self::PaleotropicalTerrestrial => "Paleotropical terrestrial",
            Self::Outgroup => "Outgroup Lythraceae",
        }
    }
}

impl fmt::Display for FunctionalGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Species {
    pub name: String,
    #[serde(default)]
    pub synonyms: Vec<String>,
    pub group: FunctionalGroup,
    #[serde(default)]
    pub notes: String,
}

impl Species {
    pub fn new(name: impl Into<String>, group: FunctionalGroup) -> Self {
        Self {
            name: name.into(),
            synonyms: Vec::new(),
            group,
            notes: String::new(),
        }
    }

    pub fn with_synonym(mut self, synonym: impl Into<String>) -> Self {
        self.synonyms.push(synonym.into());
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }

    /// Canonical name first, then synonyms in their listed order
    pub fn search_names(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.name.as_str()).chain(self.synonyms.iter().map(String::as_str))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_names_order() {
        let species = Species::new("Bucida buceras", FunctionalGroup::NeotropicalTerrestrial)
            .with_synonym("Terminalia buceras");

        let names: Vec<&str> = species.search_names().collect();
        assert_eq!(names, vec!["Bucida buceras", "Terminalia buceras"]);
    }

    #[test]
    fn test_group_codes() {
        let codes: Vec<&str> = FunctionalGroup::ALL.iter().map(|g| g.code()).collect();
        assert_eq!(codes, vec!["A", "B", "C", "D"]);
        assert_eq!(FunctionalGroup::Outgroup.to_string(), "D");
    }
}
