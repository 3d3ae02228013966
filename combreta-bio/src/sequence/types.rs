use serde::{Deserialize, Serialize};
use std::borrow::Cow;

/// IUPAC codes that stand for more than one nucleotide
pub const AMBIGUOUS_BASES: &[u8] = b"NYRSWKMBDHV";

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Sequence {
    /// First whitespace-delimited token of the header
    pub id: String,
    /// Remainder of the header, if any
    pub description: Option<String>,
    /// Residues with whitespace removed, uppercased unless parsed with `ResidueCase::Preserve`
    pub sequence: Vec<u8>,
}

impl Sequence {
    pub fn new(id: String, sequence: Vec<u8>) -> Self {
        Self {
            id,
            description: None,
            sequence,
        }
    }

    pub fn with_description(mut self, description: String) -> Self {
        self.description = Some(description);
        self
    }

    pub fn len(&self) -> usize {
        self.sequence.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }

    /// Header text without the leading '>'
    pub fn title(&self) -> String {
        match &self.description {
            Some(desc) if !desc.is_empty() => format!("{} {}", self.id, desc),
            _ => self.id.clone(),
        }
    }

    pub fn header(&self) -> String {
        format!(">{}", self.title())
    }

    pub fn as_str(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.sequence)
    }

    pub fn ambiguous_count(&self) -> usize {
        self.sequence
            .iter()
            .filter(|b| AMBIGUOUS_BASES.contains(&b.to_ascii_uppercase()))
            .count()
    }

    /// Fraction of ambiguous bases; an empty sequence counts as fully ambiguous
    pub fn ambiguous_fraction(&self) -> f64 {
        if self.sequence.is_empty() {
            return 1.0;
        }
        self.ambiguous_count() as f64 / self.sequence.len() as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_and_header() {
        let seq = Sequence::new("MN123456.1".to_string(), b"ACGT".to_vec())
            .with_description("Terminalia catappa maturase K (matK) gene, partial cds".to_string());
        assert_eq!(
            seq.header(),
            ">MN123456.1 Terminalia catappa maturase K (matK) gene, partial cds"
        );

        let bare = Sequence::new("Trapa_natans".to_string(), b"ACGT".to_vec());
        assert_eq!(bare.title(), "Trapa_natans");
        assert_eq!(bare.header(), ">Trapa_natans");
    }

    #[test]
    fn test_ambiguous_fraction() {
        let seq = Sequence::new("s".to_string(), b"ACGTNNYRAC".to_vec());
        assert_eq!(seq.ambiguous_count(), 4);
        assert!((seq.ambiguous_fraction() - 0.4).abs() < 1e-12);

        let clean = Sequence::new("c".to_string(), b"ACGTACGT".to_vec());
        assert_eq!(clean.ambiguous_fraction(), 0.0);

        // Gaps are not ambiguity codes
        let gapped = Sequence::new("g".to_string(), b"AC--GT".to_vec());
        assert_eq!(gapped.ambiguous_count(), 0);
    }

    #[test]
    fn test_empty_sequence_is_fully_ambiguous() {
        let empty = Sequence::new("e".to_string(), Vec::new());
        assert!(empty.is_empty());
        assert_eq!(empty.ambiguous_fraction(), 1.0);
    }
}
