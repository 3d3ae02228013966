//! Aligned matrices: ordered taxa with sequences of one common length

use crate::formats::{fasta, nexus};
use crate::sequence::Sequence;
use combreta_core::{CombretaError, CombretaResult};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlignedTaxon {
    pub name: String,
    pub sequence: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alignment {
    taxa: Vec<AlignedTaxon>,
}

impl Alignment {
    /// Build from (name, sequence) pairs, requiring at least one taxon and a
    /// uniform sequence length
    pub fn new(taxa: Vec<AlignedTaxon>) -> CombretaResult<Self> {
        let first = taxa.first().ok_or_else(|| {
            CombretaError::InvalidInput("alignment contains no sequences".to_string())
        })?;
        let expected = first.sequence.len();

        if let Some(bad) = taxa.iter().find(|t| t.sequence.len() != expected) {
            return Err(CombretaError::InvalidInput(format!(
                "sequences are not aligned: '{}' has {} characters, '{}' has {}",
                first.name,
                expected,
                bad.name,
                bad.sequence.len()
            )));
        }

        Ok(Self { taxa })
    }

    /// Taxon names are the FASTA ids (first header token)
    pub fn from_sequences(sequences: Vec<Sequence>) -> CombretaResult<Self> {
        let taxa = sequences
            .into_iter()
            .map(|s| AlignedTaxon {
                sequence: s.as_str().into_owned(),
                name: s.id,
            })
            .collect();
        Self::new(taxa)
    }

    pub fn n_taxa(&self) -> usize {
        self.taxa.len()
    }

    /// Number of aligned characters per taxon
    pub fn n_chars(&self) -> usize {
        self.taxa.first().map(|t| t.sequence.len()).unwrap_or(0)
    }

    pub fn taxa(&self) -> &[AlignedTaxon] {
        &self.taxa
    }

    pub fn contains(&self, name: &str) -> bool {
        self.taxa.iter().any(|t| t.name == name)
    }
}

/// Read an alignment from FASTA or NEXUS, detected by a leading `#NEXUS`.
/// Residues keep the case they were written in.
pub fn read_alignment<P: AsRef<Path>>(path: P) -> CombretaResult<Alignment> {
    let path = path.as_ref();
    let bytes = std::fs::read(path)?;
    let text = String::from_utf8_lossy(&bytes);

    if nexus::is_nexus(&text) {
        tracing::debug!("Reading {} as NEXUS", path.display());
        nexus::parse_nexus(&text)
    } else {
        tracing::debug!("Reading {} as FASTA", path.display());
        Alignment::from_sequences(fasta::parse_fasta_str_with_case(
            &text,
            fasta::ResidueCase::Preserve,
        )?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn taxon(name: &str, seq: &str) -> AlignedTaxon {
        AlignedTaxon {
            name: name.to_string(),
            sequence: seq.to_string(),
        }
    }

    #[test]
    fn test_uniform_alignment() {
        let aln = Alignment::new(vec![taxon("a", "AC-T"), taxon("b", "ACGT")]).unwrap();
        assert_eq!(aln.n_taxa(), 2);
        assert_eq!(aln.n_chars(), 4);
        assert!(aln.contains("b"));
    }

    #[test]
    fn test_ragged_alignment_rejected() {
        let err = Alignment::new(vec![taxon("a", "ACGT"), taxon("b", "ACG")]).unwrap_err();
        assert!(matches!(err, CombretaError::InvalidInput(_)));
        assert!(err.to_string().contains("'b' has 3"));
    }

    #[test]
    fn test_empty_alignment_rejected() {
        assert!(Alignment::new(Vec::new()).is_err());
    }

    #[test]
    fn test_from_sequences_uses_ids() {
        let seqs = vec![
            Sequence::new("Trapa_natans".to_string(), b"ACGT".to_vec())
                .with_description("extra words".to_string()),
            Sequence::new("Punica_granatum".to_string(), b"AC-T".to_vec()),
        ];
        let aln = Alignment::from_sequences(seqs).unwrap();
        assert_eq!(aln.taxa()[0].name, "Trapa_natans");
        assert_eq!(aln.taxa()[1].sequence, "AC-T");
    }
}
