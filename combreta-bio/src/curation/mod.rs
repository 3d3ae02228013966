//! Candidate filtering and scoring for one (species, marker) pair
//!
//! Records are first filtered by ambiguous-base fraction, then scored
//! against the marker's length window and header keywords. The best
//! positive score wins; ties keep the earliest record.

use crate::sequence::Sequence;
use combreta_core::LengthBounds;

/// Header phrases of whole-genome or assembly submissions
pub const EXCLUDE_KEYWORDS: &[&str] = &[
    "complete genome",
    "whole genome",
    "scaffold",
    "chloroplast genome",
];

/// Header phrases of targeted single-locus submissions
pub const PREFER_KEYWORDS: &[&str] = &["gene", "spacer", "internal transcribed spacer", "partial"];

/// Excluded records longer than this are genomes, not loci
pub const GENOME_LENGTH_THRESHOLD: usize = 5000;
pub const GENOME_SCORE: i64 = -10_000;
pub const EXCLUDE_PENALTY: i64 = 500;
pub const TOO_SHORT_SCORE: i64 = -5_000;
pub const TOO_LONG_SCORE: i64 = -3_000;
/// Length score is this minus the distance to the optimal length
pub const LENGTH_SCORE_CEILING: i64 = 1_000;
pub const PREFER_BONUS: i64 = 200;
pub const NEAR_OPTIMAL_BONUS: i64 = 300;
pub const NEAR_OPTIMAL_DISTANCE: usize = 50;

pub const DEFAULT_MAX_AMBIGUOUS_FRACTION: f64 = 0.20;

/// Score a record for a marker. Out-of-window lengths and genome-scale
/// excluded records return their fixed negative score immediately.
pub fn score_sequence(sequence: &Sequence, bounds: &LengthBounds) -> i64 {
    let header = sequence.title().to_lowercase();
    let length = sequence.len();
    let mut score = 0i64;

    if EXCLUDE_KEYWORDS.iter().any(|k| header.contains(k)) {
        if length > GENOME_LENGTH_THRESHOLD {
            return GENOME_SCORE;
        }
        score -= EXCLUDE_PENALTY;
    }

    if length < bounds.min {
        return TOO_SHORT_SCORE;
    }
    if length > bounds.max {
        return TOO_LONG_SCORE;
    }

    let distance = bounds.distance_to_optimal(length);
    score += (LENGTH_SCORE_CEILING - distance as i64).max(0);

    if PREFER_KEYWORDS.iter().any(|k| header.contains(k)) {
        score += PREFER_BONUS;
    }
    if distance <= NEAR_OPTIMAL_DISTANCE {
        score += NEAR_OPTIMAL_BONUS;
    }

    score
}

/// The winning record of a pair
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    pub sequence: Sequence,
    pub score: i64,
    /// Records that passed the ambiguity filter
    pub candidates: usize,
    /// Records removed by the ambiguity filter
    pub filtered: usize,
}

impl Selection {
    /// The curated record: header is the species name alone
    pub fn into_record(self, species: &str) -> Sequence {
        Sequence::new(species.to_string(), self.sequence.sequence)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum CurationOutcome {
    Selected(Selection),
    /// Every record was empty or too ambiguous
    NoValidSequences { total: usize },
    /// Candidates existed but none scored above zero
    AllDisqualified { candidates: usize },
}

#[derive(Debug, Clone, Copy)]
pub struct Curator {
    max_ambiguous_fraction: f64,
}

impl Default for Curator {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_AMBIGUOUS_FRACTION)
    }
}

impl Curator {
    pub fn new(max_ambiguous_fraction: f64) -> Self {
        Self {
            max_ambiguous_fraction,
        }
    }

    /// Records whose ambiguous fraction is within the threshold (inclusive)
    pub fn passes_filter(&self, sequence: &Sequence) -> bool {
        sequence.ambiguous_fraction() <= self.max_ambiguous_fraction
    }

    pub fn select(&self, sequences: Vec<Sequence>, bounds: &LengthBounds) -> CurationOutcome {
        let total = sequences.len();
        let candidates: Vec<Sequence> = sequences
            .into_iter()
            .filter(|s| self.passes_filter(s))
            .collect();
        let filtered = total - candidates.len();

        if candidates.is_empty() {
            return CurationOutcome::NoValidSequences { total };
        }

        let n_candidates = candidates.len();
        let mut best: Option<(Sequence, i64)> = None;
        for seq in candidates {
            let score = score_sequence(&seq, bounds);
            tracing::trace!("{} scored {}", seq.id, score);
            if score <= 0 {
                continue;
            }
            // Strictly greater keeps the first of equal scores
            if best.as_ref().map_or(true, |(_, s)| score > *s) {
                best = Some((seq, score));
            }
        }

        match best {
            Some((sequence, score)) => CurationOutcome::Selected(Selection {
                sequence,
                score,
                candidates: n_candidates,
                filtered,
            }),
            None => CurationOutcome::AllDisqualified {
                candidates: n_candidates,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ITS: LengthBounds = LengthBounds::new(300, 1000, 650);

    fn record(desc: &str, len: usize) -> Sequence {
        Sequence::new("X1.1".to_string(), vec![b'A'; len]).with_description(desc.to_string())
    }

    #[test]
    fn test_score_optimal_with_keyword() {
        // 1000 + 200 + 300
        assert_eq!(score_sequence(&record("ITS1 gene", 650), &ITS), 1500);
        assert_eq!(score_sequence(&record("clone", 650), &ITS), 1300);
        assert_eq!(score_sequence(&record("clone", 700), &ITS), 1250);
        assert_eq!(score_sequence(&record("clone", 701), &ITS), 949);
    }

    #[test]
    fn test_score_length_window() {
        assert_eq!(score_sequence(&record("gene", 299), &ITS), TOO_SHORT_SCORE);
        assert_eq!(score_sequence(&record("gene", 1001), &ITS), TOO_LONG_SCORE);
        assert_eq!(score_sequence(&record("gene", 300), &ITS), 1000 - 350 + 200);
    }

    #[test]
    fn test_score_excluded_headers() {
        let genome = record("chloroplast, complete genome", 160_000);
        assert_eq!(score_sequence(&genome, &ITS), GENOME_SCORE);

        let short_scaffold = record("Scaffold 12", 650);
        assert_eq!(score_sequence(&short_scaffold, &ITS), -500 + 1000 + 300);
    }

    #[test]
    fn test_header_includes_id() {
        let seq = Sequence::new("gene_clone".to_string(), vec![b'A'; 650]);
        assert_eq!(score_sequence(&seq, &ITS), 1500);
    }

    #[test]
    fn test_ambiguity_threshold_inclusive() {
        let curator = Curator::default();
        let mut seq = vec![b'A'; 80];
        seq.extend(vec![b'N'; 20]);
        assert!(curator.passes_filter(&Sequence::new("a".into(), seq.clone())));
        seq.push(b'N');
        assert!(!curator.passes_filter(&Sequence::new("a".into(), seq)));
        assert!(!curator.passes_filter(&Sequence::new("a".into(), Vec::new())));
    }

    #[test]
    fn test_select_ties_keep_first() {
        let a = Sequence::new("first".into(), vec![b'A'; 650]);
        let b = Sequence::new("second".into(), vec![b'C'; 650]);
        match Curator::default().select(vec![a, b], &ITS) {
            CurationOutcome::Selected(sel) => {
                assert_eq!(sel.sequence.id, "first");
                assert_eq!(sel.candidates, 2);
            }
            other => panic!("unexpected outcome: {:?}", other),
        }
    }

    #[test]
    fn test_select_outcomes_without_winner() {
        let curator = Curator::default();
        let noisy = Sequence::new("n".into(), vec![b'N'; 650]);
        assert_eq!(
            curator.select(vec![noisy], &ITS),
            CurationOutcome::NoValidSequences { total: 1 }
        );

        let short = Sequence::new("s".into(), vec![b'A'; 100]);
        assert_eq!(
            curator.select(vec![short], &ITS),
            CurationOutcome::AllDisqualified { candidates: 1 }
        );

        assert_eq!(
            curator.select(Vec::new(), &ITS),
            CurationOutcome::NoValidSequences { total: 0 }
        );
    }

    #[test]
    fn test_into_record_renames() {
        let sel = Selection {
            sequence: record("ITS gene", 10),
            score: 1,
            candidates: 1,
            filtered: 0,
        };
        let rec = sel.into_record("Terminalia_catappa");
        assert_eq!(rec.header(), ">Terminalia_catappa");
        assert_eq!(rec.len(), 10);
    }
}
