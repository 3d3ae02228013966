use crate::sequence::Sequence;
use combreta_core::{CombretaError, CombretaResult};
use nom::{
    bytes::complete::take_till,
    character::complete::{char, space0, space1},
    combinator::{opt, rest},
    sequence::preceded,
    IResult,
};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Parse a FASTA header line into (id, description)
fn parse_header(input: &str) -> IResult<&str, (&str, Option<&str>)> {
    let (input, _) = char('>')(input)?;
    let (input, _) = space0(input)?;
    let (input, id) = take_till(|c: char| c.is_whitespace())(input)?;
    let (input, description) = opt(preceded(space1, rest))(input)?;
    Ok((input, (id, description)))
}

fn finish_record(id: String, description: Option<String>, residues: Vec<u8>) -> Sequence {
    let seq = Sequence::new(id, residues);
    match description {
        Some(desc) => seq.with_description(desc),
        None => seq,
    }
}

/// How residue letters are stored when parsing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResidueCase {
    /// Uppercase everything (curation compares against uppercase IUPAC codes)
    Upper,
    /// Keep residues as written (alignments, where MAFFT emits lowercase)
    Preserve,
}

/// Parse FASTA text, uppercasing residues.
///
/// Blank lines are skipped, all whitespace is removed from residues, and
/// lines before the first header are ignored. Records with an empty sequence
/// are kept; filtering is up to the caller.
pub fn parse_fasta_str(text: &str) -> CombretaResult<Vec<Sequence>> {
    parse_fasta_str_with_case(text, ResidueCase::Upper)
}

pub fn parse_fasta_str_with_case(text: &str, case: ResidueCase) -> CombretaResult<Vec<Sequence>> {
    let mut sequences = Vec::new();
    let mut current: Option<(String, Option<String>)> = None;
    let mut residues: Vec<u8> = Vec::new();
    let mut orphan_lines = 0usize;

    for (line_no, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }

        if line.starts_with('>') {
            if let Some((id, desc)) = current.take() {
                sequences.push(finish_record(id, desc, std::mem::take(&mut residues)));
            }

            let (_, (id, description)) = parse_header(line).map_err(|e| {
                CombretaError::Parse(format!("line {}: invalid FASTA header: {}", line_no + 1, e))
            })?;
            let description = description
                .map(|d| d.trim().to_string())
                .filter(|d| !d.is_empty());
            current = Some((id.to_string(), description));
        } else if current.is_some() {
            let bytes = line.bytes().filter(|b| !b.is_ascii_whitespace());
            match case {
                ResidueCase::Upper => residues.extend(bytes.map(|b| b.to_ascii_uppercase())),
                ResidueCase::Preserve => residues.extend(bytes),
            }
        } else {
            orphan_lines += 1;
        }
    }

    if let Some((id, desc)) = current {
        sequences.push(finish_record(id, desc, residues));
    }

    if orphan_lines > 0 {
        tracing::debug!("Ignored {} lines before the first FASTA header", orphan_lines);
    }

    Ok(sequences)
}

/// Parse a FASTA file; invalid UTF-8 is replaced rather than rejected
pub fn parse_fasta<P: AsRef<Path>>(path: P) -> CombretaResult<Vec<Sequence>> {
    parse_fasta_with_case(path, ResidueCase::Upper)
}

pub fn parse_fasta_with_case<P: AsRef<Path>>(
    path: P,
    case: ResidueCase,
) -> CombretaResult<Vec<Sequence>> {
    let bytes = std::fs::read(path.as_ref())?;
    parse_fasta_str_with_case(&String::from_utf8_lossy(&bytes), case)
}

/// Render one record, wrapping residues at `line_width` columns (0 = single line)
pub fn format_fasta_record(sequence: &Sequence, line_width: usize) -> String {
    let mut out = String::with_capacity(sequence.len() + sequence.len() / 60 + 64);
    out.push_str(&sequence.header());
    out.push('\n');

    if line_width == 0 {
        out.push_str(&sequence.as_str());
        out.push('\n');
    } else {
        for chunk in sequence.sequence.chunks(line_width) {
            out.push_str(&String::from_utf8_lossy(chunk));
            out.push('\n');
        }
    }
    out
}

pub fn write_fasta_to_writer<W: Write>(
    writer: &mut W,
    sequences: &[Sequence],
    line_width: usize,
) -> std::io::Result<()> {
    for seq in sequences {
        writer.write_all(format_fasta_record(seq, line_width).as_bytes())?;
    }
    Ok(())
}

/// Write sequences to a FASTA file
pub fn write_fasta<P: AsRef<Path>>(
    path: P,
    sequences: &[Sequence],
    line_width: usize,
) -> CombretaResult<()> {
    let file = File::create(path.as_ref())?;
    let mut writer = BufWriter::new(file);
    write_fasta_to_writer(&mut writer, sequences, line_width)?;
    writer.flush()?;
    Ok(())
}

/// Number of records in FASTA text, counted as '>' characters
pub fn count_headers(text: &str) -> usize {
    text.matches('>').count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_header() {
        let (_, (id, desc)) = parse_header(">AB123.1 Laguncularia racemosa ITS").unwrap();
        assert_eq!(id, "AB123.1");
        assert_eq!(desc, Some("Laguncularia racemosa ITS"));

        let (_, (id, desc)) = parse_header(">Trapa_natans").unwrap();
        assert_eq!(id, "Trapa_natans");
        assert_eq!(desc, None);

        let (_, (id, _)) = parse_header(">  padded id").unwrap();
        assert_eq!(id, "padded");
    }

    #[test]
    fn test_parse_multiline_records() {
        let text = ">seq1 first record\nacgt\nAC GT\n\n>seq2\nNNNN\n";
        let seqs = parse_fasta_str(text).unwrap();

        assert_eq!(seqs.len(), 2);
        assert_eq!(seqs[0].id, "seq1");
        assert_eq!(seqs[0].description.as_deref(), Some("first record"));
        assert_eq!(seqs[0].sequence, b"ACGTACGT".to_vec());
        assert_eq!(seqs[1].sequence, b"NNNN".to_vec());
        assert!(seqs[1].description.is_none());
    }

    #[test]
    fn test_parse_handles_crlf_and_leading_junk() {
        let text = "stray line\r\n>a desc\r\nACGT\r\nTT\r\n";
        let seqs = parse_fasta_str(text).unwrap();
        assert_eq!(seqs.len(), 1);
        assert_eq!(seqs[0].sequence, b"ACGTTT".to_vec());
    }

    #[test]
    fn test_preserve_case_keeps_lowercase_residues() {
        let text = ">Laguncularia_racemosa\nacgt-n\nAC\n";
        let kept = parse_fasta_str_with_case(text, ResidueCase::Preserve).unwrap();
        assert_eq!(kept[0].sequence, b"acgt-nAC".to_vec());

        let upper = parse_fasta_str(text).unwrap();
        assert_eq!(upper[0].sequence, b"ACGT-NAC".to_vec());
    }

    #[test]
    fn test_parse_keeps_empty_records() {
        let seqs = parse_fasta_str(">a\n>b\nACGT\n").unwrap();
        assert_eq!(seqs.len(), 2);
        assert!(seqs[0].is_empty());
        assert_eq!(seqs[1].len(), 4);
    }

    #[test]
    fn test_format_wrapped() {
        let seq = Sequence::new("x".to_string(), b"ACGTACGTAC".to_vec());
        assert_eq!(format_fasta_record(&seq, 4), ">x\nACGT\nACGT\nAC\n");
        assert_eq!(format_fasta_record(&seq, 0), ">x\nACGTACGTAC\n");
        assert_eq!(format_fasta_record(&seq, 10), ">x\nACGTACGTAC\n");
    }

    #[test]
    fn test_count_headers() {
        assert_eq!(count_headers(">a\nAC\n>b\nGT\n"), 2);
        assert_eq!(count_headers(""), 0);
    }
}
