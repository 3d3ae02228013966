//! Custom assertions for FASTA output

/// Assert that content is well-formed nucleotide FASTA
pub fn assert_valid_fasta(content: &str) {
    let lines: Vec<&str> = content.lines().collect();
    assert!(!lines.is_empty(), "FASTA content is empty");

    let mut has_header = false;
    let mut has_sequence = false;

    for line in lines {
        if let Some(header) = line.strip_prefix('>') {
            assert!(!header.trim().is_empty(), "Empty FASTA header found");
            has_header = true;
        } else if !line.is_empty() {
            assert!(
                line.chars()
                    .all(|c| "ACGTUNRYKMSWBDHV-?".contains(c.to_ascii_uppercase())),
                "Invalid sequence character found: {}",
                line
            );
            has_sequence = true;
        }
    }

    assert!(has_header, "No FASTA headers found");
    assert!(has_sequence, "No sequences found");
}

/// Assert no sequence line is longer than `width`
pub fn assert_line_width(content: &str, width: usize) {
    for line in content.lines().filter(|l| !l.starts_with('>')) {
        assert!(
            line.len() <= width,
            "Sequence line of {} chars exceeds width {}",
            line.len(),
            width
        );
    }
}

/// Number of records ('>' lines) in FASTA content
pub fn count_records(content: &str) -> usize {
    content.lines().filter(|l| l.starts_with('>')).count()
}
