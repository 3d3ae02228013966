//! TNT `xread` matrices

use crate::alignment::{AlignedTaxon, Alignment};
use combreta_core::{CombretaError, CombretaResult};
use std::path::Path;

/// Render an alignment as a TNT DNA matrix
pub fn format_tnt(alignment: &Alignment) -> String {
    let mut out = String::new();
    out.push_str("nstates dna;\n");
    out.push_str("xread\n");
    out.push_str(&format!("{} {}\n", alignment.n_chars(), alignment.n_taxa()));
    for taxon in alignment.taxa() {
        // TNT names cannot contain whitespace
        let name: String = taxon
            .name
            .chars()
            .map(|c| if c.is_whitespace() { '_' } else { c })
            .collect();
        out.push_str(&format!("{} {}\n", name, taxon.sequence));
    }
    out.push_str(";\n");
    out.push_str("proc/;\n");
    out
}

pub fn write_tnt<P: AsRef<Path>>(path: P, alignment: &Alignment) -> CombretaResult<()> {
    std::fs::write(path, format_tnt(alignment))?;
    Ok(())
}

/// Read the first `xread` block of a TNT file
pub fn parse_tnt(text: &str) -> CombretaResult<Alignment> {
    let mut lines = text
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .skip_while(|l| !l.to_ascii_lowercase().starts_with("xread"));

    lines
        .next()
        .ok_or_else(|| CombretaError::Parse("TNT file has no xread block".to_string()))?;

    // An optional quoted title may precede the dimensions
    let mut dims_line = lines
        .next()
        .ok_or_else(|| CombretaError::Parse("xread block has no dimensions".to_string()))?;
    if dims_line.starts_with('\'') {
        dims_line = lines
            .next()
            .ok_or_else(|| CombretaError::Parse("xread block has no dimensions".to_string()))?;
    }

    let dims: Vec<usize> = dims_line
        .split_whitespace()
        .map(|d| d.parse::<usize>())
        .collect::<Result<_, _>>()
        .map_err(|_| CombretaError::Parse(format!("invalid xread dimensions: {}", dims_line)))?;
    let &[nchar, ntax] = dims.as_slice() else {
        return Err(CombretaError::Parse(format!(
            "xread dimensions must be '<nchar> <ntax>', got: {}",
            dims_line
        )));
    };

    let mut taxa = Vec::with_capacity(ntax);
    for line in lines {
        if line.starts_with(';') {
            break;
        }
        let (name, sequence) = line.split_once(char::is_whitespace).ok_or_else(|| {
            CombretaError::Parse(format!("xread row has no sequence: {}", line))
        })?;
        taxa.push(AlignedTaxon {
            name: name.to_string(),
            sequence: sequence.split_whitespace().collect(),
        });
    }

    if taxa.len() != ntax {
        return Err(CombretaError::Parse(format!(
            "xread declares {} taxa but lists {}",
            ntax,
            taxa.len()
        )));
    }

    let alignment = Alignment::new(taxa)?;
    if alignment.n_chars() != nchar {
        return Err(CombretaError::Parse(format!(
            "xread declares {} characters but sequences have {}",
            nchar,
            alignment.n_chars()
        )));
    }
    Ok(alignment)
}
