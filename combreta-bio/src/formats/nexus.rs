//! Minimal NEXUS reader for the DATA/CHARACTERS matrix
//!
//! Handles sequential matrices (rows may wrap across lines when `nchar` is
//! declared), interleaved matrices, quoted taxon names and bracketed
//! comments. Residues keep their case. Other blocks are ignored.

use crate::alignment::{AlignedTaxon, Alignment};
use combreta_core::{CombretaError, CombretaResult};
use regex::Regex;
use std::collections::HashMap;
use std::sync::OnceLock;

static MATRIX_RE: OnceLock<Regex> = OnceLock::new();
static NTAX_RE: OnceLock<Regex> = OnceLock::new();
static NCHAR_RE: OnceLock<Regex> = OnceLock::new();
static INTERLEAVE_RE: OnceLock<Regex> = OnceLock::new();

pub fn is_nexus(text: &str) -> bool {
    text.lines()
        .map(str::trim)
        .find(|l| !l.is_empty())
        .is_some_and(|l| l.to_ascii_uppercase().starts_with("#NEXUS"))
}

fn strip_comments(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut depth = 0usize;
    for c in text.chars() {
        match c {
            '[' => depth += 1,
            ']' if depth > 0 => depth -= 1,
            _ if depth == 0 => out.push(c),
            _ => {}
        }
    }
    out
}

fn declared(re: &OnceLock<Regex>, pattern: &str, text: &str) -> Option<usize> {
    let re = re.get_or_init(|| Regex::new(pattern).expect("valid regex"));
    re.captures(text)
        .and_then(|c| c.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

/// Split a matrix row into (taxon name, residues)
fn split_row(line: &str) -> CombretaResult<(String, String)> {
    let (name, rest) = if let Some(quoted) = line.strip_prefix('\'') {
        let end = quoted.find('\'').ok_or_else(|| {
            CombretaError::Parse(format!("unterminated quoted taxon name: {}", line))
        })?;
        (quoted[..end].to_string(), &quoted[end + 1..])
    } else {
        match line.split_once(char::is_whitespace) {
            Some((name, rest)) => (name.to_string(), rest),
            None => (line.to_string(), ""),
        }
    };

    Ok((name, residues_of(rest)))
}

fn residues_of(text: &str) -> String {
    text.chars().filter(|c| !c.is_whitespace()).collect()
}

/// `interleave` or `interleave=yes` in the FORMAT command
fn is_interleaved(header: &str) -> bool {
    let re = INTERLEAVE_RE.get_or_init(|| {
        Regex::new(r"(?i)\binterleave\b(?:\s*=\s*(\w+))?").expect("valid regex")
    });
    re.captures(header).is_some_and(|c| {
        c.get(1).map_or(true, |v| {
            !matches!(v.as_str().to_ascii_lowercase().as_str(), "no" | "false")
        })
    })
}

/// Parse the MATRIX command of a NEXUS document
pub fn parse_nexus(text: &str) -> CombretaResult<Alignment> {
    let text = strip_comments(text);

    let matrix_re =
        MATRIX_RE.get_or_init(|| Regex::new(r"(?i)\bmatrix\b").expect("valid regex"));
    let start = matrix_re
        .find(&text)
        .ok_or_else(|| CombretaError::Parse("NEXUS file has no MATRIX command".to_string()))?
        .end();
    let body = &text[start..];
    let end = body
        .find(';')
        .ok_or_else(|| CombretaError::Parse("NEXUS MATRIX is not terminated by ';'".to_string()))?;

    let header = &text[..start];
    let ntax = declared(&NTAX_RE, r"(?i)\bntax\s*=\s*(\d+)", header);
    let nchar = declared(&NCHAR_RE, r"(?i)\bnchar\s*=\s*(\d+)", header);
    // Sequential rows are complete once they reach nchar; shorter rows continue
    // on the next line
    let wrap_width = if is_interleaved(header) { None } else { nchar };

    let mut order: Vec<String> = Vec::new();
    let mut rows: HashMap<String, String> = HashMap::new();
    let mut open_row: Option<String> = None;

    for line in body[..end].lines().map(str::trim).filter(|l| !l.is_empty()) {
        if let (Some(width), Some(name)) = (wrap_width, open_row.as_ref()) {
            if let Some(existing) = rows.get_mut(name) {
                existing.push_str(&residues_of(line));
                if existing.len() >= width {
                    open_row = None;
                }
                continue;
            }
        }

        let (name, residues) = split_row(line)?;
        match rows.get_mut(&name) {
            // Interleaved blocks repeat the taxon name
            Some(existing) => existing.push_str(&residues),
            None => {
                order.push(name.clone());
                rows.insert(name.clone(), residues);
            }
        }
        if let Some(width) = wrap_width {
            let filled = rows.get(&name).map_or(0, String::len);
            open_row = (filled < width).then_some(name);
        }
    }

    let taxa: Vec<AlignedTaxon> = order
        .into_iter()
        .map(|name| {
            let sequence = rows.remove(&name).unwrap_or_default();
            AlignedTaxon { name, sequence }
        })
        .collect();

    if let Some(ntax) = ntax {
        if ntax != taxa.len() {
            return Err(CombretaError::Parse(format!(
                "NEXUS declares ntax={} but the matrix has {} taxa",
                ntax,
                taxa.len()
            )));
        }
    }

    let alignment = Alignment::new(taxa)?;

    if let Some(nchar) = nchar {
        if nchar != alignment.n_chars() {
            return Err(CombretaError::Parse(format!(
                "NEXUS declares nchar={} but sequences have {} characters",
                nchar,
                alignment.n_chars()
            )));
        }
    }

    Ok(alignment)
}
