//! Console output: status lines, section headers, trees and tables

use colored::*;
use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, ContentArrangement, Table};
use std::fmt::Display;

/// Labelled node of a box-drawn tree, e.g. species and their missing markers
#[derive(Debug, Clone)]
pub struct TreeNode {
    pub label: String,
    pub children: Vec<TreeNode>,
}

impl TreeNode {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            children: Vec::new(),
        }
    }

    pub fn add_child(mut self, child: TreeNode) -> Self {
        self.children.push(child);
        self
    }

    /// Root label on the first line, descendants indented beneath it
    pub fn render(&self) -> String {
        let mut out = format!("{}\n", self.label);
        self.render_children("", &mut out);
        out
    }

    fn render_children(&self, indent: &str, out: &mut String) {
        let count = self.children.len();
        for (i, child) in self.children.iter().enumerate() {
            let (branch, carry) = if i + 1 == count {
                ("└─ ", "   ")
            } else {
                ("├─ ", "│  ")
            };
            out.push_str(indent);
            out.push_str(branch);
            out.push_str(&child.label);
            out.push('\n');
            child.render_children(&format!("{}{}", indent, carry), out);
        }
    }
}

/// Group digits in threes: `12345` becomes `12,345`
pub fn format_number<T: Display>(n: T) -> String {
    let text = n.to_string();
    let (sign, digits) = match text.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", text.as_str()),
    };

    let lead = digits.len() % 3;
    let mut groups: Vec<&str> = Vec::new();
    if lead > 0 {
        groups.push(&digits[..lead]);
    }
    groups.extend(
        (lead..digits.len())
            .step_by(3)
            .map(|start| &digits[start..start + 3]),
    );
    format!("{}{}", sign, groups.join(","))
}

/// Display a section header
pub fn section_header(title: &str) {
    println!("\n{}", title.bold().cyan());
    println!("{}", "─".repeat(title.chars().count()).dimmed());
}

pub fn warning(msg: &str) {
    eprintln!("{} {}", "⚠".yellow(), msg.yellow());
}

pub fn info(msg: &str) {
    eprintln!("{} {}", "ℹ".blue(), msg);
}

pub fn success(msg: &str) {
    eprintln!("{} {}", "✓".green(), msg.green());
}

pub fn error(msg: &str) {
    eprintln!("{} {}", "✗".red(), msg.red());
}

/// Print a titled block of `key: value` lines as one tree branch
pub fn tree_section(title: &str, items: Vec<(&str, String)>, last: bool) {
    let (branch, indent) = if last { ("└─", "   ") } else { ("├─", "│  ") };
    println!("{} {}", branch, title.bold());
    let count = items.len();
    for (i, (key, value)) in items.into_iter().enumerate() {
        let leaf = if i + 1 == count { "└─" } else { "├─" };
        println!("{}  {} {}: {}", indent, leaf, key, value);
    }
}

/// Rounded UTF-8 table that wraps to the terminal width
pub fn create_standard_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

/// Bold, centred column header
pub fn header_cell(text: &str) -> Cell {
    Cell::new(text)
        .set_alignment(CellAlignment::Center)
        .add_attribute(Attribute::Bold)
}
