//! CLI output formatting for the collage pipeline.
//!
//! Output is information-centric: entries lead with their positional index,
//! quantity, and card code; filesystem detail is shown as indented `Source:`
//! context lines. Soft-failure warnings are rendered in a trailing section
//! so a partial collage is never silent about what it dropped.
//!
//! # Output Format
//!
//! ## Check
//!
//! ```text
//! Deck
//! 001 4x OP01-001
//!     Source: OP01/OP01-001.png
//! 002 2x ST01-012
//!     Source: ST01/ST01-012.jpg
//! 003 1x OP05-119
//!     Source: missing (no OP05-119.png or .jpg under OP05/)
//!
//! 3 entries, 7 copies, 1 unresolved
//! ```
//!
//! ## Build
//!
//! ```text
//! Collage: 23 tiles (3 rows x 10 columns, 4800x2013 px)
//! Output: decks/lunch_deck.png
//!
//! Warnings
//!     Image not found for OP05-119: no .png or .jpg at .../OP05/OP05-119
//! ```
//!
//! # Architecture
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure, with no I/O and no side effects.

use crate::compose;
use crate::config::GridLayout;
use crate::pipeline::{BuildOutcome, CheckReport};

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

// ============================================================================
// Check output
// ============================================================================

/// Format the deck inventory with per-entry asset resolution.
pub fn format_check_output(report: &CheckReport) -> Vec<String> {
    let mut lines = Vec::new();
    lines.push("Deck".to_string());

    for (i, entry) in report.deck.entries.iter().enumerate() {
        lines.push(format!(
            "{} {}x {}",
            format_index(i + 1),
            entry.quantity,
            entry.full_code
        ));
        match report.resolutions.get(i).and_then(|r| r.as_ref()) {
            Some(asset) => {
                let file = asset
                    .path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_default();
                lines.push(format!("    Source: {}/{}", entry.set_code, file));
            }
            None => {
                lines.push(format!(
                    "    Source: missing (no {code}.png or .jpg under {set}/)",
                    code = entry.full_code,
                    set = entry.set_code
                ));
            }
        }
    }

    let unresolved = report.resolutions.iter().filter(|r| r.is_none()).count();
    lines.push(String::new());
    let mut summary = format!(
        "{} entries, {} copies",
        report.deck.entries.len(),
        report.deck.total_copies()
    );
    if unresolved > 0 {
        summary.push_str(&format!(", {unresolved} unresolved"));
    }
    lines.push(summary);

    lines
}

/// Print check output to stdout.
pub fn print_check_output(report: &CheckReport) {
    for line in format_check_output(report) {
        println!("{}", line);
    }
}

// ============================================================================
// Build output
// ============================================================================

/// Format the build outcome: grid shape, output path, and warnings.
pub fn format_build_summary(outcome: &BuildOutcome, layout: &GridLayout) -> Vec<String> {
    let mut lines = Vec::new();

    match &outcome.output {
        Some(path) => {
            let (rows, width, height) = compose::grid_dimensions(outcome.tiles_staged, layout);
            lines.push(format!(
                "Collage: {} tiles ({} rows x {} columns, {}x{} px)",
                outcome.tiles_staged, rows, layout.columns, width, height
            ));
            lines.push(format!("Output: {}", path.display()));
        }
        None => {
            lines.push("No card images staged - nothing to compose".to_string());
        }
    }

    if !outcome.warnings.is_empty() {
        lines.push(String::new());
        lines.push("Warnings".to_string());
        for warning in &outcome.warnings {
            lines.push(format!("    {warning}"));
        }
    }

    lines
}

/// Print build output to stdout.
pub fn print_build_summary(outcome: &BuildOutcome, layout: &GridLayout) {
    for line in format_build_summary(outcome, layout) {
        println!("{}", line);
    }
}
