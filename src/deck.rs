//! Deck list parsing.
//!
//! Stage 1 of the collage pipeline. Reads a plain-text deck list and produces
//! an ordered sequence of card entries that the staging stage consumes.
//!
//! ## Deck List Format
//!
//! One card per line, `<quantity>x<CODE>`:
//!
//! ```text
//! 4xOP01-001
//! 2xOP01-016 Nami
//! 1xST01-012
//! ```
//!
//! - The quantity is a positive integer; `0x...` lines are skipped.
//! - The card code is `<SET>-<number>`: an uppercase alphanumeric set code,
//!   a hyphen, and a numeric card number (e.g. `OP01-001`, `ST01-012`).
//! - Lines are whitespace-trimmed before matching, so indented entries
//!   still count.
//! - Anything after the card number (card names, annotations) is ignored.
//! - Lines that don't match the pattern are skipped silently: blank lines,
//!   headers, comments.
//!
//! Entry order is file line order, and it is load-bearing: it determines
//! tile placement in the final collage. Duplicate codes on separate lines
//! are kept as separate entries, each contributing its own copies.
//!
//! ## Card Library Layout
//!
//! Card images live under the asset root, one directory per set:
//!
//! ```text
//! Cards/
//! ├── OP01/
//! │   ├── OP01-001.png
//! │   └── OP01-016.jpg
//! └── ST01/
//!     └── ST01-012.png
//! ```
//!
//! The parser records each entry's `asset_stem` (path without extension);
//! extension probing happens in the staging stage.

use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DeckError {
    #[error("Deck list not found: {0}")]
    NotFound(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// One parsed deck list line: a card code and how many copies to stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardEntry {
    /// Number of physical copies (always >= 1).
    pub quantity: u32,
    /// Set portion of the code (e.g. `OP01` from `OP01-001`).
    pub set_code: String,
    /// Complete card identifier (e.g. `OP01-001`).
    pub full_code: String,
    /// `asset_root/set_code/full_code`, extension unknown until probed.
    pub asset_stem: PathBuf,
}

/// Ordered card entries from one deck list. Order = file line order.
#[derive(Debug, Clone, Default)]
pub struct DeckList {
    pub entries: Vec<CardEntry>,
}

impl DeckList {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total physical copies across all entries.
    pub fn total_copies(&self) -> usize {
        self.entries.iter().map(|e| e.quantity as usize).sum()
    }
}

/// Result of matching a deck line against the `<quantity>x<SET>-<number>` pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedLine {
    /// Copy count (always >= 1).
    pub quantity: u32,
    /// Set portion of the code (e.g. `OP01`).
    pub set_code: String,
    /// Complete card identifier (e.g. `OP01-001`).
    pub full_code: String,
}

/// Match a deck list line against the `<quantity>x<SET>-<number>` pattern.
///
/// Surrounding whitespace is trimmed first; the pattern is then anchored at
/// the start of what remains, and trailing content after the card number is
/// ignored. Returns `None` for anything that doesn't match (the line is
/// then skipped by the caller).
///
/// Handles these patterns:
/// - `"4xOP01-001"` → quantity=4, set_code="OP01", full_code="OP01-001"
/// - `"2xST01-012 Some Card Name"` → quantity=2, full_code="ST01-012"
/// - `"  12xEB01-061"` → quantity=12, full_code="EB01-061" (indentation ok)
/// - `"0xOP01-001"` → None (zero copies)
/// - `"OP01-001"` → None (no quantity prefix)
/// - `"// sideboard"` → None
pub fn parse_deck_line(line: &str) -> Option<ParsedLine> {
    // Deck editors indent and pad entries; surrounding whitespace carries
    // no meaning.
    let line = line.trim();

    // Quantity: one or more leading digits.
    let qty_len = line.chars().take_while(|c| c.is_ascii_digit()).count();
    if qty_len == 0 {
        return None;
    }
    let quantity: u32 = line[..qty_len].parse().ok()?;
    if quantity == 0 {
        return None;
    }

    // Literal 'x' separator (lowercase only).
    let rest = line[qty_len..].strip_prefix('x')?;

    // Set code: one or more uppercase alphanumerics, up to the hyphen.
    let set_len = rest
        .chars()
        .take_while(|c| c.is_ascii_uppercase() || c.is_ascii_digit())
        .count();
    if set_len == 0 {
        return None;
    }
    let after_set = rest[set_len..].strip_prefix('-')?;

    // Card number: one or more digits. Anything after is ignored.
    let num_len = after_set.chars().take_while(|c| c.is_ascii_digit()).count();
    if num_len == 0 {
        return None;
    }

    let set_code = &rest[..set_len];
    let number = &after_set[..num_len];
    Some(ParsedLine {
        quantity,
        set_code: set_code.to_string(),
        full_code: format!("{set_code}-{number}"),
    })
}

/// Parse a deck list file into ordered card entries.
///
/// Each matching line becomes one [`CardEntry`] with its `asset_stem`
/// anchored under `asset_root`; non-matching lines are skipped silently.
/// An empty result (no matching lines) is `Ok`, not an error.
pub fn parse_deck_list(deck_list: &Path, asset_root: &Path) -> Result<DeckList, DeckError> {
    if !deck_list.exists() {
        return Err(DeckError::NotFound(deck_list.to_path_buf()));
    }
    let content = fs::read_to_string(deck_list)?;

    let entries = content
        .lines()
        .filter_map(parse_deck_line)
        .map(|parsed| CardEntry {
            asset_stem: asset_root.join(&parsed.set_code).join(&parsed.full_code),
            quantity: parsed.quantity,
            set_code: parsed.set_code,
            full_code: parsed.full_code,
        })
        .collect();

    Ok(DeckList { entries })
}
