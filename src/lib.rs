//! # Deck Collage
//!
//! Deck collage image generator for the OPTCG simulator. A plain-text deck
//! list goes in, a single grid image of card art comes out: one cell per
//! card copy, in deck order, ready to share or print.
//!
//! # Architecture: Three-Stage Pipeline
//!
//! A build runs three independent stages, with a JSON manifest carrying
//! intent from staging to composition:
//!
//! ```text
//! 1. Parse     lunch.deck   →  DeckList           (text → structured entries)
//! 2. Stage     DeckList     →  staging dir        (per-copy tiles + manifest.json)
//! 3. Compose   staging dir  →  lunch_deck.png     (fixed-column grid collage)
//! ```
//!
//! This separation exists for three reasons:
//!
//! - **Testability**: parsing and layout arithmetic are pure functions;
//!   staging and composition each work from plain directories, so every
//!   stage is exercisable on its own.
//! - **Debuggability**: the staging manifest is human-readable JSON that
//!   records exactly which tile was meant for which cell.
//! - **Decoupling**: the compositor knows nothing about decks. Point it at
//!   any directory of tiles and it produces a grid.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`deck`] | Stage 1: parses the `<qty>x<SET>-<number>` line convention into card entries |
//! | [`stage`] | Stage 2: expands entries into per-copy re-encoded tiles plus the staging manifest |
//! | [`compose`] | Stage 3: places staged tiles onto a fixed-column grid canvas |
//! | [`manifest`] | Staging manifest types serialized between stages |
//! | [`pipeline`] | Orchestration: precondition checks, scoped staging directory, warning collection |
//! | [`config`] | Grid layout `config.toml` loading, validation, and the stock config |
//! | [`report`] | CLI output formatting for build and check results |
//!
//! # Design Decisions
//!
//! ## Warnings Are Values, Not Errors
//!
//! Deck lists are written by hand and card libraries are incomplete, so a
//! build keeps going when a single card lets it down. Missing art, files
//! that fail to decode, and tiles that fail to place are collected as
//! warning values on the outcome and rendered by [`report`]; only absent
//! preconditions (no card library, no deck list) abort a build. An empty
//! deck is not an error either: the pipeline reports that nothing was
//! staged and writes no output file.
//!
//! ## Manifest-Carried Ordering
//!
//! Cell order is decided once, at staging time, and recorded in
//! `manifest.json` as an explicit per-tile sequence number. The compositor
//! follows the manifest instead of re-deriving order from directory
//! listings. Staged filenames still carry a zero-padded sequence prefix, so
//! a lexicographic sort of a manifest-less directory reproduces the same
//! order; that fallback keeps the compositor usable on plain directories
//! of tiles.
//!
//! ## Scoped Staging
//!
//! The per-copy expansion is working state, not a deliverable. It lives in
//! a [`tempfile::TempDir`] owned by the pipeline, and `Drop` removes it on
//! every exit path, success or failure, with no cleanup code at the call
//! sites.
//!
//! ## Stretch-To-Cell Resizing
//!
//! Tiles are resized to the exact cell size (`resize_exact`, Lanczos3)
//! rather than fitted with letterboxing. Card scans already share the
//! cell's aspect ratio, and uniform cells keep every row flush with no
//! padding seams between tiles.

pub mod compose;
pub mod config;
pub mod deck;
pub mod manifest;
pub mod pipeline;
pub mod report;
pub mod stage;

#[cfg(test)]
pub(crate) mod test_helpers;
