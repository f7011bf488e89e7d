//! Pipeline orchestration: parse, stage, compose.
//!
//! Runs the three stages end to end against a simulator installation.
//! The card library lives at a fixed location inside the sim tree:
//!
//! ```text
//! <sim_root>/
//! ├── OPTCGSim_Data/
//! │   └── StreamingAssets/
//! │       └── Cards/          # card library: <SET>/<CODE>.png|.jpg
//! └── Decks/
//!     └── <name>.deck         # deck lists the simulator saves
//! ```
//!
//! Staging happens in a `tempfile::TempDir` owned by the orchestrator, so
//! the per-copy files are removed on every exit path, success or error.
//! The collage lands at `<output_dir>/<deck_stem>_deck.png`.
//!
//! Missing preconditions (card library, deck file) are the only fatal
//! input failures; per-entry problems surface as [`BuildWarning`] values
//! on the outcome.

use crate::compose::{self, ComposeError, ComposeWarning};
use crate::config::CollageConfig;
use crate::deck::{self, DeckError, DeckList};
use crate::stage::{self, ResolvedAsset, StageError, StageWarning};
use std::fmt;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use thiserror::Error;

/// Fixed location of the card library inside a simulator installation.
const CARD_ROOT_SEGMENTS: &[&str] = &["OPTCGSim_Data", "StreamingAssets", "Cards"];

/// Directory of simulator-saved deck lists, and their extension.
const DECKS_DIR: &str = "Decks";
const DECK_FILE_EXTENSION: &str = "deck";

/// Appended to the deck list's stem to name the collage.
const OUTPUT_SUFFIX: &str = "_deck.png";

#[derive(Error, Debug)]
pub enum BuildError {
    #[error("Card directory not found: {0}")]
    CardRootNotFound(PathBuf),
    #[error("Deck file not found: {0}")]
    DeckListNotFound(PathBuf),
    #[error("Deck error: {0}")]
    Deck(#[from] DeckError),
    #[error("Staging error: {0}")]
    Stage(#[from] StageError),
    #[error("Compose error: {0}")]
    Compose(#[from] ComposeError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// A soft failure from either stage, in pipeline encounter order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildWarning {
    Stage(StageWarning),
    Compose(ComposeWarning),
}

impl fmt::Display for BuildWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuildWarning::Stage(w) => w.fmt(f),
            BuildWarning::Compose(w) => w.fmt(f),
        }
    }
}

/// What one build produced.
#[derive(Debug)]
pub struct BuildOutcome {
    /// Written collage path; `None` when nothing staged (empty deck).
    pub output: Option<PathBuf>,
    /// Staged tile count; equals the grid's cell occupancy.
    pub tiles_staged: usize,
    /// Merged soft failures from staging and composition.
    pub warnings: Vec<BuildWarning>,
}

/// Card library root for a simulator installation.
pub fn card_asset_root(sim_root: &Path) -> PathBuf {
    CARD_ROOT_SEGMENTS
        .iter()
        .fold(sim_root.to_path_buf(), |path, segment| path.join(segment))
}

/// Resolve the CLI deck argument to a deck list path.
///
/// An existing file path is used as given. Anything else is treated as a
/// deck name saved by the simulator: `<sim_root>/Decks/<name>.deck` (the
/// extension is appended only when the name doesn't carry one).
pub fn resolve_deck_path(sim_root: &Path, deck: &Path) -> PathBuf {
    if deck.is_file() {
        return deck.to_path_buf();
    }
    let mut candidate = sim_root.join(DECKS_DIR).join(deck);
    if candidate.extension().is_none() {
        candidate.set_extension(DECK_FILE_EXTENSION);
    }
    candidate
}

/// Collage filename for a deck list: `<stem>_deck.png`.
pub fn output_file_name(deck_list: &Path) -> String {
    let stem = deck_list
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "deck".to_string());
    format!("{stem}{OUTPUT_SUFFIX}")
}

fn validate_inputs(sim_root: &Path, deck_list: &Path) -> Result<PathBuf, BuildError> {
    let card_root = card_asset_root(sim_root);
    if !card_root.is_dir() {
        return Err(BuildError::CardRootNotFound(card_root));
    }
    if !deck_list.exists() {
        return Err(BuildError::DeckListNotFound(deck_list.to_path_buf()));
    }
    Ok(card_root)
}

/// Run the full pipeline: parse the deck, stage copies, compose the collage.
///
/// Returns the outcome with all soft warnings collected; an empty deck
/// yields `output: None` and no file. The staging directory is scoped to
/// this call and removed when it returns.
pub fn build(
    sim_root: &Path,
    deck_list: &Path,
    output_dir: &Path,
    config: &CollageConfig,
) -> Result<BuildOutcome, BuildError> {
    let card_root = validate_inputs(sim_root, deck_list)?;

    let staging = TempDir::new()?;

    let deck = deck::parse_deck_list(deck_list, &card_root)?;
    let report = stage::stage_copies(&deck, staging.path())?;

    let mut warnings: Vec<BuildWarning> =
        report.warnings.into_iter().map(BuildWarning::Stage).collect();

    let output_path = output_dir.join(output_file_name(deck_list));
    let summary = compose::compose(staging.path(), &output_path, &config.layout)?;

    let output = match summary {
        Some(summary) => {
            warnings.extend(summary.warnings.into_iter().map(BuildWarning::Compose));
            Some(output_path)
        }
        None => None,
    };

    Ok(BuildOutcome {
        output,
        tiles_staged: report.tiles.len(),
        warnings,
    })
}

/// Deck inventory with per-entry asset resolution, for the `check` command.
#[derive(Debug)]
pub struct CheckReport {
    pub deck: DeckList,
    /// One resolution per deck entry, aligned by index.
    pub resolutions: Vec<Option<ResolvedAsset>>,
}

/// Parse the deck and probe every entry's asset without staging anything.
pub fn check(sim_root: &Path, deck_list: &Path) -> Result<CheckReport, BuildError> {
    let card_root = validate_inputs(sim_root, deck_list)?;
    let deck = deck::parse_deck_list(deck_list, &card_root)?;
    let resolutions = deck
        .entries
        .iter()
        .map(|entry| stage::resolve_asset(&entry.asset_stem))
        .collect();
    Ok(CheckReport { deck, resolutions })
}
