//! Asset resolution and copy staging.
//!
//! Stage 2 of the collage pipeline. Takes the parsed deck list, locates each
//! card's image in the card library, and expands quantities into one staged
//! file per physical copy, preserving deck order.
//!
//! ## Extension Probing
//!
//! The card library mixes formats, so each entry's `asset_stem` is probed in
//! a fixed order: `.png` first, then `.jpg`. The first hit wins and its
//! format is preserved through staging.
//!
//! ## Staging Directory Layout
//!
//! ```text
//! staging/
//! ├── manifest.json           # Tile order (see the manifest module)
//! ├── 0000-OP01-001_1.png     # {seq:04}-{code}_{copy}{ext}
//! ├── 0001-OP01-001_2.png
//! └── 0002-ST01-012_1.jpg
//! ```
//!
//! The zero-padded sequence prefix makes names collision-free across
//! duplicate deck lines and keeps plain filename sort equal to deck order.
//! The four-digit pad holds that sort correct through 10,000 tiles; past
//! that only the manifest carries the order (a canvas that large exceeds
//! composable memory long before the pad rolls over).
//!
//! ## Soft Failures
//!
//! A deck with one bad entry still produces a collage of the rest. Missing
//! assets, undecodable sources, and failed per-copy writes are collected as
//! [`StageWarning`] values in the report; only directory creation and the
//! manifest write abort the stage.

use crate::deck::DeckList;
use crate::manifest::{ManifestError, StagedTile, StagingManifest};
use image::ImageFormat;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Staging manifest error: {0}")]
    Manifest(#[from] ManifestError),
}

/// A soft failure for one entry or one copy. The batch continues.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StageWarning {
    /// Neither probed extension exists for this entry.
    AssetMissing { code: String, stem: PathBuf },
    /// The resolved file exists but would not decode.
    DecodeFailed {
        code: String,
        path: PathBuf,
        reason: String,
    },
    /// One copy's re-encode into the staging directory failed.
    CopyFailed {
        code: String,
        path: PathBuf,
        reason: String,
    },
}

impl fmt::Display for StageWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StageWarning::AssetMissing { code, stem } => {
                write!(
                    f,
                    "Image not found for {code}: no .png or .jpg at {}",
                    stem.display()
                )
            }
            StageWarning::DecodeFailed { code, path, reason } => {
                write!(f, "Could not decode {} for {code}: {reason}", path.display())
            }
            StageWarning::CopyFailed { code, path, reason } => {
                write!(
                    f,
                    "Could not stage copy {} for {code}: {reason}",
                    path.display()
                )
            }
        }
    }
}

/// Result of one staging run.
#[derive(Debug, Default)]
pub struct StageReport {
    /// Staged tiles in deck order; mirrors the written manifest.
    pub tiles: Vec<StagedTile>,
    /// Soft failures, in encounter order.
    pub warnings: Vec<StageWarning>,
}

/// A card image located on disk, with the format its extension implies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedAsset {
    pub path: PathBuf,
    pub extension: &'static str,
    pub format: ImageFormat,
}

const PROBE_ORDER: &[(&str, ImageFormat)] =
    &[("png", ImageFormat::Png), ("jpg", ImageFormat::Jpeg)];

/// Probe the known extensions for an entry's `asset_stem`. First hit wins.
pub fn resolve_asset(stem: &Path) -> Option<ResolvedAsset> {
    for &(extension, format) in PROBE_ORDER {
        let path = stem.with_extension(extension);
        if path.is_file() {
            return Some(ResolvedAsset {
                path,
                extension,
                format,
            });
        }
    }
    None
}

/// Staged filename for one copy: `{seq:04}-{code}_{copy}.{ext}`.
pub fn staged_file_name(sequence: u32, code: &str, copy: u32, extension: &str) -> String {
    format!("{sequence:04}-{code}_{copy}.{extension}")
}

/// Expand the deck into per-copy image files under `staging_dir`.
///
/// Each entry's source is decoded once and re-encoded per copy in its
/// original format. Sequence numbers are assigned per staged file, so the
/// manifest stays contiguous even when entries are skipped. `staging_dir`
/// is created if absent.
pub fn stage_copies(deck: &DeckList, staging_dir: &Path) -> Result<StageReport, StageError> {
    fs::create_dir_all(staging_dir)?;

    let mut tiles: Vec<StagedTile> = Vec::new();
    let mut warnings = Vec::new();
    let mut sequence: u32 = 0;

    for entry in &deck.entries {
        let Some(asset) = resolve_asset(&entry.asset_stem) else {
            warnings.push(StageWarning::AssetMissing {
                code: entry.full_code.clone(),
                stem: entry.asset_stem.clone(),
            });
            continue;
        };

        let img = match image::open(&asset.path) {
            Ok(img) => img,
            Err(e) => {
                warnings.push(StageWarning::DecodeFailed {
                    code: entry.full_code.clone(),
                    path: asset.path.clone(),
                    reason: e.to_string(),
                });
                continue;
            }
        };

        for copy in 1..=entry.quantity {
            let file = staged_file_name(sequence, &entry.full_code, copy, asset.extension);
            let dest = staging_dir.join(&file);
            match img.save_with_format(&dest, asset.format) {
                Ok(()) => {
                    tiles.push(StagedTile {
                        sequence,
                        code: entry.full_code.clone(),
                        copy,
                        file,
                    });
                    sequence += 1;
                }
                Err(e) => {
                    warnings.push(StageWarning::CopyFailed {
                        code: entry.full_code.clone(),
                        path: dest,
                        reason: e.to_string(),
                    });
                }
            }
        }
    }

    let manifest = StagingManifest {
        tiles: tiles.clone(),
    };
    manifest.save(staging_dir)?;

    Ok(StageReport { tiles, warnings })
}
