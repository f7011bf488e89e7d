//! Staging manifest: the ordering record shared between pipeline stages.
//!
//! The staging stage writes `manifest.json` into the staging directory; the
//! compose stage reads it back. Tile order is carried as an explicit
//! `sequence` field rather than being inferred from filenames, so ordering
//! survives duplicate deck lines and mixed code digit widths.
//!
//! ```json
//! {
//!   "tiles": [
//!     { "sequence": 0, "code": "OP01-001", "copy": 1, "file": "0000-OP01-001_1.png" },
//!     { "sequence": 1, "code": "OP01-001", "copy": 2, "file": "0001-OP01-001_2.png" }
//!   ]
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Manifest filename inside a staging directory.
pub const MANIFEST_FILENAME: &str = "manifest.json";

#[derive(Error, Debug)]
pub enum ManifestError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Manifest JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// One staged tile: a single physical copy of a card image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StagedTile {
    /// 0-based global tile order; equals the final grid cell index.
    pub sequence: u32,
    /// Card code this tile reproduces (e.g. `OP01-001`).
    pub code: String,
    /// 1-based copy index within the deck entry.
    pub copy: u32,
    /// Filename within the staging directory.
    pub file: String,
}

/// Ordered tile listing for one staging directory.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StagingManifest {
    pub tiles: Vec<StagedTile>,
}

impl StagingManifest {
    /// Path of the manifest file inside `staging_dir`.
    pub fn path_in(staging_dir: &Path) -> PathBuf {
        staging_dir.join(MANIFEST_FILENAME)
    }

    /// Load the manifest from a staging directory.
    ///
    /// Returns `Ok(None)` when no manifest exists (a bare directory of
    /// images is valid compose input). A manifest that exists but won't
    /// parse is an error, not a silent fallback.
    pub fn load(staging_dir: &Path) -> Result<Option<Self>, ManifestError> {
        let path = Self::path_in(staging_dir);
        if !path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(&path)?;
        Ok(Some(serde_json::from_str(&content)?))
    }

    /// Write the manifest into a staging directory.
    pub fn save(&self, staging_dir: &Path) -> Result<(), ManifestError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(Self::path_in(staging_dir), json)?;
        Ok(())
    }

    /// Tile filenames ordered by `sequence`.
    pub fn files_in_sequence(&self) -> Vec<String> {
        let mut tiles: Vec<&StagedTile> = self.tiles.iter().collect();
        tiles.sort_by_key(|t| t.sequence);
        tiles.into_iter().map(|t| t.file.clone()).collect()
    }
}
