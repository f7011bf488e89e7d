//! Collage configuration module.
//!
//! Handles loading and validating the optional layout config file. The
//! defaults reproduce the standard card collage: 480x671 pixel cells
//! (roughly trading-card aspect) in 10 fixed columns.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [layout]
//! cell_width = 480    # Pixels per grid cell, horizontal
//! cell_height = 671   # Pixels per grid cell, vertical
//! columns = 10        # Fixed column count; rows grow as needed
//! ```
//!
//! ## Partial Configuration
//!
//! Config files are sparse: override just the values you want:
//!
//! ```toml
//! # Only shrink the cells, keep 10 columns
//! [layout]
//! cell_width = 240
//! cell_height = 336
//! ```
//!
//! Unknown keys are rejected to catch typos early, as are values outside
//! their accepted ranges.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Config file not found: {0}")]
    NotFound(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Largest accepted cell edge, in pixels. Together with [`MAX_COLUMNS`]
/// this keeps canvas-size arithmetic well inside `u32`.
pub const MAX_CELL_DIMENSION: u32 = 10_000;

/// Largest accepted column count.
pub const MAX_COLUMNS: u32 = 1_000;

/// Collage configuration loaded from a TOML file.
///
/// All fields have defaults. User config files need only specify the values
/// they want to override. Unknown keys are rejected.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CollageConfig {
    /// Grid cell geometry and column count.
    pub layout: GridLayout,
}

impl CollageConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.layout.columns == 0 || self.layout.columns > MAX_COLUMNS {
            return Err(ConfigError::Validation(format!(
                "layout.columns must be 1-{MAX_COLUMNS}"
            )));
        }
        if self.layout.cell_width == 0
            || self.layout.cell_width > MAX_CELL_DIMENSION
            || self.layout.cell_height == 0
            || self.layout.cell_height > MAX_CELL_DIMENSION
        {
            return Err(ConfigError::Validation(format!(
                "layout.cell_width and layout.cell_height must be 1-{MAX_CELL_DIMENSION}"
            )));
        }
        Ok(())
    }
}

/// Grid geometry: fixed cell size and column count, rows grow with the deck.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GridLayout {
    /// Pixels per grid cell, horizontal.
    pub cell_width: u32,
    /// Pixels per grid cell, vertical.
    pub cell_height: u32,
    /// Fixed column count; `rows = ceil(tiles / columns)`.
    pub columns: u32,
}

impl Default for GridLayout {
    fn default() -> Self {
        Self {
            cell_width: 480,
            cell_height: 671,
            columns: 10,
        }
    }
}

/// Load config from an optional TOML file path.
///
/// No path means stock defaults. A path that doesn't exist is an error
/// (the user asked for a specific file); so are parse failures, unknown
/// keys, and out-of-range values.
pub fn load_config(path: Option<&Path>) -> Result<CollageConfig, ConfigError> {
    let Some(path) = path else {
        return Ok(CollageConfig::default());
    };
    if !path.exists() {
        return Err(ConfigError::NotFound(path.to_path_buf()));
    }
    let content = fs::read_to_string(path)?;
    let config: CollageConfig = toml::from_str(&content)?;
    config.validate()?;
    Ok(config)
}

/// Returns a fully-commented stock config TOML with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r#"# Deck Collage Configuration
# ==========================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults.
#
# Pass the file to the build command with --config:
#   deck-collage build my-deck --sim-root <DIR> --config collage.toml
#
# Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Grid layout
# ---------------------------------------------------------------------------
[layout]
# Pixels per grid cell. Card images are stretched to exactly this size,
# so keep the ratio close to a physical card (roughly 5:7) unless you
# want distortion. The defaults match the simulator's card renders.
cell_width = 480
cell_height = 671

# Fixed column count. Rows grow as needed: ceil(tiles / columns).
# Cells beyond the last tile stay black.
columns = 10
"#
}
