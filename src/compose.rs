//! Collage composition.
//!
//! Stage 3 of the collage pipeline. Reads a staging directory of per-copy
//! card images and packs them into a single fixed-column grid raster.
//!
//! ## Tile Order
//!
//! Order comes from the staging manifest when one is present (by its
//! `sequence` field). A directory without a manifest is still valid input:
//! tiles are then the `.png`/`.jpg`/`.jpeg` files in ascending filename
//! order, which matches deck order for directories the staging stage wrote.
//!
//! ## Grid Geometry
//!
//! Columns are fixed; rows grow as `ceil(tiles / columns)`. The canvas is
//! always `columns * cell_width` wide, with black filling cells past the
//! last tile. Each tile is stretch-resized to exactly the cell size; aspect
//! ratio is NOT preserved (cells already match the card aspect).
//!
//! ## Soft Failures
//!
//! A tile that won't decode is skipped with a [`ComposeWarning`] and its
//! cell stays black; composition continues. Only canvas save and manifest
//! read failures are hard errors.

use crate::config::GridLayout;
use crate::manifest::{ManifestError, StagingManifest};
use image::imageops::{self, FilterType};
use image::{Rgb, RgbImage};
use std::fmt;
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ComposeError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Staging manifest error: {0}")]
    Manifest(#[from] ManifestError),
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
}

/// A tile that could not be placed; its cell stays black.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ComposeWarning {
    TileSkipped { file: String, reason: String },
}

impl fmt::Display for ComposeWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ComposeWarning::TileSkipped { file, reason } => {
                write!(f, "Could not place tile {file}: {reason}")
            }
        }
    }
}

/// What one composition produced.
#[derive(Debug, Clone)]
pub struct ComposeSummary {
    /// Tiles the grid was sized for (including any skipped ones).
    pub tile_count: usize,
    pub rows: u32,
    /// Canvas width in pixels.
    pub width: u32,
    /// Canvas height in pixels.
    pub height: u32,
    pub warnings: Vec<ComposeWarning>,
}

const TILE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg"];

/// Grid geometry for a tile count: `(rows, canvas_width, canvas_height)`.
///
/// The canvas is always the full `columns` wide, even when a single row is
/// only partially filled. Layout fields arrive bounded by
/// [`CollageConfig::validate`](crate::config::CollageConfig::validate), which
/// keeps both products inside `u32`.
pub fn grid_dimensions(tile_count: usize, layout: &GridLayout) -> (u32, u32, u32) {
    let rows = tile_count.div_ceil(layout.columns as usize) as u32;
    (
        rows,
        layout.columns * layout.cell_width,
        rows * layout.cell_height,
    )
}

/// Top-left pixel of grid cell `idx`.
pub fn cell_origin(idx: u32, layout: &GridLayout) -> (u32, u32) {
    let col = idx % layout.columns;
    let row = idx / layout.columns;
    (col * layout.cell_width, row * layout.cell_height)
}

fn is_tile(path: &Path) -> bool {
    if !path.is_file() {
        return false;
    }
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default();
    TILE_EXTENSIONS.contains(&ext.as_str())
}

/// List tile filenames in ascending lexicographic order.
fn scan_tiles(staging_dir: &Path) -> Result<Vec<String>, ComposeError> {
    let mut files: Vec<String> = fs::read_dir(staging_dir)?
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| is_tile(p))
        .filter_map(|p| p.file_name().map(|n| n.to_string_lossy().into_owned()))
        .collect();
    files.sort();
    Ok(files)
}

/// Resolve tile filenames in placement order: manifest first, filename sort
/// as the fallback for manifest-less directories.
pub fn tile_order(staging_dir: &Path) -> Result<Vec<String>, ComposeError> {
    match StagingManifest::load(staging_dir)? {
        Some(manifest) => Ok(manifest.files_in_sequence()),
        None => scan_tiles(staging_dir),
    }
}

/// Compose the staged tiles into a grid collage at `output_path`.
///
/// Zero tiles is the "nothing to compose" outcome: `Ok(None)`, no file
/// written. The output format follows the path's extension (PNG or JPEG).
pub fn compose(
    staging_dir: &Path,
    output_path: &Path,
    layout: &GridLayout,
) -> Result<Option<ComposeSummary>, ComposeError> {
    let files = tile_order(staging_dir)?;
    if files.is_empty() {
        return Ok(None);
    }

    let (rows, width, height) = grid_dimensions(files.len(), layout);
    let mut canvas = RgbImage::from_pixel(width, height, Rgb([0, 0, 0]));
    let mut warnings = Vec::new();

    for (idx, file) in files.iter().enumerate() {
        let tile_path = staging_dir.join(file);
        let tile = match image::open(&tile_path) {
            Ok(img) => img
                .resize_exact(layout.cell_width, layout.cell_height, FilterType::Lanczos3)
                .to_rgb8(),
            Err(e) => {
                warnings.push(ComposeWarning::TileSkipped {
                    file: file.clone(),
                    reason: e.to_string(),
                });
                continue;
            }
        };
        let (x, y) = cell_origin(idx as u32, layout);
        imageops::overlay(&mut canvas, &tile, x as i64, y as i64);
    }

    canvas.save(output_path)?;

    Ok(Some(ComposeSummary {
        tile_count: files.len(),
        rows,
        width,
        height,
        warnings,
    }))
}
