//! Shared test utilities for the deck-collage test suite.
//!
//! Provides synthetic image writers and simulator-tree fixture builders used
//! by the staging, compose, and pipeline tests. Card images are tiny
//! solid-color rasters encoded with the `image` crate, so each test controls
//! exactly which tile lands where and can assert on canvas pixels.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let sim = sim_fixture();
//! add_card_png(sim.path(), "OP01-001", RED);
//! add_card_jpg(sim.path(), "ST01-012", BLUE);
//! let deck = write_deck(sim.path(), "red.deck", "2xOP01-001\n1xST01-012\n");
//! ```

use image::{ImageFormat, Rgb, RgbImage};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use crate::config::GridLayout;
use crate::pipeline;

pub const RED: [u8; 3] = [255, 0, 0];
pub const GREEN: [u8; 3] = [0, 255, 0];
pub const BLUE: [u8; 3] = [0, 0, 255];
pub const BLACK: [u8; 3] = [0, 0, 0];

// =========================================================================
// Synthetic images
// =========================================================================

/// Write a solid-color PNG at `path`, creating parent directories.
pub fn write_png(path: &Path, width: u32, height: u32, color: [u8; 3]) {
    write_image(path, width, height, color, ImageFormat::Png);
}

/// Write a solid-color JPEG at `path`, creating parent directories.
pub fn write_jpeg(path: &Path, width: u32, height: u32, color: [u8; 3]) {
    write_image(path, width, height, color, ImageFormat::Jpeg);
}

fn write_image(path: &Path, width: u32, height: u32, color: [u8; 3], format: ImageFormat) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    let img = RgbImage::from_pixel(width, height, Rgb(color));
    img.save_with_format(path, format).unwrap();
}

// =========================================================================
// Simulator tree fixtures
// =========================================================================

/// Build an empty simulator tree: the card library root plus `Decks/`.
pub fn sim_fixture() -> TempDir {
    let tmp = TempDir::new().unwrap();
    fs::create_dir_all(card_root(tmp.path())).unwrap();
    fs::create_dir_all(tmp.path().join("Decks")).unwrap();
    tmp
}

/// Card library root inside a sim fixture.
pub fn card_root(sim_root: &Path) -> PathBuf {
    pipeline::card_asset_root(sim_root)
}

fn set_of(code: &str) -> &str {
    code.split('-').next().unwrap_or(code)
}

/// Add a solid-color PNG card under `<set>/<code>.png` in the card library.
pub fn add_card_png(sim_root: &Path, code: &str, color: [u8; 3]) {
    let path = card_root(sim_root)
        .join(set_of(code))
        .join(format!("{code}.png"));
    write_png(&path, 60, 84, color);
}

/// Add a solid-color JPEG card under `<set>/<code>.jpg` in the card library.
pub fn add_card_jpg(sim_root: &Path, code: &str, color: [u8; 3]) {
    let path = card_root(sim_root)
        .join(set_of(code))
        .join(format!("{code}.jpg"));
    write_jpeg(&path, 60, 84, color);
}

/// Write a deck list under `Decks/` and return its path.
pub fn write_deck(sim_root: &Path, name: &str, contents: &str) -> PathBuf {
    let path = sim_root.join("Decks").join(name);
    fs::write(&path, contents).unwrap();
    path
}

// =========================================================================
// Canvas probing
// =========================================================================

/// Decode an image file to RGB for pixel assertions.
pub fn open_rgb(path: &Path) -> RgbImage {
    image::open(path).unwrap().to_rgb8()
}

/// Pixel at the center of grid cell `idx` for the given layout.
pub fn cell_center_pixel(canvas: &RgbImage, layout: &GridLayout, idx: u32) -> [u8; 3] {
    let col = idx % layout.columns;
    let row = idx / layout.columns;
    let x = col * layout.cell_width + layout.cell_width / 2;
    let y = row * layout.cell_height + layout.cell_height / 2;
    let p = canvas.get_pixel(x, y);
    [p[0], p[1], p[2]]
}

/// Assert two colors match within a per-channel tolerance (JPEG drift).
pub fn assert_color_near(actual: [u8; 3], expected: [u8; 3], tolerance: u8) {
    for ch in 0..3 {
        let diff = actual[ch].abs_diff(expected[ch]);
        assert!(
            diff <= tolerance,
            "channel {ch}: {actual:?} not within {tolerance} of {expected:?}"
        );
    }
}
