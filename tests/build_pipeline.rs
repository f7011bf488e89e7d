//! End-to-end pipeline test over a synthetic simulator tree.
//!
//! Builds a throwaway sim installation (card art + deck lists) with the
//! image crate, runs the public pipeline API against it, and probes pixels
//! in the produced collage.
//!
//! Run with: cargo test --test build_pipeline

use deck_collage::config::{CollageConfig, GridLayout};
use deck_collage::pipeline;
use image::{ImageFormat, Rgb, RgbImage};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const RED: [u8; 3] = [200, 30, 30];
const GREEN: [u8; 3] = [30, 200, 30];
const BLUE: [u8; 3] = [30, 30, 200];
const BLACK: [u8; 3] = [0, 0, 0];

/// Small cells keep encode and compose fast.
fn small_layout() -> GridLayout {
    GridLayout {
        cell_width: 20,
        cell_height: 28,
        columns: 4,
    }
}

fn sim_fixture() -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::create_dir_all(pipeline::card_asset_root(dir.path())).unwrap();
    dir
}

fn add_card(sim_root: &Path, code: &str, color: [u8; 3], format: ImageFormat) {
    let set = code.split('-').next().unwrap();
    let ext = match format {
        ImageFormat::Png => "png",
        _ => "jpg",
    };
    let path = pipeline::card_asset_root(sim_root)
        .join(set)
        .join(format!("{code}.{ext}"));
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    let img = RgbImage::from_pixel(60, 84, Rgb(color));
    img.save_with_format(&path, format).unwrap();
}

fn write_deck(sim_root: &Path, name: &str, contents: &str) -> PathBuf {
    let decks = sim_root.join("Decks");
    fs::create_dir_all(&decks).unwrap();
    let path = decks.join(format!("{name}.deck"));
    fs::write(&path, contents).unwrap();
    path
}

fn open_rgb(path: &Path) -> RgbImage {
    image::open(path).unwrap().to_rgb8()
}

fn cell_center(img: &RgbImage, layout: &GridLayout, idx: u32) -> [u8; 3] {
    let x = (idx % layout.columns) * layout.cell_width + layout.cell_width / 2;
    let y = (idx / layout.columns) * layout.cell_height + layout.cell_height / 2;
    img.get_pixel(x, y).0
}

/// JPEG re-encoding shifts flat colors a little; compare with slack.
fn assert_near(actual: [u8; 3], expected: [u8; 3]) {
    for c in 0..3 {
        assert!(
            actual[c].abs_diff(expected[c]) <= 16,
            "channel {} off: {:?} vs {:?}",
            c,
            actual,
            expected
        );
    }
}

#[test]
fn builds_collage_from_sim_tree() {
    let sim = sim_fixture();
    add_card(sim.path(), "OP01-001", RED, ImageFormat::Png);
    add_card(sim.path(), "ST01-012", BLUE, ImageFormat::Jpeg);
    let deck = write_deck(
        sim.path(),
        "lunch",
        "2xOP01-001 Roronoa Zoro\n1xST01-012\nEvents:\n",
    );
    let out_dir = TempDir::new().unwrap();

    let config = CollageConfig {
        layout: small_layout(),
    };
    let outcome = pipeline::build(sim.path(), &deck, out_dir.path(), &config).unwrap();

    assert!(outcome.warnings.is_empty(), "{:?}", outcome.warnings);
    assert_eq!(outcome.tiles_staged, 3);
    let output = outcome.output.unwrap();
    assert_eq!(output, out_dir.path().join("lunch_deck.png"));

    // 3 tiles, 4 columns: one row, full grid width.
    let img = open_rgb(&output);
    assert_eq!(img.dimensions(), (80, 28));
    assert_near(cell_center(&img, &config.layout, 0), RED);
    assert_near(cell_center(&img, &config.layout, 1), RED);
    assert_near(cell_center(&img, &config.layout, 2), BLUE);
    assert_eq!(cell_center(&img, &config.layout, 3), BLACK);
}

#[test]
fn empty_deck_produces_no_output_file() {
    let sim = sim_fixture();
    let deck = write_deck(sim.path(), "blank", "Leader:\nnothing parseable here\n");
    let out_dir = TempDir::new().unwrap();

    let outcome = pipeline::build(
        sim.path(),
        &deck,
        out_dir.path(),
        &CollageConfig::default(),
    )
    .unwrap();

    assert!(outcome.output.is_none());
    assert_eq!(outcome.tiles_staged, 0);
    assert!(!out_dir.path().join("blank_deck.png").exists());
}

#[test]
fn missing_card_art_degrades_to_warning() {
    let sim = sim_fixture();
    add_card(sim.path(), "OP01-001", GREEN, ImageFormat::Png);
    let deck = write_deck(sim.path(), "partial", "2xOP01-001\n1xOP05-119\n");
    let out_dir = TempDir::new().unwrap();

    let config = CollageConfig {
        layout: small_layout(),
    };
    let outcome = pipeline::build(sim.path(), &deck, out_dir.path(), &config).unwrap();

    assert_eq!(outcome.tiles_staged, 2);
    assert_eq!(outcome.warnings.len(), 1);
    assert!(outcome.warnings[0].to_string().contains("OP05-119"));

    let img = open_rgb(&outcome.output.unwrap());
    assert_near(cell_center(&img, &config.layout, 0), GREEN);
    assert_near(cell_center(&img, &config.layout, 1), GREEN);
    assert_eq!(cell_center(&img, &config.layout, 2), BLACK);
}

#[test]
fn layout_from_config_file_shapes_the_canvas() {
    let sim = sim_fixture();
    add_card(sim.path(), "OP01-001", RED, ImageFormat::Png);
    let deck = write_deck(sim.path(), "tall", "3xOP01-001\n");
    let out_dir = TempDir::new().unwrap();

    let config_path = sim.path().join("config.toml");
    fs::write(
        &config_path,
        "[layout]\ncell_width = 10\ncell_height = 14\ncolumns = 2\n",
    )
    .unwrap();
    let config = deck_collage::config::load_config(Some(&config_path)).unwrap();

    let outcome = pipeline::build(sim.path(), &deck, out_dir.path(), &config).unwrap();

    // 3 tiles over 2 columns: 2 rows of 10x14 cells.
    let img = open_rgb(&outcome.output.unwrap());
    assert_eq!(img.dimensions(), (20, 28));
    assert_near(cell_center(&img, &config.layout, 2), RED);
    assert_eq!(cell_center(&img, &config.layout, 3), BLACK);
}

#[test]
fn bare_deck_name_resolves_into_decks_directory() {
    let sim = sim_fixture();
    add_card(sim.path(), "OP01-001", BLUE, ImageFormat::Png);
    write_deck(sim.path(), "lunch", "1xOP01-001\n");
    let out_dir = TempDir::new().unwrap();

    let resolved = pipeline::resolve_deck_path(sim.path(), Path::new("lunch"));
    assert_eq!(resolved, sim.path().join("Decks").join("lunch.deck"));

    let outcome = pipeline::build(
        sim.path(),
        &resolved,
        out_dir.path(),
        &CollageConfig::default(),
    )
    .unwrap();
    assert_eq!(outcome.tiles_staged, 1);
}

#[test]
fn check_resolves_assets_without_building() {
    let sim = sim_fixture();
    add_card(sim.path(), "OP01-001", RED, ImageFormat::Png);
    add_card(sim.path(), "OP01-002", RED, ImageFormat::Jpeg);
    let deck = write_deck(sim.path(), "audit", "4xOP01-001\n2xOP01-002\n1xEB01-040\n");

    let report = pipeline::check(sim.path(), &deck).unwrap();

    assert_eq!(report.deck.entries.len(), 3);
    assert_eq!(report.deck.total_copies(), 7);
    assert_eq!(report.resolutions.len(), 3);
    assert!(report.resolutions[0].is_some());
    assert!(report.resolutions[1].is_some());
    assert!(report.resolutions[2].is_none());
    assert_eq!(report.resolutions[0].as_ref().unwrap().extension, "png");
    assert_eq!(report.resolutions[1].as_ref().unwrap().extension, "jpg");
}
