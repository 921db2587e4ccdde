use std::path::Path;

use assert_cmd::Command;
use image::{Rgba, RgbaImage};
use isocheck::io::{ValidateConfig, ValidationReport};
use predicates::prelude::*;
use tempfile::TempDir;

const INK: Rgba<u8> = Rgba([0, 0, 0, 255]);
const PAPER: Rgba<u8> = Rgba([255, 255, 255, 255]);

fn plus(x: u32, y: u32) -> bool {
    x == 2 || y == 2
}

/// Isometric strokes with three plus glyphs below, offset by (ox, oy) on a
/// white page.
fn isometric_png(path: &Path, ox: u32, oy: u32) {
    let img = RgbaImage::from_fn(64 + ox, 56 + oy, |px, py| {
        if px < ox || py < oy {
            return PAPER;
        }
        let (x, y) = (px - ox, py - oy);
        let half = x / 2;
        let stroke = x % 2 == 0 && (y == half || y == 12 + half || y + half == 31 || y + half == 43);
        let glyph = [4u32, 24, 44]
            .iter()
            .any(|&gx| x >= gx && x < gx + 5 && (50..55).contains(&y) && plus(x - gx, y - 50));
        if stroke || glyph {
            INK
        } else {
            PAPER
        }
    });
    img.save(path).expect("write candidate png");
}

fn lattice_png(path: &Path) {
    let img = RgbaImage::from_fn(48, 48, |x, y| if x % 6 == 0 || y % 6 == 0 { INK } else { PAPER });
    img.save(path).expect("write lattice png");
}

fn template_png(path: &Path) {
    let img = RgbaImage::from_fn(5, 5, |x, y| if plus(x, y) { INK } else { PAPER });
    img.save(path).expect("write template png");
}

struct Fixture {
    dir: TempDir,
}

impl Fixture {
    fn new() -> Self {
        let dir = tempfile::tempdir().expect("tempdir");
        template_png(&dir.path().join("plus.png"));
        Self { dir }
    }

    fn path(&self, name: &str) -> std::path::PathBuf {
        self.dir.path().join(name)
    }
}

fn isocheck() -> Command {
    Command::cargo_bin("isocheck").expect("isocheck binary")
}

#[test]
fn passing_image_prints_pass_and_writes_outputs() {
    let fx = Fixture::new();
    isometric_png(&fx.path("art.png"), 0, 0);

    isocheck()
        .arg(fx.path("art.png"))
        .arg("--template")
        .arg(fx.path("plus.png"))
        .arg("--report")
        .arg(fx.path("report.json"))
        .arg("--debug-image")
        .arg(fx.path("debug.png"))
        .assert()
        .success()
        .stdout(predicate::str::starts_with("PASS total="))
        .stdout(predicate::str::contains("matches=3"));

    let report = ValidationReport::load_json(fx.path("report.json")).expect("report json");
    assert!(report.pass);
    assert_eq!(report.matches.len(), 3);
    assert!(report.error.is_none());

    let debug = image::open(fx.path("debug.png")).expect("debug png").to_rgba8();
    assert_eq!(debug.dimensions(), (64, 56));
    // stroke pixel recolored green, glyph outline red
    assert_eq!(*debug.get_pixel(0, 0), Rgba([0, 255, 0, 255]));
    assert_eq!(*debug.get_pixel(4, 50), Rgba([255, 0, 0, 255]));
}

#[test]
fn orthogonal_lattice_fails_with_exit_code_one() {
    let fx = Fixture::new();
    lattice_png(&fx.path("lattice.png"));

    isocheck()
        .arg(fx.path("lattice.png"))
        .assert()
        .code(1)
        .stdout(predicate::str::starts_with("FAIL"));
}

#[test]
fn crop_selects_the_region_from_a_larger_page() {
    let fx = Fixture::new();
    isometric_png(&fx.path("page.png"), 20, 10);

    isocheck()
        .arg(fx.path("page.png"))
        .args(["--crop", "20,10,64,56"])
        .arg("-t")
        .arg(fx.path("plus.png"))
        .assert()
        .success()
        .stdout(predicate::str::contains("matches=3"));
}

#[test]
fn config_file_supplies_paths() {
    let fx = Fixture::new();
    isometric_png(&fx.path("art.png"), 0, 0);

    let mut cfg = ValidateConfig::new(fx.path("art.png").to_string_lossy());
    cfg.template_paths
        .push(fx.path("plus.png").to_string_lossy().into_owned());
    cfg.report_path = Some(fx.path("from_config.json").to_string_lossy().into_owned());
    cfg.write_json(fx.path("config.json")).expect("write config");

    isocheck()
        .arg("--config")
        .arg(fx.path("config.json"))
        .assert()
        .success()
        .stdout(predicate::str::starts_with("PASS"));
    assert!(fx.path("from_config.json").exists());
}

#[test]
fn out_of_bounds_crop_is_reported() {
    let fx = Fixture::new();
    isometric_png(&fx.path("art.png"), 0, 0);

    isocheck()
        .arg(fx.path("art.png"))
        .args(["--crop", "40,40,64,56"])
        .arg("--report")
        .arg(fx.path("report.json"))
        .assert()
        .code(2)
        .stderr(predicate::str::contains("error:"));

    let report = ValidationReport::load_json(fx.path("report.json")).expect("report json");
    assert!(!report.pass);
    assert!(report.error.is_some());
}

#[test]
fn missing_inputs_are_errors() {
    let fx = Fixture::new();
    isocheck()
        .arg(fx.path("nope.png"))
        .assert()
        .code(2)
        .stderr(predicate::str::contains("error:"));

    isocheck().assert().code(2);
    isocheck().args(["--crop", "1,2"]).arg(fx.path("nope.png")).assert().code(2);
}
