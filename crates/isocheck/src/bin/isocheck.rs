//! `isocheck` command line: validate one image region and print the verdict.
//!
//! Exit status: `0` pass, `1` fail, `2` usage or input error.

use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use isocheck::image_io::{load_pixel_buffer, write_debug_image};
use isocheck::io::{CropRect, ValidateConfig, ValidationReport};
use isocheck::{IsoValidator, PixelBuffer};
use log::info;

#[derive(Parser, Debug)]
#[command(name = "isocheck", version, about = "Validate isometric pixel-art structure")]
struct Cli {
    /// Candidate image; overrides `candidate_path` from --config.
    candidate: Option<PathBuf>,

    /// Reference template image; repeat for several templates.
    #[arg(short, long = "template", value_name = "PATH")]
    templates: Vec<PathBuf>,

    /// JSON config (`ValidateConfig`).
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Region of the candidate to validate.
    #[arg(long, value_name = "X,Y,W,H")]
    crop: Option<CropRect>,

    /// Write a JSON report here.
    #[arg(long, value_name = "FILE")]
    report: Option<PathBuf>,

    /// Write the candidate with highlighted lines and matches here.
    #[arg(long, value_name = "FILE")]
    debug_image: Option<PathBuf>,

    /// More log output (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::from(2)
        }
    }
}

#[cfg(not(feature = "tracing"))]
fn init_logging(verbose: u8) {
    let _ = isocheck::core::init_verbosity(verbose);
}

#[cfg(feature = "tracing")]
fn init_logging(verbose: u8) {
    let _ = tracing_log::LogTracer::init();
    let level = isocheck::core::verbosity_level(verbose).to_string().to_lowercase();
    isocheck::core::init_tracing(false, &level);
}

/// Merge command line flags over the optional config file.
fn resolve_config(cli: &Cli) -> Result<ValidateConfig, Box<dyn Error>> {
    let mut cfg = match &cli.config {
        Some(path) => ValidateConfig::load_json(path)?,
        None => {
            let candidate = cli
                .candidate
                .as_ref()
                .ok_or("a candidate image or --config is required")?;
            ValidateConfig::new(candidate.to_string_lossy())
        }
    };
    if let Some(candidate) = &cli.candidate {
        cfg.candidate_path = candidate.to_string_lossy().into_owned();
    }
    if !cli.templates.is_empty() {
        cfg.template_paths = cli
            .templates
            .iter()
            .map(|p| p.to_string_lossy().into_owned())
            .collect();
    }
    if cli.crop.is_some() {
        cfg.crop = cli.crop;
    }
    if let Some(report) = &cli.report {
        cfg.report_path = Some(report.to_string_lossy().into_owned());
    }
    if let Some(debug_image) = &cli.debug_image {
        cfg.debug_image_path = Some(debug_image.to_string_lossy().into_owned());
    }
    Ok(cfg)
}

fn load_inputs(cfg: &ValidateConfig) -> Result<(PixelBuffer, Vec<PixelBuffer>), Box<dyn Error>> {
    let source = load_pixel_buffer(&cfg.candidate_path)?;
    let candidate = match cfg.crop {
        Some(crop) => crop.apply(&source)?,
        None => source,
    };
    let templates = cfg
        .template_paths
        .iter()
        .map(load_pixel_buffer)
        .collect::<Result<Vec<_>, _>>()?;
    Ok((candidate, templates))
}

fn run(cli: Cli) -> Result<bool, Box<dyn Error>> {
    let cfg = resolve_config(&cli)?;
    let mut report = ValidationReport::new(&cfg);

    let outcome = load_inputs(&cfg).and_then(|(candidate, templates)| {
        info!(
            "validating {} ({}x{}) against {} template(s)",
            cfg.candidate_path,
            candidate.width(),
            candidate.height(),
            templates.len()
        );
        let result = IsoValidator::new(cfg.params.clone()).validate(&candidate, &templates)?;
        Ok((candidate, result))
    });

    let (candidate, result) = match outcome {
        Ok(ok) => ok,
        Err(err) => {
            if let Some(path) = cfg.report_path() {
                report.set_error(&err);
                report.write_json(path)?;
            }
            return Err(err);
        }
    };

    report.set_result(&result);
    if let Some(path) = cfg.report_path() {
        report.write_json(&path)?;
        info!("report written to {}", path.display());
    }
    if let Some(path) = cfg.debug_image_path() {
        write_debug_image(&path, &candidate, &result)?;
        info!("debug image written to {}", path.display());
    }

    let s = &result.subscores;
    println!(
        "{} total={:.3} (orthogonal_ratio={:.3} black_ratio={:.3} match_ratio={:.3} grid={:.3}, matches={})",
        if result.passed() { "PASS" } else { "FAIL" },
        result.total(),
        s.orthogonal_ratio,
        s.black_ratio,
        s.match_ratio,
        s.grid,
        result.matches.boxes.len()
    );
    Ok(result.passed())
}
