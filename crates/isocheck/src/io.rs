//! JSON configuration and report helpers.

use std::{
    fmt, fs,
    path::{Path, PathBuf},
    str::FromStr,
};

use isocheck_core::{BoundingBox, BufferError, PixelBuffer};
use isocheck_lines::CoverageSummary;
use serde::{Deserialize, Serialize};

use crate::pipeline::{ValidationParams, ValidationResult};
use crate::score::Subscores;

#[derive(thiserror::Error, Debug)]
pub enum ConfigIoError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Region of the source image to validate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CropRect {
    pub x: usize,
    pub y: usize,
    pub width: usize,
    pub height: usize,
}

impl CropRect {
    pub fn apply(&self, source: &PixelBuffer) -> Result<PixelBuffer, BufferError> {
        source.crop(self.x, self.y, self.width, self.height)
    }
}

impl fmt::Display for CropRect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{},{}", self.x, self.y, self.width, self.height)
    }
}

impl FromStr for CropRect {
    type Err = String;

    /// Parse `X,Y,W,H`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts = s
            .split(',')
            .map(|p| p.trim().parse::<usize>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| format!("invalid crop '{s}': {e}"))?;
        match parts[..] {
            [x, y, width, height] => Ok(Self {
                x,
                y,
                width,
                height,
            }),
            _ => Err(format!("invalid crop '{s}': expected X,Y,W,H")),
        }
    }
}

/// Configuration for one validation run, loaded from JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidateConfig {
    pub candidate_path: String,
    #[serde(default)]
    pub template_paths: Vec<String>,
    #[serde(default)]
    pub crop: Option<CropRect>,
    #[serde(default)]
    pub report_path: Option<String>,
    #[serde(default)]
    pub debug_image_path: Option<String>,
    #[serde(default)]
    pub params: ValidationParams,
}

impl ValidateConfig {
    pub fn new(candidate_path: impl Into<String>) -> Self {
        Self {
            candidate_path: candidate_path.into(),
            template_paths: Vec::new(),
            crop: None,
            report_path: None,
            debug_image_path: None,
            params: ValidationParams::default(),
        }
    }

    /// Load a JSON config from disk.
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, ConfigIoError> {
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Write this config to disk as pretty JSON.
    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<(), ConfigIoError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    pub fn report_path(&self) -> Option<PathBuf> {
        self.report_path.as_ref().map(PathBuf::from)
    }

    pub fn debug_image_path(&self) -> Option<PathBuf> {
        self.debug_image_path.as_ref().map(PathBuf::from)
    }
}

/// Machine-readable summary of a validation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationReport {
    pub candidate_path: String,
    pub template_paths: Vec<String>,
    #[serde(default)]
    pub crop: Option<CropRect>,
    #[serde(default)]
    pub width: usize,
    #[serde(default)]
    pub height: usize,
    #[serde(default)]
    pub orthogonal_segments: usize,
    #[serde(default)]
    pub isometric_segments: usize,
    #[serde(default)]
    pub coverage: Option<CoverageSummary>,
    #[serde(default)]
    pub raw_match_count: usize,
    #[serde(default)]
    pub matches: Vec<BoundingBox>,
    /// Passing grid cells, indexed `[row][col]`.
    #[serde(default)]
    pub grid_pass: Vec<Vec<bool>>,
    #[serde(default)]
    pub subscores: Option<Subscores>,
    #[serde(default)]
    pub total: f32,
    #[serde(default)]
    pub pass: bool,
    #[serde(default)]
    pub error: Option<String>,
}

impl ValidationReport {
    /// Base report for a config, without results.
    pub fn new(cfg: &ValidateConfig) -> Self {
        Self {
            candidate_path: cfg.candidate_path.clone(),
            template_paths: cfg.template_paths.clone(),
            crop: cfg.crop,
            width: 0,
            height: 0,
            orthogonal_segments: 0,
            isometric_segments: 0,
            coverage: None,
            raw_match_count: 0,
            matches: Vec::new(),
            grid_pass: Vec::new(),
            subscores: None,
            total: 0.0,
            pass: false,
            error: None,
        }
    }

    /// Populate report fields from a successful run.
    pub fn set_result(&mut self, res: &ValidationResult) {
        self.width = res.width;
        self.height = res.height;
        self.orthogonal_segments = res.lines.orthogonal.len();
        self.isometric_segments = res.lines.isometric.len();
        self.coverage = Some(res.coverage);
        self.raw_match_count = res.matches.raw_count;
        self.matches = res.matches.boxes.clone();
        self.grid_pass = res.grid.pass_map();
        self.subscores = Some(res.subscores);
        self.total = res.verdict.total;
        self.pass = res.verdict.pass;
        self.error = None;
    }

    /// Record a failure; the run counts as not passing.
    pub fn set_error(&mut self, err: impl fmt::Display) {
        self.pass = false;
        self.error = Some(err.to_string());
    }

    /// Load a report from JSON on disk.
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, ConfigIoError> {
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Write this report to disk as pretty JSON.
    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<(), ConfigIoError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }
}
