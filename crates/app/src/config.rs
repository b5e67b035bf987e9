use labeler_core::{DEFAULT_RESOLUTION, ResolutionRange};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Zoom limits, in sample frames per pixel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasResolution {
    pub default: u32,
    pub min: u32,
    pub max: u32,
    pub step: u32,
}

impl Default for CanvasResolution {
    fn default() -> Self {
        Self {
            default: DEFAULT_RESOLUTION,
            min: 10,
            max: 400,
            step: 20,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub canvas_resolution: CanvasResolution,
    /// Device pixel ratio applied to grab radii and label sizes.
    pub density: f64,
    pub waveforms_height_ratio: f64,
    pub canvas_height: f64,
    /// Width of the visible part of the canvas, in pixels.
    pub screen_width: f64,
    /// Edit every entry of the current sample at once on continuous labelers.
    pub multiple_edit: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            canvas_resolution: CanvasResolution::default(),
            density: 1.0,
            waveforms_height_ratio: 0.5,
            canvas_height: 400.0,
            screen_width: 1000.0,
            multiple_edit: false,
        }
    }
}

impl Config {
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("labeler").join("config.toml"))
    }

    pub fn load() -> Self {
        let Some(path) = Self::config_path() else {
            return Self::default();
        };

        match fs::read_to_string(&path) {
            Ok(contents) => Self::parse(&contents),
            Err(_) => Self::default(),
        }
    }

    /// Parses a config file, falling back to defaults if it is invalid.
    pub fn parse(contents: &str) -> Self {
        toml::from_str(contents).unwrap_or_else(|e| {
            log::warn!("Ignoring invalid config: {e}");
            Self::default()
        })
    }

    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// The configured zoom range, repaired so that it is never empty.
    pub fn resolution_range(&self) -> ResolutionRange {
        let r = self.canvas_resolution;
        let min = r.min.max(1);
        ResolutionRange::new(min, r.max.max(min), r.step.max(1))
    }

    pub fn default_resolution(&self) -> u32 {
        self.resolution_range().clamp(self.canvas_resolution.default)
    }
}
