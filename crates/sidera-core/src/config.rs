use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const OUTPUT_DIR_ENV: &str = "SIDERA_OUTPUT_DIR";

/// Canvas parameters for one guide render.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RenderOptions {
    pub width: u32,
    pub height: u32,
    /// Margin on each side, as a fraction of the canvas width. Must lie in `[0, 0.5)`.
    pub padding_ratio: f64,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            width: 1024,
            height: 1024,
            padding_ratio: 0.15,
        }
    }
}

impl RenderOptions {
    pub fn new(width: u32, height: u32, padding_ratio: f64) -> Self {
        Self {
            width,
            height,
            padding_ratio,
        }
    }

    /// Margin in pixels, `floor(width * padding_ratio)`.
    pub fn pad_px(&self) -> i64 {
        (f64::from(self.width) * self.padding_ratio).floor() as i64
    }

    /// Drawable `(width, height)` inside the symmetric margin. May be non-positive for
    /// configurations that [`RenderOptions::validate`] rejects.
    pub fn drawable_size(&self) -> (i64, i64) {
        let pad = self.pad_px();
        (
            i64::from(self.width) - 2 * pad,
            i64::from(self.height) - 2 * pad,
        )
    }

    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(Error::InvalidCanvas {
                width: self.width,
                height: self.height,
            });
        }
        let ratio = self.padding_ratio;
        if !ratio.is_finite() || !(0.0..0.5).contains(&ratio) {
            return Err(Error::InvalidPadding { ratio });
        }
        let (dw, dh) = self.drawable_size();
        if dw <= 0 || dh <= 0 {
            return Err(Error::InvalidPadding { ratio });
        }
        Ok(())
    }
}

/// Hysteresis thresholds for the edge-detection post-process.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EdgeThresholds {
    pub low: f64,
    pub high: f64,
}

impl Default for EdgeThresholds {
    fn default() -> Self {
        Self {
            low: 50.0,
            high: 150.0,
        }
    }
}

/// Parameters forwarded to the image generator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GenerationParams {
    pub steps: u32,
    pub guidance_scale: f32,
    /// How strongly the control image constrains the output, in `[0, 1]`.
    pub conditioning_strength: f32,
    pub seed: u64,
    pub edge_thresholds: EdgeThresholds,
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            steps: 30,
            guidance_scale: 7.5,
            conditioning_strength: 0.5,
            seed: 42,
            edge_thresholds: EdgeThresholds::default(),
        }
    }
}

impl GenerationParams {
    pub fn validate(&self) -> Result<()> {
        let s = self.conditioning_strength;
        if !(s.is_finite() && (0.0..=1.0).contains(&s)) {
            return Err(Error::InvalidConfig {
                message: format!("conditioning strength {s} is outside [0, 1]"),
            });
        }
        if self.steps == 0 {
            return Err(Error::InvalidConfig {
                message: "generation needs at least one step".to_string(),
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct OutputOptions {
    pub root: PathBuf,
    pub url_prefix: String,
}

impl Default for OutputOptions {
    fn default() -> Self {
        Self {
            root: PathBuf::from("public").join("constellations"),
            url_prefix: "/constellations".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SideraConfig {
    pub render: RenderOptions,
    pub generation: GenerationParams,
    pub output: OutputOptions,
}

impl SideraConfig {
    pub fn from_json_str(text: &str) -> Result<Self> {
        let cfg: Self = serde_json::from_str(text).map_err(|e| Error::InvalidConfig {
            message: e.to_string(),
        })?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| Error::InvalidConfig {
            message: format!("{}: {e}", path.display()),
        })?;
        Self::from_json_str(&text)
    }

    pub fn validate(&self) -> Result<()> {
        self.render.validate()?;
        self.generation.validate()
    }

    /// Applies overrides from the process environment.
    pub fn apply_env(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(dir) = lookup(OUTPUT_DIR_ENV).filter(|v| !v.trim().is_empty()) {
            tracing::debug!(dir = %dir, "output root overridden from environment");
            self.output.root = PathBuf::from(dir);
        }
    }
}
