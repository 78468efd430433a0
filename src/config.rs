//! Collage configuration types.
//!
//! A [`CollageConfig`] selects the page layout strategy, the cell sizing
//! policy, and the canvas/encoding constants. All fields have defaults, so
//! an empty YAML document is a valid configuration.
//!
//! # Configuration Example
//!
//! ```yaml
//! layout:
//!   mode: fixed-chunk
//!   chunk_size: 4
//! sizing:
//!   policy: square-crop
//!   size: 500
//! gap: 15
//! border_width: 3
//! format: jpeg
//! quality: 92
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::constants::{
    DEFAULT_BORDER_WIDTH, DEFAULT_CHUNK_SIZE, DEFAULT_FETCH_TIMEOUT_SECS, DEFAULT_FIT_TARGET,
    DEFAULT_GAP, DEFAULT_MAX_DIMENSION, DEFAULT_MIN_DIMENSION, DEFAULT_PHOTO_HEIGHT,
    DEFAULT_PHOTO_WIDTH, DEFAULT_QUALITY, DEFAULT_SQUARE_SIZE,
};
use crate::encoder::OutputFormat;

// Default values
fn default_chunk_size() -> usize {
    DEFAULT_CHUNK_SIZE
}

fn default_square_size() -> u32 {
    DEFAULT_SQUARE_SIZE
}

fn default_fit_target() -> u32 {
    DEFAULT_FIT_TARGET
}

fn default_min_dimension() -> u32 {
    DEFAULT_MIN_DIMENSION
}

fn default_max_dimension() -> u32 {
    DEFAULT_MAX_DIMENSION
}

fn default_photo_width() -> u32 {
    DEFAULT_PHOTO_WIDTH
}

fn default_photo_height() -> u32 {
    DEFAULT_PHOTO_HEIGHT
}

fn default_gap() -> u32 {
    DEFAULT_GAP
}

fn default_border_width() -> u32 {
    DEFAULT_BORDER_WIDTH
}

fn default_format() -> OutputFormat {
    OutputFormat::Jpeg
}

fn default_quality() -> u8 {
    DEFAULT_QUALITY
}

fn default_fetch_timeout_secs() -> u64 {
    DEFAULT_FETCH_TIMEOUT_SECS
}

/// How loaded images are grouped into pages.
///
/// Uses a serde tag to distinguish between modes in YAML:
/// ```yaml
/// layout:
///   mode: fixed-chunk
///   chunk_size: 4
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "kebab-case")]
pub enum LayoutStrategy {
    /// Pages of exactly `chunk_size` images; the final page holds the rest.
    FixedChunk {
        #[serde(default = "default_chunk_size")]
        chunk_size: usize,
    },
    /// One page holding every image, organized into rows of varying width.
    AsymmetricRows,
}

impl Default for LayoutStrategy {
    fn default() -> Self {
        LayoutStrategy::FixedChunk {
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }
}

/// How each image is sized for its cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "policy", rename_all = "kebab-case")]
pub enum SizingPolicy {
    /// Crop the largest centered square, then scale to `size`×`size`.
    SquareCrop {
        #[serde(default = "default_square_size")]
        size: u32,
    },
    /// Scale the longer edge toward `target`, keeping both output
    /// dimensions within [`min_dimension`, `max_dimension`].
    AspectFit {
        #[serde(default = "default_fit_target")]
        target: u32,
        #[serde(default = "default_min_dimension")]
        min_dimension: u32,
        #[serde(default = "default_max_dimension")]
        max_dimension: u32,
    },
    /// Scale to a fixed size regardless of aspect ratio.
    FullBleed {
        #[serde(default = "default_photo_width")]
        width: u32,
        #[serde(default = "default_photo_height")]
        height: u32,
    },
}

impl Default for SizingPolicy {
    fn default() -> Self {
        SizingPolicy::SquareCrop {
            size: DEFAULT_SQUARE_SIZE,
        }
    }
}

/// Top-level collage configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollageConfig {
    /// Page grouping strategy
    #[serde(default)]
    pub layout: LayoutStrategy,

    /// Cell sizing policy
    #[serde(default)]
    pub sizing: SizingPolicy,

    /// Pixel spacing between cells and around the canvas edge
    #[serde(default = "default_gap")]
    pub gap: u32,

    /// Border stroke width around each placed image
    #[serde(default = "default_border_width")]
    pub border_width: u32,

    /// Output encoding format for finished pages
    #[serde(default = "default_format")]
    pub format: OutputFormat,

    /// Output quality for lossy formats (1-100)
    #[serde(default = "default_quality")]
    pub quality: u8,

    /// Per-image download timeout in seconds
    #[serde(default = "default_fetch_timeout_secs")]
    pub fetch_timeout_secs: u64,
}

impl Default for CollageConfig {
    fn default() -> Self {
        Self {
            layout: LayoutStrategy::default(),
            sizing: SizingPolicy::default(),
            gap: DEFAULT_GAP,
            border_width: DEFAULT_BORDER_WIDTH,
            format: OutputFormat::Jpeg,
            quality: DEFAULT_QUALITY,
            fetch_timeout_secs: DEFAULT_FETCH_TIMEOUT_SECS,
        }
    }
}

impl CollageConfig {
    /// Parse a configuration from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self, String> {
        let config: CollageConfig =
            serde_yaml::from_str(yaml).map_err(|e| format!("Failed to parse config: {}", e))?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration from a YAML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, String> {
        let yaml = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config file: {}", e))?;
        Self::from_yaml(&yaml)
    }

    /// Check cross-field invariants that serde defaults cannot enforce.
    pub fn validate(&self) -> Result<(), String> {
        if self.quality == 0 || self.quality > 100 {
            return Err(format!("quality must be 1-100, got {}", self.quality));
        }
        if self.gap < self.border_width {
            return Err(format!(
                "gap ({}) must be at least border_width ({}) so borders stay inside the canvas",
                self.gap, self.border_width
            ));
        }
        match &self.layout {
            LayoutStrategy::FixedChunk { chunk_size } if *chunk_size == 0 => {
                return Err("chunk_size must be at least 1".to_string());
            }
            _ => {}
        }
        match &self.sizing {
            SizingPolicy::SquareCrop { size } if *size == 0 => {
                return Err("square size must be positive".to_string());
            }
            SizingPolicy::FullBleed { width, height } if *width == 0 || *height == 0 => {
                return Err("full-bleed dimensions must be positive".to_string());
            }
            SizingPolicy::AspectFit {
                target,
                min_dimension,
                max_dimension,
            } => {
                if *min_dimension == 0 || *max_dimension < *min_dimension {
                    return Err(format!(
                        "aspect-fit bounds invalid: min {} max {}",
                        min_dimension, max_dimension
                    ));
                }
                if *target == 0 {
                    return Err("aspect-fit target must be positive".to_string());
                }
            }
            _ => {}
        }
        Ok(())
    }
}
