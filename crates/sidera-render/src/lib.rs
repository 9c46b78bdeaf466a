#![forbid(unsafe_code)]

//! Deterministic projection and guide-image rendering for constellation graphs.
//!
//! The pipeline is pure: every call allocates its own canvas and pixel map, never mutates its
//! inputs and keeps nothing after returning, so independent requests can render concurrently.
//!
//! - [`project`] maps nodes onto the padded canvas (orthographic, y flipped, truncated).
//! - [`render_skeleton`] draws edges and glowing nodes, then smooths the result.
//! - [`canny`] turns a skeleton into a sharp edge map for use as a control image.

pub mod blur;
pub mod canny;
pub mod color;
pub mod project;
pub mod raster;
pub mod skeleton;

pub use canny::{canny, canny_luma};
pub use color::{luma_to_rgb, rgb_to_luma};
pub use image::{GrayImage, RgbImage};
pub use project::{DEGENERATE_AXIS_RANGE, PixelMap, PixelPosition, ProjectionBounds, project};
pub use raster::encode_png;
pub use skeleton::{render_skeleton, render_skeleton_luma};

use sidera_core::{Constellation, EdgeThresholds, RenderOptions};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Input(#[from] sidera_core::Error),
    #[error("failed to allocate a {width}x{height} canvas")]
    PixmapAlloc { width: u32, height: u32 },
    #[error("failed to encode PNG")]
    PngEncode,
}

impl Error {
    /// The input-side class of this error, if it was caused by the request.
    pub fn input_class(&self) -> Option<sidera_core::ErrorClass> {
        match self {
            Error::Input(err) => Some(err.class()),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

/// Renders the skeleton and converts it into an edge-map control image.
pub fn render_control(
    constellation: &Constellation,
    options: &RenderOptions,
    thresholds: EdgeThresholds,
) -> Result<RgbImage> {
    let skeleton = render_skeleton(constellation, options)?;
    Ok(canny(&skeleton, thresholds))
}
