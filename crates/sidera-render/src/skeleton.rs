//! Line-and-glow guide image.
//!
//! Draw order is part of the output: edges first, then every node's glow from the outermost
//! ring inward, so later shapes cover earlier ones.

use crate::blur::gaussian_blur_3x3;
use crate::color::luma_to_rgb;
use crate::project::{PixelMap, PixelPosition, project};
use crate::{Error, Result};
use image::{GrayImage, Luma, RgbImage};
use sidera_core::{Constellation, Edge, RenderOptions};
use tiny_skia::{Color, FillRule, LineCap, Paint, PathBuilder, Pixmap, Stroke, Transform};

pub const EDGE_INTENSITY: u8 = 255;
pub const EDGE_STROKE_WIDTH: f32 = 2.0;

/// `(radius, intensity)` rings drawn for every node, in order.
pub const NODE_GLOW: [(f32, u8); 3] = [(12.0, 80), (8.0, 150), (4.0, 255)];

/// Renders the smoothed guide image as three identical channels.
pub fn render_skeleton(constellation: &Constellation, options: &RenderOptions) -> Result<RgbImage> {
    let luma = render_skeleton_luma(constellation, options)?;
    Ok(luma_to_rgb(&luma))
}

/// Single-channel variant of [`render_skeleton`].
pub fn render_skeleton_luma(
    constellation: &Constellation,
    options: &RenderOptions,
) -> Result<GrayImage> {
    options.validate()?;
    constellation.validate()?;

    let (width, height) = (options.width, options.height);
    let mut pixmap = Pixmap::new(width, height).ok_or(Error::PixmapAlloc { width, height })?;
    pixmap.fill(Color::BLACK);
    if constellation.is_empty() {
        return Ok(pixmap_to_luma(&pixmap));
    }

    let positions = project(&constellation.nodes, options)?;

    let mut dropped = 0usize;
    for edge in &constellation.edges {
        let Some((from, to)) = resolve_edge(&positions, edge) else {
            dropped += 1;
            continue;
        };
        stroke_edge(&mut pixmap, from, to);
    }

    for &center in positions.values() {
        for (radius, intensity) in NODE_GLOW {
            fill_disc(&mut pixmap, center, radius, intensity);
        }
    }

    tracing::debug!(
        nodes = positions.len(),
        edges = constellation.edges.len() - dropped,
        dropped_edges = dropped,
        width,
        height,
        "rendered constellation skeleton"
    );

    Ok(gaussian_blur_3x3(&pixmap_to_luma(&pixmap)))
}

/// Looks up both endpoints of `edge`.
///
/// Returns `None` for an edge that names an unknown node; such edges are skipped, not errors.
pub fn resolve_edge(positions: &PixelMap, edge: &Edge) -> Option<(PixelPosition, PixelPosition)> {
    let from = positions.get(&edge.source)?;
    let to = positions.get(&edge.target)?;
    Some((*from, *to))
}

// Integer pixel positions address pixel centers.
fn pixel_center(p: PixelPosition) -> (f32, f32) {
    (p.x as f32 + 0.5, p.y as f32 + 0.5)
}

fn gray_paint(intensity: u8) -> Paint<'static> {
    let mut paint = Paint::default();
    paint.set_color_rgba8(intensity, intensity, intensity, 255);
    paint.anti_alias = true;
    paint
}

fn stroke_edge(pixmap: &mut Pixmap, from: PixelPosition, to: PixelPosition) {
    let (x0, y0) = pixel_center(from);
    let (x1, y1) = pixel_center(to);
    let mut pb = PathBuilder::new();
    pb.move_to(x0, y0);
    pb.line_to(x1, y1);
    // Coincident endpoints produce no path; the node glow covers that spot anyway.
    let Some(path) = pb.finish() else {
        return;
    };
    let stroke = Stroke {
        width: EDGE_STROKE_WIDTH,
        line_cap: LineCap::Round,
        ..Stroke::default()
    };
    pixmap.stroke_path(
        &path,
        &gray_paint(EDGE_INTENSITY),
        &stroke,
        Transform::identity(),
        None,
    );
}

fn fill_disc(pixmap: &mut Pixmap, center: PixelPosition, radius: f32, intensity: u8) {
    let (cx, cy) = pixel_center(center);
    let Some(path) = PathBuilder::from_circle(cx, cy, radius) else {
        return;
    };
    pixmap.fill_path(
        &path,
        &gray_paint(intensity),
        FillRule::Winding,
        Transform::identity(),
        None,
    );
}

// The canvas is opaque gray, so the red channel carries the intensity.
fn pixmap_to_luma(pixmap: &Pixmap) -> GrayImage {
    GrayImage::from_fn(pixmap.width(), pixmap.height(), |x, y| {
        Luma([pixmap.pixel(x, y).map_or(0, |c| c.red())])
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use sidera_core::Node;

    #[test]
    fn resolve_edge_skips_unknown_endpoints() {
        let nodes = [Node::new("a", 0.0, 0.0, 0.0), Node::new("b", 1.0, 1.0, 0.0)];
        let positions = project(&nodes, &RenderOptions::default()).unwrap();
        assert!(resolve_edge(&positions, &Edge::new("a", "b")).is_some());
        assert!(resolve_edge(&positions, &Edge::new("a", "zz")).is_none());
        assert!(resolve_edge(&positions, &Edge::new("zz", "b")).is_none());
    }

    #[test]
    fn node_core_is_bright_and_glow_is_dimmer() {
        let c = Constellation::new(vec![Node::new("solo", 0.0, 0.0, 0.0)], vec![]);
        let options = RenderOptions::new(128, 128, 0.25);
        let img = render_skeleton_luma(&c, &options).unwrap();
        // Degenerate on both axes: x at the left pad, y flipped to the bottom of the drawable area.
        let (cx, cy) = (32u32, 96u32);
        assert!(img.get_pixel(cx, cy)[0] >= 250);
        let glow = img.get_pixel(cx + 10, cy)[0];
        assert!((60..=100).contains(&glow), "glow ring value {glow}");
        let mid = img.get_pixel(cx + 6, cy)[0];
        assert!((130..=170).contains(&mid), "middle ring value {mid}");
        assert_eq!(img.get_pixel(cx + 20, cy)[0], 0);
    }

    #[test]
    fn edge_is_drawn_between_projected_points() {
        let c = Constellation::new(
            vec![Node::new("a", 0.0, 0.0, 0.0), Node::new("b", 10.0, 0.0, 0.0)],
            vec![Edge::new("a", "b")],
        );
        let options = RenderOptions::new(200, 100, 0.1);
        let img = render_skeleton_luma(&c, &options).unwrap();
        // pad = 20; both nodes on the bottom row of the drawable area (y = 80).
        assert!(img.get_pixel(100, 80)[0] > 150);
        assert_eq!(img.get_pixel(100, 60)[0], 0);
    }
}
