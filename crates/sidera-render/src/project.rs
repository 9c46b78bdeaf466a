//! Orthographic top-down projection of constellation nodes onto the padded canvas.
//!
//! Depth is dropped, x/y are normalized against the per-request bounds, the y axis is flipped
//! (source space grows upward, canvas space grows downward) and the result is scaled into the
//! drawable rectangle with truncation toward zero.

use crate::Result;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use sidera_core::{Error as InputError, Node, RenderOptions, validate_positions};

/// Range substituted on an axis whose nodes all share one coordinate.
///
/// With a zero numerator this places every node on the padded origin of that axis (left column
/// for x; bottom row for y after the flip) instead of centering it.
pub const DEGENERATE_AXIS_RANGE: f64 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PixelPosition {
    pub x: u32,
    pub y: u32,
}

/// Node id to pixel position, in first-seen node order.
pub type PixelMap = IndexMap<String, PixelPosition>;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectionBounds {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
}

impl ProjectionBounds {
    pub fn from_nodes(nodes: &[Node]) -> Option<Self> {
        let mut it = nodes.iter().map(|n| (n.position.x, n.position.y));
        let (x0, y0) = it.next()?;
        let mut b = Self {
            min_x: x0,
            max_x: x0,
            min_y: y0,
            max_y: y0,
        };
        for (x, y) in it {
            b.min_x = b.min_x.min(x);
            b.max_x = b.max_x.max(x);
            b.min_y = b.min_y.min(y);
            b.max_y = b.max_y.max(y);
        }
        Some(b)
    }

    pub fn range_x(&self) -> f64 {
        axis_range(self.min_x, self.max_x)
    }

    pub fn range_y(&self) -> f64 {
        axis_range(self.min_y, self.max_y)
    }

    /// Maps a source point into `[0, 1]²` with the y axis flipped.
    pub fn normalize(&self, x: f64, y: f64) -> (f64, f64) {
        let norm_x = (x - self.min_x) / self.range_x();
        let norm_y = (y - self.min_y) / self.range_y();
        (norm_x, 1.0 - norm_y)
    }
}

fn axis_range(min: f64, max: f64) -> f64 {
    if max == min {
        DEGENERATE_AXIS_RANGE
    } else {
        max - min
    }
}

/// Projects `nodes` onto the canvas described by `options`.
///
/// The canvas configuration is checked first, then the coordinates. An empty node list yields an
/// empty map. Duplicate ids keep their first-seen slot and take the last node's position.
/// With a zero margin the far edge is clamped onto the last row/column.
pub fn project(nodes: &[Node], options: &RenderOptions) -> Result<PixelMap> {
    options.validate()?;
    validate_positions(nodes)?;

    let Some(bounds) = ProjectionBounds::from_nodes(nodes) else {
        return Ok(PixelMap::new());
    };
    if !bounds.range_x().is_finite() {
        return Err(InputError::CoordinateOverflow { axis: 'x' }.into());
    }
    if !bounds.range_y().is_finite() {
        return Err(InputError::CoordinateOverflow { axis: 'y' }.into());
    }

    let pad = options.pad_px();
    let (draw_width, draw_height) = options.drawable_size();

    let (last_col, last_row) = (i64::from(options.width) - 1, i64::from(options.height) - 1);

    let mut out = PixelMap::with_capacity(nodes.len());
    for node in nodes {
        let (norm_x, norm_y) = bounds.normalize(node.position.x, node.position.y);
        // `as` truncates toward zero; both products are non-negative.
        let px = pad + (norm_x * draw_width as f64) as i64;
        let py = pad + (norm_y * draw_height as f64) as i64;
        // Only a zero margin can reach one past the last pixel.
        let pos = PixelPosition {
            x: px.min(last_col) as u32,
            y: py.min(last_row) as u32,
        };
        if out.insert(node.id.clone(), pos).is_some() {
            tracing::warn!(node_id = %node.id, "duplicate node id; last position wins");
        }
    }

    tracing::debug!(
        nodes = out.len(),
        pad,
        draw_width,
        draw_height,
        "projected constellation"
    );
    Ok(out)
}
