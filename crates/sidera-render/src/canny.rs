//! Two-threshold gradient edge detector used to turn the soft skeleton into a control image.
//!
//! Pipeline:
//! - 3×3 Sobel gradients with replicated borders.
//! - L1 magnitude `|dx| + |dy|`.
//! - Non-maximum suppression along the gradient direction quantized to 0°/45°/90°/135°.
//! - Hysteresis: pixels above `high` seed edges that grow through 8-connected pixels above `low`.

use crate::color::{luma_to_rgb, rgb_to_luma};
use image::{GrayImage, RgbImage};
use sidera_core::EdgeThresholds;

/// `tan(22.5°)` in 15-bit fixed point.
const TG22: i64 = 13573;

pub const EDGE_VALUE: u8 = 255;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mark {
    None,
    Weak,
    Strong,
}

/// Runs [`canny_luma`] on the luma of `image` and replicates the edge map to three channels.
pub fn canny(image: &RgbImage, thresholds: EdgeThresholds) -> RgbImage {
    luma_to_rgb(&canny_luma(&rgb_to_luma(image), thresholds))
}

pub fn canny_luma(image: &GrayImage, thresholds: EdgeThresholds) -> GrayImage {
    let (w, h) = image.dimensions();
    let (width, height) = (w as usize, h as usize);
    let (mut low, mut high) = (
        thresholds.low.floor() as i32,
        thresholds.high.floor() as i32,
    );
    if low > high {
        std::mem::swap(&mut low, &mut high);
    }

    let src = image.as_raw();
    let sample = |x: isize, y: isize| -> i32 {
        let cx = x.clamp(0, width as isize - 1) as usize;
        let cy = y.clamp(0, height as isize - 1) as usize;
        i32::from(src[cy * width + cx])
    };

    let n = width * height;
    let mut dx = vec![0i32; n];
    let mut dy = vec![0i32; n];
    let mut mag = vec![0i32; n];
    for y in 0..height {
        for x in 0..width {
            let (xi, yi) = (x as isize, y as isize);
            let gx = sample(xi + 1, yi - 1) + 2 * sample(xi + 1, yi) + sample(xi + 1, yi + 1)
                - sample(xi - 1, yi - 1)
                - 2 * sample(xi - 1, yi)
                - sample(xi - 1, yi + 1);
            let gy = sample(xi - 1, yi + 1) + 2 * sample(xi, yi + 1) + sample(xi + 1, yi + 1)
                - sample(xi - 1, yi - 1)
                - 2 * sample(xi, yi - 1)
                - sample(xi + 1, yi - 1);
            let i = y * width + x;
            dx[i] = gx;
            dy[i] = gy;
            mag[i] = gx.abs() + gy.abs();
        }
    }

    // Magnitude outside the image reads as zero.
    let mag_at = |x: isize, y: isize| -> i32 {
        if x < 0 || y < 0 || x >= width as isize || y >= height as isize {
            0
        } else {
            mag[y as usize * width + x as usize]
        }
    };

    let mut marks = vec![Mark::None; n];
    let mut stack = Vec::new();
    for y in 0..height {
        for x in 0..width {
            let i = y * width + x;
            let m = mag[i];
            if m <= low {
                continue;
            }
            let (xi, yi) = (x as isize, y as isize);
            let (gx, gy) = (dx[i], dy[i]);
            let ax = i64::from(gx.abs());
            let ay = i64::from(gy.abs()) << 15;
            let tg22x = ax * TG22;

            let is_peak = if ay < tg22x {
                m > mag_at(xi - 1, yi) && m >= mag_at(xi + 1, yi)
            } else {
                let tg67x = tg22x + (ax << 16);
                if ay > tg67x {
                    m > mag_at(xi, yi - 1) && m >= mag_at(xi, yi + 1)
                } else {
                    let s: isize = if (gx ^ gy) < 0 { -1 } else { 1 };
                    m > mag_at(xi - s, yi - 1) && m > mag_at(xi + s, yi + 1)
                }
            };
            if !is_peak {
                continue;
            }

            if m > high {
                marks[i] = Mark::Strong;
                stack.push(i);
            } else {
                marks[i] = Mark::Weak;
            }
        }
    }

    while let Some(i) = stack.pop() {
        let (x, y) = ((i % width) as isize, (i / width) as isize);
        for ny in y - 1..=y + 1 {
            for nx in x - 1..=x + 1 {
                if nx < 0 || ny < 0 || nx >= width as isize || ny >= height as isize {
                    continue;
                }
                let j = ny as usize * width + nx as usize;
                if marks[j] == Mark::Weak {
                    marks[j] = Mark::Strong;
                    stack.push(j);
                }
            }
        }
    }

    let mut out = GrayImage::new(w, h);
    let dst: &mut [u8] = &mut out;
    for (px, mark) in dst.iter_mut().zip(&marks) {
        if *mark == Mark::Strong {
            *px = EDGE_VALUE;
        }
    }
    out
}
