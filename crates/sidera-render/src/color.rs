use image::{GrayImage, Luma, Rgb, RgbImage};

// BT.601 luma weights in 14-bit fixed point.
const R_WEIGHT: u32 = 4899;
const G_WEIGHT: u32 = 9617;
const B_WEIGHT: u32 = 1868;
const SHIFT: u32 = 14;

/// Broadcasts a single channel into three identical channels.
pub fn luma_to_rgb(src: &GrayImage) -> RgbImage {
    let (w, h) = src.dimensions();
    RgbImage::from_fn(w, h, |x, y| {
        let v = src.get_pixel(x, y)[0];
        Rgb([v, v, v])
    })
}

pub fn rgb_to_luma(src: &RgbImage) -> GrayImage {
    let (w, h) = src.dimensions();
    GrayImage::from_fn(w, h, |x, y| {
        let [r, g, b] = src.get_pixel(x, y).0;
        let luma = (u32::from(r) * R_WEIGHT
            + u32::from(g) * G_WEIGHT
            + u32::from(b) * B_WEIGHT
            + (1 << (SHIFT - 1)))
            >> SHIFT;
        Luma([luma.min(255) as u8])
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gray_round_trips_through_rgb() {
        let gray = GrayImage::from_fn(16, 16, |x, y| Luma([(x * 16 + y) as u8]));
        assert_eq!(rgb_to_luma(&luma_to_rgb(&gray)), gray);
    }

    #[test]
    fn primaries_follow_bt601_weights() {
        let img = RgbImage::from_fn(3, 1, |x, _| match x {
            0 => Rgb([255, 0, 0]),
            1 => Rgb([0, 255, 0]),
            _ => Rgb([0, 0, 255]),
        });
        let luma = rgb_to_luma(&img);
        assert_eq!(luma.get_pixel(0, 0)[0], 76);
        assert_eq!(luma.get_pixel(1, 0)[0], 150);
        assert_eq!(luma.get_pixel(2, 0)[0], 29);
    }
}
