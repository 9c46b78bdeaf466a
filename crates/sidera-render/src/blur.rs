use image::GrayImage;

/// 3-tap Gaussian weights for a 3×3 kernel with sigma derived from the kernel size.
const KERNEL: [u32; 3] = [1, 2, 1];
/// Sum of the 2D kernel (`4 * 4`).
const KERNEL_NORM_SHIFT: u32 = 4;

/// Reflect-101 border: `-1 -> 1`, `n -> n - 2`. A single-pixel axis always maps to 0.
fn reflect101(i: isize, n: usize) -> usize {
    if n == 1 {
        return 0;
    }
    let n = n as isize;
    let r = if i < 0 {
        -i
    } else if i >= n {
        2 * n - 2 - i
    } else {
        i
    };
    r as usize
}

/// Separable 3×3 Gaussian smoothing with round-half-up integer arithmetic.
pub fn gaussian_blur_3x3(src: &GrayImage) -> GrayImage {
    let (w, h) = src.dimensions();
    let (width, height) = (w as usize, h as usize);
    let data = src.as_raw();

    let mut horizontal = vec![0u32; width * height];
    for y in 0..height {
        let row = &data[y * width..(y + 1) * width];
        for x in 0..width {
            let mut acc = 0u32;
            for (k, weight) in KERNEL.iter().enumerate() {
                let sx = reflect101(x as isize + k as isize - 1, width);
                acc += weight * u32::from(row[sx]);
            }
            horizontal[y * width + x] = acc;
        }
    }

    let mut out = GrayImage::new(w, h);
    let dst: &mut [u8] = &mut out;
    let half = 1u32 << (KERNEL_NORM_SHIFT - 1);
    for y in 0..height {
        for x in 0..width {
            let mut acc = 0u32;
            for (k, weight) in KERNEL.iter().enumerate() {
                let sy = reflect101(y as isize + k as isize - 1, height);
                acc += weight * horizontal[sy * width + x];
            }
            dst[y * width + x] = ((acc + half) >> KERNEL_NORM_SHIFT) as u8;
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Luma;

    #[test]
    fn reflect101_mirrors_without_repeating_the_edge() {
        assert_eq!(reflect101(-1, 5), 1);
        assert_eq!(reflect101(5, 5), 3);
        assert_eq!(reflect101(2, 5), 2);
        assert_eq!(reflect101(-1, 1), 0);
        assert_eq!(reflect101(1, 1), 0);
    }

    #[test]
    fn flat_image_is_unchanged() {
        let img = GrayImage::from_pixel(7, 4, Luma([123]));
        assert_eq!(gaussian_blur_3x3(&img), img);
    }

    #[test]
    fn single_bright_pixel_spreads_with_binomial_weights() {
        let mut img = GrayImage::new(5, 5);
        img.put_pixel(2, 2, Luma([160]));
        let out = gaussian_blur_3x3(&img);
        assert_eq!(out.get_pixel(2, 2)[0], 40); // 160 * 4 / 16
        assert_eq!(out.get_pixel(1, 2)[0], 20); // 160 * 2 / 16
        assert_eq!(out.get_pixel(1, 1)[0], 10); // 160 * 1 / 16
        assert_eq!(out.get_pixel(0, 0)[0], 0);
    }

    #[test]
    fn one_by_one_image_survives() {
        let img = GrayImage::from_pixel(1, 1, Luma([9]));
        assert_eq!(gaussian_blur_3x3(&img).get_pixel(0, 0)[0], 9);
    }
}
