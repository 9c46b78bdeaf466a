use crate::{Error, Result};
use image::{ExtendedColorType, ImageEncoder, RgbImage};

pub fn encode_png(image: &RgbImage) -> Result<Vec<u8>> {
    let (w, h) = image.dimensions();
    let mut out = Vec::new();
    image::codecs::png::PngEncoder::new(&mut out)
        .write_image(image.as_raw(), w, h, ExtendedColorType::Rgb8)
        .map_err(|_| Error::PngEncode)?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_png_produces_png_signature() {
        let bytes = encode_png(&RgbImage::new(4, 3)).unwrap();
        assert!(bytes.starts_with(b"\x89PNG\r\n\x1a\n"));
    }
}
