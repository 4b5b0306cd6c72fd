use crate::errors::TransformError;
use image::codecs::jpeg::JpegEncoder;
use image::RgbImage;
use std::io::Cursor;

/// ラスタを JPEG にエンコードする
pub fn encode_jpeg(raster: &RgbImage, quality: u8) -> Result<Vec<u8>, TransformError> {
    let mut buf = Cursor::new(Vec::new());

    let encoder = JpegEncoder::new_with_quality(&mut buf, quality);
    raster
        .write_with_encoder(encoder)
        .map_err(|e| TransformError::ProcessingFailed(format!("JPEG encode failed: {e}")))?;

    Ok(buf.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_jpeg() {
        let raster = RgbImage::new(10, 10);
        let data = encode_jpeg(&raster, 70).unwrap();

        assert!(!data.is_empty());
        // SOI / EOI マーカー
        assert_eq!(&data[0..2], &[0xFF, 0xD8]);
        assert_eq!(&data[data.len() - 2..], &[0xFF, 0xD9]);
    }

    #[test]
    fn test_lower_quality_is_not_larger() {
        let raster = RgbImage::from_fn(64, 64, |x, y| {
            image::Rgb([(x * 4) as u8, (y * 4) as u8, ((x ^ y) * 4) as u8])
        });
        let high = encode_jpeg(&raster, 95).unwrap();
        let low = encode_jpeg(&raster, 30).unwrap();
        assert!(low.len() <= high.len());
    }
}
