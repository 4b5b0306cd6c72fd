use crate::constants::MAX_PIXELS;
use crate::errors::TransformError;
use crate::transform::orientation::{apply_orientation, read_orientation, Orientation};
use image::{DynamicImage, ImageReader};
use std::io::Cursor;

/// 画像バイト列をデコードする
///
/// EXIF Orientation があれば適用した上で返す（ブラウザの描画と同じ向きにする）
pub fn decode_image(input: &[u8]) -> Result<DynamicImage, TransformError> {
    let reader = ImageReader::new(Cursor::new(input))
        .with_guessed_format()
        .map_err(|e| TransformError::DecodeFailed(format!("failed to guess format: {e}")))?;

    if reader.format().is_none() {
        return Err(TransformError::DecodeFailed(
            "unsupported image format".to_string(),
        ));
    }

    let img = reader
        .decode()
        .map_err(|e| TransformError::DecodeFailed(e.to_string()))?;

    validate_source_dimensions(img.width(), img.height())?;

    let orientation = read_orientation(input).unwrap_or(Orientation::Normal);
    Ok(apply_orientation(img, orientation))
}

/// ソース画像の総ピクセル数を検証する
fn validate_source_dimensions(width: u32, height: u32) -> Result<(), TransformError> {
    let total_pixels = width as u64 * height as u64;
    if total_pixels > MAX_PIXELS {
        return Err(TransformError::ResolutionTooLarge { width, height });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transform::orientation::with_orientation_tag;
    use image::ImageFormat;

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let mut buf = Cursor::new(Vec::new());
        DynamicImage::new_rgb8(width, height)
            .write_to(&mut buf, ImageFormat::Png)
            .unwrap();
        buf.into_inner()
    }

    #[test]
    fn test_decode_png() {
        let img = decode_image(&png_bytes(32, 16)).unwrap();
        assert_eq!(img.width(), 32);
        assert_eq!(img.height(), 16);
    }

    #[test]
    fn test_decode_garbage() {
        let result = decode_image(b"definitely not an image");
        assert!(matches!(result, Err(TransformError::DecodeFailed(_))));
    }

    #[test]
    fn test_decode_truncated_png() {
        let bytes = png_bytes(64, 64);
        let result = decode_image(&bytes[..bytes.len() / 2]);
        assert!(matches!(result, Err(TransformError::DecodeFailed(_))));
    }

    #[test]
    fn test_decode_applies_exif_orientation() {
        let mut buf = Cursor::new(Vec::new());
        DynamicImage::new_rgb8(40, 10)
            .write_to(&mut buf, ImageFormat::Jpeg)
            .unwrap();
        let tagged = with_orientation_tag(buf.get_ref(), 6);
        assert_eq!(read_orientation(&tagged), Some(Orientation::Rotate90));

        // 90度回転で幅と高さが入れ替わる
        let img = decode_image(&tagged).unwrap();
        assert_eq!((img.width(), img.height()), (10, 40));

        // タグがなければそのまま
        let img = decode_image(buf.get_ref()).unwrap();
        assert_eq!((img.width(), img.height()), (40, 10));
    }

    #[test]
    fn test_validate_source_dimensions() {
        assert!(validate_source_dimensions(4000, 2000).is_ok());
        assert!(matches!(
            validate_source_dimensions(100_000, 100_000),
            Err(TransformError::ResolutionTooLarge { .. })
        ));
    }
}
