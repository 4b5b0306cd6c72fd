use crate::errors::TransformError;
use fast_image_resize::{images::Image, FilterType, PixelType, ResizeAlg, ResizeOptions, Resizer};
use image::{DynamicImage, RgbImage};

/// 画像を指定寸法の RGB ラスタに描画する
///
/// 透過ピクセルは黒背景に合成する（canvas の JPEG 出力と同じ）。
/// 寸法が同じ場合はリサイズせずに合成のみ行う
pub fn render_raster(
    img: &DynamicImage,
    target_w: u32,
    target_h: u32,
) -> Result<RgbImage, TransformError> {
    let rgb = flatten_onto_black(img);
    if rgb.width() == target_w && rgb.height() == target_h {
        return Ok(rgb);
    }

    let (width, height) = rgb.dimensions();
    let src_image = Image::from_vec_u8(width, height, rgb.into_raw(), PixelType::U8x3)
        .map_err(|e| TransformError::ProcessingFailed(format!("failed to create source image: {e}")))?;

    let mut dst_image = Image::new(target_w, target_h, PixelType::U8x3);

    // Lanczos3 で縮小
    let mut resizer = Resizer::new();
    resizer
        .resize(
            &src_image,
            &mut dst_image,
            &ResizeOptions::new().resize_alg(ResizeAlg::Convolution(FilterType::Lanczos3)),
        )
        .map_err(|e| TransformError::ProcessingFailed(format!("resize failed: {e}")))?;

    RgbImage::from_raw(target_w, target_h, dst_image.into_vec()).ok_or_else(|| {
        TransformError::ProcessingFailed("failed to convert resized image".to_string())
    })
}

fn flatten_onto_black(img: &DynamicImage) -> RgbImage {
    if !img.color().has_alpha() {
        return img.to_rgb8();
    }

    let rgba = img.to_rgba8();
    let (width, height) = rgba.dimensions();
    let mut rgb = RgbImage::new(width, height);
    for (dst, src) in rgb.pixels_mut().zip(rgba.pixels()) {
        let [r, g, b, a] = src.0;
        let blend = |c: u8| ((c as u16 * a as u16 + 127) / 255) as u8;
        dst.0 = [blend(r), blend(g), blend(b)];
    }
    rgb
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};

    #[test]
    fn test_render_raster_downscale() {
        let img = DynamicImage::new_rgb8(400, 200);
        let raster = render_raster(&img, 192, 96).unwrap();
        assert_eq!(raster.dimensions(), (192, 96));
    }

    #[test]
    fn test_render_raster_same_size() {
        let img = DynamicImage::new_rgb8(64, 48);
        let raster = render_raster(&img, 64, 48).unwrap();
        assert_eq!(raster.dimensions(), (64, 48));
    }

    #[test]
    fn test_transparent_pixels_become_black() {
        let mut rgba = RgbaImage::new(2, 1);
        rgba.put_pixel(0, 0, Rgba([255, 255, 255, 0]));
        rgba.put_pixel(1, 0, Rgba([200, 100, 50, 255]));

        let raster = render_raster(&DynamicImage::ImageRgba8(rgba), 2, 1).unwrap();
        assert_eq!(raster.get_pixel(0, 0).0, [0, 0, 0]);
        assert_eq!(raster.get_pixel(1, 0).0, [200, 100, 50]);
    }
}
