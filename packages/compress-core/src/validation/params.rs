use crate::errors::TransformError;
use crate::transform::CompressionOptions;

/// 再圧縮パラメータを検証する
pub fn validate_options(options: &CompressionOptions) -> Result<(), TransformError> {
    if !(options.quality > 0.0 && options.quality <= 1.0) {
        return Err(TransformError::InvalidParams(format!(
            "quality must be in (0, 1], got {}",
            options.quality
        )));
    }

    if options.max_width == 0 || options.max_height == 0 {
        return Err(TransformError::InvalidParams(format!(
            "bounding box must be non-empty, got {}x{}",
            options.max_width, options.max_height
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options_valid() {
        assert!(validate_options(&CompressionOptions::default()).is_ok());
    }

    #[test]
    fn test_invalid_quality() {
        for quality in [0.0, -0.5, 1.01, f32::NAN] {
            let options = CompressionOptions {
                quality,
                ..CompressionOptions::default()
            };
            assert!(validate_options(&options).is_err(), "quality = {quality}");
        }
    }

    #[test]
    fn test_invalid_bounds() {
        let options = CompressionOptions {
            max_width: 0,
            ..CompressionOptions::default()
        };
        assert!(validate_options(&options).is_err());
    }
}
