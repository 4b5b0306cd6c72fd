use crate::constants::MAX_INPUT_SIZE;
use crate::errors::CompressError;
use crate::pipeline::ImageAsset;

/// 選択されたファイルを検証する
///
/// 画像の MIME タイプで、空でなく、10MiB 以下であること
pub fn validate_asset(asset: &ImageAsset) -> Result<(), CompressError> {
    if !asset.is_image() {
        return Err(CompressError::Validation(format!(
            "{} is not an image ({})",
            asset.file_name, asset.mime_type
        )));
    }

    if asset.bytes.is_empty() {
        return Err(CompressError::Validation(format!(
            "{} is empty",
            asset.file_name
        )));
    }

    let size = asset.size() as u64;
    if size > MAX_INPUT_SIZE {
        return Err(CompressError::Validation(format!(
            "{} is too large ({size} bytes, max {MAX_INPUT_SIZE})",
            asset.file_name
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_asset() {
        let asset = ImageAsset::new("a.png", vec![1, 2, 3], "image/png");
        assert!(validate_asset(&asset).is_ok());
    }

    #[test]
    fn test_non_image_rejected() {
        let asset = ImageAsset::new("a.pdf", vec![1, 2, 3], "application/pdf");
        assert!(matches!(
            validate_asset(&asset),
            Err(CompressError::Validation(_))
        ));
    }

    #[test]
    fn test_empty_rejected() {
        let asset = ImageAsset::new("a.png", Vec::new(), "image/png");
        assert!(validate_asset(&asset).is_err());
    }

    #[test]
    fn test_size_limit() {
        let at_limit = ImageAsset::new("a.jpg", vec![0; MAX_INPUT_SIZE as usize], "image/jpeg");
        assert!(validate_asset(&at_limit).is_ok());

        let over = ImageAsset::new("a.jpg", vec![0; MAX_INPUT_SIZE as usize + 1], "image/jpeg");
        assert!(validate_asset(&over).is_err());
    }
}
