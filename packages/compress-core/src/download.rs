use crate::constants::DOWNLOAD_PREFIX;
use crate::pipeline::CompressionResult;
use std::fs;
use std::path::{Path, PathBuf};

/// 保存用のファイル名 `compressed_<stem>.jpg` を返す
///
/// 末尾の拡張子（`.` 以降に `/` と `.` を含まない部分）のみ取り除く
pub fn download_file_name(original: &str) -> String {
    let stem = match original.rfind('.') {
        Some(idx) if idx + 1 < original.len() && !original[idx + 1..].contains('/') => {
            &original[..idx]
        }
        _ => original,
    };
    format!("{DOWNLOAD_PREFIX}{stem}.jpg")
}

/// 結果をディレクトリに保存し、保存先パスを返す
pub fn save_result(result: &CompressionResult, dir: impl AsRef<Path>) -> std::io::Result<PathBuf> {
    let dir = dir.as_ref();
    fs::create_dir_all(dir)?;

    let path = dir.join(download_file_name(&result.file_name));
    fs::write(&path, &result.bytes)?;

    tracing::info!(path = %path.display(), bytes = result.byte_size, "saved compressed image");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;

    #[test]
    fn test_download_file_name() {
        assert_eq!(download_file_name("photo.png"), "compressed_photo.jpg");
        assert_eq!(download_file_name("holiday.final.jpeg"), "compressed_holiday.final.jpg");
        assert_eq!(download_file_name("README"), "compressed_README.jpg");
        assert_eq!(download_file_name("trailing."), "compressed_trailing..jpg");
        assert_eq!(download_file_name(".hidden"), "compressed_.jpg");
    }

    #[test]
    fn test_save_result() {
        let dir = std::env::temp_dir().join(format!("compress-download-{}", std::process::id()));
        let result = CompressionResult {
            file_name: "cat.webp".to_string(),
            bytes: Bytes::from_static(&[0xFF, 0xD8, 0xFF, 0xD9]),
            byte_size: 4,
            width: 1,
            height: 1,
            source_width: 1,
            source_height: 1,
            original_size: 10,
        };

        let path = save_result(&result, &dir).unwrap();
        assert_eq!(path.file_name().unwrap(), "compressed_cat.jpg");
        assert_eq!(fs::read(&path).unwrap(), vec![0xFF, 0xD8, 0xFF, 0xD9]);

        fs::remove_dir_all(&dir).ok();
    }
}
