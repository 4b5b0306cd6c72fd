use crate::constants::MAX_INPUT_SIZE;
use bytes::Bytes;
use image::ImageFormat;
use std::path::Path;

/// ユーザーが選択した画像ファイル
#[derive(Debug, Clone)]
pub struct ImageAsset {
    pub file_name: String,
    pub bytes: Bytes,
    pub mime_type: String,
}

impl ImageAsset {
    pub fn new(
        file_name: impl Into<String>,
        bytes: impl Into<Bytes>,
        mime_type: impl Into<String>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            bytes: bytes.into(),
            mime_type: mime_type.into(),
        }
    }

    /// ファイルから読み込む
    ///
    /// MIME タイプは拡張子から推測し、不明なら内容から判定する。
    /// `MAX_INPUT_SIZE` を超えるファイルは読み込まずに拒否する
    pub fn from_path(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let path = path.as_ref();
        let len = std::fs::metadata(path)?.len();
        if len > MAX_INPUT_SIZE {
            return Err(std::io::Error::new(
                std::io::ErrorKind::FileTooLarge,
                format!("file is {len} bytes, maximum is {MAX_INPUT_SIZE} bytes"),
            ));
        }
        let bytes = std::fs::read(path)?;
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();

        let mime_type = ImageFormat::from_path(path)
            .ok()
            .or_else(|| image::guess_format(&bytes).ok())
            .map(|format| format.to_mime_type())
            .unwrap_or("application/octet-stream");

        Ok(Self::new(file_name, bytes, mime_type))
    }

    pub fn size(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_image(&self) -> bool {
        self.mime_type.starts_with("image/")
    }
}
