use crate::metrics::{format_size, reduction_percent};
use bytes::Bytes;

/// 再圧縮の結果。生成後は変更しない
#[derive(Debug, Clone, PartialEq)]
pub struct CompressionResult {
    /// 元ファイル名（ダウンロード名の生成に使う）
    pub file_name: String,
    pub bytes: Bytes,
    pub byte_size: usize,
    pub width: u32,
    pub height: u32,
    pub source_width: u32,
    pub source_height: u32,
    pub original_size: usize,
}

impl CompressionResult {
    pub fn was_resized(&self) -> bool {
        self.width != self.source_width || self.height != self.source_height
    }

    /// 削減率（%）。入力より大きくなった場合は負
    pub fn reduction_percent(&self) -> i64 {
        reduction_percent(self.original_size, self.byte_size)
    }

    /// `1.2 MB → 340 KB (72% reduction)` 形式の要約
    pub fn summary(&self) -> String {
        format!(
            "{} → {} ({}% reduction)",
            format_size(self.original_size as u64),
            format_size(self.byte_size as u64),
            self.reduction_percent()
        )
    }
}
