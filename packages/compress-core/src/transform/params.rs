use crate::constants::{MAX_HEIGHT, MAX_WIDTH, QUALITY};

/// 再圧縮パラメータ（出力は常に JPEG）
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompressionOptions {
    pub max_width: u32,
    pub max_height: u32,
    /// 0.0-1.0 のスケール
    pub quality: f32,
}

impl CompressionOptions {
    /// JPEG エンコーダ用の品質（1-100）
    pub fn jpeg_quality(&self) -> u8 {
        (self.quality.clamp(0.0, 1.0) * 100.0).round().max(1.0) as u8
    }
}

impl Default for CompressionOptions {
    fn default() -> Self {
        Self {
            max_width: MAX_WIDTH,
            max_height: MAX_HEIGHT,
            quality: QUALITY,
        }
    }
}
