/// 出力画像の最大幅
pub const MAX_WIDTH: u32 = 1920;

/// 出力画像の最大高さ
pub const MAX_HEIGHT: u32 = 1080;

/// JPEG 再エンコード品質（0.0-1.0）
pub const QUALITY: f32 = 0.7;

/// 1日あたりの無料圧縮回数
pub const DAILY_FREE_LIMIT: u32 = 5;

/// 入力ファイルの最大サイズ（10MiB）
pub const MAX_INPUT_SIZE: u64 = 10 * 1024 * 1024;

/// デコード後画像の最大ピクセル数（極端な入力のみ防止）
pub const MAX_PIXELS: u64 = 1_000_000_000;

/// ダウンロードファイル名の接頭辞
pub const DOWNLOAD_PREFIX: &str = "compressed_";
