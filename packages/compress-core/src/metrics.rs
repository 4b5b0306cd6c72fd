const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];

/// バイト数を人間向けに整形する（1024 単位、小数2桁まで）
pub fn format_size(bytes: u64) -> String {
    if bytes == 0 {
        return "0 B".to_string();
    }

    let exponent = ((bytes as f64).ln() / 1024f64.ln()).floor() as usize;
    let exponent = exponent.min(UNITS.len() - 1);
    let value = bytes as f64 / 1024f64.powi(exponent as i32);
    let rounded = (value * 100.0).round() / 100.0;

    format!("{rounded} {}", UNITS[exponent])
}

/// 削減率（%）を整数に丸めて返す。圧縮後の方が大きければ負
///
/// ちょうど .5 は正の方向に丸める（-12.5 は -12）
pub fn reduction_percent(original: usize, compressed: usize) -> i64 {
    if original == 0 {
        return 0;
    }
    let percent = (1.0 - compressed as f64 / original as f64) * 100.0;
    (percent + 0.5).floor() as i64
}
