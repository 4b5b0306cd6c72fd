/// 境界ボックスに収めるための倍率を計算する
///
/// 両辺が境界内なら 1.0 を返す（拡大しない）
pub fn scale_factor(src_w: u32, src_h: u32, max_w: u32, max_h: u32) -> f64 {
    if src_w <= max_w && src_h <= max_h {
        return 1.0;
    }

    let scale_w = max_w as f64 / src_w as f64;
    let scale_h = max_h as f64 / src_h as f64;

    scale_w.min(scale_h).min(1.0)
}

/// 倍率を適用して新しい寸法を計算する
fn apply_scale(src_w: u32, src_h: u32, scale: f64) -> (u32, u32) {
    let new_w = (src_w as f64 * scale).round() as u32;
    let new_h = (src_h as f64 * scale).round() as u32;

    // 最小1pxを保証
    (new_w.max(1), new_h.max(1))
}

/// アスペクト比を維持したまま境界ボックスに収まる出力寸法を返す
///
/// 境界内の画像は寸法をそのまま返す
pub fn fit_within(src_w: u32, src_h: u32, max_w: u32, max_h: u32) -> (u32, u32) {
    let scale = scale_factor(src_w, src_h, max_w, max_h);
    if scale >= 1.0 {
        return (src_w, src_h);
    }
    apply_scale(src_w, src_h, scale)
}
