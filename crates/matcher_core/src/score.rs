/// Converts a raw similarity score into a percentage clamped to `[0, 100]`.
///
/// The service reports scores nominally in `[0, 1]` but does not guarantee it.
/// NaN maps to `0.0` so derived widths stay in range.
pub fn normalize_score(raw_score: f64) -> f64 {
    let percent = raw_score * 100.0;
    if percent.is_nan() {
        return 0.0;
    }
    percent.clamp(0.0, 100.0)
}
