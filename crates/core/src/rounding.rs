//! Display rounding shared by the summarizer and the comparator.

/// Round to `decimals` places, half away from zero. Negative zero is
/// normalized to `0.0` so a rounded value never shows as "-0.0".
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    let rounded = (value * factor).round() / factor;
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

/// Like [`round_to`], but a nonzero value never rounds to zero: it is
/// reported as the smallest displayable step with its own sign.
pub fn round_keeping_sign(value: f64, decimals: i32) -> f64 {
    let rounded = round_to(value, decimals);
    if rounded == 0.0 && value != 0.0 {
        (1.0 / 10f64.powi(decimals)).copysign(value)
    } else {
        rounded
    }
}

/// `part / whole * 100`, rounded to `decimals` places. The caller guarantees
/// `whole > 0`.
pub fn percent_of(part: f64, whole: f64, decimals: i32) -> f64 {
    round_to(part / whole * 100.0, decimals)
}
