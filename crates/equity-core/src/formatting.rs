use unicode_width::UnicodeWidthStr;

/// Decimal places used for every published percentage.
pub const DISPLAY_PRECISION: u32 = 4;

/// Round `value` to `decimal_places`, half away from zero.
///
/// A result that rounds to zero is always `+0.0`, never `-0.0`.
///
/// # Examples
///
/// ```
/// use equity_core::formatting::round_to;
///
/// assert_eq!(round_to(0.123_456, 4), 0.1235);
/// assert_eq!(round_to(-2.5, 0), -3.0);
/// assert!(round_to(-1e-9, 4).is_sign_positive());
/// ```
pub fn round_to(value: f64, decimal_places: u32) -> f64 {
    let factor = 10_f64.powi(decimal_places as i32);
    let rounded = (value * factor).round() / factor;
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

/// Calculate `(part / whole) * 100`, rounded to `decimal_places`.
///
/// Returns `0.0` if `whole` is zero to avoid division by zero.
///
/// # Examples
///
/// ```
/// use equity_core::formatting::percentage;
///
/// assert!((percentage(2.0, 3.0, 4) - 66.6667).abs() < 1e-9);
/// assert_eq!(percentage(1.0, 0.0, 4), 0.0);
/// ```
pub fn percentage(part: f64, whole: f64, decimal_places: u32) -> f64 {
    if whole == 0.0 {
        return 0.0;
    }
    round_to((part / whole) * 100.0, decimal_places)
}

/// Format a percentage with a fixed number of decimals and a `%` suffix.
///
/// # Examples
///
/// ```
/// use equity_core::formatting::format_percent;
///
/// assert_eq!(format_percent(50.0, 4), "50.0000%");
/// assert_eq!(format_percent(-0.2, 2), "-0.20%");
/// ```
pub fn format_percent(value: f64, decimals: u32) -> String {
    // Avoid printing "-0.0000%" for tiny negative residues.
    let value = if round_to(value, decimals) == 0.0 {
        0.0
    } else {
        value
    };
    format!("{:.prec$}%", value, prec = decimals as usize)
}

/// Left-align `text` in a column `width` terminal cells wide.
///
/// Width is measured in display cells, so names containing emoji or wide
/// characters line up with plain ASCII ones. Text wider than the column is
/// returned unchanged.
pub fn pad_right(text: &str, width: usize) -> String {
    let used = UnicodeWidthStr::width(text);
    if used >= width {
        return text.to_string();
    }
    format!("{}{}", text, " ".repeat(width - used))
}

/// Right-align `text` in a column `width` terminal cells wide.
pub fn pad_left(text: &str, width: usize) -> String {
    let used = UnicodeWidthStr::width(text);
    if used >= width {
        return text.to_string();
    }
    format!("{}{}", " ".repeat(width - used), text)
}

/// Display width of `text` in terminal cells.
pub fn display_width(text: &str) -> usize {
    UnicodeWidthStr::width(text)
}

// ── Tests ──────────────────────────────────────────────────────────────────────
