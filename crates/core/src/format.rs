//! Readable labels for milestone offsets.

/// Hours in a day.
pub const HOURS_PER_DAY: f64 = 24.0;

/// Hours in a (365-day) year.
pub const HOURS_PER_YEAR: f64 = 8760.0;

/// Render an offset in the largest unit that keeps it readable:
/// hours below one day, days below one year, years otherwise.
pub fn format_offset(hours: f64) -> String {
    if hours < HOURS_PER_DAY {
        format!("{:.1} hours", hours)
    } else if hours < HOURS_PER_YEAR {
        format!("{:.1} days", hours / HOURS_PER_DAY)
    } else {
        format!("{:.1} years", hours / HOURS_PER_YEAR)
    }
}
