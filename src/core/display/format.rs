use chrono::{DateTime, Local};

const BAR_FILLED: char = '#';
const BAR_HEAD: char = '>';
const BAR_EMPTY: char = '-';

/// Text battery gauge of exactly `width` cells, e.g. `#####>-` for 0.76 over 7.
///
/// The head cell is dropped once the filled part leaves no room for it.
pub fn battery_bar(fraction: f64, width: usize) -> String {
    let fraction = clamp_fraction(fraction);
    let filled = ((fraction * width as f64).floor() as usize).min(width);

    if filled + 1 > width {
        return BAR_FILLED.to_string().repeat(width);
    }

    let empty = width - filled - 1;
    let mut bar = String::with_capacity(width);
    bar.extend(std::iter::repeat(BAR_FILLED).take(filled));
    bar.push(BAR_HEAD);
    bar.extend(std::iter::repeat(BAR_EMPTY).take(empty));
    bar
}

/// Whole percent for the battery label, truncated (0.289 -> 28)
pub fn battery_percent(fraction: f64) -> u32 {
    (clamp_fraction(fraction) * 100.0).floor() as u32
}

/// Map anything unreadable to an empty battery
pub fn clamp_fraction(fraction: f64) -> f64 {
    if fraction.is_finite() {
        fraction.clamp(0.0, 1.0)
    } else {
        0.0
    }
}

/// Step count with en-US grouping (5471 -> "5,471")
pub fn format_steps(steps: u64) -> String {
    let digits = steps.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    grouped
}

/// 12-hour clock without leading zero (e.g. "9:05 PM")
pub fn format_clock(time: &DateTime<Local>) -> String {
    time.format("%-I:%M %p").to_string()
}

/// Abbreviated weekday, month and two-digit day (e.g. "Sun, Oct 19")
pub fn format_date(time: &DateTime<Local>) -> String {
    time.format("%a, %b %d").to_string()
}
