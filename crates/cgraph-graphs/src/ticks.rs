//! Tick generation for linear and time axes.

use cgraph_common::{format_number, from_epoch_millis};

const SECOND: f64 = 1_000.0;
const MINUTE: f64 = 60.0 * SECOND;
const HOUR: f64 = 60.0 * MINUTE;
const DAY: f64 = 24.0 * HOUR;
const WEEK: f64 = 7.0 * DAY;
const MONTH: f64 = 30.0 * DAY;
const YEAR: f64 = 365.0 * DAY;

/// Candidate time intervals in milliseconds, ascending.
const TIME_INTERVALS: [f64; 17] = [
    SECOND,
    5.0 * SECOND,
    15.0 * SECOND,
    30.0 * SECOND,
    MINUTE,
    5.0 * MINUTE,
    15.0 * MINUTE,
    30.0 * MINUTE,
    HOUR,
    3.0 * HOUR,
    6.0 * HOUR,
    12.0 * HOUR,
    DAY,
    2.0 * DAY,
    WEEK,
    MONTH,
    3.0 * MONTH,
];

/// "Nice" step for covering `[start, stop]` with roughly `count` intervals.
///
/// Positive results are multiples of a power of ten; negative results are
/// reciprocal increments used to keep fractional ticks exact.
fn tick_increment(start: f64, stop: f64, count: f64) -> Option<f64> {
    let step = (stop - start) / count;
    if !step.is_finite() || step <= 0.0 {
        return None;
    }
    let power = step.log10().floor();
    let error = step / 10f64.powf(power);
    let factor = if error >= 50f64.sqrt() {
        10.0
    } else if error >= 10f64.sqrt() {
        5.0
    } else if error >= 2f64.sqrt() {
        2.0
    } else {
        1.0
    };
    if power < 0.0 {
        Some(-(10f64.powf(-power) / factor))
    } else {
        Some(10f64.powf(power) * factor)
    }
}

/// Evenly spaced round values within `[start, stop]` (bounds in either order).
#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
pub fn linear_ticks(start: f64, stop: f64, count: usize) -> Vec<f64> {
    if !start.is_finite() || !stop.is_finite() || count == 0 {
        return Vec::new();
    }
    if start == stop {
        return vec![start];
    }
    let (low, high) = if stop < start { (stop, start) } else { (start, stop) };
    let Some(increment) = tick_increment(low, high, count as f64) else {
        return Vec::new();
    };

    let (first, last) = if increment > 0.0 {
        ((low / increment).ceil() as i64, (high / increment).floor() as i64)
    } else {
        let inverse = -increment;
        ((low * inverse).ceil() as i64, (high * inverse).floor() as i64)
    };
    let mut ticks: Vec<f64> = (first..=last)
        .map(|step| {
            if increment > 0.0 {
                step as f64 * increment
            } else {
                step as f64 / -increment
            }
        })
        .collect();
    if stop < start {
        ticks.reverse();
    }
    ticks
}

/// Widens `[start, stop]` outward to round tick boundaries.
#[allow(clippy::cast_precision_loss)]
pub fn nice(start: f64, stop: f64, count: usize) -> (f64, f64) {
    let Some(increment) = tick_increment(start, stop, count.max(1) as f64) else {
        return (start, stop);
    };
    if increment > 0.0 {
        (
            (start / increment).floor() * increment,
            (stop / increment).ceil() * increment,
        )
    } else {
        let inverse = -increment;
        (
            (start * inverse).floor() / inverse,
            (stop * inverse).ceil() / inverse,
        )
    }
}

/// Interval used for time ticks over `[start, stop]` epoch milliseconds.
#[allow(clippy::cast_precision_loss)]
pub fn time_interval(start: f64, stop: f64, count: usize) -> f64 {
    let target = (stop - start).abs() / count.max(1) as f64;
    if target >= YEAR {
        let years = linear_ticks(0.0, target / YEAR, 1).last().copied().unwrap_or(1.0);
        return years.max(1.0) * YEAR;
    }
    TIME_INTERVALS
        .iter()
        .copied()
        .min_by(|a, b| (a - target).abs().total_cmp(&(b - target).abs()))
        .unwrap_or(DAY)
}

/// Time ticks in epoch milliseconds, aligned to multiples of the chosen interval.
pub fn time_ticks(start: f64, stop: f64, count: usize) -> Vec<f64> {
    if !start.is_finite() || !stop.is_finite() || count == 0 {
        return Vec::new();
    }
    let (low, high) = if stop < start { (stop, start) } else { (start, stop) };
    let interval = time_interval(low, high, count);
    let mut tick = (low / interval).ceil() * interval;
    let mut ticks = Vec::new();
    while tick <= high {
        ticks.push(tick);
        tick += interval;
    }
    ticks
}

/// Label for a linear tick.
pub fn format_linear_tick(value: f64) -> String {
    format_number(value)
}

/// Label for a time tick, with precision matching the tick interval.
pub fn format_time_tick(millis: f64, interval: f64) -> String {
    let Some(timestamp) = from_epoch_millis(millis) else {
        return format_number(millis);
    };
    let pattern = if interval >= YEAR {
        "%Y"
    } else if interval >= MONTH {
        "%b %Y"
    } else if interval >= DAY {
        "%b %d"
    } else if interval >= MINUTE {
        "%H:%M"
    } else {
        "%H:%M:%S"
    };
    timestamp.format(pattern).to_string()
}
