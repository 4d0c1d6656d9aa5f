use chrono::{DateTime, Datelike, NaiveDate, Utc};

const MAX_TICKS: f64 = 10_000.0;

const SECOND_MS: f64 = 1_000.0;
const MINUTE_MS: f64 = 60.0 * SECOND_MS;
const HOUR_MS: f64 = 60.0 * MINUTE_MS;
const DAY_MS: f64 = 24.0 * HOUR_MS;
const WEEK_MS: f64 = 7.0 * DAY_MS;
const MONTH_MS: f64 = 30.0 * DAY_MS;
const YEAR_MS: f64 = 365.0 * DAY_MS;

/// Calendar-ish tick interval for time axes.
#[derive(Debug, Clone, Copy, PartialEq)]
enum TimeInterval {
    Fixed(f64),
    Months(u32),
}

impl TimeInterval {
    fn approx_ms(self) -> f64 {
        match self {
            Self::Fixed(ms) => ms,
            Self::Months(months) => f64::from(months) * MONTH_MS,
        }
    }
}

const TIME_INTERVALS: &[TimeInterval] = &[
    TimeInterval::Fixed(SECOND_MS),
    TimeInterval::Fixed(5.0 * SECOND_MS),
    TimeInterval::Fixed(15.0 * SECOND_MS),
    TimeInterval::Fixed(30.0 * SECOND_MS),
    TimeInterval::Fixed(MINUTE_MS),
    TimeInterval::Fixed(5.0 * MINUTE_MS),
    TimeInterval::Fixed(15.0 * MINUTE_MS),
    TimeInterval::Fixed(30.0 * MINUTE_MS),
    TimeInterval::Fixed(HOUR_MS),
    TimeInterval::Fixed(3.0 * HOUR_MS),
    TimeInterval::Fixed(6.0 * HOUR_MS),
    TimeInterval::Fixed(12.0 * HOUR_MS),
    TimeInterval::Fixed(DAY_MS),
    TimeInterval::Fixed(2.0 * DAY_MS),
    TimeInterval::Fixed(WEEK_MS),
    TimeInterval::Months(1),
    TimeInterval::Months(3),
    TimeInterval::Months(12),
];

/// Returns a 1/2/5×10ⁿ step that yields roughly `count` ticks over the span.
#[must_use]
pub fn tick_step(start: f64, stop: f64, count: usize) -> f64 {
    if count == 0 || !start.is_finite() || !stop.is_finite() {
        return 0.0;
    }
    let raw = (stop - start).abs() / count as f64;
    if !raw.is_finite() || raw <= 0.0 {
        return 0.0;
    }
    let power = raw.log10().floor();
    let base = 10_f64.powf(power);
    let error = raw / base;
    let factor = if error >= 50_f64.sqrt() {
        10.0
    } else if error >= 10_f64.sqrt() {
        5.0
    } else if error >= 2_f64.sqrt() {
        2.0
    } else {
        1.0
    };
    factor * base
}

/// Tick values inside `[min, max]` on a nice step.
#[must_use]
pub fn linear_ticks(min: f64, max: f64, count: usize) -> Vec<f64> {
    if count == 0 || !min.is_finite() || !max.is_finite() {
        return Vec::new();
    }
    if min == max {
        return vec![min];
    }
    let (lo, hi) = if min <= max { (min, max) } else { (max, min) };
    let step = tick_step(lo, hi, count);
    if step <= 0.0 {
        return vec![lo, hi];
    }

    let first = (lo / step).ceil();
    let last = (hi / step).floor();
    if last < first || last - first > MAX_TICKS {
        return Vec::new();
    }

    let mut ticks = Vec::with_capacity((last - first) as usize + 1);
    let mut index = first;
    while index <= last {
        // Multiplying the integer index keeps 0.1-style steps free of drift.
        ticks.push(clean_float(index * step, step));
        index += 1.0;
    }
    if min > max {
        ticks.reverse();
    }
    ticks
}

/// Rounds `[min, max]` outward to step multiples until the step is stable.
#[must_use]
pub fn nice_domain(min: f64, max: f64, count: usize) -> (f64, f64) {
    if !min.is_finite() || !max.is_finite() || min == max || count == 0 {
        return (min, max);
    }
    let reversed = min > max;
    let (mut lo, mut hi) = if reversed { (max, min) } else { (min, max) };

    let mut previous_step = f64::NAN;
    for _ in 0..10 {
        let step = tick_step(lo, hi, count);
        if step <= 0.0 || step == previous_step {
            break;
        }
        lo = clean_float((lo / step).floor() * step, step);
        hi = clean_float((hi / step).ceil() * step, step);
        previous_step = step;
    }

    if reversed { (hi, lo) } else { (lo, hi) }
}

/// Time tick values (epoch milliseconds) inside `[min, max]`.
#[must_use]
pub fn time_ticks(min: f64, max: f64, count: usize) -> Vec<f64> {
    if count == 0 || !min.is_finite() || !max.is_finite() {
        return Vec::new();
    }
    if min == max {
        return vec![min];
    }
    let (lo, hi) = if min <= max { (min, max) } else { (max, min) };
    let target = (hi - lo) / count as f64;

    let interval = TIME_INTERVALS
        .iter()
        .copied()
        .find(|interval| interval.approx_ms() >= target);

    let mut ticks = match interval {
        Some(TimeInterval::Fixed(step)) => fixed_interval_ticks(lo, hi, step),
        Some(TimeInterval::Months(months)) => month_ticks(lo, hi, months),
        None => {
            // Beyond one year per tick: nice steps over whole years.
            let years = tick_step(lo / YEAR_MS, hi / YEAR_MS, count).max(1.0).round();
            month_ticks(lo, hi, (years as u32).saturating_mul(12))
        }
    };
    if min > max {
        ticks.reverse();
    }
    ticks
}

fn fixed_interval_ticks(lo: f64, hi: f64, step: f64) -> Vec<f64> {
    let first = (lo / step).ceil();
    let last = (hi / step).floor();
    if last < first || last - first > MAX_TICKS {
        return Vec::new();
    }
    let mut ticks = Vec::new();
    let mut index = first;
    while index <= last {
        ticks.push(index * step);
        index += 1.0;
    }
    ticks
}

fn month_ticks(lo: f64, hi: f64, months: u32) -> Vec<f64> {
    let months = months.max(1) as i32;
    let (Some(start), Some(end)) = (millis_to_datetime(lo), millis_to_datetime(hi)) else {
        return Vec::new();
    };

    // Align to the first month boundary that is a multiple of the interval.
    let mut month_index = start.year() * 12 + start.month0() as i32;
    month_index = month_index.div_euclid(months) * months;
    let end_index = end.year() * 12 + end.month0() as i32;

    let mut ticks = Vec::new();
    while month_index <= end_index && ticks.len() as f64 <= MAX_TICKS {
        let year = month_index.div_euclid(12);
        let month = month_index.rem_euclid(12) as u32 + 1;
        if let Some(date) = NaiveDate::from_ymd_opt(year, month, 1) {
            if let Some(midnight) = date.and_hms_opt(0, 0, 0) {
                let millis = midnight.and_utc().timestamp_millis() as f64;
                if millis >= lo && millis <= hi {
                    ticks.push(millis);
                }
            }
        }
        month_index += months;
    }
    ticks
}

fn millis_to_datetime(millis: f64) -> Option<DateTime<Utc>> {
    if !millis.is_finite() || millis.abs() > i64::MAX as f64 {
        return None;
    }
    DateTime::<Utc>::from_timestamp_millis(millis.round() as i64)
}

/// Snaps values like `0.30000000000000004` back onto the step grid.
fn clean_float(value: f64, step: f64) -> f64 {
    if step >= 1.0 || step <= 0.0 {
        return value;
    }
    let decimals = (-step.log10()).ceil().clamp(0.0, 15.0) as i32;
    let factor = 10_f64.powi(decimals);
    (value * factor).round() / factor
}
