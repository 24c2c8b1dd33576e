//! Round-number axis scaling.
//!
//! Picks a step of 1, 2, 5 or 10 times a power of ten so that roughly five
//! intervals cover the axis, then lays ticks from zero to one step past the
//! maximum.

use super::format;
use crate::models::{Tick, TickScale};

/// Intervals the step is sized for.
const TARGET_INTERVALS: f64 = 5.0;

/// Choose a round tick step for an axis whose top value is `max`.
///
/// `max_value = 4300` gives a raw step of 860, magnitude 100, residual 8.6,
/// and therefore a step of 1000.
pub fn nice_step(max_value: f64) -> f64 {
    let raw = max_value / TARGET_INTERVALS;
    let magnitude = 10f64.powi(raw.max(1.0).log10().floor() as i32);
    let residual = raw / magnitude;
    let nice = if residual <= 1.0 {
        1.0
    } else if residual <= 2.0 {
        2.0
    } else if residual <= 5.0 {
        5.0
    } else {
        10.0
    };
    nice * magnitude
}

/// Build ticks `0, step, 2·step, …` up to and including `max_value + step`.
///
/// Negative or non-finite maxima are treated as zero.
pub fn tick_scale(max_value: f64) -> TickScale {
    let max_value = if max_value.is_finite() {
        max_value.max(0.0)
    } else {
        0.0
    };
    let step = nice_step(max_value);
    let limit = max_value + step;

    let mut ticks = Vec::new();
    let mut i: u32 = 0;
    loop {
        // Multiply instead of accumulating so labels stay exact
        let value = step * f64::from(i);
        if value > limit {
            break;
        }
        ticks.push(Tick {
            value,
            label: format::tick_label(value),
        });
        i += 1;
    }

    TickScale { step, ticks }
}

/// Tick scale for a set of plotted values with `headroom` applied above the
/// largest one (1.15 leaves 15% of free space at the top).
///
/// Returns `None` when there is nothing to plot, leaving the axis to its
/// default scaling.
pub fn tick_scale_for(values: &[f64], headroom: f64) -> Option<TickScale> {
    let max = values
        .iter()
        .copied()
        .filter(|v| v.is_finite())
        .fold(None, |acc: Option<f64>, v| Some(acc.map_or(v, |m| m.max(v))))?;
    Some(tick_scale(max * headroom))
}
