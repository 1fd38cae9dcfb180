//! Tick-spacing helpers for dense categorical axes.

use serde::Serialize;

/// Hard cap on category tick marks; beyond this labels overlap and become
/// illegible.
pub const MAX_TICKS: usize = 26;

/// Explicit category tick placement (`tickmode: array` in the figure layout).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpacedTicks {
    pub tickmode: &'static str,
    pub tickvals: Vec<f64>,
    pub ticktext: Vec<String>,
}

/// Selects an evenly-spaced subset of at most [`MAX_TICKS`] tick marks.
///
/// Short inputs pass through unchanged. Longer inputs keep the first
/// element, every `ceil(n / MAX_TICKS)`-th interior element and the last
/// element, so both ends of the axis stay labeled.
#[must_use]
pub fn build_spaced_ticks(ticktext: &[String], tickvals: &[f64]) -> SpacedTicks {
    let size = ticktext.len().min(tickvals.len());
    if size <= MAX_TICKS {
        return SpacedTicks {
            tickmode: "array",
            tickvals: tickvals[..size].to_vec(),
            ticktext: ticktext[..size].to_vec(),
        };
    }

    let factor = size.div_ceil(MAX_TICKS);
    let mut vals = Vec::with_capacity(MAX_TICKS + 1);
    let mut text = Vec::with_capacity(MAX_TICKS + 1);

    vals.push(tickvals[0]);
    text.push(ticktext[0].clone());
    let mut index = factor;
    while index < size - 1 {
        vals.push(tickvals[index]);
        text.push(ticktext[index].clone());
        index += factor;
    }
    vals.push(tickvals[size - 1]);
    text.push(ticktext[size - 1].clone());

    SpacedTicks {
        tickmode: "array",
        tickvals: vals,
        ticktext: text,
    }
}

/// Formats a tick label, rendering integral values without a fractional part.
#[must_use]
pub fn format_tick_label(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}

#[cfg(test)]
mod tests {
    use super::{MAX_TICKS, build_spaced_ticks, format_tick_label};

    fn labels(n: usize) -> (Vec<String>, Vec<f64>) {
        let text: Vec<String> = (0..n).map(|i| i.to_string()).collect();
        let vals: Vec<f64> = (0..n).map(|i| i as f64).collect();
        (text, vals)
    }

    #[test]
    fn fifty_ticks_reduce_to_twenty_six() {
        let (text, vals) = labels(50);
        let cfg = build_spaced_ticks(&text, &vals);
        assert_eq!(cfg.tickvals.len(), MAX_TICKS);
        assert_eq!(cfg.tickvals[0], 0.0);
        assert_eq!(*cfg.tickvals.last().expect("not empty"), 49.0);
    }

    #[test]
    fn short_inputs_pass_through() {
        let (text, vals) = labels(10);
        let cfg = build_spaced_ticks(&text, &vals);
        assert_eq!(cfg.tickvals, vals);
        assert_eq!(cfg.ticktext, text);
    }

    #[test]
    fn integral_labels_render_without_fraction() {
        assert_eq!(format_tick_label(3.0), "3");
        assert_eq!(format_tick_label(3.5), "3.5");
    }
}
