//! SVG geometry for the analytics charts.
//!
//! DESIGN
//! ======
//! Charts render as inline SVG built from plain geometry structs, so layout
//! math is testable without a browser and the markup survives PDF capture.

#[cfg(test)]
#[path = "chart_test.rs"]
mod chart_test;

use std::f64::consts::{FRAC_PI_2, TAU};

pub const BAR_VIEW_WIDTH: f64 = 560.0;
pub const BAR_VIEW_HEIGHT: f64 = 260.0;
const BAR_PAD_LEFT: f64 = 48.0;
const BAR_PAD_RIGHT: f64 = 12.0;
const BAR_PAD_TOP: f64 = 12.0;
const BAR_PAD_BOTTOM: f64 = 28.0;
const BAR_GAP_RATIO: f64 = 0.3;
const Y_TICKS: usize = 4;

pub const PIE_VIEW_SIZE: f64 = 220.0;
const PIE_RADIUS: f64 = 100.0;

/// One rendered bar.
#[derive(Clone, Debug, PartialEq)]
pub struct Bar {
    pub label: String,
    pub value: f64,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Horizontal grid line with its axis label.
#[derive(Clone, Debug, PartialEq)]
pub struct AxisTick {
    pub value: f64,
    pub y: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct BarLayout {
    pub bars: Vec<Bar>,
    pub ticks: Vec<AxisTick>,
    /// Y coordinate of the zero baseline.
    pub baseline: f64,
    pub plot_left: f64,
    pub plot_right: f64,
}

/// Round `value` up to 1, 2, or 5 times a power of ten.
#[must_use]
pub fn nice_ceiling(value: f64) -> f64 {
    if !value.is_finite() || value <= 0.0 {
        return 1.0;
    }
    let magnitude = 10f64.powf(value.log10().floor());
    let scaled = value / magnitude;
    let step = if scaled <= 1.0 {
        1.0
    } else if scaled <= 2.0 {
        2.0
    } else if scaled <= 5.0 {
        5.0
    } else {
        10.0
    };
    step * magnitude
}

/// Lay out one bar per `(label, value)` point, scaled so the tallest bar
/// reaches a rounded axis maximum. Negative values draw as zero.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn bar_layout(points: &[(String, f64)]) -> BarLayout {
    let plot_left = BAR_PAD_LEFT;
    let plot_right = BAR_VIEW_WIDTH - BAR_PAD_RIGHT;
    let plot_height = BAR_VIEW_HEIGHT - BAR_PAD_TOP - BAR_PAD_BOTTOM;
    let baseline = BAR_PAD_TOP + plot_height;

    let max_value = points.iter().map(|(_, v)| v.max(0.0)).fold(0.0, f64::max);
    let axis_max = nice_ceiling(max_value);

    let slot = if points.is_empty() { 0.0 } else { (plot_right - plot_left) / points.len() as f64 };
    let width = slot * (1.0 - BAR_GAP_RATIO);

    let bars = points
        .iter()
        .enumerate()
        .map(|(i, (label, value))| {
            let clamped = value.max(0.0);
            let height = plot_height * clamped / axis_max;
            Bar {
                label: label.clone(),
                value: *value,
                x: plot_left + slot * i as f64 + (slot - width) / 2.0,
                y: baseline - height,
                width,
                height,
            }
        })
        .collect();

    let ticks = (0..=Y_TICKS)
        .map(|i| {
            let fraction = i as f64 / Y_TICKS as f64;
            AxisTick { value: axis_max * fraction, y: baseline - plot_height * fraction }
        })
        .collect();

    BarLayout { bars, ticks, baseline, plot_left, plot_right }
}

/// One pie wedge.
#[derive(Clone, Debug, PartialEq)]
pub struct PieSlice {
    pub label: String,
    pub value: f64,
    pub color: String,
    /// SVG path data; a full circle when the slice is the only non-empty one.
    pub path: String,
    pub fraction: f64,
}

/// Build pie wedges from `(label, value, color)` entries. Zero and negative
/// values produce no wedge; an all-zero input yields an empty list.
#[must_use]
pub fn pie_slices(entries: &[(String, f64, String)]) -> Vec<PieSlice> {
    let total: f64 = entries.iter().map(|(_, v, _)| v.max(0.0)).sum();
    if total <= 0.0 {
        return Vec::new();
    }
    let center = PIE_VIEW_SIZE / 2.0;
    let mut angle = -FRAC_PI_2;
    let mut slices = Vec::new();
    for (label, value, color) in entries {
        if *value <= 0.0 {
            continue;
        }
        let fraction = value / total;
        let sweep = fraction * TAU;
        let path = if fraction >= 1.0 {
            full_circle_path(center, PIE_RADIUS)
        } else {
            wedge_path(center, PIE_RADIUS, angle, angle + sweep)
        };
        angle += sweep;
        slices.push(PieSlice { label: label.clone(), value: *value, color: color.clone(), path, fraction });
    }
    slices
}

fn wedge_path(center: f64, radius: f64, start: f64, end: f64) -> String {
    let (x1, y1) = (center + radius * start.cos(), center + radius * start.sin());
    let (x2, y2) = (center + radius * end.cos(), center + radius * end.sin());
    let large_arc = u8::from(end - start > std::f64::consts::PI);
    format!("M {center:.2} {center:.2} L {x1:.2} {y1:.2} A {radius:.2} {radius:.2} 0 {large_arc} 1 {x2:.2} {y2:.2} Z")
}

fn full_circle_path(center: f64, radius: f64) -> String {
    let top = center - radius;
    let bottom = center + radius;
    format!(
        "M {center:.2} {top:.2} A {radius:.2} {radius:.2} 0 1 1 {center:.2} {bottom:.2} A {radius:.2} {radius:.2} 0 1 1 {center:.2} {top:.2} Z"
    )
}
