//! Inline SVG bar chart.

use leptos::prelude::*;

use crate::util::chart::{BAR_VIEW_HEIGHT, BAR_VIEW_WIDTH, bar_layout};

/// Render `(label, value)` points; re-lays out whenever `points` changes.
#[component]
pub fn BarChart(
    #[prop(into)] points: Signal<Vec<(String, f64)>>,
    #[prop(into)] unit: String,
    #[prop(default = "#3b82f6")] color: &'static str,
) -> impl IntoView {
    let view_box = format!("0 0 {BAR_VIEW_WIDTH} {BAR_VIEW_HEIGHT}");
    view! {
        <svg class="chart chart--bar" viewBox=view_box preserveAspectRatio="xMidYMid meet" role="img">
            {move || {
                let layout = bar_layout(&points.get());
                let unit = unit.clone();
                let ticks = layout
                    .ticks
                    .iter()
                    .map(|tick| {
                        view! {
                            <line class="chart__grid" x1={layout.plot_left} x2={layout.plot_right} y1={tick.y} y2={tick.y}></line>
                            <text class="chart__axis-label" x={layout.plot_left - 6.0} y={tick.y + 4.0} text-anchor="end">
                                {format!("{:.0}", tick.value)}
                            </text>
                        }
                    })
                    .collect_view();
                let bars = layout
                    .bars
                    .into_iter()
                    .map(|bar| {
                        let center = bar.x + bar.width / 2.0;
                        let title = format!("{}: {}{}", bar.label, bar.value, unit);
                        view! {
                            <rect class="chart__bar" x={bar.x} y={bar.y} width={bar.width} height={bar.height} fill=color>
                                <title>{title}</title>
                            </rect>
                            <text class="chart__bar-label" x=center y={layout.baseline + 18.0} text-anchor="middle">
                                {bar.label}
                            </text>
                        }
                    })
                    .collect_view();
                view! { <g>{ticks}{bars}</g> }
            }}
        </svg>
    }
}
