//! Inline SVG pie chart with a legend.

use leptos::prelude::*;

use crate::util::chart::{PIE_VIEW_SIZE, pie_slices};

#[component]
pub fn PieChart(#[prop(into)] entries: Signal<Vec<(String, f64, String)>>) -> impl IntoView {
    let view_box = format!("0 0 {PIE_VIEW_SIZE} {PIE_VIEW_SIZE}");
    view! {
        <div class="chart chart--pie">
            {move || {
                let slices = pie_slices(&entries.get());
                if slices.is_empty() {
                    return view! { <p class="chart__empty">"No module data"</p> }.into_any();
                }
                let legend = slices
                    .iter()
                    .map(|slice| {
                        let swatch = format!("background:{}", slice.color);
                        view! {
                            <li class="chart__legend-item">
                                <span class="chart__swatch" style=swatch></span>
                                {format!("{} ({})", slice.label, slice.value)}
                            </li>
                        }
                    })
                    .collect_view();
                let wedges = slices
                    .into_iter()
                    .map(|slice| {
                        view! {
                            <path d=slice.path fill=slice.color stroke="#fff" stroke-width="2">
                                <title>{format!("{}: {}", slice.label, slice.value)}</title>
                            </path>
                        }
                    })
                    .collect_view();
                view! {
                    <svg viewBox=view_box.clone() role="img">{wedges}</svg>
                    <ul class="chart__legend">{legend}</ul>
                }
                    .into_any()
            }}
        </div>
    }
}
