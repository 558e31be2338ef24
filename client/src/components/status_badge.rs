//! Colored pill for schedule and module status values.

use leptos::prelude::*;

#[component]
pub fn StatusBadge(#[prop(into)] status: String) -> impl IntoView {
    let class = format!("status-badge status-{}", status.to_ascii_lowercase());
    view! { <span class=class>{status}</span> }
}
