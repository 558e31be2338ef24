//! Top navigation shared by every dashboard view.

use leptos::prelude::*;
use leptos_router::components::A;

/// Header bar with links to each view.
#[component]
pub fn NavBar() -> impl IntoView {
    view! {
        <header class="nav-bar">
            <span class="nav-bar__brand">"SmartFeeder"</span>
            <nav class="nav-bar__links">
                <A href="/app" exact=true>"Modules"</A>
                <A href="/app/camera">"Camera"</A>
                <A href="/app/schedules">"Schedules"</A>
                <A href="/app/history">"History"</A>
                <A href="/app/analytics">"Analytics"</A>
            </nav>
        </header>
    }
}
