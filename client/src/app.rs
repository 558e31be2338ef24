//! Root application component with routing and context providers.

use leptos::prelude::*;
use leptos_meta::{MetaTags, Stylesheet, Title, provide_meta_context};
use leptos_router::{
    StaticSegment,
    components::{Route, Router, Routes},
};

use crate::components::nav_bar::NavBar;
use crate::components::toast_stack::ToastStack;
use crate::pages::{
    analytics::AnalyticsPage, camera::CameraPage, history::HistoryPage, modules::ModulesPage,
    schedules::SchedulesPage,
};
use crate::state::{
    analytics::AnalyticsState, gallery::GalleryState, history::HistoryState, modules::ModuleListState,
    schedule::ScheduleEditor, toast::ToastState,
};

/// Client-side HTML-to-PDF converter used by report export.
const HTML2PDF_SRC: &str = "https://cdnjs.cloudflare.com/ajax/libs/html2pdf.js/0.10.1/html2pdf.bundle.min.js";

/// HTML shell rendered on the server for SSR + hydration.
pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <script src=HTML2PDF_SRC defer></script>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

/// Root application component.
///
/// Provides one controller state per view so polling results survive
/// navigation between views.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    provide_context(RwSignal::new(ToastState::default()));
    provide_context(RwSignal::new(ModuleListState::default()));
    provide_context(RwSignal::new(GalleryState::default()));
    provide_context(RwSignal::new(ScheduleEditor::default()));
    provide_context(RwSignal::new(HistoryState::default()));
    provide_context(RwSignal::new(AnalyticsState::default()));

    view! {
        <Stylesheet id="leptos" href="/pkg/smartfeeder.css"/>
        <Title text="SmartFeeder"/>

        <Router>
            <NavBar/>
            <main class="app-main">
                <Routes fallback=|| "Page not found.".into_view()>
                    <Route path=StaticSegment("app") view=ModulesPage/>
                    <Route path=(StaticSegment("app"), StaticSegment("camera")) view=CameraPage/>
                    <Route path=(StaticSegment("app"), StaticSegment("schedules")) view=SchedulesPage/>
                    <Route path=(StaticSegment("app"), StaticSegment("history")) view=HistoryPage/>
                    <Route path=(StaticSegment("app"), StaticSegment("analytics")) view=AnalyticsPage/>
                </Routes>
            </main>
            <ToastStack/>
        </Router>
    }
}
