//! "Export PDF" action shared by the camera, history, and analytics views.

use leptos::prelude::*;

use crate::state::toast::{ToastKind, ToastState};
use crate::util::pdf::ReportKind;

use super::toast_stack::notify;

/// Export the element behind `target` as a `kind` report.
#[component]
pub fn ExportButton(kind: ReportKind, target: NodeRef<leptos::html::Div>) -> impl IntoView {
    let toasts = expect_context::<RwSignal<ToastState>>();
    let busy = RwSignal::new(false);

    let on_click = move |_| {
        if busy.get_untracked() {
            return;
        }
        #[cfg(feature = "hydrate")]
        {
            let Some(element) = target.get_untracked() else {
                return;
            };
            busy.set(true);
            notify(toasts, ToastKind::Info, "Generating PDF...");
            leptos::task::spawn_local(async move {
                let element: web_sys::Element = element.into();
                let result = crate::util::pdf::export_report(
                    kind,
                    &element,
                    crate::util::clock::today(),
                    &crate::util::clock::report_timestamp(),
                )
                .await;
                busy.set(false);
                match result {
                    Ok(()) => notify(toasts, ToastKind::Success, "PDF downloaded successfully"),
                    Err(e) => {
                        log::error!("pdf export failed: {e}");
                        notify(toasts, ToastKind::Error, format!("Error generating PDF: {e}"));
                    }
                }
            });
        }
        #[cfg(not(feature = "hydrate"))]
        let _ = (kind, target, toasts);
    };

    view! {
        <button class="btn btn--export" on:click=on_click disabled=move || busy.get()>
            {move || if busy.get() { "Exporting..." } else { "Export PDF" }}
        </button>
    }
}
