//! Module list: the dashboard landing view.
//!
//! SYSTEM CONTEXT
//! ==============
//! Polls `/modules` every 2 s. Each successful fetch is diffed against the
//! previous one and weight changes surface as toasts, which is how operators
//! notice a feeder dispensing or being refilled.

use leptos::prelude::*;

use crate::components::toast_stack::notify;
use crate::net::api;
use crate::state::modules::ModuleListState;
use crate::state::toast::{ToastKind, ToastState};
use crate::util::format::format_weight;
use crate::util::poll::{MODULES_INTERVAL, spawn_poll};

#[component]
pub fn ModulesPage() -> impl IntoView {
    let state = expect_context::<RwSignal<ModuleListState>>();
    let toasts = expect_context::<RwSignal<ToastState>>();

    spawn_poll(MODULES_INTERVAL, move || async move {
        let result = api::fetch_modules().await;
        #[cfg(feature = "hydrate")]
        if let Err(e) = &result {
            log::error!("Error loading modules: {e}");
        }
        let mut changes = Vec::new();
        state.update(|s| changes = s.apply_fetch(result));
        for change in changes {
            notify(toasts, ToastKind::Success, change.message());
        }
    });

    view! {
        <section class="view view--modules">
            <h1 class="view__title">"Feeder Modules"</h1>
            <table class="data-table">
                <thead>
                    <tr>
                        <th>"Module ID"</th>
                        <th>"Camera ID"</th>
                        <th>"Status"</th>
                        <th>"Weight"</th>
                    </tr>
                </thead>
                <tbody>
                    {move || {
                        let s = state.get();
                        if let Some(err) = s.error {
                            return view! {
                                <tr><td colspan="4">{format!("Error loading modules: {err}")}</td></tr>
                            }
                                .into_any();
                        }
                        if !s.loaded {
                            return view! { <tr><td colspan="4">"Loading..."</td></tr> }.into_any();
                        }
                        if s.modules.is_empty() {
                            return view! { <tr><td colspan="4">"No modules found"</td></tr> }.into_any();
                        }
                        s.modules
                            .into_iter()
                            .map(|m| {
                                view! {
                                    <tr>
                                        <td>{m.module_id}</td>
                                        <td>{m.cam_id}</td>
                                        <td>{m.status}</td>
                                        <td>{format_weight(m.weight)}</td>
                                    </tr>
                                }
                            })
                            .collect_view()
                            .into_any()
                    }}
                </tbody>
            </table>
        </section>
    }
}
