//! Top-right notification stack.
//!
//! Views call [`notify`] to push a toast; it removes itself after
//! [`TOAST_LIFETIME`].

use leptos::prelude::*;

use crate::state::toast::{TOAST_LIFETIME, ToastKind, ToastState};

/// Show a transient notification.
pub fn notify(toasts: RwSignal<ToastState>, kind: ToastKind, message: impl Into<String>) {
    let message = message.into();
    #[cfg(feature = "hydrate")]
    if matches!(kind, ToastKind::Error) {
        log::warn!("{message}");
    }
    let mut id = 0;
    toasts.update(|t| id = t.push(kind, message));
    crate::util::poll::spawn_once(async move {
        #[cfg(feature = "hydrate")]
        gloo_timers::future::sleep(TOAST_LIFETIME).await;
        toasts.update(|t| t.dismiss(id));
    });
    #[cfg(not(feature = "hydrate"))]
    let _ = TOAST_LIFETIME;
}

#[component]
pub fn ToastStack() -> impl IntoView {
    let toasts = expect_context::<RwSignal<ToastState>>();

    view! {
        <div class="toast-stack" aria-live="polite">
            <For
                each=move || toasts.get().items
                key=|toast| toast.id
                children=move |toast| {
                    let id = toast.id;
                    view! {
                        <div class=toast.kind.css_class() on:click=move |_| toasts.update(|t| t.dismiss(id))>
                            {toast.message}
                        </div>
                    }
                }
            />
        </div>
    }
}
