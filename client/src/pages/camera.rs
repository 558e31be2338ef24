//! Camera snapshot gallery.
//!
//! SYSTEM CONTEXT
//! ==============
//! Snapshots uploaded by feeder cameras are split into "during feeding" and
//! "after feeding" columns. Items can be zoomed, deleted, and the whole
//! gallery exported as a PDF report.

use chrono::Local;
use leptos::prelude::*;

use crate::components::export_button::ExportButton;
use crate::components::image_modal::ImageModal;
use crate::components::toast_stack::notify;
use crate::net::api;
use crate::net::types::{Snapshot, SnapshotCategory};
use crate::state::gallery::{GalleryState, empty_message};
use crate::state::toast::{ToastKind, ToastState};
use crate::util::clock;
use crate::util::format::format_snapshot_timestamp;
use crate::util::pdf::ReportKind;
use crate::util::poll::{CAMERA_INTERVAL, spawn_once, spawn_poll};

async fn refresh(state: RwSignal<GalleryState>) {
    let result = api::fetch_snapshots().await;
    #[cfg(feature = "hydrate")]
    if let Err(e) = &result {
        log::error!("Error loading images: {e}");
    }
    state.update(|s| s.apply_fetch(result));
}

#[component]
pub fn CameraPage() -> impl IntoView {
    let state = expect_context::<RwSignal<GalleryState>>();
    let toasts = expect_context::<RwSignal<ToastState>>();
    let report_ref = NodeRef::<leptos::html::Div>::new();

    spawn_poll(CAMERA_INTERVAL, move || refresh(state));

    let on_delete = Callback::new(move |filename: String| {
        if !clock::confirm(&format!("Are you sure you want to delete {filename}?")) {
            return;
        }
        spawn_once(async move {
            match api::delete_snapshot(&filename).await {
                Ok(()) => {
                    state.update(|s| s.remove(&filename));
                    notify(toasts, ToastKind::Success, "✓ Image deleted successfully!");
                    refresh(state).await;
                }
                Err(e) => notify(toasts, ToastKind::Error, format!("✗ Failed to delete image: {e}")),
            }
        });
    });
    let on_zoom = Callback::new(move |filename: String| state.update(|s| s.zoomed = Some(filename)));
    let on_close = Callback::new(move |()| state.update(|s| s.zoomed = None));

    view! {
        <section class="view view--camera">
            <div class="view__header">
                <h1 class="view__title">"Camera Monitoring"</h1>
                <button class="btn" on:click=move |_| spawn_once(refresh(state))>"Refresh"</button>
                <ExportButton kind=ReportKind::Camera target=report_ref/>
            </div>
            <div class="gallery-columns" node_ref=report_ref>
                <GalleryColumn
                    title="During Feeding"
                    category=SnapshotCategory::During
                    on_delete=on_delete
                    on_zoom=on_zoom
                />
                <GalleryColumn
                    title="After Feeding"
                    category=SnapshotCategory::After
                    on_delete=on_delete
                    on_zoom=on_zoom
                />
            </div>
            {move || state.get().zoomed.map(|filename| view! { <ImageModal filename=filename on_close=on_close/> })}
        </section>
    }
}

#[component]
fn GalleryColumn(
    title: &'static str,
    category: SnapshotCategory,
    on_delete: Callback<String>,
    on_zoom: Callback<String>,
) -> impl IntoView {
    let state = expect_context::<RwSignal<GalleryState>>();

    view! {
        <div class="gallery-column">
            <h2 class="gallery-column__title">{title}</h2>
            <div class="gallery">
                {move || {
                    let s = state.get();
                    if !s.loaded {
                        return view! { <div class="loading">"Loading images..."</div> }.into_any();
                    }
                    if s.error.is_some() {
                        return view! {
                            <div class="empty-state"><p>"❌ Error loading images"</p></div>
                        }
                            .into_any();
                    }
                    let items = s.in_category(category);
                    if items.is_empty() {
                        return view! {
                            <div class="empty-state">
                                <p>{empty_message(category)}</p>
                                <p class="empty-state__hint">"Images will appear here after feeding events"</p>
                            </div>
                        }
                            .into_any();
                    }
                    items
                        .into_iter()
                        .map(|snapshot| view! { <GalleryItem snapshot=snapshot on_delete=on_delete on_zoom=on_zoom/> })
                        .collect_view()
                        .into_any()
                }}
            </div>
        </div>
    }
}

#[component]
fn GalleryItem(snapshot: Snapshot, on_delete: Callback<String>, on_zoom: Callback<String>) -> impl IntoView {
    let Snapshot { filename, camera_id, timestamp, category } = snapshot;
    let src = api::snapshot_image_url(&filename);
    let zoom_name = filename.clone();
    let delete_name = filename.clone();

    view! {
        <div class="gallery-item">
            <img src=src alt=filename.clone() on:click=move |_| on_zoom.run(zoom_name.clone())/>
            <div class="gallery-item__info">
                <p class="gallery-item__timestamp">{format_snapshot_timestamp(timestamp, &Local)}</p>
                <p>{format!("📷 {}", camera_id.unwrap_or_else(|| "Unknown".to_owned()))}</p>
                <p class="gallery-item__meta">{format!("Category: {}", category.as_str())}</p>
                <p class="gallery-item__meta">{filename}</p>
                <button class="btn btn--delete" on:click=move |_| on_delete.run(delete_name.clone())>
                    "🗑️ Delete"
                </button>
            </div>
        </div>
    }
}
