//! Full-size snapshot viewer.
//!
//! Closed by the × button or by clicking the backdrop; clicks on the image
//! itself do not close it.

use leptos::prelude::*;

use crate::net::api::snapshot_image_url;

#[component]
pub fn ImageModal(filename: String, on_close: Callback<()>) -> impl IntoView {
    let src = snapshot_image_url(&filename);
    view! {
        <div class="image-modal" on:click=move |_| on_close.run(())>
            <button class="image-modal__close" aria-label="Close" on:click=move |_| on_close.run(())>
                "×"
            </button>
            <img
                class="image-modal__image"
                src=src
                alt=filename.clone()
                on:click=|ev: leptos::ev::MouseEvent| ev.stop_propagation()
            />
            <p class="image-modal__caption">{filename.clone()}</p>
        </div>
    }
}
