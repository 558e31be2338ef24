//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! One axum router serves four audiences: the dashboard's JSON API, the
//! feeder devices' form endpoints, stored snapshot images, and the Leptos
//! SSR app under `/app`.

pub mod analytics;
pub mod cameras;
pub mod device;
pub mod history;
pub mod modules;
pub mod schedules;
pub mod snapshots;

use std::path::PathBuf;

use axum::Router;
use axum::response::Redirect;
use axum::routing::{get, post, put};
use leptos::prelude::*;
use leptos_axum::{LeptosRoutes, generate_route_list};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// JSON API, device endpoints, and snapshot files.
pub fn api_routes(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);
    let images = ServeDir::new(state.images_dir.as_path());

    Router::new()
        .route("/", get(redirect_root_to_app))
        // Devices
        .route("/health", get(device::health))
        .route("/check_schedule", post(device::check_schedule))
        .route("/complete_schedule", post(device::complete_schedule))
        .route("/weight_update", post(device::weight_update))
        .route("/upload_image", post(device::upload_image))
        // Dashboard
        .route("/api/snapshots", get(snapshots::list_snapshots))
        .route(
            "/api/snapshots/{key}",
            get(snapshots::list_camera_snapshots).delete(snapshots::delete_snapshot),
        )
        .route("/cameras", get(cameras::list_cameras).post(cameras::create_camera))
        .route("/cameras/{id}", put(cameras::update_camera).delete(cameras::delete_camera))
        .route("/modules", get(modules::list_modules).post(modules::create_module))
        .route("/modules/{id}", put(modules::update_module).delete(modules::delete_module))
        .route("/schedules", get(schedules::list_schedules).post(schedules::create_schedule))
        .route("/schedules/recurring", post(schedules::create_recurring))
        .route(
            "/schedules/{id}",
            put(schedules::update_schedule).delete(schedules::delete_schedule),
        )
        .route("/history", get(history::list_history).post(history::create_history))
        .route("/history/{id}", axum::routing::delete(history::delete_history))
        .route("/analytics/summary", get(analytics::summary))
        .route("/analytics/weekly", get(analytics::weekly))
        .route("/analytics/module-status", get(analytics::module_status))
        .nest_service("/snapshots", images)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn redirect_root_to_app() -> Redirect {
    Redirect::temporary("/app")
}

/// API routes plus the Leptos SSR dashboard at `/app`.
///
/// # Errors
///
/// Returns an error if the Leptos configuration cannot be loaded (missing or
/// malformed `Cargo.toml` `[package.metadata.leptos]` section).
pub fn leptos_app(state: AppState) -> Result<Router, String> {
    let conf = get_configuration(None).map_err(|e| format!("leptos configuration: {e}"))?;
    let leptos_options = conf.leptos_options;
    let routes = generate_route_list(client::app::App);

    let leptos_router = Router::new()
        .leptos_routes(&leptos_options, routes, {
            let opts = leptos_options.clone();
            move || client::app::shell(opts.clone())
        })
        .with_state(leptos_options.clone());

    let site_root_path = PathBuf::from(leptos_options.site_root.as_ref());

    Ok(api_routes(state)
        .merge(leptos_router)
        .nest_service("/pkg", ServeDir::new(site_root_path.join("pkg"))))
}
