//! Per-view controller state.
//!
//! DESIGN
//! ======
//! Each view owns one plain state struct, held in an `RwSignal` and provided
//! through Leptos context by the root `App`. The structs carry no signals or
//! browser handles themselves, so their transitions are unit-tested natively.

pub mod analytics;
pub mod gallery;
pub mod history;
pub mod modules;
pub mod refresh;
pub mod schedule;
pub mod toast;
