//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components render dashboard chrome (navigation, toasts, charts, modals)
//! while reading shared state from Leptos context providers.

pub mod bar_chart;
pub mod export_button;
pub mod image_modal;
pub mod nav_bar;
pub mod pie_chart;
pub mod status_badge;
pub mod toast_stack;
