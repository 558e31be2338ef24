//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Each page owns its polling loop and mutation orchestration and delegates
//! rendering details to `components`.

pub mod analytics;
pub mod camera;
pub mod history;
pub mod modules;
pub mod schedules;
