//! Domain services behind the HTTP routes. Each module owns one table family
//! and returns `FeederError` for routes to render.

pub mod analytics;
pub mod history;
pub mod inventory;
pub mod schedules;
pub mod snapshots;
