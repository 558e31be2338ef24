//! Networking modules for the feeder REST API.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` performs the HTTP calls each view polls with, and `types` defines
//! the JSON schema shared with the backend.

pub mod api;
pub mod types;
