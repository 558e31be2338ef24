//! Utility helpers shared across client UI modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Utility modules isolate browser/environment concerns (timers, the PDF
//! converter, the clock) from page and component logic to improve reuse and
//! testability.

pub mod chart;
pub mod clock;
pub mod format;
pub mod pdf;
pub mod poll;
