//! Wall-clock access for views.
//!
//! Pure code takes dates as arguments; only views call in here.

use chrono::{Local, NaiveDate};

/// Today's date in the browser's local zone.
#[must_use]
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Human-readable local timestamp for report headers.
#[must_use]
pub fn report_timestamp() -> String {
    Local::now().format("%m/%d/%Y, %I:%M:%S %p").to_string()
}

/// Ask the user to confirm a destructive action. Always true during SSR.
#[must_use]
pub fn confirm(message: &str) -> bool {
    #[cfg(feature = "hydrate")]
    {
        web_sys::window()
            .and_then(|w| w.confirm_with_message(message).ok())
            .unwrap_or(false)
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = message;
        true
    }
}
