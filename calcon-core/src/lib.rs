//! calcon core library
//!
//! Converts events of a Google Calendar into shareable "add to calendar"
//! links keyed by the `[id]` prefix of their titles, or into one ICS file
//! per event.

/// Error type
pub mod error;
/// ICS encoding
pub mod ics;
/// Add-event links
pub mod link;
/// Output formats
pub mod output;
/// Event retrieval
pub mod providers;
/// Title id parsing
pub mod title;
/// Event model
pub mod types;

// Re-export core types and error handling
pub use error::{Error, Result};
pub use types::*;

/// Commonly used items
pub mod prelude {
    pub use crate::{
        ics::*,
        link::*,
        output::*,
        providers::{EventSource, fetch_events, google::GoogleCalendarClient},
        title::*,
        types::*,
    };
}
