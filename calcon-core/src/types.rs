use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use url::Url;

/// Normalized calendar event
///
/// Every provider record is converted into this form before any encoder
/// touches it. `end_at`, when set, always lives in the zone of `start_at`.
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    /// Provider-assigned identifier
    pub id: String,
    /// Event name, possibly prefixed with a bracketed grouping key
    pub title: String,
    /// Free text, may contain HTML
    pub description: String,
    /// Start instant in the record's zone
    pub start_at: DateTime<Tz>,
    /// End instant, same zone as the start
    pub end_at: Option<DateTime<Tz>>,
    /// Free-form location
    pub location: String,
    /// Canonical link to the event, if the provider exposes one
    pub url: Option<Url>,
    /// Attendee display names in source order
    pub attendees: Vec<String>,
    /// Zone the times are displayed and encoded in
    pub time_zone: Option<Tz>,
}

impl Event {
    /// Returns the same event with `title` replaced
    #[must_use]
    pub fn with_title(self, title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..self
        }
    }

    /// Returns the same event with `description` replaced
    #[must_use]
    pub fn with_description(self, description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            ..self
        }
    }

    /// Start time in the display zone
    pub fn display_start(&self) -> DateTime<Tz> {
        match self.time_zone {
            Some(tz) => self.start_at.with_timezone(&tz),
            None => self.start_at,
        }
    }

    /// End time in the display zone
    pub fn display_end(&self) -> Option<DateTime<Tz>> {
        self.end_at.map(|end| match self.time_zone {
            Some(tz) => end.with_timezone(&tz),
            None => end,
        })
    }
}

/// Filters for an event listing call
///
/// Every field is handed to the provider untouched; `None` means the filter
/// is not sent at all.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListOptions {
    /// Lower bound (exclusive) for an event's end time
    pub time_min: Option<DateTime<Utc>>,
    /// Upper bound (exclusive) for an event's start time
    pub time_max: Option<DateTime<Utc>>,
    /// Lower bound for an event's last modification time
    pub updated_min: Option<DateTime<Utc>>,
    /// Free text search
    pub query: Option<String>,
}
