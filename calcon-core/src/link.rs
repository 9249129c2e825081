//! Google Calendar "add event" links
//!
//! The link pre-fills the event form of Google Calendar through the query
//! string of its `render` endpoint.

use std::collections::BTreeMap;

use chrono::{DateTime, Offset};
use chrono_tz::Tz;

use crate::Event;

const URL_PREFIX: &str = "https://www.google.com/calendar/render?";

/// Event as seen by the Google link template
#[derive(Debug, Clone, PartialEq)]
pub struct GoogleLink {
    /// Provider id
    pub uuid: String,
    /// Title without the `[id]` prefix
    pub text: String,
    /// Start instant
    pub start_at: DateTime<Tz>,
    /// End instant
    pub end_at: Option<DateTime<Tz>>,
    /// Description
    pub details: String,
    /// Location
    pub location: String,
    /// Event page link
    pub url: String,
    /// Zone the dates are shown in
    pub time_zone: Option<Tz>,
}

impl GoogleLink {
    /// Builds the link view of an event whose title is already stripped
    pub fn new(event: &Event) -> Self {
        Self {
            uuid: event.id.clone(),
            text: event.title.clone(),
            start_at: event.display_start(),
            end_at: event.display_end(),
            details: event.description.clone(),
            location: event.location.clone(),
            url: event.url.as_ref().map(ToString::to_string).unwrap_or_default(),
            time_zone: event.time_zone,
        }
    }

    /// Query parameters in key order, empty values left out
    pub fn params(&self) -> BTreeMap<&'static str, String> {
        let mut params = BTreeMap::new();

        params.insert("action", "TEMPLATE".to_string());

        if !self.uuid.is_empty() {
            params.insert("uuid", self.uuid.clone());
        }

        if !self.text.is_empty() {
            params.insert("text", self.text.clone());
        }

        let mut dates = format_date(&self.start_at);
        if let Some(ref end_at) = self.end_at {
            dates.push('/');
            dates.push_str(&format_date(end_at));
        }
        params.insert("dates", dates);

        if !self.details.is_empty() {
            params.insert("details", self.details.clone());
        }

        if !self.location.is_empty() {
            params.insert("location", self.location.clone());
        }

        // `url` carries the location, not the event link.
        if (!self.url.is_empty() || self.time_zone.is_some()) && !self.location.is_empty() {
            params.insert("url", self.location.clone());
        }

        params
    }

    /// Absolute link with form-encoded query
    pub fn to_url(&self) -> String {
        let query = url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.params())
            .finish();
        format!("{}{}", URL_PREFIX, query)
    }
}

/// Link for a single event whose title is already stripped
pub fn link(event: &Event) -> String {
    GoogleLink::new(event).to_url()
}

/// `20060102T150405` followed by `Z` for UTC or a `+hhmm` offset
fn format_date(t: &DateTime<Tz>) -> String {
    let stamp = t.format("%Y%m%dT%H%M%S");
    if t.offset().fix().local_minus_utc() == 0 {
        format!("{}Z", stamp)
    } else {
        format!("{}{}", stamp, t.format("%z"))
    }
}
