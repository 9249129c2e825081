//! Event records as returned by the Google Calendar `events.list` call.
//!
//! Only the fields used by the conversion are declared; everything else in
//! the response is ignored during deserialization.

use serde::{Deserialize, Serialize};

/// One page of an `events.list` response
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventsPage {
    /// Records of this page
    #[serde(default)]
    pub items: Vec<RawEvent>,
    /// Default zone of the calendar
    #[serde(default)]
    pub time_zone: Option<String>,
    /// Token of the next page, absent on the last one
    #[serde(default)]
    pub next_page_token: Option<String>,
}

/// All records of a listing, pages concatenated
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventList {
    /// Records of every page
    pub items: Vec<RawEvent>,
    /// Default zone of the calendar, used when a record names none
    pub time_zone: Option<String>,
}

/// One record of `events.list`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawEvent {
    /// Provider id
    #[serde(default)]
    pub id: String,
    /// Title
    #[serde(default)]
    pub summary: String,
    /// HTML description
    #[serde(default)]
    pub description: String,
    /// Free-form location
    #[serde(default)]
    pub location: String,
    /// Event page in the Calendar UI
    #[serde(default)]
    pub html_link: Option<String>,
    /// Start time
    #[serde(default)]
    pub start: RawEventTime,
    /// End time
    #[serde(default)]
    pub end: RawEventTime,
    /// Guests in provider order
    #[serde(default)]
    pub attendees: Vec<RawAttendee>,
}

/// Start or end of a record
///
/// Timed events carry `date_time`, all-day events carry `date` only.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawEventTime {
    /// RFC 3339 timestamp
    #[serde(default)]
    pub date_time: Option<String>,
    /// `yyyy-mm-dd`
    #[serde(default)]
    pub date: Option<String>,
    /// IANA zone name
    #[serde(default)]
    pub time_zone: Option<String>,
}

/// Guest of a record
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawAttendee {
    /// Name shown in the guest list
    #[serde(default)]
    pub display_name: Option<String>,
    /// Guest address
    #[serde(default)]
    pub email: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_events_page() {
        let body = r#"{
            "kind": "calendar#events",
            "summary": "Team",
            "timeZone": "Asia/Tokyo",
            "nextPageToken": "p2",
            "items": [{
                "id": "evt1",
                "status": "confirmed",
                "htmlLink": "https://www.google.com/calendar/event?eid=ZXZ0MQ",
                "summary": "[wk12] Standup",
                "start": {"dateTime": "2024-01-08T09:00:00+09:00", "timeZone": "Asia/Tokyo"},
                "end": {"dateTime": "2024-01-08T09:30:00+09:00", "timeZone": "Asia/Tokyo"},
                "attendees": [
                    {"email": "alice@example.com", "displayName": "Alice"},
                    {"email": "bob@example.com"}
                ]
            }, {
                "id": "evt2",
                "summary": "[hol] Holiday",
                "start": {"date": "2024-01-09"},
                "end": {"date": "2024-01-10"}
            }]
        }"#;

        let page: EventsPage = serde_json::from_str(body).unwrap();
        assert_eq!(page.time_zone.as_deref(), Some("Asia/Tokyo"));
        assert_eq!(page.next_page_token.as_deref(), Some("p2"));
        assert_eq!(page.items.len(), 2);

        let first = &page.items[0];
        assert_eq!(first.id, "evt1");
        assert_eq!(first.description, "");
        assert_eq!(
            first.start.date_time.as_deref(),
            Some("2024-01-08T09:00:00+09:00")
        );
        assert_eq!(first.attendees[0].display_name.as_deref(), Some("Alice"));
        assert_eq!(first.attendees[1].display_name, None);

        let second = &page.items[1];
        assert_eq!(second.start.date.as_deref(), Some("2024-01-09"));
        assert_eq!(second.start.date_time, None);
        assert!(second.attendees.is_empty());
    }

    #[test]
    fn decodes_empty_page() {
        let page: EventsPage = serde_json::from_str(r#"{"kind": "calendar#events"}"#).unwrap();
        assert_eq!(page, EventsPage::default());
    }
}
