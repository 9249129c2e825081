//! Conversion of raw provider records into [`Event`]s.

use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone};
use chrono_tz::Tz;
use url::Url;

use super::raw_event::{RawEvent, RawEventTime};
use crate::{Error, Event, Result};

const FALLBACK_ZONE: &str = "UTC";

/// Converts one raw record
///
/// `default_zone` is the calendar's zone and stands in for records that do
/// not name their own. The end time is re-expressed in the start's zone.
pub fn normalize_event(raw: RawEvent, default_zone: Option<&str>) -> Result<Event> {
    let start_at = resolve_time(&raw.id, &raw.start, default_zone)?;
    let end_at = resolve_time(&raw.id, &raw.end, default_zone)?;
    let tz = start_at.timezone();

    let url = raw.html_link.as_deref().and_then(|link| match Url::parse(link) {
        Ok(url) => Some(url),
        Err(e) => {
            tracing::debug!("Ignoring htmlLink of event {}: {}", raw.id, e);
            None
        }
    });

    let attendees = raw
        .attendees
        .into_iter()
        .map(|a| a.display_name.unwrap_or_default())
        .collect();

    Ok(Event {
        id: raw.id,
        title: raw.summary,
        description: raw.description,
        start_at,
        end_at: Some(end_at.with_timezone(&tz)),
        location: raw.location,
        url,
        attendees,
        time_zone: Some(tz),
    })
}

/// Timestamp of a record boundary in its resolved zone
///
/// Date-only boundaries (all-day events) become local midnight.
fn resolve_time(
    event_id: &str,
    raw: &RawEventTime,
    default_zone: Option<&str>,
) -> Result<DateTime<Tz>> {
    if let Some(ref value) = raw.date_time {
        let parsed = DateTime::parse_from_rfc3339(value)
            .map_err(|e| timestamp_error(event_id, value, e.to_string()))?;
        let tz = resolve_zone(event_id, raw.time_zone.as_deref(), default_zone)?;
        return Ok(parsed.with_timezone(&tz));
    }

    if let Some(ref value) = raw.date {
        let date = NaiveDate::parse_from_str(value, "%Y-%m-%d")
            .map_err(|e| timestamp_error(event_id, value, e.to_string()))?;
        let tz = resolve_zone(event_id, raw.time_zone.as_deref(), default_zone)?;
        return tz
            .from_local_datetime(&date.and_time(NaiveTime::MIN))
            .earliest()
            .ok_or_else(|| {
                timestamp_error(event_id, value, format!("midnight does not exist in {}", tz.name()))
            });
    }

    Err(timestamp_error(event_id, "", "neither dateTime nor date is set"))
}

/// Record zone, else calendar zone, else UTC
fn resolve_zone(event_id: &str, name: Option<&str>, default_zone: Option<&str>) -> Result<Tz> {
    let name = name
        .filter(|n| !n.is_empty())
        .or_else(|| default_zone.filter(|n| !n.is_empty()))
        .unwrap_or(FALLBACK_ZONE);

    name.parse::<Tz>().map_err(|_| Error::UnknownTimeZone {
        event_id: event_id.to_string(),
        name: name.to_string(),
    })
}

fn timestamp_error(event_id: &str, value: &str, reason: impl Into<String>) -> Error {
    Error::TimestampParse {
        event_id: event_id.to_string(),
        value: value.to_string(),
        reason: reason.into(),
    }
}

#[cfg(test)]
mod tests {
    use chrono_tz::{America::New_York, Asia::Tokyo, Europe::Berlin};

    use super::*;
    use crate::providers::raw_event::RawAttendee;

    fn timed(date_time: &str, zone: Option<&str>) -> RawEventTime {
        RawEventTime {
            date_time: Some(date_time.to_string()),
            date: None,
            time_zone: zone.map(str::to_string),
        }
    }

    fn all_day(date: &str) -> RawEventTime {
        RawEventTime {
            date_time: None,
            date: Some(date.to_string()),
            time_zone: None,
        }
    }

    fn standup() -> RawEvent {
        RawEvent {
            id: "evt1".to_string(),
            summary: "[wk12] Standup".to_string(),
            description: "<p>Daily</p>".to_string(),
            location: "Room 4".to_string(),
            html_link: Some("https://www.google.com/calendar/event?eid=ZXZ0MQ".to_string()),
            start: timed("2024-01-08T09:00:00+09:00", Some("Asia/Tokyo")),
            end: timed("2024-01-08T09:30:00+09:00", Some("Asia/Tokyo")),
            attendees: vec![],
        }
    }

    #[test]
    fn copies_fields_verbatim() {
        let event = normalize_event(standup(), None).unwrap();
        assert_eq!(event.id, "evt1");
        assert_eq!(event.title, "[wk12] Standup");
        assert_eq!(event.description, "<p>Daily</p>");
        assert_eq!(event.location, "Room 4");
        assert_eq!(
            event.url.unwrap().as_str(),
            "https://www.google.com/calendar/event?eid=ZXZ0MQ"
        );
        assert_eq!(event.start_at, Tokyo.with_ymd_and_hms(2024, 1, 8, 9, 0, 0).unwrap());
        assert_eq!(event.time_zone, Some(Tokyo));
    }

    #[test]
    fn end_is_moved_into_start_zone() {
        let raw = RawEvent {
            start: timed("2024-01-08T09:00:00+01:00", Some("Europe/Berlin")),
            end: timed("2024-01-08T03:30:00-05:00", Some("America/New_York")),
            ..standup()
        };
        let event = normalize_event(raw, None).unwrap();
        let end = event.end_at.unwrap();
        assert_eq!(end.timezone(), Berlin);
        assert_eq!(end.timezone(), event.start_at.timezone());
        assert_eq!(end, Berlin.with_ymd_and_hms(2024, 1, 8, 9, 30, 0).unwrap());
    }

    #[test]
    fn missing_zone_falls_back_to_calendar_then_utc() {
        let raw = RawEvent {
            start: timed("2024-01-08T14:00:00Z", None),
            end: timed("2024-01-08T15:00:00Z", Some("")),
            ..standup()
        };
        let event = normalize_event(raw.clone(), Some("America/New_York")).unwrap();
        assert_eq!(event.time_zone, Some(New_York));
        assert_eq!(
            event.start_at,
            New_York.with_ymd_and_hms(2024, 1, 8, 9, 0, 0).unwrap()
        );

        let event = normalize_event(raw, None).unwrap();
        assert_eq!(event.time_zone, Some(Tz::UTC));
    }

    #[test]
    fn attendees_keep_order_and_placeholders() {
        let raw = RawEvent {
            attendees: vec![
                RawAttendee {
                    display_name: Some("Bob".to_string()),
                    email: None,
                },
                RawAttendee {
                    display_name: None,
                    email: Some("nobody@example.com".to_string()),
                },
                RawAttendee {
                    display_name: Some("Alice".to_string()),
                    email: None,
                },
            ],
            ..standup()
        };
        let event = normalize_event(raw, None).unwrap();
        assert_eq!(event.attendees, vec!["Bob", "", "Alice"]);
    }

    #[test]
    fn all_day_events_start_at_local_midnight() {
        let raw = RawEvent {
            start: all_day("2024-01-09"),
            end: all_day("2024-01-10"),
            ..standup()
        };
        let event = normalize_event(raw, Some("Asia/Tokyo")).unwrap();
        assert_eq!(event.start_at, Tokyo.with_ymd_and_hms(2024, 1, 9, 0, 0, 0).unwrap());
        assert_eq!(
            event.end_at,
            Some(Tokyo.with_ymd_and_hms(2024, 1, 10, 0, 0, 0).unwrap())
        );
    }

    #[test]
    fn unknown_zone_is_rejected() {
        let raw = RawEvent {
            start: timed("2024-01-08T09:00:00+09:00", Some("Nowhere/Fake")),
            ..standup()
        };
        match normalize_event(raw, None).unwrap_err() {
            Error::UnknownTimeZone { event_id, name } => {
                assert_eq!(event_id, "evt1");
                assert_eq!(name, "Nowhere/Fake");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn malformed_timestamps_are_rejected() {
        for start in [
            timed("2024-01-08 09:00", Some("Asia/Tokyo")),
            all_day("09/01/2024"),
            RawEventTime::default(),
        ] {
            let raw = RawEvent {
                start,
                ..standup()
            };
            assert!(matches!(
                normalize_event(raw, None),
                Err(Error::TimestampParse { ref event_id, .. }) if event_id == "evt1"
            ));
        }
    }

    #[test]
    fn unparsable_link_is_dropped() {
        let raw = RawEvent {
            html_link: Some("not a url".to_string()),
            ..standup()
        };
        assert_eq!(normalize_event(raw, None).unwrap().url, None);
    }
}
