use std::io::Write;

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use uuid::Uuid;

use crate::{Error, Event, Result};


const UTC_FORMAT: &str = "%Y%m%dT%H%M%SZ";
const MAX_LINE_OCTETS: usize = 75;

/// ICS generation options
#[derive(Debug, Clone)]
pub struct IcsOptions {
    /// PRODID of the generated calendar
    pub product_id: String,
}

impl Default for IcsOptions {
    fn default() -> Self {
        Self {
            product_id: "-//calcon//calcon//EN".to_string(),
        }
    }
}

/// ICS calendar generator
pub struct IcsGenerator {
    options: IcsOptions,
}

impl IcsGenerator {
    /// Creates a generator with the given options
    pub fn new(options: IcsOptions) -> Self {
        Self { options }
    }

    /// Generates one VCALENDAR holding a VEVENT per event
    pub fn generate(&self, events: &[Event]) -> String {
        self.generate_at(events, Utc::now())
    }

    /// Like [`generate`](Self::generate) with a fixed creation time
    pub fn generate_at(&self, events: &[Event], now: DateTime<Utc>) -> String {
        let mut ics_content = String::new();

        push_line(&mut ics_content, "BEGIN:VCALENDAR");
        push_line(&mut ics_content, "VERSION:2.0");
        push_line(
            &mut ics_content,
            &format!("PRODID:{}", self.options.product_id),
        );
        push_line(&mut ics_content, "CALSCALE:GREGORIAN");
        push_line(&mut ics_content, "METHOD:PUBLISH");

        for event in events {
            self.add_event(&mut ics_content, event, now);
        }

        push_line(&mut ics_content, "END:VCALENDAR");

        ics_content
    }

    /// Writes the generated calendar to `w` and flushes it
    pub fn write_to<W: Write>(&self, mut w: W, events: &[Event]) -> Result<()> {
        let content = self.generate(events);
        w.write_all(content.as_bytes())
            .and_then(|()| w.flush())
            .map_err(|e| Error::Encoding(format!("Failed to write ICS: {}", e)))
    }

    fn add_event(&self, ics_content: &mut String, event: &Event, now: DateTime<Utc>) {
        let uid = if event.id.is_empty() {
            Uuid::new_v4().to_string()
        } else {
            event.id.clone()
        };
        let stamp = now.format(UTC_FORMAT).to_string();

        push_line(ics_content, "BEGIN:VEVENT");
        push_line(ics_content, &format!("UID:{}", escape_text(&uid)));
        push_line(ics_content, &format!("CREATED:{}", stamp));
        push_line(ics_content, &format!("DTSTAMP:{}", stamp));
        push_line(ics_content, &format!("LAST-MODIFIED:{}", stamp));
        push_line(
            ics_content,
            &date_time_property("DTSTART", &event.display_start()),
        );
        if let Some(end) = event.display_end() {
            push_line(ics_content, &date_time_property("DTEND", &end));
        }
        push_line(
            ics_content,
            &format!("SUMMARY:{}", escape_text(&event.title)),
        );
        push_line(
            ics_content,
            &format!("LOCATION:{}", escape_text(&event.location)),
        );
        push_line(
            ics_content,
            &format!("DESCRIPTION:{}", escape_text(&event.description)),
        );
        if let Some(ref url) = event.url {
            push_line(ics_content, &format!("URL:{}", url));
        }

        for attendee in &event.attendees {
            push_line(ics_content, &attendee_property(attendee));
        }

        push_line(ics_content, "END:VEVENT");
    }
}

impl Default for IcsGenerator {
    fn default() -> Self {
        Self::new(IcsOptions::default())
    }
}

/// DTSTART/DTEND line as UTC time, no VTIMEZONE needed
fn date_time_property(name: &str, t: &DateTime<Tz>) -> String {
    format!("{}:{}", name, t.with_timezone(&Utc).format(UTC_FORMAT))
}

fn attendee_property(name: &str) -> String {
    let name: String = name.chars().filter(|c| !c.is_control()).collect();
    if name.is_empty() {
        return "ATTENDEE:mailto:".to_string();
    }
    format!("ATTENDEE;CN={}:mailto:{}", param_value(&name), name)
}

/// Quotes a parameter value when it holds a delimiter; DQUOTE itself is not allowed
fn param_value(value: &str) -> String {
    let value: String = value.chars().filter(|&c| c != '"').collect();
    if value.contains([':', ';', ',']) {
        format!("\"{}\"", value)
    } else {
        value
    }
}

/// Escapes a TEXT value
fn escape_text(text: &str) -> String {
    text.replace('\\', "\\\\")
        .replace('\r', "")
        .replace('\n', "\\n")
        .replace(',', "\\,")
        .replace(';', "\\;")
}

/// Appends a CRLF terminated content line folded at 75 octets
fn push_line(ics_content: &mut String, line: &str) {
    let mut start = 0;
    let mut limit = MAX_LINE_OCTETS;

    while line.len() - start > limit {
        let mut end = start + limit;
        while !line.is_char_boundary(end) {
            end -= 1;
        }
        ics_content.push_str(&line[start..end]);
        ics_content.push_str("\r\n ");
        start = end;
        // continuation lines lose one octet to the leading space
        limit = MAX_LINE_OCTETS - 1;
    }

    ics_content.push_str(&line[start..]);
    ics_content.push_str("\r\n");
}
