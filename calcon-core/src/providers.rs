/// Shared HTTP plumbing
pub mod base;
/// Google Calendar API client
pub mod google;
/// Raw record conversion
pub mod normalize;
/// Calendar API wire types
pub mod raw_event;

use async_trait::async_trait;

use crate::{Event, ListOptions, Result};

pub use base::*;
pub use normalize::normalize_event;
pub use raw_event::{EventList, RawAttendee, RawEvent, RawEventTime};

/// Source of raw event records
#[async_trait]
pub trait EventSource: Send + Sync {
    /// Provider name
    fn name(&self) -> &str;

    /// Provider description
    fn description(&self) -> &str;

    /// Lists every record of a calendar in provider order
    ///
    /// The options are handed to the provider as they are.
    async fn list_events(&self, calendar_id: &str, options: &ListOptions) -> Result<EventList>;
}

/// Retrieves a calendar's events and normalizes them
///
/// Order is preserved. The first record that fails to convert aborts the
/// whole retrieval.
pub async fn fetch_events<S>(
    source: &S,
    calendar_id: &str,
    options: &ListOptions,
) -> Result<Vec<Event>>
where
    S: EventSource + ?Sized,
{
    let list = source.list_events(calendar_id, options).await?;
    tracing::info!(
        "Retrieved {} events of calendar {} from {} ({})",
        list.items.len(),
        calendar_id,
        source.name(),
        source.description()
    );

    let default_zone = list.time_zone.as_deref();
    list.items
        .into_iter()
        .map(|raw| normalize_event(raw, default_zone))
        .collect()
}
