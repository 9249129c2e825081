use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};

use super::{
    BaseProvider, BaseProviderBuilder, EventSource, ProviderInfo,
    raw_event::{EventList, EventsPage},
};
use crate::{ListOptions, Result};

/// Google Calendar API v3 client bound to one access token
pub struct GoogleCalendarClient {
    base: BaseProvider,
    api_root: String,
    access_token: String,
}

impl GoogleCalendarClient {
    const API_ROOT: &'static str = "https://www.googleapis.com/calendar/v3";

    /// Client with the given bearer token and HTTP timeout
    pub fn new(access_token: impl Into<String>, timeout: Duration) -> Result<Self> {
        let base = BaseProviderBuilder::new_with_timeout(
            ProviderInfo {
                name: "google".to_string(),
                description: "Google Calendar API v3".to_string(),
            },
            timeout,
        );

        Ok(Self {
            base: base.build()?,
            api_root: Self::API_ROOT.to_string(),
            access_token: access_token.into(),
        })
    }

    /// Points the client at another API root, e.g. a local test server
    #[must_use]
    pub fn with_api_root(mut self, api_root: impl Into<String>) -> Self {
        self.api_root = api_root.into().trim_end_matches('/').to_string();
        self
    }

    fn events_url(&self, calendar_id: &str) -> Result<url::Url> {
        let mut url = url::Url::parse(&self.api_root)
            .map_err(|e| self.base.custom_error(calendar_id, format!("Invalid API root: {}", e)))?;
        url.path_segments_mut()
            .map_err(|()| self.base.custom_error(calendar_id, "API root cannot be a base"))?
            .extend(["calendars", calendar_id, "events"]);
        Ok(url)
    }

    async fn list_events_page(
        &self,
        calendar_id: &str,
        options: &ListOptions,
        page_token: Option<&str>,
    ) -> Result<EventsPage> {
        let url = self.events_url(calendar_id)?;
        let query = list_query(options, page_token);

        let response = self
            .base
            .client
            .get(url)
            .bearer_auth(&self.access_token)
            .query(&query)
            .send()
            .await
            .map_err(|e| self.base.handle_error_req(calendar_id, &e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(self
                .base
                .custom_error(calendar_id, format!("HTTP {} error: {}", status, body.trim())));
        }

        response
            .json()
            .await
            .map_err(|e| self.base.handle_error_req(calendar_id, &e))
    }
}

#[async_trait]
impl EventSource for GoogleCalendarClient {
    fn name(&self) -> &str {
        &self.base.info.name
    }

    fn description(&self) -> &str {
        &self.base.info.description
    }

    async fn list_events(&self, calendar_id: &str, options: &ListOptions) -> Result<EventList> {
        let mut list = EventList::default();
        let mut page_token: Option<String> = None;

        loop {
            let page = self
                .list_events_page(calendar_id, options, page_token.as_deref())
                .await?;
            tracing::debug!(
                "Fetched {} events of calendar {}",
                page.items.len(),
                calendar_id
            );

            if list.time_zone.is_none() {
                list.time_zone = page.time_zone;
            }
            list.items.extend(page.items);

            match page.next_page_token {
                Some(token) if page_token.as_deref() == Some(token.as_str()) => {
                    tracing::warn!(
                        "Calendar {} returned page token {:?} again, stopping",
                        calendar_id,
                        token
                    );
                    break;
                }
                Some(token) if !token.is_empty() => page_token = Some(token),
                _ => break,
            }
        }

        Ok(list)
    }
}

/// Query string of an `events.list` call
fn list_query(options: &ListOptions, page_token: Option<&str>) -> Vec<(&'static str, String)> {
    let mut query = Vec::new();

    if let Some(t) = options.time_min {
        query.push(("timeMin", rfc3339(t)));
    }
    if let Some(t) = options.time_max {
        query.push(("timeMax", rfc3339(t)));
    }
    if let Some(t) = options.updated_min {
        query.push(("updatedMin", rfc3339(t)));
    }
    if let Some(ref q) = options.query {
        query.push(("q", q.clone()));
    }
    if let Some(token) = page_token {
        query.push(("pageToken", token.to_string()));
    }

    query
}

fn rfc3339(t: DateTime<Utc>) -> String {
    t.to_rfc3339_opts(SecondsFormat::Secs, true)
}
