use std::{path::PathBuf, time::Duration};

use anyhow::{Context, Result};
use calcon_core::prelude::*;
use chrono::{DateTime, FixedOffset, Utc};

/// Conversion command parameters
pub struct ConvertParams {
    pub calendar_id: String,
    pub format: String,
    pub output: Option<PathBuf>,
    pub token: String,
    pub time_min: Option<DateTime<FixedOffset>>,
    pub time_max: Option<DateTime<FixedOffset>>,
    pub updated_min: Option<DateTime<FixedOffset>>,
    pub query: Option<String>,
    pub timeout_secs: u64,
}

/// Fetches the calendar and writes it in the requested format
pub async fn convert_command(params: ConvertParams) -> Result<()> {
    // validated before any network traffic
    let config = OutputConfig {
        format: params.format.parse()?,
        output: params.output,
    };

    let options = ListOptions {
        time_min: params.time_min.map(|t| t.with_timezone(&Utc)),
        time_max: params.time_max.map(|t| t.with_timezone(&Utc)),
        updated_min: params.updated_min.map(|t| t.with_timezone(&Utc)),
        query: params.query,
    };

    if params.token.trim().is_empty() {
        anyhow::bail!("An access token is required (--token or GOOGLE_ACCESS_TOKEN)");
    }

    tracing::info!(
        "Converting calendar {} to {}",
        params.calendar_id,
        config.format
    );

    let client = GoogleCalendarClient::new(params.token, Duration::from_secs(params.timeout_secs))?;
    let events = fetch_events(&client, &params.calendar_id, &options)
        .await
        .with_context(|| format!("calcon: listing events of {:?}", params.calendar_id))?;

    emit(&config, events).with_context(|| format!("calcon: writing {} output", config.format))?;

    Ok(())
}
