mod commands;

use std::{path::PathBuf, process::ExitCode};

use chrono::{DateTime, FixedOffset};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "calcon")]
#[command(about = "Convert Google Calendar events into add-to-calendar links or ICS files")]
#[command(version)]
struct Cli {
    /// Calendar ID, e.g. `primary` or `team@group.calendar.google.com`
    calendar_id: String,

    /// Output format (google-csv, google-json, ics)
    #[arg(short, long, default_value = "google-json")]
    format: String,

    /// Output file, or output directory for ics (default: stdout / ./ics)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// OAuth2 access token for the Google Calendar API
    #[arg(long, env = "GOOGLE_ACCESS_TOKEN", hide_env_values = true)]
    token: String,

    /// Only events ending after this RFC 3339 time
    #[arg(long)]
    time_min: Option<DateTime<FixedOffset>>,

    /// Only events starting before this RFC 3339 time
    #[arg(long)]
    time_max: Option<DateTime<FixedOffset>>,

    /// Only events modified after this RFC 3339 time
    #[arg(long)]
    updated_min: Option<DateTime<FixedOffset>>,

    /// Free text search
    #[arg(short, long)]
    query: Option<String>,

    /// HTTP timeout in seconds
    #[arg(long, default_value = "30")]
    timeout: u64,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };

    // stdout carries the links
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!("calcon={},calcon_core={}", log_level, log_level).into()
            }),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let result = commands::convert_command(commands::ConvertParams {
        calendar_id: cli.calendar_id,
        format: cli.format,
        output: cli.output,
        token: cli.token,
        time_min: cli.time_min,
        time_max: cli.time_max,
        updated_min: cli.updated_min,
        query: cli.query,
        timeout_secs: cli.timeout,
    })
    .await;

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            // one line, causes joined
            eprintln!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_defaults() {
        let cli = Cli::try_parse_from(["calcon", "--token", "t", "primary"]).unwrap();
        assert_eq!(cli.calendar_id, "primary");
        assert_eq!(cli.format, "google-json");
        assert_eq!(cli.output, None);
        assert_eq!(cli.timeout, 30);
        assert!(cli.time_min.is_none());
    }

    #[test]
    fn parses_filters() {
        let cli = Cli::try_parse_from([
            "calcon",
            "--token",
            "t",
            "-f",
            "ics",
            "-o",
            "out",
            "--time-min",
            "2024-01-01T00:00:00+09:00",
            "--updated-min",
            "2024-01-02T00:00:00Z",
            "-q",
            "[wk",
            "team@group.calendar.google.com",
        ])
        .unwrap();
        assert_eq!(cli.format, "ics");
        assert_eq!(cli.output, Some(PathBuf::from("out")));
        assert_eq!(
            cli.time_min.unwrap().to_rfc3339(),
            "2024-01-01T00:00:00+09:00"
        );
        assert!(cli.updated_min.is_some());
        assert_eq!(cli.query.as_deref(), Some("[wk"));
    }

    #[test]
    fn rejects_bad_timestamps() {
        assert!(
            Cli::try_parse_from(["calcon", "--token", "t", "--time-max", "yesterday", "primary"])
                .is_err()
        );
    }
}
