use thiserror::Error;

/// Errors of a conversion run
#[derive(Error, Debug)]
pub enum Error {
    /// Provider call failed or returned an unusable response
    #[error("Failed to retrieve events of calendar {calendar_id:?}: {message}")]
    Retrieval {
        calendar_id: String,
        message: String,
    },

    /// Start or end time could not be parsed
    #[error("Event {event_id:?} has an unparsable timestamp {value:?}: {reason}")]
    TimestampParse {
        event_id: String,
        value: String,
        reason: String,
    },

    /// Zone name is not a known IANA zone
    #[error("Event {event_id:?} uses an unknown time zone {name:?}")]
    UnknownTimeZone { event_id: String, name: String },

    /// Title has no `[id]` prefix
    #[error("Title {title:?} does not have id")]
    TitleKeyMissing { title: String },

    /// Id cannot name an output file
    #[error("Id {key:?} cannot be used as a file name")]
    InvalidKey { key: String },

    /// Output could not be encoded or written
    #[error("Encoding failed: {0}")]
    Encoding(String),

    /// Filesystem failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON output failure
    #[error("JSON encoding failed: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV output failure
    #[error("CSV encoding failed: {0}")]
    Csv(#[from] csv::Error),

    /// Output format selector not recognized
    #[error("Unexpected format: {0:?}")]
    UnsupportedFormat(String),

    /// Client could not be set up
    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Result alias of the library
pub type Result<T> = std::result::Result<T, Error>;
