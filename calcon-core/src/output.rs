//! Output encodings and the dispatch entry point of a conversion run.

use std::{
    collections::BTreeMap,
    fmt,
    fs::{self, File},
    io::{self, BufWriter, Write},
    path::{Path, PathBuf},
    str::FromStr,
};

use crate::{Error, Event, Result, ics::IcsGenerator, link, title::TitleParser};

/// Directory used for `ics` output when none is configured
pub const DEFAULT_ICS_DIR: &str = "ics";

const PLAIN_TEXT_WIDTH: usize = 10_000;

/// Output encoding selector
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// `ID,URL` table of add-event links
    GoogleCsv,
    /// JSON object mapping id to add-event link
    #[default]
    GoogleJson,
    /// One ICS file per event
    Ics,
}

impl OutputFormat {
    /// Every selector, in help order
    pub const ALL: [Self; 3] = [Self::GoogleCsv, Self::GoogleJson, Self::Ics];

    /// Name used on the command line
    pub fn as_str(self) -> &'static str {
        match self {
            Self::GoogleCsv => "google-csv",
            Self::GoogleJson => "google-json",
            Self::Ics => "ics",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|format| format.as_str() == s)
            .ok_or_else(|| Error::UnsupportedFormat(s.to_string()))
    }
}

/// Per-run output settings
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutputConfig {
    /// Selected encoding
    pub format: OutputFormat,
    /// File for link formats, directory for `ics`; stdout / [`DEFAULT_ICS_DIR`] when `None`
    pub output: Option<PathBuf>,
}

/// Builds the add-event link of every event, keyed by title id
///
/// A repeated id keeps the link of its last event.
pub fn google_links(events: Vec<Event>, parser: &TitleParser) -> Result<BTreeMap<String, String>> {
    let mut links = BTreeMap::new();

    for event in events {
        let parsed = parser.parse(&event.title)?;
        let event = event.with_title(parsed.rest);
        if links.insert(parsed.key.clone(), link::link(&event)).is_some() {
            tracing::warn!("Duplicate id {:?}, keeping the last event", parsed.key);
        }
    }

    Ok(links)
}

/// Writes the `ID,URL` table sorted by id
pub fn write_csv<W: Write>(w: W, links: &BTreeMap<String, String>) -> Result<()> {
    let mut writer = csv::Writer::from_writer(w);

    writer.write_record(["ID", "URL"])?;
    for (id, url) in links {
        writer.write_record([id, url])?;
    }

    writer.flush()?;
    Ok(())
}

/// Writes the id to link object followed by a newline
pub fn write_json<W: Write>(mut w: W, links: &BTreeMap<String, String>) -> Result<()> {
    serde_json::to_writer(&mut w, links)?;
    w.write_all(b"\n")?;
    w.flush()?;
    Ok(())
}

/// Writes `<id>.ics` into `dir` for every event
///
/// The directory is created when missing. Descriptions are turned into plain
/// text first. Returns the written paths in event order.
pub fn write_ics_dir(
    dir: &Path,
    events: Vec<Event>,
    parser: &TitleParser,
    generator: &IcsGenerator,
) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(dir)?;

    let mut written = Vec::with_capacity(events.len());
    for event in events {
        let parsed = parser.parse(&event.title)?;
        let path = dir.join(parsed.file_name("ics")?);
        let description = plain_text(&event.description)?;
        let event = event.with_title(parsed.rest).with_description(description);

        if written.contains(&path) {
            tracing::warn!("Duplicate id {:?}, overwriting {}", parsed.key, path.display());
        }

        let file = File::create(&path)?;
        generator.write_to(BufWriter::new(file), std::slice::from_ref(&event))?;
        tracing::debug!("Wrote {}", path.display());
        written.push(path);
    }

    Ok(written)
}

/// HTML to plain text without carriage returns
pub fn plain_text(html: &str) -> Result<String> {
    if html.is_empty() {
        return Ok(String::new());
    }
    let text = html2text::config::plain()
        .raw_mode(true)
        .string_from_read(html.as_bytes(), PLAIN_TEXT_WIDTH)
        .map_err(|e| Error::Encoding(format!("Failed to convert description: {}", e)))?;
    Ok(text.trim_end_matches('\n').replace('\r', ""))
}

/// Writes `events` in the configured format to the configured destination
pub fn emit(config: &OutputConfig, events: Vec<Event>) -> Result<()> {
    let parser = TitleParser::new();

    match config.format {
        OutputFormat::GoogleCsv | OutputFormat::GoogleJson => {
            let links = google_links(events, &parser)?;
            match config.output {
                Some(ref path) => {
                    let file = File::create(path)?;
                    write_links(config.format, BufWriter::new(file), &links)?;
                    tracing::info!("Wrote {} links to {}", links.len(), path.display());
                }
                None => write_links(config.format, io::stdout().lock(), &links)?,
            }
        }
        OutputFormat::Ics => {
            let dir = config
                .output
                .clone()
                .unwrap_or_else(|| PathBuf::from(DEFAULT_ICS_DIR));
            let written = write_ics_dir(&dir, events, &parser, &IcsGenerator::default())?;
            tracing::info!("Wrote {} ICS files to {}", written.len(), dir.display());
        }
    }

    Ok(())
}

fn write_links<W: Write>(
    format: OutputFormat,
    w: W,
    links: &BTreeMap<String, String>,
) -> Result<()> {
    match format {
        OutputFormat::GoogleCsv => write_csv(w, links),
        OutputFormat::GoogleJson => write_json(w, links),
        OutputFormat::Ics => Err(Error::UnsupportedFormat(format.to_string())),
    }
}
