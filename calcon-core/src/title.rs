use regex::Regex;

use crate::{Error, Result};

/// Title split into its grouping key and the remaining text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedTitle {
    /// Text between the brackets
    pub key: String,
    /// Title after the closing bracket
    pub rest: String,
}

impl ParsedTitle {
    /// File name for this key with the given extension
    ///
    /// Keys that would escape the output directory are rejected.
    pub fn file_name(&self, extension: &str) -> Result<String> {
        let key = self.key.as_str();
        if key == "." || key == ".." || key.contains(['/', '\\', '\0']) {
            return Err(Error::InvalidKey {
                key: key.to_string(),
            });
        }
        Ok(format!("{}.{}", key, extension))
    }
}

/// Extracts the `[key]` prefix of event titles
#[derive(Debug, Clone)]
pub struct TitleParser {
    pattern: Regex,
}

impl TitleParser {
    /// Parser for the `[key]` prefix
    pub fn new() -> Self {
        Self {
            pattern: Regex::new(r"^\[([^\]]+)\]").expect("title pattern is valid"),
        }
    }

    /// Splits `"[key]rest"` into `key` and `rest`
    ///
    /// The bracket must open the title and enclose at least one character.
    /// The remainder is returned as is, leading whitespace included.
    pub fn parse(&self, title: &str) -> Result<ParsedTitle> {
        let caps = self
            .pattern
            .captures(title)
            .ok_or_else(|| Error::TitleKeyMissing {
                title: title.to_string(),
            })?;

        let token = caps.get(0).map_or(0, |m| m.end());
        let key = caps.get(1).map_or("", |m| m.as_str());

        Ok(ParsedTitle {
            key: key.to_string(),
            rest: title[token..].to_string(),
        })
    }
}

impl Default for TitleParser {
    fn default() -> Self {
        Self::new()
    }
}
