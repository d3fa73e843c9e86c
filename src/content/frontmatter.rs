//! Front-matter parsing

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;
use thiserror::Error;

/// Failure to decode a front-matter block.
///
/// Only delimited blocks can fail: a document with no opening delimiter
/// simply has no front matter.
#[derive(Debug, Error)]
pub enum FrontMatterError {
    /// An opening delimiter with no matching closing delimiter
    #[error("front-matter block is not terminated")]
    Unterminated,

    #[error("invalid YAML front matter: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("invalid JSON front matter: {0}")]
    Json(#[from] serde_json::Error),
}

/// Custom deserializer that handles both a single string and a list of
/// strings. A single string is split on commas, which is the shape the
/// authoring form submits for tags.
fn string_or_seq<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::{self, SeqAccess, Visitor};
    use std::fmt;

    struct StringOrSeq;

    impl<'de> Visitor<'de> for StringOrSeq {
        type Value = Vec<String>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a string or a list of strings")
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(value
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect())
        }

        fn visit_seq<S>(self, mut seq: S) -> Result<Self::Value, S::Error>
        where
            S: SeqAccess<'de>,
        {
            let mut items = Vec::new();
            while let Some(item) = seq.next_element::<String>()? {
                items.push(item);
            }
            Ok(items)
        }

        fn visit_none<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Vec::new())
        }

        fn visit_unit<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Vec::new())
        }
    }

    deserializer.deserialize_any(StringOrSeq)
}

/// Front-matter data of a post
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FrontMatter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Publication date as written; kept as a string, parsed only for
    /// ordering
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,

    #[serde(
        deserialize_with = "string_or_seq",
        default,
        skip_serializing_if = "Vec::is_empty"
    )]
    pub tags: Vec<String>,

    /// Additional custom fields
    #[serde(flatten)]
    pub extra: HashMap<String, serde_yaml::Value>,
}

impl FrontMatter {
    /// Split a document into front matter and body.
    ///
    /// Supports a YAML block fenced by `---` lines and a JSON block fenced
    /// by `;;;`. A document that starts with neither has no front matter
    /// and is returned whole as the body. A fenced block that does not
    /// parse is an error.
    pub fn parse(content: &str) -> Result<(Self, &str), FrontMatterError> {
        let content = content.trim_start();

        if let Some(rest) = content.strip_prefix("---") {
            let Some(end) = rest.find("\n---") else {
                return Err(FrontMatterError::Unterminated);
            };
            let block = rest[..end].trim();
            let body = rest[end + 4..].trim_start_matches(['\n', '\r']);

            if block.is_empty() {
                return Ok((FrontMatter::default(), body));
            }
            let fm = serde_yaml::from_str(block)?;
            return Ok((fm, body));
        }

        if let Some(rest) = content.strip_prefix(";;;") {
            let Some(end) = rest.find(";;;") else {
                return Err(FrontMatterError::Unterminated);
            };
            let fm = serde_json::from_str(&rest[..end])?;
            let body = rest[end + 3..].trim_start_matches(['\n', '\r']);
            return Ok((fm, body));
        }

        Ok((FrontMatter::default(), content))
    }

    /// Parse the date string into a sortable timestamp
    pub fn parse_date(&self) -> Option<NaiveDateTime> {
        self.date.as_deref().and_then(parse_date_string)
    }
}

/// Parse a date string in the formats post authors actually write
fn parse_date_string(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();

    let datetime_formats = [
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
        "%Y-%m-%dT%H:%M:%S",
        "%Y/%m/%d %H:%M:%S",
    ];
    for fmt in datetime_formats {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt);
        }
    }

    for fmt in ["%Y-%m-%d", "%Y/%m/%d"] {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return d.and_hms_opt(0, 0, 0);
        }
    }

    DateTime::parse_from_rfc3339(s).ok().map(|dt| dt.naive_utc())
}
