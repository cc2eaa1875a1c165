//! Supporting-document extraction.
//!
//! `message_end` events carry candidate documents whose metadata is packed
//! into one string: `key: value` segments separated by `;`. This module turns
//! those into validated [`Article`]s. A bad record is dropped on its own; it
//! never takes the rest of the batch with it.

mod markup;

pub use markup::normalize_emphasis;

use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;

use crate::models::{Article, RawResource};

/// Title and content must each have at least this many characters.
pub const MIN_FIELD_CHARS: usize = 2;

const SEGMENT_SEPARATOR: char = ';';
const KEY_VALUE_SEPARATOR: &str = ": ";

/// Why a resource was dropped.
#[derive(Debug, Clone, PartialEq)]
pub enum ResourceError {
    /// The entry is not an object with a string `content`
    Malformed(String),
    /// A required key is absent from the content string
    MissingField(&'static str),
    /// A required value is shorter than [`MIN_FIELD_CHARS`]
    TooShort { field: &'static str, chars: usize },
}

impl fmt::Display for ResourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceError::Malformed(msg) => write!(f, "malformed resource: {}", msg),
            ResourceError::MissingField(field) => write!(f, "missing field '{}'", field),
            ResourceError::TooShort { field, chars } => {
                write!(f, "field '{}' too short ({} chars)", field, chars)
            }
        }
    }
}

impl std::error::Error for ResourceError {}

/// Split a content string into its `key: value` map.
///
/// Each `;` segment is split at the first `": "`. Keys and values are
/// trimmed; a segment without the separator maps to an empty value. The last
/// occurrence of a repeated key wins.
pub fn parse_content_fields(content: &str) -> HashMap<String, String> {
    content
        .split(SEGMENT_SEPARATOR)
        .map(|segment| match segment.split_once(KEY_VALUE_SEPARATOR) {
            Some((key, value)) => (key.trim().to_string(), value.trim().to_string()),
            None => (segment.trim().to_string(), String::new()),
        })
        .collect()
}

/// Builds articles from raw resources.
///
/// The clock is only consulted for records without `created_at`.
#[derive(Debug, Clone, Default)]
pub struct ResourceExtractor {
    fixed_now: Option<DateTime<Utc>>,
}

impl ResourceExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stamp undated records with `now` instead of the current time.
    pub fn with_fixed_time(now: DateTime<Utc>) -> Self {
        Self {
            fixed_now: Some(now),
        }
    }

    fn timestamp(&self) -> String {
        self.fixed_now
            .unwrap_or_else(Utc::now)
            .to_rfc3339_opts(SecondsFormat::Millis, true)
    }

    /// Validate one resource.
    pub fn parse(&self, resource: &RawResource) -> Result<Article, ResourceError> {
        let mut fields = parse_content_fields(&resource.content);

        let title = take_required(&mut fields, "title")?;
        let content = take_required(&mut fields, "content")?;

        Ok(Article {
            title: normalize_emphasis(&title),
            content: normalize_emphasis(&content),
            slug: fields.remove("slug").unwrap_or_default(),
            created_at: fields
                .remove("created_at")
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| self.timestamp()),
            score: resource.score.unwrap_or(0.0),
        })
    }

    /// Valid articles in input order; invalid resources are skipped.
    pub fn extract(&self, resources: &[RawResource]) -> Vec<Article> {
        resources
            .iter()
            .enumerate()
            .filter_map(|(index, resource)| match self.parse(resource) {
                Ok(article) => Some(article),
                Err(e) => {
                    tracing::debug!(index, error = %e, "dropping resource");
                    None
                }
            })
            .collect()
    }

    /// Like [`extract`](Self::extract), for entries still in JSON form.
    ///
    /// Entries without a string `content` are dropped individually.
    pub fn extract_values(&self, values: &[Value]) -> Vec<Article> {
        values
            .iter()
            .enumerate()
            .filter_map(|(index, value)| {
                let parsed = RawResource::from_value(value)
                    .map_err(|e| ResourceError::Malformed(e.to_string()))
                    .and_then(|raw| self.parse(&raw));
                match parsed {
                    Ok(article) => Some(article),
                    Err(e) => {
                        tracing::debug!(index, error = %e, "dropping resource");
                        None
                    }
                }
            })
            .collect()
    }
}

fn take_required(
    fields: &mut HashMap<String, String>,
    field: &'static str,
) -> Result<String, ResourceError> {
    let value = fields
        .remove(field)
        .ok_or(ResourceError::MissingField(field))?;
    let chars = value.chars().count();
    if chars < MIN_FIELD_CHARS {
        return Err(ResourceError::TooShort { field, chars });
    }
    Ok(value)
}
