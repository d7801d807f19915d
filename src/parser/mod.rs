//! JSONL page parser for mainline commit history.
//!
//! Each line holds one page as returned by the history source: either an
//! object with a `versions` array and page cursors, or a bare array of
//! entries. Entries are left unclassified here; the row builder classifies
//! them and rejects unknown shapes.

use crate::model::{ParseError, RawEntry};
use serde::Deserialize;

/// One page of mainline history.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MainlineCommitsPage {
    /// Entries in display order.
    #[serde(default)]
    pub versions: Vec<RawEntry>,
    /// Order at which the next (older) page starts, if there is one.
    #[serde(default)]
    pub next_page_order_number: Option<u64>,
    /// Order at which the previous (newer) page starts, if there is one.
    #[serde(default)]
    pub prev_page_order_number: Option<u64>,
}

impl MainlineCommitsPage {
    /// A page with no cursors.
    pub fn from_versions(versions: Vec<RawEntry>) -> Self {
        Self {
            versions,
            ..Self::default()
        }
    }
}

/// Either accepted page shape.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawPage {
    Page(MainlineCommitsPage),
    Entries(Vec<RawEntry>),
}

/// Parse a single JSONL line into a page.
///
/// # Arguments
///
/// * `line` - The raw JSON line
/// * `line_number` - 1-based line number, for error reporting
///
/// # Errors
///
/// - [`ParseError::InvalidTimestamp`] if a `createTime` is not RFC 3339
/// - [`ParseError::InvalidJson`] for anything else that fails to deserialize
pub fn parse_page(line: &str, line_number: usize) -> Result<MainlineCommitsPage, ParseError> {
    // Parse to a Value first so timestamp problems can be reported precisely.
    let value: serde_json::Value =
        serde_json::from_str(line).map_err(|e| ParseError::InvalidJson {
            line: line_number,
            message: e.to_string(),
        })?;

    if let Some(raw) = find_invalid_timestamp(&value) {
        return Err(ParseError::InvalidTimestamp {
            line: line_number,
            raw,
        });
    }

    let page: RawPage = serde_json::from_value(value).map_err(|e| ParseError::InvalidJson {
        line: line_number,
        message: e.to_string(),
    })?;

    Ok(match page {
        RawPage::Page(page) => page,
        RawPage::Entries(versions) => MainlineCommitsPage::from_versions(versions),
    })
}

/// Parse every non-blank line of `content` as a page.
///
/// # Errors
///
/// Stops at the first line that fails to parse.
pub fn parse_pages(content: &str) -> Result<Vec<MainlineCommitsPage>, ParseError> {
    content
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(idx, line)| parse_page(line, idx + 1))
        .collect()
}

/// First `createTime` string anywhere in the page that is not RFC 3339.
fn find_invalid_timestamp(value: &serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::Object(map) => {
            if let Some(serde_json::Value::String(raw)) = map.get("createTime") {
                if chrono::DateTime::parse_from_rfc3339(raw).is_err() {
                    return Some(raw.clone());
                }
            }
            map.values().find_map(find_invalid_timestamp)
        }
        serde_json::Value::Array(items) => items.iter().find_map(find_invalid_timestamp),
        _ => None,
    }
}
