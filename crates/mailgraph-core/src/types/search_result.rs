//! Search result type and metadata normalization.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Sentinel used for metadata fields that were absent from a vector match.
pub const UNKNOWN: &str = "Unknown";

/// Default maximum length (in characters) of a result body preview.
pub const DEFAULT_BODY_PREVIEW_CHARS: usize = 500;

const SENDER_KEYS: &[&str] = &["From", "from", "Sender", "sender"];
const RECIPIENT_KEYS: &[&str] = &["To", "to", "Receiver", "receiver"];
const SUBJECT_KEYS: &[&str] = &["Subject", "subject"];
const DATE_KEYS: &[&str] = &["Date", "date"];
const BODY_KEYS: &[&str] = &["text", "Body", "body"];

/// One retrieved communication record.
///
/// Fields are private so a result cannot change after construction. Absent
/// metadata is stored as [`UNKNOWN`] (the body as an empty string), so
/// consumers never deal with missing values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "SearchResultWire")]
pub struct SearchResult {
    sender: String,
    recipients: String,
    subject: String,
    body: String,
    timestamp: String,
    relevance_score: f32,
}

impl SearchResult {
    /// Start building a result. Unset fields fall back to their sentinels.
    pub fn builder() -> SearchResultBuilder {
        SearchResultBuilder::default()
    }

    /// Normalize the metadata of a vector match into a result.
    ///
    /// Keys are looked up through a list of known spellings first (`From`,
    /// `from`, `Sender`, ...) and then case-insensitively. Non-string values
    /// are rendered as JSON text; `null` counts as absent.
    pub fn from_metadata(
        metadata: &HashMap<String, serde_json::Value>,
        score: f32,
        body_preview_chars: usize,
    ) -> Self {
        let mut builder = Self::builder()
            .relevance_score(score)
            .body_preview_chars(body_preview_chars);

        if let Some(sender) = lookup(metadata, SENDER_KEYS) {
            builder = builder.sender(sender);
        }
        if let Some(recipients) = lookup(metadata, RECIPIENT_KEYS) {
            builder = builder.recipients(recipients);
        }
        if let Some(subject) = lookup(metadata, SUBJECT_KEYS) {
            builder = builder.subject(subject);
        }
        if let Some(timestamp) = lookup(metadata, DATE_KEYS) {
            builder = builder.timestamp(timestamp);
        }
        if let Some(body) = lookup(metadata, BODY_KEYS) {
            builder = builder.body(body);
        }

        builder.build()
    }

    pub fn sender(&self) -> &str {
        &self.sender
    }

    pub fn recipients(&self) -> &str {
        &self.recipients
    }

    pub fn subject(&self) -> &str {
        &self.subject
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }

    pub fn relevance_score(&self) -> f32 {
        self.relevance_score
    }

    /// Split the recipient field on commas, trimming whitespace.
    ///
    /// Quoted display names containing commas (`"Lay, Kenneth" <k@x>`) are
    /// split as well; the field is treated as a plain list.
    pub fn recipient_list(&self) -> Vec<&str> {
        self.recipients.split(',').map(str::trim).collect()
    }
}

/// Builder for [`SearchResult`].
#[derive(Debug, Default)]
pub struct SearchResultBuilder {
    sender: Option<String>,
    recipients: Option<String>,
    subject: Option<String>,
    body: Option<String>,
    timestamp: Option<String>,
    relevance_score: f32,
    body_preview_chars: Option<usize>,
}

impl SearchResultBuilder {
    pub fn sender(mut self, sender: impl Into<String>) -> Self {
        self.sender = Some(sender.into());
        self
    }

    pub fn recipients(mut self, recipients: impl Into<String>) -> Self {
        self.recipients = Some(recipients.into());
        self
    }

    pub fn subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    pub fn timestamp(mut self, timestamp: impl Into<String>) -> Self {
        self.timestamp = Some(timestamp.into());
        self
    }

    pub fn relevance_score(mut self, score: f32) -> Self {
        self.relevance_score = score;
        self
    }

    /// Override the body preview length (defaults to 500 characters).
    pub fn body_preview_chars(mut self, chars: usize) -> Self {
        self.body_preview_chars = Some(chars);
        self
    }

    pub fn build(self) -> SearchResult {
        let preview = self
            .body_preview_chars
            .unwrap_or(DEFAULT_BODY_PREVIEW_CHARS);

        SearchResult {
            sender: self.sender.unwrap_or_else(|| UNKNOWN.to_string()),
            recipients: self.recipients.unwrap_or_else(|| UNKNOWN.to_string()),
            subject: self.subject.unwrap_or_else(|| UNKNOWN.to_string()),
            body: truncate_chars(self.body.unwrap_or_default(), preview),
            timestamp: self.timestamp.unwrap_or_else(|| UNKNOWN.to_string()),
            relevance_score: clamp_score(self.relevance_score),
        }
    }
}

/// JSON shape accepted from API callers; normalized on the way in.
#[derive(Deserialize)]
struct SearchResultWire {
    sender: Option<String>,
    recipients: Option<String>,
    subject: Option<String>,
    body: Option<String>,
    timestamp: Option<String>,
    #[serde(default)]
    relevance_score: f32,
}

impl From<SearchResultWire> for SearchResult {
    fn from(wire: SearchResultWire) -> Self {
        SearchResultBuilder {
            sender: wire.sender,
            recipients: wire.recipients,
            subject: wire.subject,
            body: wire.body,
            timestamp: wire.timestamp,
            relevance_score: wire.relevance_score,
            body_preview_chars: None,
        }
        .build()
    }
}

fn lookup(metadata: &HashMap<String, serde_json::Value>, keys: &[&str]) -> Option<String> {
    keys.iter()
        .find_map(|key| metadata.get(*key).and_then(value_to_string))
        .or_else(|| {
            keys.iter().find_map(|key| {
                metadata
                    .iter()
                    .filter(|(k, _)| k.eq_ignore_ascii_case(key))
                    .find_map(|(_, v)| value_to_string(v))
            })
        })
}

fn value_to_string(value: &serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::Null => None,
        serde_json::Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

fn truncate_chars(text: String, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => text[..idx].to_string(),
        None => text,
    }
}

fn clamp_score(score: f32) -> f32 {
    if score.is_nan() {
        0.0
    } else {
        score.clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn metadata(pairs: &[(&str, serde_json::Value)]) -> HashMap<String, serde_json::Value> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn test_builder_defaults_to_sentinels() {
        let result = SearchResult::builder().build();
        assert_eq!(result.sender(), UNKNOWN);
        assert_eq!(result.recipients(), UNKNOWN);
        assert_eq!(result.subject(), UNKNOWN);
        assert_eq!(result.timestamp(), UNKNOWN);
        assert_eq!(result.body(), "");
        assert_eq!(result.relevance_score(), 0.0);
    }

    #[test]
    fn test_from_metadata_prefers_known_spellings() {
        let meta = metadata(&[
            ("From", json!("sherron.watkins@enron.com")),
            ("To", json!("kenneth.lay@enron.com")),
            ("Subject", json!("Accounting")),
            ("Date", json!("2001-08-15")),
            ("text", json!("I am incredibly nervous")),
        ]);

        let result = SearchResult::from_metadata(&meta, 0.82, 500);
        assert_eq!(result.sender(), "sherron.watkins@enron.com");
        assert_eq!(result.recipients(), "kenneth.lay@enron.com");
        assert_eq!(result.subject(), "Accounting");
        assert_eq!(result.timestamp(), "2001-08-15");
        assert_eq!(result.body(), "I am incredibly nervous");
        assert!((result.relevance_score() - 0.82).abs() < f32::EPSILON);
    }

    #[test]
    fn test_from_metadata_case_insensitive_fallback() {
        let meta = metadata(&[("FROM", json!("a@x")), ("RECEIVER", json!("b@x"))]);
        let result = SearchResult::from_metadata(&meta, 0.5, 500);
        assert_eq!(result.sender(), "a@x");
        assert_eq!(result.recipients(), "b@x");
        assert_eq!(result.subject(), UNKNOWN);
    }

    #[test]
    fn test_from_metadata_null_is_absent_and_numbers_render() {
        let meta = metadata(&[("From", json!(null)), ("Date", json!(20010815))]);
        let result = SearchResult::from_metadata(&meta, 0.5, 500);
        assert_eq!(result.sender(), UNKNOWN);
        assert_eq!(result.timestamp(), "20010815");
    }

    #[test]
    fn test_body_truncated_on_char_boundary() {
        let body = "é".repeat(600);
        let result = SearchResult::builder().body(body).build();
        assert_eq!(result.body().chars().count(), DEFAULT_BODY_PREVIEW_CHARS);

        let short = SearchResult::builder()
            .body("hello world")
            .body_preview_chars(5)
            .build();
        assert_eq!(short.body(), "hello");
    }

    #[test]
    fn test_score_clamped() {
        assert_eq!(SearchResult::builder().relevance_score(1.7).build().relevance_score(), 1.0);
        assert_eq!(SearchResult::builder().relevance_score(-0.2).build().relevance_score(), 0.0);
        assert_eq!(
            SearchResult::builder().relevance_score(f32::NAN).build().relevance_score(),
            0.0
        );
    }

    #[test]
    fn test_recipient_list_splits_and_trims() {
        let result = SearchResult::builder()
            .recipients("a@x, b@x ,c@x")
            .build();
        assert_eq!(result.recipient_list(), vec!["a@x", "b@x", "c@x"]);
    }

    #[test]
    fn test_deserialize_normalizes_missing_fields() {
        let result: SearchResult =
            serde_json::from_value(json!({ "sender": "ken.lay@x", "relevance_score": 0.4 }))
                .unwrap();
        assert_eq!(result.sender(), "ken.lay@x");
        assert_eq!(result.recipients(), UNKNOWN);
        assert_eq!(result.body(), "");
    }
}
