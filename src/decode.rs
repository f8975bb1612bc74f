//! Decoding of the `translate_a/single` response body.
//!
//! The body is an untyped, positional JSON array. Only its first element is
//! used: a list of segments, each itself a list. For a segment `seg`:
//!
//! - `seg[0]` is a slice of translated text,
//! - `seg[1]` is the matching slice of the original text,
//! - on the last segment, `seg[len - 1]` is the source tongue and
//!   `seg[len - 2]` the target tongue as reported by the service.
//!
//! Everything is read through [`serde_json::Value`] and projected by hand; no
//! position is assumed to have a fixed type.

use crate::error::{DecodeError, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// What to do with an empty segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SegmentPolicy {
    /// Stop at the first empty segment and drop everything after it.
    ///
    /// Segments already processed are kept. This is how the service's
    /// payloads have always been read and remains the default.
    #[default]
    StopAtEmpty,
    /// Skip the empty segment and continue with the next one.
    SkipEmpty,
}

/// The decoded translation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslationResult {
    /// Original text as echoed by the service
    #[serde(rename = "rawText")]
    pub request_text: String,
    /// Translated text
    #[serde(rename = "text")]
    pub response_text: String,
    /// Source tongue, detected or declared
    #[serde(rename = "rawTongue")]
    pub request_tongue: String,
    /// Target tongue
    #[serde(rename = "tongue")]
    pub response_tongue: String,
}

/// Decode a response body with the default [`SegmentPolicy`].
pub fn decode(body: &[u8]) -> Result<TranslationResult> {
    decode_with(body, SegmentPolicy::default())
}

pub fn decode_with(body: &[u8], policy: SegmentPolicy) -> Result<TranslationResult> {
    let payload: Value = serde_json::from_slice(body).map_err(DecodeError::from)?;
    Ok(project(&payload, policy)?)
}

fn project(payload: &Value, policy: SegmentPolicy) -> Result<TranslationResult, DecodeError> {
    let top = payload.as_array().ok_or_else(|| {
        DecodeError::Shape(format!("top level is {}, not an array", kind(payload)))
    })?;
    let first = top
        .first()
        .ok_or_else(|| DecodeError::Shape("top level array is empty".to_string()))?;
    let segments = first.as_array().ok_or_else(|| {
        DecodeError::Shape(format!("first element is {}, not an array", kind(first)))
    })?;

    let mut result = TranslationResult::default();
    let last_index = segments.len().saturating_sub(1);

    for (index, segment) in segments.iter().enumerate() {
        let items = segment.as_array().ok_or_else(|| {
            DecodeError::Shape(format!("segment {} is {}, not an array", index, kind(segment)))
        })?;

        if items.is_empty() {
            match policy {
                SegmentPolicy::StopAtEmpty => break,
                SegmentPolicy::SkipEmpty => continue,
            }
        }

        push_str(&mut result.response_text, items.first());
        push_str(&mut result.request_text, items.get(1));

        // Index is compared with the full segment count, so an early stop
        // means the tongues are never read.
        if index == last_index {
            push_str(&mut result.request_tongue, items.last());
            if items.len() >= 2 {
                push_str(&mut result.response_tongue, items.get(items.len() - 2));
            }
        }
    }

    Ok(result)
}

fn push_str(target: &mut String, value: Option<&Value>) {
    if let Some(text) = value.and_then(Value::as_str) {
        target.push_str(text);
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
