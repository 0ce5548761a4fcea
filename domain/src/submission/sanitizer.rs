//! Free-text sanitizer
//!
//! Trims, caps length, then deletes a small set of markup/script patterns.
//! This is best-effort input hygiene by pattern deletion, not canonical
//! encoding: crafted or nested markup can survive it, so the receiving
//! endpoint must still treat the text as untrusted.

use crate::core::string::take_chars;
use regex::Regex;
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::LazyLock;

/// Length cap for short free text such as "other" answers
pub const TEXT_MAX_CHARS: usize = 5_000;

/// Length cap for the long-form final comment
pub const COMMENT_MAX_CHARS: usize = 10_000;

static SUPPRESSED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)<script|<iframe|javascript:|onerror=").expect("static pattern is valid")
});

/// Clean a piece of free text.
///
/// Absent input yields `""`. The text is trimmed, cut to `max_chars`
/// characters, and stripped of `<script`, `<iframe`, `javascript:` and
/// `onerror=` (case-insensitive).
pub fn sanitize(text: Option<&str>, max_chars: usize) -> String {
    let Some(text) = text else {
        return String::new();
    };
    let capped = take_chars(text.trim(), max_chars);
    SUPPRESSED.replace_all(capped, "").into_owned()
}

/// Clean an untyped JSON value; anything but a string yields `""`.
pub fn sanitize_value(value: &Value, max_chars: usize) -> String {
    sanitize(value.as_str(), max_chars)
}

/// Clean every entry of a per-question free-text map.
pub fn sanitize_all(
    texts: &BTreeMap<String, String>,
    max_chars: usize,
) -> BTreeMap<String, String> {
    texts
        .iter()
        .map(|(id, text)| (id.clone(), sanitize(Some(text), max_chars)))
        .collect()
}
