//! Common utilities for document generation.
//!
//! Shared helpers for payload decoding, date formatting, and download names.

use chrono::NaiveDate;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Convert an ISO date (`YYYY-MM-DD`, optionally followed by a time part)
/// to the Brazilian `DD/MM/YYYY` form.
pub fn format_br_date(iso: &str) -> Result<String, chrono::ParseError> {
    let date_part = iso.trim().split('T').next().unwrap_or_default();
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d").map(|date| date.format("%d/%m/%Y").to_string())
}

/// Turn user input into a safe file name stem.
///
/// Characters that are not allowed in file names become `-`, runs of
/// whitespace become a single `_`.
pub fn download_stem(value: &str, fallback: &str) -> String {
    let options = sanitize_filename::Options {
        replacement: "-",
        ..Default::default()
    };
    let sanitized = sanitize_filename::sanitize_with_options(value.trim(), options);
    let stem = sanitized.split_whitespace().collect::<Vec<_>>().join("_");

    if stem.is_empty() {
        fallback.to_string()
    } else {
        stem
    }
}

/// ASCII-only version of a file name for the plain `filename=` parameter.
pub fn ascii_fallback(filename: &str) -> String {
    filename
        .chars()
        .map(|c| if c.is_ascii() && !c.is_ascii_control() { c } else { '_' })
        .collect()
}

/// Deserialize a form value that may arrive as a string, number or boolean.
///
/// `null` becomes an empty string; arrays and objects are rejected.
pub fn text_field<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(String::new()),
        Some(Value::String(text)) => Ok(text),
        Some(Value::Number(number)) => Ok(number.to_string()),
        Some(Value::Bool(flag)) => Ok(flag.to_string()),
        Some(other) => Err(D::Error::custom(format!(
            "expected text or number, found {}",
            other
        ))),
    }
}
