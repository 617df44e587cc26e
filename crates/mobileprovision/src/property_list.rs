//! Property list decoding and typed lookups.
//!
//! Decoding accepts either the binary or the XML encoding and always yields a
//! top-level [`Dictionary`]. Values are [`plist::Value`], a sum type covering
//! strings, integers, reals, booleans, dates, arrays, dictionaries and data
//! blobs. Dictionaries preserve insertion order.
//!
//! Nothing here knows about provisioning profiles; the lookup helpers are
//! shared by the profile model and by anything else reading plists.

use crate::{Error, Result};
use chrono::{DateTime, Utc};
use plist::{Dictionary, Value};
use std::io::Cursor;
use std::time::SystemTime;

/// Parse canonical plist bytes into a dictionary.
///
/// # Errors
///
/// Returns [`Error::PlistFormat`] on truncated or otherwise invalid input, or
/// when the top-level object is not a dictionary.
pub fn decode(data: &[u8]) -> Result<Dictionary> {
    let value = Value::from_reader(Cursor::new(data))?;

    value
        .into_dictionary()
        .ok_or_else(|| Error::PlistFormat("Top-level object is not a dictionary".into()))
}

/// Look up a string value.
pub fn string<'a>(dict: &'a Dictionary, key: &str) -> Option<&'a str> {
    dict.get(key)?.as_string()
}

/// Look up an array and keep only its string elements, in order.
pub fn string_array(dict: &Dictionary, key: &str) -> Option<Vec<String>> {
    let arr = dict.get(key)?.as_array()?;
    Some(
        arr.iter()
            .filter_map(|v| v.as_string().map(String::from))
            .collect(),
    )
}

/// First string element of an array value.
pub fn first_string<'a>(dict: &'a Dictionary, key: &str) -> Option<&'a str> {
    dict.get(key)?.as_array()?.first()?.as_string()
}

/// Look up a date value as UTC.
pub fn date(dict: &Dictionary, key: &str) -> Option<DateTime<Utc>> {
    let date = dict.get(key)?.as_date()?;
    Some(DateTime::<Utc>::from(SystemTime::from(date)))
}

/// Look up a nested dictionary.
pub fn dictionary<'a>(dict: &'a Dictionary, key: &str) -> Option<&'a Dictionary> {
    dict.get(key)?.as_dictionary()
}

/// Look up an array of data blobs. Non-data elements are skipped.
pub fn data_array<'a>(dict: &'a Dictionary, key: &str) -> Option<Vec<&'a [u8]>> {
    let arr = dict.get(key)?.as_array()?;
    Some(arr.iter().filter_map(Value::as_data).collect())
}
