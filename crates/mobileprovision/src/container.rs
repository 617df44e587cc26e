//! Locating the property list inside a provisioning profile file.
//!
//! A profile on disk is either a bare binary plist or a CMS signed container
//! whose encapsulated content is an XML plist. The XML payload is stored
//! uncompressed inside the container, so it can be found by searching for its
//! structural boundaries without decoding the CMS envelope.
//!
//! This is not signature verification. Use [`crate::crypto::CmsVerifier`]
//! when the signature matters.

use crate::{Error, Result};

/// Leading bytes of every binary property list.
pub const BINARY_PLIST_MAGIC: &[u8; 6] = b"bplist";

const XML_DECLARATION: &[u8] = b"<?xml version=";
const PLIST_END_TAG: &[u8] = b"</plist>";

/// Returns true if `data` starts with the binary plist magic.
pub fn is_binary_plist(data: &[u8]) -> bool {
    data.starts_with(BINARY_PLIST_MAGIC)
}

/// Extract the canonical plist bytes from raw profile bytes.
///
/// Binary plists are returned unchanged. Anything else is treated as a
/// container wrapping an XML plist: the result spans from the first XML
/// declaration through the end of the first `</plist>` after it.
///
/// # Errors
///
/// Returns [`Error::MalformedContainer`] if either boundary is missing.
pub fn unwrap_plist(data: &[u8]) -> Result<&[u8]> {
    if is_binary_plist(data) {
        return Ok(data);
    }

    let start = find(data, XML_DECLARATION)
        .ok_or_else(|| Error::MalformedContainer("No XML declaration found".into()))?;

    let end = find(&data[start..], PLIST_END_TAG)
        .map(|p| start + p + PLIST_END_TAG.len())
        .ok_or_else(|| Error::MalformedContainer("No closing </plist> tag found".into()))?;

    Ok(&data[start..end])
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|w| w == needle)
}
