//! Data-URL codec with an embedded file name
//!
//! Encoded form: `data:<mime>;name=<escaped name>;base64,<payload>`.
//! The name is escaped like `encodeURIComponent`, so the blob stays a plain
//! string and survives round-tripping through form values.

use crate::{DecodeError, FileMetadata};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::{Deserialize, Serialize};
use std::fmt;
use widget_fs::OCTET_STREAM;

const SCHEME: &str = "data:";
const BASE64_MARKER: &str = ";base64";
const NAME_PARAM: &str = "name=";

/// Name reported when a blob carries no (or an ambiguous) name annotation
pub const UNKNOWN_NAME: &str = "unknown";

/// Characters `encodeURIComponent` leaves unescaped
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Self-describing text encoding of one file
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EncodedFile(String);

impl EncodedFile {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    /// Decode the metadata this blob describes
    pub fn metadata(&self) -> Result<FileMetadata, DecodeError> {
        decode(&self.0)
    }
}

impl From<String> for EncodedFile {
    fn from(blob: String) -> Self {
        Self(blob)
    }
}

impl AsRef<str> for EncodedFile {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EncodedFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Metadata plus the raw payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedFile {
    pub metadata: FileMetadata,
    pub bytes: Vec<u8>,
}

/// Mime type as it can be stored in the header
///
/// Parameters are kept. Types that would not parse back unchanged (a `,`,
/// or a parameter that reads as a name annotation) become octet-stream.
fn header_mime(mime_type: &str) -> &str {
    let unrepresentable = mime_type.is_empty()
        || mime_type.contains(',')
        || mime_type.split(';').any(|p| p.starts_with(NAME_PARAM));

    if unrepresentable {
        OCTET_STREAM
    } else {
        mime_type
    }
}

/// Plain `data:<mime>;base64,<payload>` URL
pub fn to_data_url(mime_type: &str, bytes: &[u8]) -> String {
    let mime_type = header_mime(mime_type);
    format!("{SCHEME}{mime_type}{BASE64_MARKER},{}", STANDARD.encode(bytes))
}

/// Insert `name=<escaped>` right before the `;base64` marker of the header
///
/// URLs without the marker are returned unchanged.
pub fn add_name(data_url: &str, name: &str) -> String {
    let header_end = data_url.find(',').unwrap_or(data_url.len());
    let Some(marker) = data_url[..header_end].rfind(BASE64_MARKER) else {
        return data_url.to_string();
    };

    let escaped = utf8_percent_encode(name, URI_COMPONENT);
    format!(
        "{};{NAME_PARAM}{escaped}{}",
        &data_url[..marker],
        &data_url[marker..]
    )
}

/// Encode file contents, embedding the original name
pub fn encode_bytes(name: &str, mime_type: &str, bytes: &[u8]) -> EncodedFile {
    EncodedFile(add_name(&to_data_url(mime_type, bytes), name))
}

struct Parts<'a> {
    mime_type: String,
    raw_name: Option<&'a str>,
    payload: &'a str,
}

fn split(blob: &str) -> Result<Parts<'_>, DecodeError> {
    let rest = blob.strip_prefix(SCHEME).ok_or(DecodeError::MissingScheme)?;
    let (header, payload) = rest.split_once(',').ok_or(DecodeError::MissingSeparator)?;
    let params = header
        .strip_suffix(BASE64_MARKER)
        .ok_or(DecodeError::MissingEncodingMarker)?;

    let (names, mime_params): (Vec<&str>, Vec<&str>) =
        params.split(';').partition(|p| p.starts_with(NAME_PARAM));
    let mime_type = mime_params.join(";");

    // Exactly one name annotation, anything else counts as unnamed
    let mut names = names.into_iter().filter_map(|p| p.strip_prefix(NAME_PARAM));
    let raw_name = match (names.next(), names.next()) {
        (Some(name), None) => Some(name),
        _ => None,
    };

    Ok(Parts {
        mime_type,
        raw_name,
        payload,
    })
}

fn unescape_name(raw_name: Option<&str>) -> Result<String, DecodeError> {
    match raw_name {
        Some(raw) => percent_decode_str(raw)
            .decode_utf8()
            .map(|name| name.into_owned())
            .map_err(|_| DecodeError::InvalidName),
        None => Ok(UNKNOWN_NAME.to_string()),
    }
}

/// Decode a blob into metadata and payload bytes
pub fn decode_payload(blob: &str) -> Result<DecodedFile, DecodeError> {
    let parts = split(blob)?;
    let name = unescape_name(parts.raw_name)?;
    let bytes = STANDARD
        .decode(parts.payload)
        .map_err(|e| DecodeError::InvalidPayload(e.to_string()))?;

    Ok(DecodedFile {
        metadata: FileMetadata::new(name, bytes.len() as u64, parts.mime_type),
        bytes,
    })
}

/// Decode a blob into its metadata
pub fn decode(blob: &str) -> Result<FileMetadata, DecodeError> {
    decode_payload(blob).map(|decoded| decoded.metadata)
}

/// Decode every present entry, skipping missing slots
pub fn decode_all<I, S>(blobs: I) -> Result<Vec<FileMetadata>, DecodeError>
where
    I: IntoIterator<Item = Option<S>>,
    S: AsRef<str>,
{
    blobs
        .into_iter()
        .flatten()
        .map(|blob| decode(blob.as_ref()))
        .collect()
}
