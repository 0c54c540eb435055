//! A strict `multipart/form-data` reader.
//!
//! The query validators need raw-bytes semantics a framework extractor
//! hides: the boundary must be checked as a literal substring of the body,
//! fields are re-read by several independent steps, and image parts are
//! opaque bytes. The emulated service's own implementation vendored a
//! parser for the same reason.

/// One form-data field: its name and raw value bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MultipartField {
    pub name: String,
    pub value: Vec<u8>,
}

/// Parse a `multipart/form-data` body with the given boundary.
///
/// Malformed parts (no header block, no `name` parameter) are skipped
/// rather than rejected; the validators decide what absence means.
pub fn parse_multipart(body: &[u8], boundary: &str) -> Vec<MultipartField> {
    let delimiter = format!("--{boundary}");
    let mut fields = Vec::new();
    let mut sections = split_on(body, delimiter.as_bytes());
    // Everything before the first delimiter is preamble.
    if !sections.is_empty() {
        sections.remove(0);
    }
    for section in sections {
        // The close delimiter leaves a section starting with "--".
        if section.starts_with(b"--") {
            break;
        }
        let part = strip_crlf(section);
        let Some(split_at) = find_subslice(part, b"\r\n\r\n") else {
            continue;
        };
        let headers = &part[..split_at];
        let value = strip_trailing_crlf(&part[split_at + 4..]);
        let Some(name) = field_name(headers) else {
            continue;
        };
        fields.push(MultipartField {
            name,
            value: value.to_vec(),
        });
    }
    fields
}

/// Look up a parsed field by name.
pub fn field<'a>(fields: &'a [MultipartField], name: &str) -> Option<&'a MultipartField> {
    fields.iter().find(|field| field.name == name)
}

/// A field's value as UTF-8 text, or the default when absent.
pub fn text_field_or<'a>(
    fields: &'a [MultipartField],
    name: &str,
    default: &'a str,
) -> std::borrow::Cow<'a, str> {
    match field(fields, name) {
        Some(found) => String::from_utf8_lossy(&found.value),
        None => std::borrow::Cow::Borrowed(default),
    }
}

/// The first index at which `needle` occurs in `haystack`.
pub fn find_subslice(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    if needle.is_empty() || haystack.len() < needle.len() {
        return None;
    }
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}

fn split_on<'a>(bytes: &'a [u8], delimiter: &[u8]) -> Vec<&'a [u8]> {
    let mut sections = Vec::new();
    let mut rest = bytes;
    while let Some(index) = find_subslice(rest, delimiter) {
        sections.push(&rest[..index]);
        rest = &rest[index + delimiter.len()..];
    }
    sections.push(rest);
    sections
}

fn strip_crlf(bytes: &[u8]) -> &[u8] {
    bytes.strip_prefix(b"\r\n").unwrap_or(bytes)
}

fn strip_trailing_crlf(bytes: &[u8]) -> &[u8] {
    bytes.strip_suffix(b"\r\n").unwrap_or(bytes)
}

fn field_name(headers: &[u8]) -> Option<String> {
    let text = String::from_utf8_lossy(headers);
    for line in text.split("\r\n") {
        let lower = line.to_ascii_lowercase();
        if !lower.starts_with("content-disposition") {
            continue;
        }
        let start = line.find("name=\"")? + "name=\"".len();
        let end = line[start..].find('"')? + start;
        return Some(line[start..end].to_owned());
    }
    None
}
