//! Boundary-based multipart body parser.
//!
//! Works on a fully buffered body. File payloads are returned as
//! `Bytes::slice`s of that buffer, so no payload bytes are copied.
//!
//! Accepts both `CRLF` and bare `LF` line endings everywhere a line break is
//! expected. A delimiter only counts when it starts a line.

use bytes::Bytes;
use memchr::memmem;

use crate::error::MalformedMultipart;
use crate::model::{FilePart, ParsedUpload, DEFAULT_FILE_MEDIA_TYPE};

/// Multipart parser for one boundary.
#[derive(Debug, Clone)]
pub struct MultipartParser {
    /// Searches for `--` followed by the boundary token.
    finder: memmem::Finder<'static>,
}

/// A part's headers, names lowercased, in body order.
type PartHeaders = Vec<(String, String)>;

/// Parsed `Content-Disposition` parameters.
#[derive(Debug, PartialEq, Eq)]
struct Disposition {
    name: String,
    filename: Option<String>,
}

impl MultipartParser {
    /// Create a parser for the given boundary token.
    pub fn new(boundary: &str) -> Self {
        let mut delimiter = Vec::with_capacity(boundary.len() + 2);
        delimiter.extend_from_slice(b"--");
        delimiter.extend_from_slice(boundary.as_bytes());
        Self {
            finder: memmem::Finder::new(&delimiter).into_owned(),
        }
    }

    /// Parse all parts from the body.
    pub fn parse(&self, body: &Bytes) -> Result<ParsedUpload, MalformedMultipart> {
        let delimiter_len = self.finder.needle().len();
        let mut builder = ParsedUpload::builder();

        // Skip the preamble.
        let mut pos = self
            .find_delimiter(body, 0)
            .ok_or(MalformedMultipart::NoDelimiter)?;
        let mut part = 0;

        loop {
            let after = pos + delimiter_len;
            if body[after..].starts_with(b"--") {
                break;
            }

            let start = skip_delimiter_line(body, after, part)?;
            let (headers, data_start) = read_headers(body, start, part)?;

            let disposition = header(&headers, "content-disposition")
                .ok_or(MalformedMultipart::MissingContentDisposition { part })?;
            let Disposition { name, filename } = parse_content_disposition(disposition)
                .ok_or(MalformedMultipart::MissingName { part })?;

            let next = self
                .find_delimiter(body, data_start)
                .ok_or(MalformedMultipart::Truncated { part })?;
            let data_end = trim_line_break(body, data_start, next);

            match filename {
                Some(filename) => {
                    let media_type =
                        header(&headers, "content-type").unwrap_or(DEFAULT_FILE_MEDIA_TYPE);
                    builder.file(
                        name,
                        FilePart::new(filename, media_type, body.slice(data_start..data_end)),
                    );
                }
                None => {
                    let value = String::from_utf8_lossy(&body[data_start..data_end]);
                    builder.field(name, value);
                }
            }

            pos = next;
            part += 1;
        }

        Ok(builder.build())
    }

    /// Find the next delimiter at or after `from` that starts a line.
    fn find_delimiter(&self, body: &[u8], from: usize) -> Option<usize> {
        let mut from = from;
        while from <= body.len() {
            let at = from + self.finder.find(&body[from..])?;
            if at == 0 || body[at - 1] == b'\n' {
                return Some(at);
            }
            from = at + 1;
        }
        None
    }
}

/// Step over transport padding and the line break ending a delimiter line.
fn skip_delimiter_line(
    body: &[u8],
    after: usize,
    part: usize,
) -> Result<usize, MalformedMultipart> {
    let mut pos = after;
    while pos < body.len() && matches!(body[pos], b' ' | b'\t') {
        pos += 1;
    }
    match &body[pos..] {
        [] | [b'\r'] => Err(MalformedMultipart::Truncated { part }),
        [b'\r', b'\n', ..] => Ok(pos + 2),
        [b'\n', ..] => Ok(pos + 1),
        _ => Err(MalformedMultipart::BadDelimiterLine { part }),
    }
}

/// Read header lines up to the blank line. Returns the headers and the offset
/// of the first body byte.
fn read_headers(
    body: &[u8],
    start: usize,
    part: usize,
) -> Result<(PartHeaders, usize), MalformedMultipart> {
    let mut headers: PartHeaders = Vec::new();
    let mut pos = start;

    loop {
        let line_end = memchr::memchr(b'\n', &body[pos..])
            .map(|i| pos + i)
            .ok_or(MalformedMultipart::UnterminatedHeaders { part })?;
        let raw = &body[pos..line_end];
        let raw = raw.strip_suffix(b"\r").unwrap_or(raw);
        pos = line_end + 1;

        if raw.is_empty() {
            return Ok((headers, pos));
        }

        let line = std::str::from_utf8(raw)
            .map_err(|_| MalformedMultipart::InvalidHeaderEncoding { part })?;

        // Folded continuation of the previous header.
        if line.starts_with([' ', '\t']) {
            if let Some((_, value)) = headers.last_mut() {
                value.push(' ');
                value.push_str(line.trim());
            }
            continue;
        }

        if let Some((name, value)) = line.split_once(':') {
            headers.push((name.trim().to_ascii_lowercase(), value.trim().to_string()));
        }
    }
}

fn header<'a>(headers: &'a PartHeaders, name: &str) -> Option<&'a str> {
    headers
        .iter()
        .find(|(n, _)| n == name)
        .map(|(_, v)| v.as_str())
}

/// Drop the single line break that belongs to the delimiter at `end`.
fn trim_line_break(body: &[u8], start: usize, end: usize) -> usize {
    let mut end = end;
    if end > start && body[end - 1] == b'\n' {
        end -= 1;
        if end > start && body[end - 1] == b'\r' {
            end -= 1;
        }
    }
    end
}

/// Parse a `Content-Disposition` value.
///
/// Format: `form-data; name="field"; filename="file.txt"`
///
/// Returns `None` when there is no non-empty `name` parameter.
fn parse_content_disposition(value: &str) -> Option<Disposition> {
    let mut name = None;
    let mut filename = None;

    for param in split_params(value).into_iter().skip(1) {
        let Some((key, raw)) = param.split_once('=') else {
            continue;
        };
        let key = key.trim();
        if key.eq_ignore_ascii_case("name") {
            name = Some(unquote(raw));
        } else if key.eq_ignore_ascii_case("filename") {
            filename = Some(unquote(raw));
        }
    }

    name.filter(|n| !n.is_empty())
        .map(|name| Disposition { name, filename })
}

/// Split header parameters on `;`, ignoring separators inside quotes.
fn split_params(value: &str) -> Vec<&str> {
    let mut params = Vec::new();
    let mut in_quotes = false;
    let mut escaped = false;
    let mut start = 0;

    for (i, c) in value.char_indices() {
        match c {
            _ if escaped => escaped = false,
            '\\' if in_quotes => escaped = true,
            '"' => in_quotes = !in_quotes,
            ';' if !in_quotes => {
                params.push(value[start..i].trim());
                start = i + 1;
            }
            _ => {}
        }
    }
    params.push(value[start..].trim());
    params
}

/// Strip quotes from a parameter value and resolve `\"` and `\\` escapes.
///
/// Other backslashes are kept, so Windows-style paths survive intact.
fn unquote(raw: &str) -> String {
    let raw = raw.trim();
    let Some(inner) = raw.strip_prefix('"').and_then(|r| r.strip_suffix('"')) else {
        return raw.to_string();
    };

    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\\' {
            if let Some(&escaped @ ('"' | '\\')) = chars.peek() {
                out.push(escaped);
                chars.next();
                continue;
            }
        }
        out.push(c);
    }
    out
}
