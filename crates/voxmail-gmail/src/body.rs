//! Message body extraction.
//!
//! A Gmail payload is a MIME tree. The reader wants plain text, so the walk
//! prefers the first `text/plain` part anywhere in the tree, falls back to
//! `text/html` run through a small tag stripper, and otherwise yields an
//! empty body.

use base64::Engine as _;
use base64::engine::general_purpose::{URL_SAFE, URL_SAFE_NO_PAD};

use crate::error::GmailResult;
use crate::types::MessagePart;

/// Extract readable text from a message payload.
pub(crate) fn extract_body(payload: &MessagePart) -> GmailResult<String> {
    if let Some(part) = find_part(payload, "text/plain") {
        return decode_part(part);
    }
    if let Some(part) = find_part(payload, "text/html") {
        return Ok(html_to_text(&decode_part(part)?));
    }
    Ok(String::new())
}

/// Depth-first search for the first part of the given MIME type that
/// actually carries data.
fn find_part<'a>(part: &'a MessagePart, mime_type: &str) -> Option<&'a MessagePart> {
    if part.mime_type.eq_ignore_ascii_case(mime_type)
        && part.body.as_ref().is_some_and(|body| body.data.is_some())
    {
        return Some(part);
    }
    part.parts
        .iter()
        .find_map(|child| find_part(child, mime_type))
}

fn decode_part(part: &MessagePart) -> GmailResult<String> {
    let data = part
        .body
        .as_ref()
        .and_then(|body| body.data.as_deref())
        .unwrap_or("");
    let bytes = decode_base64url(data)?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Decode base64url data, accepting both padded and unpadded forms.
fn decode_base64url(data: &str) -> GmailResult<Vec<u8>> {
    URL_SAFE
        .decode(data)
        .or_else(|_| URL_SAFE_NO_PAD.decode(data))
        .map_err(Into::into)
}

/// Reduce an HTML body to readable text.
///
/// Block-level tags and line breaks become newlines, script and style
/// content disappears, and the handful of entities that show up in real
/// mail get decoded.
fn html_to_text(html: &str) -> String {
    let mut text = String::with_capacity(html.len());
    let mut rest = html;

    while let Some(open) = rest.find('<') {
        text.push_str(&rest[..open]);
        let after_open = &rest[open + 1..];
        let Some(close) = after_open.find('>') else {
            rest = "";
            break;
        };
        let tag = after_open[..close].trim();
        let name = tag
            .trim_start_matches('/')
            .split([' ', '\t', '\n', '/'])
            .next()
            .unwrap_or("")
            .to_ascii_lowercase();
        rest = &after_open[close + 1..];

        match name.as_str() {
            "script" | "style" if !tag.starts_with('/') => {
                rest = skip_past_closing_tag(rest, &name);
            }
            "br" | "p" | "div" | "tr" | "li" => text.push('\n'),
            _ => {}
        }
    }
    text.push_str(rest);

    collapse_blank_runs(&decode_entities(&text))
}

/// Cap newline runs at two, so tag soup cannot produce pages of blank
/// lines.
fn collapse_blank_runs(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut newlines = 0;
    for ch in text.chars() {
        if ch == '\n' {
            newlines += 1;
            if newlines <= 2 {
                out.push(ch);
            }
        } else {
            newlines = 0;
            out.push(ch);
        }
    }
    out
}

/// Skip everything up to and including `</name>`.
fn skip_past_closing_tag<'a>(rest: &'a str, name: &str) -> &'a str {
    let closer = format!("</{name}");
    // ASCII lowercasing keeps byte offsets valid in the original.
    let Some(start) = rest.to_ascii_lowercase().find(&closer) else {
        return "";
    };
    let tail = &rest[start..];
    tail.find('>').map_or("", |gt| &tail[gt + 1..])
}

fn decode_entities(text: &str) -> String {
    // Ampersand last, so double-escaped text stays literal.
    text.replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}
