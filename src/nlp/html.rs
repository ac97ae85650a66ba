//! HTML to plain text extraction.
//!
//! A small single-pass stripper tuned for article dump bodies: it drops
//! `<script>` and `<style>` subtrees entirely, replaces every other tag
//! and comment with a space, decodes the handful of entities that survive
//! encyclopedia markup, and collapses whitespace runs.
//!
//! This is deliberately not a full HTML parser; malformed markup degrades
//! to extra whitespace, never to a panic or an error.

/// Convert an HTML fragment to whitespace-normalized plain text.
pub fn html_to_text(html: &str) -> String {
    let stripped = strip_tags(html);
    collapse_whitespace(&decode_entities(&stripped))
}

/// Remove tags, comments, and `script`/`style` subtrees, replacing each
/// with a single space.
fn strip_tags(html: &str) -> String {
    let mut out = String::with_capacity(html.len());
    let bytes = html.as_bytes();
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] == b'<' {
            let rest = &html[i..];
            if rest.starts_with("<!--") {
                i += skip_until(rest, "-->");
                out.push(' ');
            } else if starts_with_tag(rest, "script") {
                i += skip_element(rest, "script");
                out.push(' ');
            } else if starts_with_tag(rest, "style") {
                i += skip_element(rest, "style");
                out.push(' ');
            } else {
                i += skip_until(rest, ">");
                out.push(' ');
            }
        } else {
            let ch = html[i..].chars().next().unwrap_or(' ');
            out.push(ch);
            i += ch.len_utf8();
        }
    }
    out
}

/// Does `rest` (starting at `<`) open the named element?
fn starts_with_tag(rest: &str, name: &str) -> bool {
    let lower = rest.get(1..1 + name.len()).unwrap_or("");
    if !lower.eq_ignore_ascii_case(name) {
        return false;
    }
    matches!(
        rest.as_bytes().get(1 + name.len()),
        Some(b'>') | Some(b' ') | Some(b'\t') | Some(b'\n') | Some(b'/')
    )
}

/// Byte length from the start of `rest` through the closing `</name>`
/// (or to the end of input when unterminated).
fn skip_element(rest: &str, name: &str) -> usize {
    let close = format!("</{name}");
    match find_ascii_ignore_case(rest, &close) {
        Some(pos) => pos + skip_until(&rest[pos..], ">"),
        None => rest.len(),
    }
}

/// Byte offset of the first ASCII-case-insensitive occurrence of
/// `needle`.
///
/// Compares byte windows in place; `str::to_lowercase` would change byte
/// lengths for characters like 'İ' and invalidate the offset. The needle
/// is always ASCII, so a match starts on a char boundary.
fn find_ascii_ignore_case(haystack: &str, needle: &str) -> Option<usize> {
    let haystack = haystack.as_bytes();
    let needle = needle.as_bytes();
    if needle.is_empty() || haystack.len() < needle.len() {
        return None;
    }
    haystack
        .windows(needle.len())
        .position(|window| window.eq_ignore_ascii_case(needle))
}

/// Byte length from the start of `rest` through the first `needle`
/// (or to the end of input when absent).
fn skip_until(rest: &str, needle: &str) -> usize {
    match rest.find(needle) {
        Some(pos) => pos + needle.len(),
        None => rest.len(),
    }
}

/// Decode the entities that commonly appear in article bodies.
fn decode_entities(text: &str) -> String {
    text.replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}

/// Collapse whitespace runs to single spaces and trim the ends.
fn collapse_whitespace(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut pending_space = false;
    for ch in text.chars() {
        if ch.is_whitespace() {
            pending_space = !out.is_empty();
        } else {
            if pending_space {
                out.push(' ');
                pending_space = false;
            }
            out.push(ch);
        }
    }
    out
}
