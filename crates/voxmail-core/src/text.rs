//! Text utilities shared by the terminal views and the speech path.

use std::sync::OnceLock;

use regex::{NoExpand, Regex};

static URL_RE: OnceLock<Regex> = OnceLock::new();

fn url_pattern() -> &'static Regex {
    URL_RE.get_or_init(|| {
        Regex::new(r#"[A-Za-z][A-Za-z0-9+.-]*://[^\s<>"]+"#).expect("URL pattern is valid")
    })
}

/// Replace every URL in `text` with `replacement`.
///
/// The views use `"[URL]"` so a link is still visible on screen; the speech
/// path uses `""` so links are not read out character by character.
pub fn redact_urls(text: &str, replacement: &str) -> String {
    url_pattern()
        .replace_all(text, NoExpand(replacement))
        .into_owned()
}

/// Collapse all whitespace runs (including newlines) into single spaces.
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Word-wrap `text` to `width` columns for the detail view.
///
/// Each input line wraps independently; blank lines produce no rows. Words
/// longer than `width` are broken at the column boundary. Width is counted
/// in characters.
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    if width == 0 {
        return text.lines().map(str::to_string).collect();
    }

    let mut rows = Vec::new();
    for line in text.split('\n') {
        let mut current = String::new();
        let mut current_chars = 0usize;

        for word in line.split_whitespace() {
            let word_chars = word.chars().count();

            if word_chars > width {
                if !current.is_empty() {
                    rows.push(std::mem::take(&mut current));
                }
                let mut piece = String::new();
                let mut piece_chars = 0usize;
                for ch in word.chars() {
                    if piece_chars == width {
                        rows.push(std::mem::take(&mut piece));
                        piece_chars = 0;
                    }
                    piece.push(ch);
                    piece_chars += 1;
                }
                current = piece;
                current_chars = piece_chars;
                continue;
            }

            let needed = if current.is_empty() {
                word_chars
            } else {
                current_chars + 1 + word_chars
            };

            if needed > width && !current.is_empty() {
                rows.push(std::mem::take(&mut current));
                current.push_str(word);
                current_chars = word_chars;
            } else {
                if !current.is_empty() {
                    current.push(' ');
                    current_chars += 1;
                }
                current.push_str(word);
                current_chars += word_chars;
            }
        }

        if !current.is_empty() {
            rows.push(current);
        }
    }
    rows
}
