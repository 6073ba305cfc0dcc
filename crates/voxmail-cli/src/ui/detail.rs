//! Message detail view.
//!
//! Headers pinned at the top, the wrapped body below them. 's' starts or
//! stops reading the body aloud, 'u' toggles URL display, '+' and '-'
//! change the speech rate and 'q' returns to the list.

use std::io::{self, Write};

use crossterm::cursor::MoveTo;
use crossterm::event::KeyCode;
use crossterm::queue;
use crossterm::style::{Attribute, Color, Print, SetAttribute, SetForegroundColor};
use crossterm::terminal::{self, Clear, ClearType};
use voxmail_core::{collapse_whitespace, redact_urls, wrap_text};

use super::{Reader, draw_status_bar, next_key, truncate_columns};

/// Speech never drops below this rate; most engines go silent near zero.
const MIN_RATE_WPM: u32 = 10;
const RATE_STEP_WPM: u32 = 10;

/// First screen row of the body, leaving the headers and a blank line.
const FIRST_BODY_ROW: usize = 4;

/// Marker drawn in place of a link when URLs are hidden.
const URL_MARKER: &str = "[URL]";

/// Run the detail view for the message at `index` until the user backs
/// out.
pub(super) fn read(reader: &mut Reader<'_>, index: usize) -> io::Result<()> {
    let mut scroll = 0usize;
    loop {
        draw(reader, index, scroll)?;
        let Some(key) = next_key()? else { continue };
        match key.code {
            KeyCode::Char('q') => {
                reader.speech.stop();
                return Ok(());
            }
            KeyCode::Up => scroll = scroll.saturating_sub(1),
            KeyCode::Down => scroll = scroll.saturating_add(1),
            KeyCode::Char('s') => toggle_body_speech(reader, index),
            KeyCode::Char('+') => change_rate(reader, true),
            KeyCode::Char('-') => change_rate(reader, false),
            KeyCode::Char('u') => reader.prefs.show_urls = !reader.prefs.show_urls,
            _ => {}
        }
    }
}

/// Stop speech if the body is playing, otherwise start it from where it
/// last left off.
fn toggle_body_speech(reader: &Reader<'_>, index: usize) {
    if reader.speech.is_speaking() {
        reader.speech.stop();
    } else {
        let message = &reader.messages[index];
        reader
            .speech
            .speak_resumable(spoken_body(message.body_text(), reader.prefs.show_urls));
    }
}

fn change_rate(reader: &mut Reader<'_>, increase: bool) {
    reader.prefs.rate_wpm = bumped_rate(reader.prefs.rate_wpm, increase);
    reader.speech.set_rate(reader.prefs.rate_wpm);
}

/// Rate after one '+' or '-' press, clamped to the floor.
const fn bumped_rate(rate: u32, increase: bool) -> u32 {
    if increase {
        rate.saturating_add(RATE_STEP_WPM)
    } else {
        let lowered = rate.saturating_sub(RATE_STEP_WPM);
        if lowered < MIN_RATE_WPM { MIN_RATE_WPM } else { lowered }
    }
}

/// Body as drawn: URLs replaced with a visible marker unless shown.
fn display_body(body: &str, show_urls: bool) -> String {
    if show_urls {
        body.to_string()
    } else {
        redact_urls(body, URL_MARKER)
    }
}

/// Body as spoken: URLs dropped entirely unless shown, whitespace
/// flattened so line breaks do not read as pauses.
fn spoken_body(body: &str, show_urls: bool) -> String {
    if show_urls {
        collapse_whitespace(body)
    } else {
        collapse_whitespace(&redact_urls(body, ""))
    }
}

fn draw(reader: &Reader<'_>, index: usize, scroll: usize) -> io::Result<()> {
    let mut out = io::stdout();
    let (width, height) = terminal::size()?;
    let columns = usize::from(width);
    let message = &reader.messages[index];

    let headers = [
        format!("Subject: {}", message.subject),
        format!("From: {}", message.sender),
        format!("Date: {}", message.date_full()),
    ];
    queue!(
        out,
        Clear(ClearType::All),
        SetForegroundColor(Color::Cyan),
        SetAttribute(Attribute::Bold)
    )?;
    for (row, header) in headers.iter().enumerate() {
        queue!(
            out,
            MoveTo(0, row as u16),
            Print(truncate_columns(header, columns.saturating_sub(1)))
        )?;
    }
    queue!(out, SetAttribute(Attribute::Reset))?;

    let body = display_body(message.body_text(), reader.prefs.show_urls);
    let rows = wrap_text(&body, columns.saturating_sub(1).max(1));
    let last_body_row = usize::from(height).saturating_sub(1);
    for (i, line) in rows.iter().enumerate().skip(scroll) {
        let y = FIRST_BODY_ROW + i - scroll;
        if y >= last_body_row {
            break;
        }
        queue!(out, MoveTo(0, y as u16), Print(line))?;
    }

    let status = format!(
        "Press 'q' to return | 's' to speak/stop | 'u' to toggle URLs | +/- to change speed (current: {})",
        reader.prefs.rate_wpm
    );
    draw_status_bar(&mut out, width, height, &status)?;
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rate_steps_by_ten_in_both_directions() {
        assert_eq!(bumped_rate(130, true), 140);
        assert_eq!(bumped_rate(130, false), 120);
    }

    #[test]
    fn rate_never_drops_below_the_floor() {
        assert_eq!(bumped_rate(20, false), 10);
        assert_eq!(bumped_rate(15, false), 10);
        assert_eq!(bumped_rate(10, false), 10);
    }

    #[test]
    fn hidden_urls_are_marked_on_screen() {
        let body = "see https://example.com/page for details";
        assert_eq!(display_body(body, false), "see [URL] for details");
        assert_eq!(display_body(body, true), body);
    }

    #[test]
    fn spoken_body_skips_urls_and_flattens_whitespace() {
        let body = "first line\nsee https://example.com\n\nlast  line";
        assert_eq!(spoken_body(body, false), "first line see last line");
        assert_eq!(
            spoken_body(body, true),
            "first line see https://example.com last line"
        );
    }
}
