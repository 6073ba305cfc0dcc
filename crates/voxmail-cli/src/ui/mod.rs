//! Terminal reader views.
//!
//! Two screens drawn directly with crossterm on the alternate screen: the
//! mailbox list and the message detail view. Event polling runs on a
//! 100 ms tick so the views redraw without busy-waiting, and a guard
//! restores the caller's terminal when the reader leaves, on any path.

// Terminal coordinates are u16; the row/column arithmetic stays inside that.
#![allow(clippy::cast_possible_truncation)]

mod detail;
mod list;

use std::io::{self, Write};
use std::time::Duration;

use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::event::{self, Event, KeyEvent, KeyEventKind};
use crossterm::style::{Attribute, Print, SetAttribute};
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use crossterm::{execute, queue};
use voxmail_core::Message;
use voxmail_speech::SpeechController;

/// How long each view waits for a key before redrawing.
const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// View preferences the reader can change while it runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewPrefs {
    /// Current speech rate in words per minute.
    pub rate_wpm: u32,
    /// Whether moving the list selection announces the message.
    pub speak_on_scroll: bool,
    /// Whether message bodies show full URLs.
    pub show_urls: bool,
}

/// Shared state of the two views.
struct Reader<'a> {
    messages: &'a [Message],
    speech: &'a SpeechController,
    prefs: ViewPrefs,
    selected: usize,
    scroll: usize,
}

/// Run the reader over `messages` until the user quits.
///
/// Returns the preferences as they stood at exit so changed ones can be
/// saved.
pub fn run(
    messages: &[Message],
    speech: &SpeechController,
    prefs: ViewPrefs,
) -> io::Result<ViewPrefs> {
    let _guard = TerminalGuard::enter()?;
    let mut reader = Reader {
        messages,
        speech,
        prefs,
        selected: 0,
        scroll: 0,
    };
    list::browse(&mut reader)?;
    Ok(reader.prefs)
}

/// Raw mode plus the alternate screen for the lifetime of the value;
/// `Drop` hands the terminal back.
struct TerminalGuard;

impl TerminalGuard {
    fn enter() -> io::Result<Self> {
        enable_raw_mode()?;
        execute!(io::stdout(), EnterAlternateScreen, Hide)?;
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = execute!(io::stdout(), Show, LeaveAlternateScreen);
        let _ = disable_raw_mode();
    }
}

/// Wait up to one poll tick for a key press.
///
/// Returns `None` on the tick so callers redraw; release events are
/// filtered out.
fn next_key() -> io::Result<Option<KeyEvent>> {
    if event::poll(POLL_INTERVAL)? {
        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Release {
                return Ok(Some(key));
            }
        }
    }
    Ok(None)
}

/// Draw `text` in reverse video across the bottom row.
fn draw_status_bar(out: &mut impl Write, width: u16, height: u16, text: &str) -> io::Result<()> {
    queue!(
        out,
        MoveTo(0, height.saturating_sub(1)),
        SetAttribute(Attribute::Reverse),
        Print(status_line(text, usize::from(width))),
        SetAttribute(Attribute::NoReverse)
    )?;
    Ok(())
}

/// One status line, truncated and padded to the second-to-last column.
fn status_line(text: &str, columns: usize) -> String {
    let max = columns.saturating_sub(1);
    format!("{:<width$}", truncate_columns(text, max), width = max)
}

/// Truncate to at most `max` characters.
fn truncate_columns(text: &str, max: usize) -> String {
    text.chars().take(max).collect()
}

/// Column at which `text` starts so it sits centred across `width`
/// columns. `text` must already fit the row.
fn centered_column(width: u16, text: &str) -> u16 {
    let len = text.chars().count() as u16;
    (width / 2).saturating_sub(len / 2 + len % 2)
}
