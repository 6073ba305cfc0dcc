//! Mailbox list view.
//!
//! One mutt-style row per message with the selection in reverse video.
//! Arrow keys move the selection, Enter opens the detail view, 't'
//! toggles speak-on-scroll and 'q' leaves the reader.

use std::io::{self, Write};

use crossterm::cursor::MoveTo;
use crossterm::event::KeyCode;
use crossterm::queue;
use crossterm::style::{Attribute, Color, Print, SetAttribute, SetForegroundColor};
use crossterm::terminal::{self, Clear, ClearType};

use super::{Reader, centered_column, detail, draw_status_bar, next_key, truncate_columns};

const TITLE: &str = "voxmail";

/// Rows above the first message line: the title row plus a blank one.
const FIRST_MESSAGE_ROW: usize = 2;

/// Run the list view until the user quits the reader.
pub(super) fn browse(reader: &mut Reader<'_>) -> io::Result<()> {
    if reader.prefs.speak_on_scroll {
        if let Some(message) = reader.messages.first() {
            reader.speech.stop();
            reader.speech.speak(message.speech_summary());
        }
    }
    loop {
        draw(reader)?;
        let Some(key) = next_key()? else { continue };
        match key.code {
            KeyCode::Char('q') => return Ok(()),
            KeyCode::Up => move_selection(reader, -1),
            KeyCode::Down => move_selection(reader, 1),
            KeyCode::Enter => {
                if !reader.messages.is_empty() {
                    reader.speech.stop();
                    reader.speech.reset_resumable();
                    detail::read(reader, reader.selected)?;
                }
            }
            KeyCode::Char('t') => {
                reader.prefs.speak_on_scroll = !reader.prefs.speak_on_scroll;
            }
            _ => {}
        }
    }
}

/// Move the selection by `delta` rows and announce the newly selected
/// message when speak-on-scroll is on.
fn move_selection(reader: &mut Reader<'_>, delta: isize) {
    if reader.messages.is_empty() {
        return;
    }
    reader.selected = step_selection(reader.selected, delta, reader.messages.len());
    if reader.prefs.speak_on_scroll {
        reader.speech.stop();
        reader
            .speech
            .speak(reader.messages[reader.selected].speech_summary());
    }
}

/// New selection index after moving `delta` rows, clamped to the list.
fn step_selection(selected: usize, delta: isize, len: usize) -> usize {
    if len == 0 {
        0
    } else {
        selected.saturating_add_signed(delta).min(len - 1)
    }
}

/// Scroll offset that keeps `selected` inside the `visible`-row window.
fn follow_selection(scroll: usize, selected: usize, visible: usize) -> usize {
    if selected < scroll {
        selected
    } else if selected >= scroll + visible {
        selected + 1 - visible
    } else {
        scroll
    }
}

fn draw(reader: &mut Reader<'_>) -> io::Result<()> {
    let mut out = io::stdout();
    let (width, height) = terminal::size()?;
    let columns = usize::from(width);
    let visible = usize::from(height)
        .saturating_sub(FIRST_MESSAGE_ROW + 2)
        .max(1);
    reader.scroll = follow_selection(reader.scroll, reader.selected, visible);

    queue!(
        out,
        Clear(ClearType::All),
        MoveTo(centered_column(width, TITLE), 0),
        SetForegroundColor(Color::Cyan),
        SetAttribute(Attribute::Bold),
        Print(TITLE),
        SetAttribute(Attribute::Reset)
    )?;

    for (row, index) in (reader.scroll..reader.scroll + visible).enumerate() {
        let Some(message) = reader.messages.get(index) else {
            break;
        };
        let line = truncate_columns(&message.list_line(), columns.saturating_sub(1));
        let y = (row + FIRST_MESSAGE_ROW) as u16;
        if index == reader.selected {
            queue!(
                out,
                MoveTo(0, y),
                SetAttribute(Attribute::Reverse),
                Print(line),
                SetAttribute(Attribute::NoReverse)
            )?;
        } else {
            queue!(out, MoveTo(0, y), Print(line))?;
        }
    }

    let status = format!(
        "Press 'q' to exit | 't' to toggle speak on scroll ({})",
        if reader.prefs.speak_on_scroll { "On" } else { "Off" }
    );
    draw_status_bar(&mut out, width, height, &status)?;
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selection_clamps_at_both_ends() {
        assert_eq!(step_selection(0, -1, 5), 0);
        assert_eq!(step_selection(4, 1, 5), 4);
        assert_eq!(step_selection(2, 1, 5), 3);
        assert_eq!(step_selection(2, -1, 5), 1);
    }

    #[test]
    fn selection_of_an_empty_list_stays_put() {
        assert_eq!(step_selection(0, 1, 0), 0);
        assert_eq!(step_selection(0, -1, 0), 0);
    }

    #[test]
    fn scrolling_follows_the_selection_down() {
        // Window of 3 rows at the top, selection moves past the bottom edge
        assert_eq!(follow_selection(0, 3, 3), 1);
        assert_eq!(follow_selection(1, 5, 3), 3);
    }

    #[test]
    fn scrolling_follows_the_selection_up() {
        assert_eq!(follow_selection(4, 3, 3), 3);
        assert_eq!(follow_selection(4, 0, 3), 0);
    }

    #[test]
    fn scrolling_holds_still_while_the_selection_is_visible() {
        assert_eq!(follow_selection(2, 3, 3), 2);
        assert_eq!(follow_selection(2, 2, 3), 2);
        assert_eq!(follow_selection(2, 4, 3), 2);
    }
}
