/// Crossterm-backed console: all real terminal I/O lives here.

use std::io::Write;
use std::time::Duration;

use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind},
    style::{self, Color, Print},
    terminal, ExecutableCommand, QueueableCommand,
};

use crate::console::{Console, Key};
use crate::entities::ColorTag;

fn to_color(tag: ColorTag) -> Color {
    match tag {
        ColorTag::Green => Color::Green,
        ColorTag::Red => Color::Red,
        ColorTag::Purple => Color::Magenta,
        ColorTag::Cyan => Color::Cyan,
        ColorTag::Yellow => Color::Yellow,
        ColorTag::White => Color::White,
        ColorTag::LightGrey => Color::Grey,
    }
}

fn to_key(code: KeyCode) -> Key {
    match code {
        KeyCode::Left => Key::Left,
        KeyCode::Right => Key::Right,
        KeyCode::Esc => Key::Esc,
        KeyCode::Char(c) => Key::Char(c),
        _ => Key::Other,
    }
}

/// Only presses count; repeats and releases (reported by some terminals) are
/// dropped so one physical press is one input event.
fn key_press(ev: Event) -> Option<Key> {
    match ev {
        Event::Key(KeyEvent {
            code,
            kind: KeyEventKind::Press,
            ..
        }) => Some(to_key(code)),
        _ => None,
    }
}

/// Grid coordinates are validated by the caller; negative ones clamp to 0.
fn cell(v: i32) -> u16 {
    v.clamp(0, u16::MAX as i32) as u16
}

pub struct CrosstermConsole<W: Write> {
    out: W,
}

impl<W: Write> CrosstermConsole<W> {
    pub fn new(out: W) -> Self {
        CrosstermConsole { out }
    }

    /// Raw mode + alternate screen.
    pub fn enter(&mut self) -> std::io::Result<()> {
        terminal::enable_raw_mode()?;
        self.out.execute(terminal::EnterAlternateScreen)?;
        Ok(())
    }

    /// Undo `enter`.  Best effort: every step runs even if an earlier one
    /// failed, and the first error is reported.
    pub fn leave(&mut self) -> std::io::Result<()> {
        let shown = self.out.execute(cursor::Show).map(|_| ());
        let screen = self
            .out
            .execute(terminal::LeaveAlternateScreen)
            .map(|_| ());
        let raw = terminal::disable_raw_mode();
        shown.and(screen).and(raw)
    }
}

impl<W: Write> Console for CrosstermConsole<W> {
    fn move_cursor(&mut self, x: i32, y: i32) -> std::io::Result<()> {
        self.out.queue(cursor::MoveTo(cell(x), cell(y)))?;
        Ok(())
    }

    fn set_color(&mut self, color: ColorTag) -> std::io::Result<()> {
        self.out.queue(style::SetForegroundColor(to_color(color)))?;
        Ok(())
    }

    fn hide_cursor(&mut self) -> std::io::Result<()> {
        self.out.execute(cursor::Hide)?;
        Ok(())
    }

    fn show_cursor(&mut self) -> std::io::Result<()> {
        self.out.execute(cursor::Show)?;
        Ok(())
    }

    fn clear(&mut self) -> std::io::Result<()> {
        self.out.queue(terminal::Clear(terminal::ClearType::All))?;
        self.out.queue(cursor::MoveTo(0, 0))?;
        Ok(())
    }

    fn draw_char(&mut self, x: i32, y: i32, glyph: char, color: ColorTag) -> std::io::Result<()> {
        self.move_cursor(x, y)?;
        self.set_color(color)?;
        self.out.queue(Print(glyph))?;
        Ok(())
    }

    fn draw_text(&mut self, x: i32, y: i32, text: &str, color: ColorTag) -> std::io::Result<()> {
        self.move_cursor(x, y)?;
        self.set_color(color)?;
        self.out.queue(Print(text))?;
        Ok(())
    }

    fn poll_key(&mut self) -> std::io::Result<Option<Key>> {
        while event::poll(Duration::ZERO)? {
            if let Some(key) = key_press(event::read()?) {
                return Ok(Some(key));
            }
        }
        Ok(None)
    }

    fn read_key(&mut self) -> std::io::Result<Key> {
        self.flush()?;
        loop {
            if let Some(key) = key_press(event::read()?) {
                return Ok(key);
            }
        }
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.out.queue(style::ResetColor)?;
        self.out.flush()
    }
}
