/// The narrow platform contract the game core draws and reads keys through.
///
/// `terminal::CrosstermConsole` is the real implementation; tests substitute a
/// recording fake.  Nothing outside `terminal` knows which terminal API is in
/// use.

use std::io;

use crate::entities::{ColorTag, Input};

/// A decoded key press.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key {
    Left,
    Right,
    Char(char),
    Esc,
    Other,
}

impl Key {
    /// Fixed key bindings.
    pub fn to_input(self) -> Option<Input> {
        match self {
            Key::Left | Key::Char('a') | Key::Char('A') => Some(Input::MoveLeft),
            Key::Right | Key::Char('d') | Key::Char('D') => Some(Input::MoveRight),
            Key::Char(' ') => Some(Input::Fire),
            Key::Char('p') | Key::Char('P') => Some(Input::TogglePause),
            Key::Esc => Some(Input::Quit),
            _ => None,
        }
    }
}

pub trait Console {
    fn move_cursor(&mut self, x: i32, y: i32) -> io::Result<()>;

    fn set_color(&mut self, color: ColorTag) -> io::Result<()>;

    fn hide_cursor(&mut self) -> io::Result<()>;

    fn show_cursor(&mut self) -> io::Result<()>;

    fn clear(&mut self) -> io::Result<()>;

    fn draw_char(&mut self, x: i32, y: i32, glyph: char, color: ColorTag) -> io::Result<()>;

    fn draw_text(&mut self, x: i32, y: i32, text: &str, color: ColorTag) -> io::Result<()>;

    /// Returns at once; `None` when no key is waiting.
    fn poll_key(&mut self) -> io::Result<Option<Key>>;

    fn read_key(&mut self) -> io::Result<Key>;

    /// Push any queued output to the screen.
    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
