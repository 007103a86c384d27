#![allow(dead_code)]

use std::collections::VecDeque;
use std::io;

use terminal_invaders::console::{Console, Key};
use terminal_invaders::entities::ColorTag;

#[derive(Clone, Debug, PartialEq)]
pub enum Call {
    MoveCursor(i32, i32),
    SetColor(ColorTag),
    HideCursor,
    ShowCursor,
    Clear,
    Char(i32, i32, char, ColorTag),
    Text(i32, i32, String, ColorTag),
    Flush,
}

/// Records every draw call and replays a fixed key script.  Blocking reads
/// on an exhausted script fail instead of hanging the test.
#[derive(Default)]
pub struct FakeConsole {
    pub calls: Vec<Call>,
    pub keys: VecDeque<Key>,
    pub broken: bool,
}

impl FakeConsole {
    pub fn with_keys(keys: &[Key]) -> Self {
        FakeConsole {
            keys: keys.iter().copied().collect(),
            ..FakeConsole::default()
        }
    }

    pub fn broken() -> Self {
        FakeConsole {
            broken: true,
            ..FakeConsole::default()
        }
    }

    pub fn texts(&self) -> Vec<String> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                Call::Text(_, _, t, _) => Some(t.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn chars(&self) -> Vec<(i32, i32, char)> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                Call::Char(x, y, g, _) => Some((*x, *y, *g)),
                _ => None,
            })
            .collect()
    }

    pub fn has_text(&self, needle: &str) -> bool {
        self.texts().iter().any(|t| t == needle)
    }

    fn check(&self) -> io::Result<()> {
        if self.broken {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "terminal gone"))
        } else {
            Ok(())
        }
    }
}

impl Console for FakeConsole {
    fn move_cursor(&mut self, x: i32, y: i32) -> io::Result<()> {
        self.check()?;
        self.calls.push(Call::MoveCursor(x, y));
        Ok(())
    }

    fn set_color(&mut self, color: ColorTag) -> io::Result<()> {
        self.check()?;
        self.calls.push(Call::SetColor(color));
        Ok(())
    }

    fn hide_cursor(&mut self) -> io::Result<()> {
        self.calls.push(Call::HideCursor);
        Ok(())
    }

    fn show_cursor(&mut self) -> io::Result<()> {
        self.calls.push(Call::ShowCursor);
        Ok(())
    }

    fn clear(&mut self) -> io::Result<()> {
        self.check()?;
        self.calls.push(Call::Clear);
        Ok(())
    }

    fn draw_char(&mut self, x: i32, y: i32, glyph: char, color: ColorTag) -> io::Result<()> {
        self.check()?;
        self.calls.push(Call::Char(x, y, glyph, color));
        Ok(())
    }

    fn draw_text(&mut self, x: i32, y: i32, text: &str, color: ColorTag) -> io::Result<()> {
        self.check()?;
        self.calls.push(Call::Text(x, y, text.to_string(), color));
        Ok(())
    }

    fn poll_key(&mut self) -> io::Result<Option<Key>> {
        Ok(self.keys.pop_front())
    }

    fn read_key(&mut self) -> io::Result<Key> {
        self.keys
            .pop_front()
            .ok_or_else(|| io::Error::new(io::ErrorKind::UnexpectedEof, "key script exhausted"))
    }

    fn flush(&mut self) -> io::Result<()> {
        self.calls.push(Call::Flush);
        Ok(())
    }
}
