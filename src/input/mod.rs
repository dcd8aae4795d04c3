//! Terminal input
//!
//! Raw mode so single key presses arrive immediately, and a non-blocking
//! drain of whatever keys are pending. Terminals only report presses, so
//! there is no key-up tracking here.

use std::io::{self, Write};
use std::time::Duration;

use crossterm::cursor::Show;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::style::ResetColor;
use crossterm::{execute, terminal};

/// A key press as seen by the game loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyInput {
    /// Plain ASCII byte
    Byte(u8),
    /// Ctrl+C (raw mode swallows the signal, so it arrives as a key)
    Interrupt,
}

/// Raw-mode guard. The terminal is restored when this is dropped, including
/// while unwinding from a panic: cooked mode, default colors, visible cursor.
pub struct RawTerminal {
    active: bool,
}

impl RawTerminal {
    pub fn enable() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        log::debug!("Raw mode enabled");
        Ok(Self { active: true })
    }

    /// Restore the terminal now instead of waiting for drop
    pub fn restore(&mut self) -> io::Result<()> {
        if self.active {
            self.active = false;
            let cooked = terminal::disable_raw_mode();
            reset_display(&mut io::stdout())?;
            cooked?;
            log::debug!("Raw mode restored");
        }
        Ok(())
    }
}

/// Default colors and a visible cursor
fn reset_display<W: Write>(out: &mut W) -> io::Result<()> {
    execute!(out, ResetColor, Show)
}

impl Drop for RawTerminal {
    fn drop(&mut self) {
        if let Err(e) = self.restore() {
            log::warn!("Failed to restore terminal: {}", e);
        }
    }
}

/// Map a terminal key event to game input
///
/// Releases are dropped, as are keys with no ASCII meaning.
pub fn key_input(key: &KeyEvent) -> Option<KeyInput> {
    if key.kind == KeyEventKind::Release {
        return None;
    }

    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Char('c') | KeyCode::Char('C') if ctrl => Some(KeyInput::Interrupt),
        KeyCode::Char(c) if c.is_ascii() && !ctrl => Some(KeyInput::Byte(c as u8)),
        KeyCode::Enter => Some(KeyInput::Byte(b'\r')),
        KeyCode::Tab => Some(KeyInput::Byte(b'\t')),
        KeyCode::Backspace => Some(KeyInput::Byte(0x7f)),
        KeyCode::Esc => Some(KeyInput::Byte(0x1b)),
        _ => None,
    }
}

/// Collect every pending key without blocking
pub fn drain_keys() -> io::Result<Vec<KeyInput>> {
    let mut keys = Vec::new();
    while event::poll(Duration::ZERO)? {
        if let Event::Key(key) = event::read()? {
            keys.extend(key_input(&key));
        }
    }
    Ok(keys)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;

    fn press(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    #[test]
    fn test_ascii_chars_pass_through() {
        let key = press(KeyCode::Char('a'), KeyModifiers::NONE);
        assert_eq!(key_input(&key), Some(KeyInput::Byte(b'a')));

        let key = press(KeyCode::Char('A'), KeyModifiers::SHIFT);
        assert_eq!(key_input(&key), Some(KeyInput::Byte(b'A')));
    }

    #[test]
    fn test_ctrl_c_is_interrupt() {
        let key = press(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(key_input(&key), Some(KeyInput::Interrupt));

        // Other ctrl chords are not game keys
        let key = press(KeyCode::Char('a'), KeyModifiers::CONTROL);
        assert_eq!(key_input(&key), None);
    }

    #[test]
    fn test_special_and_non_ascii_keys() {
        assert_eq!(
            key_input(&press(KeyCode::Esc, KeyModifiers::NONE)),
            Some(KeyInput::Byte(0x1b))
        );
        assert_eq!(key_input(&press(KeyCode::Up, KeyModifiers::NONE)), None);
        assert_eq!(
            key_input(&press(KeyCode::Char('é'), KeyModifiers::NONE)),
            None
        );
    }

    #[test]
    fn test_reset_display_shows_cursor() {
        let mut out = Vec::new();
        reset_display(&mut out).unwrap();
        assert_eq!(out, b"\x1b[0m\x1b[?25h");
    }

    #[test]
    fn test_release_ignored() {
        let mut key = press(KeyCode::Char('d'), KeyModifiers::NONE);
        key.kind = KeyEventKind::Release;
        assert_eq!(key_input(&key), None);

        key.kind = KeyEventKind::Repeat;
        assert_eq!(key_input(&key), Some(KeyInput::Byte(b'd')));
    }
}
