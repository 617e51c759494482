use crate::terminal::{CursorPos, KeyCode, KeyEvent, KeyModifiers, TerminalEvent, TerminalSize};
use crate::ui::span::SpanLine;
use crate::ui::style::Color;
use crossterm::event::{Event, KeyEventKind, poll, read};
use crossterm::style::{Attribute, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor};
use crossterm::{cursor, execute, queue, terminal};
use std::io::{self, Stdout, Write};
use std::time::Duration;

/// Inline (non-alternate-screen) terminal session: the wizard renders at
/// the shell cursor position and redraws in place each frame.
pub struct Terminal {
    stdout: Stdout,
    size: TerminalSize,
    origin_row: u16,
    last_height: u16,
}

impl Terminal {
    pub fn new() -> io::Result<Self> {
        let stdout = io::stdout();
        let (width, height) = terminal::size()?;
        let (_, origin_row) = cursor::position()?;
        Ok(Self {
            stdout,
            size: TerminalSize { width, height },
            origin_row,
            last_height: 0,
        })
    }

    pub fn enter(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(self.stdout, terminal::DisableLineWrap, cursor::Hide)
    }

    pub fn exit(&mut self) -> io::Result<()> {
        let end_row = self
            .origin_row
            .saturating_add(self.last_height)
            .min(self.size.height.saturating_sub(1));
        execute!(
            self.stdout,
            cursor::MoveTo(0, end_row),
            terminal::Clear(terminal::ClearType::FromCursorDown),
            terminal::EnableLineWrap,
            cursor::Show
        )?;
        terminal::disable_raw_mode()
    }

    pub fn size(&self) -> TerminalSize {
        self.size
    }

    pub fn poll_event(&mut self, timeout: Duration) -> io::Result<Option<TerminalEvent>> {
        if !poll(timeout)? {
            return Ok(None);
        }
        loop {
            match read()? {
                Event::Key(key) => {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    return Ok(Some(TerminalEvent::Key(map_key_event(key))));
                }
                Event::Resize(width, height) => {
                    self.size = TerminalSize { width, height };
                    return Ok(Some(TerminalEvent::Resize { width, height }));
                }
                _ => {
                    if !poll(Duration::ZERO)? {
                        return Ok(None);
                    }
                }
            }
        }
    }

    pub fn render(&mut self, lines: &[SpanLine], frame_cursor: Option<CursorPos>) -> io::Result<()> {
        let height = lines.len() as u16;
        // Keep the frame on screen when it grows past the bottom edge.
        let max_origin = self.size.height.saturating_sub(height.max(1));
        self.origin_row = self.origin_row.min(max_origin);

        queue!(self.stdout, cursor::Hide, cursor::MoveTo(0, self.origin_row))?;
        queue!(
            self.stdout,
            terminal::Clear(terminal::ClearType::FromCursorDown)
        )?;

        for (row, line) in lines.iter().enumerate() {
            queue!(
                self.stdout,
                cursor::MoveTo(0, self.origin_row.saturating_add(row as u16))
            )?;
            self.render_line(line)?;
        }

        if let Some(pos) = frame_cursor {
            queue!(
                self.stdout,
                cursor::MoveTo(pos.col, self.origin_row.saturating_add(pos.row)),
                cursor::Show
            )?;
        }

        self.last_height = height;
        self.stdout.flush()
    }

    fn render_line(&mut self, line: &SpanLine) -> io::Result<()> {
        for span in line {
            let styled =
                span.style.color.is_some() || span.style.background.is_some() || span.style.bold;

            if let Some(fg) = span.style.color {
                queue!(self.stdout, SetForegroundColor(map_color(fg)))?;
            }
            if let Some(bg) = span.style.background {
                queue!(self.stdout, SetBackgroundColor(map_color(bg)))?;
            }
            if span.style.bold {
                queue!(self.stdout, SetAttribute(Attribute::Bold))?;
            }

            write!(self.stdout, "{}", span.text)?;

            if styled {
                queue!(self.stdout, SetAttribute(Attribute::Reset), ResetColor)?;
            }
        }
        Ok(())
    }
}

fn map_color(color: Color) -> crossterm::style::Color {
    match color {
        Color::Black => crossterm::style::Color::Black,
        Color::DarkGrey => crossterm::style::Color::DarkGrey,
        Color::Red => crossterm::style::Color::Red,
        Color::Orange => crossterm::style::Color::DarkYellow,
        Color::Green => crossterm::style::Color::Green,
        Color::Yellow => crossterm::style::Color::Yellow,
        Color::Blue => crossterm::style::Color::Blue,
        Color::Magenta => crossterm::style::Color::Magenta,
        Color::Cyan => crossterm::style::Color::Cyan,
        Color::White => crossterm::style::Color::White,
    }
}

fn map_key_event(event: crossterm::event::KeyEvent) -> KeyEvent {
    KeyEvent {
        code: map_key_code(event.code),
        modifiers: map_key_modifiers(event.modifiers),
    }
}

fn map_key_code(code: crossterm::event::KeyCode) -> KeyCode {
    match code {
        crossterm::event::KeyCode::Char(ch) => KeyCode::Char(ch),
        crossterm::event::KeyCode::Backspace => KeyCode::Backspace,
        crossterm::event::KeyCode::Delete => KeyCode::Delete,
        crossterm::event::KeyCode::Enter => KeyCode::Enter,
        crossterm::event::KeyCode::Esc => KeyCode::Esc,
        crossterm::event::KeyCode::Left => KeyCode::Left,
        crossterm::event::KeyCode::Right => KeyCode::Right,
        crossterm::event::KeyCode::Up => KeyCode::Up,
        crossterm::event::KeyCode::Down => KeyCode::Down,
        crossterm::event::KeyCode::Home => KeyCode::Home,
        crossterm::event::KeyCode::End => KeyCode::End,
        crossterm::event::KeyCode::Tab => KeyCode::Tab,
        crossterm::event::KeyCode::BackTab => KeyCode::BackTab,
        _ => KeyCode::Other,
    }
}

fn map_key_modifiers(modifiers: crossterm::event::KeyModifiers) -> KeyModifiers {
    KeyModifiers {
        shift: modifiers.contains(crossterm::event::KeyModifiers::SHIFT),
        control: modifiers.contains(crossterm::event::KeyModifiers::CONTROL),
        alt: modifiers.contains(crossterm::event::KeyModifiers::ALT),
    }
}
