use crate::core::Value;
use crate::runtime::event::WidgetAction;
use crate::terminal::{CursorPos, KeyCode, KeyEvent};
use crate::ui::span::Span;
use crate::widgets::base::InputBase;
use crate::widgets::traits::{DrawOutput, Drawable, InteractionResult, Interactive, RenderContext};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const CONTINUATION_INDENT: &str = "    ";

/// Multi-line text. Enter inserts a newline; Tab leaves the field.
pub struct TextAreaInput {
    base: InputBase,
    lines: Vec<String>,
    row: usize,
    col: usize,
    placeholder: Option<String>,
}

impl TextAreaInput {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            base: InputBase::new(id, label),
            lines: vec![String::new()],
            row: 0,
            col: 0,
            placeholder: None,
        }
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    pub fn with_default(mut self, value: impl Into<Value>) -> Self {
        self.set_value(value.into());
        self
    }

    fn text(&self) -> String {
        self.lines.join("\n")
    }

    fn is_blank(&self) -> bool {
        self.lines.iter().all(|line| line.is_empty())
    }

    fn edited(&self) -> InteractionResult {
        InteractionResult::with_action(WidgetAction::ValueChanged {
            id: self.base.id().to_string(),
            value: Value::Text(self.text()),
        })
    }

    fn clamp_col(&mut self) {
        self.col = self.col.min(self.lines[self.row].chars().count());
    }

    fn byte_col(&self) -> usize {
        let line = &self.lines[self.row];
        line.char_indices()
            .nth(self.col)
            .map(|(idx, _)| idx)
            .unwrap_or(line.len())
    }
}

impl Drawable for TextAreaInput {
    fn id(&self) -> &str {
        self.base.id()
    }

    fn label(&self) -> &str {
        self.base.label()
    }

    fn draw(&self, ctx: &RenderContext) -> DrawOutput {
        let focused = self.base.is_focused(ctx);
        let mut lines = Vec::new();

        let mut first = vec![self.base.prefix_span(focused)];
        if self.is_blank() {
            if let Some(placeholder) = &self.placeholder {
                first.push(InputBase::placeholder_span(placeholder.clone()));
            }
        } else {
            first.push(Span::new(self.lines[0].clone()).no_wrap());
        }
        lines.push(first);

        for line in self.lines.iter().skip(1) {
            lines.push(vec![
                Span::new(CONTINUATION_INDENT).no_wrap(),
                Span::new(line.clone()).no_wrap(),
            ]);
        }

        DrawOutput { lines }
    }
}

impl Interactive for TextAreaInput {
    fn on_key(&mut self, key: KeyEvent) -> InteractionResult {
        match key.code {
            KeyCode::Char(ch) if !key.modifiers.control => {
                self.clamp_col();
                let at = self.byte_col();
                self.lines[self.row].insert(at, ch);
                self.col += 1;
                self.edited()
            }
            KeyCode::Enter => {
                self.clamp_col();
                let at = self.byte_col();
                let rest = self.lines[self.row].split_off(at);
                self.lines.insert(self.row + 1, rest);
                self.row += 1;
                self.col = 0;
                self.edited()
            }
            KeyCode::Backspace => {
                self.clamp_col();
                if self.col > 0 {
                    self.col -= 1;
                    let at = self.byte_col();
                    self.lines[self.row].remove(at);
                    return self.edited();
                }
                if self.row > 0 {
                    let tail = self.lines.remove(self.row);
                    self.row -= 1;
                    self.col = self.lines[self.row].chars().count();
                    self.lines[self.row].push_str(&tail);
                    return self.edited();
                }
                InteractionResult::ignored()
            }
            KeyCode::Left => {
                self.clamp_col();
                if self.col > 0 {
                    self.col -= 1;
                    return InteractionResult::handled();
                }
                if self.row > 0 {
                    self.row -= 1;
                    self.col = self.lines[self.row].chars().count();
                    return InteractionResult::handled();
                }
                InteractionResult::ignored()
            }
            KeyCode::Right => {
                self.clamp_col();
                if self.col < self.lines[self.row].chars().count() {
                    self.col += 1;
                    return InteractionResult::handled();
                }
                if self.row + 1 < self.lines.len() {
                    self.row += 1;
                    self.col = 0;
                    return InteractionResult::handled();
                }
                InteractionResult::ignored()
            }
            KeyCode::Up => {
                if self.row > 0 {
                    self.row -= 1;
                    self.clamp_col();
                    return InteractionResult::handled();
                }
                InteractionResult::ignored()
            }
            KeyCode::Down => {
                if self.row + 1 < self.lines.len() {
                    self.row += 1;
                    self.clamp_col();
                    return InteractionResult::handled();
                }
                InteractionResult::ignored()
            }
            KeyCode::Home => {
                self.col = 0;
                InteractionResult::handled()
            }
            KeyCode::End => {
                self.col = self.lines[self.row].chars().count();
                InteractionResult::handled()
            }
            _ => InteractionResult::ignored(),
        }
    }

    fn value(&self) -> Option<Value> {
        Some(Value::Text(self.text()))
    }

    fn set_value(&mut self, value: Value) {
        if let Some(text) = value.to_text_scalar() {
            self.lines = text.split('\n').map(ToOwned::to_owned).collect();
            if self.lines.is_empty() {
                self.lines.push(String::new());
            }
            self.row = self.lines.len() - 1;
            self.col = self.lines[self.row].chars().count();
        }
    }

    fn cursor_pos(&self) -> Option<CursorPos> {
        let col = self.col.min(self.lines[self.row].chars().count());
        let text_width: usize = self.lines[self.row]
            .chars()
            .take(col)
            .map(|ch| UnicodeWidthChar::width(ch).unwrap_or(0))
            .sum();
        let indent = if self.row == 0 {
            UnicodeWidthStr::width(self.base.prefix(true).as_str())
        } else {
            CONTINUATION_INDENT.len()
        };
        Some(CursorPos {
            col: (indent + text_width) as u16,
            row: self.row as u16,
        })
    }
}
