use crate::core::Value;
use crate::runtime::event::WidgetAction;
use crate::schema::password;
use crate::terminal::{CursorPos, KeyCode, KeyEvent};
use crate::ui::span::Span;
use crate::ui::style::{Color, Style};
use crate::widgets::base::InputBase;
use crate::widgets::text_edit;
use crate::widgets::traits::{DrawOutput, Drawable, InteractionResult, Interactive, RenderContext};
use unicode_width::UnicodeWidthStr;

const STRENGTH_BAR_WIDTH: usize = 20;

/// Masked text field with Ctrl+T visibility toggle and an optional
/// requirement checklist + strength bar under the value.
pub struct PasswordInput {
    base: InputBase,
    value: String,
    cursor: usize,
    visible: bool,
    show_strength: bool,
    show_requirements: bool,
}

impl PasswordInput {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            base: InputBase::new(id, label),
            value: String::new(),
            cursor: 0,
            visible: false,
            show_strength: false,
            show_requirements: false,
        }
    }

    pub fn with_strength_meter(mut self) -> Self {
        self.show_strength = true;
        self
    }

    pub fn with_requirement_list(mut self) -> Self {
        self.show_requirements = true;
        self
    }

    pub fn with_default(mut self, value: impl Into<Value>) -> Self {
        self.set_value(value.into());
        self
    }

    fn display_value(&self) -> String {
        if self.visible {
            self.value.clone()
        } else {
            "*".repeat(text_edit::char_count(&self.value))
        }
    }

    fn edited(&self) -> InteractionResult {
        InteractionResult::with_action(WidgetAction::ValueChanged {
            id: self.base.id().to_string(),
            value: Value::Text(self.value.clone()),
        })
    }

    fn strength_line(&self) -> Vec<Span> {
        let strength = password::strength(&self.value);
        let filled = STRENGTH_BAR_WIDTH * strength as usize / 100;
        let color = password::strength_color(strength);
        vec![
            Span::new("    ").no_wrap(),
            Span::styled("█".repeat(filled), Style::new().color(color)).no_wrap(),
            Span::styled(
                "░".repeat(STRENGTH_BAR_WIDTH - filled),
                Style::new().color(Color::DarkGrey),
            )
            .no_wrap(),
        ]
    }

    fn requirement_lines(&self) -> Vec<Vec<Span>> {
        let checks = password::checks(&self.value);
        password::REQUIREMENTS
            .iter()
            .zip(checks.iter())
            .map(|(requirement, met)| {
                let (glyph, color) = if *met {
                    ("✓", Color::Green)
                } else {
                    ("✗", Color::DarkGrey)
                };
                vec![
                    Span::new("    ").no_wrap(),
                    Span::styled(format!("{glyph} {}", requirement.label), Style::new().color(color))
                        .no_wrap(),
                ]
            })
            .collect()
    }
}

impl Drawable for PasswordInput {
    fn id(&self) -> &str {
        self.base.id()
    }

    fn label(&self) -> &str {
        self.base.label()
    }

    fn draw(&self, ctx: &RenderContext) -> DrawOutput {
        let focused = self.base.is_focused(ctx);
        let mut lines = vec![vec![
            self.base.prefix_span(focused),
            Span::new(self.display_value()).no_wrap(),
        ]];

        if self.show_strength && focused {
            lines.push(self.strength_line());
        }
        if self.show_requirements && focused {
            lines.extend(self.requirement_lines());
        }

        DrawOutput { lines }
    }
}

impl Interactive for PasswordInput {
    fn on_key(&mut self, key: KeyEvent) -> InteractionResult {
        match key.code {
            KeyCode::Char('t') if key.modifiers.control => {
                self.visible = !self.visible;
                InteractionResult::handled()
            }
            KeyCode::Char(ch) if !key.modifiers.control => {
                text_edit::insert_char(&mut self.value, &mut self.cursor, ch);
                self.edited()
            }
            KeyCode::Backspace => {
                if text_edit::backspace_char(&mut self.value, &mut self.cursor) {
                    return self.edited();
                }
                InteractionResult::ignored()
            }
            KeyCode::Delete => {
                if text_edit::delete_char(&mut self.value, &mut self.cursor) {
                    return self.edited();
                }
                InteractionResult::ignored()
            }
            KeyCode::Left => {
                if text_edit::move_left(&mut self.cursor, &self.value) {
                    return InteractionResult::handled();
                }
                InteractionResult::ignored()
            }
            KeyCode::Right => {
                if text_edit::move_right(&mut self.cursor, &self.value) {
                    return InteractionResult::handled();
                }
                InteractionResult::ignored()
            }
            KeyCode::Home => {
                self.cursor = 0;
                InteractionResult::handled()
            }
            KeyCode::End => {
                self.cursor = text_edit::char_count(&self.value);
                InteractionResult::handled()
            }
            KeyCode::Enter => InteractionResult::input_done(),
            _ => InteractionResult::ignored(),
        }
    }

    fn value(&self) -> Option<Value> {
        Some(Value::Text(self.value.clone()))
    }

    fn set_value(&mut self, value: Value) {
        if let Some(text) = value.to_text_scalar() {
            self.value = text;
            self.cursor = text_edit::char_count(&self.value);
        }
    }

    fn current_text(&self) -> Option<String> {
        Some(self.value.clone())
    }

    fn cursor_pos(&self) -> Option<CursorPos> {
        let prefix = self.base.prefix(true);
        let col = if self.visible {
            self.value
                .chars()
                .take(text_edit::clamp_cursor(self.cursor, &self.value))
                .map(|ch| unicode_width::UnicodeWidthChar::width(ch).unwrap_or(0))
                .sum::<usize>()
        } else {
            text_edit::clamp_cursor(self.cursor, &self.value)
        };
        Some(CursorPos {
            col: (UnicodeWidthStr::width(prefix.as_str()) + col) as u16,
            row: 0,
        })
    }
}
