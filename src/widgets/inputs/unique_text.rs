use crate::core::Value;
use crate::runtime::event::WidgetAction;
use crate::schema::Probe;
use crate::task::probe::{ProbeState, ProbeStatus};
use crate::terminal::{CursorPos, KeyCode, KeyEvent};
use crate::ui::span::Span;
use crate::ui::style::{Color, Style};
use crate::ui::spinner::Spinner;
use crate::widgets::base::InputBase;
use crate::widgets::text_edit;
use crate::widgets::traits::{DrawOutput, Drawable, InteractionResult, Interactive, RenderContext};
use unicode_width::UnicodeWidthStr;

/// Text field with a debounced availability check against an injected
/// predicate. Edits invalidate anything in flight; only the result for
/// the latest value is ever shown.
pub struct UniqueTextInput {
    base: InputBase,
    value: String,
    cursor: usize,
    placeholder: Option<String>,
    probe: Probe,
    state: ProbeState,
    spinner: Spinner,
}

impl UniqueTextInput {
    pub fn new(id: impl Into<String>, label: impl Into<String>, probe: Probe) -> Self {
        Self {
            base: InputBase::new(id, label),
            value: String::new(),
            cursor: 0,
            placeholder: None,
            probe,
            state: ProbeState::default(),
            spinner: Spinner::new(),
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

    pub fn status(&self) -> ProbeStatus {
        self.state.status()
    }

    fn edited(&mut self) -> InteractionResult {
        self.state.invalidate();
        let mut actions = vec![WidgetAction::ValueChanged {
            id: self.base.id().to_string(),
            value: Value::Text(self.value.clone()),
        }];
        if !self.value.is_empty() {
            actions.push(WidgetAction::CheckRequested {
                id: self.base.id().to_string(),
                value: self.value.clone(),
            });
        }
        InteractionResult::with_actions(actions)
    }

    fn status_span(&self) -> Option<Span> {
        match self.state.status() {
            ProbeStatus::Unknown => None,
            ProbeStatus::Checking => Some(self.spinner.span()),
            ProbeStatus::Available => {
                Some(Span::styled("✓", Style::new().color(Color::Green)).no_wrap())
            }
            ProbeStatus::Unavailable => {
                Some(Span::styled("✗ taken", Style::new().color(Color::Red)).no_wrap())
            }
        }
    }
}

impl Drawable for UniqueTextInput {
    fn id(&self) -> &str {
        self.base.id()
    }

    fn label(&self) -> &str {
        self.base.label()
    }

    fn draw(&self, ctx: &RenderContext) -> DrawOutput {
        let focused = self.base.is_focused(ctx);
        let mut line = vec![self.base.prefix_span(focused)];
        if self.value.is_empty() {
            if let Some(placeholder) = &self.placeholder {
                line.push(InputBase::placeholder_span(placeholder.clone()));
            }
        } else {
            line.push(Span::new(self.value.clone()).no_wrap());
        }
        if let Some(status) = self.status_span() {
            line.push(Span::new("  ").no_wrap());
            line.push(status);
        }
        DrawOutput { lines: vec![line] }
    }
}

impl Interactive for UniqueTextInput {
    fn on_key(&mut self, key: KeyEvent) -> InteractionResult {
        match key.code {
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

    fn on_tick(&mut self) -> bool {
        if self.state.status() == ProbeStatus::Checking {
            self.spinner.tick();
            return true;
        }
        false
    }

    fn value(&self) -> Option<Value> {
        Some(Value::Text(self.value.clone()))
    }

    fn set_value(&mut self, value: Value) {
        if let Some(text) = value.to_text_scalar() {
            if text != self.value {
                self.state.invalidate();
            }
            self.value = text;
            self.cursor = text_edit::char_count(&self.value);
        }
    }

    fn probe(&self) -> Option<Probe> {
        Some(self.probe.clone())
    }

    fn current_text(&self) -> Option<String> {
        Some(self.value.clone())
    }

    fn begin_check(&mut self) -> Option<u64> {
        if self.value.is_empty() {
            return None;
        }
        Some(self.state.begin_check())
    }

    fn apply_check(&mut self, seq: u64, result: Result<bool, String>) {
        self.state.apply(seq, result);
    }

    fn cursor_pos(&self) -> Option<CursorPos> {
        let prefix = self.base.prefix(true);
        let value_width: usize = self
            .value
            .chars()
            .take(text_edit::clamp_cursor(self.cursor, &self.value))
            .map(|ch| unicode_width::UnicodeWidthChar::width(ch).unwrap_or(0))
            .sum();
        Some(CursorPos {
            col: (UnicodeWidthStr::width(prefix.as_str()) + value_width) as u16,
            row: 0,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::UniqueTextInput;
    use crate::task::probe::ProbeStatus;
    use crate::terminal::{KeyCode, KeyEvent};
    use crate::widgets::traits::Interactive;
    use std::sync::Arc;

    fn field() -> UniqueTextInput {
        UniqueTextInput::new(
            "account_setup.username",
            "Username",
            Arc::new(|value: &str| Ok(value != "admin")),
        )
    }

    #[test]
    fn older_result_is_ignored_after_newer_input() {
        let mut input = field();
        input.on_key(KeyEvent::plain(KeyCode::Char('a')));
        let stale = input.begin_check().expect("check for 'a'");

        input.on_key(KeyEvent::plain(KeyCode::Char('b')));
        let current = input.begin_check().expect("check for 'ab'");

        input.apply_check(stale, Ok(false));
        assert_eq!(input.status(), ProbeStatus::Checking);

        input.apply_check(current, Ok(true));
        assert_eq!(input.status(), ProbeStatus::Available);
    }

    #[test]
    fn clearing_the_field_drops_back_to_unknown() {
        let mut input = field();
        input.on_key(KeyEvent::plain(KeyCode::Char('a')));
        let seq = input.begin_check().expect("check");
        input.apply_check(seq, Ok(true));
        assert_eq!(input.status(), ProbeStatus::Available);

        input.on_key(KeyEvent::plain(KeyCode::Backspace));
        assert_eq!(input.status(), ProbeStatus::Unknown);
        assert!(input.begin_check().is_none());
    }
}
