use crate::core::Value;
use crate::runtime::event::WidgetAction;
use crate::terminal::{KeyCode, KeyEvent};
use crate::ui::span::Span;
use crate::ui::style::{Color, Style};
use crate::widgets::base::InputBase;
use crate::widgets::traits::{DrawOutput, Drawable, InteractionResult, Interactive, RenderContext};

pub struct SwitchInput {
    base: InputBase,
    on: bool,
}

impl SwitchInput {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            base: InputBase::new(id, label),
            on: false,
        }
    }

    pub fn with_on(mut self, on: bool) -> Self {
        self.on = on;
        self
    }

    fn toggled(&self) -> InteractionResult {
        InteractionResult::with_action(WidgetAction::ValueChanged {
            id: self.base.id().to_string(),
            value: Value::Bool(self.on),
        })
    }
}

impl Drawable for SwitchInput {
    fn id(&self) -> &str {
        self.base.id()
    }

    fn label(&self) -> &str {
        self.base.label()
    }

    fn draw(&self, ctx: &RenderContext) -> DrawOutput {
        let focused = self.base.is_focused(ctx);
        let (symbol, style) = if self.on {
            ("(●) on ", Style::new().color(Color::Green))
        } else {
            ("(○) off", Style::new().color(Color::DarkGrey))
        };
        DrawOutput {
            lines: vec![vec![
                self.base.prefix_span(focused),
                Span::styled(symbol, style).no_wrap(),
            ]],
        }
    }
}

impl Interactive for SwitchInput {
    fn on_key(&mut self, key: KeyEvent) -> InteractionResult {
        match key.code {
            KeyCode::Char(' ') | KeyCode::Left | KeyCode::Right => {
                self.on = !self.on;
                self.toggled()
            }
            KeyCode::Enter => InteractionResult::input_done(),
            _ => InteractionResult::ignored(),
        }
    }

    fn value(&self) -> Option<Value> {
        Some(Value::Bool(self.on))
    }

    fn set_value(&mut self, value: Value) {
        if let Some(flag) = value.as_bool() {
            self.on = flag;
        }
    }
}
