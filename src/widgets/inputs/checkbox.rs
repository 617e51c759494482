use crate::core::Value;
use crate::runtime::event::WidgetAction;
use crate::terminal::{KeyCode, KeyEvent};
use crate::ui::span::Span;
use crate::ui::style::{Color, Style};
use crate::widgets::base::InputBase;
use crate::widgets::traits::{DrawOutput, Drawable, InteractionResult, Interactive, RenderContext};

pub struct CheckboxInput {
    base: InputBase,
    checked: bool,
}

impl CheckboxInput {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            base: InputBase::new(id, label),
            checked: false,
        }
    }

    pub fn with_checked(mut self, checked: bool) -> Self {
        self.checked = checked;
        self
    }

    fn toggled(&self) -> InteractionResult {
        InteractionResult::with_action(WidgetAction::ValueChanged {
            id: self.base.id().to_string(),
            value: Value::Bool(self.checked),
        })
    }
}

impl Drawable for CheckboxInput {
    fn id(&self) -> &str {
        self.base.id()
    }

    fn label(&self) -> &str {
        self.base.label()
    }

    fn draw(&self, ctx: &RenderContext) -> DrawOutput {
        let focused = self.base.is_focused(ctx);
        let (symbol, style) = if self.checked {
            ("[✓]", Style::new().color(Color::Green))
        } else {
            ("[ ]", Style::default())
        };
        DrawOutput {
            lines: vec![vec![
                self.base.prefix_span(focused),
                Span::styled(symbol, style).no_wrap(),
            ]],
        }
    }
}

impl Interactive for CheckboxInput {
    fn on_key(&mut self, key: KeyEvent) -> InteractionResult {
        match key.code {
            KeyCode::Char(' ') => {
                self.checked = !self.checked;
                self.toggled()
            }
            KeyCode::Enter => InteractionResult::input_done(),
            _ => InteractionResult::ignored(),
        }
    }

    fn value(&self) -> Option<Value> {
        Some(Value::Bool(self.checked))
    }

    fn set_value(&mut self, value: Value) {
        if let Some(flag) = value.as_bool() {
            self.checked = flag;
        }
    }
}
