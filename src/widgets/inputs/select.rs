use crate::core::Value;
use crate::runtime::event::WidgetAction;
use crate::terminal::{KeyCode, KeyEvent};
use crate::ui::span::Span;
use crate::widgets::base::InputBase;
use crate::widgets::traits::{DrawOutput, Drawable, InteractionResult, Interactive, RenderContext};

pub struct SelectInput {
    base: InputBase,
    options: Vec<String>,
    selected: usize,
}

impl SelectInput {
    pub fn new(
        id: impl Into<String>,
        label: impl Into<String>,
        options: Vec<impl Into<String>>,
    ) -> Self {
        Self {
            base: InputBase::new(id, label),
            options: options.into_iter().map(Into::into).collect(),
            selected: 0,
        }
    }

    pub fn with_selected(mut self, selected: usize) -> Self {
        self.selected = selected;
        self.clamp_selected();
        self
    }

    fn clamp_selected(&mut self) {
        if self.options.is_empty() {
            self.selected = 0;
        } else if self.selected >= self.options.len() {
            self.selected = self.options.len() - 1;
        }
    }

    fn selected_text(&self) -> &str {
        self.options
            .get(self.selected)
            .map(String::as_str)
            .unwrap_or("")
    }

    fn cycle(&mut self, delta: isize) -> InteractionResult {
        if self.options.is_empty() {
            return InteractionResult::ignored();
        }
        let len = self.options.len() as isize;
        self.selected = ((self.selected as isize + delta + len) % len) as usize;
        InteractionResult::with_action(WidgetAction::ValueChanged {
            id: self.base.id().to_string(),
            value: Value::Text(self.selected_text().to_string()),
        })
    }
}

impl Drawable for SelectInput {
    fn id(&self) -> &str {
        self.base.id()
    }

    fn label(&self) -> &str {
        self.base.label()
    }

    fn draw(&self, ctx: &RenderContext) -> DrawOutput {
        let focused = self.base.is_focused(ctx);
        DrawOutput {
            lines: vec![vec![
                self.base.prefix_span(focused),
                Span::new(format!("‹ {} ›", self.selected_text())).no_wrap(),
            ]],
        }
    }
}

impl Interactive for SelectInput {
    fn on_key(&mut self, key: KeyEvent) -> InteractionResult {
        match key.code {
            KeyCode::Left => self.cycle(-1),
            KeyCode::Right => self.cycle(1),
            KeyCode::Enter => InteractionResult::input_done(),
            _ => InteractionResult::ignored(),
        }
    }

    fn value(&self) -> Option<Value> {
        Some(Value::Text(self.selected_text().to_string()))
    }

    fn set_value(&mut self, value: Value) {
        if let Some(text) = value.to_text_scalar()
            && let Some(position) = self.options.iter().position(|option| option == &text)
        {
            self.selected = position;
        }
    }
}
