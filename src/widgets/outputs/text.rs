use crate::ui::span::Span;
use crate::ui::style::{Color, Style};
use crate::widgets::traits::{DrawOutput, Drawable, OutputNode, RenderContext};

pub struct TextOutput {
    id: String,
    text: String,
    dim: bool,
}

impl TextOutput {
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            dim: false,
        }
    }

    pub fn dim(mut self) -> Self {
        self.dim = true;
        self
    }
}

impl Drawable for TextOutput {
    fn id(&self) -> &str {
        &self.id
    }

    fn draw(&self, _ctx: &RenderContext) -> DrawOutput {
        let style = if self.dim {
            Style::new().color(Color::DarkGrey)
        } else {
            Style::default()
        };
        DrawOutput {
            lines: vec![vec![Span::styled(self.text.clone(), style)]],
        }
    }
}

impl OutputNode for TextOutput {}
