use crate::ui::span::Span;
use crate::ui::style::{Color, Style};
use crate::widgets::traits::RenderContext;

#[derive(Debug, Clone)]
pub struct InputBase {
    id: String,
    label: String,
}

impl InputBase {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn is_focused(&self, ctx: &RenderContext) -> bool {
        ctx.is_focused(&self.id)
    }

    pub fn focus_marker(&self, focused: bool) -> &'static str {
        if focused { ">" } else { " " }
    }

    pub fn prefix(&self, focused: bool) -> String {
        format!("{} {}: ", self.focus_marker(focused), self.label)
    }

    pub fn prefix_span(&self, focused: bool) -> Span {
        let style = if focused {
            Style::new().bold()
        } else {
            Style::default()
        };
        Span::styled(self.prefix(focused), style).no_wrap()
    }

    pub fn placeholder_span(text: impl Into<String>) -> Span {
        Span::styled(text, Style::new().color(Color::DarkGrey)).no_wrap()
    }
}
