use crate::core::Value;
use crate::runtime::event::WidgetAction;
use crate::terminal::{KeyCode, KeyEvent};
use crate::ui::span::Span;
use crate::ui::style::{Color, Style};
use crate::ui::spinner::Spinner;
use crate::widgets::base::InputBase;
use crate::widgets::traits::{DrawOutput, Drawable, InteractionResult, Interactive, RenderContext};

/// Simulated image upload: Enter starts a worker job that resolves to a
/// placeholder URL after a delay; Delete clears the stored URL.
pub struct ImageUploadInput {
    base: InputBase,
    url: Option<String>,
    uploading: bool,
    seq: u64,
    spinner: Spinner,
}

impl ImageUploadInput {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            base: InputBase::new(id, label),
            url: None,
            uploading: false,
            seq: 0,
            spinner: Spinner::new(),
        }
    }

    pub fn is_uploading(&self) -> bool {
        self.uploading
    }
}

impl Drawable for ImageUploadInput {
    fn id(&self) -> &str {
        self.base.id()
    }

    fn label(&self) -> &str {
        self.base.label()
    }

    fn draw(&self, ctx: &RenderContext) -> DrawOutput {
        let focused = self.base.is_focused(ctx);
        let mut line = vec![self.base.prefix_span(focused)];

        if self.uploading {
            line.push(self.spinner.span());
            line.push(Span::styled(" uploading…", Style::new().color(Color::DarkGrey)).no_wrap());
        } else if let Some(url) = &self.url {
            line.push(Span::styled(url.clone(), Style::new().color(Color::Green)).no_wrap());
            line.push(
                Span::styled("  (Del removes)", Style::new().color(Color::DarkGrey)).no_wrap(),
            );
        } else {
            line.push(InputBase::placeholder_span("no image — Enter uploads"));
        }

        DrawOutput { lines: vec![line] }
    }
}

impl Interactive for ImageUploadInput {
    fn on_key(&mut self, key: KeyEvent) -> InteractionResult {
        match key.code {
            KeyCode::Enter | KeyCode::Char(' ') if !self.uploading && self.url.is_none() => {
                InteractionResult::with_action(WidgetAction::UploadRequested {
                    id: self.base.id().to_string(),
                })
            }
            KeyCode::Enter => InteractionResult::input_done(),
            KeyCode::Delete | KeyCode::Backspace if self.url.is_some() && !self.uploading => {
                self.url = None;
                InteractionResult::with_action(WidgetAction::ValueChanged {
                    id: self.base.id().to_string(),
                    value: Value::None,
                })
            }
            _ => InteractionResult::ignored(),
        }
    }

    fn on_tick(&mut self) -> bool {
        if self.uploading {
            self.spinner.tick();
            return true;
        }
        false
    }

    fn value(&self) -> Option<Value> {
        Some(match &self.url {
            Some(url) => Value::Text(url.clone()),
            None => Value::None,
        })
    }

    fn set_value(&mut self, value: Value) {
        self.url = value.to_text_scalar().filter(|text| !text.is_empty());
    }

    fn begin_upload(&mut self) -> Option<u64> {
        if self.uploading {
            return None;
        }
        self.uploading = true;
        self.seq = self.seq.wrapping_add(1);
        Some(self.seq)
    }

    fn apply_upload(&mut self, seq: u64, url: String) -> Option<Value> {
        if !self.uploading || seq != self.seq {
            return None;
        }
        self.uploading = false;
        self.url = Some(url.clone());
        Some(Value::Text(url))
    }
}

#[cfg(test)]
mod tests {
    use super::ImageUploadInput;
    use crate::core::Value;
    use crate::runtime::event::WidgetAction;
    use crate::terminal::{KeyCode, KeyEvent};
    use crate::widgets::traits::Interactive;

    #[test]
    fn enter_requests_an_upload_once() {
        let mut input = ImageUploadInput::new("personal_information.avatar", "Avatar");
        let result = input.on_key(KeyEvent::plain(KeyCode::Enter));
        assert!(matches!(
            result.actions.first(),
            Some(WidgetAction::UploadRequested { .. })
        ));

        let seq = input.begin_upload().expect("upload starts");
        // A second activation while in flight is refused.
        assert!(input.begin_upload().is_none());

        let value = input
            .apply_upload(seq, "https://picsum.photos/400/400?random=1".to_string())
            .expect("upload applies");
        assert!(matches!(value, Value::Text(_)));
        assert!(!input.is_uploading());
    }
}
