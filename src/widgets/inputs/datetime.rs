use crate::core::Value;
use crate::runtime::event::WidgetAction;
use crate::terminal::{KeyCode, KeyEvent};
use crate::ui::span::Span;
use crate::ui::style::{Color, Style};
use crate::widgets::base::InputBase;
use crate::widgets::traits::{DrawOutput, Drawable, InteractionResult, Interactive, RenderContext};

#[derive(Debug, Clone, Copy)]
struct Segment {
    value: u16,
    min: u16,
    max: u16,
    width: usize,
}

impl Segment {
    fn new(value: u16, min: u16, max: u16, width: usize) -> Self {
        Self {
            value,
            min,
            max,
            width,
        }
    }

    fn step(&mut self, delta: i32) {
        let span = (self.max - self.min + 1) as i32;
        let offset = (self.value - self.min) as i32;
        let next = (offset + delta).rem_euclid(span);
        self.value = self.min + next as u16;
    }

    /// While digits are being typed the value may sit below `min`
    /// (e.g. "0" on the way to "07"); `settle` clamps it when the segment
    /// is left.
    fn push_digit(&mut self, digit: u16, typed: u8) {
        let next = if typed == 0 {
            digit
        } else {
            self.value * 10 + digit
        };
        self.value = next.min(self.max);
    }

    fn settle(&mut self) {
        self.value = self.value.clamp(self.min, self.max);
    }
}

const YEAR: usize = 0;
const MONTH: usize = 1;
const DAY: usize = 2;
const HOUR: usize = 3;
const MINUTE: usize = 4;

/// Segmented `YYYY-MM-DD HH:MM` editor: ←/→ switch segments, ↑/↓ step,
/// digits overwrite.
pub struct DateTimeInput {
    base: InputBase,
    segments: [Segment; 5],
    active: usize,
    typed: u8,
}

impl DateTimeInput {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            base: InputBase::new(id, label),
            segments: [
                Segment::new(2026, 1970, 2100, 4),
                Segment::new(1, 1, 12, 2),
                Segment::new(1, 1, 31, 2),
                Segment::new(9, 0, 23, 2),
                Segment::new(0, 0, 59, 2),
            ],
            active: 0,
            typed: 0,
        }
    }

    pub fn with_default(mut self, value: impl Into<Value>) -> Self {
        self.set_value(value.into());
        self
    }

    fn formatted(&self) -> String {
        format!(
            "{:04}-{:02}-{:02} {:02}:{:02}",
            self.segments[YEAR].value,
            self.segments[MONTH].value,
            self.segments[DAY].value,
            self.segments[HOUR].value,
            self.segments[MINUTE].value,
        )
    }

    fn edited(&self) -> InteractionResult {
        InteractionResult::with_action(WidgetAction::ValueChanged {
            id: self.base.id().to_string(),
            value: Value::Text(self.formatted()),
        })
    }

    fn segment_spans(&self, focused: bool) -> Vec<Span> {
        let separators = ["-", "-", " ", ":"];
        let mut spans = Vec::new();
        for (idx, segment) in self.segments.iter().enumerate() {
            let text = format!("{:0width$}", segment.value, width = segment.width);
            let style = if focused && idx == self.active {
                Style::new().color(Color::Cyan).bold()
            } else {
                Style::default()
            };
            spans.push(Span::styled(text, style).no_wrap());
            if idx < separators.len() {
                spans.push(Span::new(separators[idx]).no_wrap());
            }
        }
        spans
    }
}

impl Drawable for DateTimeInput {
    fn id(&self) -> &str {
        self.base.id()
    }

    fn label(&self) -> &str {
        self.base.label()
    }

    fn draw(&self, ctx: &RenderContext) -> DrawOutput {
        let focused = self.base.is_focused(ctx);
        let mut line = vec![self.base.prefix_span(focused)];
        line.extend(self.segment_spans(focused));
        DrawOutput { lines: vec![line] }
    }
}

impl Interactive for DateTimeInput {
    fn on_key(&mut self, key: KeyEvent) -> InteractionResult {
        match key.code {
            KeyCode::Left => {
                self.segments[self.active].settle();
                self.active = (self.active + self.segments.len() - 1) % self.segments.len();
                self.typed = 0;
                self.edited()
            }
            KeyCode::Right => {
                self.segments[self.active].settle();
                self.active = (self.active + 1) % self.segments.len();
                self.typed = 0;
                self.edited()
            }
            KeyCode::Up => {
                self.segments[self.active].settle();
                self.segments[self.active].step(1);
                self.typed = 0;
                self.edited()
            }
            KeyCode::Down => {
                self.segments[self.active].settle();
                self.segments[self.active].step(-1);
                self.typed = 0;
                self.edited()
            }
            KeyCode::Char(ch) if ch.is_ascii_digit() => {
                let digit = ch as u16 - '0' as u16;
                let width = self.segments[self.active].width as u8;
                self.segments[self.active].push_digit(digit, self.typed);
                self.typed += 1;
                if self.typed >= width {
                    self.segments[self.active].settle();
                    self.active = (self.active + 1) % self.segments.len();
                    self.typed = 0;
                }
                self.edited()
            }
            KeyCode::Enter => {
                self.segments[self.active].settle();
                let mut result = self.edited();
                result.actions.push(WidgetAction::InputDone);
                result
            }
            _ => InteractionResult::ignored(),
        }
    }

    fn value(&self) -> Option<Value> {
        Some(Value::Text(self.formatted()))
    }

    fn set_value(&mut self, value: Value) {
        let Some(text) = value.to_text_scalar() else {
            return;
        };
        let numbers: Vec<u16> = text
            .split(['-', ' ', ':'])
            .filter_map(|part| part.trim().parse::<u16>().ok())
            .collect();
        if numbers.len() != self.segments.len() {
            return;
        }
        for (segment, number) in self.segments.iter_mut().zip(numbers) {
            segment.value = number.clamp(segment.min, segment.max);
        }
    }
}
