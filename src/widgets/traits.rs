use crate::core::Value;
use crate::runtime::event::WidgetAction;
use crate::schema::Probe;
use crate::terminal::{CursorPos, KeyEvent};
use crate::ui::span::SpanLine;
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusMode {
    /// Node does not participate in focus cycling.
    None,
    /// A single focusable leaf (text input, checkbox, …).
    Leaf,
}

#[derive(Debug, Clone, Default)]
pub struct RenderContext {
    pub focused_id: Option<String>,
    pub width: u16,
    /// Per-field errors to show inline, keyed by widget id.
    pub errors: HashMap<String, String>,
}

impl RenderContext {
    pub fn is_focused(&self, id: &str) -> bool {
        self.focused_id.as_deref() == Some(id)
    }

    pub fn error(&self, id: &str) -> Option<&str> {
        self.errors.get(id).map(String::as_str)
    }
}

#[derive(Debug, Clone, Default)]
pub struct DrawOutput {
    pub lines: Vec<SpanLine>,
}

#[derive(Debug, Clone, Default)]
pub struct InteractionResult {
    pub handled: bool,
    pub request_render: bool,
    pub actions: Vec<WidgetAction>,
}

impl InteractionResult {
    pub fn ignored() -> Self {
        Self::default()
    }

    pub fn handled() -> Self {
        Self {
            handled: true,
            request_render: true,
            actions: Vec::new(),
        }
    }

    pub fn with_action(action: WidgetAction) -> Self {
        Self {
            handled: true,
            request_render: true,
            actions: vec![action],
        }
    }

    pub fn with_actions(actions: Vec<WidgetAction>) -> Self {
        Self {
            handled: true,
            request_render: true,
            actions,
        }
    }

    pub fn input_done() -> Self {
        Self::with_action(WidgetAction::InputDone)
    }
}

pub trait Drawable: Send {
    fn id(&self) -> &str;
    fn label(&self) -> &str {
        ""
    }
    fn draw(&self, ctx: &RenderContext) -> DrawOutput;
}

pub trait Interactive: Drawable {
    fn focus_mode(&self) -> FocusMode {
        FocusMode::Leaf
    }

    fn on_key(&mut self, key: KeyEvent) -> InteractionResult;

    /// Animation heartbeat; returns true when a redraw is needed.
    fn on_tick(&mut self) -> bool {
        false
    }

    fn value(&self) -> Option<Value> {
        None
    }

    fn set_value(&mut self, _value: Value) {}

    fn cursor_pos(&self) -> Option<CursorPos> {
        None
    }

    // --- async collaborator hooks (uniqueness fields, uploads) ---

    fn probe(&self) -> Option<Probe> {
        None
    }

    fn current_text(&self) -> Option<String> {
        None
    }

    fn begin_check(&mut self) -> Option<u64> {
        None
    }

    fn apply_check(&mut self, _seq: u64, _result: Result<bool, String>) {}

    fn begin_upload(&mut self) -> Option<u64> {
        None
    }

    /// Applies an upload result; returns the value to write through the
    /// container when accepted.
    fn apply_upload(&mut self, _seq: u64, _url: String) -> Option<Value> {
        None
    }
}

pub trait OutputNode: Drawable {
    /// Refreshes derived content from the record (preview widgets).
    fn sync(&mut self, _record: &Value) {}
}
