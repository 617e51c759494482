pub mod layout;
pub mod renderer;
pub mod span;
pub mod spinner;
pub mod style;

pub use renderer::{RenderFrame, Renderer};
pub use span::{Span, SpanLine};
pub use spinner::Spinner;
pub use style::{Color, Style};
