use crate::app::OnboardingApp;
use crate::terminal::{CursorPos, TerminalSize};
use crate::ui::layout::Layout;
use crate::ui::span::{Span, SpanLine};
use crate::ui::style::{Color, Style};
use crate::widgets::traits::RenderContext;
use crate::wizard::StepStatus;

#[derive(Debug, Default, Clone)]
pub struct RenderFrame {
    pub lines: Vec<SpanLine>,
    pub cursor: Option<CursorPos>,
}

pub struct Renderer;

impl Renderer {
    pub fn render(app: &OnboardingApp, size: TerminalSize) -> RenderFrame {
        let mut frame = RenderFrame::default();
        let step = app.active_step();

        let mut ctx = RenderContext {
            focused_id: app.focused_id().map(ToOwned::to_owned),
            width: size.width,
            errors: Default::default(),
        };
        for path in &step.paths {
            let key = path.to_string();
            if let Some(error) = app.form().validation().visible_error(&key) {
                ctx.errors.insert(key, error.to_string());
            }
        }

        frame.lines.push(vec![Span::styled(
            format!(
                "{} — step {} of {}",
                step.title,
                app.wizard().current_step(),
                app.wizard().total_steps()
            ),
            Style::new().color(Color::Cyan).bold(),
        )]);
        frame.lines.push(indicator_line(app));
        frame.lines.push(Vec::new());

        if let Some(message) = app.wizard().current_error_message() {
            frame.lines.push(vec![Span::styled(
                format!("! {message}"),
                Style::new().color(Color::Red).bold(),
            )]);
            frame.lines.push(Vec::new());
        }

        if let Some(description) = &step.description {
            frame.lines.push(vec![Span::styled(
                description.clone(),
                Style::new().color(Color::DarkGrey),
            )]);
            frame.lines.push(Vec::new());
        }

        for node in &step.nodes {
            let out = node.draw(&ctx);

            if frame.cursor.is_none()
                && ctx
                    .focused_id
                    .as_deref()
                    .is_some_and(|focused| focused == node.id())
                && let Some(local) = node.as_input().and_then(|input| input.cursor_pos())
            {
                frame.cursor = Some(CursorPos {
                    col: local.col,
                    row: (frame.lines.len() as u16).saturating_add(local.row),
                });
            }

            frame.lines.extend(out.lines);

            if let Some(error) = ctx.error(node.id()) {
                frame.lines.push(vec![Span::styled(
                    format!("    ! {error}"),
                    Style::new().color(Color::Red),
                )]);
            }
        }

        frame.lines.push(Vec::new());
        frame.lines.push(footer_line(app));

        frame.lines = Layout::compose(&frame.lines, size.width);
        frame
    }
}

fn indicator_line(app: &OnboardingApp) -> SpanLine {
    let mut line = vec![Span::new("  ").no_wrap()];
    let statuses = app.wizard().statuses();
    let last = statuses.len().saturating_sub(1);

    for (idx, status) in statuses.iter().enumerate() {
        let (glyph, style) = match status {
            StepStatus::Completed => ("✓", Style::new().color(Color::Green)),
            StepStatus::Error => ("✗", Style::new().color(Color::Red)),
            StepStatus::Current => ("●", Style::new().color(Color::Cyan).bold()),
            StepStatus::Pending => ("○", Style::new().color(Color::DarkGrey)),
        };
        line.push(Span::styled(glyph, style).no_wrap());
        if idx < last {
            let connector_style = if matches!(status, StepStatus::Completed) {
                Style::new().color(Color::Green)
            } else {
                Style::new().color(Color::DarkGrey)
            };
            line.push(Span::styled("──", connector_style).no_wrap());
        }
    }
    line
}

fn footer_line(app: &OnboardingApp) -> SpanLine {
    if app.is_validating() {
        return vec![Span::styled(
            "Checking…",
            Style::new().color(Color::Yellow),
        )];
    }

    let mut keys: Vec<String> = Vec::new();
    keys.push("Tab next field".to_string());
    if app.wizard().is_last_step() {
        keys.push("Enter Complete".to_string());
    } else {
        keys.push("Enter Next".to_string());
    }
    if !app.wizard().is_first_step() {
        keys.push("Esc Back".to_string());
    }
    keys.push("Ctrl+C quit".to_string());

    let mut text = keys.join("  •  ");
    if let Some(hint) = &app.active_step().hint {
        text = format!("{hint}  •  {text}");
    }
    vec![Span::styled(text, Style::new().color(Color::DarkGrey))]
}
