use crate::core::{Value, ValuePath};
use crate::ui::span::Span;
use crate::ui::style::{Color, Style};
use crate::widgets::traits::{DrawOutput, Drawable, OutputNode, RenderContext};

struct SummaryItem {
    label: String,
    path: ValuePath,
    display: String,
}

struct SummarySection {
    title: String,
    items: Vec<SummaryItem>,
}

/// Read-only preview of the collected record, grouped by section and
/// refreshed from the store whenever the step is shown.
pub struct SummaryOutput {
    id: String,
    sections: Vec<SummarySection>,
}

impl SummaryOutput {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            sections: Vec::new(),
        }
    }

    pub fn section(
        mut self,
        title: impl Into<String>,
        items: Vec<(impl Into<String>, impl Into<ValuePath>)>,
    ) -> Self {
        self.sections.push(SummarySection {
            title: title.into(),
            items: items
                .into_iter()
                .map(|(label, path)| SummaryItem {
                    label: label.into(),
                    path: path.into(),
                    display: String::new(),
                })
                .collect(),
        });
        self
    }
}

impl Drawable for SummaryOutput {
    fn id(&self) -> &str {
        &self.id
    }

    fn draw(&self, _ctx: &RenderContext) -> DrawOutput {
        let mut lines = Vec::new();
        for (idx, section) in self.sections.iter().enumerate() {
            if idx > 0 {
                lines.push(Vec::new());
            }
            lines.push(vec![Span::styled(
                section.title.clone(),
                Style::new().color(Color::Cyan).bold(),
            )]);
            for item in &section.items {
                lines.push(vec![
                    Span::styled(
                        format!("    {}: ", item.label),
                        Style::new().color(Color::DarkGrey),
                    )
                    .no_wrap(),
                    Span::new(item.display.clone()),
                ]);
            }
        }
        DrawOutput { lines }
    }
}

impl OutputNode for SummaryOutput {
    fn sync(&mut self, record: &Value) {
        for section in &mut self.sections {
            for item in &mut section.items {
                item.display = display_value(record.get_path(&item.path));
            }
        }
    }
}

fn display_value(value: Option<&Value>) -> String {
    match value {
        Some(Value::Text(text)) if !text.trim().is_empty() => text.clone(),
        Some(Value::Bool(true)) => "yes".to_string(),
        Some(Value::Bool(false)) => "no".to_string(),
        Some(Value::Number(number)) => number.to_string(),
        _ => "—".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::SummaryOutput;
    use crate::core::{Value, ValuePath};
    use crate::widgets::traits::{Drawable, OutputNode, RenderContext};

    #[test]
    fn sync_resolves_paths_to_display_text() {
        let mut record = Value::object();
        record.set_path(
            &ValuePath::parse("personal_information.full_name").expect("path"),
            "Aditya Chakraborty".into(),
        );
        record.set_path(
            &ValuePath::parse("confirmation.confirm").expect("path"),
            Value::Bool(false),
        );

        let mut summary = SummaryOutput::new("summary").section(
            "Personal",
            vec![
                ("Full name", "personal_information.full_name"),
                ("Confirmed", "confirmation.confirm"),
            ],
        );
        summary.sync(&record);

        let out = summary.draw(&RenderContext::default());
        let flat: String = out
            .lines
            .iter()
            .flat_map(|line| line.iter().map(|span| span.text.as_str()))
            .collect();
        assert!(flat.contains("Aditya Chakraborty"));
        assert!(flat.contains("no"));
    }
}
