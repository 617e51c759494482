use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorVisibility {
    Hidden,
    Inline,
}

#[derive(Debug, Clone)]
pub struct ValidationEntry {
    pub error: String,
    pub visibility: ErrorVisibility,
}

/// Per-field validation results keyed by dotted path. Errors start hidden
/// while the user is still typing and are revealed when a step advance or
/// submit fails.
#[derive(Debug, Default, Clone)]
pub struct ValidationState {
    entries: HashMap<String, ValidationEntry>,
}

impl ValidationState {
    pub fn set_error(
        &mut self,
        path: impl Into<String>,
        error: impl Into<String>,
        visibility: ErrorVisibility,
    ) {
        self.entries.insert(
            path.into(),
            ValidationEntry {
                error: error.into(),
                visibility,
            },
        );
    }

    pub fn clear_error(&mut self, path: &str) {
        self.entries.remove(path);
    }

    pub fn clear_all(&mut self) {
        self.entries.clear();
    }

    pub fn visible_error(&self, path: &str) -> Option<&str> {
        self.entries.get(path).and_then(|entry| {
            matches!(entry.visibility, ErrorVisibility::Inline).then_some(entry.error.as_str())
        })
    }

    pub fn is_invalid(&self, path: &str) -> bool {
        self.entries.contains_key(path)
    }

    pub fn is_valid(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn reveal(&mut self, path: &str) {
        if let Some(entry) = self.entries.get_mut(path) {
            entry.visibility = ErrorVisibility::Inline;
        }
    }

    pub fn visible_entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().filter_map(|(path, entry)| {
            matches!(entry.visibility, ErrorVisibility::Inline)
                .then_some((path.as_str(), entry.error.as_str()))
        })
    }
}
