pub mod store;
pub mod validation;

use crate::core::{Value, ValuePath};
use crate::form::store::ValueStore;
use crate::form::validation::{ErrorVisibility, ValidationState};
use crate::schema::{Probe, Schema};

pub type SubmitHandler = Box<dyn FnMut(&Value) + Send>;

/// Async uniqueness check still owed after a successful synchronous
/// trigger; the caller dispatches it to the executor.
pub struct PendingCheck {
    pub path: ValuePath,
    pub probe: Probe,
    pub message: String,
    pub value: String,
}

pub struct TriggerResult {
    pub ok: bool,
    pub checks: Vec<PendingCheck>,
}

/// Owns the schema, the record under construction, and the submit
/// handler. Widgets and the wizard reach the record exclusively through
/// this container.
pub struct FormContainer {
    schema: Schema,
    initial: Value,
    store: ValueStore,
    validation: ValidationState,
    on_submit: SubmitHandler,
}

impl FormContainer {
    pub fn new(schema: Schema, initial_values: Value, on_submit: SubmitHandler) -> Self {
        Self {
            schema,
            store: ValueStore::new(initial_values.clone()),
            initial: initial_values,
            validation: ValidationState::default(),
            on_submit,
        }
    }

    pub fn values(&self) -> &Value {
        self.store.root()
    }

    pub fn value(&self, path: &ValuePath) -> Option<&Value> {
        self.store.get(path)
    }

    pub fn text(&self, path: &ValuePath) -> Option<&str> {
        self.store.text(path)
    }

    pub fn validation(&self) -> &ValidationState {
        &self.validation
    }

    pub fn schema_paths(&self) -> Vec<ValuePath> {
        self.schema.field_paths().cloned().collect()
    }

    /// Writes one path and re-checks its synchronous rules. A failure is
    /// recorded hidden so the user is not shouted at mid-keystroke; step
    /// advance reveals it.
    pub fn set_value(&mut self, path: &ValuePath, value: Value) {
        self.store.set(path, value);
        let key = path.to_string();
        let current = self.store.get(path).cloned().unwrap_or_default();
        match self.schema.check_field(path, &current) {
            Ok(()) => self.validation.clear_error(&key),
            Err(error) => self
                .validation
                .set_error(key, error, ErrorVisibility::Hidden),
        }
    }

    /// Restores initial values, then overlays `patch` when given.
    pub fn reset(&mut self, patch: Option<&Value>) {
        self.store.replace(self.initial.clone());
        if let Some(patch) = patch {
            self.store.merge(patch);
        }
        self.validation.clear_all();
    }

    /// Validates only `paths` (synchronous phases); on success returns the
    /// async checks owed for those paths.
    pub fn trigger(&mut self, paths: &[ValuePath]) -> TriggerResult {
        let issues = self.schema.evaluate(self.store.root(), Some(paths));

        for path in paths {
            let key = path.to_string();
            match issues.iter().find(|issue| &issue.path == path) {
                Some(issue) => {
                    self.validation
                        .set_error(key, issue.message.clone(), ErrorVisibility::Inline)
                }
                None => self.validation.clear_error(&key),
            }
        }

        if !issues.is_empty() {
            return TriggerResult {
                ok: false,
                checks: Vec::new(),
            };
        }

        let checks = self
            .schema
            .async_rules_for(paths)
            .into_iter()
            .map(|rule| PendingCheck {
                path: rule.path.clone(),
                probe: rule.probe.clone(),
                message: rule.message.clone(),
                value: self.store.text(&rule.path).unwrap_or("").to_string(),
            })
            .collect();

        TriggerResult { ok: true, checks }
    }

    /// Full-schema validation; the handler only sees a record that
    /// passed.
    pub fn submit(&mut self) -> bool {
        let issues = self.schema.evaluate(self.store.root(), None);

        for path in self.schema.field_paths().cloned().collect::<Vec<_>>() {
            let key = path.to_string();
            match issues.iter().find(|issue| issue.path == path) {
                Some(issue) => {
                    self.validation
                        .set_error(key, issue.message.clone(), ErrorVisibility::Inline)
                }
                None => self.validation.clear_error(&key),
            }
        }

        if !issues.is_empty() {
            tracing::debug!(issues = issues.len(), "submit blocked by validation");
            return false;
        }

        (self.on_submit)(self.store.root());
        true
    }
}

#[cfg(test)]
mod tests {
    use super::FormContainer;
    use crate::core::{Value, ValuePath};
    use crate::schema::{Schema, rules};
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn path(selector: &str) -> ValuePath {
        ValuePath::parse(selector).expect("path")
    }

    fn container(calls: Arc<AtomicUsize>) -> FormContainer {
        let schema = Schema::builder()
            .field("user.name", vec![rules::required("Name is required")])
            .field("user.city", vec![rules::required("City is required")])
            .build();
        let mut initial = Value::object();
        initial.set_path(&path("user.name"), Value::Text(String::new()));
        initial.set_path(&path("user.city"), Value::Text(String::new()));
        FormContainer::new(
            schema,
            initial,
            Box::new(move |_| {
                calls.fetch_add(1, Ordering::SeqCst);
            }),
        )
    }

    #[test]
    fn setter_round_trips_before_validation() {
        let mut form = container(Arc::new(AtomicUsize::new(0)));
        form.set_value(&path("user.name"), Value::Text("Freyja".to_string()));
        assert_eq!(form.text(&path("user.name")), Some("Freyja"));
    }

    #[test]
    fn trigger_annotates_only_requested_paths() {
        let mut form = container(Arc::new(AtomicUsize::new(0)));
        let result = form.trigger(&[path("user.name")]);

        assert!(!result.ok);
        assert!(form.validation().visible_error("user.name").is_some());
        // Untriggered path stays unannotated even though it is invalid.
        assert!(form.validation().visible_error("user.city").is_none());
    }

    #[test]
    fn submit_skips_handler_until_record_is_valid() {
        let calls = Arc::new(AtomicUsize::new(0));
        let mut form = container(calls.clone());

        assert!(!form.submit());
        assert_eq!(calls.load(Ordering::SeqCst), 0);

        form.set_value(&path("user.name"), Value::Text("Freyja".to_string()));
        form.set_value(&path("user.city"), Value::Text("Oslo".to_string()));
        assert!(form.submit());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn reset_restores_initial_then_overlays_patch() {
        let mut form = container(Arc::new(AtomicUsize::new(0)));
        form.set_value(&path("user.name"), Value::Text("Freyja".to_string()));

        let mut patch = Value::object();
        patch.set_path(&path("user.city"), Value::Text("Oslo".to_string()));
        form.reset(Some(&patch));

        assert_eq!(form.text(&path("user.name")), Some(""));
        assert_eq!(form.text(&path("user.city")), Some("Oslo"));
    }
}
