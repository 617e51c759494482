pub mod password;
pub mod rules;

use crate::core::{Value, ValuePath};
use std::sync::Arc;

pub type Rule = Box<dyn Fn(&Value) -> Result<(), String> + Send + Sync>;
pub type RecordCheck = Box<dyn Fn(&Value) -> Result<(), String> + Send + Sync>;

/// Caller-supplied async predicate for uniqueness-checked fields. The
/// schema only calls it and interprets `Ok(true)` / `Ok(false)` / `Err`.
pub type Probe = Arc<dyn Fn(&str) -> Result<bool, String> + Send + Sync>;

pub struct FieldRule {
    pub path: ValuePath,
    pub rules: Vec<Rule>,
}

/// Cross-field constraint over the whole record, anchored to the path the
/// resulting error is reported under.
pub struct RecordRule {
    pub path: ValuePath,
    pub check: RecordCheck,
}

/// Whole-record async constraint: the text at `path` is handed to the
/// probe on a worker thread and the answer gates step advance/submit.
pub struct AsyncRule {
    pub path: ValuePath,
    pub probe: Probe,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldIssue {
    pub path: ValuePath,
    pub message: String,
}

/// Declarative validation, evaluated in phases: synchronous per-path
/// rules, then synchronous cross-field rules, then async rules which the
/// caller dispatches and aggregates.
#[derive(Default)]
pub struct Schema {
    fields: Vec<FieldRule>,
    records: Vec<RecordRule>,
    async_rules: Vec<AsyncRule>,
}

impl Schema {
    pub fn builder() -> SchemaBuilder {
        SchemaBuilder::default()
    }

    pub fn field_paths(&self) -> impl Iterator<Item = &ValuePath> {
        self.fields.iter().map(|field| &field.path)
    }

    pub fn check_field(&self, path: &ValuePath, value: &Value) -> Result<(), String> {
        let Some(field) = self.fields.iter().find(|field| &field.path == path) else {
            return Ok(());
        };
        for rule in &field.rules {
            rule(value)?;
        }
        Ok(())
    }

    /// Phases 1 and 2 over `record`, restricted to `paths` when given.
    pub fn evaluate(&self, record: &Value, paths: Option<&[ValuePath]>) -> Vec<FieldIssue> {
        let in_scope = |path: &ValuePath| paths.is_none_or(|subset| subset.contains(path));
        let mut issues = Vec::new();

        for field in self.fields.iter().filter(|field| in_scope(&field.path)) {
            let value = record.get_path(&field.path).cloned().unwrap_or_default();
            for rule in &field.rules {
                if let Err(message) = rule(&value) {
                    issues.push(FieldIssue {
                        path: field.path.clone(),
                        message,
                    });
                    break;
                }
            }
        }

        for rule in self.records.iter().filter(|rule| in_scope(&rule.path)) {
            // A field already failing phase 1 keeps its first error.
            if issues.iter().any(|issue| issue.path == rule.path) {
                continue;
            }
            if let Err(message) = (rule.check)(record) {
                issues.push(FieldIssue {
                    path: rule.path.clone(),
                    message,
                });
            }
        }

        issues
    }

    pub fn async_rules(&self) -> &[AsyncRule] {
        self.async_rules.as_slice()
    }

    pub fn async_rules_for(&self, paths: &[ValuePath]) -> Vec<&AsyncRule> {
        self.async_rules
            .iter()
            .filter(|rule| paths.contains(&rule.path))
            .collect()
    }
}

#[derive(Default)]
pub struct SchemaBuilder {
    fields: Vec<FieldRule>,
    records: Vec<RecordRule>,
    async_rules: Vec<AsyncRule>,
}

impl SchemaBuilder {
    pub fn field(mut self, path: impl Into<ValuePath>, rules: Vec<Rule>) -> Self {
        self.fields.push(FieldRule {
            path: path.into(),
            rules,
        });
        self
    }

    pub fn record_rule(mut self, path: impl Into<ValuePath>, check: RecordCheck) -> Self {
        self.records.push(RecordRule {
            path: path.into(),
            check,
        });
        self
    }

    /// Requires the text at `path` to equal the text at `other`; reported
    /// under `path`.
    pub fn equal(
        self,
        path: impl Into<ValuePath>,
        other: impl Into<ValuePath>,
        message: impl Into<String>,
    ) -> Self {
        let path = path.into();
        let other = other.into();
        let message = message.into();
        let anchor = path.clone();
        self.record_rule(
            anchor,
            Box::new(move |record: &Value| {
                let left = record.get_path(&path).and_then(Value::as_text);
                let right = record.get_path(&other).and_then(Value::as_text);
                if left == right {
                    Ok(())
                } else {
                    Err(message.clone())
                }
            }),
        )
    }

    pub fn unique(
        mut self,
        path: impl Into<ValuePath>,
        probe: Probe,
        message: impl Into<String>,
    ) -> Self {
        self.async_rules.push(AsyncRule {
            path: path.into(),
            probe,
            message: message.into(),
        });
        self
    }

    pub fn build(self) -> Schema {
        Schema {
            fields: self.fields,
            records: self.records,
            async_rules: self.async_rules,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Schema;
    use crate::core::{Value, ValuePath};
    use crate::schema::rules;

    fn sample_schema() -> Schema {
        Schema::builder()
            .field("user.name", vec![rules::required("Name is required")])
            .field(
                "user.password",
                vec![rules::min_chars(6, "Password too short")],
            )
            .field("user.confirm", vec![])
            .equal("user.confirm", "user.password", "Passwords do not match")
            .build()
    }

    fn record(name: &str, password: &str, confirm: &str) -> Value {
        let mut root = Value::object();
        root.set_path(&ValuePath::parse("user.name").expect("path"), name.into());
        root.set_path(
            &ValuePath::parse("user.password").expect("path"),
            password.into(),
        );
        root.set_path(
            &ValuePath::parse("user.confirm").expect("path"),
            confirm.into(),
        );
        root
    }

    #[test]
    fn evaluate_reports_field_and_record_issues() {
        let schema = sample_schema();
        let issues = schema.evaluate(&record("", "Secret1!", "different"), None);
        let messages: Vec<&str> = issues.iter().map(|i| i.message.as_str()).collect();
        assert_eq!(messages, vec!["Name is required", "Passwords do not match"]);
    }

    #[test]
    fn evaluate_subset_ignores_other_paths() {
        let schema = sample_schema();
        let subset = vec![ValuePath::parse("user.name").expect("path")];
        let issues = schema.evaluate(&record("", "x", "y"), Some(&subset));
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].path.to_string(), "user.name");
    }

    #[test]
    fn evaluate_passes_on_valid_record() {
        let schema = sample_schema();
        let issues = schema.evaluate(&record("Freyja", "Secret1!", "Secret1!"), None);
        assert!(issues.is_empty());
    }

    #[test]
    fn async_rules_filtered_by_path() {
        use std::sync::Arc;
        let schema = Schema::builder()
            .unique(
                "user.email",
                Arc::new(|_: &str| Ok(true)),
                "Email is already taken",
            )
            .build();

        let email = vec![ValuePath::parse("user.email").expect("path")];
        let other = vec![ValuePath::parse("user.name").expect("path")];
        assert_eq!(schema.async_rules_for(&email).len(), 1);
        assert!(schema.async_rules_for(&other).is_empty());
    }
}
