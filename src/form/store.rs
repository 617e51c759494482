use crate::core::{Value, ValuePath};

/// Single owner of the collected record; every mutation goes through
/// `set`.
#[derive(Debug, Clone, Default)]
pub struct ValueStore {
    root: Value,
}

impl ValueStore {
    pub fn new(initial: Value) -> Self {
        Self { root: initial }
    }

    pub fn root(&self) -> &Value {
        &self.root
    }

    pub fn set(&mut self, path: &ValuePath, value: Value) {
        self.root.set_path(path, value);
    }

    pub fn get(&self, path: &ValuePath) -> Option<&Value> {
        self.root.get_path(path)
    }

    pub fn text(&self, path: &ValuePath) -> Option<&str> {
        self.get(path).and_then(Value::as_text)
    }

    pub fn replace(&mut self, root: Value) {
        self.root = root;
    }

    pub fn merge(&mut self, patch: &Value) {
        self.root.merge(patch);
    }
}

#[cfg(test)]
mod tests {
    use super::ValueStore;
    use crate::core::{Value, ValuePath};

    #[test]
    fn set_then_get_round_trips_unchanged() {
        let mut store = ValueStore::new(Value::object());
        let path = ValuePath::parse("personal_information.full_name").expect("path");
        store.set(&path, Value::Text("Aditya Chakraborty".to_string()));

        assert_eq!(store.text(&path), Some("Aditya Chakraborty"));
    }

    #[test]
    fn set_overwrites_previous_value() {
        let mut store = ValueStore::new(Value::object());
        let path = ValuePath::parse("confirmation.confirm").expect("path");
        store.set(&path, Value::Bool(false));
        store.set(&path, Value::Bool(true));

        assert_eq!(store.get(&path).and_then(Value::as_bool), Some(true));
    }
}
