use crate::core::value_path::{PathSegment, ValuePath};
use indexmap::IndexMap;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(untagged)]
pub enum Value {
    #[default]
    None,
    Text(String),
    Bool(bool),
    Number(i64),
    List(Vec<Value>),
    Object(IndexMap<String, Value>),
}

impl Value {
    pub fn object() -> Self {
        Self::Object(IndexMap::new())
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Self::None => true,
            Self::Text(v) => v.trim().is_empty(),
            Self::List(v) => v.is_empty(),
            Self::Object(v) => v.is_empty(),
            _ => false,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(v) => Some(v.as_str()),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<i64> {
        match self {
            Self::Number(v) => Some(*v),
            _ => None,
        }
    }

    pub fn to_text_scalar(&self) -> Option<String> {
        match self {
            Self::Text(v) => Some(v.clone()),
            Self::Bool(v) => Some(v.to_string()),
            Self::Number(v) => Some(v.to_string()),
            _ => None,
        }
    }

    pub fn get_path(&self, path: &ValuePath) -> Option<&Value> {
        let mut current = self;
        for segment in path.segments() {
            current = match (segment, current) {
                (PathSegment::Key(key), Value::Object(map)) => map.get(key.as_str())?,
                (PathSegment::Index(index), Value::List(list)) => list.get(*index)?,
                _ => return None,
            };
        }
        Some(current)
    }

    pub fn set_path(&mut self, path: &ValuePath, value: Value) {
        *ensure_path_mut(self, path) = value;
    }

    /// Overlays `patch` onto `self`: objects merge key-by-key, everything
    /// else is replaced.
    pub fn merge(&mut self, patch: &Value) {
        match (self, patch) {
            (Value::Object(base), Value::Object(overlay)) => {
                for (key, patch_value) in overlay {
                    match base.get_mut(key.as_str()) {
                        Some(existing) => existing.merge(patch_value),
                        None => {
                            base.insert(key.clone(), patch_value.clone());
                        }
                    }
                }
            }
            (slot, patch) => *slot = patch.clone(),
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Number(value)
    }
}

fn container_for_next(next: Option<&PathSegment>) -> Value {
    match next {
        Some(PathSegment::Index(_)) => Value::List(Vec::new()),
        _ => Value::object(),
    }
}

fn ensure_path_mut<'a>(root: &'a mut Value, path: &ValuePath) -> &'a mut Value {
    if path.is_empty() {
        return root;
    }

    let segments = path.segments();
    let mut current = root;
    for (idx, segment) in segments.iter().enumerate() {
        let next = segments.get(idx + 1);
        match segment {
            PathSegment::Key(key) => {
                if !matches!(current, Value::Object(_)) {
                    *current = Value::object();
                }
                let Value::Object(map) = current else {
                    unreachable!("slot was just made an object");
                };
                current = map
                    .entry(key.clone())
                    .or_insert_with(|| container_for_next(next));
            }
            PathSegment::Index(index) => {
                if !matches!(current, Value::List(_)) {
                    *current = Value::List(Vec::new());
                }
                let Value::List(list) = current else {
                    unreachable!("slot was just made a list");
                };
                if list.len() <= *index {
                    list.resize_with(index + 1, || Value::None);
                }
                if matches!(list[*index], Value::None) {
                    list[*index] = container_for_next(next);
                }
                current = &mut list[*index];
            }
        }
    }
    current
}

#[cfg(test)]
mod tests {
    use super::Value;
    use crate::core::value_path::ValuePath;

    #[test]
    fn set_path_creates_nested_structure() {
        let mut root = Value::None;
        let path = ValuePath::parse("account_setup.username").expect("path");
        root.set_path(&path, Value::Text("freyja".to_string()));

        let fetched = root.get_path(&path).and_then(Value::as_text);
        assert_eq!(fetched, Some("freyja"));
    }

    #[test]
    fn set_path_overwrites_existing_leaf() {
        let mut root = Value::None;
        let path = ValuePath::parse("confirmation.confirm").expect("path");
        root.set_path(&path, Value::Bool(false));
        root.set_path(&path, Value::Bool(true));

        assert_eq!(root.get_path(&path).and_then(Value::as_bool), Some(true));
    }

    #[test]
    fn merge_overlays_objects_key_by_key() {
        let mut base = Value::None;
        base.set_path(&ValuePath::parse("a.x").expect("path"), Value::Number(1));
        base.set_path(&ValuePath::parse("a.y").expect("path"), Value::Number(2));

        let mut patch = Value::None;
        patch.set_path(&ValuePath::parse("a.y").expect("path"), Value::Number(9));

        base.merge(&patch);
        assert_eq!(
            base.get_path(&ValuePath::parse("a.x").expect("path"))
                .and_then(Value::as_number),
            Some(1)
        );
        assert_eq!(
            base.get_path(&ValuePath::parse("a.y").expect("path"))
                .and_then(Value::as_number),
            Some(9)
        );
    }

    #[test]
    fn get_path_on_missing_slot_is_none() {
        let root = Value::object();
        let path = ValuePath::parse("nope.missing").expect("path");
        assert!(root.get_path(&path).is_none());
    }
}
