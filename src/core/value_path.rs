use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    Key(String),
    Index(usize),
}

/// Dotted path into a form record, e.g. `personal_information.email`
/// or `contacts[0].phone`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct ValuePath {
    segments: Vec<PathSegment>,
}

impl ValuePath {
    pub fn new(segments: Vec<PathSegment>) -> Self {
        Self { segments }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn segments(&self) -> &[PathSegment] {
        self.segments.as_slice()
    }

    pub fn parse(input: &str) -> Result<Self, ValuePathParseError> {
        let raw = input.trim();
        if raw.is_empty() {
            return Err(ValuePathParseError::new("empty path"));
        }

        let chars: Vec<char> = raw.chars().collect();
        let mut idx = 0usize;
        let mut out = Vec::<PathSegment>::new();

        while idx < chars.len() {
            let ch = chars[idx];
            if ch == '.' {
                if out.is_empty() {
                    return Err(ValuePathParseError::new("path cannot start with '.'"));
                }
                idx += 1;
                out.push(PathSegment::Key(parse_key(&chars, &mut idx)?));
                continue;
            }

            if ch == '[' {
                out.push(parse_index(&chars, &mut idx)?);
                continue;
            }

            if out.is_empty() {
                out.push(PathSegment::Key(parse_key(&chars, &mut idx)?));
                continue;
            }

            return Err(ValuePathParseError::new(format!(
                "unexpected character '{}' at position {}",
                ch, idx
            )));
        }

        Ok(Self::new(out))
    }
}

impl fmt::Display for ValuePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, segment) in self.segments.iter().enumerate() {
            match segment {
                PathSegment::Key(key) => {
                    if idx > 0 {
                        f.write_str(".")?;
                    }
                    f.write_str(key)?;
                }
                PathSegment::Index(index) => {
                    write!(f, "[{index}]")?;
                }
            }
        }
        Ok(())
    }
}

impl From<&str> for ValuePath {
    fn from(value: &str) -> Self {
        Self::parse(value).unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValuePathParseError {
    message: String,
}

impl ValuePathParseError {
    fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for ValuePathParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message.as_str())
    }
}

impl std::error::Error for ValuePathParseError {}

fn parse_key(chars: &[char], idx: &mut usize) -> Result<String, ValuePathParseError> {
    let start = *idx;
    while *idx < chars.len() {
        let ch = chars[*idx];
        if ch == '.' || ch == '[' || ch == ']' {
            break;
        }
        *idx += 1;
    }
    if *idx == start {
        return Err(ValuePathParseError::new(format!(
            "expected key at position {}",
            start
        )));
    }
    Ok(chars[start..*idx].iter().collect())
}

fn parse_index(chars: &[char], idx: &mut usize) -> Result<PathSegment, ValuePathParseError> {
    // Caller positioned us at '['.
    *idx += 1;
    let start = *idx;
    while *idx < chars.len() && chars[*idx] != ']' {
        *idx += 1;
    }
    if *idx >= chars.len() {
        return Err(ValuePathParseError::new("unterminated '[' segment"));
    }
    let raw: String = chars[start..*idx].iter().collect();
    *idx += 1;
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ValuePathParseError::new("empty bracket segment"));
    }
    match trimmed.parse::<usize>() {
        Ok(index) => Ok(PathSegment::Index(index)),
        Err(_) => Ok(PathSegment::Key(trimmed.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::{PathSegment, ValuePath};

    #[test]
    fn parse_dotted_path() {
        let path = ValuePath::parse("personal_information.email").expect("path should parse");
        assert_eq!(
            path.segments(),
            &[
                PathSegment::Key("personal_information".to_string()),
                PathSegment::Key("email".to_string()),
            ]
        );
    }

    #[test]
    fn parse_path_with_index() {
        let path = ValuePath::parse("contacts[1].phone").expect("path should parse");
        assert_eq!(
            path.segments(),
            &[
                PathSegment::Key("contacts".to_string()),
                PathSegment::Index(1),
                PathSegment::Key("phone".to_string()),
            ]
        );
    }

    #[test]
    fn display_round_trips() {
        for selector in ["account_setup.username", "contacts[0].phone", "confirm"] {
            let path = ValuePath::parse(selector).expect("path should parse");
            assert_eq!(path.to_string(), selector);
        }
    }

    #[test]
    fn rejects_malformed_paths() {
        assert!(ValuePath::parse("").is_err());
        assert!(ValuePath::parse(".email").is_err());
        assert!(ValuePath::parse("contacts[").is_err());
        assert!(ValuePath::parse("contacts[]").is_err());
    }
}
