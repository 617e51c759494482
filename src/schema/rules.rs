use crate::core::Value;
use crate::schema::Rule;
use regex::Regex;

pub fn required(message: impl Into<String>) -> Rule {
    let message = message.into();
    Box::new(move |value: &Value| {
        if value.is_empty() {
            Err(message.clone())
        } else {
            Ok(())
        }
    })
}

pub fn min_chars(min: usize, message: impl Into<String>) -> Rule {
    let message = message.into();
    Box::new(move |value: &Value| {
        let text = value.as_text().unwrap_or("");
        if text.chars().count() < min {
            Err(message.clone())
        } else {
            Ok(())
        }
    })
}

pub fn max_chars(max: usize, message: impl Into<String>) -> Rule {
    let message = message.into();
    Box::new(move |value: &Value| {
        let text = value.as_text().unwrap_or("");
        if text.chars().count() > max {
            Err(message.clone())
        } else {
            Ok(())
        }
    })
}

pub fn pattern(pattern: &str, message: impl Into<String>) -> Rule {
    let re = Regex::new(pattern).expect("invalid rule pattern");
    let message = message.into();
    Box::new(move |value: &Value| {
        let text = value.as_text().unwrap_or("");
        if re.is_match(text) {
            Ok(())
        } else {
            Err(message.clone())
        }
    })
}

pub fn email(message: impl Into<String>) -> Rule {
    pattern(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$", message)
}

pub fn phone(message: impl Into<String>) -> Rule {
    pattern(
        r"^([+]?[\s0-9]+)?(\d{3}|[(]?[0-9]+[)])?([-]?[\s]?[0-9])+$",
        message,
    )
}

pub fn digits(message: impl Into<String>) -> Rule {
    let message = message.into();
    Box::new(move |value: &Value| {
        let text = value.as_text().unwrap_or("");
        if !text.is_empty() && text.chars().all(|ch| ch.is_ascii_digit()) {
            Ok(())
        } else {
            Err(message.clone())
        }
    })
}

pub fn must_be_true(message: impl Into<String>) -> Rule {
    let message = message.into();
    Box::new(move |value: &Value| {
        if value.as_bool() == Some(true) {
            Ok(())
        } else {
            Err(message.clone())
        }
    })
}

pub fn custom<F>(check: F, message: impl Into<String>) -> Rule
where
    F: Fn(&Value) -> bool + Send + Sync + 'static,
{
    let message = message.into();
    Box::new(move |value: &Value| {
        if check(value) {
            Ok(())
        } else {
            Err(message.clone())
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn required_rejects_blank_text() {
        let rule = required("required");
        assert!(rule(&Value::Text("  ".to_string())).is_err());
        assert!(rule(&Value::None).is_err());
        assert!(rule(&Value::Text("x".to_string())).is_ok());
    }

    #[test]
    fn email_accepts_plausible_addresses() {
        let rule = email("bad email");
        assert!(rule(&Value::Text("freyja@email.com".to_string())).is_ok());
        assert!(rule(&Value::Text("not-an-email".to_string())).is_err());
    }

    #[test]
    fn phone_accepts_digit_runs() {
        let rule = phone("bad phone");
        assert!(rule(&Value::Text("01712345678".to_string())).is_ok());
        assert!(rule(&Value::Text("phone".to_string())).is_err());
    }

    #[test]
    fn digits_rejects_mixed_input() {
        let rule = digits("only numbers");
        assert!(rule(&Value::Text("10001".to_string())).is_ok());
        assert!(rule(&Value::Text("10a01".to_string())).is_err());
    }

    #[test]
    fn must_be_true_requires_checked_flag() {
        let rule = must_be_true("confirm first");
        assert!(rule(&Value::Bool(true)).is_ok());
        assert!(rule(&Value::Bool(false)).is_err());
        assert!(rule(&Value::None).is_err());
    }
}
