use crate::schema::{Rule, rules};
use crate::ui::style::Color;

pub const MIN_LENGTH: usize = 6;

pub struct Requirement {
    pub label: &'static str,
    check: fn(&str) -> bool,
}

impl Requirement {
    pub fn is_met(&self, password: &str) -> bool {
        (self.check)(password)
    }
}

pub const REQUIREMENTS: [Requirement; 5] = [
    Requirement {
        label: "At least 6 characters",
        check: |p| p.chars().count() >= MIN_LENGTH,
    },
    Requirement {
        label: "At least one uppercase letter",
        check: |p| p.chars().any(|ch| ch.is_ascii_uppercase()),
    },
    Requirement {
        label: "At least one lowercase letter",
        check: |p| p.chars().any(|ch| ch.is_ascii_lowercase()),
    },
    Requirement {
        label: "At least one number",
        check: |p| p.chars().any(|ch| ch.is_ascii_digit()),
    },
    Requirement {
        label: "At least one special character",
        check: |p| p.chars().any(|ch| !ch.is_alphanumeric()),
    },
];

pub fn checks(password: &str) -> [bool; REQUIREMENTS.len()] {
    let mut out = [false; REQUIREMENTS.len()];
    for (slot, requirement) in out.iter_mut().zip(REQUIREMENTS.iter()) {
        *slot = requirement.is_met(password);
    }
    out
}

/// Strength as the percentage of satisfied requirements.
pub fn strength(password: &str) -> u8 {
    if password.is_empty() {
        return 0;
    }
    let met = checks(password).iter().filter(|met| **met).count();
    (met * 100 / REQUIREMENTS.len()) as u8
}

pub fn strength_color(strength: u8) -> Color {
    if strength <= 25 {
        Color::Red
    } else if strength <= 50 {
        Color::Orange
    } else if strength <= 75 {
        Color::Yellow
    } else {
        Color::Green
    }
}

pub fn schema_rules() -> Vec<Rule> {
    vec![
        rules::min_chars(
            MIN_LENGTH,
            format!("Password must be at least {MIN_LENGTH} characters"),
        ),
        rules::custom(
            |v| REQUIREMENTS[1].is_met(v.as_text().unwrap_or("")),
            "Password must contain at least one uppercase letter",
        ),
        rules::custom(
            |v| REQUIREMENTS[2].is_met(v.as_text().unwrap_or("")),
            "Password must contain at least one lowercase letter",
        ),
        rules::custom(
            |v| REQUIREMENTS[3].is_met(v.as_text().unwrap_or("")),
            "Password must contain at least one number",
        ),
        rules::custom(
            |v| REQUIREMENTS[4].is_met(v.as_text().unwrap_or("")),
            "Password must contain at least one special character",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::{checks, strength, strength_color};
    use crate::ui::style::Color;

    #[test]
    fn strong_password_meets_all_requirements() {
        assert_eq!(checks("Pass1!"), [true; 5]);
        assert_eq!(strength("Pass1!"), 100);
    }

    #[test]
    fn weak_password_meets_only_lowercase() {
        assert_eq!(checks("pass"), [false, false, true, false, false]);
        assert_eq!(strength("pass"), 20);
    }

    #[test]
    fn empty_password_has_zero_strength() {
        assert_eq!(strength(""), 0);
    }

    #[test]
    fn strength_colors_follow_quartiles() {
        assert_eq!(strength_color(20), Color::Red);
        assert_eq!(strength_color(40), Color::Orange);
        assert_eq!(strength_color(60), Color::Yellow);
        assert_eq!(strength_color(100), Color::Green);
    }
}
