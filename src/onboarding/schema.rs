use crate::core::{Value, ValuePath};
use crate::schema::{Probe, Schema, password, rules};

pub fn employee_schema(username_probe: Probe, email_probe: Probe) -> Schema {
    Schema::builder()
        .field(
            "personal_information.full_name",
            vec![rules::required("Full name is required")],
        )
        .field(
            "personal_information.contact_number",
            vec![
                rules::required("Contact number is required"),
                rules::phone("Contact number must be at least 10 digits"),
            ],
        )
        .field(
            "personal_information.email",
            vec![
                rules::required("Email is required"),
                rules::email("Invalid email format"),
            ],
        )
        .field("personal_information.avatar", vec![])
        .field(
            "personal_information.bio",
            vec![rules::max_chars(280, "Bio must be at most 280 characters")],
        )
        .field(
            "personal_information.home_address",
            vec![rules::required("Home address is required")],
        )
        .field(
            "personal_information.city",
            vec![rules::required("City is required")],
        )
        .field(
            "personal_information.zip",
            vec![
                rules::min_chars(4, "Zip Code must be at least 4 digits"),
                rules::max_chars(10, "Zip Code must be at most 10 digits"),
                rules::digits("Zip Code can contain only numbers"),
            ],
        )
        .field(
            "employment.department",
            vec![rules::required("Department is required")],
        )
        .field(
            "employment.start_date",
            vec![rules::pattern(
                r"^\d{4}-\d{2}-\d{2} \d{2}:\d{2}$",
                "Start date must look like 2026-09-01 09:00",
            )],
        )
        .field(
            "account_setup.username",
            vec![rules::min_chars(4, "Username must be at least 4 characters")],
        )
        .field("account_setup.password", password::schema_rules())
        .field("account_setup.confirm_password", vec![])
        .field("account_setup.notifications", vec![])
        .field(
            "confirmation.confirm",
            vec![rules::must_be_true("Please confirm the details")],
        )
        .equal(
            "account_setup.confirm_password",
            "account_setup.password",
            "Passwords do not match",
        )
        .unique(
            "personal_information.email",
            email_probe,
            "Email is already taken",
        )
        .unique(
            "account_setup.username",
            username_probe,
            "Username is already taken",
        )
        .build()
}

/// Demo defaults, pre-filling everything except the confirmation flag.
pub fn initial_values() -> Value {
    let mut record = Value::object();
    let mut set = |selector: &str, value: Value| {
        if let Ok(path) = ValuePath::parse(selector) {
            record.set_path(&path, value);
        }
    };

    set(
        "personal_information.full_name",
        "Aditya Chakraborty".into(),
    );
    set("personal_information.contact_number", "01712345678".into());
    set("personal_information.email", "aditya@email.com".into());
    set("personal_information.avatar", Value::None);
    set("personal_information.bio", "".into());
    set("personal_information.home_address", "123 Main St".into());
    set("personal_information.city", "New York".into());
    set("personal_information.zip", "10001".into());

    set("employment.department", "Engineering".into());
    set("employment.start_date", "2026-09-01 09:00".into());

    set("account_setup.username", "adityaUser".into());
    set("account_setup.password", "Pass@1234".into());
    set("account_setup.confirm_password", "Pass@1234".into());
    set("account_setup.notifications", Value::Bool(true));

    set("confirmation.confirm", Value::Bool(false));

    record
}

#[cfg(test)]
mod tests {
    use super::{employee_schema, initial_values};
    use crate::core::{Value, ValuePath};
    use crate::schema::Probe;
    use std::sync::Arc;

    fn pass_probe() -> Probe {
        Arc::new(|_: &str| Ok(true))
    }

    fn path(selector: &str) -> ValuePath {
        ValuePath::parse(selector).expect("path")
    }

    #[test]
    fn defaults_fail_only_on_the_confirmation_flag() {
        let schema = employee_schema(pass_probe(), pass_probe());
        let issues = schema.evaluate(&initial_values(), None);

        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].path.to_string(), "confirmation.confirm");
    }

    #[test]
    fn confirmed_defaults_validate_cleanly() {
        let schema = employee_schema(pass_probe(), pass_probe());
        let mut record = initial_values();
        record.set_path(&path("confirmation.confirm"), Value::Bool(true));

        assert!(schema.evaluate(&record, None).is_empty());
    }

    #[test]
    fn mismatched_confirm_password_is_reported_on_the_confirm_path() {
        let schema = employee_schema(pass_probe(), pass_probe());
        let mut record = initial_values();
        record.set_path(&path("confirmation.confirm"), Value::Bool(true));
        record.set_path(&path("account_setup.confirm_password"), "different".into());

        let issues = schema.evaluate(&record, None);
        assert_eq!(issues.len(), 1);
        assert_eq!(
            issues[0].path.to_string(),
            "account_setup.confirm_password"
        );
        assert_eq!(issues[0].message, "Passwords do not match");
    }

    #[test]
    fn weak_password_is_rejected_with_the_first_unmet_requirement() {
        let schema = employee_schema(pass_probe(), pass_probe());
        let mut record = initial_values();
        record.set_path(&path("confirmation.confirm"), Value::Bool(true));
        record.set_path(&path("account_setup.password"), "pass".into());
        record.set_path(&path("account_setup.confirm_password"), "pass".into());

        let issues = schema.evaluate(&record, None);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].path.to_string(), "account_setup.password");
        assert_eq!(
            issues[0].message,
            "Password must be at least 6 characters"
        );
    }

    #[test]
    fn zip_must_be_digits_within_bounds() {
        let schema = employee_schema(pass_probe(), pass_probe());
        let zip = path("personal_information.zip");
        let mut record = initial_values();
        record.set_path(&path("confirmation.confirm"), Value::Bool(true));

        for bad in ["123", "12a45", "12345678901"] {
            record.set_path(&zip, bad.into());
            assert!(
                !schema.evaluate(&record, None).is_empty(),
                "zip '{bad}' should be rejected"
            );
        }

        record.set_path(&zip, "10001".into());
        assert!(schema.evaluate(&record, None).is_empty());
    }
}
