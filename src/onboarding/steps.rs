use crate::schema::Probe;
use crate::widgets::inputs::{
    CheckboxInput, DateTimeInput, ImageUploadInput, PasswordInput, SelectInput, SwitchInput,
    TextAreaInput, TextInput, UniqueTextInput,
};
use crate::widgets::outputs::{SummaryOutput, TextOutput};
use crate::wizard::StepDefinition;

pub fn onboarding_steps(username_probe: Probe, email_probe: Probe) -> Vec<StepDefinition> {
    vec![
        basic_details(email_probe),
        address_details(),
        account_setup(username_probe),
        confirmation(),
    ]
}

// ── Step 1: basic details ────────────────────────────────────────────────────

fn basic_details(email_probe: Probe) -> StepDefinition {
    StepDefinition::builder("basic_details", "Basic details")
        .description("Please provide your personal information below.")
        .input(
            TextInput::new("personal_information.full_name", "Full name")
                .with_placeholder("Enter full name"),
        )
        .input(
            TextInput::new("personal_information.contact_number", "Contact number")
                .with_placeholder("Enter contact number"),
        )
        .input(
            UniqueTextInput::new("personal_information.email", "Email", email_probe)
                .with_placeholder("Enter email"),
        )
        .input(ImageUploadInput::new(
            "personal_information.avatar",
            "Avatar",
        ))
        .input(
            TextAreaInput::new("personal_information.bio", "Bio")
                .with_placeholder("A short introduction"),
        )
        .hint("Bio: Enter adds a line, Tab moves on  •  Ctrl+R restores defaults")
        .build()
}

// ── Step 2: address & employment ─────────────────────────────────────────────

fn address_details() -> StepDefinition {
    StepDefinition::builder("address_details", "Address & employment")
        .description("Where you live and where you start.")
        .input(
            TextInput::new("personal_information.home_address", "Home address")
                .with_placeholder("Enter home address"),
        )
        .input(TextInput::new("personal_information.city", "City").with_placeholder("Enter city"))
        .input(TextInput::new("personal_information.zip", "Zip code").with_placeholder("10001"))
        .input(SelectInput::new(
            "employment.department",
            "Department",
            vec!["Engineering", "Design", "Marketing", "Sales", "Support"],
        ))
        .input(DateTimeInput::new("employment.start_date", "Start date"))
        .hint("Department/date: ←/→ and ↑/↓ change values")
        .build()
}

// ── Step 3: account setup ────────────────────────────────────────────────────

fn account_setup(username_probe: Probe) -> StepDefinition {
    StepDefinition::builder("account_setup", "Account setup")
        .description("Pick a username and a password.")
        .input(
            UniqueTextInput::new("account_setup.username", "Username", username_probe)
                .with_placeholder("Enter username"),
        )
        .input(
            PasswordInput::new("account_setup.password", "Password")
                .with_strength_meter()
                .with_requirement_list(),
        )
        .input(PasswordInput::new(
            "account_setup.confirm_password",
            "Confirm password",
        ))
        .input(SwitchInput::new(
            "account_setup.notifications",
            "Email notifications",
        ))
        .hint("Ctrl+T shows/hides the password")
        .build()
}

// ── Step 4: confirmation ─────────────────────────────────────────────────────

fn confirmation() -> StepDefinition {
    StepDefinition::builder("confirmation", "Confirmation")
        .description("Review the details below, then confirm to finish.")
        .output(TextOutput::new("confirmation_heading", "Employee record").dim())
        .output(
            SummaryOutput::new("confirmation_summary")
                .section(
                    "Personal information",
                    vec![
                        ("Full name", "personal_information.full_name"),
                        ("Contact number", "personal_information.contact_number"),
                        ("Email", "personal_information.email"),
                        ("Avatar", "personal_information.avatar"),
                        ("Bio", "personal_information.bio"),
                    ],
                )
                .section(
                    "Address & employment",
                    vec![
                        ("Home address", "personal_information.home_address"),
                        ("City", "personal_information.city"),
                        ("Zip code", "personal_information.zip"),
                        ("Department", "employment.department"),
                        ("Start date", "employment.start_date"),
                    ],
                )
                .section(
                    "Account",
                    vec![
                        ("Username", "account_setup.username"),
                        ("Notifications", "account_setup.notifications"),
                    ],
                ),
        )
        .input(CheckboxInput::new(
            "confirmation.confirm",
            "I confirm the details above",
        ))
        .hint("Space toggles confirmation")
        .build()
}

#[cfg(test)]
mod tests {
    use super::onboarding_steps;
    use std::sync::Arc;

    #[test]
    fn steps_claim_their_own_paths() {
        let steps = onboarding_steps(Arc::new(|_: &str| Ok(true)), Arc::new(|_: &str| Ok(true)));
        assert_eq!(steps.len(), 4);

        let account = &steps[2];
        let paths: Vec<String> = account.paths.iter().map(ToString::to_string).collect();
        assert!(paths.contains(&"account_setup.username".to_string()));
        assert!(paths.contains(&"account_setup.password".to_string()));
        assert!(!paths.contains(&"personal_information.email".to_string()));
    }
}
