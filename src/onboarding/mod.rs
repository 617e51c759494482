pub mod schema;
pub mod steps;

pub use schema::{employee_schema, initial_values};
pub use steps::onboarding_steps;

use crate::app::OnboardingApp;
use crate::form::{FormContainer, SubmitHandler};
use crate::schema::Probe;
use std::sync::Arc;

const TAKEN_USERNAMES: [&str; 3] = ["admin", "root", "test"];
const TAKEN_EMAILS: [&str; 3] = [
    "admin@example.com",
    "root@example.com",
    "test@example.com",
];

/// Stand-in collaborator; a real deployment injects a service-backed
/// predicate with the same shape.
pub fn username_probe() -> Probe {
    Arc::new(|candidate: &str| {
        let candidate = candidate.to_lowercase();
        Ok(!TAKEN_USERNAMES.iter().any(|taken| *taken == candidate))
    })
}

pub fn email_probe() -> Probe {
    Arc::new(|candidate: &str| {
        let candidate = candidate.to_lowercase();
        Ok(!TAKEN_EMAILS.iter().any(|taken| *taken == candidate))
    })
}

/// Wires the employee-onboarding wizard: schema, seeded values, steps,
/// and the caller's submit handler.
pub fn onboarding_app(on_submit: SubmitHandler) -> OnboardingApp {
    let form = FormContainer::new(
        employee_schema(username_probe(), email_probe()),
        initial_values(),
        on_submit,
    );
    OnboardingApp::new(form, onboarding_steps(username_probe(), email_probe()))
}

#[cfg(test)]
mod tests {
    use super::{email_probe, onboarding_app, username_probe};
    use crate::core::Value;
    use std::sync::{Arc, Mutex};

    #[test]
    fn probes_reject_taken_names_case_insensitively() {
        let usernames = username_probe();
        assert_eq!(usernames("Admin"), Ok(false));
        assert_eq!(usernames("freyja"), Ok(true));

        let emails = email_probe();
        assert_eq!(emails("ROOT@example.com"), Ok(false));
        assert_eq!(emails("freyja@example.com"), Ok(true));
    }

    #[test]
    fn wizard_has_four_fixed_steps() {
        let app = onboarding_app(Box::new(|_| {}));
        assert_eq!(app.wizard().total_steps(), 4);
        assert_eq!(app.wizard().current_step(), 1);
        assert_eq!(app.active_step().id, "basic_details");
    }

    #[test]
    fn submitted_record_carries_the_collected_groups() {
        let captured: Arc<Mutex<Option<Value>>> = Arc::new(Mutex::new(None));
        let sink = captured.clone();
        let mut app = onboarding_app(Box::new(move |record| {
            *sink.lock().expect("lock") = Some(record.clone());
        }));

        // Walk the wizard with the seeded defaults, confirming at the end.
        use crate::runtime::event::{AppEvent, SystemEvent};
        use crate::task::{JobCompletion, JobOutcome};
        use crate::terminal::{KeyCode, KeyEvent};

        let finish = |app: &mut crate::app::OnboardingApp, path: &str, seq: u64| {
            app.handle_event(AppEvent::System(SystemEvent::JobFinished(JobCompletion {
                id: format!("advance::{path}"),
                seq,
                outcome: JobOutcome::Availability(Ok(true)),
            })));
        };

        app.advance();
        finish(&mut app, "personal_information.email", 1);
        assert_eq!(app.active_step().id, "address_details");

        app.advance();
        assert_eq!(app.active_step().id, "account_setup");

        app.advance();
        finish(&mut app, "account_setup.username", 2);
        assert_eq!(app.active_step().id, "confirmation");

        // Toggle the confirmation checkbox, then complete.
        app.handle_key(KeyEvent::plain(KeyCode::Char(' ')));
        app.advance();
        finish(&mut app, "personal_information.email", 3);
        finish(&mut app, "account_setup.username", 3);

        let record = captured
            .lock()
            .expect("lock")
            .clone()
            .expect("record was submitted");
        let json = serde_json::to_value(&record).expect("record serializes");
        assert_eq!(
            json["personal_information"]["full_name"],
            "Aditya Chakraborty"
        );
        assert_eq!(json["account_setup"]["username"], "adityaUser");
        assert_eq!(json["confirmation"]["confirm"], true);
    }
}
