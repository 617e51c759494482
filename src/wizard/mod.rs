pub mod step;

pub use step::{StepBuilder, StepDefinition};

use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StepError {
    pub has_error: bool,
    pub message: Option<String>,
}

impl StepError {
    pub fn ok() -> Self {
        Self::default()
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            has_error: true,
            message: Some(message.into()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepStatus {
    Completed,
    Error,
    Current,
    Pending,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdvanceOutcome {
    /// A validation is already in flight; the request was dropped.
    Busy,
    /// The validator failed; the step did not change.
    Stayed,
    Advanced,
    /// The last step validated; the completion callback fires once.
    Completed,
}

/// Token for an advance attempt. Holding one means the wizard will accept
/// no other advance until this one is resolved.
#[derive(Debug)]
pub struct AdvanceTicket {
    step: usize,
}

impl AdvanceTicket {
    pub fn step(&self) -> usize {
        self.step
    }
}

/// Step pointer plus per-step error bookkeeping. `current` is 1-based and
/// only moves forward through `resolve_advance`, backward through
/// `retreat`.
pub struct Wizard {
    current: usize,
    total: usize,
    step_errors: HashMap<usize, StepError>,
    in_flight: bool,
    completed: bool,
}

impl Wizard {
    pub fn new(total_steps: usize) -> Self {
        Self {
            current: 1,
            total: total_steps.max(1),
            step_errors: HashMap::new(),
            in_flight: false,
            completed: false,
        }
    }

    pub fn current_step(&self) -> usize {
        self.current
    }

    pub fn total_steps(&self) -> usize {
        self.total
    }

    pub fn is_first_step(&self) -> bool {
        self.current == 1
    }

    pub fn is_last_step(&self) -> bool {
        self.current == self.total
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    pub fn is_validating(&self) -> bool {
        self.in_flight
    }

    pub fn step_error(&self, step: usize) -> Option<&StepError> {
        self.step_errors.get(&step)
    }

    pub fn current_error_message(&self) -> Option<&str> {
        self.step_errors
            .get(&self.current)
            .filter(|error| error.has_error)
            .and_then(|error| error.message.as_deref())
    }

    /// Claims the advance slot. `None` while another validation is in
    /// flight or after completion, so a rapid second Next is a no-op.
    pub fn begin_advance(&mut self) -> Option<AdvanceTicket> {
        if self.in_flight || self.completed {
            return None;
        }
        self.in_flight = true;
        Some(AdvanceTicket { step: self.current })
    }

    pub fn resolve_advance(&mut self, ticket: AdvanceTicket, error: StepError) -> AdvanceOutcome {
        self.in_flight = false;

        if ticket.step != self.current {
            // Stale ticket from before a retreat; the attempt no longer applies.
            return AdvanceOutcome::Stayed;
        }

        if error.has_error {
            self.step_errors.insert(self.current, error);
            return AdvanceOutcome::Stayed;
        }

        self.step_errors.insert(self.current, StepError::ok());

        if self.current == self.total {
            self.completed = true;
            return AdvanceOutcome::Completed;
        }

        self.current += 1;
        AdvanceOutcome::Advanced
    }

    /// Synchronous advance: validator runs inline and the outcome is
    /// resolved immediately.
    pub fn advance_with(&mut self, validate: impl FnOnce(usize) -> StepError) -> AdvanceOutcome {
        let Some(ticket) = self.begin_advance() else {
            return AdvanceOutcome::Busy;
        };
        let error = validate(ticket.step());
        self.resolve_advance(ticket, error)
    }

    /// Steps back without re-validating, clamped at the first step. Legal
    /// while a validation is in flight; the stale ticket resolves to a
    /// no-op.
    pub fn retreat(&mut self) {
        if self.completed {
            return;
        }
        if self.current > 1 {
            self.current -= 1;
        }
    }

    /// Progress indicator input: status of every step, derived purely
    /// from the pointer and the recorded errors.
    pub fn statuses(&self) -> Vec<StepStatus> {
        (1..=self.total)
            .map(|step| {
                if step == self.current && !self.completed {
                    StepStatus::Current
                } else if step < self.current || self.completed {
                    match self.step_errors.get(&step) {
                        Some(error) if error.has_error => StepStatus::Error,
                        _ => StepStatus::Completed,
                    }
                } else {
                    StepStatus::Pending
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::{AdvanceOutcome, StepError, StepStatus, Wizard};

    fn pass(_step: usize) -> StepError {
        StepError::ok()
    }

    #[test]
    fn advance_never_exceeds_total_steps() {
        let mut wizard = Wizard::new(3);
        for _ in 0..10 {
            wizard.advance_with(pass);
            assert!(wizard.current_step() <= wizard.total_steps());
        }
        assert_eq!(wizard.current_step(), 3);
        assert!(wizard.is_completed());
    }

    #[test]
    fn failing_validator_stays_and_records_error() {
        let mut wizard = Wizard::new(4);
        let outcome = wizard.advance_with(|_| StepError::error("Please fill in all fields"));

        assert_eq!(outcome, AdvanceOutcome::Stayed);
        assert_eq!(wizard.current_step(), 1);
        let error = wizard.step_error(1).expect("error recorded");
        assert!(error.has_error);
        assert_eq!(error.message.as_deref(), Some("Please fill in all fields"));
    }

    #[test]
    fn success_clears_previous_step_error() {
        let mut wizard = Wizard::new(2);
        wizard.advance_with(|_| StepError::error("x"));
        wizard.advance_with(pass);

        assert_eq!(wizard.current_step(), 2);
        assert!(!wizard.step_error(1).expect("entry").has_error);
    }

    #[test]
    fn step_three_failing_never_reaches_step_four() {
        let mut wizard = Wizard::new(4);
        wizard.advance_with(pass);
        wizard.advance_with(pass);
        assert_eq!(wizard.current_step(), 3);

        for _ in 0..5 {
            wizard.advance_with(|_| StepError::error("x"));
            assert_eq!(wizard.current_step(), 3);
        }
    }

    #[test]
    fn completion_fires_once_and_pointer_stays_in_range() {
        let mut wizard = Wizard::new(2);
        assert_eq!(wizard.advance_with(pass), AdvanceOutcome::Advanced);
        assert_eq!(wizard.advance_with(pass), AdvanceOutcome::Completed);
        // Further attempts are rejected outright.
        assert_eq!(wizard.advance_with(pass), AdvanceOutcome::Busy);
        assert_eq!(wizard.current_step(), 2);
    }

    #[test]
    fn second_advance_while_pending_is_rejected() {
        let mut wizard = Wizard::new(3);
        let ticket = wizard.begin_advance().expect("first claim");
        assert!(wizard.begin_advance().is_none());

        wizard.resolve_advance(ticket, StepError::ok());
        assert!(wizard.begin_advance().is_some());
    }

    #[test]
    fn retreat_clamps_at_first_step_and_skips_validation() {
        let mut wizard = Wizard::new(3);
        wizard.retreat();
        assert_eq!(wizard.current_step(), 1);

        wizard.advance_with(pass);
        wizard.retreat();
        assert_eq!(wizard.current_step(), 1);
    }

    #[test]
    fn retreat_during_pending_validation_voids_the_ticket() {
        let mut wizard = Wizard::new(3);
        wizard.advance_with(pass);
        let ticket = wizard.begin_advance().expect("claim");
        wizard.retreat();

        let outcome = wizard.resolve_advance(ticket, StepError::ok());
        assert_eq!(outcome, AdvanceOutcome::Stayed);
        assert_eq!(wizard.current_step(), 1);
    }

    #[test]
    fn statuses_reflect_pointer_and_errors() {
        let mut wizard = Wizard::new(4);
        wizard.advance_with(pass);
        wizard.advance_with(pass);
        wizard.advance_with(|_| StepError::error("x"));

        assert_eq!(
            wizard.statuses(),
            vec![
                StepStatus::Completed,
                StepStatus::Completed,
                StepStatus::Current,
                StepStatus::Pending,
            ]
        );
    }
}
