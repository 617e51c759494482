pub mod focus;

use crate::app::focus::FocusState;
use crate::core::ValuePath;
use crate::form::FormContainer;
use crate::runtime::event::{AppEvent, Effect, SystemEvent, WidgetAction};
use crate::runtime::scheduler::SchedulerCommand;
use crate::task::{Job, JobCompletion, JobKind, JobOutcome};
use crate::terminal::{KeyCode, KeyEvent};
use crate::widgets::node::find_input_mut;
use crate::widgets::traits::Interactive;
use crate::wizard::{AdvanceOutcome, AdvanceTicket, StepDefinition, StepError, Wizard};
use std::time::Duration;

const ADVANCE_JOB_PREFIX: &str = "advance::";
const STEP_INCOMPLETE_MESSAGE: &str = "Please fill in all fields";

#[derive(Debug, Clone, Copy)]
pub struct AppConfig {
    pub debounce: Duration,
    pub upload_delay: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            debounce: Duration::from_millis(500),
            upload_delay: Duration::from_millis(1000),
        }
    }
}

struct PendingAdvance {
    ticket: AdvanceTicket,
    epoch: u64,
    remaining: usize,
    messages: Vec<(String, String)>,
    failures: Vec<String>,
}

impl PendingAdvance {
    fn message_for(&self, path: &str) -> String {
        self.messages
            .iter()
            .find(|(candidate, _)| candidate == path)
            .map(|(_, message)| message.clone())
            .unwrap_or_else(|| STEP_INCOMPLETE_MESSAGE.to_string())
    }
}

/// Wires the wizard, the form container, and the widget tree together.
/// All dependencies are passed in explicitly; widgets never reach for
/// ambient state.
pub struct OnboardingApp {
    form: FormContainer,
    steps: Vec<StepDefinition>,
    wizard: Wizard,
    focus: FocusState,
    config: AppConfig,
    pending: Option<PendingAdvance>,
    advance_epoch: u64,
    upload_counter: u64,
    should_exit: bool,
    submitted: bool,
}

impl OnboardingApp {
    pub fn new(form: FormContainer, steps: Vec<StepDefinition>) -> Self {
        Self::with_config(form, steps, AppConfig::default())
    }

    pub fn with_config(form: FormContainer, steps: Vec<StepDefinition>, config: AppConfig) -> Self {
        let wizard = Wizard::new(steps.len());
        let mut app = Self {
            form,
            steps,
            wizard,
            focus: FocusState::default(),
            config,
            pending: None,
            advance_epoch: 0,
            upload_counter: 0,
            should_exit: false,
            submitted: false,
        };
        app.on_step_changed();
        app
    }

    pub fn wizard(&self) -> &Wizard {
        &self.wizard
    }

    pub fn steps(&self) -> &[StepDefinition] {
        &self.steps
    }

    pub fn active_step(&self) -> &StepDefinition {
        &self.steps[self.wizard.current_step() - 1]
    }

    pub fn form(&self) -> &FormContainer {
        &self.form
    }

    pub fn focused_id(&self) -> Option<&str> {
        self.focus.current_id()
    }

    pub fn is_validating(&self) -> bool {
        self.pending.is_some()
    }

    pub fn should_exit(&self) -> bool {
        self.should_exit
    }

    pub fn is_submitted(&self) -> bool {
        self.submitted
    }

    pub fn handle_event(&mut self, event: AppEvent) -> Vec<Effect> {
        match event {
            AppEvent::Key(key) => self.handle_key(key),
            AppEvent::Tick => self.handle_tick(),
            AppEvent::System(system) => self.handle_system(system),
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Vec<Effect> {
        match key.code {
            KeyCode::Char('c') if key.modifiers.control => {
                self.should_exit = true;
                return Vec::new();
            }
            KeyCode::Char('r') if key.modifiers.control => return self.reset_form(),
            KeyCode::Tab => return self.focus_move(true),
            KeyCode::BackTab => return self.focus_move(false),
            KeyCode::Esc => return self.retreat(),
            _ => {}
        }

        let result = match self.focus.current_id().map(ToOwned::to_owned) {
            Some(focused_id) => {
                let step = &mut self.steps[self.wizard.current_step() - 1];
                match find_input_mut(&mut step.nodes, &focused_id) {
                    Some(input) => input.on_key(key),
                    None => Default::default(),
                }
            }
            None => Default::default(),
        };

        if !result.handled {
            // Navigation fallback for keys the widget left alone.
            match key.code {
                KeyCode::Up => return self.focus_move(false),
                KeyCode::Down => return self.focus_move(true),
                KeyCode::Enter => return self.advance(),
                _ => return Vec::new(),
            }
        }

        let mut effects = self.process_actions(result.actions);
        if result.request_render {
            effects.push(Effect::Render);
        }
        effects
    }

    fn handle_tick(&mut self) -> Vec<Effect> {
        let step = &mut self.steps[self.wizard.current_step() - 1];
        let mut dirty = false;
        for node in &mut step.nodes {
            if let Some(input) = node.as_input_mut() {
                dirty |= input.on_tick();
            }
        }
        if dirty {
            vec![Effect::Render]
        } else {
            Vec::new()
        }
    }

    fn handle_system(&mut self, event: SystemEvent) -> Vec<Effect> {
        match event {
            SystemEvent::CheckDue { id, value } => self.dispatch_check(&id, value),
            SystemEvent::JobFinished(completion) => self.apply_completion(completion),
        }
    }

    fn process_actions(&mut self, actions: Vec<WidgetAction>) -> Vec<Effect> {
        let mut effects = Vec::new();
        for action in actions {
            match action {
                WidgetAction::ValueChanged { id, value } => {
                    if let Ok(path) = ValuePath::parse(&id) {
                        self.form.set_value(&path, value);
                        self.sync_outputs();
                    }
                }
                WidgetAction::InputDone => effects.extend(self.input_done()),
                WidgetAction::CheckRequested { id, value } => {
                    effects.push(Effect::Schedule(SchedulerCommand::Debounce {
                        key: id.clone(),
                        delay: self.config.debounce,
                        event: AppEvent::System(SystemEvent::CheckDue { id, value }),
                    }));
                }
                WidgetAction::UploadRequested { id } => effects.extend(self.start_upload(&id)),
            }
        }
        effects
    }

    fn input_done(&mut self) -> Vec<Effect> {
        if self.focus.is_on_last() {
            return self.advance();
        }
        self.focus_move(true)
    }

    fn focus_move(&mut self, forward: bool) -> Vec<Effect> {
        if forward {
            self.focus.next();
        } else {
            self.focus.prev();
        }
        vec![Effect::Render]
    }

    /// Restores the seeded defaults and clears every annotation.
    pub fn reset_form(&mut self) -> Vec<Effect> {
        if self.pending.is_some() {
            return Vec::new();
        }
        self.form.reset(None);
        self.on_step_changed();
        vec![Effect::Render]
    }

    /// Steps back one page; never re-validates.
    pub fn retreat(&mut self) -> Vec<Effect> {
        if self.wizard.is_first_step() {
            return Vec::new();
        }
        self.wizard.retreat();
        self.on_step_changed();
        vec![Effect::Render]
    }

    /// One advance at a time: the wizard hands out a single ticket and a
    /// second Next while checks are in flight is dropped here.
    pub fn advance(&mut self) -> Vec<Effect> {
        if self.pending.is_some() {
            return Vec::new();
        }
        let Some(ticket) = self.wizard.begin_advance() else {
            return Vec::new();
        };

        // The final step validates the whole record, mirroring a submit
        // pass; earlier steps validate only their own paths.
        let paths: Vec<ValuePath> = if self.wizard.is_last_step() {
            self.form.schema_paths()
        } else {
            self.steps[ticket.step() - 1].paths.clone()
        };

        let trigger = self.form.trigger(&paths);
        if !trigger.ok {
            self.wizard
                .resolve_advance(ticket, StepError::error(STEP_INCOMPLETE_MESSAGE));
            self.focus_first_invalid();
            return vec![Effect::Render];
        }

        if trigger.checks.is_empty() {
            let outcome = self.wizard.resolve_advance(ticket, StepError::ok());
            return self.after_advance(outcome);
        }

        self.advance_epoch = self.advance_epoch.wrapping_add(1);
        let epoch = self.advance_epoch;
        let mut effects = Vec::new();
        let mut messages = Vec::new();
        for check in &trigger.checks {
            let path = check.path.to_string();
            messages.push((path.clone(), check.message.clone()));
            effects.push(Effect::Spawn(Job {
                id: format!("{ADVANCE_JOB_PREFIX}{path}"),
                seq: epoch,
                kind: JobKind::Check {
                    probe: check.probe.clone(),
                    value: check.value.clone(),
                },
            }));
        }
        self.pending = Some(PendingAdvance {
            ticket,
            epoch,
            remaining: trigger.checks.len(),
            messages,
            failures: Vec::new(),
        });
        effects.push(Effect::Render);
        effects
    }

    fn after_advance(&mut self, outcome: AdvanceOutcome) -> Vec<Effect> {
        match outcome {
            AdvanceOutcome::Advanced => {
                self.on_step_changed();
                vec![Effect::Render]
            }
            AdvanceOutcome::Completed => {
                if self.form.submit() {
                    self.submitted = true;
                    self.should_exit = true;
                } else {
                    tracing::warn!("final submit failed validation after step checks passed");
                }
                vec![Effect::Render]
            }
            AdvanceOutcome::Stayed => {
                self.focus_first_invalid();
                vec![Effect::Render]
            }
            AdvanceOutcome::Busy => Vec::new(),
        }
    }

    fn dispatch_check(&mut self, id: &str, value: String) -> Vec<Effect> {
        let Some(input) = self.find_input_anywhere(id) else {
            return Vec::new();
        };
        // A later keystroke may have superseded the debounced value.
        if input.current_text().as_deref() != Some(value.as_str()) {
            return Vec::new();
        }
        let Some(probe) = input.probe() else {
            return Vec::new();
        };
        let Some(seq) = input.begin_check() else {
            return Vec::new();
        };
        vec![
            Effect::Spawn(Job {
                id: id.to_string(),
                seq,
                kind: JobKind::Check {
                    probe,
                    value,
                },
            }),
            Effect::Render,
        ]
    }

    fn start_upload(&mut self, id: &str) -> Vec<Effect> {
        self.upload_counter = self.upload_counter.wrapping_add(1);
        let url = format!(
            "https://picsum.photos/400/400?random={}",
            self.upload_counter % 1000
        );
        let delay = self.config.upload_delay;
        let Some(input) = self.find_input_anywhere(id) else {
            return Vec::new();
        };
        let Some(seq) = input.begin_upload() else {
            return Vec::new();
        };
        vec![
            Effect::Spawn(Job {
                id: id.to_string(),
                seq,
                kind: JobKind::Upload { delay, url },
            }),
            Effect::Render,
        ]
    }

    fn apply_completion(&mut self, completion: JobCompletion) -> Vec<Effect> {
        if let Some(path) = completion
            .id
            .strip_prefix(ADVANCE_JOB_PREFIX)
            .map(ToOwned::to_owned)
        {
            return self.apply_advance_completion(&path, completion);
        }

        match completion.outcome {
            JobOutcome::Availability(result) => {
                if let Err(error) = &result {
                    tracing::warn!(
                        field = completion.id.as_str(),
                        error = error.as_str(),
                        "availability check failed"
                    );
                }
                if let Some(input) = self.find_input_anywhere(&completion.id) {
                    input.apply_check(completion.seq, result);
                }
                vec![Effect::Render]
            }
            JobOutcome::Uploaded(url) => {
                let accepted = self
                    .find_input_anywhere(&completion.id)
                    .and_then(|input| input.apply_upload(completion.seq, url));
                if let Some(value) = accepted
                    && let Ok(path) = ValuePath::parse(&completion.id)
                {
                    self.form.set_value(&path, value);
                    self.sync_outputs();
                }
                vec![Effect::Render]
            }
        }
    }

    fn apply_advance_completion(&mut self, path: &str, completion: JobCompletion) -> Vec<Effect> {
        let Some(mut pending) = self.pending.take() else {
            return Vec::new();
        };
        if completion.seq != pending.epoch {
            self.pending = Some(pending);
            return Vec::new();
        }

        match completion.outcome {
            JobOutcome::Availability(Ok(true)) => {}
            JobOutcome::Availability(Ok(false)) => {
                let message = pending.message_for(path);
                pending.failures.push(message);
            }
            JobOutcome::Availability(Err(error)) => {
                // A collaborator failure is not a definitive "taken"; it is
                // logged and does not block the step.
                tracing::warn!(
                    field = path,
                    error = error.as_str(),
                    "availability check failed during step validation"
                );
            }
            JobOutcome::Uploaded(_) => {}
        }

        pending.remaining = pending.remaining.saturating_sub(1);
        if pending.remaining > 0 {
            self.pending = Some(pending);
            return vec![Effect::Render];
        }

        let error = if pending.failures.is_empty() {
            StepError::ok()
        } else {
            StepError::error(pending.failures.join("; "))
        };
        let outcome = self.wizard.resolve_advance(pending.ticket, error);
        self.after_advance(outcome)
    }

    fn on_step_changed(&mut self) {
        self.hydrate_active_step();
        let step = &self.steps[self.wizard.current_step() - 1];
        self.focus.rebuild(&step.nodes);
        self.sync_outputs();
    }

    fn hydrate_active_step(&mut self) {
        let step = &mut self.steps[self.wizard.current_step() - 1];
        for node in &mut step.nodes {
            let Some(input) = node.as_input_mut() else {
                continue;
            };
            let Ok(path) = ValuePath::parse(input.id()) else {
                continue;
            };
            if let Some(value) = self.form.value(&path) {
                input.set_value(value.clone());
            }
        }
    }

    fn sync_outputs(&mut self) {
        let record = self.form.values().clone();
        let step = &mut self.steps[self.wizard.current_step() - 1];
        for node in &mut step.nodes {
            if let Some(output) = node.as_output_mut() {
                output.sync(&record);
            }
        }
    }

    fn focus_first_invalid(&mut self) {
        let step = &self.steps[self.wizard.current_step() - 1];
        for path in &step.paths {
            let key = path.to_string();
            if self.form.validation().visible_error(&key).is_some() {
                self.focus.set_focus_by_id(&key);
                return;
            }
        }
    }

    fn find_input_anywhere(&mut self, id: &str) -> Option<&mut dyn Interactive> {
        self.steps
            .iter_mut()
            .find_map(|step| find_input_mut(&mut step.nodes, id))
    }
}

#[cfg(test)]
mod tests {
    use super::OnboardingApp;
    use crate::core::{Value, ValuePath};
    use crate::form::FormContainer;
    use crate::runtime::event::{AppEvent, Effect, SystemEvent};
    use crate::schema::{Schema, rules};
    use crate::task::{JobCompletion, JobOutcome};
    use crate::widgets::inputs::TextInput;
    use crate::wizard::StepDefinition;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn two_step_app(name: &str, submits: Arc<AtomicUsize>) -> OnboardingApp {
        let schema = Schema::builder()
            .field("user.name", vec![rules::required("Name is required")])
            .field("user.city", vec![rules::required("City is required")])
            .unique(
                "user.name",
                Arc::new(|_: &str| Ok(true)),
                "Name is already taken",
            )
            .build();

        let mut initial = Value::object();
        initial.set_path(
            &ValuePath::parse("user.name").expect("path"),
            Value::Text(name.to_string()),
        );
        initial.set_path(
            &ValuePath::parse("user.city").expect("path"),
            Value::Text("Oslo".to_string()),
        );

        let form = FormContainer::new(
            schema,
            initial,
            Box::new(move |_| {
                submits.fetch_add(1, Ordering::SeqCst);
            }),
        );
        let steps = vec![
            StepDefinition::builder("name", "Name")
                .input(TextInput::new("user.name", "Name"))
                .build(),
            StepDefinition::builder("city", "City")
                .input(TextInput::new("user.city", "City"))
                .build(),
        ];
        OnboardingApp::new(form, steps)
    }

    fn finish_check(
        app: &mut OnboardingApp,
        path: &str,
        seq: u64,
        result: Result<bool, String>,
    ) -> Vec<Effect> {
        app.handle_event(AppEvent::System(SystemEvent::JobFinished(JobCompletion {
            id: format!("advance::{path}"),
            seq,
            outcome: JobOutcome::Availability(result),
        })))
    }

    fn spawned_check_count(effects: &[Effect]) -> usize {
        effects
            .iter()
            .filter(|effect| matches!(effect, Effect::Spawn(_)))
            .count()
    }

    #[test]
    fn advance_with_missing_field_stays_and_reveals_errors() {
        let mut app = two_step_app("", Arc::new(AtomicUsize::new(0)));
        app.advance();

        assert_eq!(app.wizard().current_step(), 1);
        assert_eq!(
            app.wizard().current_error_message(),
            Some("Please fill in all fields")
        );
        assert!(app.form().validation().visible_error("user.name").is_some());
    }

    #[test]
    fn advance_waits_for_the_async_check_to_settle() {
        let mut app = two_step_app("freyja", Arc::new(AtomicUsize::new(0)));
        let effects = app.advance();

        assert_eq!(spawned_check_count(&effects), 1);
        assert!(app.is_validating());
        assert_eq!(app.wizard().current_step(), 1);

        // Rapid second Next while the check is in flight is a no-op.
        assert!(app.advance().is_empty());

        finish_check(&mut app, "user.name", 1, Ok(true));
        assert!(!app.is_validating());
        assert_eq!(app.wizard().current_step(), 2);
    }

    #[test]
    fn rejected_check_records_the_rule_message() {
        let mut app = two_step_app("freyja", Arc::new(AtomicUsize::new(0)));
        app.advance();
        finish_check(&mut app, "user.name", 1, Ok(false));

        assert_eq!(app.wizard().current_step(), 1);
        assert_eq!(
            app.wizard().current_error_message(),
            Some("Name is already taken")
        );
    }

    #[test]
    fn predicate_failure_is_not_a_definitive_rejection() {
        let mut app = two_step_app("freyja", Arc::new(AtomicUsize::new(0)));
        app.advance();
        finish_check(&mut app, "user.name", 1, Err("service offline".to_string()));

        assert_eq!(app.wizard().current_step(), 2);
    }

    #[test]
    fn completion_submits_exactly_once() {
        let submits = Arc::new(AtomicUsize::new(0));
        let mut app = two_step_app("freyja", submits.clone());

        app.advance();
        finish_check(&mut app, "user.name", 1, Ok(true));
        assert_eq!(app.wizard().current_step(), 2);

        // Final step validates the whole record, async rules included.
        app.advance();
        finish_check(&mut app, "user.name", 2, Ok(true));

        assert!(app.is_submitted());
        assert!(app.should_exit());
        assert_eq!(submits.load(Ordering::SeqCst), 1);

        assert!(app.advance().is_empty());
        assert_eq!(submits.load(Ordering::SeqCst), 1);
        assert_eq!(app.wizard().current_step(), 2);
    }

    #[test]
    fn ctrl_r_resets_to_the_seeded_values() {
        use crate::terminal::{KeyCode, KeyEvent};

        let mut app = two_step_app("freyja", Arc::new(AtomicUsize::new(0)));
        app.handle_key(KeyEvent::plain(KeyCode::Char('x')));
        let name = ValuePath::parse("user.name").expect("path");
        assert_eq!(app.form().text(&name), Some("freyjax"));

        app.handle_key(KeyEvent::ctrl(KeyCode::Char('r')));
        assert_eq!(app.form().text(&name), Some("freyja"));
    }

    #[test]
    fn stale_advance_completion_is_ignored_after_retreat() {
        let mut app = two_step_app("freyja", Arc::new(AtomicUsize::new(0)));
        app.advance();
        finish_check(&mut app, "user.name", 1, Ok(true));
        assert_eq!(app.wizard().current_step(), 2);

        app.advance();
        app.retreat();
        finish_check(&mut app, "user.name", 2, Ok(true));

        // The voided ticket must not re-advance the wizard.
        assert_eq!(app.wizard().current_step(), 1);
    }
}
