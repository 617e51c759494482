use crate::core::Value;
use crate::runtime::scheduler::SchedulerCommand;
use crate::task::{Job, JobCompletion};
use crate::terminal::KeyEvent;

/// Actions emitted by widgets; they flow upward to the app.
#[derive(Debug, Clone)]
pub enum WidgetAction {
    ValueChanged { id: String, value: Value },
    /// Widget is done with its value; focus moves on or the step submits.
    InputDone,
    /// Uniqueness field edited; the app debounces, then dispatches.
    CheckRequested { id: String, value: String },
    UploadRequested { id: String },
}

#[derive(Debug, Clone)]
pub enum SystemEvent {
    /// A debounce window elapsed with `value` still current.
    CheckDue { id: String, value: String },
    JobFinished(JobCompletion),
}

#[derive(Debug, Clone)]
pub enum AppEvent {
    Key(KeyEvent),
    Tick,
    System(SystemEvent),
}

/// Side effects the app hands back to the runner.
pub enum Effect {
    Schedule(SchedulerCommand),
    Spawn(Job),
    Render,
}
