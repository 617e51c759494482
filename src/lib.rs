pub mod app;
pub mod core;
pub mod form;
pub mod onboarding;
pub mod runtime;
pub mod schema;
pub mod task;
pub mod terminal;
pub mod ui;
pub mod widgets;
pub mod wizard;

pub use app::{AppConfig, OnboardingApp};
pub use self::core::{Value, ValuePath};
pub use form::{FormContainer, SubmitHandler};
pub use runtime::Runtime;
pub use schema::{Probe, Schema};
pub use task::{JobExecutor, ProbeStatus};
pub use terminal::Terminal;
pub use wizard::{StepDefinition, StepError, StepStatus, Wizard};
