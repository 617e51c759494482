use onboard::Value;
use onboard::onboarding::onboarding_app;
use onboard::runtime::Runtime;
use onboard::terminal::Terminal;
use std::io;
use std::sync::{Arc, Mutex};

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {e}");
    }
}

fn run() -> io::Result<()> {
    init_logging();

    let submitted: Arc<Mutex<Option<Value>>> = Arc::new(Mutex::new(None));
    let sink = submitted.clone();
    let app = onboarding_app(Box::new(move |record| {
        if let Ok(mut slot) = sink.lock() {
            *slot = Some(record.clone());
        }
    }));

    let terminal = Terminal::new()?;
    let app = Runtime::new(app, terminal).run()?;

    if app.is_submitted()
        && let Ok(slot) = submitted.lock()
        && let Some(record) = slot.as_ref()
    {
        match serde_json::to_string_pretty(record) {
            Ok(json) => println!("{json}"),
            Err(err) => eprintln!("could not serialize record: {err}"),
        }
    }

    Ok(())
}

/// File logging only when ONBOARD_LOG names a path; stdout stays clean
/// for the raw-mode UI.
fn init_logging() {
    let Ok(path) = std::env::var("ONBOARD_LOG") else {
        return;
    };
    let file = match std::fs::File::create(&path) {
        Ok(file) => file,
        Err(err) => {
            eprintln!("could not open log file {path}: {err}");
            return;
        }
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(Arc::new(file))
        .with_ansi(false)
        .init();
}
