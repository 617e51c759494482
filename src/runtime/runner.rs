use crate::app::OnboardingApp;
use crate::runtime::event::{AppEvent, Effect, SystemEvent};
use crate::runtime::scheduler::Scheduler;
use crate::task::JobExecutor;
use crate::terminal::{Terminal, TerminalEvent};
use crate::ui::renderer::Renderer;
use std::io;
use std::time::{Duration, Instant};

const DEFAULT_POLL_TIMEOUT: Duration = Duration::from_millis(120);

/// Single-threaded event loop: terminal input, scheduler deadlines, and
/// worker completions all funnel through the app's dispatcher.
pub struct Runtime {
    app: OnboardingApp,
    terminal: Terminal,
    scheduler: Scheduler,
    executor: JobExecutor,
}

impl Runtime {
    pub fn new(app: OnboardingApp, terminal: Terminal) -> Self {
        Self {
            app,
            terminal,
            scheduler: Scheduler::new(),
            executor: JobExecutor::new(),
        }
    }

    pub fn run(mut self) -> io::Result<OnboardingApp> {
        self.terminal.enter()?;
        let run_result = self.event_loop();
        let exit_result = self.terminal.exit();
        run_result.and(exit_result)?;
        Ok(self.app)
    }

    fn event_loop(&mut self) -> io::Result<()> {
        self.render()?;

        while !self.app.should_exit() {
            for completion in self.executor.drain_ready() {
                self.dispatch(AppEvent::System(SystemEvent::JobFinished(completion)))?;
            }
            for event in self.scheduler.drain_ready(Instant::now()) {
                self.dispatch(event)?;
            }
            if self.app.should_exit() {
                break;
            }

            let timeout = self
                .scheduler
                .poll_timeout(Instant::now(), DEFAULT_POLL_TIMEOUT);
            match self.terminal.poll_event(timeout)? {
                Some(TerminalEvent::Key(key)) => self.dispatch(AppEvent::Key(key))?,
                Some(TerminalEvent::Resize { .. }) => self.render()?,
                None => self.dispatch(AppEvent::Tick)?,
            }
        }

        Ok(())
    }

    fn dispatch(&mut self, event: AppEvent) -> io::Result<()> {
        let effects = self.app.handle_event(event);
        self.apply_effects(effects)
    }

    fn apply_effects(&mut self, effects: Vec<Effect>) -> io::Result<()> {
        let mut render_requested = false;
        for effect in effects {
            match effect {
                Effect::Schedule(command) => self.scheduler.schedule(command, Instant::now()),
                Effect::Spawn(job) => self.executor.spawn(job),
                Effect::Render => render_requested = true,
            }
        }
        if render_requested {
            self.render()?;
        }
        Ok(())
    }

    fn render(&mut self) -> io::Result<()> {
        let frame = Renderer::render(&self.app, self.terminal.size());
        self.terminal.render(&frame.lines, frame.cursor)
    }
}
