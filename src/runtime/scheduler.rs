use crate::runtime::event::AppEvent;
use std::collections::{HashMap, VecDeque};
use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub enum SchedulerCommand {
    EmitNow(AppEvent),
    EmitAfter {
        key: String,
        delay: Duration,
        event: AppEvent,
    },
    /// Replaces any pending event under `key`: only the last burst entry
    /// survives the window.
    Debounce {
        key: String,
        delay: Duration,
        event: AppEvent,
    },
    Cancel {
        key: String,
    },
}

#[derive(Debug, Clone)]
struct Guard {
    key: String,
    version: u64,
}

#[derive(Debug, Clone)]
struct DelayedTask {
    due_at: Instant,
    guard: Guard,
    event: AppEvent,
}

/// Monotonic delay queue for the event loop. Debounce works by version:
/// re-scheduling a key bumps its version, which orphans every task queued
/// under the old one.
#[derive(Default)]
pub struct Scheduler {
    ready: VecDeque<AppEvent>,
    delayed: Vec<DelayedTask>,
    key_versions: HashMap<String, u64>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, command: SchedulerCommand, now: Instant) {
        match command {
            SchedulerCommand::EmitNow(event) => {
                self.ready.push_back(event);
            }
            SchedulerCommand::EmitAfter { key, delay, event } => {
                let version = *self.key_versions.entry(key.clone()).or_insert(0);
                self.delayed.push(DelayedTask {
                    due_at: now + delay,
                    guard: Guard { key, version },
                    event,
                });
            }
            SchedulerCommand::Debounce { key, delay, event } => {
                let version = self.bump_version(&key);
                self.delayed.push(DelayedTask {
                    due_at: now + delay,
                    guard: Guard { key, version },
                    event,
                });
            }
            SchedulerCommand::Cancel { key } => {
                self.bump_version(&key);
            }
        }
    }

    pub fn drain_ready(&mut self, now: Instant) -> Vec<AppEvent> {
        let mut idx = 0usize;
        while idx < self.delayed.len() {
            if self.delayed[idx].due_at <= now {
                let task = self.delayed.swap_remove(idx);
                if self.task_is_current(&task) {
                    self.ready.push_back(task.event);
                }
            } else {
                idx += 1;
            }
        }

        self.ready.drain(..).collect()
    }

    pub fn poll_timeout(&self, now: Instant, default_timeout: Duration) -> Duration {
        if !self.ready.is_empty() {
            return Duration::ZERO;
        }

        let mut next = default_timeout;
        for task in &self.delayed {
            let due_in = task.due_at.saturating_duration_since(now);
            if due_in < next {
                next = due_in;
            }
        }
        next
    }

    fn task_is_current(&self, task: &DelayedTask) -> bool {
        let current = *self.key_versions.get(&task.guard.key).unwrap_or(&0);
        current == task.guard.version
    }

    fn bump_version(&mut self, key: &str) -> u64 {
        let entry = self.key_versions.entry(key.to_string()).or_insert(0);
        *entry = entry.saturating_add(1);
        *entry
    }
}

#[cfg(test)]
mod tests {
    use super::{Scheduler, SchedulerCommand};
    use crate::runtime::event::{AppEvent, SystemEvent};
    use std::time::{Duration, Instant};

    fn check_due(value: &str) -> AppEvent {
        AppEvent::System(SystemEvent::CheckDue {
            id: "account_setup.username".to_string(),
            value: value.to_string(),
        })
    }

    fn due_value(event: &AppEvent) -> &str {
        match event {
            AppEvent::System(SystemEvent::CheckDue { value, .. }) => value.as_str(),
            _ => panic!("unexpected event"),
        }
    }

    #[test]
    fn debounce_keeps_only_the_last_burst_entry() {
        let mut scheduler = Scheduler::new();
        let start = Instant::now();
        let window = Duration::from_millis(500);

        // "a" then "b" inside one debounce window.
        scheduler.schedule(
            SchedulerCommand::Debounce {
                key: "u".to_string(),
                delay: window,
                event: check_due("a"),
            },
            start,
        );
        scheduler.schedule(
            SchedulerCommand::Debounce {
                key: "u".to_string(),
                delay: window,
                event: check_due("b"),
            },
            start + Duration::from_millis(100),
        );

        let fired = scheduler.drain_ready(start + Duration::from_secs(1));
        assert_eq!(fired.len(), 1);
        assert_eq!(due_value(&fired[0]), "b");
    }

    #[test]
    fn cancel_orphans_pending_tasks() {
        let mut scheduler = Scheduler::new();
        let start = Instant::now();

        scheduler.schedule(
            SchedulerCommand::Debounce {
                key: "u".to_string(),
                delay: Duration::from_millis(10),
                event: check_due("a"),
            },
            start,
        );
        scheduler.schedule(
            SchedulerCommand::Cancel {
                key: "u".to_string(),
            },
            start,
        );

        assert!(scheduler.drain_ready(start + Duration::from_secs(1)).is_empty());
    }

    #[test]
    fn nothing_fires_before_the_window_elapses() {
        let mut scheduler = Scheduler::new();
        let start = Instant::now();

        scheduler.schedule(
            SchedulerCommand::Debounce {
                key: "u".to_string(),
                delay: Duration::from_millis(500),
                event: check_due("a"),
            },
            start,
        );

        assert!(
            scheduler
                .drain_ready(start + Duration::from_millis(100))
                .is_empty()
        );
        assert_eq!(
            scheduler.drain_ready(start + Duration::from_millis(600)).len(),
            1
        );
    }

    #[test]
    fn poll_timeout_tracks_nearest_deadline() {
        let mut scheduler = Scheduler::new();
        let start = Instant::now();
        let default = Duration::from_millis(120);

        assert_eq!(scheduler.poll_timeout(start, default), default);

        scheduler.schedule(
            SchedulerCommand::EmitAfter {
                key: "t".to_string(),
                delay: Duration::from_millis(40),
                event: AppEvent::Tick,
            },
            start,
        );
        assert_eq!(
            scheduler.poll_timeout(start, default),
            Duration::from_millis(40)
        );

        scheduler.schedule(SchedulerCommand::EmitNow(AppEvent::Tick), start);
        assert_eq!(scheduler.poll_timeout(start, default), Duration::ZERO);
    }
}
