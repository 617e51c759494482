use crate::schema::Probe;
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::time::Duration;

#[derive(Debug, Clone)]
pub enum JobOutcome {
    Availability(Result<bool, String>),
    Uploaded(String),
}

#[derive(Debug, Clone)]
pub struct JobCompletion {
    pub id: String,
    pub seq: u64,
    pub outcome: JobOutcome,
}

pub enum JobKind {
    /// Run the injected uniqueness predicate against `value`.
    Check { probe: Probe, value: String },
    /// Simulated upload: sleep, then hand back the placeholder URL.
    Upload { delay: Duration, url: String },
}

pub struct Job {
    pub id: String,
    pub seq: u64,
    pub kind: JobKind,
}

/// Runs jobs on worker threads; completions come back through a channel
/// drained by the event loop, so the UI thread never blocks on them.
pub struct JobExecutor {
    completion_tx: Sender<JobCompletion>,
    completion_rx: Receiver<JobCompletion>,
}

impl JobExecutor {
    pub fn new() -> Self {
        let (completion_tx, completion_rx) = mpsc::channel::<JobCompletion>();
        Self {
            completion_tx,
            completion_rx,
        }
    }

    pub fn spawn(&self, job: Job) {
        let completion_tx = self.completion_tx.clone();
        std::thread::spawn(move || {
            let completion = run_job(job);
            let _ = completion_tx.send(completion);
        });
    }

    pub fn drain_ready(&self) -> Vec<JobCompletion> {
        let mut out = Vec::new();
        loop {
            match self.completion_rx.try_recv() {
                Ok(completion) => out.push(completion),
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }
        out
    }
}

impl Default for JobExecutor {
    fn default() -> Self {
        Self::new()
    }
}

fn run_job(job: Job) -> JobCompletion {
    let outcome = match job.kind {
        JobKind::Check { probe, value } => JobOutcome::Availability(probe(value.as_str())),
        JobKind::Upload { delay, url } => {
            std::thread::sleep(delay);
            JobOutcome::Uploaded(url)
        }
    };
    JobCompletion {
        id: job.id,
        seq: job.seq,
        outcome,
    }
}

#[cfg(test)]
mod tests {
    use super::{Job, JobExecutor, JobKind, JobOutcome};
    use std::sync::Arc;
    use std::time::{Duration, Instant};

    #[test]
    fn check_job_reports_predicate_answer() {
        let executor = JobExecutor::new();
        executor.spawn(Job {
            id: "account_setup.username".to_string(),
            seq: 7,
            kind: JobKind::Check {
                probe: Arc::new(|value: &str| Ok(value != "admin")),
                value: "admin".to_string(),
            },
        });

        let completion = wait_for_one(&executor);
        assert_eq!(completion.id, "account_setup.username");
        assert_eq!(completion.seq, 7);
        match completion.outcome {
            JobOutcome::Availability(Ok(false)) => {}
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[test]
    fn upload_job_delivers_url_after_delay() {
        let executor = JobExecutor::new();
        executor.spawn(Job {
            id: "personal_information.avatar".to_string(),
            seq: 1,
            kind: JobKind::Upload {
                delay: Duration::from_millis(10),
                url: "https://picsum.photos/400/400?random=1".to_string(),
            },
        });

        let completion = wait_for_one(&executor);
        match completion.outcome {
            JobOutcome::Uploaded(url) => assert!(url.starts_with("https://picsum.photos/")),
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    fn wait_for_one(executor: &JobExecutor) -> super::JobCompletion {
        let deadline = Instant::now() + Duration::from_secs(2);
        loop {
            if let Some(completion) = executor.drain_ready().into_iter().next() {
                return completion;
            }
            if Instant::now() > deadline {
                panic!("no completion before deadline");
            }
            std::thread::sleep(Duration::from_millis(5));
        }
    }
}
