//! Background request tasks for the event loop.

use crate::app::{App, Completion, Job};
use tokio::task::JoinHandle;
use tracing::warn;
use turntable_engine::TurntableClient;

/// Runs queued [`Job`]s on the tokio runtime and feeds results back to the app.
pub struct JobRunner {
    client: TurntableClient,
    handles: Vec<JoinHandle<Completion>>,
}

impl JobRunner {
    pub fn new(client: TurntableClient) -> Self {
        Self {
            client,
            handles: Vec::new(),
        }
    }

    /// Spawn a task for every job the app queued.
    pub fn spawn_pending(&mut self, app: &mut App) {
        for job in app.take_jobs() {
            let client = self.client.clone();
            self.handles.push(tokio::spawn(run_job(client, job)));
        }
    }

    /// Apply finished tasks without blocking on running ones.
    pub async fn collect_finished(&mut self, app: &mut App) {
        let mut completed = Vec::new();
        for (i, handle) in self.handles.iter().enumerate() {
            if handle.is_finished() {
                completed.push(i);
            }
        }
        for i in completed.into_iter().rev() {
            match self.handles.remove(i).await {
                Ok(completion) => app.complete(completion),
                Err(e) => warn!(error = %e, "request task failed"),
            }
        }
    }

    /// Abort any remaining tasks.
    pub fn abort_all(&mut self) {
        for handle in self.handles.drain(..) {
            handle.abort();
        }
    }
}

async fn run_job(client: TurntableClient, job: Job) -> Completion {
    match job {
        Job::Submit { origin, id, body } => Completion::Submit {
            origin,
            id,
            result: client.send_timeline(&body).await,
        },
        Job::Health => Completion::Health(client.health().await),
    }
}
