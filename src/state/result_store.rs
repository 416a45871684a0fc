// Result store
//
// Holds the current generation job and the most recent successful results.
// Every job is tagged with a generation counter; completions for anything but
// the current tag are dropped.

use crate::models::{DecorationRequest, GenerationJob, JobId, JobStatus, ResultSet};
use crate::services::GenerationError;
use std::sync::Arc;

#[derive(Debug, Clone, Default)]
pub struct ResultStore {
    /// Last issued generation counter value
    generation: u64,

    /// The authoritative job, if any submission has been made
    current: Option<GenerationJob>,

    /// Results of the latest job that succeeded. Kept across later pending or
    /// failed jobs so the last good result stays on screen.
    latest_results: Option<Arc<ResultSet>>,
}

impl ResultStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new pending job, superseding whatever was current
    pub fn start_job(&mut self, request: Arc<DecorationRequest>) -> JobId {
        self.generation += 1;
        let id = JobId(self.generation);

        if let Some(previous) = &self.current {
            if previous.status.is_pending() {
                tracing::debug!("{} superseded by {}", previous.id, id);
            }
        }

        self.current = Some(GenerationJob::new(id, request));
        id
    }

    /// Mark `job` succeeded if it is still current.
    ///
    /// Returns `false` (and changes nothing) for stale or already resolved jobs.
    pub fn complete_job(&mut self, job: JobId, results: ResultSet) -> bool {
        let Some(current) = self.current_pending_mut(job) else {
            return false;
        };

        let results = Arc::new(results);
        current.status = JobStatus::Succeeded(Arc::clone(&results));
        self.latest_results = Some(results);
        true
    }

    /// Mark `job` failed if it is still current.
    ///
    /// Returns `false` (and changes nothing) for stale or already resolved jobs.
    pub fn fail_job(&mut self, job: JobId, error: GenerationError) -> bool {
        let Some(current) = self.current_pending_mut(job) else {
            return false;
        };

        current.status = JobStatus::Failed(error);
        true
    }

    fn current_pending_mut(&mut self, job: JobId) -> Option<&mut GenerationJob> {
        self.current
            .as_mut()
            .filter(|current| current.id == job && current.status.is_pending())
    }

    pub fn is_current(&self, job: JobId) -> bool {
        self.current.as_ref().is_some_and(|current| current.id == job)
    }

    pub fn current(&self) -> Option<&GenerationJob> {
        self.current.as_ref()
    }

    /// Results of the current job, only when it succeeded
    pub fn current_results(&self) -> Option<&Arc<ResultSet>> {
        self.current.as_ref().and_then(|job| job.results())
    }

    pub fn current_error(&self) -> Option<&GenerationError> {
        self.current.as_ref().and_then(|job| job.error())
    }

    pub fn latest_results(&self) -> Option<&Arc<ResultSet>> {
        self.latest_results.as_ref()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}
