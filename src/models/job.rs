use super::request::DecorationRequest;
use super::variant::ResultSet;
use crate::services::GenerationError;
use std::fmt;
use std::sync::Arc;

/// Generation counter value identifying one submission.
///
/// Ids increase monotonically per [`crate::state::ResultStore`]; only the
/// most recently issued id is authoritative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct JobId(pub u64);

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "job-{}", self.0)
    }
}

/// Lifecycle status of a generation job.
///
/// Results and errors live inside the variant that owns them, so a job can
/// never be "succeeded with an error" or "failed with results".
#[derive(Debug, Clone, PartialEq)]
pub enum JobStatus {
    Pending,
    Succeeded(Arc<ResultSet>),
    Failed(GenerationError),
}

impl JobStatus {
    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }

    pub fn is_complete(&self) -> bool {
        !self.is_pending()
    }
}

/// One submission, from dispatch to resolution
#[derive(Debug, Clone)]
pub struct GenerationJob {
    pub id: JobId,
    pub request: Arc<DecorationRequest>,
    pub status: JobStatus,
}

impl GenerationJob {
    pub fn new(id: JobId, request: Arc<DecorationRequest>) -> Self {
        Self {
            id,
            request,
            status: JobStatus::Pending,
        }
    }

    pub fn results(&self) -> Option<&Arc<ResultSet>> {
        match &self.status {
            JobStatus::Succeeded(results) => Some(results),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&GenerationError> {
        match &self.status {
            JobStatus::Failed(error) => Some(error),
            _ => None,
        }
    }
}
