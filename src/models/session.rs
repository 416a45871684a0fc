use super::job::JobId;
use super::request::RequestFields;
use super::variant::{DecorationVariant, ResultSet};
use crate::services::ValidationError;
use std::fmt;
use std::sync::Arc;

/// Orchestrator state.
///
/// A single discriminated value: the orchestrator is in exactly one phase, and
/// only `Submitting` knows which job it is waiting on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    /// Nothing entered yet
    #[default]
    Idle,
    /// Fields are being edited; may or may not be submittable
    AwaitingInput,
    /// A validated request is in flight
    Submitting { job: JobId },
    /// The last submission produced variants
    Ready,
    /// The last submission errored
    Failed,
}

impl Phase {
    pub fn is_submitting(&self) -> bool {
        matches!(self, Phase::Submitting { .. })
    }

    pub fn name(&self) -> &'static str {
        match self {
            Phase::Idle => "idle",
            Phase::AwaitingInput => "awaiting_input",
            Phase::Submitting { .. } => "submitting",
            Phase::Ready => "ready",
            Phase::Failed => "failed",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Submitting { job } => write!(f, "submitting ({})", job),
            other => f.write_str(other.name()),
        }
    }
}

/// Read-only snapshot handed to the presentation layer.
///
/// Everything a renderer needs: which phase we are in, whether the submit
/// button is enabled, the results to show and the variant under inspection.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewState {
    pub phase: Phase,
    pub fields: RequestFields,
    /// Fields are complete and nothing is in flight
    pub can_submit: bool,
    /// Why the last submit attempt was refused, if it was
    pub validation_error: Option<ValidationError>,
    /// Most recent successful results. Stays visible while a newer
    /// submission is pending, after a failure and across field edits.
    pub results: Option<Arc<ResultSet>>,
    /// `results` came from the current job. Only then can its variants be
    /// selected for inspection.
    pub results_current: bool,
    /// Message of the current job's failure
    pub error_message: Option<String>,
    pub selected: Option<Arc<DecorationVariant>>,
    pub active_job: Option<JobId>,
}

impl ViewState {
    pub fn is_loading(&self) -> bool {
        self.phase.is_submitting()
    }

    pub fn variant_count(&self) -> usize {
        self.results.as_ref().map(|r| r.len()).unwrap_or(0)
    }
}
