// State management module
//
// This module provides the Orchestrator, the single writer over the session:
// request fields, the result store and the selection. It drives the phase
// machine and emits change events for the presentation layer.

pub mod result_store;
pub mod selection;

pub use result_store::ResultStore;
pub use selection::{SelectionController, SelectionError};

use crate::metrics::Metrics;
use crate::models::{ImageData, JobId, Phase, RequestFields, ResultSet, ViewState};
use crate::services::{
    ExportDescriptor, GenerationClient, GenerationError, RequestBuilder, ValidationError,
};
use std::sync::{Arc, RwLock};
use std::time::Instant;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;

/// Change events emitted when the session is modified
///
/// These events let a presentation layer react to transitions without polling
/// [`Orchestrator::view`].
#[derive(Clone, Debug, PartialEq)]
pub enum StateChange {
    /// Request fields were edited
    FieldsEdited {
        can_submit: bool,
    },

    /// The orchestrator moved to a new phase
    PhaseChanged {
        from: Phase,
        to: Phase,
    },

    /// A submit intent failed validation; no job was started
    SubmissionRejected {
        error: ValidationError,
    },

    /// A new job became current
    JobStarted {
        job: JobId,
    },

    /// The current job succeeded
    ResultsReady {
        job: JobId,
        variants: usize,
    },

    /// The current job failed
    JobFailed {
        job: JobId,
        message: String,
    },

    /// A superseded job resolved and its outcome was dropped
    StaleCompletionDiscarded {
        job: JobId,
    },

    /// The inspected variant changed
    SelectionChanged {
        variant_id: Option<String>,
    },
}

/// Everything the orchestrator owns, guarded by one lock
#[derive(Debug, Clone, Default)]
struct Session {
    fields: RequestFields,
    phase: Phase,
    store: ResultStore,
    selection: SelectionController,
    validation_error: Option<ValidationError>,
}

/// An accepted submit intent
#[derive(Debug)]
pub struct Submission {
    /// Generation counter value of the new job
    pub job: JobId,

    /// Task awaiting the generation client. Finishes after the outcome has
    /// been applied (or discarded as stale).
    pub handle: JoinHandle<()>,
}

/// The decoration state machine
///
/// Accepts user intents (field edits, submit, select, deselect, export), drives
/// the [`Phase`] transitions and exposes a coherent [`ViewState`] snapshot.
///
/// # Concurrency
///
/// All mutations go through one `RwLock`, so intents apply in the order they
/// arrive. The generation call is the only suspension point: `submit` spawns it
/// on the runtime and returns immediately. A later submit supersedes an earlier
/// one through the [`ResultStore`] generation counter; whatever the superseded
/// call returns is discarded (last submission wins, not last completion).
///
/// # Related Types
///
/// - [`crate::services::RequestBuilder`]: validates the fields on submit
/// - [`crate::services::GenerationClient`]: the backend the job runs against
/// - [`ResultStore`]: job tracking and stale-completion filtering
/// - [`SelectionController`]: single-variant inspection and export
#[derive(Clone)]
pub struct Orchestrator {
    session: Arc<RwLock<Session>>,

    /// Broadcast channel for emitting change events
    state_tx: broadcast::Sender<StateChange>,

    client: Arc<dyn GenerationClient>,
    builder: RequestBuilder,
    runtime: tokio::runtime::Handle,
    metrics: Arc<Metrics>,
}

impl Orchestrator {
    /// Create an orchestrator that runs generation calls on `runtime`
    ///
    /// # Returns
    /// An idle orchestrator with a broadcast channel buffer of 100 events
    pub fn new(client: Arc<dyn GenerationClient>, runtime: tokio::runtime::Handle) -> Self {
        let (state_tx, _) = broadcast::channel(100);
        Self {
            session: Arc::new(RwLock::new(Session::default())),
            state_tx,
            client,
            builder: RequestBuilder::new(),
            runtime,
            metrics: Arc::new(Metrics::new()),
        }
    }

    /// Subscribe to change events
    pub fn subscribe(&self) -> broadcast::Receiver<StateChange> {
        self.state_tx.subscribe()
    }

    pub fn metrics(&self) -> Arc<Metrics> {
        Arc::clone(&self.metrics)
    }

    /// Snapshot of everything the presentation layer renders
    pub fn view(&self) -> ViewState {
        let session = self.session.read().unwrap();

        ViewState {
            phase: session.phase,
            fields: session.fields.clone(),
            can_submit: !session.phase.is_submitting()
                && self.builder.is_submittable(&session.fields),
            validation_error: session.validation_error,
            results: session.store.latest_results().cloned(),
            results_current: session.store.current_results().is_some(),
            error_message: session.store.current_error().map(|e| e.to_string()),
            selected: session
                .selection
                .resolve(session.store.current_results().map(Arc::as_ref)),
            active_job: match session.phase {
                Phase::Submitting { job } => Some(job),
                _ => None,
            },
        }
    }

    pub fn phase(&self) -> Phase {
        self.session.read().unwrap().phase
    }

    /// Apply an update to the session and emit change events
    ///
    /// 1. Captures the old session
    /// 2. Applies the update function
    /// 3. Detects what changed
    /// 4. Emits the corresponding events
    fn update<F>(&self, update_fn: F) -> Vec<StateChange>
    where
        F: FnOnce(&mut Session),
    {
        self.update_with(update_fn).1
    }

    /// Like [`update`](Self::update), also returning the closure's result
    fn update_with<F, R>(&self, update_fn: F) -> (R, Vec<StateChange>)
    where
        F: FnOnce(&mut Session) -> R,
    {
        let mut session = self.session.write().unwrap();
        let old_session = session.clone();

        let result = update_fn(&mut session);

        let changes = self.detect_changes(&old_session, &session);
        self.metrics.record_state_update();

        for change in &changes {
            self.emit(change.clone());
        }

        (result, changes)
    }

    fn emit(&self, change: StateChange) {
        // A send error only means no one is listening
        match self.state_tx.send(change) {
            Ok(_) => self.metrics.record_state_broadcast(),
            Err(_) => self.metrics.record_state_broadcast_error(),
        }
    }

    /// Detect what changed between two sessions and generate events
    fn detect_changes(&self, old: &Session, new: &Session) -> Vec<StateChange> {
        let mut changes = Vec::new();

        if old.fields != new.fields {
            changes.push(StateChange::FieldsEdited {
                can_submit: self.builder.is_submittable(&new.fields),
            });
        }

        if old.store.generation() != new.store.generation() {
            if let Some(job) = new.store.current() {
                changes.push(StateChange::JobStarted { job: job.id });
            }
        } else if let (Some(before), Some(after)) = (old.store.current(), new.store.current()) {
            if before.status.is_pending() && after.status.is_complete() {
                if let Some(results) = after.results() {
                    changes.push(StateChange::ResultsReady {
                        job: after.id,
                        variants: results.len(),
                    });
                }
                if let Some(error) = after.error() {
                    changes.push(StateChange::JobFailed {
                        job: after.id,
                        message: error.to_string(),
                    });
                }
            }
        }

        if old.phase != new.phase {
            changes.push(StateChange::PhaseChanged {
                from: old.phase,
                to: new.phase,
            });
        }

        if old.selection.selected_id() != new.selection.selected_id() {
            changes.push(StateChange::SelectionChanged {
                variant_id: new.selection.selected_id().map(str::to_string),
            });
        }

        changes
    }

    // Field edits

    /// Edit the request fields
    ///
    /// Outside `Submitting` this moves the orchestrator to `AwaitingInput`.
    /// Displayed results and errors stay until a new submission resolves.
    pub fn edit_fields<F>(&self, edit_fn: F) -> Vec<StateChange>
    where
        F: FnOnce(&mut RequestFields),
    {
        self.update(|session| {
            edit_fn(&mut session.fields);
            session.validation_error = None;
            if !session.phase.is_submitting() {
                session.phase = Phase::AwaitingInput;
            }
        })
    }

    pub fn set_image(&self, image: ImageData) -> Vec<StateChange> {
        self.edit_fields(|fields| fields.image = Some(image))
    }

    pub fn clear_image(&self) -> Vec<StateChange> {
        self.edit_fields(|fields| fields.image = None)
    }

    pub fn set_design_style(&self, style: impl Into<String>) -> Vec<StateChange> {
        let style = style.into();
        self.edit_fields(|fields| fields.design_style = style)
    }

    pub fn set_room_type(&self, room_type: impl Into<String>) -> Vec<StateChange> {
        let room_type = room_type.into();
        self.edit_fields(|fields| fields.room_type = room_type)
    }

    pub fn set_color_preference(&self, color: impl Into<String>) -> Vec<StateChange> {
        let color = color.into();
        self.edit_fields(|fields| fields.color_preference = color)
    }

    pub fn set_preserve_existing_furniture(&self, preserve: bool) -> Vec<StateChange> {
        self.edit_fields(|fields| fields.preserve_existing_furniture = Some(preserve))
    }

    // Submission

    /// Handle a submit intent
    ///
    /// On validation failure the phase is unchanged, no job is created and
    /// the client is never called. On success the new job supersedes any
    /// pending one, the selection is cleared, and the generation call is
    /// spawned on the runtime.
    ///
    /// # Errors
    /// [`ValidationError::MissingImage`] or [`ValidationError::MissingStyle`]
    pub fn submit(&self) -> Result<Submission, ValidationError> {
        let (outcome, _) = self.update_with(|session| {
            let request = match self.builder.build(&session.fields) {
                Ok(request) => Arc::new(request),
                Err(error) => {
                    session.validation_error = Some(error);
                    return Err(error);
                }
            };

            let job = session.store.start_job(Arc::clone(&request));
            session.selection.clear();
            session.validation_error = None;
            session.phase = Phase::Submitting { job };
            Ok((job, request))
        });

        let (job, request) = match outcome {
            Ok(started) => started,
            Err(error) => {
                tracing::info!("Submission rejected: {}", error);
                self.metrics.record_submission_rejected();
                self.emit(StateChange::SubmissionRejected { error });
                return Err(error);
            }
        };

        tracing::info!(
            "Submitting {}: style={}, room={}, color={}, preserve_furniture={}",
            job,
            request.design_style,
            request
                .room_type
                .as_ref()
                .map(|r| r.as_str())
                .unwrap_or("-"),
            request
                .color_preference
                .as_ref()
                .map(|c| c.as_str())
                .unwrap_or("-"),
            request.preserve_existing_furniture
        );
        self.metrics.record_submission_started();

        let orchestrator = self.clone();
        let handle = self.runtime.spawn(async move {
            let started = Instant::now();
            let outcome = orchestrator.client.submit(request).await;
            orchestrator.metrics.record_generation_time(started.elapsed());
            orchestrator.resolve(job, outcome);
        });

        Ok(Submission { job, handle })
    }

    /// Apply the outcome of `job`'s generation call
    ///
    /// Returns `false` when the job is no longer current; its outcome is
    /// dropped and nothing visible changes.
    fn resolve(&self, job: JobId, outcome: Result<ResultSet, GenerationError>) -> bool {
        let succeeded = outcome.is_ok();

        let (applied, _) = self.update_with(|session| match outcome {
            Ok(results) => {
                let variants = results.len();
                let accepted = session.store.complete_job(job, results);
                if accepted {
                    tracing::info!("{} succeeded with {} variants", job, variants);
                    session.phase = Phase::Ready;
                }
                accepted
            }
            Err(error) => {
                let message = error.to_string();
                let accepted = session.store.fail_job(job, error);
                if accepted {
                    tracing::warn!("{} failed: {}", job, message);
                    session.phase = Phase::Failed;
                }
                accepted
            }
        });

        if !applied {
            tracing::debug!("Discarding completion of superseded {}", job);
            self.metrics.record_stale_completion();
            self.emit(StateChange::StaleCompletionDiscarded { job });
        } else if succeeded {
            self.metrics.record_generation_succeeded();
        } else {
            self.metrics.record_generation_failed();
        }

        applied
    }

    // Selection

    /// Inspect one variant of the current results
    ///
    /// # Errors
    /// [`SelectionError::UnknownVariant`] if the id is not in the current
    /// job's successful results. The previous selection is kept.
    pub fn select(&self, variant_id: &str) -> Result<(), SelectionError> {
        let (result, _) = self.update_with(|session| {
            session
                .selection
                .select(session.store.current_results().map(Arc::as_ref), variant_id)
        });

        match &result {
            Ok(()) => tracing::debug!("Selected variant {}", variant_id),
            Err(error) => tracing::warn!("Rejected selection: {}", error),
        }

        result
    }

    /// Close the detail view. Always safe.
    pub fn deselect(&self) -> Vec<StateChange> {
        self.update(|session| session.selection.clear())
    }

    /// Describe the selected variant for download
    ///
    /// # Errors
    /// [`SelectionError::NoSelection`] when nothing is selected
    pub fn export_selected(&self) -> Result<ExportDescriptor, SelectionError> {
        let session = self.session.read().unwrap();
        let descriptor = session
            .selection
            .export_selected(session.store.current_results().map(Arc::as_ref))?;

        self.metrics.record_export();
        Ok(descriptor)
    }

    /// Describe any displayed variant for download, without selecting it
    ///
    /// # Errors
    /// [`SelectionError::UnknownVariant`] if no displayed variant has this id
    pub fn export_variant(&self, variant_id: &str) -> Result<ExportDescriptor, SelectionError> {
        let session = self.session.read().unwrap();
        let variant = session
            .store
            .latest_results()
            .and_then(|results| results.find(variant_id))
            .ok_or_else(|| SelectionError::UnknownVariant(variant_id.to_string()))?;

        self.metrics.record_export();
        Ok(ExportDescriptor::for_variant(variant))
    }
}
