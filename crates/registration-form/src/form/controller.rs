use std::sync::{Arc, Mutex};
use std::time::Duration;

use chrono::Utc;
use tokio::runtime::Handle;
use tokio::sync::watch;
use tracing::{debug, info, warn};

use super::domain::{
    FormState, ResumeFile, SubmissionState, TextField, TimeSlot, UnknownField, UnknownTimeSlot,
    ValidationErrors,
};
use super::preview::{InMemoryPreviewStore, PreviewStore};
use super::scheduler::ScheduledTask;
use super::state::{reduce, EditPolicy, Effect, FormEvent, IgnoreReason, Outcome, Transition};
use super::validation::validate;
use super::view::FormView;
use crate::config::SubmissionConfig;

/// Error raised by the form controller. None of these are fatal; the form stays usable.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormError {
    #[error("form has validation errors: {0}")]
    Validation(ValidationErrors),
    #[error(transparent)]
    UnknownField(#[from] UnknownField),
    #[error(transparent)]
    UnknownTimeSlot(#[from] UnknownTimeSlot),
    #[error("inputs are locked while the registration is being submitted")]
    EditsFrozen,
    #[error("the registration has already been submitted")]
    AlreadySubmitted,
    #[error("the form can only be reset after a submission completes")]
    ResetUnavailable,
    #[error("submitting needs a running tokio runtime to time the round-trip")]
    RuntimeUnavailable,
}

struct Shared {
    state: Mutex<FormState>,
    status: watch::Sender<SubmissionState>,
}

impl Shared {
    fn dispatch(&self, event: FormEvent, policy: &EditPolicy) -> (Vec<Effect>, Outcome) {
        let mut guard = self.state.lock().expect("form state mutex poisoned");
        let previous = std::mem::take(&mut *guard);
        let Transition {
            state,
            effects,
            outcome,
        } = reduce(previous, event, policy);
        let submission = state.submission;
        *guard = state;
        drop(guard);

        self.status.send_if_modified(|current| {
            if *current == submission {
                return false;
            }
            *current = submission;
            true
        });
        (effects, outcome)
    }
}

/// Owns one registration form and turns host input events into state transitions.
///
/// The simulated submission completes on a tokio timer. Outside a runtime,
/// [`FormController::submit`] refuses a valid form with [`FormError::RuntimeUnavailable`].
/// Dropping the controller cancels a pending completion and releases the current resume preview.
pub struct FormController<P: PreviewStore = InMemoryPreviewStore> {
    shared: Arc<Shared>,
    previews: Arc<P>,
    policy: EditPolicy,
    delay: Duration,
    pending: Option<ScheduledTask>,
}

impl FormController<InMemoryPreviewStore> {
    pub fn new(config: &SubmissionConfig) -> Self {
        Self::with_store(config, Arc::new(InMemoryPreviewStore::default()))
    }
}

impl<P: PreviewStore> FormController<P> {
    pub fn with_store(config: &SubmissionConfig, previews: Arc<P>) -> Self {
        let (status, _) = watch::channel(SubmissionState::Editing);
        Self {
            shared: Arc::new(Shared {
                state: Mutex::new(FormState::default()),
                status,
            }),
            previews,
            policy: EditPolicy::from(config),
            delay: config.delay(),
            pending: None,
        }
    }

    pub fn update_field(
        &mut self,
        field: TextField,
        value: impl Into<String>,
    ) -> Result<(), FormError> {
        into_result(self.apply(FormEvent::FieldEdited {
            field,
            value: value.into(),
        }))
        .inspect(|_| debug!(field = %field.field(), "text field edited"))
    }

    /// Same as [`update_field`](Self::update_field) for hosts that address inputs by name.
    pub fn update_field_named(
        &mut self,
        name: &str,
        value: impl Into<String>,
    ) -> Result<(), FormError> {
        let field = name.parse::<TextField>()?;
        self.update_field(field, value)
    }

    pub fn set_resume(&mut self, file: ResumeFile) -> Result<(), FormError> {
        if !file.matches_accept_filter() {
            warn!(
                file = %file.file_name,
                media_type = %file.media_type,
                "resume does not match the picker filter; attaching anyway"
            );
        }
        let preview = file
            .is_previewable()
            .then(|| self.previews.create(&file));
        debug!(file = %file.file_name, previewable = preview.is_some(), "resume selected");
        into_result(self.apply(FormEvent::ResumeSelected { file, preview }))
    }

    pub fn toggle_time_slot(&mut self, slot: TimeSlot) -> Result<(), FormError> {
        into_result(self.apply(FormEvent::TimeSlotToggled(slot)))
            .inspect(|_| debug!(%slot, "time slot toggled"))
    }

    pub fn toggle_time_slot_label(&mut self, label: &str) -> Result<(), FormError> {
        let slot = label.parse::<TimeSlot>()?;
        self.toggle_time_slot(slot)
    }

    /// Checks the current values without recording anything on the form.
    pub fn validate(&self) -> ValidationErrors {
        validate(&self.lock().data)
    }

    /// Starts the simulated submission. While one is in flight, further calls return
    /// `Ok(Submitting)` and change nothing.
    pub fn submit(&mut self) -> Result<SubmissionState, FormError> {
        let runtime = Handle::try_current().ok();
        if runtime.is_none() && self.submit_would_schedule() {
            warn!("submit refused; no tokio runtime to complete it on");
            return Err(FormError::RuntimeUnavailable);
        }
        match self.apply_with(FormEvent::SubmitRequested, runtime.as_ref()) {
            Outcome::Applied => {
                info!(delay_ms = self.delay.as_millis() as u64, "registration submitting");
                Ok(SubmissionState::Submitting)
            }
            Outcome::Ignored(IgnoreReason::AlreadySubmitting) => {
                debug!("submit ignored; submission already in flight");
                Ok(SubmissionState::Submitting)
            }
            Outcome::Rejected(errors) => {
                info!(failing = errors.len(), "registration rejected by validation");
                Err(FormError::Validation(errors))
            }
            Outcome::Ignored(reason) => Err(ignored_error(reason)),
        }
    }

    /// Starts a fresh registration after the previous one was confirmed.
    pub fn reset(&mut self) -> Result<(), FormError> {
        let outcome = self.apply(FormEvent::ResetRequested);
        if outcome == Outcome::Applied {
            self.pending = None;
            info!("registration form reset");
        }
        into_result(outcome)
    }

    pub fn state(&self) -> FormState {
        self.lock().clone()
    }

    pub fn submission_state(&self) -> SubmissionState {
        self.lock().submission
    }

    pub fn errors(&self) -> ValidationErrors {
        self.lock().errors.clone()
    }

    pub fn view(&self) -> FormView {
        FormView::project(&self.lock())
    }

    pub fn previews(&self) -> &Arc<P> {
        &self.previews
    }

    pub fn subscribe(&self) -> watch::Receiver<SubmissionState> {
        self.shared.status.subscribe()
    }

    /// Resolves once no submission is in flight.
    pub async fn wait_until_settled(&self) -> SubmissionState {
        let mut status = self.subscribe();
        let settled = match status
            .wait_for(|state| *state != SubmissionState::Submitting)
            .await
        {
            Ok(state) => *state,
            Err(_) => self.submission_state(),
        };
        settled
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, FormState> {
        self.shared.state.lock().expect("form state mutex poisoned")
    }

    fn submit_would_schedule(&self) -> bool {
        let current = self.state();
        reduce(current, FormEvent::SubmitRequested, &self.policy)
            .effects
            .contains(&Effect::ScheduleSubmission)
    }

    fn apply(&mut self, event: FormEvent) -> Outcome {
        self.apply_with(event, None)
    }

    fn apply_with(&mut self, event: FormEvent, runtime: Option<&Handle>) -> Outcome {
        let (effects, outcome) = self.shared.dispatch(event, &self.policy);
        for effect in effects {
            match effect {
                Effect::ScheduleSubmission => match runtime {
                    Some(runtime) => self.schedule_completion(runtime),
                    None => warn!("no runtime to schedule the submission on"),
                },
                Effect::ReleasePreview(preview) => self.previews.release(&preview),
            }
        }
        outcome
    }

    fn schedule_completion(&mut self, runtime: &Handle) {
        let shared = Arc::downgrade(&self.shared);
        let policy = self.policy;
        self.pending = Some(ScheduledTask::after(runtime, self.delay, async move {
            let Some(shared) = shared.upgrade() else {
                return;
            };
            // Completion never yields effects.
            let (_, outcome) =
                shared.dispatch(FormEvent::SubmissionCompleted { at: Utc::now() }, &policy);
            if outcome == Outcome::Applied {
                info!("registration submitted");
            }
        }));
    }
}

impl<P: PreviewStore> Drop for FormController<P> {
    fn drop(&mut self) {
        if let Some(task) = self.pending.take() {
            task.cancel();
        }
        let preview = match self.shared.state.lock() {
            Ok(mut guard) => guard.preview.take(),
            Err(poisoned) => poisoned.into_inner().preview.take(),
        };
        if let Some(preview) = preview {
            self.previews.release(&preview);
        }
    }
}

fn into_result(outcome: Outcome) -> Result<(), FormError> {
    match outcome {
        Outcome::Applied => Ok(()),
        Outcome::Rejected(errors) => Err(FormError::Validation(errors)),
        Outcome::Ignored(reason) => Err(ignored_error(reason)),
    }
}

fn ignored_error(reason: IgnoreReason) -> FormError {
    match reason {
        IgnoreReason::EditsFrozen | IgnoreReason::AlreadySubmitting => FormError::EditsFrozen,
        IgnoreReason::FormSubmitted | IgnoreReason::NotSubmitting => FormError::AlreadySubmitted,
        IgnoreReason::NotSubmitted => FormError::ResetUnavailable,
    }
}
