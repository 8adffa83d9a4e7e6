//! Pure transition function for the registration form.
//!
//! `reduce` takes the previous state and one user or timer event and returns the next state
//! together with the side effects the owner must perform. It never touches clocks, timers or
//! preview handles itself, so every transition can be asserted without a runtime.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::domain::{
    Confirmation, Field, FormData, FormState, ResumeFile, SubmissionState, TextField, TimeSlot,
    ValidationErrors,
};
use super::preview::PreviewRef;
use super::validation::{is_form_whitespace, validate};
use crate::config::SubmissionConfig;

/// Controls whether inputs stay editable while a submission is in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EditPolicy {
    pub freeze_while_submitting: bool,
}

impl Default for EditPolicy {
    fn default() -> Self {
        Self {
            freeze_while_submitting: true,
        }
    }
}

impl From<&SubmissionConfig> for EditPolicy {
    fn from(config: &SubmissionConfig) -> Self {
        Self {
            freeze_while_submitting: config.freeze_while_submitting,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormEvent {
    FieldEdited {
        field: TextField,
        value: String,
    },
    /// `preview` is created by the owner before dispatch when the file is a PDF.
    ResumeSelected {
        file: ResumeFile,
        preview: Option<PreviewRef>,
    },
    TimeSlotToggled(TimeSlot),
    SubmitRequested,
    SubmissionCompleted {
        at: DateTime<Utc>,
    },
    ResetRequested,
}

/// Work the owner of the state performs after a transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    ScheduleSubmission,
    ReleasePreview(PreviewRef),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IgnoreReason {
    EditsFrozen,
    FormSubmitted,
    AlreadySubmitting,
    NotSubmitting,
    NotSubmitted,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Applied,
    Rejected(ValidationErrors),
    Ignored(IgnoreReason),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub state: FormState,
    pub effects: Vec<Effect>,
    pub outcome: Outcome,
}

impl Transition {
    fn applied(state: FormState, effects: Vec<Effect>) -> Self {
        Self {
            state,
            effects,
            outcome: Outcome::Applied,
        }
    }

    fn ignored(state: FormState, reason: IgnoreReason, effects: Vec<Effect>) -> Self {
        Self {
            state,
            effects,
            outcome: Outcome::Ignored(reason),
        }
    }
}

fn edit_blocked(state: &FormState, policy: &EditPolicy) -> Option<IgnoreReason> {
    match state.submission {
        SubmissionState::Editing => None,
        SubmissionState::Submitting if policy.freeze_while_submitting => {
            Some(IgnoreReason::EditsFrozen)
        }
        SubmissionState::Submitting => None,
        SubmissionState::Submitted => Some(IgnoreReason::FormSubmitted),
    }
}

pub fn reduce(mut state: FormState, event: FormEvent, policy: &EditPolicy) -> Transition {
    match event {
        FormEvent::FieldEdited { field, value } => {
            if let Some(reason) = edit_blocked(&state, policy) {
                return Transition::ignored(state, reason, Vec::new());
            }
            match field {
                TextField::Name => state.data.name = value,
                TextField::Email => state.data.email = value,
            }
            // Optimistic: the new value is not re-validated until the next submit.
            state.errors.clear(field.field());
            Transition::applied(state, Vec::new())
        }
        FormEvent::ResumeSelected { file, preview } => {
            if let Some(reason) = edit_blocked(&state, policy) {
                let effects = preview.into_iter().map(Effect::ReleasePreview).collect();
                return Transition::ignored(state, reason, effects);
            }
            let mut effects = Vec::new();
            let preview = match preview {
                Some(stray) if !file.is_previewable() => {
                    effects.push(Effect::ReleasePreview(stray));
                    None
                }
                preview => preview,
            };
            state.data.resume = Some(file);
            if let Some(old) = std::mem::replace(&mut state.preview, preview) {
                if state.preview.as_ref() != Some(&old) {
                    effects.push(Effect::ReleasePreview(old));
                }
            }
            state.errors.clear(Field::Resume);
            Transition::applied(state, effects)
        }
        FormEvent::TimeSlotToggled(slot) => {
            if let Some(reason) = edit_blocked(&state, policy) {
                return Transition::ignored(state, reason, Vec::new());
            }
            if !state.data.time_slots.remove(&slot) {
                state.data.time_slots.insert(slot);
            }
            state.errors.clear(Field::TimeSlots);
            Transition::applied(state, Vec::new())
        }
        FormEvent::SubmitRequested => match state.submission {
            SubmissionState::Submitting => {
                Transition::ignored(state, IgnoreReason::AlreadySubmitting, Vec::new())
            }
            SubmissionState::Submitted => {
                Transition::ignored(state, IgnoreReason::FormSubmitted, Vec::new())
            }
            SubmissionState::Editing => {
                let errors = validate(&state.data);
                if errors.is_empty() {
                    state.errors = errors;
                    state.submission = SubmissionState::Submitting;
                    Transition::applied(state, vec![Effect::ScheduleSubmission])
                } else {
                    state.errors = errors.clone();
                    Transition {
                        state,
                        effects: Vec::new(),
                        outcome: Outcome::Rejected(errors),
                    }
                }
            }
        },
        FormEvent::SubmissionCompleted { at } => {
            if state.submission != SubmissionState::Submitting {
                return Transition::ignored(state, IgnoreReason::NotSubmitting, Vec::new());
            }
            state.confirmation = Some(confirmation(&state.data, at));
            state.submission = SubmissionState::Submitted;
            Transition::applied(state, Vec::new())
        }
        FormEvent::ResetRequested => {
            if state.submission != SubmissionState::Submitted {
                return Transition::ignored(state, IgnoreReason::NotSubmitted, Vec::new());
            }
            let effects = state
                .preview
                .take()
                .into_iter()
                .map(Effect::ReleasePreview)
                .collect();
            Transition::applied(FormState::default(), effects)
        }
    }
}

fn confirmation(data: &FormData, at: DateTime<Utc>) -> Confirmation {
    Confirmation {
        name: data.name.trim_matches(is_form_whitespace).to_string(),
        email: data.email.clone(),
        resume_file_name: data
            .resume
            .as_ref()
            .map(|file| file.file_name.clone())
            .unwrap_or_default(),
        time_slots: data.time_slots.iter().copied().collect(),
        submitted_at: at,
    }
}
