//! Candidate registration form: field state, validation, simulated submission and the view
//! projection a host renders.
//!
//! Transitions live in [`state::reduce`]; [`FormController`] owns the state, performs the
//! effects the reducer asks for (preview release, delayed completion) and exposes the
//! handlers a host wires to its input events.

pub mod controller;
pub mod domain;
pub mod preview;
pub mod scheduler;
pub mod state;
pub mod validation;
pub mod view;

#[cfg(test)]
mod tests;

pub use controller::{FormController, FormError};
pub use domain::{
    Confirmation, Field, FormData, FormState, ResumeFile, SlotWindow, SubmissionState, TextField,
    TimeSlot, UnknownField, UnknownTimeSlot, ValidationErrors, Weekday,
    ACCEPTED_RESUME_EXTENSIONS,
};
pub use preview::{InMemoryPreviewStore, PreviewRef, PreviewStore};
pub use scheduler::ScheduledTask;
pub use state::{reduce, EditPolicy, Effect, FormEvent, IgnoreReason, Outcome, Transition};
pub use validation::validate;
pub use view::FormView;
