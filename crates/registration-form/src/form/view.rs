use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::domain::{Field, FormState, SubmissionState, TimeSlot, ACCEPTED_RESUME_EXTENSIONS};
use super::preview::PreviewRef;

pub const FORM_TITLE: &str = "Registration Form";
pub const FORM_SUBTITLE: &str = "Please fill out all fields to complete your registration";
pub const UPLOAD_PROMPT: &str = "Choose file or drag here";
pub const SUBMIT_LABEL: &str = "Submit Registration";
pub const SUBMITTING_LABEL: &str = "Submitting...";
pub const THANK_YOU_TITLE: &str = "Thank You!";
pub const THANK_YOU_MESSAGE: &str = "Your registration has been submitted successfully.";
pub const FOLLOW_UP_MESSAGE: &str = "We'll get back to you soon regarding your selected time slots.";
pub const RESET_LABEL: &str = "Submit Another Registration";

/// What the host should display for the current state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "screen", rename_all = "snake_case")]
pub enum FormView {
    Form(FormPage),
    Confirmation(ConfirmationPage),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormPage {
    pub title: &'static str,
    pub subtitle: &'static str,
    pub name: TextInputView,
    pub email: TextInputView,
    pub resume: ResumeInputView,
    pub time_slots: TimeSlotsView,
    pub submit: SubmitButtonView,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TextInputView {
    pub label: &'static str,
    pub placeholder: &'static str,
    pub value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResumeInputView {
    pub label: &'static str,
    pub accept: String,
    pub upload_text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preview: Option<PreviewRef>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimeSlotsView {
    pub label: &'static str,
    pub options: Vec<SlotToggleView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SlotToggleView {
    pub slot: TimeSlot,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubmitButtonView {
    pub label: &'static str,
    pub busy: bool,
    pub disabled: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConfirmationPage {
    pub title: &'static str,
    pub message: &'static str,
    pub follow_up: &'static str,
    pub time_slots: Vec<TimeSlot>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub submitted_at: Option<DateTime<Utc>>,
    pub reset_label: &'static str,
}

impl FormView {
    pub fn project(state: &FormState) -> Self {
        if state.submission == SubmissionState::Submitted {
            let confirmation = state.confirmation.as_ref();
            return Self::Confirmation(ConfirmationPage {
                title: THANK_YOU_TITLE,
                message: THANK_YOU_MESSAGE,
                follow_up: FOLLOW_UP_MESSAGE,
                time_slots: confirmation
                    .map(|receipt| receipt.time_slots.clone())
                    .unwrap_or_default(),
                submitted_at: confirmation.map(|receipt| receipt.submitted_at),
                reset_label: RESET_LABEL,
            });
        }

        let error = |field: Field| state.errors.get(field).map(str::to_string);
        let busy = state.submission == SubmissionState::Submitting;

        Self::Form(FormPage {
            title: FORM_TITLE,
            subtitle: FORM_SUBTITLE,
            name: TextInputView {
                label: "Full Name",
                placeholder: "Enter your full name",
                value: state.data.name.clone(),
                error: error(Field::Name),
            },
            email: TextInputView {
                label: "Email Address",
                placeholder: "Enter your email address",
                value: state.data.email.clone(),
                error: error(Field::Email),
            },
            resume: ResumeInputView {
                label: "Resume Upload",
                accept: ACCEPTED_RESUME_EXTENSIONS.join(","),
                upload_text: state
                    .data
                    .resume
                    .as_ref()
                    .map(|file| file.file_name.clone())
                    .unwrap_or_else(|| UPLOAD_PROMPT.to_string()),
                error: error(Field::Resume),
                preview: state.preview.clone(),
            },
            time_slots: TimeSlotsView {
                label: "Available Time Slots",
                options: TimeSlot::options()
                    .into_iter()
                    .map(|slot| SlotToggleView {
                        slot,
                        selected: state.data.is_selected(slot),
                    })
                    .collect(),
                error: error(Field::TimeSlots),
            },
            submit: SubmitButtonView {
                label: if busy { SUBMITTING_LABEL } else { SUBMIT_LABEL },
                busy,
                disabled: busy,
            },
        })
    }
}

fn write_error(f: &mut fmt::Formatter<'_>, error: &Option<String>) -> fmt::Result {
    match error {
        Some(message) => writeln!(f, "    ! {message}"),
        None => Ok(()),
    }
}

impl fmt::Display for FormView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormView::Confirmation(page) => {
                writeln!(f, "{}", page.title)?;
                writeln!(f, "{}", page.message)?;
                writeln!(f, "{}", page.follow_up)?;
                for slot in &page.time_slots {
                    writeln!(f, "  - {slot}")?;
                }
                if let Some(at) = page.submitted_at {
                    writeln!(f, "Submitted at {}", at.format("%Y-%m-%d %H:%M:%S UTC"))?;
                }
                write!(f, "[{}]", page.reset_label)
            }
            FormView::Form(page) => {
                writeln!(f, "{}", page.title)?;
                writeln!(f, "{}", page.subtitle)?;
                for input in [&page.name, &page.email] {
                    let shown = if input.value.is_empty() {
                        format!("<{}>", input.placeholder)
                    } else {
                        input.value.clone()
                    };
                    writeln!(f, "  {}: {}", input.label, shown)?;
                    write_error(f, &input.error)?;
                }
                writeln!(
                    f,
                    "  {} ({}): {}",
                    page.resume.label, page.resume.accept, page.resume.upload_text
                )?;
                write_error(f, &page.resume.error)?;
                if let Some(preview) = &page.resume.preview {
                    writeln!(f, "    Resume Preview: {preview}")?;
                }
                writeln!(f, "  {}:", page.time_slots.label)?;
                for option in &page.time_slots.options {
                    let mark = if option.selected { "x" } else { " " };
                    writeln!(f, "    [{mark}] {}", option.slot)?;
                }
                write_error(f, &page.time_slots.error)?;
                let state = if page.submit.disabled { " (disabled)" } else { "" };
                write!(f, "[{}]{state}", page.submit.label)
            }
        }
    }
}
