use std::collections::BTreeSet;
use std::time::Duration;

use crate::config::SubmissionConfig;
use crate::form::domain::{FormData, FormState, ResumeFile, SlotWindow, TimeSlot, Weekday};

pub(super) const DELAY: Duration = Duration::from_millis(2000);

pub(super) fn submission_config() -> SubmissionConfig {
    SubmissionConfig::default()
}

pub(super) fn monday_morning() -> TimeSlot {
    TimeSlot::new(Weekday::Monday, SlotWindow::Morning)
}

pub(super) fn friday_afternoon() -> TimeSlot {
    TimeSlot::new(Weekday::Friday, SlotWindow::Afternoon)
}

pub(super) fn pdf_resume() -> ResumeFile {
    ResumeFile::new("jane-doe.pdf", "application/pdf", 48_213)
}

pub(super) fn word_resume() -> ResumeFile {
    ResumeFile::new(
        "jane-doe.docx",
        "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        21_004,
    )
}

pub(super) fn valid_data() -> FormData {
    FormData {
        name: "Jane Doe".to_string(),
        email: "jane@x.com".to_string(),
        resume: Some(pdf_resume()),
        time_slots: BTreeSet::from([monday_morning()]),
    }
}

pub(super) fn editing(data: FormData) -> FormState {
    FormState {
        data,
        ..FormState::default()
    }
}
