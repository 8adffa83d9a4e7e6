use chrono::Utc;

use super::common::*;
use crate::form::domain::{Confirmation, FormState, SubmissionState};
use crate::form::preview::PreviewRef;
use crate::form::state::{reduce, EditPolicy, FormEvent};
use crate::form::view::{FormView, SUBMITTING_LABEL, SUBMIT_LABEL, UPLOAD_PROMPT};

fn form_page(state: &FormState) -> crate::form::view::FormPage {
    match FormView::project(state) {
        FormView::Form(page) => page,
        other => panic!("expected form view, got {other:?}"),
    }
}

#[test]
fn empty_form_shows_prompts_and_all_ten_slots_in_order() {
    let page = form_page(&FormState::default());

    assert_eq!(page.title, "Registration Form");
    assert_eq!(page.resume.upload_text, UPLOAD_PROMPT);
    assert_eq!(page.resume.accept, ".pdf,.doc,.docx");
    assert_eq!(page.submit.label, SUBMIT_LABEL);
    assert!(!page.submit.disabled);

    let labels: Vec<String> = page
        .time_slots
        .options
        .iter()
        .map(|option| option.slot.to_string())
        .collect();
    assert_eq!(
        labels,
        vec![
            "Monday 9-11 AM",
            "Monday 2-4 PM",
            "Tuesday 9-11 AM",
            "Tuesday 2-4 PM",
            "Wednesday 9-11 AM",
            "Wednesday 2-4 PM",
            "Thursday 9-11 AM",
            "Thursday 2-4 PM",
            "Friday 9-11 AM",
            "Friday 2-4 PM",
        ]
    );
    assert!(page.time_slots.options.iter().all(|option| !option.selected));
}

#[test]
fn rejected_form_shows_field_errors() {
    let state = reduce(
        FormState::default(),
        FormEvent::SubmitRequested,
        &EditPolicy::default(),
    )
    .state;
    let page = form_page(&state);

    assert_eq!(page.name.error.as_deref(), Some("Name is required"));
    assert_eq!(page.email.error.as_deref(), Some("Email is required"));
    assert_eq!(page.resume.error.as_deref(), Some("Resume is required"));
    assert_eq!(
        page.time_slots.error.as_deref(),
        Some("Please select at least one time slot")
    );

    let rendered = FormView::project(&state).to_string();
    assert!(rendered.contains("! Name is required"));
}

#[test]
fn submitting_form_disables_the_busy_button() {
    let mut state = editing(valid_data());
    state.submission = SubmissionState::Submitting;
    state.preview = Some(PreviewRef::generate());

    let page = form_page(&state);
    assert_eq!(page.submit.label, SUBMITTING_LABEL);
    assert!(page.submit.busy);
    assert!(page.submit.disabled);
    assert_eq!(page.resume.upload_text, "jane-doe.pdf");
    assert!(page.resume.preview.is_some());
    assert!(page.time_slots.options[0].selected);
    assert!(FormView::project(&state).to_string().ends_with("(disabled)"));
}

#[test]
fn submitted_form_shows_the_confirmation() {
    let mut state = editing(valid_data());
    state.submission = SubmissionState::Submitted;
    state.confirmation = Some(Confirmation {
        name: "Jane Doe".to_string(),
        email: "jane@x.com".to_string(),
        resume_file_name: "jane-doe.pdf".to_string(),
        time_slots: vec![monday_morning()],
        submitted_at: Utc::now(),
    });

    match FormView::project(&state) {
        FormView::Confirmation(page) => {
            assert_eq!(page.title, "Thank You!");
            assert_eq!(page.reset_label, "Submit Another Registration");
            assert_eq!(page.time_slots, vec![monday_morning()]);
        }
        other => panic!("expected confirmation, got {other:?}"),
    }
}

#[test]
fn views_serialize_with_a_screen_tag() {
    let json = serde_json::to_value(FormView::project(&editing(valid_data())))
        .expect("view serializes");
    assert_eq!(json["screen"], "form");
    assert_eq!(json["name"]["value"], "Jane Doe");
    assert_eq!(json["time_slots"]["options"][0]["slot"], "Monday 9-11 AM");
    assert!(json["name"].get("error").is_none());
}
