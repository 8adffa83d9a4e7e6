//! End-to-end registration scenarios driven through the public controller facade.

use std::sync::Arc;
use std::time::Duration;

use registration_form::config::SubmissionConfig;
use registration_form::form::{
    Field, FormController, FormError, FormView, InMemoryPreviewStore, ResumeFile,
    SubmissionState, TextField, TimeSlot,
};
use tokio::time::advance;

fn controller() -> (FormController, Arc<InMemoryPreviewStore>) {
    let store = Arc::new(InMemoryPreviewStore::default());
    let controller = FormController::with_store(&SubmissionConfig::default(), store.clone());
    (controller, store)
}

#[tokio::test(start_paused = true)]
async fn applicant_registers_and_starts_another() {
    let (mut form, store) = controller();

    form.update_field(TextField::Name, "Jane Doe").expect("name");
    form.update_field(TextField::Email, "jane@x.com").expect("email");
    form.set_resume(ResumeFile::new("jane-doe.pdf", "application/pdf", 48_213))
        .expect("resume");
    let slot: TimeSlot = "Monday 9-11 AM".parse().expect("known slot");
    form.toggle_time_slot(slot).expect("slot");

    assert!(form.validate().is_empty());
    assert_eq!(store.live_count(), 1);

    assert_eq!(form.submit(), Ok(SubmissionState::Submitting));
    match form.view() {
        FormView::Form(page) => {
            assert!(page.submit.disabled);
            assert_eq!(page.submit.label, "Submitting...");
        }
        other => panic!("expected busy form, got {other:?}"),
    }

    advance(Duration::from_millis(2010)).await;
    tokio::task::yield_now().await;
    assert_eq!(form.wait_until_settled().await, SubmissionState::Submitted);
    assert!(matches!(form.view(), FormView::Confirmation(_)));

    form.reset().expect("reset after confirmation");
    let state = form.state();
    assert_eq!(state.submission, SubmissionState::Editing);
    assert!(state.data.name.is_empty());
    assert!(state.data.email.is_empty());
    assert!(state.data.resume.is_none());
    assert!(state.data.time_slots.is_empty());
    assert_eq!(store.live_count(), 0);
}

#[tokio::test]
async fn applicant_fixes_a_rejected_form() {
    let (mut form, _) = controller();
    form.update_field(TextField::Email, "bad").expect("email");

    let errors = match form.submit() {
        Err(FormError::Validation(errors)) => errors,
        other => panic!("expected validation errors, got {other:?}"),
    };
    assert_eq!(errors.get(Field::Name), Some("Name is required"));
    assert_eq!(
        errors.get(Field::Email),
        Some("Please enter a valid email address")
    );
    assert_eq!(errors.get(Field::Resume), Some("Resume is required"));
    assert_eq!(
        errors.get(Field::TimeSlots),
        Some("Please select at least one time slot")
    );

    form.update_field(TextField::Email, "jane@x").expect("email");
    assert!(!form.errors().contains(Field::Email));
    assert_eq!(form.errors().len(), 3);
    assert_eq!(form.submission_state(), SubmissionState::Editing);
}
