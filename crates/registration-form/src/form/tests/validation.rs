use super::common::*;
use crate::form::domain::{Field, FormData};
use crate::form::validation::{
    is_valid_email, validate, EMAIL_INVALID, EMAIL_REQUIRED, NAME_REQUIRED, RESUME_REQUIRED,
    TIME_SLOTS_REQUIRED,
};

#[test]
fn complete_form_has_no_errors() {
    let errors = validate(&valid_data());
    assert!(errors.is_empty(), "unexpected errors: {errors}");
}

#[test]
fn empty_form_reports_all_four_messages() {
    let data = FormData {
        email: "bad".to_string(),
        ..FormData::default()
    };
    let errors = validate(&data);

    assert_eq!(errors.len(), 4);
    assert_eq!(errors.get(Field::Name), Some(NAME_REQUIRED));
    assert_eq!(errors.get(Field::Email), Some(EMAIL_INVALID));
    assert_eq!(errors.get(Field::Resume), Some(RESUME_REQUIRED));
    assert_eq!(errors.get(Field::TimeSlots), Some(TIME_SLOTS_REQUIRED));
    assert_eq!(NAME_REQUIRED, "Name is required");
    assert_eq!(EMAIL_INVALID, "Please enter a valid email address");
    assert_eq!(RESUME_REQUIRED, "Resume is required");
    assert_eq!(TIME_SLOTS_REQUIRED, "Please select at least one time slot");
}

#[test]
fn whitespace_only_name_is_required() {
    for name in ["", " ", "\t", "  \n "] {
        let data = FormData {
            name: name.to_string(),
            ..valid_data()
        };
        assert_eq!(
            validate(&data).get(Field::Name),
            Some(NAME_REQUIRED),
            "name {name:?}"
        );
    }
}

#[test]
fn blank_email_is_required_rather_than_malformed() {
    let data = FormData {
        email: "   ".to_string(),
        ..valid_data()
    };
    let errors = validate(&data);
    assert_eq!(errors.get(Field::Email), Some(EMAIL_REQUIRED));
    assert_eq!(EMAIL_REQUIRED, "Email is required");
    assert_eq!(errors.len(), 1);
}

#[test]
fn email_pattern_accepts_local_at_domain_dot_tld() {
    for email in [
        "jane@x.com",
        "j.doe+jobs@mail.example.org",
        "a@b.c",
        "weird!#$@host.name.io",
        "jane@sub.domain.co.uk",
    ] {
        assert!(is_valid_email(email), "expected {email:?} to be accepted");
        let data = FormData {
            email: email.to_string(),
            ..valid_data()
        };
        assert!(!validate(&data).contains(Field::Email));
    }
}

#[test]
fn email_pattern_rejects_malformed_addresses() {
    for email in [
        "bad",
        "jane@",
        "@x.com",
        "jane@x",
        "jane@x.",
        "jane@@x.com",
        "jane@x@y.com",
        "jane doe@x.com",
        " jane@x.com",
        "jane@x.com ",
        "jane@.com",
    ] {
        assert!(!is_valid_email(email), "expected {email:?} to be rejected");
        let data = FormData {
            email: email.to_string(),
            ..valid_data()
        };
        assert_eq!(validate(&data).get(Field::Email), Some(EMAIL_INVALID));
    }
}

#[test]
fn rules_are_evaluated_independently() {
    let data = FormData {
        resume: None,
        ..valid_data()
    };
    let errors = validate(&data);
    assert_eq!(errors.fields().collect::<Vec<_>>(), vec![Field::Resume]);

    let data = FormData {
        time_slots: Default::default(),
        name: String::new(),
        ..valid_data()
    };
    let errors = validate(&data);
    assert_eq!(
        errors.fields().collect::<Vec<_>>(),
        vec![Field::Name, Field::TimeSlots]
    );
}

#[test]
fn blank_checks_follow_browser_whitespace() {
    for name in ["\u{FEFF}", " \u{FEFF}\u{3000} ", "\u{2028}"] {
        let data = FormData {
            name: name.to_string(),
            ..valid_data()
        };
        assert_eq!(
            validate(&data).get(Field::Name),
            Some(NAME_REQUIRED),
            "name {name:?}"
        );
    }

    // NEL is not whitespace to a browser, so this name is filled in.
    let data = FormData {
        name: "\u{85}".to_string(),
        ..valid_data()
    };
    assert!(!validate(&data).contains(Field::Name));

    let data = FormData {
        email: "\u{FEFF}".to_string(),
        ..valid_data()
    };
    assert_eq!(validate(&data).get(Field::Email), Some(EMAIL_REQUIRED));
}

#[test]
fn email_pattern_uses_browser_whitespace() {
    assert!(!is_valid_email("jane\u{FEFF}@x.com"));
    assert!(!is_valid_email("jane@x.com\u{A0}"));
    assert!(is_valid_email("jane\u{85}@x.com"));

    let data = FormData {
        email: "jane\u{FEFF}@x.com".to_string(),
        ..valid_data()
    };
    assert_eq!(validate(&data).get(Field::Email), Some(EMAIL_INVALID));
}
