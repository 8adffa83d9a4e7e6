use std::sync::OnceLock;

use regex::Regex;

use super::domain::{Field, FormData, ValidationErrors};

pub const NAME_REQUIRED: &str = "Name is required";
pub const EMAIL_REQUIRED: &str = "Email is required";
pub const EMAIL_INVALID: &str = "Please enter a valid email address";
pub const RESUME_REQUIRED: &str = "Resume is required";
pub const TIME_SLOTS_REQUIRED: &str = "Please select at least one time slot";

/// Browser whitespace as a regex class body: includes U+FEFF, excludes U+0085 (NEL).
const WHITESPACE_CLASS: &str =
    r"\t\n\x0B\x0C\r \x{A0}\x{1680}\x{2000}-\x{200A}\x{2028}\x{2029}\x{202F}\x{205F}\x{3000}\x{FEFF}";

/// Whitespace as browsers trim it. Differs from [`char::is_whitespace`] on U+FEFF and U+0085.
pub fn is_form_whitespace(c: char) -> bool {
    matches!(
        c,
        '\t' | '\n'
            | '\u{0B}'
            | '\u{0C}'
            | '\r'
            | ' '
            | '\u{A0}'
            | '\u{1680}'
            | '\u{2000}'..='\u{200A}'
            | '\u{2028}'
            | '\u{2029}'
            | '\u{202F}'
            | '\u{205F}'
            | '\u{3000}'
            | '\u{FEFF}'
    )
}

/// True when nothing is left after trimming form whitespace.
pub fn is_blank(value: &str) -> bool {
    value.trim_matches(is_form_whitespace).is_empty()
}

fn email_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        let part = format!("[^{WHITESPACE_CLASS}@]+");
        Regex::new(&format!(r"^{part}@{part}\.{part}$")).expect("email pattern compiles")
    })
}

/// `local@domain.tld` shape with no whitespace and no second `@`.
pub fn is_valid_email(value: &str) -> bool {
    email_pattern().is_match(value)
}

/// Evaluates every rule against the form. An empty result means the form can be submitted.
pub fn validate(data: &FormData) -> ValidationErrors {
    let mut errors = ValidationErrors::new();

    if is_blank(&data.name) {
        errors.insert(Field::Name, NAME_REQUIRED);
    }

    if is_blank(&data.email) {
        errors.insert(Field::Email, EMAIL_REQUIRED);
    } else if !is_valid_email(&data.email) {
        errors.insert(Field::Email, EMAIL_INVALID);
    }

    if data.resume.is_none() {
        errors.insert(Field::Resume, RESUME_REQUIRED);
    }

    if data.time_slots.is_empty() {
        errors.insert(Field::TimeSlots, TIME_SLOTS_REQUIRED);
    }

    errors
}
