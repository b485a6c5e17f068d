//! Client-side checks run on a draft before anything is sent.

use regex::Regex;
use std::sync::OnceLock;

use crate::model::{Draft, Field, FieldErrors, parse_age};

pub const AGE_MIN: u32 = 1;
pub const AGE_MAX: u32 = 150;

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        // Word characters with single '.'/'-' separators on both sides, 2-3 letter suffix.
        let pattern = r"^[A-Za-z0-9_]+([.-]?[A-Za-z0-9_]+)*@[A-Za-z0-9_]+([.-]?[A-Za-z0-9_]+)*(\.[A-Za-z0-9_]{2,3})+$";
        Regex::new(pattern).unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
    })
}

pub fn is_valid_email(email: &str) -> bool {
    email_regex().is_match(email)
}

/// Every rule runs on every call; the result holds only failing fields.
pub fn validate(draft: &Draft) -> FieldErrors {
    let mut errors = FieldErrors::new();

    let name = draft.name.trim();
    if name.is_empty() {
        errors.insert(Field::Name, "Name is required");
    } else if name.chars().count() < 2 {
        errors.insert(Field::Name, "Name must be at least 2 characters");
    }

    if draft.email.trim().is_empty() {
        errors.insert(Field::Email, "Email is required");
    } else if !is_valid_email(&draft.email) {
        errors.insert(Field::Email, "Please enter a valid email address");
    }

    // Only a truly empty input counts as missing; "0" or "abc" fail the range check.
    if draft.age.is_empty() {
        errors.insert(Field::Age, "Age is required");
    } else if !parse_age(&draft.age).is_some_and(|age| (AGE_MIN..=AGE_MAX).contains(&age)) {
        errors.insert(Field::Age, "Age must be between 1 and 150");
    }

    if draft.profession.trim().is_empty() {
        errors.insert(Field::Profession, "Profession is required");
    }

    errors
}
