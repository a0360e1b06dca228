// Shared field validation for intake and account forms
//
// Mirrors the client-side schema checks the original ran before
// submitting: non-empty required fields, well-formed email/phone,
// Canadian postal codes.

use regex::Regex;
use std::sync::LazyLock;
use thiserror::Error;

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap());
static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\(?\d{3}\)?[\s.-]?\d{3}[\s.-]?\d{4}$").unwrap());
static POSTAL_CODE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z]\d[A-Za-z]\s?\d[A-Za-z]\d$").unwrap());

/// One or more fields failed validation.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("validation failed: {}", .failures.join("; "))]
pub struct ValidationError {
    pub failures: Vec<String>,
}

/// Collects field failures and reports them all at once, so a form
/// round-trip fixes everything in one pass.
#[derive(Debug, Default)]
pub struct FieldValidator {
    failures: Vec<String>,
}

impl FieldValidator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn require(&mut self, field: &str, value: &str) -> &mut Self {
        if value.trim().is_empty() {
            self.failures.push(format!("{field} is required"));
        }
        self
    }

    pub fn email(&mut self, field: &str, value: &str) -> &mut Self {
        if !EMAIL_RE.is_match(value.trim()) {
            self.failures.push(format!("{field} is not a valid email address"));
        }
        self
    }

    pub fn phone(&mut self, field: &str, value: &str) -> &mut Self {
        if !PHONE_RE.is_match(value.trim()) {
            self.failures.push(format!("{field} is not a valid phone number"));
        }
        self
    }

    pub fn postal_code(&mut self, field: &str, value: &str) -> &mut Self {
        if !POSTAL_CODE_RE.is_match(value.trim()) {
            self.failures.push(format!("{field} is not a valid postal code"));
        }
        self
    }

    pub fn min_length(&mut self, field: &str, value: &str, min: usize) -> &mut Self {
        if value.chars().count() < min {
            self.failures
                .push(format!("{field} must be at least {min} characters"));
        }
        self
    }

    pub fn finish(&mut self) -> Result<(), ValidationError> {
        if self.failures.is_empty() {
            Ok(())
        } else {
            Err(ValidationError {
                failures: std::mem::take(&mut self.failures),
            })
        }
    }
}
