use crate::models::{ContactForm, ContactReason, ContactSubmission, FieldErrors};
use regex::Regex;
use serde_json::Value;
use std::sync::LazyLock;

static CONTACT_EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9.!#$%&'*+/=?^_`{|}~-]+@[A-Za-z0-9](?:[A-Za-z0-9-]*[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]*[A-Za-z0-9])?)*\.[A-Za-z]{2,}$")
        .expect("contact email pattern is valid")
});

static NEWSLETTER_EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("newsletter email pattern is valid")
});

pub const MSG_NAME_REQUIRED: &str = "Name is required";
pub const MSG_INVALID_EMAIL: &str = "Invalid email format";
pub const MSG_SUBJECT_REQUIRED: &str = "Subject is required";
pub const MSG_MESSAGE_REQUIRED: &str = "Message is required";
pub const MSG_INVALID_REASON: &str = "Please select a valid reason";
pub const MSG_EMAIL_REQUIRED: &str = "Email is required";
pub const MSG_EMAIL_NOT_STRING: &str = "Email must be a string";

fn push_error(errors: &mut FieldErrors, field: &str, message: &str) {
    errors.entry(field.to_string()).or_default().push(message.to_string());
}

fn optional(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Validates a contact form, reporting every failing field at once.
pub fn validate_contact(form: ContactForm) -> Result<ContactSubmission, FieldErrors> {
    let mut errors = FieldErrors::new();

    if form.name.trim().is_empty() {
        push_error(&mut errors, "name", MSG_NAME_REQUIRED);
    }
    if !CONTACT_EMAIL.is_match(form.email.trim()) {
        push_error(&mut errors, "email", MSG_INVALID_EMAIL);
    }
    if form.subject.trim().is_empty() {
        push_error(&mut errors, "subject", MSG_SUBJECT_REQUIRED);
    }
    if form.message.trim().is_empty() {
        push_error(&mut errors, "message", MSG_MESSAGE_REQUIRED);
    }
    let reason = ContactReason::parse(&form.reason);
    if reason.is_none() {
        push_error(&mut errors, "reason", MSG_INVALID_REASON);
    }

    match reason {
        Some(reason) if errors.is_empty() => Ok(ContactSubmission {
            name: form.name.trim().to_string(),
            email: form.email.trim().to_string(),
            subject: form.subject.trim().to_string(),
            reason,
            message: form.message,
            honeypot: optional(form.honeypot),
            token: optional(form.token),
            user_agent: optional(form.user_agent),
        }),
        _ => Err(errors),
    }
}

pub fn is_newsletter_email(email: &str) -> bool {
    NEWSLETTER_EMAIL.is_match(email)
}

/// Pulls the subscriber email out of a newsletter request body.
/// The error is the message returned to the client.
pub fn validate_newsletter(body: &Value) -> Result<String, &'static str> {
    let email = match body.get("email") {
        None | Some(Value::Null) => return Err(MSG_EMAIL_REQUIRED),
        Some(Value::String(s)) => s.trim(),
        Some(_) => return Err(MSG_EMAIL_NOT_STRING),
    };
    if email.is_empty() {
        return Err(MSG_EMAIL_REQUIRED);
    }
    if !is_newsletter_email(email) {
        return Err(MSG_INVALID_EMAIL);
    }
    Ok(email.to_string())
}
