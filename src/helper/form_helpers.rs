use crate::models::{ContactForm, FormResponse};
use actix_web::{web, HttpResponse};
use serde_json::Value;
use std::collections::HashMap;
use url::form_urlencoded;

pub const MSG_INVALID_JSON: &str = "Invalid JSON in request body";

/// Parses URL-encoded form data from bytes, handling potential UTF-8 errors gracefully.
pub fn parse_form(form_bytes: &web::Bytes) -> Result<HashMap<String, String>, HttpResponse> {
    let body = match String::from_utf8(form_bytes.to_vec()) {
        Ok(s) => s,
        Err(_) => return Err(HttpResponse::BadRequest().json(FormResponse::failure("Invalid UTF-8 in request body."))),
    };
    Ok(form_urlencoded::parse(body.as_bytes()).into_owned().collect())
}

/// Parses a JSON body, answering malformed input with a 400 rather than a generic failure.
pub fn parse_json(body: &web::Bytes) -> Result<Value, HttpResponse> {
    serde_json::from_slice(body)
        .map_err(|_| HttpResponse::BadRequest().json(FormResponse::failure(MSG_INVALID_JSON)))
}

pub fn contact_form_from_fields(mut fields: HashMap<String, String>) -> ContactForm {
    let mut take = |key: &str| fields.remove(key).unwrap_or_default();
    ContactForm {
        name: take("name"),
        email: take("email"),
        subject: take("subject"),
        reason: take("reason"),
        message: take("message"),
        honeypot: Some(take("honeypot")),
        token: Some(take("token")),
        user_agent: Some(take("userAgent")),
    }
}

/// Reads a contact form from either a JSON or a URL-encoded body.
pub fn parse_contact_form(body: &web::Bytes, is_urlencoded: bool) -> Result<ContactForm, HttpResponse> {
    if is_urlencoded {
        return parse_form(body).map(contact_form_from_fields);
    }
    let value = parse_json(body)?;
    Ok(contact_form_from_json(&value))
}

/// Builds a contact form from a JSON body field by field. A missing, null or
/// non-string field reads as empty so validation reports it with the rest.
pub fn contact_form_from_json(value: &Value) -> ContactForm {
    let text = |key: &str| value.get(key).and_then(Value::as_str).unwrap_or_default().to_string();
    let optional = |key: &str| value.get(key).and_then(Value::as_str).map(str::to_string);
    ContactForm {
        name: text("name"),
        email: text("email"),
        subject: text("subject"),
        reason: text("reason"),
        message: text("message"),
        honeypot: optional("honeypot"),
        token: optional("token"),
        user_agent: optional("userAgent"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn urlencoded_contact_form_is_decoded() {
        let body = web::Bytes::from_static(b"name=Mustafa&email=m%40example.com&subject=Hi&reason=General+Inquiry&message=hello+there");
        let form = parse_contact_form(&body, true).unwrap();
        assert_eq!(form.email, "m@example.com");
        assert_eq!(form.reason, "General Inquiry");
        assert_eq!(form.message, "hello there");
        assert_eq!(form.honeypot.as_deref(), Some(""));
    }

    #[test]
    fn json_contact_form_tolerates_missing_fields() {
        let body = web::Bytes::from_static(br#"{"name":"A","userAgent":"curl"}"#);
        let form = parse_contact_form(&body, false).unwrap();
        assert_eq!(form.name, "A");
        assert_eq!(form.email, "");
        assert_eq!(form.user_agent.as_deref(), Some("curl"));
    }

    #[test]
    fn json_contact_form_reads_non_string_fields_as_empty() {
        let body = web::Bytes::from_static(br#"{"name":null,"email":42,"subject":"Hi","message":["x"],"honeypot":7}"#);
        let form = parse_contact_form(&body, false).unwrap();
        assert_eq!(form.name, "");
        assert_eq!(form.email, "");
        assert_eq!(form.subject, "Hi");
        assert_eq!(form.message, "");
        assert_eq!(form.honeypot, None);
    }

    #[test]
    fn malformed_json_is_a_bad_request() {
        let body = web::Bytes::from_static(b"{not json");
        let resp = parse_json(&body).unwrap_err();
        assert_eq!(resp.status(), actix_web::http::StatusCode::BAD_REQUEST);
    }
}
