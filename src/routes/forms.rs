use crate::helper::{form_helpers, sanitization_helpers, validation_helpers};
use crate::models::FormResponse;
use crate::notifier::Notifier;
use actix_web::{http::header, web, HttpRequest, HttpResponse, Responder};

pub const MSG_SUBSCRIBED: &str = "Successfully subscribed to the newsletter!";
pub const MSG_SUBSCRIBE_FAILED: &str = "Failed to subscribe. Please try again later.";
pub const MSG_CONTACT_SENT: &str = "Thank you for your message. I'll get back to you soon.";
pub const MSG_CONTACT_FAILED: &str = "Failed to send message. Please try again later.";
pub const MSG_VALIDATION_FAILED: &str = "Validation failed";

pub fn config_api(cfg: &mut web::ServiceConfig) {
    cfg.route("/newsletter", web::post().to(subscribe_newsletter))
        .route("/contact", web::post().to(submit_contact));
}

/// Handles requests to the POST /api/newsletter endpoint.
async fn subscribe_newsletter(body: web::Bytes, notifier: web::Data<dyn Notifier>) -> impl Responder {
    let payload = match form_helpers::parse_json(&body) {
        Ok(value) => value,
        Err(resp) => return resp,
    };

    let email = match validation_helpers::validate_newsletter(&payload) {
        Ok(email) => email,
        Err(message) => return HttpResponse::BadRequest().json(FormResponse::failure(message)),
    };

    match notifier.subscribe(&email) {
        Ok(()) => HttpResponse::Ok().json(FormResponse::ok(MSG_SUBSCRIBED)),
        Err(e) => {
            log::error!("Newsletter subscription failed: {}", e);
            HttpResponse::InternalServerError().json(FormResponse::failure(MSG_SUBSCRIBE_FAILED))
        }
    }
}

fn is_urlencoded(req: &HttpRequest) -> bool {
    req.headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map_or(false, |ct| ct.starts_with("application/x-www-form-urlencoded"))
}

/// Handles requests to the POST /api/contact endpoint.
async fn submit_contact(req: HttpRequest, body: web::Bytes, notifier: web::Data<dyn Notifier>) -> impl Responder {
    let form = match form_helpers::parse_contact_form(&body, is_urlencoded(&req)) {
        Ok(form) => form,
        Err(resp) => return resp,
    };

    let submission = match validation_helpers::validate_contact(form) {
        Ok(submission) => submission,
        Err(errors) => {
            return HttpResponse::BadRequest().json(FormResponse {
                success: false,
                message: MSG_VALIDATION_FAILED.to_string(),
                errors: Some(errors),
            });
        }
    };

    // Automated submissions get the normal answer but go nowhere.
    if submission.is_automated() {
        log::info!("Dropping contact submission with populated honeypot from <{}>", submission.email);
        return HttpResponse::Ok().json(FormResponse::ok(MSG_CONTACT_SENT));
    }

    let clean = sanitization_helpers::sanitize_contact(&submission);
    match notifier.deliver_contact(&clean) {
        Ok(()) => HttpResponse::Ok().json(FormResponse::ok(MSG_CONTACT_SENT)),
        Err(e) => {
            log::error!("Contact delivery failed: {}", e);
            HttpResponse::InternalServerError().json(FormResponse::failure(MSG_CONTACT_FAILED))
        }
    }
}
