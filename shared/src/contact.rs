use std::panic::AssertUnwindSafe;

use chrono::Utc;
use contact_atoms::contact::{ContactForm, ContactSubmission, SubmissionReceipt};
use futures::FutureExt;
use lambda_http::http::header::USER_AGENT;
use lambda_http::http::{Method, StatusCode};
use lambda_http::{Body, Request, RequestPayloadExt, Response};
use tracing::{Instrument, Span};

use crate::error::ContactError;
use crate::response::{
    json_response, method_not_allowed, preflight, unhandled, ContactResponse,
    DISPATCH_FAILED_MESSAGE, GENERIC_SPAM_MESSAGE, VALIDATION_MESSAGE,
};
use crate::AppState;

/// Handle one request to the contact route.
///
/// Always produces a response: every failure, panics included, ends up as a
/// JSON envelope with `success: false`. Log events go to the injected `span`.
pub async fn contact_endpoint(state: &AppState, event: &Request, span: &Span) -> Response<Body> {
    let origin = state.config.allowed_origin.as_str();

    match event.method() {
        &Method::OPTIONS => preflight(origin),
        &Method::POST => {
            let outcome = AssertUnwindSafe(submit(state, event, span))
                .catch_unwind()
                .await;
            match outcome {
                Ok(result) => respond(result, origin, span),
                Err(_) => {
                    tracing::error!(parent: span, "Contact handler panicked");
                    unhandled(origin)
                }
            }
        }
        _ => {
            tracing::warn!(parent: span, method = %event.method(), "Method not allowed on contact route");
            method_not_allowed(origin)
        }
    }
}

/// Validate, sanitize and dispatch one contact form submission.
pub async fn submit(
    state: &AppState,
    event: &Request,
    span: &Span,
) -> Result<SubmissionReceipt, ContactError> {
    let form = extract_form(event)?;

    if form.is_spam() {
        tracing::warn!(parent: span, "Honeypot field filled, rejecting submission");
        return Err(ContactError::SpamRejected);
    }

    let user_agent = event
        .headers()
        .get(USER_AGENT)
        .and_then(|v| v.to_str().ok());
    let submission = ContactSubmission::accept(form, Utc::now(), user_agent)
        .map_err(ContactError::ValidationFailed)?;

    tracing::info!(
        parent: span,
        name = %submission.name(),
        email = %submission.email(),
        "Contact form submission received"
    );

    let message_id = state
        .dispatcher
        .dispatch(&submission)
        .instrument(span.clone())
        .await?;

    tracing::info!(
        parent: span,
        provider = state.dispatcher.provider(),
        message_id = %message_id,
        "Contact email dispatched"
    );

    Ok(submission.receipt())
}

/// Decode a form-encoded or JSON body. Missing fields come back as "".
fn extract_form(event: &Request) -> Result<ContactForm, ContactError> {
    match event.payload::<ContactForm>() {
        Ok(Some(form)) => Ok(form),
        Ok(None) => Ok(ContactForm::default()),
        Err(e) => Err(ContactError::Unhandled(format!("unreadable form body: {}", e))),
    }
}

fn respond(result: Result<SubmissionReceipt, ContactError>, origin: &str, span: &Span) -> Response<Body> {
    match result {
        Ok(receipt) => json_response(StatusCode::OK, &ContactResponse::success(receipt), origin),
        Err(ContactError::SpamRejected) => json_response(
            StatusCode::BAD_REQUEST,
            &ContactResponse::failure(GENERIC_SPAM_MESSAGE),
            origin,
        ),
        Err(ContactError::ValidationFailed(violations)) => {
            tracing::info!(parent: span, violations = violations.len(), "Contact form failed validation");
            let errors = violations.iter().map(ToString::to_string).collect();
            json_response(
                StatusCode::BAD_REQUEST,
                &ContactResponse::failure(VALIDATION_MESSAGE).with_errors(errors),
                origin,
            )
        }
        Err(ContactError::DispatchFailed(e)) => {
            tracing::error!(parent: span, error = %e, "Failed to send contact email");
            json_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                &ContactResponse::failure(DISPATCH_FAILED_MESSAGE).with_error(e.to_string()),
                origin,
            )
        }
        Err(ContactError::Unhandled(detail)) => {
            tracing::error!(parent: span, error = %detail, "Contact handler failed");
            unhandled(origin)
        }
    }
}
