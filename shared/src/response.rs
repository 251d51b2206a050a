use contact_atoms::contact::SubmissionReceipt;
use lambda_http::http::header::{HeaderValue, CONTENT_TYPE};
use lambda_http::http::StatusCode;
use lambda_http::{Body, Response};
use serde::Serialize;

pub const GENERIC_SPAM_MESSAGE: &str = "Invalid submission";
pub const VALIDATION_MESSAGE: &str = "Please correct the errors and try again";
pub const SUCCESS_MESSAGE: &str = "Thank you! Your message has been sent successfully.";
pub const DISPATCH_FAILED_MESSAGE: &str = "Failed to send message. Please try again later.";
pub const UNHANDLED_MESSAGE: &str = "An unexpected error occurred. Please try again later.";
pub const METHOD_NOT_ALLOWED_MESSAGE: &str = "Method not allowed";
pub const NOT_FOUND_MESSAGE: &str = "Not found";

/// JSON envelope every contact response uses
#[derive(Debug, Serialize)]
pub struct ContactResponse {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<SubmissionReceipt>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ContactResponse {
    pub fn success(receipt: SubmissionReceipt) -> Self {
        Self {
            success: true,
            message: SUCCESS_MESSAGE.to_string(),
            data: Some(receipt),
            errors: None,
            error: None,
        }
    }

    pub fn failure(message: &str) -> Self {
        Self {
            success: false,
            message: message.to_string(),
            data: None,
            errors: None,
            error: None,
        }
    }

    pub fn with_errors(mut self, errors: Vec<String>) -> Self {
        self.errors = Some(errors);
        self
    }

    pub fn with_error(mut self, error: String) -> Self {
        self.error = Some(error);
        self
    }
}

fn origin_header(allowed_origin: &str) -> HeaderValue {
    HeaderValue::from_str(allowed_origin).unwrap_or_else(|_| HeaderValue::from_static("*"))
}

/// Serialize `body` with `status`, JSON content type and the allowed origin.
///
/// Infallible. If the body cannot be serialized the generic error body is sent
/// with the requested status.
pub fn json_response(
    status: StatusCode,
    body: &ContactResponse,
    allowed_origin: &str,
) -> Response<Body> {
    let payload = serde_json::to_string(body).unwrap_or_else(|_| {
        r#"{"success":false,"message":"An unexpected error occurred. Please try again later."}"#
            .to_string()
    });

    let mut resp = Response::new(Body::from(payload));
    *resp.status_mut() = status;
    let headers = resp.headers_mut();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers.insert("Access-Control-Allow-Origin", origin_header(allowed_origin));
    resp
}

/// 204 answer to a CORS preflight
pub fn preflight(allowed_origin: &str) -> Response<Body> {
    let mut resp = Response::new(Body::Empty);
    *resp.status_mut() = StatusCode::NO_CONTENT;
    let headers = resp.headers_mut();
    headers.insert("Access-Control-Allow-Origin", origin_header(allowed_origin));
    headers.insert(
        "Access-Control-Allow-Methods",
        HeaderValue::from_static("POST, OPTIONS"),
    );
    headers.insert(
        "Access-Control-Allow-Headers",
        HeaderValue::from_static("Content-Type"),
    );
    headers.insert("Access-Control-Max-Age", HeaderValue::from_static("86400"));
    resp
}

pub fn method_not_allowed(allowed_origin: &str) -> Response<Body> {
    let mut resp = json_response(
        StatusCode::METHOD_NOT_ALLOWED,
        &ContactResponse::failure(METHOD_NOT_ALLOWED_MESSAGE),
        allowed_origin,
    );
    resp.headers_mut()
        .insert("Allow", HeaderValue::from_static("POST, OPTIONS"));
    resp
}

pub fn not_found(allowed_origin: &str) -> Response<Body> {
    json_response(
        StatusCode::NOT_FOUND,
        &ContactResponse::failure(NOT_FOUND_MESSAGE),
        allowed_origin,
    )
}

pub fn unhandled(allowed_origin: &str) -> Response<Body> {
    json_response(
        StatusCode::INTERNAL_SERVER_ERROR,
        &ContactResponse::failure(UNHANDLED_MESSAGE),
        allowed_origin,
    )
}
