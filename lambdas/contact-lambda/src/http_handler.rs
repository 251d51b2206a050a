use std::sync::Arc;

use contact_shared::{contact, response, AppState};
use lambda_http::{Body, Error, Request, RequestExt, Response};

/// Main Lambda handler - routes the contact path, 404s everything else
pub(crate) async fn function_handler(
    event: Request,
    state: Arc<AppState>,
) -> Result<Response<Body>, Error> {
    let method = event.method().clone();
    let path = event.uri().path().to_string();
    let request_id = event
        .lambda_context_ref()
        .map(|ctx| ctx.request_id.clone())
        .unwrap_or_default();

    let span = tracing::info_span!(
        "contact_request",
        request_id = %request_id,
        method = %method,
        path = %path,
    );
    tracing::info!(parent: &span, "Contact Lambda invoked");

    if path == state.config.route_path {
        return Ok(contact::contact_endpoint(&state, &event, &span).await);
    }

    tracing::warn!(parent: &span, "No route matched");
    Ok(response::not_found(&state.config.allowed_origin))
}
