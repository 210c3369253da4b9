use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, HeaderMap},
    middleware::Next,
    response::Response,
};
use tracing::warn;

use crate::auth::AuthError;
use crate::error::ApiError;
use crate::state::AppState;

/// Bearer authentication for the protected routes. Runs before the handler,
/// so a rejected request never touches the database.
pub async fn api_key_middleware(
    State(state): State<AppState>,
    headers: HeaderMap,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let result = extract_authorization(&headers)
        .and_then(|header| state.authenticator.authenticate(header));

    if let Err(reason) = result {
        warn!(
            method = %request.method(),
            path = %request.uri().path(),
            "Rejected request: {}",
            reason
        );
        return Err(reason.into());
    }

    Ok(next.run(request).await)
}

/// Raw `Authorization` value; a value that is not visible ASCII counts as malformed
fn extract_authorization(headers: &HeaderMap) -> Result<Option<&str>, AuthError> {
    headers
        .get(AUTHORIZATION)
        .map(|value| value.to_str().map_err(|_| AuthError::MissingOrMalformedHeader))
        .transpose()
}
