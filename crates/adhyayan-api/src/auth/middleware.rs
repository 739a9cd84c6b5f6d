use crate::auth::models::AuthUser;
use crate::auth::JwtService;
use crate::error::HttpAppError;
use crate::state::AppState;
use adhyayan_core::AppError;
use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::sync::Arc;

/// Pull the token out of `Authorization: Bearer <token>`. `Ok(None)` when the
/// header is absent.
fn bearer_token(headers: &HeaderMap) -> Result<Option<&str>, AppError> {
    let Some(value) = headers.get("Authorization") else {
        return Ok(None);
    };
    let value = value.to_str().map_err(|_| {
        AppError::Unauthorized("Invalid authorization header format".to_string())
    })?;

    match value.strip_prefix("Bearer ") {
        Some(token) if !token.trim().is_empty() => Ok(Some(token.trim())),
        _ => Err(AppError::Unauthorized(
            "Invalid authorization header format".to_string(),
        )),
    }
}

fn authenticate(jwt: &JwtService, headers: &HeaderMap) -> Result<Option<AuthUser>, AppError> {
    match bearer_token(headers)? {
        Some(token) => Ok(Some(AuthUser::from(jwt.validate(token)?))),
        None => Ok(None),
    }
}

/// Require a valid bearer token; inserts [`AuthUser`] into request extensions.
pub async fn auth_middleware(
    State(state): State<Arc<AppState>>,
    mut request: Request,
    next: Next,
) -> Response {
    match authenticate(&state.jwt, request.headers()) {
        Ok(Some(user)) => {
            request.extensions_mut().insert(user);
            next.run(request).await
        }
        Ok(None) => HttpAppError(AppError::Unauthorized(
            "Missing authorization header".to_string(),
        ))
        .into_response(),
        Err(e) => HttpAppError(e).into_response(),
    }
}

/// Public routes: attach [`AuthUser`] when a valid token is present and
/// continue anonymously otherwise.
pub async fn optional_auth_middleware(
    State(state): State<Arc<AppState>>,
    mut request: Request,
    next: Next,
) -> Response {
    match authenticate(&state.jwt, request.headers()) {
        Ok(Some(user)) => {
            request.extensions_mut().insert(user);
        }
        Ok(None) => {}
        Err(e) => {
            tracing::debug!(error = %e, "Ignoring invalid credentials on public route");
        }
    }
    next.run(request).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_bearer_token_parsing() {
        let mut headers = HeaderMap::new();
        assert!(bearer_token(&headers).unwrap().is_none());

        headers.insert("Authorization", HeaderValue::from_static("Bearer abc.def.ghi"));
        assert_eq!(bearer_token(&headers).unwrap(), Some("abc.def.ghi"));

        headers.insert("Authorization", HeaderValue::from_static("Basic dXNlcjpwYXNz"));
        assert!(bearer_token(&headers).is_err());

        headers.insert("Authorization", HeaderValue::from_static("Bearer "));
        assert!(bearer_token(&headers).is_err());
    }
}
