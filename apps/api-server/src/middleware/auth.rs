//! Authentication extractor.

use actix_web::{FromRequest, HttpRequest, dev::Payload, http::header, web};
use chrono::{DateTime, Utc};
use futures::future::LocalBoxFuture;
use serde::Deserialize;

use inkwell_core::ports::{AuthError, TokenClaims};
use inkwell_shared::ErrorResponse;

use crate::state::AppState;

/// The authenticated requester.
///
/// Take it as a handler argument to require authentication:
/// ```ignore
/// async fn protected_route(identity: Identity) -> impl Responder {
///     format!("Hello, user {}!", identity.user_id)
/// }
/// ```
/// The token is read from `Authorization: Bearer <token>`, falling back to
/// the `token` query parameter. Revoked tokens are rejected.
#[derive(Debug, Clone)]
pub struct Identity {
    pub user_id: i32,
    pub token_id: String,
    pub expires_at: DateTime<Utc>,
}

impl From<TokenClaims> for Identity {
    fn from(claims: TokenClaims) -> Self {
        Self {
            user_id: claims.user_id,
            token_id: claims.token_id,
            expires_at: claims.expires_at,
        }
    }
}

impl Identity {
    /// Revoke the token this identity was authenticated with.
    pub async fn revoke(&self, state: &AppState) {
        state
            .revoked_tokens
            .revoke(&self.token_id, self.expires_at)
            .await;
        tracing::debug!(user_id = self.user_id, "Token revoked");
    }
}

/// Error type for authentication failures. Always a 401.
#[derive(Debug)]
pub struct AuthenticationError(pub AuthError);

impl std::fmt::Display for AuthenticationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl actix_web::ResponseError for AuthenticationError {
    fn status_code(&self) -> actix_web::http::StatusCode {
        actix_web::http::StatusCode::UNAUTHORIZED
    }

    fn error_response(&self) -> actix_web::HttpResponse {
        let error = match &self.0 {
            AuthError::TokenExpired => ErrorResponse::new(401, "Token Expired")
                .with_detail("Your authentication token has expired. Please login again."),
            AuthError::TokenRevoked => ErrorResponse::new(401, "Token Revoked")
                .with_detail("This token is no longer valid. Please login again."),
            AuthError::InvalidToken(msg) => {
                ErrorResponse::new(401, "Invalid Token").with_detail(msg.clone())
            }
            AuthError::MissingAuth => ErrorResponse::new(401, "Authentication Required")
                .with_detail("Provide a Bearer token in the Authorization header or a token query parameter."),
            _ => ErrorResponse::unauthorized(),
        };

        actix_web::HttpResponse::build(self.status_code()).json(error)
    }
}

#[derive(Deserialize)]
struct TokenQuery {
    token: Option<String>,
}

/// Raw token from the request, header first.
fn extract_token(req: &HttpRequest) -> Result<String, AuthError> {
    if let Some(value) = req.headers().get(header::AUTHORIZATION) {
        let auth_str = value
            .to_str()
            .map_err(|_| AuthError::InvalidToken("Invalid authorization header".to_string()))?;

        let (scheme, token) = auth_str
            .split_once(' ')
            .ok_or_else(|| AuthError::InvalidToken("Expected Bearer token".to_string()))?;
        if !scheme.eq_ignore_ascii_case("bearer") || token.trim().is_empty() {
            return Err(AuthError::InvalidToken("Expected Bearer token".to_string()));
        }
        return Ok(token.trim().to_string());
    }

    web::Query::<TokenQuery>::from_query(req.query_string())
        .ok()
        .and_then(|q| q.into_inner().token)
        .filter(|t| !t.is_empty())
        .ok_or(AuthError::MissingAuth)
}

impl FromRequest for Identity {
    type Error = AuthenticationError;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let state = req.app_data::<web::Data<AppState>>().cloned();
        let token = extract_token(req);

        Box::pin(async move {
            let state = state.ok_or_else(|| {
                tracing::error!("AppState not found in app data");
                AuthenticationError(AuthError::InvalidToken(
                    "Server configuration error".to_string(),
                ))
            })?;
            let token = token.map_err(AuthenticationError)?;

            let claims = state
                .tokens
                .validate_token(&token)
                .map_err(AuthenticationError)?;

            if state.revoked_tokens.is_revoked(&claims.token_id).await {
                return Err(AuthenticationError(AuthError::TokenRevoked));
            }

            Ok(Identity::from(claims))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    #[test]
    fn test_extract_bearer_header() {
        let req = TestRequest::default()
            .insert_header((header::AUTHORIZATION, "Bearer abc.def"))
            .to_http_request();

        assert_eq!(extract_token(&req).unwrap(), "abc.def");
    }

    #[test]
    fn test_extract_lowercase_scheme() {
        let req = TestRequest::default()
            .insert_header((header::AUTHORIZATION, "bearer abc"))
            .to_http_request();

        assert_eq!(extract_token(&req).unwrap(), "abc");
    }

    #[test]
    fn test_extract_query_parameter() {
        let req = TestRequest::with_uri("/users/1?token=xyz").to_http_request();

        assert_eq!(extract_token(&req).unwrap(), "xyz");
    }

    #[test]
    fn test_missing_token() {
        let req = TestRequest::with_uri("/users/1").to_http_request();

        assert!(matches!(extract_token(&req), Err(AuthError::MissingAuth)));
    }

    #[test]
    fn test_non_bearer_scheme_is_rejected() {
        let req = TestRequest::default()
            .insert_header((header::AUTHORIZATION, "Basic dXNlcjpwdw=="))
            .to_http_request();

        assert!(matches!(
            extract_token(&req),
            Err(AuthError::InvalidToken(_))
        ));
    }
}
