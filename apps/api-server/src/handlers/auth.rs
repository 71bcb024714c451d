//! Authentication handlers.

use actix_web::{HttpResponse, web};

use inkwell_core::ValidationErrors;
use inkwell_core::domain::NewUser;
use inkwell_core::error::RepoError;
use inkwell_core::validation::{validate_login, validate_registration};
use inkwell_shared::dto::{AuthResponse, LoginRequest, RegisterUserRequest};

use super::present;
use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};
use crate::middleware::input::JsonInput;
use crate::state::AppState;

fn email_taken() -> AppError {
    ValidationErrors::single("email", "has already been taken").into()
}

/// POST /auth/register
pub async fn register(
    state: web::Data<AppState>,
    body: JsonInput<RegisterUserRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let creds = validate_registration(req.email.as_deref(), req.password.as_deref())?;

    if state.users.find_by_email(&creds.email).await?.is_some() {
        return Err(email_taken());
    }

    let password_hash = state.passwords.hash(&creds.password)?;

    // The unique index still guards against a concurrent registration.
    let user = match state.users.create(NewUser::new(creds.email, password_hash)).await {
        Ok(user) => user,
        Err(RepoError::Constraint(_)) => return Err(email_taken()),
        Err(e) => return Err(e.into()),
    };

    tracing::info!(user_id = user.id, "User registered");
    Ok(HttpResponse::Ok().json(present::user(&user)))
}

/// POST /auth/login
pub async fn login(
    state: web::Data<AppState>,
    body: JsonInput<LoginRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let creds = validate_login(req.email.as_deref(), req.password.as_deref())?;

    let user = state
        .users
        .find_by_email(&creds.email)
        .await?
        .ok_or(AppError::Unauthorized)?;

    if !state.passwords.verify(&creds.password, &user.password_hash)? {
        tracing::info!(user_id = user.id, "Login rejected: wrong password");
        return Err(AppError::Unauthorized);
    }

    let token = state
        .tokens
        .generate_token(user.id, &user.email)
        .map_err(|e| AppError::Internal(e.to_string()))?;

    tracing::info!(user_id = user.id, "User logged in");
    Ok(HttpResponse::Ok().json(AuthResponse::bearer(
        token,
        state.tokens.expiration_seconds().max(0) as u64,
    )))
}

/// GET /auth/me
pub async fn me(state: web::Data<AppState>, identity: Identity) -> AppResult<HttpResponse> {
    let user = state
        .users
        .find_by_id(identity.user_id)
        .await?
        .ok_or(AppError::Unauthorized)?;

    Ok(HttpResponse::Ok().json(present::user(&user)))
}

/// POST /auth/logout
pub async fn logout(state: web::Data<AppState>, identity: Identity) -> AppResult<HttpResponse> {
    identity.revoke(&state).await;

    Ok(HttpResponse::Ok().json(serde_json::json!({ "message": "Successfully logged out" })))
}
