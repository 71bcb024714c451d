//! User handlers.

use actix_web::{HttpResponse, web};

use inkwell_core::domain::User;
use inkwell_core::error::RepoError;
use inkwell_core::policy::authorize_edit;
use inkwell_core::validation::validate_profile_changes;
use inkwell_shared::dto::UpdateUserRequest;

use super::posts::load_details;
use super::present;
use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};
use crate::middleware::input::JsonInput;
use crate::state::AppState;

async fn find_user(state: &AppState, id: i32) -> AppResult<User> {
    state
        .users
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::not_found("User", id))
}

fn email_in_use() -> AppError {
    AppError::Conflict("Email already in use".to_string())
}

/// GET /users
pub async fn list(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let users = state.users.find_all().await?;

    Ok(HttpResponse::Ok().json(users.iter().map(present::user).collect::<Vec<_>>()))
}

/// GET /users/{id}
pub async fn show(state: web::Data<AppState>, path: web::Path<i32>) -> AppResult<HttpResponse> {
    let user = find_user(&state, path.into_inner()).await?;

    Ok(HttpResponse::Ok().json(present::user(&user)))
}

/// PUT /users/{id}
///
/// Checks run in order: token, input, target exists, target is the
/// requester, email free. Changing email or password revokes the token
/// used for the call.
pub async fn update(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<i32>,
    body: JsonInput<UpdateUserRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let changes = validate_profile_changes(req.email.as_deref(), req.password.as_deref())?;

    let credentials_changed = changes.email.is_some() || changes.password.is_some();

    let mut user = find_user(&state, path.into_inner()).await?;
    authorize_edit(Some(identity.user_id), &user)?;

    if let Some(email) = changes.email.as_deref() {
        if let Some(existing) = state.users.find_by_email(email).await? {
            if existing.id != user.id {
                return Err(email_in_use());
            }
        }
    }

    let password_hash = match changes.password.as_deref() {
        Some(password) => Some(state.passwords.hash(password)?),
        None => None,
    };

    user.apply(changes.email, password_hash);
    let user = match state.users.update(user).await {
        Ok(user) => user,
        Err(RepoError::Constraint(_)) => return Err(email_in_use()),
        Err(e) => return Err(e.into()),
    };

    if credentials_changed {
        identity.revoke(&state).await;
    }

    tracing::info!(user_id = user.id, "User updated");
    Ok(HttpResponse::Ok().json(present::user(&user)))
}

/// GET /users/{id}/posts
pub async fn posts(state: web::Data<AppState>, path: web::Path<i32>) -> AppResult<HttpResponse> {
    let user = find_user(&state, path.into_inner()).await?;
    let posts = state.posts.find_by_user_id(user.id).await?;
    let details = load_details(&state, posts).await?;

    Ok(HttpResponse::Ok().json(details.iter().map(present::post).collect::<Vec<_>>()))
}

/// GET /users/{id}/comments
pub async fn comments(state: web::Data<AppState>, path: web::Path<i32>) -> AppResult<HttpResponse> {
    let user = find_user(&state, path.into_inner()).await?;
    let comments = state.comments.find_by_user_id(user.id).await?;

    Ok(HttpResponse::Ok().json(comments.iter().map(present::comment).collect::<Vec<_>>()))
}
