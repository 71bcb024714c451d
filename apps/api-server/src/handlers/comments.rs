//! Comment handlers, nested under their post.

use actix_web::{HttpResponse, web};

use inkwell_core::domain::NewComment;
use inkwell_core::validation::validate_new_comment;
use inkwell_shared::dto::CommentRequest;

use super::present;
use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};
use crate::middleware::input::JsonInput;
use crate::state::AppState;

/// GET /posts/{id}/comments
pub async fn list_for_post(
    state: web::Data<AppState>,
    path: web::Path<i32>,
) -> AppResult<HttpResponse> {
    let post_id = path.into_inner();
    if state.posts.find_by_id(post_id).await?.is_none() {
        return Err(AppError::not_found("Post", post_id));
    }

    let comments = state.comments.find_by_post_id(post_id).await?;
    Ok(HttpResponse::Ok().json(comments.iter().map(present::comment).collect::<Vec<_>>()))
}

/// POST /posts/{id}/comments
pub async fn create(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<i32>,
    body: JsonInput<CommentRequest>,
) -> AppResult<HttpResponse> {
    let post_id = path.into_inner();
    let text = validate_new_comment(body.into_inner().text.as_deref())?;

    if state.posts.find_by_id(post_id).await?.is_none() {
        return Err(AppError::not_found("Post", post_id));
    }

    let comment = state
        .comments
        .create(NewComment::new(post_id, identity.user_id, text))
        .await?;

    tracing::info!(comment_id = comment.id, post_id, "Comment created");
    Ok(HttpResponse::Ok().json(present::comment(&comment)))
}
