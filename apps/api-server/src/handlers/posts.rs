//! Post handlers.

use std::collections::HashMap;

use actix_web::{HttpResponse, web};

use inkwell_core::domain::{NewPost, Post, PostDetails};
use inkwell_core::policy::authorize_edit;
use inkwell_core::validation::{validate_new_post, validate_post_changes};
use inkwell_shared::dto::{PostQuery, PostRequest};

use super::present;
use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};
use crate::middleware::input::JsonInput;
use crate::state::AppState;

/// Attach authors and comment counts, two lookups for the whole batch.
pub(super) async fn load_details(state: &AppState, posts: Vec<Post>) -> AppResult<Vec<PostDetails>> {
    if posts.is_empty() {
        return Ok(Vec::new());
    }

    let post_ids: Vec<i32> = posts.iter().map(|p| p.id).collect();
    let mut author_ids: Vec<i32> = posts.iter().map(|p| p.user_id).collect();
    author_ids.sort_unstable();
    author_ids.dedup();

    let authors: HashMap<i32, _> = state
        .users
        .find_by_ids(&author_ids)
        .await?
        .into_iter()
        .map(|u| (u.id, u))
        .collect();
    let counts = state.comments.count_by_post_ids(&post_ids).await?;

    posts
        .into_iter()
        .map(|post| -> AppResult<PostDetails> {
            let author = authors.get(&post.user_id).cloned().ok_or_else(|| {
                AppError::Internal(format!("post {} has no owner {}", post.id, post.user_id))
            })?;
            Ok(PostDetails {
                comments_count: counts.get(&post.id).copied().unwrap_or(0),
                author,
                post,
                comments: None,
            })
        })
        .collect()
}

async fn load_one(state: &AppState, post: Post) -> AppResult<PostDetails> {
    load_details(state, vec![post])
        .await?
        .pop()
        .ok_or_else(|| AppError::Internal("post details missing".to_string()))
}

async fn find_post(state: &AppState, id: i32) -> AppResult<Post> {
    state
        .posts
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::not_found("Post", id))
}

/// GET /posts
pub async fn list(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let posts = state.posts.find_all().await?;
    let details = load_details(&state, posts).await?;

    Ok(HttpResponse::Ok().json(details.iter().map(present::post).collect::<Vec<_>>()))
}

/// GET /posts/{id}?comments=1
pub async fn show(
    state: web::Data<AppState>,
    path: web::Path<i32>,
    query: web::Query<PostQuery>,
) -> AppResult<HttpResponse> {
    let post = find_post(&state, path.into_inner()).await?;
    let mut details = load_one(&state, post).await?;

    if query.with_comments() {
        details.comments = Some(state.comments.find_by_post_id(details.post.id).await?);
    }

    Ok(HttpResponse::Ok().json(present::post(&details)))
}

/// POST /posts
pub async fn create(
    state: web::Data<AppState>,
    identity: Identity,
    body: JsonInput<PostRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let content = validate_new_post(req.title.as_deref(), req.text.as_deref())?;

    let post = state
        .posts
        .create(NewPost::new(identity.user_id, content.title, content.text))
        .await?;

    tracing::info!(post_id = post.id, user_id = identity.user_id, "Post created");
    let details = load_one(&state, post).await?;
    Ok(HttpResponse::Ok().json(present::post(&details)))
}

/// PUT /posts/{id}
pub async fn update(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<i32>,
    body: JsonInput<PostRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let changes = validate_post_changes(req.title.as_deref(), req.text.as_deref())?;

    let mut post = find_post(&state, path.into_inner()).await?;
    authorize_edit(Some(identity.user_id), &post)?;

    post.apply(changes);
    let post = state.posts.update(post).await?;

    tracing::info!(post_id = post.id, "Post updated");
    let details = load_one(&state, post).await?;
    Ok(HttpResponse::Ok().json(present::post(&details)))
}

/// DELETE /posts/{id}
pub async fn delete(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<i32>,
) -> AppResult<HttpResponse> {
    let post = find_post(&state, path.into_inner()).await?;
    authorize_edit(Some(identity.user_id), &post)?;

    state.posts.delete(post.id).await?;

    tracing::info!(post_id = post.id, "Post deleted");
    Ok(HttpResponse::Ok().finish())
}
