//! Domain entities to wire types.

use inkwell_core::domain::{Comment, PostDetails, User};
use inkwell_shared::dto::{CommentResponse, PostResponse, UserResponse};

pub fn user(user: &User) -> UserResponse {
    UserResponse {
        id: user.id,
        email: user.email.clone(),
        created_at: user.created_at,
        updated_at: user.updated_at,
    }
}

pub fn comment(comment: &Comment) -> CommentResponse {
    CommentResponse {
        id: comment.id,
        post_id: comment.post_id,
        user_id: comment.user_id,
        text: comment.text.clone(),
        created_at: comment.created_at,
        updated_at: comment.updated_at,
    }
}

pub fn post(details: &PostDetails) -> PostResponse {
    let post = &details.post;
    PostResponse {
        id: post.id,
        title: post.title.clone(),
        text: post.text.clone(),
        created_at: post.created_at,
        updated_at: post.updated_at,
        comments_count: details.comments_count,
        user: user(&details.author),
        comments: details
            .comments
            .as_ref()
            .map(|comments| comments.iter().map(comment).collect()),
    }
}
