//! Domain entities - the core business objects.

mod comment;
mod post;
mod user;

pub use comment::{Comment, NewComment};
pub use post::{NewPost, Post, PostChanges, PostDetails};
pub use user::{NewUser, User};
