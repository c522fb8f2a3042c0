use thiserror::Error;

use crate::domain::post::models::PostId;
use crate::domain::user::models::UserId;

/// Error type for PostId parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PostIdError {
    #[error("Invalid post id: {0}")]
    InvalidFormat(String),
}

/// Error type for PostTitle validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PostTitleError {
    #[error("Post title is empty")]
    Empty,

    #[error("Post title too long: maximum {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },
}

/// Top-level error type for all post-related operations
#[derive(Debug, Clone, Error)]
pub enum PostError {
    #[error("Invalid post ID: {0}")]
    InvalidPostId(#[from] PostIdError),

    #[error("Invalid post title: {0}")]
    InvalidTitle(#[from] PostTitleError),

    #[error("Post with id {0} not found")]
    NotFound(PostId),

    #[error("User {user_id} does not own post {post_id}")]
    NotOwner { user_id: UserId, post_id: PostId },

    // Infrastructure errors
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Unknown error: {0}")]
    Unknown(String),
}
