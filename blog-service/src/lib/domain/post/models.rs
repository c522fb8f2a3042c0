use std::fmt;

use chrono::DateTime;
use chrono::Utc;

use crate::domain::post::errors::PostIdError;
use crate::domain::post::errors::PostTitleError;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::models::UserName;

/// Post unique identifier value object, assigned by storage on insert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PostId(pub i64);

impl PostId {
    /// Parse a post ID from string.
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a positive integer
    pub fn from_string(s: &str) -> Result<Self, PostIdError> {
        match s.parse::<i64>() {
            Ok(id) if id > 0 => Ok(PostId(id)),
            Ok(id) => Err(PostIdError::InvalidFormat(id.to_string())),
            Err(e) => Err(PostIdError::InvalidFormat(e.to_string())),
        }
    }
}

impl fmt::Display for PostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Blog post aggregate.
///
/// `owner` is fixed when the post is created and never changes afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    pub id: PostId,
    pub title: PostTitle,
    pub body: String,
    pub owner: PostOwner,
    pub created_at: DateTime<Utc>,
}

impl Post {
    pub fn is_owned_by(&self, user_id: UserId) -> bool {
        self.owner.id == user_id
    }
}

/// Public view of the user who created a post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostOwner {
    pub id: UserId,
    pub name: UserName,
    pub email: EmailAddress,
}

impl From<&User> for PostOwner {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
        }
    }
}

/// Post title value object with validation.
///
/// Ensures title is non-blank and within 200 character limit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostTitle(String);

impl PostTitle {
    const MAX_LENGTH: usize = 200;

    /// Create a new validated post title.
    ///
    /// # Errors
    /// * `Empty` - Title is blank
    /// * `TooLong` - Title exceeds 200 characters
    pub fn new(title: String) -> Result<Self, PostTitleError> {
        let trimmed = title.trim();
        let length = trimmed.chars().count();
        if length == 0 {
            Err(PostTitleError::Empty)
        } else if length > Self::MAX_LENGTH {
            Err(PostTitleError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            })
        } else {
            Ok(Self(trimmed.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PostTitle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Record handed to storage when a post is created. Storage assigns the id.
#[derive(Debug, Clone)]
pub struct NewPost {
    pub title: PostTitle,
    pub body: String,
    pub owner: PostOwner,
    pub created_at: DateTime<Utc>,
}

/// Client-supplied content for a new post. Carries no owner: the owner is
/// always the authenticated caller.
#[derive(Debug, Clone)]
pub struct CreatePostCommand {
    pub title: PostTitle,
    pub body: String,
}

/// Replacement content for an existing post.
#[derive(Debug, Clone)]
pub struct UpdatePostCommand {
    pub title: PostTitle,
    pub body: String,
}
