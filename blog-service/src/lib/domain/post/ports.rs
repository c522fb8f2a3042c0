use async_trait::async_trait;

use crate::domain::post::errors::PostError;
use crate::domain::post::models::CreatePostCommand;
use crate::domain::post::models::NewPost;
use crate::domain::post::models::Post;
use crate::domain::post::models::PostId;
use crate::domain::post::models::UpdatePostCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;

/// Port for post domain service operations.
///
/// Write operations take the authenticated caller explicitly; ownership is
/// derived from it and never from request content.
#[async_trait]
pub trait PostServicePort: Send + Sync + 'static {
    /// List every post, oldest first.
    async fn list_posts(&self) -> Result<Vec<Post>, PostError>;

    /// List the posts owned by one user, oldest first.
    async fn list_posts_by_owner(&self, owner_id: &UserId) -> Result<Vec<Post>, PostError>;

    /// Create a post owned by `author`.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn create_post(&self, author: &User, command: CreatePostCommand)
        -> Result<Post, PostError>;

    /// Retrieve a post by id.
    ///
    /// # Errors
    /// * `NotFound` - Post does not exist
    async fn get_post(&self, id: PostId) -> Result<Post, PostError>;

    /// Replace title and body of a post owned by `author`.
    ///
    /// # Errors
    /// * `NotFound` - Post does not exist
    /// * `NotOwner` - `author` did not create the post
    async fn update_post(
        &self,
        author: &User,
        id: PostId,
        command: UpdatePostCommand,
    ) -> Result<Post, PostError>;

    /// Delete a post owned by `author`.
    ///
    /// # Errors
    /// * `NotFound` - Post does not exist
    /// * `NotOwner` - `author` did not create the post
    async fn delete_post(&self, author: &User, id: PostId) -> Result<(), PostError>;
}

/// Persistence operations for post aggregate.
#[async_trait]
pub trait PostRepository: Send + Sync + 'static {
    /// Persist a new post, assigning its id. The owner id is taken from
    /// `post.owner`.
    async fn create(&self, post: NewPost) -> Result<Post, PostError>;

    /// Retrieve all posts ordered by id.
    async fn list_all(&self) -> Result<Vec<Post>, PostError>;

    /// Retrieve posts of one owner ordered by id.
    async fn find_by_owner(&self, owner_id: &UserId) -> Result<Vec<Post>, PostError>;

    /// Retrieve post by identifier.
    ///
    /// # Returns
    /// Optional post (None if not found)
    async fn find_by_id(&self, id: PostId) -> Result<Option<Post>, PostError>;

    /// Store new title and body for an existing post.
    ///
    /// # Errors
    /// * `NotFound` - Post does not exist
    async fn update(&self, post: Post) -> Result<Post, PostError>;

    /// Remove post from storage.
    ///
    /// # Errors
    /// * `NotFound` - Post does not exist
    async fn delete(&self, id: PostId) -> Result<(), PostError>;
}
