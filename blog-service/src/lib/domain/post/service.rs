use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use super::errors::PostError;
use super::models::CreatePostCommand;
use super::models::NewPost;
use super::models::Post;
use super::models::PostId;
use super::models::PostOwner;
use super::models::UpdatePostCommand;
use super::ports::PostRepository;
use super::ports::PostServicePort;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;

/// Concrete implementation of PostServicePort.
///
/// Generic over repository for testability.
pub struct PostService<PR>
where
    PR: PostRepository,
{
    post_repository: Arc<PR>,
}

impl<PR> PostService<PR>
where
    PR: PostRepository,
{
    pub fn new(post_repository: Arc<PR>) -> Self {
        Self { post_repository }
    }

    /// Load a post and make sure `author` owns it.
    async fn owned_post(&self, author: &User, id: PostId) -> Result<Post, PostError> {
        let post = self.get_post(id).await?;

        if !post.is_owned_by(author.id) {
            tracing::warn!(
                user_id = %author.id,
                post_id = %id,
                "Write rejected: not the post owner"
            );
            return Err(PostError::NotOwner {
                user_id: author.id,
                post_id: id,
            });
        }

        Ok(post)
    }
}

#[async_trait]
impl<PR> PostServicePort for PostService<PR>
where
    PR: PostRepository,
{
    async fn list_posts(&self) -> Result<Vec<Post>, PostError> {
        self.post_repository.list_all().await
    }

    async fn list_posts_by_owner(&self, owner_id: &UserId) -> Result<Vec<Post>, PostError> {
        self.post_repository.find_by_owner(owner_id).await
    }

    async fn create_post(
        &self,
        author: &User,
        command: CreatePostCommand,
    ) -> Result<Post, PostError> {
        let post = NewPost {
            title: command.title,
            body: command.body,
            owner: PostOwner::from(author),
            created_at: Utc::now(),
        };

        let created = self.post_repository.create(post).await?;
        tracing::info!(post_id = %created.id, owner_id = %author.id, "Post created");

        Ok(created)
    }

    async fn get_post(&self, id: PostId) -> Result<Post, PostError> {
        self.post_repository
            .find_by_id(id)
            .await?
            .ok_or(PostError::NotFound(id))
    }

    async fn update_post(
        &self,
        author: &User,
        id: PostId,
        command: UpdatePostCommand,
    ) -> Result<Post, PostError> {
        let mut post = self.owned_post(author, id).await?;

        post.title = command.title;
        post.body = command.body;

        self.post_repository.update(post).await
    }

    async fn delete_post(&self, author: &User, id: PostId) -> Result<(), PostError> {
        self.owned_post(author, id).await?;

        self.post_repository.delete(id).await?;
        tracing::info!(post_id = %id, owner_id = %author.id, "Post deleted");

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use mockall::mock;

    use super::*;
    use crate::domain::post::models::PostTitle;
    use crate::domain::user::models::EmailAddress;
    use crate::domain::user::models::UserName;

    mock! {
        pub TestPostRepository {}

        #[async_trait]
        impl PostRepository for TestPostRepository {
            async fn create(&self, post: NewPost) -> Result<Post, PostError>;
            async fn list_all(&self) -> Result<Vec<Post>, PostError>;
            async fn find_by_owner(&self, owner_id: &UserId) -> Result<Vec<Post>, PostError>;
            async fn find_by_id(&self, id: PostId) -> Result<Option<Post>, PostError>;
            async fn update(&self, post: Post) -> Result<Post, PostError>;
            async fn delete(&self, id: PostId) -> Result<(), PostError>;
        }
    }

    fn user(id: i64, name: &str) -> User {
        User {
            id: UserId(id),
            name: UserName::new(name.to_string()).unwrap(),
            email: EmailAddress::new(format!("{}@example.com", name.to_lowercase())).unwrap(),
            password_hash: "$argon2id$test_hash".to_string(),
            created_at: Utc::now(),
        }
    }

    fn post_owned_by(id: i64, owner: &User) -> Post {
        Post {
            id: PostId(id),
            title: PostTitle::new("First post".to_string()).unwrap(),
            body: "Hello".to_string(),
            owner: PostOwner::from(owner),
            created_at: Utc::now(),
        }
    }

    fn update_command() -> UpdatePostCommand {
        UpdatePostCommand {
            title: PostTitle::new("Edited".to_string()).unwrap(),
            body: "Edited body".to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_post_owner_is_author() {
        let mut repository = MockTestPostRepository::new();
        let alice = user(1, "Alice");

        repository
            .expect_create()
            .withf(|post| post.owner.id == UserId(1) && post.title.as_str() == "First post")
            .times(1)
            .returning(|post| {
                Ok(Post {
                    id: PostId(10),
                    title: post.title,
                    body: post.body,
                    owner: post.owner,
                    created_at: post.created_at,
                })
            });

        let service = PostService::new(Arc::new(repository));

        let command = CreatePostCommand {
            title: PostTitle::new("First post".to_string()).unwrap(),
            body: "Hello".to_string(),
        };

        let post = service.create_post(&alice, command).await.unwrap();
        assert_eq!(post.id, PostId(10));
        assert_eq!(post.owner.id, alice.id);
        assert_eq!(post.owner.email, alice.email);
    }

    #[tokio::test]
    async fn test_get_post_not_found() {
        let mut repository = MockTestPostRepository::new();

        repository
            .expect_find_by_id()
            .times(1)
            .returning(|_| Ok(None));

        let service = PostService::new(Arc::new(repository));

        let result = service.get_post(PostId(5)).await;
        assert!(matches!(result.unwrap_err(), PostError::NotFound(PostId(5))));
    }

    #[tokio::test]
    async fn test_update_post_by_owner() {
        let mut repository = MockTestPostRepository::new();
        let alice = user(1, "Alice");
        let existing = post_owned_by(3, &alice);

        repository
            .expect_find_by_id()
            .times(1)
            .returning(move |_| Ok(Some(existing.clone())));
        repository
            .expect_update()
            .withf(|post| post.title.as_str() == "Edited" && post.owner.id == UserId(1))
            .times(1)
            .returning(|post| Ok(post));

        let service = PostService::new(Arc::new(repository));

        let post = service
            .update_post(&alice, PostId(3), update_command())
            .await
            .unwrap();
        assert_eq!(post.body, "Edited body");
        assert_eq!(post.owner.id, UserId(1));
    }

    #[tokio::test]
    async fn test_update_post_by_other_user() {
        let mut repository = MockTestPostRepository::new();
        let alice = user(1, "Alice");
        let bob = user(2, "Bob");
        let existing = post_owned_by(3, &alice);

        repository
            .expect_find_by_id()
            .times(1)
            .returning(move |_| Ok(Some(existing.clone())));
        repository.expect_update().times(0);

        let service = PostService::new(Arc::new(repository));

        let result = service.update_post(&bob, PostId(3), update_command()).await;
        assert!(matches!(
            result.unwrap_err(),
            PostError::NotOwner {
                user_id: UserId(2),
                post_id: PostId(3)
            }
        ));
    }

    #[tokio::test]
    async fn test_update_post_not_found() {
        let mut repository = MockTestPostRepository::new();

        repository
            .expect_find_by_id()
            .times(1)
            .returning(|_| Ok(None));
        repository.expect_update().times(0);

        let service = PostService::new(Arc::new(repository));

        let result = service
            .update_post(&user(1, "Alice"), PostId(3), update_command())
            .await;
        assert!(matches!(result.unwrap_err(), PostError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_delete_post_by_owner() {
        let mut repository = MockTestPostRepository::new();
        let alice = user(1, "Alice");
        let existing = post_owned_by(3, &alice);

        repository
            .expect_find_by_id()
            .times(1)
            .returning(move |_| Ok(Some(existing.clone())));
        repository
            .expect_delete()
            .withf(|id| *id == PostId(3))
            .times(1)
            .returning(|_| Ok(()));

        let service = PostService::new(Arc::new(repository));

        assert!(service.delete_post(&alice, PostId(3)).await.is_ok());
    }

    #[tokio::test]
    async fn test_delete_post_by_other_user() {
        let mut repository = MockTestPostRepository::new();
        let alice = user(1, "Alice");
        let existing = post_owned_by(3, &alice);

        repository
            .expect_find_by_id()
            .times(1)
            .returning(move |_| Ok(Some(existing.clone())));
        repository.expect_delete().times(0);

        let service = PostService::new(Arc::new(repository));

        let result = service.delete_post(&user(2, "Bob"), PostId(3)).await;
        assert!(matches!(result.unwrap_err(), PostError::NotOwner { .. }));
    }

    #[tokio::test]
    async fn test_list_posts_by_owner() {
        let mut repository = MockTestPostRepository::new();
        let alice = user(1, "Alice");
        let posts = vec![post_owned_by(1, &alice), post_owned_by(2, &alice)];

        repository
            .expect_find_by_owner()
            .withf(|owner_id| *owner_id == UserId(1))
            .times(1)
            .returning(move |_| Ok(posts.clone()));

        let service = PostService::new(Arc::new(repository));

        let posts = service.list_posts_by_owner(&UserId(1)).await.unwrap();
        assert_eq!(posts.len(), 2);
    }
}
