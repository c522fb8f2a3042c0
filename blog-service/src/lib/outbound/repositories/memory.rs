//! Process-local repositories used when no database is configured, and by the
//! integration tests. Contents are lost on restart.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::domain::post::errors::PostError;
use crate::domain::post::models::NewPost;
use crate::domain::post::models::Post;
use crate::domain::post::models::PostId;
use crate::domain::post::models::PostOwner;
use crate::domain::post::models::PostTitle;
use crate::domain::post::ports::PostRepository;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::NewUser;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::ports::UserRepository;
use crate::user::errors::UserError;

struct Table<V> {
    rows: BTreeMap<i64, V>,
    next_id: i64,
}

impl<V> Default for Table<V> {
    fn default() -> Self {
        Self {
            rows: BTreeMap::new(),
            next_id: 1,
        }
    }
}

impl<V> Table<V> {
    fn allocate_id(&mut self) -> i64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}

#[derive(Clone, Default)]
pub struct InMemoryUserRepository {
    users: Arc<RwLock<Table<User>>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    async fn owner(&self, id: &UserId) -> Option<PostOwner> {
        self.users.read().await.rows.get(&id.0).map(PostOwner::from)
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: NewUser) -> Result<User, UserError> {
        let mut table = self.users.write().await;

        if table.rows.values().any(|u| u.email == user.email) {
            return Err(UserError::EmailAlreadyExists(
                user.email.as_str().to_string(),
            ));
        }

        let id = UserId(table.allocate_id());
        let created = User {
            id,
            name: user.name,
            email: user.email,
            password_hash: user.password_hash,
            created_at: user.created_at,
        };
        table.rows.insert(id.0, created.clone());

        Ok(created)
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError> {
        Ok(self.users.read().await.rows.get(&id.0).cloned())
    }

    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<User>, UserError> {
        Ok(self
            .users
            .read()
            .await
            .rows
            .values()
            .find(|u| &u.email == email)
            .cloned())
    }
}

/// Posts keep only the owner id; name and email are read from the user
/// repository on every lookup, the same way the SQL adapter joins `users`.
pub struct InMemoryPostRepository {
    posts: RwLock<Table<StoredPost>>,
    users: InMemoryUserRepository,
}

#[derive(Clone)]
struct StoredPost {
    title: PostTitle,
    body: String,
    owner_id: UserId,
    created_at: DateTime<Utc>,
}

impl InMemoryPostRepository {
    pub fn new(users: InMemoryUserRepository) -> Self {
        Self {
            posts: RwLock::new(Table::default()),
            users,
        }
    }

    async fn hydrate(&self, id: i64, stored: StoredPost) -> Result<Post, PostError> {
        let owner = self.users.owner(&stored.owner_id).await.ok_or_else(|| {
            PostError::DatabaseError(format!("Owner {} of post {} is missing", stored.owner_id, id))
        })?;

        Ok(Post {
            id: PostId(id),
            title: stored.title,
            body: stored.body,
            owner,
            created_at: stored.created_at,
        })
    }

    async fn load_where<F>(&self, filter: F) -> Result<Vec<Post>, PostError>
    where
        F: Fn(&StoredPost) -> bool,
    {
        let snapshot: Vec<(i64, StoredPost)> = self
            .posts
            .read()
            .await
            .rows
            .iter()
            .filter(|(_, p)| filter(p))
            .map(|(id, p)| (*id, p.clone()))
            .collect();

        let mut posts = Vec::with_capacity(snapshot.len());
        for (id, stored) in snapshot {
            posts.push(self.hydrate(id, stored).await?);
        }
        Ok(posts)
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn create(&self, post: NewPost) -> Result<Post, PostError> {
        if self.users.owner(&post.owner.id).await.is_none() {
            return Err(PostError::DatabaseError(format!(
                "Owner {} does not exist",
                post.owner.id
            )));
        }

        let mut table = self.posts.write().await;
        let id = table.allocate_id();
        table.rows.insert(
            id,
            StoredPost {
                title: post.title.clone(),
                body: post.body.clone(),
                owner_id: post.owner.id,
                created_at: post.created_at,
            },
        );

        Ok(Post {
            id: PostId(id),
            title: post.title,
            body: post.body,
            owner: post.owner,
            created_at: post.created_at,
        })
    }

    async fn list_all(&self) -> Result<Vec<Post>, PostError> {
        self.load_where(|_| true).await
    }

    async fn find_by_owner(&self, owner_id: &UserId) -> Result<Vec<Post>, PostError> {
        self.load_where(|p| p.owner_id == *owner_id).await
    }

    async fn find_by_id(&self, id: PostId) -> Result<Option<Post>, PostError> {
        let stored = self.posts.read().await.rows.get(&id.0).cloned();
        match stored {
            Some(stored) => self.hydrate(id.0, stored).await.map(Some),
            None => Ok(None),
        }
    }

    async fn update(&self, post: Post) -> Result<Post, PostError> {
        let mut table = self.posts.write().await;
        let stored = table
            .rows
            .get_mut(&post.id.0)
            .ok_or(PostError::NotFound(post.id))?;

        stored.title = post.title.clone();
        stored.body = post.body.clone();

        Ok(post)
    }

    async fn delete(&self, id: PostId) -> Result<(), PostError> {
        self.posts
            .write()
            .await
            .rows
            .remove(&id.0)
            .map(|_| ())
            .ok_or(PostError::NotFound(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::user::models::UserName;

    fn new_user(name: &str, email: &str) -> NewUser {
        NewUser {
            name: UserName::new(name.to_string()).unwrap(),
            email: EmailAddress::new(email.to_string()).unwrap(),
            password_hash: "$argon2id$test_hash".to_string(),
            created_at: Utc::now(),
        }
    }

    fn new_post(owner: &User, title: &str) -> NewPost {
        NewPost {
            title: PostTitle::new(title.to_string()).unwrap(),
            body: "body".to_string(),
            owner: PostOwner::from(owner),
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_user_ids_are_sequential() {
        let users = InMemoryUserRepository::new();

        let alice = users.create(new_user("Alice", "alice@example.com")).await.unwrap();
        let bob = users.create(new_user("Bob", "bob@example.com")).await.unwrap();

        assert_eq!(alice.id, UserId(1));
        assert_eq!(bob.id, UserId(2));
    }

    #[tokio::test]
    async fn test_duplicate_email_rejected() {
        let users = InMemoryUserRepository::new();
        users.create(new_user("Alice", "alice@example.com")).await.unwrap();

        let result = users.create(new_user("Other", "alice@example.com")).await;
        assert!(matches!(result, Err(UserError::EmailAlreadyExists(_))));
    }

    #[tokio::test]
    async fn test_find_by_email() {
        let users = InMemoryUserRepository::new();
        let alice = users.create(new_user("Alice", "alice@example.com")).await.unwrap();

        let email = EmailAddress::new("alice@example.com".to_string()).unwrap();
        assert_eq!(users.find_by_email(&email).await.unwrap(), Some(alice));

        let unknown = EmailAddress::new("nobody@example.com".to_string()).unwrap();
        assert_eq!(users.find_by_email(&unknown).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_posts_filtered_by_owner() {
        let users = InMemoryUserRepository::new();
        let posts = InMemoryPostRepository::new(users.clone());
        let alice = users.create(new_user("Alice", "alice@example.com")).await.unwrap();
        let bob = users.create(new_user("Bob", "bob@example.com")).await.unwrap();

        posts.create(new_post(&alice, "one")).await.unwrap();
        posts.create(new_post(&bob, "two")).await.unwrap();
        posts.create(new_post(&alice, "three")).await.unwrap();

        let all = posts.list_all().await.unwrap();
        assert_eq!(all.len(), 3);

        let mine = posts.find_by_owner(&alice.id).await.unwrap();
        let titles: Vec<&str> = mine.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, vec!["one", "three"]);
        assert!(mine.iter().all(|p| p.owner.email == alice.email));
    }

    #[tokio::test]
    async fn test_post_for_unknown_owner_rejected() {
        let users = InMemoryUserRepository::new();
        let posts = InMemoryPostRepository::new(users.clone());
        let ghost = User {
            id: UserId(42),
            name: UserName::new("Ghost".to_string()).unwrap(),
            email: EmailAddress::new("ghost@example.com".to_string()).unwrap(),
            password_hash: String::new(),
            created_at: Utc::now(),
        };

        let result = posts.create(new_post(&ghost, "boo")).await;
        assert!(matches!(result, Err(PostError::DatabaseError(_))));
    }

    #[tokio::test]
    async fn test_update_and_delete_missing_post() {
        let users = InMemoryUserRepository::new();
        let posts = InMemoryPostRepository::new(users.clone());
        let alice = users.create(new_user("Alice", "alice@example.com")).await.unwrap();
        let mut post = posts.create(new_post(&alice, "one")).await.unwrap();

        post.body = "edited".to_string();
        posts.update(post.clone()).await.unwrap();
        assert_eq!(
            posts.find_by_id(post.id).await.unwrap().unwrap().body,
            "edited"
        );

        posts.delete(post.id).await.unwrap();
        assert!(matches!(
            posts.delete(post.id).await,
            Err(PostError::NotFound(_))
        ));
        assert!(matches!(
            posts.update(post).await,
            Err(PostError::NotFound(_))
        ));
    }
}
