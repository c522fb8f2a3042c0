use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::FromRow;
use sqlx::PgPool;

use crate::domain::post::errors::PostError;
use crate::domain::post::models::NewPost;
use crate::domain::post::models::Post;
use crate::domain::post::models::PostId;
use crate::domain::post::models::PostOwner;
use crate::domain::post::models::PostTitle;
use crate::domain::post::ports::PostRepository;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::UserId;
use crate::domain::user::models::UserName;

const SELECT_POSTS: &str = r#"
    SELECT p.id, p.title, p.body, p.created_at,
           u.id AS owner_id, u.name AS owner_name, u.email AS owner_email
    FROM posts p
    JOIN users u ON u.id = p.owner_id
"#;

pub struct PostgresPostRepository {
    pool: PgPool,
}

impl PostgresPostRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct PostRow {
    id: i64,
    title: String,
    body: String,
    created_at: DateTime<Utc>,
    owner_id: i64,
    owner_name: String,
    owner_email: String,
}

impl TryFrom<PostRow> for Post {
    type Error = PostError;

    /// Stored values that no longer validate are storage faults, not bad input.
    fn try_from(row: PostRow) -> Result<Self, Self::Error> {
        let title = PostTitle::new(row.title).map_err(|e| {
            PostError::DatabaseError(format!("Corrupted title of post {}: {}", row.id, e))
        })?;
        let name = UserName::new(row.owner_name)
            .map_err(|e| PostError::DatabaseError(format!("Corrupted owner name: {}", e)))?;
        let email = EmailAddress::new(row.owner_email)
            .map_err(|e| PostError::DatabaseError(format!("Corrupted owner email: {}", e)))?;

        Ok(Post {
            id: PostId(row.id),
            title,
            body: row.body,
            owner: PostOwner {
                id: UserId(row.owner_id),
                name,
                email,
            },
            created_at: row.created_at,
        })
    }
}

fn database_error(e: sqlx::Error) -> PostError {
    PostError::DatabaseError(e.to_string())
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn create(&self, post: NewPost) -> Result<Post, PostError> {
        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO posts (title, body, owner_id, created_at)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            "#,
        )
        .bind(post.title.as_str())
        .bind(&post.body)
        .bind(post.owner.id.0)
        .bind(post.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(database_error)?;

        Ok(Post {
            id: PostId(id),
            title: post.title,
            body: post.body,
            owner: post.owner,
            created_at: post.created_at,
        })
    }

    async fn list_all(&self) -> Result<Vec<Post>, PostError> {
        let rows = sqlx::query_as::<_, PostRow>(&format!("{} ORDER BY p.id", SELECT_POSTS))
            .fetch_all(&self.pool)
            .await
            .map_err(database_error)?;

        rows.into_iter().map(Post::try_from).collect()
    }

    async fn find_by_owner(&self, owner_id: &UserId) -> Result<Vec<Post>, PostError> {
        let rows = sqlx::query_as::<_, PostRow>(&format!(
            "{} WHERE p.owner_id = $1 ORDER BY p.id",
            SELECT_POSTS
        ))
        .bind(owner_id.0)
        .fetch_all(&self.pool)
        .await
        .map_err(database_error)?;

        rows.into_iter().map(Post::try_from).collect()
    }

    async fn find_by_id(&self, id: PostId) -> Result<Option<Post>, PostError> {
        let row = sqlx::query_as::<_, PostRow>(&format!("{} WHERE p.id = $1", SELECT_POSTS))
            .bind(id.0)
            .fetch_optional(&self.pool)
            .await
            .map_err(database_error)?;

        row.map(Post::try_from).transpose()
    }

    async fn update(&self, post: Post) -> Result<Post, PostError> {
        let result = sqlx::query(
            r#"
            UPDATE posts
            SET title = $2, body = $3
            WHERE id = $1
            "#,
        )
        .bind(post.id.0)
        .bind(post.title.as_str())
        .bind(&post.body)
        .execute(&self.pool)
        .await
        .map_err(database_error)?;

        if result.rows_affected() == 0 {
            return Err(PostError::NotFound(post.id));
        }

        Ok(post)
    }

    async fn delete(&self, id: PostId) -> Result<(), PostError> {
        let result = sqlx::query(
            r#"
            DELETE FROM posts
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .execute(&self.pool)
        .await
        .map_err(database_error)?;

        if result.rows_affected() == 0 {
            return Err(PostError::NotFound(id));
        }

        Ok(())
    }
}
