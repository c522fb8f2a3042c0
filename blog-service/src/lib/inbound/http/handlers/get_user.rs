use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use chrono::DateTime;
use chrono::Utc;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use super::PostData;
use crate::domain::post::models::Post;
use crate::domain::post::ports::PostServicePort;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::ports::UserServicePort;
use crate::inbound::http::router::AppState;

/// Profile of a user together with the posts they own.
pub async fn get_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<ApiSuccess<GetUserResponseData>, ApiError> {
    let user_id = UserId::from_string(&user_id).map_err(|e| ApiError::BadRequest(e.to_string()))?;

    let user = state.user_service.get_user(&user_id).await?;
    let posts = state.post_service.list_posts_by_owner(&user.id).await?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        GetUserResponseData::new(&user, &posts),
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GetUserResponseData {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub posts: Vec<PostData>,
}

impl GetUserResponseData {
    fn new(user: &User, posts: &[Post]) -> Self {
        Self {
            id: user.id.0,
            name: user.name.as_str().to_string(),
            email: user.email.as_str().to_string(),
            created_at: user.created_at,
            posts: posts.iter().map(PostData::from).collect(),
        }
    }
}
