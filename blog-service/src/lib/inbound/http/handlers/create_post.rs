use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use super::PostData;
use crate::domain::post::errors::PostTitleError;
use crate::domain::post::models::CreatePostCommand;
use crate::domain::post::models::PostTitle;
use crate::domain::post::ports::PostServicePort;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

/// Create a post owned by the caller.
///
/// The owner comes from the verified token. Unknown payload fields such as
/// `owner` or `user_id` are dropped during deserialization.
pub async fn create_post(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthenticatedUser>,
    Json(body): Json<CreatePostRequest>,
) -> Result<ApiSuccess<PostData>, ApiError> {
    state
        .post_service
        .create_post(&caller.user, body.try_into_command()?)
        .await
        .map_err(ApiError::from)
        .map(|ref post| ApiSuccess::new(StatusCode::CREATED, post.into()))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreatePostRequest {
    title: String,
    body: String,
}

impl CreatePostRequest {
    fn try_into_command(self) -> Result<CreatePostCommand, PostTitleError> {
        Ok(CreatePostCommand {
            title: PostTitle::new(self.title)?,
            body: self.body,
        })
    }
}

impl From<PostTitleError> for ApiError {
    fn from(err: PostTitleError) -> Self {
        ApiError::UnprocessableEntity(format!("Invalid post title: {}", err))
    }
}
