use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::identity::models::UserId;
use crate::inbound::http::router::AppState;

pub async fn is_admin(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> Result<ApiSuccess<IsAdminResponseData>, ApiError> {
    let is_admin = state.auth_service.is_admin(UserId(user_id)).await?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        IsAdminResponseData { user_id, is_admin },
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IsAdminResponseData {
    pub user_id: i64,
    pub is_admin: bool,
}
