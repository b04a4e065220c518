use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;

use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

/// Delete the current account and its favorites.
///
/// Outstanding tokens for the account stop working on their next use.
pub async fn delete_account(
    State(state): State<AppState>,
    Extension(current): Extension<AuthenticatedUser>,
) -> Result<StatusCode, ApiError> {
    state
        .user_service
        .delete_user(&current.user.id)
        .await
        .map_err(ApiError::from)
        .map(|_| StatusCode::NO_CONTENT)
}
