use axum::extract::State;
use axum::http::StatusCode;
use axum::Form;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::user::models::LoginCommand;
use crate::inbound::http::router::AppState;

/// Exchange credentials for a bearer token.
///
/// Takes the OAuth2 password form (`username` carries the email).
pub async fn login(
    State(state): State<AppState>,
    Form(form): Form<LoginForm>,
) -> Result<ApiSuccess<TokenData>, ApiError> {
    let command = LoginCommand {
        email: form.username,
        password: form.password,
    };

    let issued = state.user_service.login(command, Utc::now()).await?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        TokenData {
            token_type: "Bearer".to_string(),
            access_token: issued.access_token,
            expires_at: issued.claims.exp,
        },
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoginForm {
    username: String,
    password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TokenData {
    pub token_type: String,
    pub access_token: String,
    /// Token expiry as epoch seconds.
    pub expires_at: i64,
}
