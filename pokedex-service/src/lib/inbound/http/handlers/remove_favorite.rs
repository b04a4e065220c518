use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;

use crate::domain::pokemon::errors::PokemonError;
use crate::domain::pokemon::models::PokemonId;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

pub async fn remove_favorite(
    State(state): State<AppState>,
    Extension(current): Extension<AuthenticatedUser>,
    Path(pokemon_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let pokemon_id = PokemonId::from_string(&pokemon_id).map_err(PokemonError::from)?;

    state
        .pokemon_service
        .remove_favorite(&current.user.id, &pokemon_id)
        .await
        .map_err(ApiError::from)
        .map(|_| StatusCode::NO_CONTENT)
}
