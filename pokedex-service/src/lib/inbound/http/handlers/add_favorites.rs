use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;

use super::list_pokemons::PokemonData;
use super::ApiError;
use super::ApiSuccess;
use crate::domain::pokemon::models::PokemonId;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

/// Add several pokemon to the current user's favorites.
///
/// Body is a JSON array of pokemon IDs. Responds with the pokemon that were
/// actually added.
pub async fn add_favorites(
    State(state): State<AppState>,
    Extension(current): Extension<AuthenticatedUser>,
    Json(body): Json<Vec<String>>,
) -> Result<ApiSuccess<Vec<PokemonData>>, ApiError> {
    let pokemon_ids = body
        .iter()
        .map(|id| PokemonId::from_string(id))
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| ApiError::UnprocessableEntity(format!("Invalid pokemon ID: {}", e)))?;

    state
        .pokemon_service
        .add_favorites(&current.user.id, pokemon_ids)
        .await
        .map_err(ApiError::from)
        .map(|added| {
            ApiSuccess::new(
                StatusCode::OK,
                added.into_iter().map(PokemonData::from).collect(),
            )
        })
}
