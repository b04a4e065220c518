use axum::extract::Query;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;

use super::list_pokemons::PokemonData;
use super::ApiError;
use super::ApiSuccess;
use super::PageQuery;
use super::PageResponse;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

pub async fn list_favorites(
    State(state): State<AppState>,
    Extension(current): Extension<AuthenticatedUser>,
    Query(query): Query<PageQuery>,
) -> Result<ApiSuccess<PageResponse<PokemonData>>, ApiError> {
    let request = query.try_into_request()?;

    state
        .pokemon_service
        .list_favorites(&current.user.id, request)
        .await
        .map_err(ApiError::from)
        .map(|page| ApiSuccess::new(StatusCode::OK, page.map(PokemonData::from).into()))
}
