use axum::extract::Query;
use axum::extract::State;
use axum::http::StatusCode;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use super::PageQuery;
use super::PageResponse;
use crate::domain::pokemon::models::Pokemon;
use crate::inbound::http::router::AppState;

pub async fn list_pokemons(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> Result<ApiSuccess<PageResponse<PokemonData>>, ApiError> {
    let request = query.try_into_request()?;

    state
        .pokemon_service
        .list_pokemons(request)
        .await
        .map_err(ApiError::from)
        .map(|page| ApiSuccess::new(StatusCode::OK, page.map(PokemonData::from).into()))
}

/// Catalog entry as shown in lists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PokemonData {
    pub pokemon_id: String,
    pub name: String,
    pub hp: i32,
    pub attack: i32,
    pub defense: i32,
    pub speed: i32,
    #[serde(rename = "type")]
    pub pokemon_type: String,
    pub rarity: String,
}

impl From<Pokemon> for PokemonData {
    fn from(pokemon: Pokemon) -> Self {
        Self {
            pokemon_id: pokemon.id.to_string(),
            name: pokemon.name,
            hp: pokemon.hp,
            attack: pokemon.attack,
            defense: pokemon.defense,
            speed: pokemon.speed,
            pokemon_type: pokemon.pokemon_type.to_string(),
            rarity: pokemon.rarity.to_string(),
        }
    }
}
