use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::pokemon::errors::PokemonError;
use crate::domain::pokemon::models::Pokemon;
use crate::domain::pokemon::models::PokemonId;
use crate::inbound::http::router::AppState;

pub async fn get_pokemon(
    State(state): State<AppState>,
    Path(pokemon_id): Path<String>,
) -> Result<ApiSuccess<PokemonDetailData>, ApiError> {
    let pokemon_id = PokemonId::from_string(&pokemon_id).map_err(PokemonError::from)?;

    state
        .pokemon_service
        .get_pokemon(&pokemon_id)
        .await
        .map_err(ApiError::from)
        .map(|pokemon| ApiSuccess::new(StatusCode::OK, pokemon.into()))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PokemonDetailData {
    pub pokemon_id: String,
    pub name: String,
    pub description: Option<String>,
    pub hp: i32,
    pub attack: i32,
    pub defense: i32,
    pub speed: i32,
    #[serde(rename = "type")]
    pub pokemon_type: String,
    pub rarity: String,
}

impl From<Pokemon> for PokemonDetailData {
    fn from(pokemon: Pokemon) -> Self {
        Self {
            pokemon_id: pokemon.id.to_string(),
            name: pokemon.name,
            description: pokemon.description,
            hp: pokemon.hp,
            attack: pokemon.attack,
            defense: pokemon.defense,
            speed: pokemon.speed,
            pokemon_type: pokemon.pokemon_type.to_string(),
            rarity: pokemon.rarity.to_string(),
        }
    }
}
