use thiserror::Error;

use crate::domain::page::PageError;
use crate::domain::pokemon::models::PokemonId;

/// Error for PokemonId parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PokemonIdError {
    #[error("Invalid UUID format: {0}")]
    InvalidFormat(String),
}

/// Error for stored attribute values outside the closed enums
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PokemonAttributeError {
    #[error("Unknown pokemon type: {0}")]
    UnknownType(String),

    #[error("Unknown rarity: {0}")]
    UnknownRarity(String),
}

/// Top-level error for catalog and favorite operations
#[derive(Debug, Clone, Error)]
pub enum PokemonError {
    #[error("Invalid pokemon ID: {0}")]
    InvalidPokemonId(#[from] PokemonIdError),

    #[error("Invalid pokemon attribute: {0}")]
    InvalidAttribute(#[from] PokemonAttributeError),

    #[error("{0}")]
    InvalidPage(#[from] PageError),

    #[error("Pokemon not found")]
    NotFound(PokemonId),

    #[error("Pokemons not found: {}", join_ids(.0))]
    MissingPokemons(Vec<PokemonId>),

    #[error("At least one pokemon must be selected")]
    NoPokemonSelected,

    #[error("All Pokemon are already assigned as favorites")]
    AllAlreadyFavorites,

    #[error("Pokemon not assigned as favorite")]
    FavoriteNotFound(PokemonId),

    #[error("Database error: {0}")]
    DatabaseError(String),
}

fn join_ids(ids: &[PokemonId]) -> String {
    ids.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use uuid::Uuid;

    use super::*;

    #[test]
    fn test_missing_pokemons_lists_ids() {
        let first = PokemonId(Uuid::nil());
        let second = PokemonId(Uuid::max());

        let error = PokemonError::MissingPokemons(vec![first, second]);
        assert_eq!(
            error.to_string(),
            "Pokemons not found: 00000000-0000-0000-0000-000000000000, ffffffff-ffff-ffff-ffff-ffffffffffff"
        );
    }
}
