use std::collections::HashMap;
use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::page::Page;
use crate::domain::page::PageRequest;
use crate::domain::pokemon::errors::PokemonError;
use crate::domain::pokemon::models::Pokemon;
use crate::domain::pokemon::models::PokemonId;
use crate::domain::pokemon::ports::FavoriteRepository;
use crate::domain::pokemon::ports::PokemonRepository;
use crate::domain::pokemon::ports::PokemonServicePort;
use crate::domain::user::models::UserId;

/// Domain service for the catalog and user favorites.
pub struct PokemonService<PR, FR>
where
    PR: PokemonRepository,
    FR: FavoriteRepository,
{
    pokemon_repository: Arc<PR>,
    favorite_repository: Arc<FR>,
}

impl<PR, FR> PokemonService<PR, FR>
where
    PR: PokemonRepository,
    FR: FavoriteRepository,
{
    /// Create a new pokemon service with injected repositories.
    pub fn new(pokemon_repository: Arc<PR>, favorite_repository: Arc<FR>) -> Self {
        Self {
            pokemon_repository,
            favorite_repository,
        }
    }
}

/// Drop repeated IDs, keeping the first occurrence.
fn dedupe(ids: Vec<PokemonId>) -> Vec<PokemonId> {
    let mut seen = HashSet::with_capacity(ids.len());
    ids.into_iter().filter(|id| seen.insert(*id)).collect()
}

#[async_trait]
impl<PR, FR> PokemonServicePort for PokemonService<PR, FR>
where
    PR: PokemonRepository,
    FR: FavoriteRepository,
{
    async fn list_pokemons(&self, request: PageRequest) -> Result<Page<Pokemon>, PokemonError> {
        let total = self.pokemon_repository.count().await?;
        let items = self
            .pokemon_repository
            .list(request.offset(), request.limit())
            .await?;

        Ok(Page::new(items, total, request))
    }

    async fn get_pokemon(&self, id: &PokemonId) -> Result<Pokemon, PokemonError> {
        self.pokemon_repository
            .find_by_id(id)
            .await?
            .ok_or(PokemonError::NotFound(*id))
    }

    async fn add_favorites(
        &self,
        user_id: &UserId,
        pokemon_ids: Vec<PokemonId>,
    ) -> Result<Vec<Pokemon>, PokemonError> {
        let requested = dedupe(pokemon_ids);
        if requested.is_empty() {
            return Err(PokemonError::NoPokemonSelected);
        }

        let mut found: HashMap<PokemonId, Pokemon> = self
            .pokemon_repository
            .find_by_ids(&requested)
            .await?
            .into_iter()
            .map(|pokemon| (pokemon.id, pokemon))
            .collect();

        let missing: Vec<PokemonId> = requested
            .iter()
            .filter(|id| !found.contains_key(*id))
            .copied()
            .collect();
        if !missing.is_empty() {
            return Err(PokemonError::MissingPokemons(missing));
        }

        let existing: HashSet<PokemonId> = self
            .favorite_repository
            .find_favorite_ids(user_id, &requested)
            .await?
            .into_iter()
            .collect();

        let to_add: Vec<PokemonId> = requested
            .into_iter()
            .filter(|id| !existing.contains(id))
            .collect();
        if to_add.is_empty() {
            return Err(PokemonError::AllAlreadyFavorites);
        }

        self.favorite_repository
            .add_favorites(user_id, &to_add)
            .await?;
        tracing::info!(user_id = %user_id, added = to_add.len(), "Favorites added");

        Ok(to_add
            .iter()
            .filter_map(|id| found.remove(id))
            .collect())
    }

    async fn list_favorites(
        &self,
        user_id: &UserId,
        request: PageRequest,
    ) -> Result<Page<Pokemon>, PokemonError> {
        let total = self.favorite_repository.count_favorites(user_id).await?;
        let items = self
            .favorite_repository
            .list_favorites(user_id, request.offset(), request.limit())
            .await?;

        Ok(Page::new(items, total, request))
    }

    async fn remove_favorite(
        &self,
        user_id: &UserId,
        pokemon_id: &PokemonId,
    ) -> Result<(), PokemonError> {
        if !self
            .favorite_repository
            .remove_favorite(user_id, pokemon_id)
            .await?
        {
            return Err(PokemonError::FavoriteNotFound(*pokemon_id));
        }
        tracing::info!(user_id = %user_id, pokemon_id = %pokemon_id, "Favorite removed");

        Ok(())
    }
}
