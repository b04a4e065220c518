use async_trait::async_trait;

use crate::domain::page::Page;
use crate::domain::page::PageRequest;
use crate::domain::pokemon::errors::PokemonError;
use crate::domain::pokemon::models::Pokemon;
use crate::domain::pokemon::models::PokemonId;
use crate::domain::user::models::UserId;

/// Port for catalog and favorite operations.
#[async_trait]
pub trait PokemonServicePort: Send + Sync + 'static {
    /// List the catalog ordered by creation time.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn list_pokemons(&self, request: PageRequest) -> Result<Page<Pokemon>, PokemonError>;

    /// Retrieve a single catalog entry.
    ///
    /// # Errors
    /// * `NotFound` - No pokemon with this ID
    /// * `DatabaseError` - Database operation failed
    async fn get_pokemon(&self, id: &PokemonId) -> Result<Pokemon, PokemonError>;

    /// Mark pokemon as favorites of a user.
    ///
    /// Duplicate IDs are collapsed and already-favorite pokemon are skipped.
    ///
    /// # Returns
    /// The pokemon newly added, in request order
    ///
    /// # Errors
    /// * `NoPokemonSelected` - Empty ID list
    /// * `MissingPokemons` - Some IDs are not in the catalog
    /// * `AllAlreadyFavorites` - Nothing left to add
    /// * `DatabaseError` - Database operation failed
    async fn add_favorites(
        &self,
        user_id: &UserId,
        pokemon_ids: Vec<PokemonId>,
    ) -> Result<Vec<Pokemon>, PokemonError>;

    /// List a user's favorites ordered by when they were added.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn list_favorites(
        &self,
        user_id: &UserId,
        request: PageRequest,
    ) -> Result<Page<Pokemon>, PokemonError>;

    /// Remove one favorite.
    ///
    /// # Errors
    /// * `FavoriteNotFound` - Pokemon is not a favorite of this user
    /// * `DatabaseError` - Database operation failed
    async fn remove_favorite(
        &self,
        user_id: &UserId,
        pokemon_id: &PokemonId,
    ) -> Result<(), PokemonError>;
}

/// Read access to the catalog.
#[async_trait]
pub trait PokemonRepository: Send + Sync + 'static {
    async fn list(&self, offset: u64, limit: u64) -> Result<Vec<Pokemon>, PokemonError>;

    async fn count(&self) -> Result<u64, PokemonError>;

    async fn find_by_id(&self, id: &PokemonId) -> Result<Option<Pokemon>, PokemonError>;

    /// Retrieve every catalog entry whose ID is in `ids`, in no particular order.
    async fn find_by_ids(&self, ids: &[PokemonId]) -> Result<Vec<Pokemon>, PokemonError>;
}

/// Persistence for the user/pokemon favorite relation.
#[async_trait]
pub trait FavoriteRepository: Send + Sync + 'static {
    /// Subset of `pokemon_ids` already marked as favorite by the user.
    async fn find_favorite_ids(
        &self,
        user_id: &UserId,
        pokemon_ids: &[PokemonId],
    ) -> Result<Vec<PokemonId>, PokemonError>;

    /// Insert favorites; pairs that already exist are ignored.
    async fn add_favorites(
        &self,
        user_id: &UserId,
        pokemon_ids: &[PokemonId],
    ) -> Result<(), PokemonError>;

    async fn list_favorites(
        &self,
        user_id: &UserId,
        offset: u64,
        limit: u64,
    ) -> Result<Vec<Pokemon>, PokemonError>;

    async fn count_favorites(&self, user_id: &UserId) -> Result<u64, PokemonError>;

    /// Delete one favorite.
    ///
    /// # Returns
    /// `true` if a row was removed
    async fn remove_favorite(
        &self,
        user_id: &UserId,
        pokemon_id: &PokemonId,
    ) -> Result<bool, PokemonError>;
}
