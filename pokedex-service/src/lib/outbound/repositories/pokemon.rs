use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::PgPool;
use sqlx::Row;

use crate::domain::pokemon::errors::PokemonError;
use crate::domain::pokemon::models::Pokemon;
use crate::domain::pokemon::models::PokemonId;
use crate::domain::pokemon::models::PokemonRarity;
use crate::domain::pokemon::models::PokemonType;
use crate::domain::pokemon::ports::FavoriteRepository;
use crate::domain::pokemon::ports::PokemonRepository;
use crate::domain::user::models::UserId;

fn row_to_pokemon(row: PgRow) -> Result<Pokemon, PokemonError> {
    let pokemon_type: String = row.get("pokemon_type");
    let rarity: String = row.get("rarity");

    Ok(Pokemon {
        id: PokemonId(row.get("id")),
        name: row.get("name"),
        description: row.get("description"),
        hp: row.get("hp"),
        attack: row.get("attack"),
        defense: row.get("defense"),
        speed: row.get("speed"),
        pokemon_type: pokemon_type.parse::<PokemonType>()?,
        rarity: rarity.parse::<PokemonRarity>()?,
        created_at: row.get("created_at"),
    })
}

fn database_error(e: sqlx::Error) -> PokemonError {
    PokemonError::DatabaseError(e.to_string())
}

// Postgres has no unsigned integers; pagination values stay well inside i64.
fn to_i64(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

fn to_u64(value: i64) -> u64 {
    u64::try_from(value).unwrap_or_default()
}

pub struct PostgresPokemonRepository {
    pool: PgPool,
}

impl PostgresPokemonRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PokemonRepository for PostgresPokemonRepository {
    async fn list(&self, offset: u64, limit: u64) -> Result<Vec<Pokemon>, PokemonError> {
        let rows = sqlx::query(
            r#"
            SELECT id, name, description, hp, attack, defense, speed, pokemon_type, rarity, created_at
            FROM pokemons
            ORDER BY created_at ASC, id ASC
            OFFSET $1
            LIMIT $2
            "#,
        )
        .bind(to_i64(offset))
        .bind(to_i64(limit))
        .fetch_all(&self.pool)
        .await
        .map_err(database_error)?;

        rows.into_iter().map(row_to_pokemon).collect()
    }

    async fn count(&self) -> Result<u64, PokemonError> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM pokemons")
            .fetch_one(&self.pool)
            .await
            .map_err(database_error)?;

        Ok(to_u64(total))
    }

    async fn find_by_id(&self, id: &PokemonId) -> Result<Option<Pokemon>, PokemonError> {
        let row = sqlx::query(
            r#"
            SELECT id, name, description, hp, attack, defense, speed, pokemon_type, rarity, created_at
            FROM pokemons
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(database_error)?;

        row.map(row_to_pokemon).transpose()
    }

    async fn find_by_ids(&self, ids: &[PokemonId]) -> Result<Vec<Pokemon>, PokemonError> {
        let uuids: Vec<_> = ids.iter().map(|id| id.0).collect();

        let rows = sqlx::query(
            r#"
            SELECT id, name, description, hp, attack, defense, speed, pokemon_type, rarity, created_at
            FROM pokemons
            WHERE id = ANY($1)
            "#,
        )
        .bind(&uuids)
        .fetch_all(&self.pool)
        .await
        .map_err(database_error)?;

        rows.into_iter().map(row_to_pokemon).collect()
    }
}

pub struct PostgresFavoriteRepository {
    pool: PgPool,
}

impl PostgresFavoriteRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FavoriteRepository for PostgresFavoriteRepository {
    async fn find_favorite_ids(
        &self,
        user_id: &UserId,
        pokemon_ids: &[PokemonId],
    ) -> Result<Vec<PokemonId>, PokemonError> {
        let uuids: Vec<_> = pokemon_ids.iter().map(|id| id.0).collect();

        let ids: Vec<uuid::Uuid> = sqlx::query_scalar(
            r#"
            SELECT pokemon_id
            FROM users_pokemons
            WHERE user_id = $1 AND pokemon_id = ANY($2)
            "#,
        )
        .bind(user_id.0)
        .bind(&uuids)
        .fetch_all(&self.pool)
        .await
        .map_err(database_error)?;

        Ok(ids.into_iter().map(PokemonId).collect())
    }

    async fn add_favorites(
        &self,
        user_id: &UserId,
        pokemon_ids: &[PokemonId],
    ) -> Result<(), PokemonError> {
        let uuids: Vec<_> = pokemon_ids.iter().map(|id| id.0).collect();

        // WITH ORDINALITY keeps created_at increasing in request order.
        sqlx::query(
            r#"
            INSERT INTO users_pokemons (user_id, pokemon_id, created_at)
            SELECT $1::uuid, requested.pokemon_id, NOW() + requested.position * INTERVAL '1 microsecond'
            FROM UNNEST($2::uuid[]) WITH ORDINALITY AS requested(pokemon_id, position)
            ON CONFLICT (user_id, pokemon_id) DO NOTHING
            "#,
        )
        .bind(user_id.0)
        .bind(&uuids)
        .execute(&self.pool)
        .await
        .map_err(database_error)?;

        Ok(())
    }

    async fn list_favorites(
        &self,
        user_id: &UserId,
        offset: u64,
        limit: u64,
    ) -> Result<Vec<Pokemon>, PokemonError> {
        let rows = sqlx::query(
            r#"
            SELECT p.id, p.name, p.description, p.hp, p.attack, p.defense, p.speed,
                   p.pokemon_type, p.rarity, p.created_at
            FROM users_pokemons up
            JOIN pokemons p ON p.id = up.pokemon_id
            WHERE up.user_id = $1
            ORDER BY up.created_at ASC, up.id ASC
            OFFSET $2
            LIMIT $3
            "#,
        )
        .bind(user_id.0)
        .bind(to_i64(offset))
        .bind(to_i64(limit))
        .fetch_all(&self.pool)
        .await
        .map_err(database_error)?;

        rows.into_iter().map(row_to_pokemon).collect()
    }

    async fn count_favorites(&self, user_id: &UserId) -> Result<u64, PokemonError> {
        let total: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM users_pokemons WHERE user_id = $1")
                .bind(user_id.0)
                .fetch_one(&self.pool)
                .await
                .map_err(database_error)?;

        Ok(to_u64(total))
    }

    async fn remove_favorite(
        &self,
        user_id: &UserId,
        pokemon_id: &PokemonId,
    ) -> Result<bool, PokemonError> {
        let result = sqlx::query(
            r#"
            DELETE FROM users_pokemons
            WHERE user_id = $1 AND pokemon_id = $2
            "#,
        )
        .bind(user_id.0)
        .bind(pokemon_id.0)
        .execute(&self.pool)
        .await
        .map_err(database_error)?;

        Ok(result.rows_affected() > 0)
    }
}
