#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::Mutex;

use async_trait::async_trait;
use auth::Authenticator;
use auth::JwtHandler;
use auth::PasswordHasher;
use chrono::DateTime;
use chrono::Duration;
use chrono::TimeZone;
use chrono::Utc;
use pokedex_service::domain::pokemon::errors::PokemonError;
use pokedex_service::domain::pokemon::models::Pokemon;
use pokedex_service::domain::pokemon::models::PokemonId;
use pokedex_service::domain::pokemon::models::PokemonRarity;
use pokedex_service::domain::pokemon::models::PokemonType;
use pokedex_service::domain::pokemon::ports::FavoriteRepository;
use pokedex_service::domain::pokemon::ports::PokemonRepository;
use pokedex_service::domain::pokemon::service::PokemonService;
use pokedex_service::domain::user::errors::UserError;
use pokedex_service::domain::user::models::User;
use pokedex_service::domain::user::models::UserId;
use pokedex_service::domain::user::ports::UserRepository;
use pokedex_service::domain::user::service::UserService;
use pokedex_service::inbound::http::router::create_router;
use serde_json::Value;

pub const JWT_SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";
pub const JWT_ISSUER: &str = "pokedex-test";

pub const CATALOG: &[(&str, PokemonType, PokemonRarity)] = &[
    ("Pikachu", PokemonType::Electric, PokemonRarity::Uncommon),
    ("Bulbasaur", PokemonType::Grass, PokemonRarity::Common),
    ("Charmander", PokemonType::Fire, PokemonRarity::Common),
    ("Squirtle", PokemonType::Water, PokemonRarity::Common),
    ("Jigglypuff", PokemonType::Fairy, PokemonRarity::Common),
    ("Meowth", PokemonType::Normal, PokemonRarity::Common),
    ("Gastly", PokemonType::Ghost, PokemonRarity::Uncommon),
    ("Eevee", PokemonType::Normal, PokemonRarity::Rare),
    ("Snorlax", PokemonType::Normal, PokemonRarity::Rare),
    ("Dratini", PokemonType::Dragon, PokemonRarity::Rare),
    ("Mewtwo", PokemonType::Psychic, PokemonRarity::Legendary),
    ("Mew", PokemonType::Psychic, PokemonRarity::Mythical),
];

/// Storage double implementing every repository port over one shared state,
/// so deleting a user also drops their favorites.
#[derive(Default)]
pub struct InMemoryStore {
    users: Mutex<HashMap<UserId, User>>,
    pokemons: Vec<Pokemon>,
    favorites: Mutex<Vec<(UserId, PokemonId)>>,
}

impl InMemoryStore {
    pub fn with_catalog() -> Self {
        let epoch = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let pokemons = CATALOG
            .iter()
            .enumerate()
            .map(|(position, (name, pokemon_type, rarity))| Pokemon {
                id: PokemonId::new(),
                name: name.to_string(),
                description: Some(format!("{} description", name)),
                hp: 100,
                attack: 100,
                defense: 100,
                speed: 100,
                pokemon_type: *pokemon_type,
                rarity: *rarity,
                created_at: epoch + Duration::seconds(position as i64),
            })
            .collect();

        Self {
            pokemons,
            ..Default::default()
        }
    }

    pub fn pokemon_id(&self, name: &str) -> PokemonId {
        self.pokemons
            .iter()
            .find(|p| p.name == name)
            .map(|p| p.id)
            .unwrap_or_else(|| panic!("{} is not in the test catalog", name))
    }

    pub fn favorite_count(&self) -> usize {
        self.favorites.lock().unwrap().len()
    }
}

fn page<T: Clone>(items: &[T], offset: u64, limit: u64) -> Vec<T> {
    items
        .iter()
        .skip(offset as usize)
        .take(limit as usize)
        .cloned()
        .collect()
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn create(&self, user: User) -> Result<User, UserError> {
        let mut users = self.users.lock().unwrap();
        if users.values().any(|u| u.email == user.email) {
            return Err(UserError::EmailAlreadyExists(user.email.to_string()));
        }
        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError> {
        Ok(self.users.lock().unwrap().get(id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .values()
            .find(|u| u.email.as_str() == email)
            .cloned())
    }

    async fn update(&self, user: User) -> Result<User, UserError> {
        let mut users = self.users.lock().unwrap();
        if users
            .values()
            .any(|u| u.email == user.email && u.id != user.id)
        {
            return Err(UserError::EmailAlreadyExists(user.email.to_string()));
        }
        match users.get_mut(&user.id) {
            Some(stored) => {
                *stored = user.clone();
                Ok(user)
            }
            None => Err(UserError::NotFound(user.id.to_string())),
        }
    }

    async fn delete(&self, id: &UserId) -> Result<(), UserError> {
        if self.users.lock().unwrap().remove(id).is_none() {
            return Err(UserError::NotFound(id.to_string()));
        }
        self.favorites
            .lock()
            .unwrap()
            .retain(|(user_id, _)| user_id != id);
        Ok(())
    }
}

#[async_trait]
impl PokemonRepository for InMemoryStore {
    async fn list(&self, offset: u64, limit: u64) -> Result<Vec<Pokemon>, PokemonError> {
        Ok(page(&self.pokemons, offset, limit))
    }

    async fn count(&self) -> Result<u64, PokemonError> {
        Ok(self.pokemons.len() as u64)
    }

    async fn find_by_id(&self, id: &PokemonId) -> Result<Option<Pokemon>, PokemonError> {
        Ok(self.pokemons.iter().find(|p| p.id == *id).cloned())
    }

    async fn find_by_ids(&self, ids: &[PokemonId]) -> Result<Vec<Pokemon>, PokemonError> {
        Ok(self
            .pokemons
            .iter()
            .filter(|p| ids.contains(&p.id))
            .cloned()
            .collect())
    }
}

#[async_trait]
impl FavoriteRepository for InMemoryStore {
    async fn find_favorite_ids(
        &self,
        user_id: &UserId,
        pokemon_ids: &[PokemonId],
    ) -> Result<Vec<PokemonId>, PokemonError> {
        Ok(self
            .favorites
            .lock()
            .unwrap()
            .iter()
            .filter(|(owner, pokemon_id)| owner == user_id && pokemon_ids.contains(pokemon_id))
            .map(|(_, pokemon_id)| *pokemon_id)
            .collect())
    }

    async fn add_favorites(
        &self,
        user_id: &UserId,
        pokemon_ids: &[PokemonId],
    ) -> Result<(), PokemonError> {
        let mut favorites = self.favorites.lock().unwrap();
        for pokemon_id in pokemon_ids {
            if !favorites.contains(&(*user_id, *pokemon_id)) {
                favorites.push((*user_id, *pokemon_id));
            }
        }
        Ok(())
    }

    async fn list_favorites(
        &self,
        user_id: &UserId,
        offset: u64,
        limit: u64,
    ) -> Result<Vec<Pokemon>, PokemonError> {
        let owned: Vec<Pokemon> = self
            .favorites
            .lock()
            .unwrap()
            .iter()
            .filter(|(owner, _)| owner == user_id)
            .filter_map(|(_, pokemon_id)| self.pokemons.iter().find(|p| p.id == *pokemon_id))
            .cloned()
            .collect();
        Ok(page(&owned, offset, limit))
    }

    async fn count_favorites(&self, user_id: &UserId) -> Result<u64, PokemonError> {
        Ok(self
            .favorites
            .lock()
            .unwrap()
            .iter()
            .filter(|(owner, _)| owner == user_id)
            .count() as u64)
    }

    async fn remove_favorite(
        &self,
        user_id: &UserId,
        pokemon_id: &PokemonId,
    ) -> Result<bool, PokemonError> {
        let mut favorites = self.favorites.lock().unwrap();
        let before = favorites.len();
        favorites.retain(|entry| *entry != (*user_id, *pokemon_id));
        Ok(favorites.len() < before)
    }
}

/// Test application that spawns a real server
pub struct TestApp {
    pub address: String,
    pub store: Arc<InMemoryStore>,
    pub api_client: reqwest::Client,
    pub jwt_handler: JwtHandler,
}

impl TestApp {
    /// Spawn the application in a background task and return TestApp
    pub async fn spawn() -> Self {
        let store = Arc::new(InMemoryStore::with_catalog());

        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let authenticator = Arc::new(
            Authenticator::new(
                test_jwt_handler(),
                PasswordHasher::with_work_factor(8, 1, 1).expect("Invalid work factor"),
            )
            .expect("Failed to create authenticator"),
        );

        let user_service = Arc::new(UserService::new(Arc::clone(&store), authenticator));
        let pokemon_service = Arc::new(PokemonService::new(Arc::clone(&store), Arc::clone(&store)));

        let router = create_router(user_service, pokemon_service);

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            store,
            api_client: reqwest::Client::new(),
            jwt_handler: test_jwt_handler(),
        }
    }

    /// Helper to make GET request
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(format!("{}{}", self.address, path))
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(format!("{}{}", self.address, path))
    }

    /// Helper to make GET request with Bearer token
    pub fn get_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.get(path).bearer_auth(token)
    }

    /// Helper to make POST request with Bearer token
    pub fn post_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.post(path).bearer_auth(token)
    }

    /// Helper to make PUT request with Bearer token
    pub fn put_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.api_client
            .put(format!("{}{}", self.address, path))
            .bearer_auth(token)
    }

    /// Helper to make DELETE request with Bearer token
    pub fn delete_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.api_client
            .delete(format!("{}{}", self.address, path))
            .bearer_auth(token)
    }

    /// Register an account and return its JSON representation.
    pub async fn register(&self, email: &str, password: &str) -> Value {
        let response = self
            .post("/register")
            .json(&serde_json::json!({ "email": email, "password": password }))
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(response.status(), reqwest::StatusCode::CREATED);
        response.json().await.expect("Failed to parse response")
    }

    /// Submit the login form and return the raw response.
    pub async fn login(&self, email: &str, password: &str) -> reqwest::Response {
        self.post("/login")
            .form(&[("username", email), ("password", password)])
            .send()
            .await
            .expect("Failed to execute request")
    }

    /// Register and log in, returning the access token.
    pub async fn register_and_login(&self, email: &str, password: &str) -> String {
        self.register(email, password).await;

        let response = self.login(email, password).await;
        assert_eq!(response.status(), reqwest::StatusCode::OK);

        let body: Value = response.json().await.expect("Failed to parse response");
        body["access_token"]
            .as_str()
            .expect("Missing access_token")
            .to_string()
    }

    /// Sign a token for `subject` as if it had been issued at `issued_at`.
    pub fn token_issued_at(&self, subject: &str, issued_at: DateTime<Utc>) -> String {
        self.jwt_handler
            .issue(subject, issued_at)
            .expect("Failed to sign token")
            .access_token
    }
}

fn test_jwt_handler() -> JwtHandler {
    JwtHandler::new(JWT_SECRET).with_issuer(JWT_ISSUER)
}
