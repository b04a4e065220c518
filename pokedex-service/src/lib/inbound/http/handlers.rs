use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use crate::domain::page::Page;
use crate::domain::page::PageRequest;
use crate::pokemon::errors::PokemonError;
use crate::user::errors::UserError;

pub mod add_favorites;
pub mod delete_account;
pub mod get_account;
pub mod get_pokemon;
pub mod list_favorites;
pub mod list_pokemons;
pub mod login;
pub mod register;
pub mod remove_favorite;
pub mod update_account;

const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

#[derive(Debug, Clone)]
pub struct ApiSuccess<T: Serialize + PartialEq>(StatusCode, Json<T>);

impl<T> PartialEq for ApiSuccess<T>
where
    T: Serialize + PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0 && self.1 .0 == other.1 .0
    }
}

impl<T: Serialize + PartialEq> ApiSuccess<T> {
    pub fn new(status: StatusCode, data: T) -> Self {
        ApiSuccess(status, Json(data))
    }
}

impl<T: Serialize + PartialEq> IntoResponse for ApiSuccess<T> {
    fn into_response(self) -> Response {
        (self.0, self.1).into_response()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    InternalServerError(String),
    UnprocessableEntity(String),
    BadRequest(String),
    NotFound(String),
    Conflict(String),
    Unauthorized(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::InternalServerError(msg) => {
                tracing::error!(error = %msg, "Request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    INTERNAL_ERROR_MESSAGE.to_string(),
                )
            }
            ApiError::UnprocessableEntity(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
        };

        (status, Json(ApiErrorBody { error: message })).into_response()
    }
}

impl From<UserError> for ApiError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::NotFound(_) => ApiError::NotFound(err.to_string()),
            UserError::EmailAlreadyExists(_) => ApiError::Conflict(err.to_string()),
            UserError::InvalidCredentials => ApiError::BadRequest(err.to_string()),
            UserError::Unauthorized => ApiError::Unauthorized(err.to_string()),
            UserError::InvalidEmail(_) | UserError::EmptyPassword => {
                ApiError::UnprocessableEntity(err.to_string())
            }
            UserError::Credentials(_) | UserError::DatabaseError(_) => {
                ApiError::InternalServerError(err.to_string())
            }
        }
    }
}

impl From<PokemonError> for ApiError {
    fn from(err: PokemonError) -> Self {
        match err {
            PokemonError::NotFound(_)
            | PokemonError::MissingPokemons(_)
            | PokemonError::FavoriteNotFound(_) => ApiError::NotFound(err.to_string()),
            PokemonError::AllAlreadyFavorites | PokemonError::InvalidPokemonId(_) => {
                ApiError::BadRequest(err.to_string())
            }
            PokemonError::InvalidPage(_) | PokemonError::NoPokemonSelected => {
                ApiError::UnprocessableEntity(err.to_string())
            }
            PokemonError::InvalidAttribute(_) | PokemonError::DatabaseError(_) => {
                ApiError::InternalServerError(err.to_string())
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiErrorBody {
    pub error: String,
}

/// `?page=&size=` query parameters shared by the list endpoints.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct PageQuery {
    pub page: Option<u32>,
    pub size: Option<u32>,
}

impl PageQuery {
    pub fn try_into_request(self) -> Result<PageRequest, PokemonError> {
        Ok(PageRequest::new(
            self.page.unwrap_or(1),
            self.size.unwrap_or(PageRequest::DEFAULT_SIZE),
        )?)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageResponse<T: Serialize + PartialEq> {
    pub items: Vec<T>,
    pub total: u64,
    pub page: u32,
    pub size: u32,
    pub pages: u64,
}

impl<T: Serialize + PartialEq> From<Page<T>> for PageResponse<T> {
    fn from(page: Page<T>) -> Self {
        let pages = page.pages();
        Self {
            items: page.items,
            total: page.total,
            page: page.page,
            size: page.size,
            pages,
        }
    }
}
