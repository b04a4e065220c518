use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::delete;
use axum::routing::get;
use axum::routing::post;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::add_favorites::add_favorites;
use super::handlers::delete_account::delete_account;
use super::handlers::get_account::get_account;
use super::handlers::get_pokemon::get_pokemon;
use super::handlers::list_favorites::list_favorites;
use super::handlers::list_pokemons::list_pokemons;
use super::handlers::login::login;
use super::handlers::register::register;
use super::handlers::remove_favorite::remove_favorite;
use super::handlers::update_account::update_account;
use super::middleware::authenticate as auth_middleware;
use crate::domain::pokemon::ports::PokemonServicePort;
use crate::domain::user::ports::UserServicePort;

#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<dyn UserServicePort>,
    pub pokemon_service: Arc<dyn PokemonServicePort>,
}

pub fn create_router(
    user_service: Arc<dyn UserServicePort>,
    pokemon_service: Arc<dyn PokemonServicePort>,
) -> Router {
    let state = AppState {
        user_service,
        pokemon_service,
    };

    let public_routes = Router::new()
        .route("/register", post(register))
        .route("/login", post(login));

    let protected_routes = Router::new()
        .route(
            "/user/account",
            get(get_account).put(update_account).delete(delete_account),
        )
        .route("/pokemons", get(list_pokemons))
        .route("/pokemons/", get(list_pokemons))
        .route("/pokemons/:pokemon_id", get(get_pokemon))
        .route("/user/pokemons", get(list_favorites))
        .route("/user/pokemons/", get(list_favorites))
        .route("/user/pokemons/bulk", post(add_favorites))
        .route("/user/pokemons/:pokemon_id", delete(remove_favorite))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    // Headers stay out of the span: Authorization carries the bearer token.
    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(trace_layer)
        .layer(CorsLayer::permissive())
        .with_state(state)
}
