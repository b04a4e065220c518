use std::sync::Arc;

use auth::Authenticator;
use auth::JwtHandler;
use auth::PasswordHasher;
use pokedex_service::config::Config;
use pokedex_service::domain::pokemon::service::PokemonService;
use pokedex_service::domain::user::service::UserService;
use pokedex_service::inbound::http::router::create_router;
use pokedex_service::outbound::repositories::PostgresFavoriteRepository;
use pokedex_service::outbound::repositories::PostgresPokemonRepository;
use pokedex_service::outbound::repositories::PostgresUserRepository;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pokedex_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "pokedex-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        http_port = config.server.http_port,
        max_connections = config.database.max_connections,
        jwt_algorithm = %config.jwt.algorithm,
        jwt_issuer = %config.jwt.issuer,
        jwt_expires_seconds = config.jwt.expires_seconds,
        "Configuration loaded"
    );

    let pg_pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .connect(&config.database.url)
        .await?;
    tracing::info!(
        max_connections = config.database.max_connections,
        database = "postgresql",
        "Database connection pool created"
    );

    sqlx::migrate!("./migrations").run(&pg_pool).await?;
    tracing::info!(database = "postgresql", "Database migrations completed");

    let authenticator = Arc::new(build_authenticator(&config)?);

    let user_repository = Arc::new(PostgresUserRepository::new(pg_pool.clone()));
    let pokemon_repository = Arc::new(PostgresPokemonRepository::new(pg_pool.clone()));
    let favorite_repository = Arc::new(PostgresFavoriteRepository::new(pg_pool));

    let user_service = Arc::new(UserService::new(user_repository, authenticator));
    let pokemon_service = Arc::new(PokemonService::new(pokemon_repository, favorite_repository));

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    let http_application = create_router(user_service, pokemon_service);

    axum::serve(http_listener, http_application)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server exited successfully");

    Ok(())
}

fn build_authenticator(config: &Config) -> Result<Authenticator, anyhow::Error> {
    let jwt_handler = JwtHandler::new(config.jwt.secret.as_bytes())
        .with_algorithm(&config.jwt.algorithm)?
        .with_issuer(config.jwt.issuer.clone())
        .with_lifetime(config.jwt.expires_seconds)?;

    let password_hasher = PasswordHasher::with_work_factor(
        config.password.memory_cost_kib,
        config.password.time_cost,
        config.password.parallelism,
    )?;

    Ok(Authenticator::new(jwt_handler, password_hasher)?)
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
