pub mod pokemon;
pub mod user;

pub use pokemon::PostgresFavoriteRepository;
pub use pokemon::PostgresPokemonRepository;
pub use user::PostgresUserRepository;
