pub mod page;
pub mod pokemon;
pub mod user;
