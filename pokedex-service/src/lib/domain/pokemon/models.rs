use std::fmt;
use std::str::FromStr;

use chrono::DateTime;
use chrono::Utc;
use uuid::Uuid;

use crate::domain::pokemon::errors::PokemonAttributeError;
use crate::domain::pokemon::errors::PokemonIdError;

/// Catalog entry.
///
/// The catalog is seeded by migrations and read-only through the service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pokemon {
    pub id: PokemonId,
    pub name: String,
    pub description: Option<String>,
    pub hp: i32,
    pub attack: i32,
    pub defense: i32,
    pub speed: i32,
    pub pokemon_type: PokemonType,
    pub rarity: PokemonRarity,
    pub created_at: DateTime<Utc>,
}

/// Pokemon unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PokemonId(pub Uuid);

impl PokemonId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a pokemon ID from string.
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a valid UUID
    pub fn from_string(s: &str) -> Result<Self, PokemonIdError> {
        Uuid::parse_str(s)
            .map(PokemonId)
            .map_err(|e| PokemonIdError::InvalidFormat(e.to_string()))
    }
}

impl Default for PokemonId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for PokemonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Elemental type, stored by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PokemonType {
    Normal,
    Fire,
    Water,
    Electric,
    Grass,
    Ice,
    Fighting,
    Poison,
    Ground,
    Flying,
    Psychic,
    Bug,
    Rock,
    Ghost,
    Dragon,
    Dark,
    Steel,
    Fairy,
}

impl PokemonType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PokemonType::Normal => "Normal",
            PokemonType::Fire => "Fire",
            PokemonType::Water => "Water",
            PokemonType::Electric => "Electric",
            PokemonType::Grass => "Grass",
            PokemonType::Ice => "Ice",
            PokemonType::Fighting => "Fighting",
            PokemonType::Poison => "Poison",
            PokemonType::Ground => "Ground",
            PokemonType::Flying => "Flying",
            PokemonType::Psychic => "Psychic",
            PokemonType::Bug => "Bug",
            PokemonType::Rock => "Rock",
            PokemonType::Ghost => "Ghost",
            PokemonType::Dragon => "Dragon",
            PokemonType::Dark => "Dark",
            PokemonType::Steel => "Steel",
            PokemonType::Fairy => "Fairy",
        }
    }
}

impl FromStr for PokemonType {
    type Err = PokemonAttributeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Normal" => Ok(PokemonType::Normal),
            "Fire" => Ok(PokemonType::Fire),
            "Water" => Ok(PokemonType::Water),
            "Electric" => Ok(PokemonType::Electric),
            "Grass" => Ok(PokemonType::Grass),
            "Ice" => Ok(PokemonType::Ice),
            "Fighting" => Ok(PokemonType::Fighting),
            "Poison" => Ok(PokemonType::Poison),
            "Ground" => Ok(PokemonType::Ground),
            "Flying" => Ok(PokemonType::Flying),
            "Psychic" => Ok(PokemonType::Psychic),
            "Bug" => Ok(PokemonType::Bug),
            "Rock" => Ok(PokemonType::Rock),
            "Ghost" => Ok(PokemonType::Ghost),
            "Dragon" => Ok(PokemonType::Dragon),
            "Dark" => Ok(PokemonType::Dark),
            "Steel" => Ok(PokemonType::Steel),
            "Fairy" => Ok(PokemonType::Fairy),
            other => Err(PokemonAttributeError::UnknownType(other.to_string())),
        }
    }
}

impl fmt::Display for PokemonType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How rare a catalog entry is. Defaults to `Common`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PokemonRarity {
    #[default]
    Common,
    Uncommon,
    Rare,
    Legendary,
    Mythical,
}

impl PokemonRarity {
    pub fn as_str(&self) -> &'static str {
        match self {
            PokemonRarity::Common => "Common",
            PokemonRarity::Uncommon => "Uncommon",
            PokemonRarity::Rare => "Rare",
            PokemonRarity::Legendary => "Legendary",
            PokemonRarity::Mythical => "Mythical",
        }
    }
}

impl FromStr for PokemonRarity {
    type Err = PokemonAttributeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Common" => Ok(PokemonRarity::Common),
            "Uncommon" => Ok(PokemonRarity::Uncommon),
            "Rare" => Ok(PokemonRarity::Rare),
            "Legendary" => Ok(PokemonRarity::Legendary),
            "Mythical" => Ok(PokemonRarity::Mythical),
            other => Err(PokemonAttributeError::UnknownRarity(other.to_string())),
        }
    }
}

impl fmt::Display for PokemonRarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
