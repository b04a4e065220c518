use serde::Deserialize;
use serde::Serialize;

/// JWT claims carried by every access token.
///
/// All four registered claims are required; a token missing any of them is
/// rejected as malformed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Issuer
    pub iss: String,

    /// Subject (user identifier)
    pub sub: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl Claims {
    /// Create claims for a subject issued at `issued_at`.
    ///
    /// # Arguments
    /// * `issuer` - Issuer string
    /// * `subject` - Subject identifier
    /// * `issued_at` - Issue time (Unix timestamp)
    /// * `lifetime_seconds` - Seconds until the token expires
    pub fn new(
        issuer: impl Into<String>,
        subject: impl ToString,
        issued_at: i64,
        lifetime_seconds: i64,
    ) -> Self {
        Self {
            iss: issuer.into(),
            sub: subject.to_string(),
            iat: issued_at,
            exp: issued_at.saturating_add(lifetime_seconds),
        }
    }

    /// Check if the token is expired.
    ///
    /// A token is no longer valid at the instant `exp` is reached.
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        current_timestamp >= self.exp
    }
}

/// A signed access token together with the claims it carries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedToken {
    /// Serialized JWT
    pub access_token: String,

    pub claims: Claims,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_claims() {
        let claims = Claims::new("pokedex", "user123", 1_000, 3_600);

        assert_eq!(claims.iss, "pokedex");
        assert_eq!(claims.sub, "user123");
        assert_eq!(claims.iat, 1_000);
        assert_eq!(claims.exp, 4_600);
    }

    #[test]
    fn test_is_expired() {
        let claims = Claims::new("", "user123", 0, 1000);

        assert!(!claims.is_expired(999)); // Not expired
        assert!(claims.is_expired(1000)); // Exactly at expiration
        assert!(claims.is_expired(1001)); // Expired
    }

    #[test]
    fn test_expiration_saturates() {
        let claims = Claims::new("", "user123", i64::MAX - 10, 3_600);
        assert_eq!(claims.exp, i64::MAX);
    }

    #[test]
    fn test_serialized_claim_names() {
        let claims = Claims::new("pokedex", "user123", 10, 20);
        let value = serde_json::to_value(&claims).unwrap();

        assert_eq!(
            value,
            serde_json::json!({ "iss": "pokedex", "sub": "user123", "iat": 10, "exp": 30 })
        );
    }
}
