use std::str::FromStr;

use chrono::DateTime;
use chrono::Utc;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;

use super::claims::Claims;
use super::claims::IssuedToken;
use super::errors::JwtError;

/// Default token lifetime in seconds.
pub const DEFAULT_LIFETIME_SECONDS: i64 = 3600;

/// JWT token handler for issuing and verifying access tokens.
///
/// Uses HS256 (HMAC with SHA-256) algorithm by default. Only the HMAC family
/// is accepted since tokens are signed with a shared secret.
pub struct JwtHandler {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
    issuer: String,
    lifetime_seconds: i64,
}

impl JwtHandler {
    /// Create a new JWT handler with a secret key.
    ///
    /// # Arguments
    /// * `secret` - Secret key for signing tokens (should be stored securely)
    ///
    /// # Returns
    /// JwtHandler configured with HS256, an empty issuer and a one hour lifetime
    ///
    /// # Security Notes
    /// - The secret should be at least 256 bits (32 bytes) for HS256
    /// - Store secrets in environment variables or secure vaults, never in code
    pub fn new(secret: &[u8]) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm: Algorithm::HS256,
            issuer: String::new(),
            lifetime_seconds: DEFAULT_LIFETIME_SECONDS,
        }
    }

    /// Set the signing algorithm by its JWA name (`HS256`, `HS384`, `HS512`).
    ///
    /// # Errors
    /// * `UnsupportedAlgorithm` - Unknown name or not an HMAC algorithm
    pub fn with_algorithm(mut self, name: &str) -> Result<Self, JwtError> {
        let algorithm = Algorithm::from_str(name)
            .map_err(|_| JwtError::UnsupportedAlgorithm(name.to_string()))?;

        match algorithm {
            Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512 => {
                self.algorithm = algorithm;
                Ok(self)
            }
            _ => Err(JwtError::UnsupportedAlgorithm(name.to_string())),
        }
    }

    /// Set the issuer written into and required from every token.
    pub fn with_issuer(mut self, issuer: impl Into<String>) -> Self {
        self.issuer = issuer.into();
        self
    }

    /// Set the token lifetime.
    ///
    /// # Errors
    /// * `InvalidLifetime` - Lifetime is zero or negative
    pub fn with_lifetime(mut self, lifetime_seconds: i64) -> Result<Self, JwtError> {
        if lifetime_seconds <= 0 {
            return Err(JwtError::InvalidLifetime(lifetime_seconds));
        }
        self.lifetime_seconds = lifetime_seconds;
        Ok(self)
    }

    /// Issue a signed token for `subject`, valid from `now` for the configured lifetime.
    ///
    /// # Errors
    /// * `EncodingFailed` - Token encoding failed
    pub fn issue(&self, subject: impl ToString, now: DateTime<Utc>) -> Result<IssuedToken, JwtError> {
        let claims = Claims::new(
            self.issuer.clone(),
            subject,
            now.timestamp(),
            self.lifetime_seconds,
        );
        let access_token = self.encode(&claims)?;

        Ok(IssuedToken {
            access_token,
            claims,
        })
    }

    /// Encode claims into a JWT token.
    ///
    /// # Errors
    /// * `EncodingFailed` - Token encoding failed
    pub fn encode(&self, claims: &Claims) -> Result<String, JwtError> {
        let header = Header::new(self.algorithm);

        encode(&header, claims, &self.encoding_key)
            .map_err(|e| JwtError::EncodingFailed(e.to_string()))
    }

    /// Verify a token at time `now` and return its claims.
    ///
    /// Checks run in order and stop at the first failure: structure,
    /// signature, issuer, expiry.
    ///
    /// # Errors
    /// * `Malformed` - Token structure or claims could not be parsed
    /// * `BadSignature` - Signature does not match or algorithm differs
    /// * `IssuerMismatch` - `iss` differs from the configured issuer
    /// * `Expired` - `now` is at or past `exp`
    pub fn verify(&self, token: &str, now: DateTime<Utc>) -> Result<Claims, JwtError> {
        let mut validation = Validation::new(self.algorithm);
        // Issuer and expiry are checked below against the caller's clock.
        validation.validate_exp = false;
        validation.required_spec_claims.clear();

        let claims = decode::<Claims>(token, &self.decoding_key, &validation)?.claims;

        if claims.iss != self.issuer {
            return Err(JwtError::IssuerMismatch {
                expected: self.issuer.clone(),
                actual: claims.iss,
            });
        }

        if claims.is_expired(now.timestamp()) {
            return Err(JwtError::Expired);
        }

        Ok(claims)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;
    use chrono::TimeZone;

    use super::*;

    const SECRET: &[u8] = b"my_secret_key_at_least_32_bytes_long!";

    fn handler() -> JwtHandler {
        JwtHandler::new(SECRET).with_issuer("pokedex")
    }

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
    }

    fn replace_char(token: &str, index: usize) -> String {
        let mut chars: Vec<char> = token.chars().collect();
        chars[index] = if chars[index] == 'A' { 'B' } else { 'A' };
        chars.into_iter().collect()
    }

    #[test]
    fn test_issue_and_verify() {
        let handler = handler();
        let now = fixed_now();

        let issued = handler.issue("user123", now).expect("Failed to issue token");
        assert!(!issued.access_token.is_empty());
        assert_eq!(issued.claims.iss, "pokedex");
        assert_eq!(issued.claims.iat, now.timestamp());
        assert_eq!(issued.claims.exp, now.timestamp() + DEFAULT_LIFETIME_SECONDS);

        let claims = handler
            .verify(&issued.access_token, now)
            .expect("Failed to verify token");
        assert_eq!(claims.sub, "user123");
        assert_eq!(claims, issued.claims);
    }

    #[test]
    fn test_issue_is_deterministic() {
        let handler = handler();
        let now = fixed_now();

        let first = handler.issue("user123", now).unwrap();
        let second = handler.issue("user123", now).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_expiry_boundary() {
        let handler = handler().with_lifetime(60).unwrap();
        let now = fixed_now();
        let issued = handler.issue("user123", now).unwrap();

        let just_before = now + Duration::seconds(59);
        assert!(handler.verify(&issued.access_token, just_before).is_ok());

        let at_expiry = now + Duration::seconds(60);
        assert_eq!(
            handler.verify(&issued.access_token, at_expiry),
            Err(JwtError::Expired)
        );
    }

    #[test]
    fn test_signature_tamper() {
        let handler = handler();
        let now = fixed_now();
        let issued = handler.issue("user123", now).unwrap();

        let signature_start = issued.access_token.rfind('.').unwrap() + 1;
        for index in signature_start..issued.access_token.len() {
            let tampered = replace_char(&issued.access_token, index);
            assert_eq!(
                handler.verify(&tampered, now),
                Err(JwtError::BadSignature),
                "tampered signature at index {} was not rejected",
                index
            );
        }
    }

    #[test]
    fn test_payload_tamper() {
        let handler = handler();
        let now = fixed_now();
        let issued = handler.issue("user123", now).unwrap();

        let forged_claims = Claims::new("pokedex", "someone_else", now.timestamp(), 3600);
        let forged_payload = JwtHandler::new(b"another_secret_at_least_32_bytes_long")
            .with_issuer("pokedex")
            .encode(&forged_claims)
            .unwrap();
        let forged_payload = forged_payload.split('.').nth(1).unwrap();

        let mut segments: Vec<&str> = issued.access_token.split('.').collect();
        segments[1] = forged_payload;
        let tampered = segments.join(".");

        assert_eq!(handler.verify(&tampered, now), Err(JwtError::BadSignature));
    }

    #[test]
    fn test_issuer_mismatch() {
        let issuer_a = JwtHandler::new(SECRET).with_issuer("A");
        let issuer_b = JwtHandler::new(SECRET).with_issuer("B");
        let now = fixed_now();

        let issued = issuer_a.issue("user123", now).unwrap();

        assert_eq!(
            issuer_b.verify(&issued.access_token, now),
            Err(JwtError::IssuerMismatch {
                expected: "B".to_string(),
                actual: "A".to_string(),
            })
        );
    }

    #[test]
    fn test_issuer_checked_before_expiry() {
        let issuer_a = JwtHandler::new(SECRET).with_issuer("A");
        let issuer_b = JwtHandler::new(SECRET).with_issuer("B");
        let now = fixed_now();

        let issued = issuer_a.issue("user123", now).unwrap();
        let later = now + Duration::days(1);

        assert!(matches!(
            issuer_b.verify(&issued.access_token, later),
            Err(JwtError::IssuerMismatch { .. })
        ));
    }

    #[test]
    fn test_verify_with_wrong_secret() {
        let handler1 = JwtHandler::new(b"secret1_at_least_32_bytes_long_key!");
        let handler2 = JwtHandler::new(b"secret2_at_least_32_bytes_long_key!");
        let now = fixed_now();

        let issued = handler1.issue("user123", now).unwrap();

        assert_eq!(
            handler2.verify(&issued.access_token, now),
            Err(JwtError::BadSignature)
        );
    }

    #[test]
    fn test_verify_with_different_algorithm() {
        let hs256 = JwtHandler::new(SECRET);
        let hs512 = JwtHandler::new(SECRET).with_algorithm("HS512").unwrap();
        let now = fixed_now();

        let issued = hs512.issue("user123", now).unwrap();
        assert!(hs512.verify(&issued.access_token, now).is_ok());
        assert_eq!(
            hs256.verify(&issued.access_token, now),
            Err(JwtError::BadSignature)
        );
    }

    #[test]
    fn test_verify_malformed_token() {
        let handler = handler();
        let now = fixed_now();

        for token in ["", "invalid", "invalid.token", "invalid.token.here"] {
            assert!(
                matches!(handler.verify(token, now), Err(JwtError::Malformed(_))),
                "token {:?} was not rejected as malformed",
                token
            );
        }
    }

    #[test]
    fn test_verify_rejects_unsigned_token() {
        let handler = handler();
        let now = fixed_now();
        let issued = handler.issue("user123", now).unwrap();

        // {"alg":"none","typ":"JWT"}
        let header = "eyJhbGciOiJub25lIiwidHlwIjoiSldUIn0";
        let payload = issued.access_token.split('.').nth(1).unwrap();

        for token in [format!("{header}.{payload}."), format!("{header}.{payload}")] {
            assert!(handler.verify(&token, now).is_err());
        }
    }

    #[test]
    fn test_with_algorithm_rejects_non_hmac() {
        assert_eq!(
            JwtHandler::new(SECRET).with_algorithm("RS256").err(),
            Some(JwtError::UnsupportedAlgorithm("RS256".to_string()))
        );
        assert_eq!(
            JwtHandler::new(SECRET).with_algorithm("none").err(),
            Some(JwtError::UnsupportedAlgorithm("none".to_string()))
        );
    }

    #[test]
    fn test_with_lifetime_rejects_non_positive() {
        assert_eq!(
            JwtHandler::new(SECRET).with_lifetime(0).err(),
            Some(JwtError::InvalidLifetime(0))
        );
    }
}
