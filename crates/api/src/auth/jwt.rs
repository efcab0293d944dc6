//! JWT bearer-token generation and validation.
//!
//! Tokens are HS256-signed JWTs whose only identity claim is `sub`, the
//! user's id rendered as a string. The registered timing claims (`nbf`,
//! `iat`, `exp`) bound their lifetime; there is no revocation.

use accounts_core::types::{DbId, Timestamp};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::config::{env_or, ConfigError};

/// Default token lifetime in days.
pub const DEFAULT_EXPIRY_DAYS: i64 = 3;

/// JWT claims embedded in every bearer token.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Claims {
    /// Subject -- the user's id as a decimal string.
    pub sub: String,
    /// Not-before time (UTC Unix timestamp).
    pub nbf: i64,
    /// Issued-at time (UTC Unix timestamp).
    pub iat: i64,
    /// Expiration time (UTC Unix timestamp).
    pub exp: i64,
}

/// Configuration for token signing and validation.
#[derive(Clone)]
pub struct JwtConfig {
    /// HMAC-SHA256 secret used to sign and verify tokens.
    pub secret: String,
    /// Token lifetime in days (default: 3).
    pub expiry_days: i64,
}

impl std::fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"<redacted>")
            .field("expiry_days", &self.expiry_days)
            .finish()
    }
}

impl JwtConfig {
    /// Load JWT configuration from environment variables.
    ///
    /// | Env Var           | Required | Default |
    /// |-------------------|----------|---------|
    /// | `JWT_SECRET`      | **yes**  | --      |
    /// | `JWT_EXPIRY_DAYS` | no       | `3`     |
    pub fn from_env() -> Result<Self, ConfigError> {
        let secret = std::env::var("JWT_SECRET")
            .ok()
            .filter(|s| !s.is_empty())
            .ok_or(ConfigError::Missing { var: "JWT_SECRET" })?;

        let expiry_days: i64 = env_or("JWT_EXPIRY_DAYS", DEFAULT_EXPIRY_DAYS)?;
        if expiry_days <= 0 {
            return Err(ConfigError::Invalid {
                var: "JWT_EXPIRY_DAYS",
                reason: "must be a positive number of days".into(),
            });
        }

        Ok(Self {
            secret,
            expiry_days,
        })
    }

    /// Token lifetime as a duration.
    pub fn ttl(&self) -> chrono::Duration {
        chrono::Duration::days(self.expiry_days)
    }
}

/// Sign a token for `user_id` issued at `issued_at`, expiring one configured
/// lifetime later.
pub fn generate_token(
    user_id: DbId,
    issued_at: Timestamp,
    config: &JwtConfig,
) -> Result<String, jsonwebtoken::errors::Error> {
    let iat = issued_at.timestamp();
    let claims = Claims {
        sub: user_id.to_string(),
        nbf: iat,
        iat,
        exp: (issued_at + config.ttl()).timestamp(),
    };

    encode(
        &Header::default(), // HS256
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
}

/// Validate and decode a token, returning the embedded [`Claims`].
///
/// Checks the signature, expiry, and not-before claims.
pub fn validate_token(
    token: &str,
    config: &JwtConfig,
) -> Result<Claims, jsonwebtoken::errors::Error> {
    let mut validation = Validation::default(); // HS256, validates exp
    validation.validate_nbf = true;
    validation.set_required_spec_claims(&["exp", "sub"]);

    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &validation,
    )?;
    Ok(token_data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> JwtConfig {
        JwtConfig {
            secret: "test-secret-that-is-long-enough-for-hmac".to_string(),
            expiry_days: DEFAULT_EXPIRY_DAYS,
        }
    }

    #[test]
    fn generate_and_validate() {
        let config = test_config();
        let now = chrono::Utc::now();
        let token = generate_token(42, now, &config).expect("token generation should succeed");

        let claims = validate_token(&token, &config).expect("token validation should succeed");
        assert_eq!(claims.sub, "42");
        assert_eq!(claims.iat, now.timestamp());
        assert_eq!(claims.nbf, claims.iat);
        assert_eq!(claims.exp - claims.iat, 3 * 24 * 60 * 60);
    }

    #[test]
    fn token_is_compact_three_part_hs256() {
        let token = generate_token(1, chrono::Utc::now(), &test_config()).unwrap();
        assert_eq!(token.split('.').count(), 3);

        let header = jsonwebtoken::decode_header(&token).unwrap();
        assert_eq!(header.alg, jsonwebtoken::Algorithm::HS256);
    }

    #[test]
    fn expired_token_fails() {
        let config = test_config();
        // Issued four days ago with a three-day lifetime: well past the leeway.
        let issued_at = chrono::Utc::now() - chrono::Duration::days(4);
        let token = generate_token(1, issued_at, &config).unwrap();

        assert!(validate_token(&token, &config).is_err());
    }

    #[test]
    fn different_secrets_fail() {
        let config_a = JwtConfig {
            secret: "secret-alpha".to_string(),
            expiry_days: 3,
        };
        let config_b = JwtConfig {
            secret: "secret-bravo".to_string(),
            expiry_days: 3,
        };

        let token = generate_token(1, chrono::Utc::now(), &config_a).unwrap();
        assert!(
            validate_token(&token, &config_b).is_err(),
            "token signed with a different secret must fail"
        );
    }

    #[test]
    fn garbage_is_rejected() {
        assert!(validate_token("not.a.token", &test_config()).is_err());
        assert!(validate_token("", &test_config()).is_err());
    }

    #[test]
    fn debug_redacts_secret() {
        let printed = format!("{:?}", test_config());
        assert!(!printed.contains("test-secret"));
        assert!(printed.contains("<redacted>"));
    }
}
