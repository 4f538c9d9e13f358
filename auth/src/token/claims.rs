use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// Claims carried inside an access token.
///
/// Closed set: the subject's user id, a denormalized copy of the email at
/// issuance time, and the expiry / issued-at timestamps. Tokens are
/// stateless; nothing here is persisted server-side.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AccessClaims {
    /// Subject (user id)
    pub sub: i64,

    /// Email at issuance time
    pub email: String,

    /// Expiration time (Unix timestamp)
    pub exp: i64,

    /// Issued at (Unix timestamp)
    pub iat: i64,
}

impl AccessClaims {
    /// Create claims for a subject expiring `ttl` from now.
    pub fn new(sub: i64, email: impl Into<String>, ttl: Duration) -> Self {
        let now = Utc::now();

        Self {
            sub,
            email: email.into(),
            exp: (now + ttl).timestamp(),
            iat: now.timestamp(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_claims_lifetime() {
        let claims = AccessClaims::new(7, "alice@example.com", Duration::days(7));

        assert_eq!(claims.sub, 7);
        assert_eq!(claims.email, "alice@example.com");
        assert_eq!(claims.exp - claims.iat, 7 * 24 * 60 * 60);
    }
}
