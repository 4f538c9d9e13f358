use chrono::Duration;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;

use super::claims::AccessClaims;
use super::errors::TokenError;

/// Default token lifetime when the caller does not pick one.
const DEFAULT_TTL_DAYS: i64 = 7;

/// Signed access-token codec.
///
/// Issues and validates HS256 tokens carrying [`AccessClaims`]. The
/// algorithm is pinned: a token whose header names anything other than
/// HS256 is rejected regardless of its signature.
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
    default_ttl: Duration,
}

impl TokenCodec {
    /// Create a new codec from a symmetric secret key.
    ///
    /// # Security Notes
    /// - The secret should be at least 256 bits (32 bytes) for HS256
    /// - Store secrets in environment variables or secure vaults, never in code
    /// - The caller is responsible for refusing to start with a missing secret
    pub fn new(secret: &[u8]) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm: Algorithm::HS256,
            default_ttl: Duration::days(DEFAULT_TTL_DAYS),
        }
    }

    /// Override the default token lifetime.
    pub fn with_default_ttl(mut self, ttl: Duration) -> Self {
        self.default_ttl = ttl;
        self
    }

    /// Issue a signed token for a subject, expiring `ttl` from now.
    ///
    /// # Errors
    /// * `EncodingFailed` - Serialization or signing failed
    pub fn issue(&self, sub: i64, email: &str, ttl: Duration) -> Result<String, TokenError> {
        let claims = AccessClaims::new(sub, email, ttl);
        let header = Header::new(self.algorithm);

        encode(&header, &claims, &self.encoding_key)
            .map_err(|e| TokenError::EncodingFailed(e.to_string()))
    }

    /// Issue a signed token with the configured default lifetime.
    pub fn issue_default(&self, sub: i64, email: &str) -> Result<String, TokenError> {
        self.issue(sub, email, self.default_ttl)
    }

    /// Decode and validate a token.
    ///
    /// Never panics on attacker-controlled input; every failure mode is a
    /// [`TokenError`] variant:
    ///
    /// # Errors
    /// * `Expired` - The `exp` claim is in the past (zero leeway)
    /// * `SignatureMismatch` - Signature does not verify against the secret
    /// * `AlgorithmMismatch` - Header algorithm is not HS256
    /// * `Malformed` - Structurally invalid token or claims
    pub fn decode(&self, token: &str) -> Result<AccessClaims, TokenError> {
        let mut validation = Validation::new(self.algorithm);
        validation.leeway = 0;

        let token_data =
            decode::<AccessClaims>(token, &self.decoding_key, &validation).map_err(|e| {
                match e.kind() {
                    ErrorKind::ExpiredSignature => TokenError::Expired,
                    ErrorKind::InvalidSignature => TokenError::SignatureMismatch,
                    ErrorKind::InvalidAlgorithm | ErrorKind::InvalidAlgorithmName => {
                        TokenError::AlgorithmMismatch
                    }
                    _ => TokenError::Malformed(e.to_string()),
                }
            })?;

        Ok(token_data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &[u8] = b"test_secret_key_at_least_32_bytes!";

    #[test]
    fn test_issue_and_decode() {
        let codec = TokenCodec::new(SECRET);

        let token = codec
            .issue(42, "alice@example.com", Duration::hours(1))
            .expect("Failed to issue token");
        assert!(!token.is_empty());

        let claims = codec.decode(&token).expect("Failed to decode token");
        assert_eq!(claims.sub, 42);
        assert_eq!(claims.email, "alice@example.com");
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_decode_expired_token() {
        let codec = TokenCodec::new(SECRET);

        let token = codec
            .issue(42, "alice@example.com", Duration::seconds(-60))
            .expect("Failed to issue token");

        assert_eq!(codec.decode(&token), Err(TokenError::Expired));
    }

    #[test]
    fn test_decode_with_wrong_secret() {
        let codec1 = TokenCodec::new(b"secret1_at_least_32_bytes_long_key!");
        let codec2 = TokenCodec::new(b"secret2_at_least_32_bytes_long_key!");

        let token = codec1
            .issue(42, "alice@example.com", Duration::hours(1))
            .expect("Failed to issue token");

        assert_eq!(codec2.decode(&token), Err(TokenError::SignatureMismatch));
    }

    #[test]
    fn test_decode_tampered_signature() {
        let codec = TokenCodec::new(SECRET);

        let token = codec
            .issue(42, "alice@example.com", Duration::hours(1))
            .expect("Failed to issue token");

        // Flip one character in the signature segment
        let dot = token.rfind('.').unwrap();
        let mut tampered: Vec<char> = token.chars().collect();
        let i = dot + 3;
        tampered[i] = if tampered[i] == 'A' { 'B' } else { 'A' };
        let tampered: String = tampered.into_iter().collect();

        assert_eq!(codec.decode(&tampered), Err(TokenError::SignatureMismatch));
    }

    #[test]
    fn test_decode_tampered_payload() {
        let codec = TokenCodec::new(SECRET);

        let token = codec
            .issue(42, "alice@example.com", Duration::hours(1))
            .expect("Failed to issue token");

        // Flip one character in the payload segment; whatever the flip
        // turns into, the token must no longer decode
        let start = token.find('.').unwrap() + 1;
        let end = token.rfind('.').unwrap();
        for i in start..end {
            let mut tampered: Vec<char> = token.chars().collect();
            tampered[i] = if tampered[i] == 'A' { 'B' } else { 'A' };
            let tampered: String = tampered.into_iter().collect();

            assert!(codec.decode(&tampered).is_err(), "flip at {} accepted", i);
        }
    }

    #[test]
    fn test_decode_rejects_other_algorithm() {
        let codec = TokenCodec::new(SECRET);

        // Same secret, different algorithm in the header
        let claims = AccessClaims::new(42, "alice@example.com", Duration::hours(1));
        let token = encode(
            &Header::new(Algorithm::HS384),
            &claims,
            &EncodingKey::from_secret(SECRET),
        )
        .expect("Failed to encode HS384 token");

        assert_eq!(codec.decode(&token), Err(TokenError::AlgorithmMismatch));
    }

    #[test]
    fn test_decode_malformed_token() {
        let codec = TokenCodec::new(SECRET);

        assert!(matches!(
            codec.decode("not.a.token"),
            Err(TokenError::Malformed(_))
        ));
        assert!(matches!(codec.decode(""), Err(TokenError::Malformed(_))));
        assert!(matches!(
            codec.decode("garbage-without-dots"),
            Err(TokenError::Malformed(_))
        ));
    }

    #[test]
    fn test_issue_default_uses_configured_ttl() {
        let codec = TokenCodec::new(SECRET).with_default_ttl(Duration::hours(2));

        let token = codec
            .issue_default(42, "alice@example.com")
            .expect("Failed to issue token");
        let claims = codec.decode(&token).expect("Failed to decode token");

        assert_eq!(claims.exp - claims.iat, 2 * 60 * 60);
    }
}
