use std::env;

use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub jwt: JwtConfig,
    pub captioner: CaptionerConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub http_port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub expiration_days: i64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct CaptionerConfig {
    pub api_token: String,
    pub model: String,
}

impl Config {
    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (JWT__SECRET, DATABASE__URL, etc.)
    /// 2. Environment-specific config file (config/{environment}.toml)
    /// 3. Default config file (config/default.toml)
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let configuration = ConfigBuilder::builder()
            // Start with default configuration
            .add_source(File::with_name("config/default").required(false))
            // Layer on environment-specific configuration
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Layer on environment variables (with __ as separator)
            // Example: JWT__SECRET=... overrides jwt.secret
            .add_source(Environment::with_prefix("").separator("__"))
            .build()?;

        let config: Config = configuration.try_deserialize()?;

        Ok(config)
    }

    /// Reject configurations the service must not run with.
    ///
    /// There is deliberately no fallback signing secret: starting with a
    /// well-known secret would let anyone forge tokens, so an unset one
    /// is fatal at startup instead.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.jwt.secret.trim().is_empty() {
            return Err(ConfigError::Message(
                "jwt.secret is not set; refusing to start without a signing secret".to_string(),
            ));
        }

        if self.captioner.api_token.trim().is_empty() {
            return Err(ConfigError::Message(
                "captioner.api_token is not set".to_string(),
            ));
        }

        if self.jwt.expiration_days <= 0 {
            return Err(ConfigError::Message(
                "jwt.expiration_days must be positive".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_config() -> Config {
        Config {
            database: DatabaseConfig {
                url: "postgresql://localhost/captions".to_string(),
            },
            server: ServerConfig { http_port: 8000 },
            jwt: JwtConfig {
                secret: "a-signing-secret-of-reasonable-length".to_string(),
                expiration_days: 7,
            },
            captioner: CaptionerConfig {
                api_token: "hf_token".to_string(),
                model: "Salesforce/blip-image-captioning-base".to_string(),
            },
        }
    }

    #[test]
    fn test_valid_config_passes() {
        assert!(valid_config().validate().is_ok());
    }

    #[test]
    fn test_empty_secret_is_fatal() {
        let mut config = valid_config();
        config.jwt.secret = "".to_string();
        assert!(config.validate().is_err());

        config.jwt.secret = "   ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_empty_captioner_token_is_fatal() {
        let mut config = valid_config();
        config.captioner.api_token = "".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_nonpositive_ttl_is_fatal() {
        let mut config = valid_config();
        config.jwt.expiration_days = 0;
        assert!(config.validate().is_err());
    }
}
