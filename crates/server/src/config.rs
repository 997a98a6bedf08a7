//! Server configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `STUDYLAMP_HOST` - Bind address (default: 127.0.0.1)
//! - `STUDYLAMP_PORT` - Listen port (default: 8080)
//! - `GROQ_API_KEY` - Completion service API key; without it the server still
//!   starts, but coaching endpoints answer 500 until a key is configured
//! - `GROQ_API_URL` - Completion endpoint base URL
//!   (default: `https://api.groq.com/openai/v1`)
//! - `GROQ_MODEL` - Completion model ID (default: llama-3.3-70b-versatile)
//! - `STUDYLAMP_DISTRACTING_DOMAINS` - Comma-separated override of the
//!   built-in distracting-domain list
//! - `STUDYLAMP_LOG_JSON` - Emit JSON logs when set
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name
//! - `SENTRY_SAMPLE_RATE` / `SENTRY_TRACES_SAMPLE_RATE` - Sampling knobs

use std::collections::HashMap;
use std::net::{IpAddr, SocketAddr};

use secrecy::{ExposeSecret, SecretString};
use studylamp_core::DomainList;
use thiserror::Error;

const MIN_ENTROPY_BITS_PER_CHAR: f64 = 3.3;
const DEFAULT_COMPLETION_MODEL: &str = "llama-3.3-70b-versatile";
const DEFAULT_COMPLETION_BASE_URL: &str = "https://api.groq.com/openai/v1";

/// Blocklist of common placeholder patterns (case-insensitive)
const PLACEHOLDER_PATTERNS: &[&str] = &[
    "your-",
    "changeme",
    "replace",
    "placeholder",
    "example",
    "secret",
    "password",
    "xxx",
    "todo",
    "fixme",
    "insert",
    "enter-",
    "put-your",
    "add-your",
];

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("Insecure secret in {0}: {1}")]
    InsecureSecret(String, String),
}

/// Server application configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Completion service configuration
    pub completion: CompletionConfig,
    /// Domains treated as distracting by the classifier
    pub distracting_domains: DomainList,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment (e.g., "development", "staging", "production")
    pub sentry_environment: Option<String>,
    /// Sentry error sample rate (0.0 to 1.0)
    pub sentry_sample_rate: f32,
    /// Sentry traces sample rate for performance monitoring (0.0 to 1.0)
    pub sentry_traces_sample_rate: f32,
}

/// Completion service (Groq) configuration.
///
/// Implements `Debug` manually to redact the API key.
#[derive(Clone)]
pub struct CompletionConfig {
    /// API key; `None` leaves the coaching endpoints unconfigured
    pub api_key: Option<SecretString>,
    /// Endpoint base URL, without the `/chat/completions` suffix
    pub base_url: String,
    /// Model ID (e.g., llama-3.3-70b-versatile)
    pub model: String,
}

impl std::fmt::Debug for CompletionConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompletionConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .finish()
    }
}

impl ServerConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable fails to parse (host, port, domain
    /// list). A missing `GROQ_API_KEY` is not an error here; the affected
    /// endpoints report it per request instead.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let host = get_env_or_default("STUDYLAMP_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("STUDYLAMP_HOST".to_string(), e.to_string()))?;
        let port = get_env_or_default("STUDYLAMP_PORT", "8080")
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("STUDYLAMP_PORT".to_string(), e.to_string()))?;

        let completion = CompletionConfig::from_env();
        let distracting_domains = match get_optional_env("STUDYLAMP_DISTRACTING_DOMAINS") {
            Some(raw) => parse_domain_list(&raw)?,
            None => DomainList::default(),
        };

        let sentry_dsn = get_optional_env("SENTRY_DSN");
        let sentry_environment = get_optional_env("SENTRY_ENVIRONMENT");
        let sentry_sample_rate = get_optional_env("SENTRY_SAMPLE_RATE")
            .and_then(|s| s.parse().ok())
            .unwrap_or(1.0);
        let sentry_traces_sample_rate = get_optional_env("SENTRY_TRACES_SAMPLE_RATE")
            .and_then(|s| s.parse().ok())
            .unwrap_or(1.0);

        Ok(Self {
            host,
            port,
            completion,
            distracting_domains,
            sentry_dsn,
            sentry_environment,
            sentry_sample_rate,
            sentry_traces_sample_rate,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Returns a reference to the completion configuration.
    #[must_use]
    pub const fn completion(&self) -> &CompletionConfig {
        &self.completion
    }

    /// Returns the configured distracting-domain list.
    #[must_use]
    pub const fn distracting_domains(&self) -> &DomainList {
        &self.distracting_domains
    }
}

impl CompletionConfig {
    /// Load completion configuration from environment.
    ///
    /// The API key is optional so that classification and timers work without
    /// one; a weak-looking key only logs a warning, since keys rotate and the
    /// upstream rejects bad ones anyway.
    fn from_env() -> Self {
        let api_key = get_optional_env("GROQ_API_KEY").map(|key| {
            if let Err(e) = validate_secret_strength(&key, "GROQ_API_KEY") {
                tracing::warn!("GROQ_API_KEY validation warning: {e}");
            }
            SecretString::from(key)
        });

        let base_url = get_env_or_default("GROQ_API_URL", DEFAULT_COMPLETION_BASE_URL)
            .trim_end_matches('/')
            .to_string();

        Self {
            api_key,
            base_url,
            model: get_env_or_default("GROQ_MODEL", DEFAULT_COMPLETION_MODEL),
        }
    }

    /// Expose the API key when configured.
    #[must_use]
    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_ref().map(ExposeSecret::expose_secret)
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Parse a comma-separated domain list override.
fn parse_domain_list(raw: &str) -> Result<DomainList, ConfigError> {
    let list = DomainList::new(raw.split(','));
    if list.is_empty() {
        return Err(ConfigError::InvalidEnvVar(
            "STUDYLAMP_DISTRACTING_DOMAINS".to_string(),
            "must contain at least one domain".to_string(),
        ));
    }
    Ok(list)
}

/// Calculate Shannon entropy in bits per character.
fn shannon_entropy(s: &str) -> f64 {
    if s.is_empty() {
        return 0.0;
    }

    let mut freq: HashMap<char, usize> = HashMap::new();
    for c in s.chars() {
        *freq.entry(c).or_insert(0) += 1;
    }

    #[allow(clippy::cast_precision_loss)] // String length will never exceed f64 precision
    let len = s.len() as f64;
    freq.values()
        .map(|&count| {
            #[allow(clippy::cast_precision_loss)] // Character count will never exceed f64 precision
            let p = count as f64 / len;
            -p * p.log2()
        })
        .sum()
}

/// Validate that a secret is not a placeholder and has sufficient entropy.
fn validate_secret_strength(secret: &str, var_name: &str) -> Result<(), ConfigError> {
    let lower = secret.to_lowercase();

    // Check blocklist
    for pattern in PLACEHOLDER_PATTERNS {
        if lower.contains(pattern) {
            return Err(ConfigError::InsecureSecret(
                var_name.to_string(),
                format!("appears to be a placeholder (contains '{pattern}')"),
            ));
        }
    }

    // Check entropy (real API keys have high entropy)
    let entropy = shannon_entropy(secret);
    if entropy < MIN_ENTROPY_BITS_PER_CHAR {
        return Err(ConfigError::InsecureSecret(
            var_name.to_string(),
            format!(
                "entropy too low ({entropy:.2} bits/char, need >= {MIN_ENTROPY_BITS_PER_CHAR:.1}). Use a real API key."
            ),
        ));
    }

    Ok(())
}

/// Build a configuration suitable for unit tests.
#[cfg(test)]
pub(crate) fn test_config() -> ServerConfig {
    ServerConfig {
        host: IpAddr::V4(std::net::Ipv4Addr::LOCALHOST),
        port: 8080,
        completion: CompletionConfig {
            api_key: Some(SecretString::from("gsk_test_key")),
            base_url: DEFAULT_COMPLETION_BASE_URL.to_string(),
            model: DEFAULT_COMPLETION_MODEL.to_string(),
        },
        distracting_domains: DomainList::default(),
        sentry_dsn: None,
        sentry_environment: None,
        sentry_sample_rate: 1.0,
        sentry_traces_sample_rate: 1.0,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_shannon_entropy_single_char() {
        // All same character = 0 entropy
        assert!((shannon_entropy("aaaaaaa") - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_shannon_entropy_two_chars() {
        // "ab" has entropy of 1 bit per char (50% a, 50% b)
        let entropy = shannon_entropy("ab");
        assert!((entropy - 1.0).abs() < 0.01);
    }

    #[test]
    fn test_validate_secret_strength_placeholder() {
        let result = validate_secret_strength("your-api-key-here", "TEST_VAR");
        assert!(matches!(result, Err(ConfigError::InsecureSecret(_, _))));
    }

    #[test]
    fn test_validate_secret_strength_low_entropy() {
        let result = validate_secret_strength("aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa", "TEST_VAR");
        assert!(matches!(result, Err(ConfigError::InsecureSecret(_, _))));
    }

    #[test]
    fn test_validate_secret_strength_valid() {
        // High-entropy random string
        let result = validate_secret_strength("aB3$xY9!mK2@nL5#pQ7&rT0*uW4^zC6", "TEST_VAR");
        assert!(result.is_ok());
    }

    #[test]
    fn test_parse_domain_list() {
        let list = parse_domain_list("news.example.com, Videos.example.com ,").unwrap();
        assert_eq!(
            list.entries(),
            &["news.example.com".to_owned(), "videos.example.com".to_owned()]
        );
    }

    #[test]
    fn test_parse_domain_list_rejects_blank() {
        assert!(matches!(
            parse_domain_list(" , ,"),
            Err(ConfigError::InvalidEnvVar(_, _))
        ));
    }

    #[test]
    fn test_socket_addr() {
        let config = test_config();
        let addr = config.socket_addr();
        assert_eq!(addr.ip().to_string(), "127.0.0.1");
        assert_eq!(addr.port(), 8080);
    }

    #[test]
    fn test_completion_config_debug_redacts_key() {
        let config = test_config();
        let debug_output = format!("{:?}", config.completion());

        assert!(debug_output.contains(DEFAULT_COMPLETION_MODEL));
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("gsk_test_key"));
    }

    #[test]
    fn test_completion_config_debug_shows_missing_key() {
        let config = CompletionConfig {
            api_key: None,
            base_url: DEFAULT_COMPLETION_BASE_URL.to_string(),
            model: DEFAULT_COMPLETION_MODEL.to_string(),
        };

        let debug_output = format!("{config:?}");
        assert!(debug_output.contains("None"));
    }

    #[test]
    fn test_default_completion_endpoint() {
        assert_eq!(DEFAULT_COMPLETION_BASE_URL, "https://api.groq.com/openai/v1");
        assert_eq!(DEFAULT_COMPLETION_MODEL, "llama-3.3-70b-versatile");
    }

    #[test]
    fn test_api_key_accessor() {
        let config = test_config();
        assert_eq!(config.completion().api_key(), Some("gsk_test_key"));

        let keyless = CompletionConfig {
            api_key: None,
            base_url: String::new(),
            model: String::new(),
        };
        assert_eq!(keyless.api_key(), None);
    }
}
