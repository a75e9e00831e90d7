use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::language::DEFAULT_LANGUAGE;

pub const DEFAULT_METADATA_ENDPOINT: &str = "https://noembed.com/embed";
pub const DEFAULT_METADATA_TIMEOUT: Duration = Duration::from_secs(5);
pub const DEFAULT_CAPTIONS_TIMEOUT: Duration = Duration::from_secs(10);
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/133.0.0.0 Safari/537.36";

/// Settings shared by the resolver and its providers.
///
/// Built once at startup (from CLI flags / `TUBESCRIPT_*` variables) and handed
/// to whatever needs it. Contains no secrets, so it is safe to echo back in
/// debug output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Used when a request carries no usable language codes.
    pub default_language: String,
    /// oEmbed-style endpoint queried for title and channel.
    pub metadata_endpoint: String,
    #[serde(with = "duration_secs")]
    pub metadata_timeout: Duration,
    #[serde(with = "duration_secs")]
    pub captions_timeout: Duration,
    pub user_agent: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            default_language: DEFAULT_LANGUAGE.to_string(),
            metadata_endpoint: DEFAULT_METADATA_ENDPOINT.to_string(),
            metadata_timeout: DEFAULT_METADATA_TIMEOUT,
            captions_timeout: DEFAULT_CAPTIONS_TIMEOUT,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl ServiceConfig {
    pub fn with_default_language(mut self, language: impl Into<String>) -> Self {
        self.default_language = language.into();
        self
    }

    pub fn with_metadata_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.metadata_endpoint = endpoint.into();
        self
    }

    pub fn with_metadata_timeout(mut self, timeout: Duration) -> Self {
        self.metadata_timeout = timeout;
        self
    }

    pub fn with_captions_timeout(mut self, timeout: Duration) -> Self {
        self.captions_timeout = timeout;
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

mod duration_secs {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(value.as_secs_f64())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let secs = f64::deserialize(deserializer)?;
        if !secs.is_finite() || secs < 0.0 {
            return Err(serde::de::Error::custom("timeout must be a non-negative number of seconds"));
        }
        Ok(Duration::from_secs_f64(secs))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_defaults() {
        let config = ServiceConfig::default();
        assert_eq!(config.default_language, "en");
        assert_eq!(config.metadata_timeout, Duration::from_secs(5));
        assert_eq!(config.captions_timeout, Duration::from_secs(10));
        assert_eq!(config.metadata_endpoint, "https://noembed.com/embed");
    }

    #[test]
    fn test_timeouts_serialize_as_seconds() {
        let config = ServiceConfig::default()
            .with_metadata_timeout(Duration::from_millis(2500))
            .with_default_language("de");
        let value = serde_json::to_value(&config).unwrap();
        assert_eq!(value["metadata_timeout"], json!(2.5));
        assert_eq!(value["captions_timeout"], json!(10.0));
        assert_eq!(value["default_language"], json!("de"));

        let back: ServiceConfig = serde_json::from_value(value).unwrap();
        assert_eq!(back, config);
    }
}
