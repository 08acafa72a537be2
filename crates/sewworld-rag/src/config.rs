use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{AssistantError, Result};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AssistantConfig {
    pub search: SearchConfig,
    pub conversation: ConversationConfig,
    pub response: ResponseConfig,
    pub debug: DebugConfig,
    pub store: StoreInfo,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Candidates kept by the keyword pre-filter.
    pub max_results: usize,
    /// Sources kept after similarity re-ranking.
    pub rerank_top_k: usize,
    /// Advisory only; answers are never suppressed below it.
    pub min_confidence_threshold: f32,
    /// Memoise retrieval results per normalised query.
    pub enable_caching: bool,
    pub cache_expiry_secs: u64,
    pub cache_capacity: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ConversationConfig {
    pub max_history: usize,
    /// Advisory only; sessions live until explicitly cleared.
    pub session_timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ResponseConfig {
    pub enable_source_citations: bool,
    pub enable_suggested_actions: bool,
    /// Character cap for raw item content echoed back in fallback answers.
    pub max_context_length: usize,
    /// Whether adapters show the confidence score. It is always computed.
    pub enable_confidence_scores: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DebugConfig {
    pub enable_debug_logging: bool,
    pub enable_performance_metrics: bool,
}

/// Shop details quoted by the greeting and showroom answers.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreInfo {
    pub name: String,
    pub address: String,
    pub phone: String,
    pub hours: String,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_results: 8,
            rerank_top_k: 5,
            min_confidence_threshold: 0.3,
            enable_caching: true,
            cache_expiry_secs: 5 * 60,
            cache_capacity: 500,
        }
    }
}

impl Default for ConversationConfig {
    fn default() -> Self {
        Self {
            max_history: 10,
            session_timeout_secs: 30 * 60,
        }
    }
}

impl Default for ResponseConfig {
    fn default() -> Self {
        Self {
            enable_source_citations: true,
            enable_suggested_actions: true,
            max_context_length: 1000,
            enable_confidence_scores: true,
        }
    }
}

impl Default for StoreInfo {
    fn default() -> Self {
        Self {
            name: "SR Sewing World".to_string(),
            address: "Unit-01, 1145, opp. SBI Bank, Main Road, Mangammanapalya, Bommanahalli, Bengaluru, Karnataka 560068".to_string(),
            phone: "+91 9019229243".to_string(),
            hours: "Everyday: 10:00 AM - 8:30 PM".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Profile {
    Production,
    Development,
    Default,
}

impl Profile {
    pub fn parse(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            "development" | "dev" => Self::Development,
            _ => Self::Default,
        }
    }

    /// Reads `SEWWORLD_PROFILE`; unset or unknown values select the defaults.
    pub fn from_env() -> Self {
        std::env::var("SEWWORLD_PROFILE")
            .map(|v| Self::parse(&v))
            .unwrap_or(Self::Default)
    }
}

impl AssistantConfig {
    pub fn for_profile(profile: Profile) -> Self {
        let mut config = Self::default();
        match profile {
            Profile::Production => {
                config.search.max_results = 5;
                config.search.enable_caching = true;
                config.debug.enable_debug_logging = false;
                config.debug.enable_performance_metrics = false;
            }
            Profile::Development => {
                config.search.max_results = 10;
                config.search.enable_caching = false;
                config.debug.enable_debug_logging = true;
                config.debug.enable_performance_metrics = true;
            }
            Profile::Default => {}
        }
        config
    }

    /// Validate config values, collecting every violated rule.
    pub fn validate(&self) -> Result<()> {
        let mut errors = Vec::new();

        if !(1..=20).contains(&self.search.max_results) {
            errors.push("search.max_results must be between 1 and 20".to_string());
        }
        if self.search.rerank_top_k == 0 {
            errors.push("search.rerank_top_k must be > 0".to_string());
        }
        if !(0.0..=1.0).contains(&self.search.min_confidence_threshold) {
            errors.push("search.min_confidence_threshold must be in [0.0, 1.0]".to_string());
        }
        if self.search.enable_caching {
            if self.search.cache_expiry_secs == 0 {
                errors.push("search.cache_expiry_secs must be > 0 when caching is enabled".to_string());
            }
            if self.search.cache_capacity == 0 {
                errors.push("search.cache_capacity must be > 0 when caching is enabled".to_string());
            }
        }
        if !(1..=50).contains(&self.conversation.max_history) {
            errors.push("conversation.max_history must be between 1 and 50".to_string());
        }
        if self.conversation.session_timeout_secs < 60 {
            errors.push("conversation.session_timeout_secs must be at least 60".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(AssistantError::InvalidConfig(errors))
        }
    }

    /// Load config from a JSON file, falling back to defaults for missing fields.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| AssistantError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = AssistantConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.search.max_results, 8);
        assert_eq!(config.conversation.max_history, 10);
        assert_eq!(config.conversation.session_timeout_secs, 1800);
        assert!((config.search.min_confidence_threshold - 0.3).abs() < f32::EPSILON);
    }

    #[test]
    fn test_profiles() {
        let prod = AssistantConfig::for_profile(Profile::Production);
        assert_eq!(prod.search.max_results, 5);
        assert!(prod.search.enable_caching);
        assert!(!prod.debug.enable_performance_metrics);

        let dev = AssistantConfig::for_profile(Profile::Development);
        assert_eq!(dev.search.max_results, 10);
        assert!(dev.debug.enable_debug_logging);
        assert!(!dev.search.enable_caching);

        assert_eq!(Profile::parse("PROD"), Profile::Production);
        assert_eq!(Profile::parse("whatever"), Profile::Default);
    }

    #[test]
    fn test_validate_collects_all_errors() {
        let mut config = AssistantConfig::default();
        config.search.max_results = 0;
        config.conversation.max_history = 100;
        config.conversation.session_timeout_secs = 5;

        match config.validate() {
            Err(AssistantError::InvalidConfig(errors)) => assert_eq!(errors.len(), 3),
            other => panic!("expected InvalidConfig, got {:?}", other),
        }
    }

    #[test]
    fn test_cache_settings_validated_only_when_enabled() {
        let mut config = AssistantConfig::default();
        config.search.cache_expiry_secs = 0;
        config.search.cache_capacity = 0;
        match config.validate() {
            Err(AssistantError::InvalidConfig(errors)) => assert_eq!(errors.len(), 2),
            other => panic!("expected InvalidConfig, got {:?}", other),
        }

        config.search.enable_caching = false;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: AssistantConfig =
            serde_json::from_str(r#"{ "search": { "max_results": 3 } }"#).unwrap();
        assert_eq!(config.search.max_results, 3);
        assert_eq!(config.search.rerank_top_k, 5);
        assert!(config.response.enable_source_citations);
        assert!(config.response.enable_confidence_scores);
        assert_eq!(config.search.cache_expiry_secs, 300);
        assert_eq!(config.store.name, "SR Sewing World");
    }

    #[test]
    fn test_from_file_missing_path() {
        let err = AssistantConfig::from_file(Path::new("/nonexistent/sewworld.json")).unwrap_err();
        assert!(matches!(err, AssistantError::Io { .. }));
    }
}
