//! # Application configuration (`app.toml`)
//!
//! The web package embeds `app.toml` at build time and parses it with
//! [`AppConfig::from_toml`]. There are no runtime environment variables: the
//! only other deployment knob is the dev-server proxy in `Dioxus.toml`.
//!
//! ## Structure
//!
//! ```toml
//! [api]
//! base_url = "/api"            # prefix for every REST call
//!
//! [cache]
//! analytics_ttl_secs = 300     # analytics cache lifetime
//!
//! [share]
//! public_base_url = ""         # origin used in shared project links (empty = current origin)
//!
//! [ui]
//! page_size = 10               # rows per table page
//! ```
//!
//! Every section and field has a default, so a missing or empty file is
//! equivalent to [`AppConfig::default`].

use serde::{Deserialize, Serialize};

/// Top-level configuration stored in `app.toml`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub cache: CacheConfig,
    #[serde(default)]
    pub share: ShareConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

/// REST backend settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base path or absolute origin prepended to every endpoint.
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

fn default_base_url() -> String {
    "/api".to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

/// Client-side cache settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Lifetime of analytics responses in seconds.
    #[serde(default = "default_analytics_ttl")]
    pub analytics_ttl_secs: u64,
}

fn default_analytics_ttl() -> u64 {
    300
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            analytics_ttl_secs: default_analytics_ttl(),
        }
    }
}

/// Sharing settings for public project links.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ShareConfig {
    /// Origin used when building public project URLs.
    /// Empty string means "use the current page origin".
    #[serde(default)]
    pub public_base_url: String,
}

/// Table and layout settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UiConfig {
    #[serde(default = "default_page_size")]
    pub page_size: usize,
}

fn default_page_size() -> usize {
    10
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
        }
    }
}

impl AppConfig {
    /// The well-known filename for the config file.
    pub fn filename() -> &'static str {
        "app.toml"
    }

    /// Parse from TOML string.
    pub fn from_toml(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(s)
    }

    /// Serialize to TOML string.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Builder method to override the API base URL.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.api.base_url = base_url.into();
        self
    }

    /// Analytics cache lifetime in seconds, never below one second.
    pub fn analytics_ttl_secs(&self) -> u64 {
        self.cache.analytics_ttl_secs.max(1)
    }

    /// Rows per table page, never zero.
    pub fn page_size(&self) -> usize {
        self.ui.page_size.max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_is_default() {
        let config = AppConfig::from_toml("").unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.api.base_url, "/api");
        assert_eq!(config.cache.analytics_ttl_secs, 300);
        assert_eq!(config.page_size(), 10);
    }

    #[test]
    fn test_partial_sections_keep_defaults() {
        let config = AppConfig::from_toml(
            r#"
            [api]
            base_url = "http://localhost:8080/api"

            [ui]
            page_size = 0
            "#,
        )
        .unwrap();
        assert_eq!(config.api.base_url, "http://localhost:8080/api");
        assert_eq!(config.cache.analytics_ttl_secs, 300);
        assert_eq!(config.page_size(), 1);
        assert!(config.share.public_base_url.is_empty());
    }

    #[test]
    fn test_toml_roundtrip() {
        let config = AppConfig::default().with_base_url("https://pm.example.com/api");
        let text = config.to_toml().unwrap();
        assert_eq!(AppConfig::from_toml(&text).unwrap(), config);
    }
}
