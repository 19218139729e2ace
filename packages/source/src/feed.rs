//! Feed definitions loaded from embedded TOML configs.

use air_map_air_models::StationSource;
use serde::Deserialize;

/// The WAQI definition, embedded at compile time.
const WAQI_TOML: &str = include_str!("../feeds/waqi.toml");

/// Endpoint and tagging details for a live feed.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FeedDefinition {
    /// Short identifier.
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// Search endpoint.
    pub base_url: String,
    /// Environment variable holding the API token.
    pub token_env: String,
    /// Authority tag stamped on every station from this feed.
    pub station_source: StationSource,
    /// Prefix for station identifiers (`<prefix>-<uid>`).
    pub id_prefix: String,
}

/// Parses a feed definition from TOML.
///
/// # Errors
///
/// Returns an error string if the TOML is malformed.
pub fn parse_feed_toml(toml_str: &str) -> Result<FeedDefinition, String> {
    toml::de::from_str(toml_str).map_err(|e| e.to_string())
}

/// Returns the embedded WAQI feed definition.
///
/// # Panics
///
/// Panics if the embedded TOML is malformed.
#[must_use]
pub fn waqi_feed() -> FeedDefinition {
    parse_feed_toml(WAQI_TOML).unwrap_or_else(|e| panic!("Failed to parse waqi.toml: {e}"))
}

/// Runtime settings for the live feed.
///
/// The presence of a token is the only switch between live and simulated
/// station data.
#[derive(Debug, Clone)]
pub struct LiveFeedConfig {
    /// Feed endpoint details.
    pub definition: FeedDefinition,
    /// API token, if configured.
    pub token: Option<String>,
}

impl LiveFeedConfig {
    /// Reads the token from the environment variable named by `definition`.
    /// An empty value counts as unset.
    #[must_use]
    pub fn from_env(definition: FeedDefinition) -> Self {
        let token = std::env::var(&definition.token_env)
            .ok()
            .filter(|t| !t.trim().is_empty());

        if token.is_none() {
            log::warn!(
                "{} is not set; station data will be simulated",
                definition.token_env
            );
        }

        Self { definition, token }
    }

    /// Whether live fetching is enabled.
    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.token.is_some()
    }
}
