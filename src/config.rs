//! Configuration management for the dashboard backend
//!
//! Reads settings from environment variables (a `.env` file is honoured),
//! fills defaults for everything missing and validates the result.

use crate::DashboardError;
use std::time::Duration;

/// Root configuration structure
#[derive(Debug, Clone)]
pub struct DashboardConfig {
    /// Listener settings
    pub server: ServerConfig,
    /// Upstream API locations and timeout
    pub upstream: UpstreamConfig,
    /// Weather request defaults
    pub weather: WeatherConfig,
    /// Values published to the frontend
    pub frontend: FrontendConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
    /// Per-route failure policy
    pub routes: RoutesConfig,
    /// Result sizes
    pub limits: LimitsConfig,
    /// Extra `country=Zone` pairs merged into the timezone table
    pub timezone_overrides: Vec<(String, String)>,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub port: u16,
    /// Directory served for unmatched paths
    pub static_dir: String,
}

#[derive(Debug, Clone)]
pub struct UpstreamConfig {
    pub coingecko_base_url: String,
    pub github_base_url: String,
    /// Optional token to lift GitHub's anonymous rate limit
    pub github_token: Option<String>,
    /// Only repositories created after this date are searched
    pub github_created_since: String,
    pub forecast_base_url: String,
    pub geocoding_base_url: String,
    /// Outbound request timeout in milliseconds
    pub timeout_ms: u64,
}

#[derive(Debug, Clone)]
pub struct WeatherConfig {
    /// `metric` or `imperial`
    pub units: String,
    /// Timezone sent to the forecast API when geocoding did not supply one
    pub timezone_mode: String,
}

#[derive(Debug, Clone)]
pub struct FrontendConfig {
    pub api_base_url: String,
    pub ip_geolocation_url: String,
}

/// Logging configuration settings
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    pub level: String,
    /// Log format (pretty or json)
    pub format: String,
    /// Forces debug level regardless of `level`
    pub debug: bool,
}

/// Whether a route substitutes mock data when its upstream fails
#[derive(Debug, Clone)]
pub struct RoutesConfig {
    pub crypto_fallback_on_failure: bool,
    pub github_fallback_on_failure: bool,
    pub weather_fallback_on_failure: bool,
}

#[derive(Debug, Clone)]
pub struct LimitsConfig {
    /// Size of the gainer and loser lists
    pub top_movers: usize,
    /// Size of the top repository list
    pub top_repos: usize,
    /// Coins requested from CoinGecko
    pub crypto_per_page: u32,
    /// Repositories requested from GitHub
    pub github_per_page: u32,
}

// Default value functions
fn default_port() -> u16 {
    5000
}

fn default_static_dir() -> String {
    "public".to_string()
}

fn default_coingecko_base_url() -> String {
    "https://api.coingecko.com/api/v3".to_string()
}

fn default_github_base_url() -> String {
    "https://api.github.com".to_string()
}

fn default_github_created_since() -> String {
    "2024-01-01".to_string()
}

fn default_forecast_base_url() -> String {
    "https://api.open-meteo.com/v1".to_string()
}

fn default_geocoding_base_url() -> String {
    "https://geocoding-api.open-meteo.com/v1".to_string()
}

fn default_timeout_ms() -> u64 {
    10_000
}

fn default_units() -> String {
    "metric".to_string()
}

fn default_timezone_mode() -> String {
    "auto".to_string()
}

fn default_frontend_api_base_url() -> String {
    "http://localhost:5000/api".to_string()
}

fn default_ip_geolocation_url() -> String {
    "https://ipapi.co/json/".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

fn default_top_movers() -> usize {
    5
}

fn default_top_repos() -> usize {
    10
}

fn default_page_size() -> u32 {
    20
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                port: default_port(),
                static_dir: default_static_dir(),
            },
            upstream: UpstreamConfig {
                coingecko_base_url: default_coingecko_base_url(),
                github_base_url: default_github_base_url(),
                github_token: None,
                github_created_since: default_github_created_since(),
                forecast_base_url: default_forecast_base_url(),
                geocoding_base_url: default_geocoding_base_url(),
                timeout_ms: default_timeout_ms(),
            },
            weather: WeatherConfig {
                units: default_units(),
                timezone_mode: default_timezone_mode(),
            },
            frontend: FrontendConfig {
                api_base_url: default_frontend_api_base_url(),
                ip_geolocation_url: default_ip_geolocation_url(),
            },
            logging: LoggingConfig {
                level: default_log_level(),
                format: default_log_format(),
                debug: false,
            },
            routes: RoutesConfig {
                crypto_fallback_on_failure: false,
                github_fallback_on_failure: false,
                weather_fallback_on_failure: true,
            },
            limits: LimitsConfig {
                top_movers: default_top_movers(),
                top_repos: default_top_repos(),
                crypto_per_page: default_page_size(),
                github_per_page: default_page_size(),
            },
            timezone_overrides: Vec::new(),
        }
    }
}

impl DashboardConfig {
    /// Load configuration from the process environment (and `.env` if present)
    pub fn from_env() -> crate::Result<Self> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> crate::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string());
        let mut config = Self::default();

        if let Some(port) = get("PORT") {
            config.server.port = parse_value("PORT", &port)?;
        }
        if let Some(dir) = get("STATIC_DIR") {
            config.server.static_dir = dir;
        }

        if let Some(url) = get("COINGECKO_BASE_URL") {
            config.upstream.coingecko_base_url = url;
        }
        if let Some(url) = get("GITHUB_API_BASE_URL") {
            config.upstream.github_base_url = url;
        }
        config.upstream.github_token = get("GITHUB_TOKEN").filter(|t| !t.is_empty());
        if let Some(since) = get("GITHUB_CREATED_SINCE") {
            config.upstream.github_created_since = since;
        }
        if let Some(url) = get("OPEN_METEO_BASE_URL") {
            config.upstream.forecast_base_url = url;
        }
        if let Some(url) = get("OPEN_METEO_GEOCODING_URL") {
            config.upstream.geocoding_base_url = url;
        }
        if let Some(timeout) = get("API_TIMEOUT") {
            config.upstream.timeout_ms = parse_value("API_TIMEOUT", &timeout)?;
        }

        if let Some(units) = get("WEATHER_DEFAULT_UNITS") {
            config.weather.units = units.to_lowercase();
        }
        if let Some(mode) = get("WEATHER_TIMEZONE") {
            config.weather.timezone_mode = mode;
        }

        if let Some(url) = get("FRONTEND_API_BASE_URL") {
            config.frontend.api_base_url = url;
        }
        if let Some(url) = get("IP_GEOLOCATION_URL") {
            config.frontend.ip_geolocation_url = url;
        }

        if let Some(level) = get("LOG_LEVEL") {
            config.logging.level = level.to_lowercase();
        }
        if let Some(format) = get("LOG_FORMAT") {
            config.logging.format = format.to_lowercase();
        }
        if let Some(debug) = get("DEBUG") {
            config.logging.debug = parse_flag("DEBUG", &debug)?;
        }

        if let Some(flag) = get("CRYPTO_FALLBACK_ON_FAILURE") {
            config.routes.crypto_fallback_on_failure =
                parse_flag("CRYPTO_FALLBACK_ON_FAILURE", &flag)?;
        }
        if let Some(flag) = get("GITHUB_FALLBACK_ON_FAILURE") {
            config.routes.github_fallback_on_failure =
                parse_flag("GITHUB_FALLBACK_ON_FAILURE", &flag)?;
        }
        if let Some(flag) = get("WEATHER_FALLBACK_ON_FAILURE") {
            config.routes.weather_fallback_on_failure =
                parse_flag("WEATHER_FALLBACK_ON_FAILURE", &flag)?;
        }

        if let Some(n) = get("TOP_MOVERS") {
            config.limits.top_movers = parse_value("TOP_MOVERS", &n)?;
        }
        if let Some(n) = get("TOP_REPOS") {
            config.limits.top_repos = parse_value("TOP_REPOS", &n)?;
        }

        if let Some(overrides) = get("TIMEZONE_OVERRIDES") {
            config.timezone_overrides = parse_overrides(&overrides)?;
        }

        config.apply_defaults();
        config.validate()?;
        Ok(config)
    }

    /// Apply default values to empty fields
    pub fn apply_defaults(&mut self) {
        if self.server.static_dir.is_empty() {
            self.server.static_dir = default_static_dir();
        }
        if self.upstream.coingecko_base_url.is_empty() {
            self.upstream.coingecko_base_url = default_coingecko_base_url();
        }
        if self.upstream.github_base_url.is_empty() {
            self.upstream.github_base_url = default_github_base_url();
        }
        if self.upstream.forecast_base_url.is_empty() {
            self.upstream.forecast_base_url = default_forecast_base_url();
        }
        if self.upstream.geocoding_base_url.is_empty() {
            self.upstream.geocoding_base_url = default_geocoding_base_url();
        }
        if self.upstream.timeout_ms == 0 {
            self.upstream.timeout_ms = default_timeout_ms();
        }
        if self.weather.units.is_empty() {
            self.weather.units = default_units();
        }
        if self.weather.timezone_mode.is_empty() {
            self.weather.timezone_mode = default_timezone_mode();
        }
        if self.logging.level.is_empty() {
            self.logging.level = default_log_level();
        }
        if self.logging.format.is_empty() {
            self.logging.format = default_log_format();
        }
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> crate::Result<()> {
        self.validate_urls()?;
        self.validate_numeric_ranges()?;
        self.validate_string_values()?;
        Ok(())
    }

    fn validate_urls(&self) -> crate::Result<()> {
        let urls = [
            ("CoinGecko base URL", &self.upstream.coingecko_base_url),
            ("GitHub API base URL", &self.upstream.github_base_url),
            ("Open-Meteo base URL", &self.upstream.forecast_base_url),
            ("Open-Meteo geocoding URL", &self.upstream.geocoding_base_url),
        ];
        for (name, url) in urls {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(DashboardError::config(format!(
                    "{name} must be a valid HTTP or HTTPS URL"
                )));
            }
        }
        Ok(())
    }

    fn validate_numeric_ranges(&self) -> crate::Result<()> {
        if self.upstream.timeout_ms > 300_000 {
            return Err(DashboardError::config(
                "API timeout cannot exceed 300000 ms",
            ));
        }

        if self.limits.top_movers == 0 || self.limits.top_repos == 0 {
            return Err(DashboardError::config("Result limits must be at least 1"));
        }

        if self.limits.crypto_per_page == 0 || self.limits.crypto_per_page > 250 {
            return Err(DashboardError::config(
                "CoinGecko page size must be between 1 and 250",
            ));
        }

        if self.limits.github_per_page == 0 || self.limits.github_per_page > 100 {
            return Err(DashboardError::config(
                "GitHub page size must be between 1 and 100",
            ));
        }

        Ok(())
    }

    fn validate_string_values(&self) -> crate::Result<()> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(DashboardError::config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            )));
        }

        let valid_log_formats = ["pretty", "json"];
        if !valid_log_formats.contains(&self.logging.format.as_str()) {
            return Err(DashboardError::config(format!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                valid_log_formats.join(", ")
            )));
        }

        let valid_units = ["metric", "imperial"];
        if !valid_units.contains(&self.weather.units.as_str()) {
            return Err(DashboardError::config(format!(
                "Invalid unit system '{}'. Must be one of: {}",
                self.weather.units,
                valid_units.join(", ")
            )));
        }

        Ok(())
    }

    /// Effective log level after the debug toggle
    #[must_use]
    pub fn effective_log_level(&self) -> &str {
        if self.logging.debug {
            "debug"
        } else {
            &self.logging.level
        }
    }

    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.upstream.timeout_ms)
    }
}

fn parse_value<T: std::str::FromStr>(key: &str, value: &str) -> crate::Result<T> {
    value
        .parse::<T>()
        .map_err(|_| DashboardError::config(format!("{key} has an invalid value '{value}'")))
}

fn parse_flag(key: &str, value: &str) -> crate::Result<bool> {
    match value.to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        _ => Err(DashboardError::config(format!(
            "{key} must be a boolean, got '{value}'"
        ))),
    }
}

/// Parse `country=Zone;country=Zone` pairs
fn parse_overrides(raw: &str) -> crate::Result<Vec<(String, String)>> {
    raw.split(';')
        .map(str::trim)
        .filter(|pair| !pair.is_empty())
        .map(|pair| -> crate::Result<(String, String)> {
            let (country, zone) = pair.split_once('=').ok_or_else(|| {
                DashboardError::config(format!("Timezone override '{pair}' must look like country=Zone"))
            })?;
            Ok((country.trim().to_lowercase(), zone.trim().to_string()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = DashboardConfig::default();
        assert_eq!(config.server.port, 5000);
        assert_eq!(config.upstream.forecast_base_url, "https://api.open-meteo.com/v1");
        assert_eq!(config.upstream.timeout_ms, 10_000);
        assert_eq!(config.weather.units, "metric");
        assert_eq!(config.weather.timezone_mode, "auto");
        assert!(!config.routes.crypto_fallback_on_failure);
        assert!(!config.routes.github_fallback_on_failure);
        assert!(config.routes.weather_fallback_on_failure);
        assert_eq!(config.limits.top_movers, 5);
        assert_eq!(config.limits.top_repos, 10);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_environment_yields_defaults() {
        let config = DashboardConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config.upstream.geocoding_base_url, "https://geocoding-api.open-meteo.com/v1");
        assert_eq!(config.request_timeout(), Duration::from_secs(10));
    }

    #[test]
    fn test_environment_overrides() {
        let config = DashboardConfig::from_lookup(lookup(&[
            ("PORT", "8080"),
            ("API_TIMEOUT", "2500"),
            ("WEATHER_DEFAULT_UNITS", "Imperial"),
            ("CRYPTO_FALLBACK_ON_FAILURE", "true"),
            ("WEATHER_FALLBACK_ON_FAILURE", "0"),
            ("TOP_MOVERS", "3"),
            ("GITHUB_TOKEN", "  "),
        ]))
        .unwrap();

        assert_eq!(config.server.port, 8080);
        assert_eq!(config.request_timeout(), Duration::from_millis(2500));
        assert_eq!(config.weather.units, "imperial");
        assert!(config.routes.crypto_fallback_on_failure);
        assert!(!config.routes.weather_fallback_on_failure);
        assert_eq!(config.limits.top_movers, 3);
        assert!(config.upstream.github_token.is_none());
    }

    #[test]
    fn test_debug_toggle_forces_debug_level() {
        let config = DashboardConfig::from_lookup(lookup(&[("DEBUG", "yes"), ("LOG_LEVEL", "warn")])).unwrap();
        assert_eq!(config.effective_log_level(), "debug");
    }

    #[test]
    fn test_invalid_port_is_rejected() {
        let result = DashboardConfig::from_lookup(lookup(&[("PORT", "not-a-port")]));
        assert!(result.unwrap_err().to_string().contains("PORT"));
    }

    #[test]
    fn test_config_validation_invalid_log_level() {
        let mut config = DashboardConfig::default();
        config.logging.level = "invalid".to_string();
        let result = config.validate();
        assert!(result.unwrap_err().to_string().contains("Invalid log level"));
    }

    #[test]
    fn test_config_validation_timeout_range() {
        let mut config = DashboardConfig::default();
        config.upstream.timeout_ms = 500_000;
        let result = config.validate();
        assert!(result.unwrap_err().to_string().contains("timeout cannot exceed"));
    }

    #[test]
    fn test_config_validation_rejects_non_http_url() {
        let mut config = DashboardConfig::default();
        config.upstream.geocoding_base_url = "ftp://example.com".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_timezone_overrides_parse() {
        let config = DashboardConfig::from_lookup(lookup(&[(
            "TIMEZONE_OVERRIDES",
            "South Korea=Asia/Seoul; Kenya = Africa/Nairobi",
        )]))
        .unwrap();
        assert_eq!(
            config.timezone_overrides,
            vec![
                ("south korea".to_string(), "Asia/Seoul".to_string()),
                ("kenya".to_string(), "Africa/Nairobi".to_string()),
            ]
        );
    }

    #[test]
    fn test_malformed_timezone_override() {
        let result = DashboardConfig::from_lookup(lookup(&[("TIMEZONE_OVERRIDES", "Kenya")]));
        assert!(result.is_err());
    }
}
