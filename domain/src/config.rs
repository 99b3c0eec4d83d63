use anyhow::{Context, Result};
use log::{info, warn};
use std::fmt::Display;
use std::str::FromStr;

/// Paths of the backend endpoints, relative to `api_base_url`
#[derive(Debug, Clone, PartialEq)]
pub struct Endpoints {
    pub login: String,
    pub logout: String,
    pub person: String,
    pub availability_week: String,
    pub availability: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            login: "/login".to_string(),
            logout: "/logout".to_string(),
            person: "/person".to_string(),
            availability_week: "/availabilityTable".to_string(),
            availability: "/availability".to_string(),
        }
    }
}

/// Settings for the availability board and its API client
#[derive(Debug, Clone, PartialEq)]
pub struct BoardConfig {
    /// Prefix for every endpoint; empty means same origin
    pub api_base_url: String,
    /// Where logged-out viewers are sent
    pub home_url: String,
    /// Last page the server serves; pages run 0..=max_weeks_ahead
    pub max_weeks_ahead: u32,
    /// Skip the PUT on navigation when nothing changed on the page
    pub skip_unchanged_flush: bool,
    pub endpoints: Endpoints,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            api_base_url: String::new(),
            home_url: "/".to_string(),
            max_weeks_ahead: 3,
            skip_unchanged_flush: false,
            endpoints: Endpoints::default(),
        }
    }
}

impl BoardConfig {
    pub const BASE_URL_KEY: &'static str = "SCHEDULER_API_BASE_URL";
    pub const HOME_URL_KEY: &'static str = "SCHEDULER_HOME_URL";
    pub const MAX_WEEKS_AHEAD_KEY: &'static str = "SCHEDULER_MAX_WEEKS_AHEAD";
    pub const SKIP_UNCHANGED_FLUSH_KEY: &'static str = "SCHEDULER_SKIP_UNCHANGED_FLUSH";

    pub fn with_api_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.api_base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_max_weeks_ahead(mut self, max_weeks_ahead: u32) -> Self {
        self.max_weeks_ahead = max_weeks_ahead;
        self
    }

    pub fn with_skip_unchanged_flush(mut self, skip: bool) -> Self {
        self.skip_unchanged_flush = skip;
        self
    }

    /// Loads settings from env-style keys. Unset keys keep their default,
    /// keys that fail to parse are an error.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let config = Self {
            api_base_url: try_load(&lookup, Self::BASE_URL_KEY, defaults.api_base_url)?,
            home_url: try_load(&lookup, Self::HOME_URL_KEY, defaults.home_url)?,
            max_weeks_ahead: try_load(&lookup, Self::MAX_WEEKS_AHEAD_KEY, defaults.max_weeks_ahead)?,
            skip_unchanged_flush: try_load(
                &lookup,
                Self::SKIP_UNCHANGED_FLUSH_KEY,
                defaults.skip_unchanged_flush,
            )?,
            endpoints: defaults.endpoints,
        };
        let base_url = config.api_base_url.clone();
        Ok(config.with_api_base_url(base_url))
    }

    /// Settings baked in at compile time, for the wasm build where there is
    /// no process environment.
    pub fn from_build_env() -> Result<Self> {
        Self::from_lookup(|key| {
            let value = match key {
                Self::BASE_URL_KEY => option_env!("SCHEDULER_API_BASE_URL"),
                Self::HOME_URL_KEY => option_env!("SCHEDULER_HOME_URL"),
                Self::MAX_WEEKS_AHEAD_KEY => option_env!("SCHEDULER_MAX_WEEKS_AHEAD"),
                Self::SKIP_UNCHANGED_FLUSH_KEY => option_env!("SCHEDULER_SKIP_UNCHANGED_FLUSH"),
                _ => None,
            };
            value.map(str::to_string)
        })
    }

    /// Absolute URL of an endpoint path
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.api_base_url, path)
    }
}

fn try_load<F, T>(lookup: &F, key: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr + Display,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e| {
                warn!("⚙️ CONFIG: Invalid {key} value {raw:?}");
                e
            })
            .with_context(|| format!("Invalid value for {key}")),
        None => {
            info!("⚙️ CONFIG: {key} not set, using default: {default}");
            Ok(default)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = BoardConfig::default();
        assert_eq!(config.max_weeks_ahead, 3);
        assert!(!config.skip_unchanged_flush);
        assert_eq!(config.home_url, "/");
        assert_eq!(config.url(&config.endpoints.availability), "/availability");
    }

    #[test]
    fn test_from_lookup_overrides() {
        let config = BoardConfig::from_lookup(lookup(&[
            (BoardConfig::BASE_URL_KEY, "http://localhost:8080/"),
            (BoardConfig::MAX_WEEKS_AHEAD_KEY, "5"),
            (BoardConfig::SKIP_UNCHANGED_FLUSH_KEY, "true"),
        ]))
        .unwrap();

        assert_eq!(config.api_base_url, "http://localhost:8080");
        assert_eq!(config.max_weeks_ahead, 5);
        assert!(config.skip_unchanged_flush);
        assert_eq!(config.home_url, "/");
        assert_eq!(config.url("/login"), "http://localhost:8080/login");
    }

    #[test]
    fn test_from_lookup_empty_is_default() {
        let config = BoardConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config, BoardConfig::default());
    }

    #[test]
    fn test_from_lookup_rejects_bad_values() {
        let err = BoardConfig::from_lookup(lookup(&[(BoardConfig::MAX_WEEKS_AHEAD_KEY, "three")]))
            .unwrap_err();
        assert!(err.to_string().contains(BoardConfig::MAX_WEEKS_AHEAD_KEY));

        assert!(BoardConfig::from_lookup(lookup(&[(BoardConfig::SKIP_UNCHANGED_FLUSH_KEY, "yes")])).is_err());
    }
}
