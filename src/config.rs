use std::time::Duration;

use crate::error::ConfigError;

const DEFAULT_POLL_INTERVAL_SECS: u64 = 30;

/// Client configuration read from the environment.
#[derive(Debug, Clone)]
pub struct Config {
    /// Origin of the herdbook API, without trailing slash
    pub api_url: String,
    /// Whether requests carry a bearer token
    pub auth_enabled: bool,
    /// Bearer token, present whenever `auth_enabled` is set
    pub api_token: Option<String>,
    /// Farm the client acts for.
    ///
    /// Development placeholder until tenant resolution exists: the farm is picked from the
    /// environment rather than from the authenticated user.
    pub farm_id: Option<String>,
    /// Interval between alert counter polls
    pub poll_interval: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Builds the configuration from an arbitrary variable lookup.
    ///
    /// # Arguments
    /// - `lookup` - Returns the value of a variable, or `None` when unset
    ///
    /// # Returns
    /// - `Ok(Config)` - All required variables present and valid
    /// - `Err(ConfigError::MissingEnvVar)` - `HERDBOOK_API_URL` unset, or auth enabled without a token
    /// - `Err(ConfigError::InvalidEnvValue)` - A boolean or numeric variable failed to parse
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |var: &str| lookup(var).filter(|value| !value.trim().is_empty());

        let api_url = get("HERDBOOK_API_URL")
            .ok_or_else(|| ConfigError::MissingEnvVar("HERDBOOK_API_URL".to_string()))?
            .trim()
            .trim_end_matches('/')
            .to_string();

        let auth_enabled = match get("HERDBOOK_AUTH_ENABLED") {
            None => false,
            Some(value) => parse_bool("HERDBOOK_AUTH_ENABLED", &value)?,
        };

        let api_token = get("HERDBOOK_API_TOKEN");
        if auth_enabled && api_token.is_none() {
            return Err(ConfigError::MissingEnvVar("HERDBOOK_API_TOKEN".to_string()));
        }

        let poll_interval_secs = match get("HERDBOOK_POLL_INTERVAL_SECS") {
            None => DEFAULT_POLL_INTERVAL_SECS,
            Some(value) => match value.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => secs,
                Ok(_) => {
                    return Err(ConfigError::InvalidEnvValue {
                        var: "HERDBOOK_POLL_INTERVAL_SECS".to_string(),
                        reason: "must be greater than zero".to_string(),
                    })
                }
                Err(e) => {
                    return Err(ConfigError::InvalidEnvValue {
                        var: "HERDBOOK_POLL_INTERVAL_SECS".to_string(),
                        reason: e.to_string(),
                    })
                }
            },
        };

        Ok(Self {
            api_url,
            auth_enabled,
            api_token: if auth_enabled { api_token } else { None },
            farm_id: get("HERDBOOK_FARM_ID").map(|id| id.trim().to_string()),
            poll_interval: Duration::from_secs(poll_interval_secs),
        })
    }
}

fn parse_bool(var: &str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(ConfigError::InvalidEnvValue {
            var: var.to_string(),
            reason: format!("expected a boolean, got {:?}", other),
        }),
    }
}
