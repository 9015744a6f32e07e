use crate::error::ConfigError;

/// Server configuration, read from the environment.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// When unset the groups live in memory only
    pub mongodb_uri: Option<String>,
    pub database: String,
    /// Seed the in-memory store with the demo groups
    pub seed_demo: bool,
    pub allowed_origin: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            mongodb_uri: None,
            database: "OpenSplit".to_string(),
            seed_demo: false,
            allowed_origin: None,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Builds the config from any variable source, falling back to the
    /// defaults for unset or empty variables.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());
        let mut config = Self::default();

        if let Some(host) = var("OPENSPLIT_HOST") {
            config.host = host;
        }
        if let Some(port) = var("OPENSPLIT_PORT") {
            config.port = port
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidValue {
                    var: "OPENSPLIT_PORT",
                    value: port.clone(),
                })?;
        }
        config.mongodb_uri = var("MONGODB_URI");
        if let Some(database) = var("OPENSPLIT_DATABASE") {
            config.database = database;
        }
        if let Some(seed) = var("OPENSPLIT_SEED_DEMO") {
            config.seed_demo = parse_bool(&seed).ok_or(ConfigError::InvalidValue {
                var: "OPENSPLIT_SEED_DEMO",
                value: seed.clone(),
            })?;
        }
        config.allowed_origin = var("OPENSPLIT_ALLOWED_ORIGIN");

        Ok(config)
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        assert_eq!(config_from(&[]).unwrap(), Config::default());
    }

    #[test]
    fn reads_every_variable() {
        let config = config_from(&[
            ("OPENSPLIT_HOST", "127.0.0.1"),
            ("OPENSPLIT_PORT", "9000"),
            ("MONGODB_URI", "mongodb://localhost:27017"),
            ("OPENSPLIT_DATABASE", "Splits"),
            ("OPENSPLIT_SEED_DEMO", "yes"),
            ("OPENSPLIT_ALLOWED_ORIGIN", "http://localhost:5173"),
        ])
        .unwrap();

        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 9000);
        assert_eq!(
            config.mongodb_uri.as_deref(),
            Some("mongodb://localhost:27017")
        );
        assert_eq!(config.database, "Splits");
        assert!(config.seed_demo);
        assert_eq!(
            config.allowed_origin.as_deref(),
            Some("http://localhost:5173")
        );
    }

    #[test]
    fn empty_values_fall_back_to_defaults() {
        let config = config_from(&[("MONGODB_URI", ""), ("OPENSPLIT_PORT", " ")]).unwrap();
        assert_eq!(config.mongodb_uri, None);
        assert_eq!(config.port, 8080);
    }

    #[test]
    fn rejects_garbage() {
        assert_eq!(
            config_from(&[("OPENSPLIT_PORT", "eighty")]),
            Err(ConfigError::InvalidValue {
                var: "OPENSPLIT_PORT",
                value: "eighty".to_string()
            })
        );
        assert!(config_from(&[("OPENSPLIT_SEED_DEMO", "maybe")]).is_err());
    }
}
