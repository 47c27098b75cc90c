use super::{Config, Scope};
use crate::error::ConfigError;
use std::collections::HashMap;

/// In-memory [`Config`]. `Entire` reads fall back from local to global values
/// the way git's merge does.
pub struct MockConfig {
    values: HashMap<(Scope, String), String>,
    failure: Option<ConfigError>,
}

impl MockConfig {
    pub fn new() -> Self {
        Self {
            values: HashMap::new(),
            failure: None,
        }
    }

    /// Every read fails with `err`.
    pub fn failing(err: ConfigError) -> Self {
        Self {
            values: HashMap::new(),
            failure: Some(err),
        }
    }

    pub fn with_value(mut self, scope: Scope, key: &str, value: &str) -> Self {
        self.values
            .insert((scope, key.to_string()), value.to_string());
        self
    }

    fn get(&self, scope: Scope, key: &str) -> Option<&String> {
        self.values.get(&(scope, key.to_string()))
    }
}

impl Config for MockConfig {
    fn read(&self, scope: Scope, key: &str) -> Result<String, ConfigError> {
        if let Some(err) = &self.failure {
            return Err(err.clone());
        }

        let value = match scope {
            Scope::Global | Scope::Local => self.get(scope, key),
            Scope::Entire => self
                .get(Scope::Entire, key)
                .or_else(|| self.get(Scope::Local, key))
                .or_else(|| self.get(Scope::Global, key)),
        };
        value
            .map(|value| value.trim().to_string())
            .ok_or(ConfigError::NotFound)
    }
}

#[test]
fn test_mock_config() {
    let config = MockConfig::new()
        .with_value(Scope::Global, "user.name", "deeeet")
        .with_value(Scope::Local, "user.name", "taichi")
        .with_value(Scope::Global, "user.email", " deeeet@example.com\n");

    assert_eq!(config.read(Scope::Global, "user.name"), Ok("deeeet".to_string()));
    assert_eq!(config.read(Scope::Local, "user.name"), Ok("taichi".to_string()));
    assert_eq!(config.read(Scope::Entire, "user.name"), Ok("taichi".to_string()));
    assert_eq!(
        config.read(Scope::Entire, "user.email"),
        Ok("deeeet@example.com".to_string())
    );
    assert_eq!(
        config.read(Scope::Local, "user.email"),
        Err(ConfigError::NotFound)
    );
}
