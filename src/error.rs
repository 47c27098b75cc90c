use std::error::Error;

#[derive(Debug, PartialEq, Eq, Clone)]
pub enum ConfigError {
    /// The key has no value at the requested scope.
    NotFound,
    Failure {
        action: String,
        details: Option<String>,
    },
}

impl ConfigError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound)
    }
}

impl Error for ConfigError {}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound => write!(f, "config value not found"),
            Self::Failure { action, details } => write!(
                f,
                "{} failed: {}",
                action,
                details.as_deref().unwrap_or("details not provided")
            ),
        }
    }
}

#[test]
fn test_display() {
    assert_eq!(ConfigError::NotFound.to_string(), "config value not found");

    let err = ConfigError::Failure {
        action: "reading local remote.origin.url".to_string(),
        details: Some("fatal: not in a git directory".to_string()),
    };
    assert_eq!(
        err.to_string(),
        "reading local remote.origin.url failed: fatal: not in a git directory"
    );

    let err = ConfigError::Failure {
        action: "running git".to_string(),
        details: None,
    };
    assert_eq!(err.to_string(), "running git failed: details not provided");
}

#[test]
fn test_is_not_found() {
    assert!(ConfigError::NotFound.is_not_found());
    assert_eq!(ConfigError::NotFound, ConfigError::NotFound);

    let err = ConfigError::Failure {
        action: "running git".to_string(),
        details: Some("config value not found".to_string()),
    };
    assert!(!err.is_not_found());
}
