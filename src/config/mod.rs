use crate::error::ConfigError;
use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

#[cfg(any(test, feature = "mock"))]
pub mod mock;

pub mod git;

#[cfg(test)]
mod tests;

// section[.subsection].name, see git-config(1) "Syntax"
static KEY_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9-]+(\.[^\n]*)?\.[A-Za-z][A-Za-z0-9-]*$")
        .expect("failed to create config key regex")
});

/// Which configuration store a lookup reads from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scope {
    /// The user-level store only.
    Global,
    /// The repository-level store only. Requires a repository.
    Local,
    /// Everything git would merge, includes resolved.
    Entire,
}

impl Scope {
    /// The `git config` flag restricting a read to this scope, if any.
    pub fn flag(&self) -> Option<&'static str> {
        match self {
            Self::Global => Some("--global"),
            Self::Local => Some("--local"),
            Self::Entire => None,
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Global => write!(f, "global"),
            Self::Local => write!(f, "local"),
            Self::Entire => write!(f, "entire"),
        }
    }
}

pub trait Config {
    /// Reads `key` at `scope`, returning the whitespace-trimmed value.
    fn read(&self, scope: Scope, key: &str) -> Result<String, ConfigError>;
}

pub fn validate_key(key: &str) -> Result<(), ConfigError> {
    match KEY_REGEX.is_match(key) {
        true => Ok(()),
        false => Err(ConfigError::Failure {
            action: "validating config key".to_string(),
            details: Some(format!("invalid key: {:?}", key)),
        }),
    }
}

#[test]
fn test_validate_key() {
    let valid_keys = vec![
        "user.name",
        "user.email",
        "github.token",
        "remote.origin.url",
        "nothing.return",
        "branch.feature/login.merge",
        "url.git@github.com:.insteadOf",
        "core.sshCommand",
        "my-section.my-name2",
        "a..b", // empty subsection
    ];
    for key in valid_keys {
        assert!(validate_key(key).is_ok(), "expected {:?} to be valid", key);
    }

    let invalid_keys = vec![
        "",            // Invalid (empty)
        "user",        // Invalid (no name)
        ".name",       // Invalid (empty section)
        "user.",       // Invalid (empty name)
        "user.1name",  // Invalid (name starts with a digit)
        "us er.name",  // Invalid (space in section)
        "user.na_me",  // Invalid (underscore in name)
        "a.b\nc.name", // Invalid (newline in subsection)
    ];
    for key in invalid_keys {
        let err = validate_key(key).expect_err("expected invalid key");
        assert!(!err.is_not_found());
    }
}

#[test]
fn test_scope_flag() {
    assert_eq!(Scope::Global.flag(), Some("--global"));
    assert_eq!(Scope::Local.flag(), Some("--local"));
    assert_eq!(Scope::Entire.flag(), None);
    assert_eq!(Scope::Entire.to_string(), "entire");
}
