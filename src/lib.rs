//! Read access to git configuration through the `git config` command.
//!
//! ```no_run
//! match gitconfig::username() {
//!     Ok(name) => println!("hello {}", name),
//!     Err(gitconfig::ConfigError::NotFound) => println!("user.name is not set"),
//!     Err(e) => eprintln!("{}", e),
//! }
//! ```
//!
//! The free functions run `git` from `PATH` in the current directory with the
//! inherited environment. Use [`GitConfig`] to point at another directory or
//! configuration root.

pub mod config;
pub mod error;
pub mod identity;

pub use config::git::GitConfig;
#[cfg(feature = "mock")]
pub use config::mock::MockConfig;
pub use config::{Config, Scope};
pub use error::ConfigError;
pub use identity::{Identity, repo_name};

fn system_identity() -> Identity {
    Identity::new(Box::new(GitConfig::default()))
}

/// Reads `key` from the user-level config only.
pub fn global(key: &str) -> Result<String, ConfigError> {
    GitConfig::default().read(Scope::Global, key)
}

/// Reads `key` from the enclosing repository's config only.
pub fn local(key: &str) -> Result<String, ConfigError> {
    GitConfig::default().read(Scope::Local, key)
}

/// Reads `key` the way git resolves it, includes and all.
pub fn entire(key: &str) -> Result<String, ConfigError> {
    GitConfig::default().read(Scope::Entire, key)
}

/// Reads `user.name` from the global store.
pub fn username() -> Result<String, ConfigError> {
    system_identity().username()
}

/// Reads `user.email` from the global store.
pub fn email() -> Result<String, ConfigError> {
    system_identity().email()
}

/// Reads `github.token` from the global store.
pub fn github_token() -> Result<String, ConfigError> {
    system_identity().github_token()
}

/// Reads `remote.origin.url` from the enclosing repository's config.
pub fn origin_url() -> Result<String, ConfigError> {
    system_identity().origin_url()
}

/// Repository name derived from `remote.origin.url`, see [`repo_name`].
pub fn repository() -> Result<String, ConfigError> {
    system_identity().repository()
}
