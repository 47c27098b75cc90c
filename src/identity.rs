#[cfg(test)]
use crate::config::mock::MockConfig;
use crate::config::{Config, Scope};
use crate::error::ConfigError;

pub const USER_NAME_KEY: &str = "user.name";
pub const USER_EMAIL_KEY: &str = "user.email";
pub const GITHUB_TOKEN_KEY: &str = "github.token";
pub const ORIGIN_URL_KEY: &str = "remote.origin.url";

const GIT_SUFFIX: &str = ".git";

/// Named lookups for who the user is and which repository they are in.
///
/// Errors from the underlying [`Config`] are returned unchanged, so
/// [`ConfigError::NotFound`] survives composition.
pub struct Identity {
    config: Box<dyn Config>,
}

impl Identity {
    pub fn new(config: Box<dyn Config>) -> Self {
        Self { config }
    }

    pub fn username(&self) -> Result<String, ConfigError> {
        self.config.read(Scope::Global, USER_NAME_KEY)
    }

    pub fn email(&self) -> Result<String, ConfigError> {
        self.config.read(Scope::Global, USER_EMAIL_KEY)
    }

    pub fn github_token(&self) -> Result<String, ConfigError> {
        self.config.read(Scope::Global, GITHUB_TOKEN_KEY)
    }

    pub fn origin_url(&self) -> Result<String, ConfigError> {
        self.config.read(Scope::Local, ORIGIN_URL_KEY)
    }

    /// Short name of the repository `origin` points at.
    pub fn repository(&self) -> Result<String, ConfigError> {
        let url = self.origin_url()?;
        Ok(repo_name(&url).to_string())
    }
}

/// Extracts the repository name from a remote URL.
///
/// Takes whatever follows the last `/` (or the last `:` when there is no `/`)
/// and drops a trailing `.git`. Never fails; odd input gives a best-effort
/// segment, possibly empty.
pub fn repo_name(url: &str) -> &str {
    let segment = match url.rsplit_once('/') {
        Some((_, segment)) => segment,
        None => url.rsplit_once(':').map_or(url, |(_, segment)| segment),
    };
    segment.strip_suffix(GIT_SUFFIX).unwrap_or(segment)
}

#[test]
fn test_repo_name() {
    assert_eq!(repo_name("https://github.com/tcnksm/ghr.git"), "ghr");
    assert_eq!(repo_name("https://github.com/tcnksm/ghr"), "ghr");
    assert_eq!(repo_name("git@github.com:taichi/gitconfig.git"), "gitconfig");

    // no slash, colon fallback
    assert_eq!(repo_name("git@github.com:gitconfig.git"), "gitconfig");
    // neither separator
    assert_eq!(repo_name("gitconfig.git"), "gitconfig");
    assert_eq!(repo_name("ssh://git@host:2222/owner/Repo.Name.git"), "Repo.Name");
    // only the final suffix goes, case preserved
    assert_eq!(repo_name("https://host/owner/repo.git.git"), "repo.git");
    assert_eq!(repo_name("https://host/owner/repo.GIT"), "repo.GIT");
    assert_eq!(repo_name("https://host/owner/repo/"), "");
    assert_eq!(repo_name(""), "");
}

#[test]
fn test_named_lookups() {
    let config = MockConfig::new()
        .with_value(Scope::Global, USER_NAME_KEY, "taichi")
        .with_value(Scope::Global, USER_EMAIL_KEY, "taichi@example.com")
        .with_value(
            Scope::Global,
            GITHUB_TOKEN_KEY,
            "16c999e8c71134401a78d4d46435517b2271d6ac",
        )
        .with_value(
            Scope::Local,
            ORIGIN_URL_KEY,
            "git@github.com:taichi/gitconfig.git",
        );
    let identity = Identity::new(Box::new(config));

    assert_eq!(identity.username(), Ok("taichi".to_string()));
    assert_eq!(identity.email(), Ok("taichi@example.com".to_string()));
    assert_eq!(
        identity.github_token(),
        Ok("16c999e8c71134401a78d4d46435517b2271d6ac".to_string())
    );
    assert_eq!(
        identity.origin_url(),
        Ok("git@github.com:taichi/gitconfig.git".to_string())
    );
    assert_eq!(identity.repository(), Ok("gitconfig".to_string()));
}

#[test]
fn test_lookup_scopes() {
    // user values set locally only are invisible to the global lookups
    let config = MockConfig::new()
        .with_value(Scope::Local, USER_NAME_KEY, "taichi")
        .with_value(Scope::Local, GITHUB_TOKEN_KEY, "local-token")
        .with_value(
            Scope::Global,
            ORIGIN_URL_KEY,
            "https://github.com/tcnksm/ghr.git",
        );
    let identity = Identity::new(Box::new(config));

    assert_eq!(identity.username(), Err(ConfigError::NotFound));
    assert_eq!(identity.email(), Err(ConfigError::NotFound));
    assert_eq!(identity.github_token(), Err(ConfigError::NotFound));
    assert_eq!(identity.origin_url(), Err(ConfigError::NotFound));
}

#[test]
fn test_repository_propagates_errors() {
    let identity = Identity::new(Box::new(MockConfig::new()));
    assert_eq!(identity.repository(), Err(ConfigError::NotFound));

    let failure = ConfigError::Failure {
        action: "reading local remote.origin.url".to_string(),
        details: Some("fatal: --local can only be used inside a git repository".to_string()),
    };
    let identity = Identity::new(Box::new(MockConfig::failing(failure.clone())));
    assert_eq!(identity.repository(), Err(failure));
}

#[test]
fn test_repository_matches_repo_name() {
    let urls = [
        "https://github.com/tcnksm/ghr.git",
        "https://github.com/tcnksm/ghr",
        "git@github.com:taichi/gitconfig.git",
        "ssh://git@example.com/group/sub/project.git",
    ];
    for url in urls {
        let config = MockConfig::new().with_value(Scope::Local, ORIGIN_URL_KEY, url);
        let identity = Identity::new(Box::new(config));
        assert_eq!(identity.repository(), Ok(repo_name(url).to_string()));
    }
}
