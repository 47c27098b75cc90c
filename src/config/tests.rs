use crate::config::{Config, Scope, git::GitConfig};
use crate::error::ConfigError;
use std::path::Path;
use tempfile::TempDir;

// A throwaway home directory plus a repository, both outside any user config.
struct Sandbox {
    home: TempDir,
    repo: TempDir,
}

impl Sandbox {
    fn new() -> Self {
        let home = tempfile::tempdir().expect("failed to create temp home");
        let repo = tempfile::tempdir().expect("failed to create temp repo dir");
        git2::Repository::init(repo.path()).expect("failed to init repo");
        Self { home, repo }
    }

    fn isolated(&self, dir: &Path) -> GitConfig {
        GitConfig::new(dir.to_path_buf())
            .with_home(self.home.path())
            .without_system_config()
    }

    fn config(&self) -> GitConfig {
        self.isolated(self.repo.path())
    }

    // Runs with the home directory as cwd, which is not a repository.
    fn config_outside_repo(&self) -> GitConfig {
        let ceiling = self
            .home
            .path()
            .parent()
            .expect("temp home has no parent")
            .to_path_buf();
        self.isolated(self.home.path())
            .env("GIT_CEILING_DIRECTORIES", ceiling)
            .env_remove("GIT_DIR")
    }

    fn write_home_file(&self, name: &str, content: &str) {
        std::fs::write(self.home.path().join(name), content)
            .expect("failed to write config file");
    }

    fn write_global(&self, content: &str) {
        self.write_home_file(".gitconfig", content);
    }

    fn set_local(&self, key: &str, value: &str) {
        let path = self.repo.path().join(".git").join("config");
        let mut config = git2::Config::open(&path).expect("failed to open local config");
        config
            .set_str(key, value)
            .expect("failed to write local config");
    }
}

#[test]
fn test_global() {
    let sandbox = Sandbox::new();
    sandbox.write_global(
        r#"
[user]
    name  = deeeet
    email = deeeet@example.com
"#,
    );
    let config = sandbox.config();

    let username = config.read(Scope::Global, "user.name").expect("failed to read");
    assert_eq!(username, "deeeet");

    let email = config.read(Scope::Global, "user.email").expect("failed to read");
    assert_eq!(email, "deeeet@example.com");

    let err = config
        .read(Scope::Local, "nothing.return")
        .expect_err("expected not found");
    assert_eq!(err, ConfigError::NotFound);

    let err = config
        .read(Scope::Global, "nothing.return")
        .expect_err("expected not found");
    assert_eq!(err, ConfigError::NotFound);
}

#[test]
fn test_global_trims_whitespace() {
    let sandbox = Sandbox::new();
    sandbox.write_global(
        r#"
[user]
    name = "  deeeet  "
"#,
    );

    let username = sandbox
        .config()
        .read(Scope::Global, "user.name")
        .expect("failed to read");
    assert_eq!(username, "deeeet");
}

#[test]
fn test_local() {
    let sandbox = Sandbox::new();
    sandbox.set_local(
        "remote.origin.url",
        "git@github.com:tcnksm/go-test-gitconfig.git",
    );
    let config = sandbox.config();

    let url = config
        .read(Scope::Local, "remote.origin.url")
        .expect("failed to read");
    assert_eq!(url, "git@github.com:tcnksm/go-test-gitconfig.git");

    let err = config
        .read(Scope::Local, "nothing.return")
        .expect_err("expected not found");
    assert_eq!(err, ConfigError::NotFound);
}

#[test]
fn test_scope_isolation() {
    let sandbox = Sandbox::new();
    sandbox.write_global(
        r#"
[user]
    name = deeeet
"#,
    );
    sandbox.set_local("user.email", "local@example.com");
    let config = sandbox.config();

    assert_eq!(
        config.read(Scope::Local, "user.email"),
        Ok("local@example.com".to_string())
    );
    assert_eq!(
        config.read(Scope::Global, "user.email"),
        Err(ConfigError::NotFound)
    );
    assert_eq!(
        config.read(Scope::Local, "user.name"),
        Err(ConfigError::NotFound)
    );
    assert_eq!(
        config.read(Scope::Entire, "user.email"),
        Ok("local@example.com".to_string())
    );
    assert_eq!(
        config.read(Scope::Entire, "user.name"),
        Ok("deeeet".to_string())
    );
}

#[test]
fn test_entire_local_overrides_global() {
    let sandbox = Sandbox::new();
    sandbox.write_global(
        r#"
[user]
    name = deeeet
"#,
    );
    sandbox.set_local("user.name", "taichi");

    let username = sandbox
        .config()
        .read(Scope::Entire, "user.name")
        .expect("failed to read");
    assert_eq!(username, "taichi");
}

#[test]
fn test_entire_global_include() {
    let sandbox = Sandbox::new();
    sandbox.write_global(
        r#"
[include]
    path = ~/.gitconfig.local
"#,
    );
    sandbox.write_home_file(
        ".gitconfig.local",
        r#"
[user]
    name  = deeeet
    email = deeeet@example.com
"#,
    );
    let config = sandbox.config();

    let username = config.read(Scope::Entire, "user.name").expect("failed to read");
    assert_eq!(username, "deeeet");

    let email = config.read(Scope::Entire, "user.email").expect("failed to read");
    assert_eq!(email, "deeeet@example.com");

    // scoped reads don't follow includes
    assert_eq!(
        config.read(Scope::Global, "user.name"),
        Err(ConfigError::NotFound)
    );

    let err = config
        .read(Scope::Local, "nothing.return")
        .expect_err("expected not found");
    assert_eq!(err, ConfigError::NotFound);
}

#[test]
fn test_entire_local_include() {
    let sandbox = Sandbox::new();
    sandbox.write_home_file(
        "included.gitconfig",
        r#"
[github]
    token = 16c999e8c71134401a78d4d46435517b2271d6ac
"#,
    );
    let include_path = sandbox.home.path().join("included.gitconfig");
    sandbox.set_local(
        "include.path",
        include_path.to_str().expect("non-utf8 temp path"),
    );

    let token = sandbox
        .config()
        .read(Scope::Entire, "github.token")
        .expect("failed to read");
    assert_eq!(token, "16c999e8c71134401a78d4d46435517b2271d6ac");
}

#[test]
fn test_outside_repo() {
    let sandbox = Sandbox::new();
    sandbox.write_global(
        r#"
[user]
    name = deeeet
"#,
    );
    let config = sandbox.config_outside_repo();

    let err = config
        .read(Scope::Local, "user.name")
        .expect_err("expected failure outside a repository");
    assert!(!err.is_not_found(), "expected failure, got {:?}", err);

    assert_eq!(
        config.read(Scope::Global, "user.name"),
        Ok("deeeet".to_string())
    );
    assert_eq!(
        config.read(Scope::Entire, "user.name"),
        Ok("deeeet".to_string())
    );
    assert_eq!(
        config.read(Scope::Entire, "nothing.return"),
        Err(ConfigError::NotFound)
    );
}

#[test]
fn test_invalid_key() {
    let sandbox = Sandbox::new();
    let config = sandbox.config();

    for key in ["", "user", "user.1name"] {
        let err = config
            .read(Scope::Global, key)
            .expect_err("expected invalid key to fail");
        assert!(
            matches!(err, ConfigError::Failure { .. }),
            "expected failure for {:?}, got {:?}",
            key,
            err
        );
    }
}

#[test]
fn test_missing_program() {
    let sandbox = Sandbox::new();
    let config = sandbox
        .config()
        .with_program(sandbox.home.path().join("no-such-git"));

    match config.read(Scope::Global, "user.name") {
        Err(ConfigError::Failure { action, details }) => {
            assert!(action.starts_with("running "), "unexpected action {:?}", action);
            assert!(details.is_some());
        }
        other => panic!("expected failure, got {:?}", other),
    }
}

#[test]
fn test_identity_from_git() {
    use crate::identity::{Identity, repo_name};

    let sandbox = Sandbox::new();
    sandbox.write_global(
        r#"
[user]
    name  = taichi
    email = taichi@example.com
[github]
    token  = 16c999e8c71134401a78d4d46435517b2271d6ac
"#,
    );
    let url = "git@github.com:taichi/gitconfig.git";
    sandbox.set_local("remote.origin.url", url);
    let identity = Identity::new(Box::new(sandbox.config()));

    assert_eq!(identity.username(), Ok("taichi".to_string()));
    assert_eq!(identity.email(), Ok("taichi@example.com".to_string()));
    assert_eq!(
        identity.github_token(),
        Ok("16c999e8c71134401a78d4d46435517b2271d6ac".to_string())
    );
    assert_eq!(identity.origin_url(), Ok(url.to_string()));
    assert_eq!(identity.repository(), Ok("gitconfig".to_string()));
    assert_eq!(identity.repository(), Ok(repo_name(url).to_string()));

    let identity = Identity::new(Box::new(sandbox.config_outside_repo()));
    let err = identity.repository().expect_err("expected failure outside a repository");
    assert!(!err.is_not_found());
}

#[test]
fn test_empty_value_is_not_missing() {
    let sandbox = Sandbox::new();
    sandbox.write_global(
        r#"
[user]
    name =
"#,
    );
    let config = sandbox.config();

    assert_eq!(config.read(Scope::Global, "user.name"), Ok(String::new()));
    assert_eq!(
        config.read(Scope::Global, "user.email"),
        Err(ConfigError::NotFound)
    );
}

#[test]
fn test_empty_subsection() {
    let sandbox = Sandbox::new();
    sandbox.write_global(
        r#"
[a ""]
    b = x
"#,
    );

    assert_eq!(
        sandbox.config().read(Scope::Global, "a..b"),
        Ok("x".to_string())
    );
}
