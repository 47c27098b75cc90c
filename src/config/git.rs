use super::{Config, Scope, validate_key};
use crate::error::ConfigError;
use log::{debug, trace};
use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};
use std::process::Command;

const GIT_PROGRAM: &str = "git";

// git-config(1): "The section or key was not found (ret=1)"
const NOT_FOUND_STATUS: i32 = 1;

/// Reads configuration by running `git config` as a child process.
///
/// Nothing here touches the calling process's environment. Overrides set with
/// [`GitConfig::with_home`], [`GitConfig::without_system_config`] and
/// [`GitConfig::env`] apply to the child only.
#[derive(Debug, Clone)]
pub struct GitConfig {
    program: PathBuf,
    dir: PathBuf,
    envs: Vec<(OsString, Option<OsString>)>,
}

impl Default for GitConfig {
    fn default() -> Self {
        Self::new(PathBuf::from("."))
    }
}

impl GitConfig {
    /// `dir` is where git starts looking for the enclosing repository.
    pub fn new(dir: PathBuf) -> Self {
        Self {
            program: PathBuf::from(GIT_PROGRAM),
            dir,
            envs: Vec::new(),
        }
    }

    pub fn with_program(mut self, program: impl Into<PathBuf>) -> Self {
        self.program = program.into();
        self
    }

    /// Makes `<home>/.gitconfig` the only global store.
    pub fn with_home(self, home: impl AsRef<Path>) -> Self {
        let home = home.as_ref().as_os_str().to_owned();
        self.env("HOME", &home)
            .env("XDG_CONFIG_HOME", &home)
            .env_remove("GIT_CONFIG_GLOBAL")
    }

    pub fn without_system_config(self) -> Self {
        self.env("GIT_CONFIG_NOSYSTEM", "1")
            .env_remove("GIT_CONFIG_SYSTEM")
    }

    pub fn env(mut self, key: impl AsRef<OsStr>, value: impl AsRef<OsStr>) -> Self {
        self.envs.push((
            key.as_ref().to_owned(),
            Some(value.as_ref().to_owned()),
        ));
        self
    }

    pub fn env_remove(mut self, key: impl AsRef<OsStr>) -> Self {
        self.envs.push((key.as_ref().to_owned(), None));
        self
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn command(&self, scope: Scope, key: &str) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.arg("config");
        if let Some(flag) = scope.flag() {
            cmd.arg(flag);
        }
        cmd.args(["--null", "--get", key]).current_dir(&self.dir);

        for (name, value) in &self.envs {
            match value {
                Some(value) => cmd.env(name, value),
                None => cmd.env_remove(name),
            };
        }
        cmd
    }
}

impl Config for GitConfig {
    fn read(&self, scope: Scope, key: &str) -> Result<String, ConfigError> {
        validate_key(key)?;

        let mut cmd = self.command(scope, key);
        debug!("running {:?}", cmd);
        let output = cmd.output().map_err(|e| ConfigError::Failure {
            action: format!("running {}", self.program.display()),
            details: Some(e.to_string()),
        })?;
        debug!("{} config exited with {}", self.program.display(), output.status);

        match output.status.code() {
            Some(0) => {}
            Some(NOT_FOUND_STATUS) => {
                trace!("{} {} not found", scope, key);
                return Err(ConfigError::NotFound);
            }
            _ => {
                let stderr = String::from_utf8_lossy(&output.stderr);
                let details = match stderr.trim() {
                    "" => output.status.to_string(),
                    stderr => stderr.to_string(),
                };
                return Err(ConfigError::Failure {
                    action: format!("reading {} {}", scope, key),
                    details: Some(details),
                });
            }
        }

        let value = String::from_utf8(output.stdout).map_err(|e| ConfigError::Failure {
            action: format!("reading stdout of {} config", self.program.display()),
            details: Some(e.to_string()),
        })?;
        let trimmed = value.trim_end_matches('\0').trim();
        trace!("{} {} found", scope, key);
        Ok(trimmed.to_string())
    }
}

#[test]
fn test_command_args() {
    let config = GitConfig::new(PathBuf::from("/some-dir"));

    let args = |scope| {
        config
            .command(scope, "user.name")
            .get_args()
            .map(|arg| arg.to_string_lossy().into_owned())
            .collect::<Vec<String>>()
    };
    assert_eq!(
        args(Scope::Global),
        vec!["config", "--global", "--null", "--get", "user.name"]
    );
    assert_eq!(
        args(Scope::Local),
        vec!["config", "--local", "--null", "--get", "user.name"]
    );
    assert_eq!(
        args(Scope::Entire),
        vec!["config", "--null", "--get", "user.name"]
    );

    let cmd = config.command(Scope::Global, "user.name");
    assert_eq!(cmd.get_program(), OsStr::new(GIT_PROGRAM));
    assert_eq!(cmd.get_current_dir(), Some(Path::new("/some-dir")));
}

#[test]
fn test_command_envs() {
    let cmd = GitConfig::default()
        .with_home("/home/someone")
        .without_system_config()
        .command(Scope::Global, "user.name");
    let envs = cmd
        .get_envs()
        .map(|(k, v)| {
            (
                k.to_string_lossy().into_owned(),
                v.map(|v| v.to_string_lossy().into_owned()),
            )
        })
        .collect::<Vec<_>>();

    assert!(envs.contains(&("HOME".to_string(), Some("/home/someone".to_string()))));
    assert!(envs.contains(&(
        "XDG_CONFIG_HOME".to_string(),
        Some("/home/someone".to_string())
    )));
    assert!(envs.contains(&("GIT_CONFIG_GLOBAL".to_string(), None)));
    assert!(envs.contains(&("GIT_CONFIG_NOSYSTEM".to_string(), Some("1".to_string()))));
    assert!(envs.contains(&("GIT_CONFIG_SYSTEM".to_string(), None)));
}
