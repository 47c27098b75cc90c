use gitconfig::Scope;
use std::error::Error;
use std::fmt;

pub const USAGE: &str = "usage: gitconfig (global|local|entire) <key>
       gitconfig (username|email|github-token|origin-url|repository)
       gitconfig repo-name <url>";

#[derive(Debug, Clone, PartialEq)]
pub enum ArgsError {
    ArgCount(String, usize, usize),
    UnknownCommand(String),
    Missing,
}

impl Error for ArgsError {}

impl std::fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ArgCount(command, count, expected) => write!(
                f,
                "unexpected number of arguments for {:?}: {} (expected: {})",
                command, count, expected
            ),
            Self::UnknownCommand(command) => write!(f, "unknown command: {:?}", command),
            Self::Missing => write!(f, "missing command"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Lookup {
    Key(Scope, String),
    Username,
    Email,
    GithubToken,
    OriginUrl,
    Repository,
    RepoName(String),
}

#[derive(Debug)]
pub struct Args {
    lookup: Lookup,
}

fn expect_operands(command: &str, operands: &[String], expected: usize) -> Result<(), ArgsError> {
    match operands.len() == expected {
        true => Ok(()),
        false => Err(ArgsError::ArgCount(
            command.to_string(),
            operands.len(),
            expected,
        )),
    }
}

impl Args {
    pub fn lookup(&self) -> &Lookup {
        &self.lookup
    }

    pub fn parse(args: &[String]) -> Result<Self, ArgsError> {
        let command = args.get(1).ok_or(ArgsError::Missing)?;
        let operands = &args[2..];

        let scope = match command.as_str() {
            "global" => Some(Scope::Global),
            "local" => Some(Scope::Local),
            "entire" => Some(Scope::Entire),
            _ => None,
        };
        if let Some(scope) = scope {
            expect_operands(command, operands, 1)?;
            return Ok(Self {
                lookup: Lookup::Key(scope, operands[0].clone()),
            });
        }

        if command == "repo-name" {
            expect_operands(command, operands, 1)?;
            return Ok(Self {
                lookup: Lookup::RepoName(operands[0].clone()),
            });
        }

        let lookup = match command.as_str() {
            "username" => Lookup::Username,
            "email" => Lookup::Email,
            "github-token" => Lookup::GithubToken,
            "origin-url" => Lookup::OriginUrl,
            "repository" => Lookup::Repository,
            _ => return Err(ArgsError::UnknownCommand(command.clone())),
        };
        expect_operands(command, operands, 0)?;
        Ok(Self { lookup })
    }
}

#[cfg(test)]
fn to_args(args: &[&str]) -> Vec<String> {
    args.iter().map(|arg| arg.to_string()).collect()
}

#[test]
fn test_parse_scoped() {
    let args = Args::parse(&to_args(&["gitconfig", "global", "user.name"])).unwrap();
    assert_eq!(
        args.lookup(),
        &Lookup::Key(Scope::Global, "user.name".to_string())
    );

    let args = Args::parse(&to_args(&["gitconfig", "local", "remote.origin.url"])).unwrap();
    assert_eq!(
        args.lookup(),
        &Lookup::Key(Scope::Local, "remote.origin.url".to_string())
    );

    let args = Args::parse(&to_args(&["gitconfig", "entire", "user.email"])).unwrap();
    assert_eq!(
        args.lookup(),
        &Lookup::Key(Scope::Entire, "user.email".to_string())
    );

    let err = Args::parse(&to_args(&["gitconfig", "global"])).expect_err("expected error");
    assert_eq!(err, ArgsError::ArgCount("global".to_string(), 0, 1));
}

#[test]
fn test_parse_named() {
    let cases = vec![
        ("username", Lookup::Username),
        ("email", Lookup::Email),
        ("github-token", Lookup::GithubToken),
        ("origin-url", Lookup::OriginUrl),
        ("repository", Lookup::Repository),
    ];
    for (command, expected) in cases {
        let args = Args::parse(&to_args(&["gitconfig", command])).unwrap();
        assert_eq!(args.lookup(), &expected);
    }

    let err = Args::parse(&to_args(&["gitconfig", "username", "extra"]))
        .expect_err("expected error");
    assert_eq!(err, ArgsError::ArgCount("username".to_string(), 1, 0));
}

#[test]
fn test_parse_repo_name() {
    let args = Args::parse(&to_args(&[
        "gitconfig",
        "repo-name",
        "https://github.com/tcnksm/ghr.git",
    ]))
    .unwrap();
    assert_eq!(
        args.lookup(),
        &Lookup::RepoName("https://github.com/tcnksm/ghr.git".to_string())
    );
}

#[test]
fn test_parse_invalid() {
    let err = Args::parse(&to_args(&["gitconfig"])).expect_err("expected error");
    assert_eq!(err, ArgsError::Missing);

    let err = Args::parse(&to_args(&["gitconfig", "system", "user.name"]))
        .expect_err("expected error");
    assert_eq!(err, ArgsError::UnknownCommand("system".to_string()));
}
