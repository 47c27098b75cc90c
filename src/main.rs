mod args;

use args::{Args, Lookup, USAGE};
use flexi_logger::{Logger, WriteMode};
use gitconfig::{Config, ConfigError, GitConfig, Identity, repo_name};
use log::debug;
use std::error::Error;

const NOT_FOUND_EXIT_CODE: i32 = 1;
const FAILURE_EXIT_CODE: i32 = 2;

fn exit_with_error(msg: &str, e: Box<dyn Error>) -> ! {
    debug!("{}: {}", msg, e);
    eprintln!("gitconfig: {}", e);
    std::process::exit(FAILURE_EXIT_CODE);
}

fn run(lookup: &Lookup) -> Result<String, ConfigError> {
    let config = GitConfig::default();
    debug!("reading config from {}", config.dir().display());

    match lookup {
        Lookup::Key(scope, key) => config.read(*scope, key),
        Lookup::RepoName(url) => Ok(repo_name(url).to_string()),
        Lookup::Username => Identity::new(Box::new(config)).username(),
        Lookup::Email => Identity::new(Box::new(config)).email(),
        Lookup::GithubToken => Identity::new(Box::new(config)).github_token(),
        Lookup::OriginUrl => Identity::new(Box::new(config)).origin_url(),
        Lookup::Repository => Identity::new(Box::new(config)).repository(),
    }
}

fn main() {
    let _logger = Logger::try_with_env_or_str("warn")
        .unwrap_or_else(|e| exit_with_error("failed to create logger", e.into()))
        .log_to_stderr()
        .write_mode(WriteMode::Direct)
        .start()
        .unwrap_or_else(|e| exit_with_error("failed to start logger", e.into()));

    let cmd_args = std::env::args().collect::<Vec<String>>();
    let args = Args::parse(&cmd_args).unwrap_or_else(|e| {
        eprintln!("{}", USAGE);
        exit_with_error("failed to parse args", e.into())
    });
    debug!("running with {:?}", args);

    match run(args.lookup()) {
        Ok(value) => println!("{}", value),
        Err(ConfigError::NotFound) => {
            debug!("{:?} not found", args.lookup());
            std::process::exit(NOT_FOUND_EXIT_CODE);
        }
        Err(e) => exit_with_error("lookup failed", e.into()),
    }
}
