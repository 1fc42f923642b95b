use std::path::PathBuf;
use thiserror::Error;

pub const USAGE: &str =
    "usage: ticket-shell [--verbose|-v] [--log <path>] [--attempts <n>] [--no-color] [--help|-h]";
pub const LOG_ENV: &str = "TICKET_SHELL_LOG";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Failed terminal reads tolerated per cycle before the process exits.
    pub max_input_attempts: u32,
    pub log_path: Option<PathBuf>,
    pub verbose: bool,
    pub color: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_input_attempts: 1,
            log_path: None,
            verbose: false,
            color: true,
        }
    }
}

#[derive(Debug, PartialEq)]
pub enum Invocation {
    Run(Config),
    Help,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing value for {0}")]
    MissingValue(&'static str),
    #[error("--attempts expects a positive integer, got '{0}'")]
    InvalidAttempts(String),
    #[error("unknown argument '{0}'")]
    UnknownArgument(String),
}

impl Config {
    /// Read `std::env::args` plus the `TICKET_SHELL_LOG` and `NO_COLOR` variables.
    pub fn from_env() -> Result<Invocation, ConfigError> {
        let log_env = std::env::var(LOG_ENV).ok().filter(|v| !v.is_empty());
        let no_color = std::env::var_os("NO_COLOR").is_some();
        parse_args(std::env::args().skip(1), log_env, no_color)
    }
}

pub fn parse_args<I>(args: I, log_env: Option<String>, no_color: bool) -> Result<Invocation, ConfigError>
where
    I: IntoIterator<Item = String>,
{
    let mut config = Config {
        log_path: log_env.map(PathBuf::from),
        color: !no_color,
        ..Config::default()
    };

    let mut iter = args.into_iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--verbose" | "-v" => {
                config.verbose = true;
            }
            "--no-color" => {
                config.color = false;
            }
            "--log" => {
                let path = iter.next().ok_or(ConfigError::MissingValue("--log"))?;
                config.log_path = Some(PathBuf::from(path));
            }
            "--attempts" => {
                let raw = iter.next().ok_or(ConfigError::MissingValue("--attempts"))?;
                match raw.parse::<u32>() {
                    Ok(n) if n >= 1 => config.max_input_attempts = n,
                    _ => return Err(ConfigError::InvalidAttempts(raw)),
                }
            }
            "--help" | "-h" => return Ok(Invocation::Help),
            _ => return Err(ConfigError::UnknownArgument(arg)),
        }
    }
    Ok(Invocation::Run(config))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn defaults_allow_a_single_attempt() {
        let parsed = parse_args(Vec::new(), None, false).unwrap();
        assert_eq!(parsed, Invocation::Run(Config::default()));
    }

    #[test]
    fn flags_override_defaults() {
        let parsed = parse_args(
            args(&["-v", "--attempts", "3", "--log", "/tmp/s.log", "--no-color"]),
            None,
            false,
        )
        .unwrap();
        let Invocation::Run(cfg) = parsed else {
            panic!("expected run");
        };
        assert!(cfg.verbose);
        assert!(!cfg.color);
        assert_eq!(cfg.max_input_attempts, 3);
        assert_eq!(cfg.log_path, Some(PathBuf::from("/tmp/s.log")));
    }

    #[test]
    fn environment_supplies_log_path_and_color() {
        let Invocation::Run(cfg) = parse_args(Vec::new(), Some("env.log".into()), true).unwrap() else {
            panic!("expected run");
        };
        assert_eq!(cfg.log_path, Some(PathBuf::from("env.log")));
        assert!(!cfg.color);
    }

    #[test]
    fn bad_arguments_are_rejected() {
        assert_eq!(
            parse_args(args(&["--attempts", "0"]), None, false),
            Err(ConfigError::InvalidAttempts("0".into()))
        );
        assert_eq!(
            parse_args(args(&["--log"]), None, false),
            Err(ConfigError::MissingValue("--log"))
        );
        assert_eq!(
            parse_args(args(&["--frob"]), None, false),
            Err(ConfigError::UnknownArgument("--frob".into()))
        );
        assert_eq!(parse_args(args(&["-h"]), None, false), Ok(Invocation::Help));
    }
}
