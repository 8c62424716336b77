//! Command-line flag parsing.

use std::fmt;

use contagion_logic::generation::{ConfigError, GenerationConfig};

pub const USAGE: &str = "\
Usage: contagion-sim [OPTIONS]

Options:
  --rows N          grid rows (default 5)
  --cols N          grid columns (default 5)
  --absent PCT      percentage of absent positions (default 10)
  --infected PCT    percentage of initially infected cells (default 10)
  --seed N          RNG seed (random when omitted)
  --layout TEXT     explicit layout, rows split by '/', symbols O A I
  --quiet           do not render every step
  --json            print a JSON summary instead of the final sentence
  --selfcheck       run the built-in scenario checks and exit
  -v, --verbose     debug logging on stderr
  -h, --help        show this message";

/// Parsed command-line options.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Options {
    pub config: GenerationConfig,
    pub seed: Option<u64>,
    pub layout: Option<String>,
    pub quiet: bool,
    pub json: bool,
    pub selfcheck: bool,
    pub verbose: bool,
    pub help: bool,
}

/// Errors raised while reading flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArgError {
    MissingValue(String),
    InvalidValue { flag: String, value: String },
    UnknownFlag(String),
    Config(ConfigError),
}

impl From<ConfigError> for ArgError {
    fn from(e: ConfigError) -> Self {
        ArgError::Config(e)
    }
}

impl fmt::Display for ArgError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgError::MissingValue(flag) => write!(f, "{} needs a value", flag),
            ArgError::InvalidValue { flag, value } => {
                write!(f, "invalid value '{}' for {}", value, flag)
            }
            ArgError::UnknownFlag(flag) => write!(f, "unknown option '{}'", flag),
            ArgError::Config(e) => write!(f, "invalid configuration: {}", e),
        }
    }
}

impl std::error::Error for ArgError {}

fn parse_value<T: std::str::FromStr>(flag: &str, value: &str) -> Result<T, ArgError> {
    value.parse().map_err(|_| ArgError::InvalidValue {
        flag: flag.to_string(),
        value: value.to_string(),
    })
}

/// Parse flags (without the program name). Accepts `--flag value` and
/// `--flag=value`.
pub fn parse_args<I>(args: I) -> Result<Options, ArgError>
where
    I: IntoIterator<Item = String>,
{
    let mut options = Options::default();
    let mut args = args.into_iter();

    while let Some(arg) = args.next() {
        let (flag, inline) = match arg.split_once('=') {
            Some((flag, value)) if flag.starts_with("--") => {
                (flag.to_string(), Some(value.to_string()))
            }
            _ => (arg.clone(), None),
        };

        match flag.as_str() {
            "--quiet" => options.quiet = true,
            "--json" => options.json = true,
            "--selfcheck" => options.selfcheck = true,
            "-v" | "--verbose" => options.verbose = true,
            "-h" | "--help" => options.help = true,
            "--rows" | "--cols" | "--absent" | "--infected" | "--seed" | "--layout" => {
                let value = match inline {
                    Some(value) => value,
                    None => args
                        .next()
                        .ok_or_else(|| ArgError::MissingValue(flag.clone()))?,
                };
                match flag.as_str() {
                    "--rows" => options.config.rows = parse_value(&flag, &value)?,
                    "--cols" => options.config.cols = parse_value(&flag, &value)?,
                    "--absent" => options.config.absent_pct = parse_value(&flag, &value)?,
                    "--infected" => options.config.infected_pct = parse_value(&flag, &value)?,
                    "--seed" => options.seed = Some(parse_value(&flag, &value)?),
                    _ => options.layout = Some(value),
                }
            }
            _ => return Err(ArgError::UnknownFlag(flag)),
        }
    }

    if options.layout.is_none() {
        options.config.validate()?;
    }
    Ok(options)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Options, ArgError> {
        parse_args(args.iter().map(|s| s.to_string()))
    }

    #[test]
    fn test_defaults() {
        let options = parse(&[]).unwrap();
        assert_eq!(options.config, GenerationConfig::default());
        assert_eq!(options.seed, None);
        assert!(!options.quiet && !options.json && !options.verbose);
    }

    #[test]
    fn test_values_both_forms() {
        let options = parse(&[
            "--rows", "8", "--cols=3", "--absent", "20", "--infected=5", "--seed", "42",
        ])
        .unwrap();
        assert_eq!(options.config.rows, 8);
        assert_eq!(options.config.cols, 3);
        assert_eq!(options.config.absent_pct, 20);
        assert_eq!(options.config.infected_pct, 5);
        assert_eq!(options.seed, Some(42));
    }

    #[test]
    fn test_switches() {
        let options = parse(&["--quiet", "--json", "-v", "--selfcheck"]).unwrap();
        assert!(options.quiet);
        assert!(options.json);
        assert!(options.verbose);
        assert!(options.selfcheck);
        assert!(parse(&["-h"]).unwrap().help);
    }

    #[test]
    fn test_layout_value() {
        let options = parse(&["--layout", "AIA/OAA"]).unwrap();
        assert_eq!(options.layout.as_deref(), Some("AIA/OAA"));
    }

    #[test]
    fn test_errors() {
        assert_eq!(
            parse(&["--rows"]).unwrap_err(),
            ArgError::MissingValue("--rows".into())
        );
        assert_eq!(
            parse(&["--rows", "many"]).unwrap_err(),
            ArgError::InvalidValue {
                flag: "--rows".into(),
                value: "many".into()
            }
        );
        assert_eq!(
            parse(&["--frobnicate"]).unwrap_err(),
            ArgError::UnknownFlag("--frobnicate".into())
        );
        assert!(matches!(
            parse(&["--absent", "70", "--infected", "40"]).unwrap_err(),
            ArgError::Config(ConfigError::BandsOverflow { .. })
        ));
        assert!(matches!(
            parse(&["--cols", "0"]).unwrap_err(),
            ArgError::Config(ConfigError::EmptyGrid { .. })
        ));
    }

    #[test]
    fn test_layout_skips_generation_checks() {
        let options = parse(&["--rows", "0", "--layout", "IA"]).unwrap();
        assert_eq!(options.config.rows, 0);
    }
}
