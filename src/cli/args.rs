//! Command-line argument parsing for murmur.
//!
//! `murmur [--url <url>] [--session <id>] [--health] [message...]`

use thiserror::Error;

use crate::startup::ClientConfig;

/// Flags that override the environment configuration.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CliOptions {
    /// `--url <url>`
    pub url: Option<String>,
    /// `--session <id>`
    pub session: Option<String>,
}

impl CliOptions {
    /// Layer these flags over `config`.
    pub fn apply(&self, config: ClientConfig) -> ClientConfig {
        let mut config = config;
        if let Some(url) = &self.url {
            config = config.with_base_url(url.as_str());
        }
        if let Some(session) = &self.session {
            config = config.with_session_id(session.as_str());
        }
        config
    }
}

/// Parsed CLI command to execute.
#[derive(Debug, Clone, PartialEq)]
pub enum CliCommand {
    /// Show version information
    Version,
    /// Show usage
    Help,
    /// Query the health endpoint and exit
    Health(CliOptions),
    /// Send one message and exit
    Send { options: CliOptions, message: String },
    /// Read messages from stdin until EOF (default)
    Repl(CliOptions),
}

/// Argument errors.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ArgsError {
    #[error("missing value for {0}")]
    MissingValue(String),
    #[error("unknown option: {0}")]
    UnknownOption(String),
}

/// Parse command-line arguments and return the appropriate command.
///
/// `--version` and `--help` win wherever they appear. Everything after `--`
/// is message text even if it starts with a dash.
///
/// # Examples
///
/// ```
/// use murmur::cli::args::{parse_args, CliCommand};
///
/// let args = vec!["murmur".to_string(), "--version".to_string()];
/// assert_eq!(parse_args(args.into_iter()), Ok(CliCommand::Version));
/// ```
pub fn parse_args<I>(args: I) -> Result<CliCommand, ArgsError>
where
    I: Iterator<Item = String>,
{
    let mut options = CliOptions::default();
    let mut health = false;
    let mut words: Vec<String> = Vec::new();

    // Skip the program name
    let mut args = args.skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--version" | "-V" => return Ok(CliCommand::Version),
            "--help" | "-h" => return Ok(CliCommand::Help),
            "--health" => health = true,
            "--url" => {
                options.url = Some(args.next().ok_or_else(|| ArgsError::MissingValue(arg.clone()))?)
            }
            "--session" => {
                options.session =
                    Some(args.next().ok_or_else(|| ArgsError::MissingValue(arg.clone()))?)
            }
            "--" => {
                words.extend(args.by_ref());
            }
            flag if flag.starts_with('-') && flag.len() > 1 => {
                return Err(ArgsError::UnknownOption(flag.to_string()))
            }
            word => words.push(word.to_string()),
        }
    }

    if health {
        return Ok(CliCommand::Health(options));
    }

    let message = words.join(" ");
    if message.trim().is_empty() {
        Ok(CliCommand::Repl(options))
    } else {
        Ok(CliCommand::Send { options, message })
    }
}

/// Usage text for `--help`.
pub const USAGE: &str = "\
Usage: murmur [OPTIONS] [MESSAGE...]

Send MESSAGE to the chat backend and stream the reply. Without a message,
read one message per line from stdin until EOF.

Options:
  --url <URL>        Backend base URL (env: MURMUR_URL, default http://127.0.0.1:8000)
  --session <ID>     Session id sent with each message (env: MURMUR_SESSION)
  --health           Query the health endpoint and exit
  -V, --version      Print version
  -h, --help         Print this help

Logging goes to stderr; set MURMUR_LOG or RUST_LOG (e.g. MURMUR_LOG=debug).
";

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<CliCommand, ArgsError> {
        let mut full = vec!["murmur".to_string()];
        full.extend(args.iter().map(|a| a.to_string()));
        parse_args(full.into_iter())
    }

    #[test]
    fn test_parse_version_flag() {
        assert_eq!(parse(&["--version"]), Ok(CliCommand::Version));
        assert_eq!(parse(&["-V"]), Ok(CliCommand::Version));
    }

    #[test]
    fn test_parse_help_flag() {
        assert_eq!(parse(&["-h"]), Ok(CliCommand::Help));
        assert_eq!(parse(&["hello", "--help"]), Ok(CliCommand::Help));
    }

    #[test]
    fn test_no_args_is_repl() {
        assert_eq!(parse(&[]), Ok(CliCommand::Repl(CliOptions::default())));
    }

    #[test]
    fn test_message_words_are_joined() {
        assert_eq!(
            parse(&["what", "is", "rust?"]),
            Ok(CliCommand::Send {
                options: CliOptions::default(),
                message: "what is rust?".to_string()
            })
        );
    }

    #[test]
    fn test_url_and_session() {
        let expected = CliOptions {
            url: Some("http://localhost:9000".to_string()),
            session: Some("s1".to_string()),
        };
        assert_eq!(
            parse(&["--url", "http://localhost:9000", "--session", "s1", "hi"]),
            Ok(CliCommand::Send {
                options: expected,
                message: "hi".to_string()
            })
        );
    }

    #[test]
    fn test_health_flag() {
        let expected = CliOptions {
            url: Some("http://x".to_string()),
            session: None,
        };
        assert_eq!(
            parse(&["--health", "--url", "http://x"]),
            Ok(CliCommand::Health(expected))
        );
    }

    #[test]
    fn test_missing_value() {
        assert_eq!(
            parse(&["--url"]),
            Err(ArgsError::MissingValue("--url".to_string()))
        );
    }

    #[test]
    fn test_unknown_option() {
        assert_eq!(
            parse(&["--verbose"]),
            Err(ArgsError::UnknownOption("--verbose".to_string()))
        );
    }

    #[test]
    fn test_double_dash_passes_dashes_through() {
        assert_eq!(
            parse(&["--", "-1", "is", "negative"]),
            Ok(CliCommand::Send {
                options: CliOptions::default(),
                message: "-1 is negative".to_string()
            })
        );
    }

    #[test]
    fn test_blank_message_is_repl() {
        assert_eq!(parse(&["  "]), Ok(CliCommand::Repl(CliOptions::default())));
    }

    #[test]
    fn test_options_apply_over_config() {
        let options = CliOptions {
            url: Some("http://override:1/".to_string()),
            session: Some("abc".to_string()),
        };
        let config = options.apply(ClientConfig::default());
        assert_eq!(config.base_url, "http://override:1");
        assert_eq!(config.session_id.as_deref(), Some("abc"));

        let untouched = CliOptions::default().apply(ClientConfig::default());
        assert_eq!(untouched, ClientConfig::default());
    }
}
