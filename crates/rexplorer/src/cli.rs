/// What the command line asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliCommand {
    /// Open the browser window, optionally on a given connection URI.
    Run { uri: Option<String> },
    Help,
    Version,
}

pub fn parse(args: &[String]) -> Result<CliCommand, String> {
    let mut uri = None;

    for arg in args {
        match arg.as_str() {
            "-h" | "--help" => return Ok(CliCommand::Help),
            "-V" | "--version" => return Ok(CliCommand::Version),
            flag if flag.starts_with('-') => {
                return Err(format!("Unknown option '{}'", flag));
            }
            value => {
                if uri.is_some() {
                    return Err(format!("Unexpected argument '{}'", value));
                }
                uri = Some(value.to_string());
            }
        }
    }

    Ok(CliCommand::Run { uri })
}

pub fn usage() -> String {
    format!(
        "Usage: rexplorer [URI]\n\
         \n\
         Browse JSON values stored in Redis, grouped by key prefix.\n\
         \n\
         Arguments:\n  \
           URI            Connection URI, e.g. redis://127.0.0.1:6379/0\n\
         \n\
         Options:\n  \
           -h, --help     Print this help\n  \
           -V, --version  Print the version\n\
         \n\
         Environment:\n  \
           {}  Connection URI used when none is given\n  \
           RUST_LOG       Log filter (default: info)",
        rexplorer_core::URL_ENV_VAR
    )
}

pub fn version() -> String {
    format!("rexplorer {}", env!("CARGO_PKG_VERSION"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn no_arguments_runs_with_configured_connection() {
        assert_eq!(parse(&[]), Ok(CliCommand::Run { uri: None }));
    }

    #[test]
    fn positional_uri() {
        assert_eq!(
            parse(&args(&["redis://cache:6380/1"])),
            Ok(CliCommand::Run {
                uri: Some("redis://cache:6380/1".to_string())
            })
        );
    }

    #[test]
    fn help_and_version_win() {
        assert_eq!(parse(&args(&["redis://x", "--help"])), Ok(CliCommand::Help));
        assert_eq!(parse(&args(&["-V"])), Ok(CliCommand::Version));
    }

    #[test]
    fn rejects_unknown_flags_and_extra_arguments() {
        assert!(parse(&args(&["--verbose"])).is_err());
        assert!(parse(&args(&["redis://a", "redis://b"])).is_err());
    }

    #[test]
    fn usage_mentions_env_var() {
        assert!(usage().contains("REXPLORER_URL"));
    }
}
