#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Args {
    pub api_base: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Run(Args),
    Help,
    Version,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseError {
    pub code: i32,
    pub message: String,
}

#[must_use]
pub fn help_text(bin_name: &str) -> String {
    format!(
        "iRevolution Terminal\n\nUsage:\n  {bin_name} [options]\n\nOptions:\n  -h, --help             Show this help\n  -V, --version          Show the version\n      --api-base <url>   Analytics API base URL (default {})\n",
        crate::api::DEFAULT_BASE
    )
}

#[must_use]
pub fn version_text() -> String {
    format!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))
}

pub fn parse_args<I, S>(args: I) -> Result<Command, ParseError>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut parsed = Args::default();
    let mut show_help = false;
    let mut show_version = false;

    let mut args = args.into_iter().map(Into::into);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => show_help = true,
            "-V" | "--version" => show_version = true,
            "--api-base" => {
                let Some(value) = args.next().filter(|v| !v.starts_with('-')) else {
                    return Err(ParseError {
                        code: 2,
                        message: format!(
                            "--api-base expects a URL\n\n{}",
                            help_text("irevolution")
                        ),
                    });
                };
                parsed.api_base = Some(value);
            }
            _ if arg.starts_with('-') => {
                return Err(ParseError {
                    code: 2,
                    message: format!("unknown option: {arg}\n\n{}", help_text("irevolution")),
                });
            }
            _ => {
                return Err(ParseError {
                    code: 2,
                    message: format!(
                        "unexpected positional argument: {arg}\n\n{}",
                        help_text("irevolution")
                    ),
                });
            }
        }
    }

    if show_help {
        return Ok(Command::Help);
    }

    if show_version {
        return Ok(Command::Version);
    }

    Ok(Command::Run(parsed))
}

#[cfg(test)]
mod tests {
    use super::{parse_args, Command};

    #[test]
    fn parses_default_run_command() {
        let result = parse_args(Vec::<String>::new());
        assert!(matches!(result, Ok(Command::Run(_))));
    }

    #[test]
    fn parses_help_command() {
        let result = parse_args(["--help"]);
        assert_eq!(result, Ok(Command::Help));
    }

    #[test]
    fn parses_version_command() {
        let result = parse_args(["--version"]);
        assert_eq!(result, Ok(Command::Version));
    }

    #[test]
    fn parses_api_base_with_value() {
        let result = parse_args(["--api-base", "http://analytics:5000"]);
        match result {
            Ok(Command::Run(args)) => {
                assert_eq!(args.api_base.as_deref(), Some("http://analytics:5000"));
            }
            _ => panic!("expected run command with api base"),
        }
    }

    #[test]
    fn fails_on_api_base_without_value() {
        let result = parse_args(["--api-base"]);
        let err = result.expect_err("expected parse error");
        assert_eq!(err.code, 2);
        assert!(err.message.contains("--api-base expects a URL"));
    }

    #[test]
    fn fails_on_unknown_option() {
        let result = parse_args(["--unknown"]);
        let err = result.expect_err("expected parse error");
        assert_eq!(err.code, 2);
        assert!(err.message.contains("unknown option"));
    }

    #[test]
    fn fails_on_positional_argument() {
        let result = parse_args(["abc"]);
        let err = result.expect_err("expected parse error");
        assert_eq!(err.code, 2);
        assert!(err.message.contains("unexpected positional argument"));
    }
}
