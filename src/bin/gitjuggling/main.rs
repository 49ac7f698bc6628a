use std::ffi::OsString;
use std::process::ExitCode;

use clap::Parser;
use log::debug;

use gitjuggling::Runner;

#[derive(Parser, Debug)]
#[command(
    name = "gitjuggling",
    about = "Run a git command in every repository below the current directory",
    disable_help_flag = true
)]
struct Cli {
    /// Arguments passed verbatim to git in every repository
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    git_args: Vec<OsString>,
}

impl Cli {
    /// Arguments to forward to git, taken from a full argv.
    ///
    /// clap consumes a leading `--` as its end-of-options marker; it is put
    /// back so git receives every argument unchanged.
    fn forwarded_args<I>(argv: I) -> Result<Vec<OsString>, clap::Error>
    where
        I: IntoIterator<Item = OsString>,
    {
        let argv: Vec<OsString> = argv.into_iter().collect();
        let mut git_args = Cli::try_parse_from(argv.iter().cloned())?.git_args;
        if argv.get(1).is_some_and(|first| first == "--") {
            git_args.insert(0, OsString::from("--"));
        }
        Ok(git_args)
    }
}

fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let git_args = Cli::forwarded_args(std::env::args_os()).unwrap_or_else(|e| e.exit());
    gitjuggling::logger::init();

    let cwd = std::env::current_dir()?;
    debug!("Forwarding {git_args:?} from {}", cwd.display());

    let summary = Runner::new().run(&cwd, &git_args, &mut std::io::stdout().lock())?;
    Ok(summary.exit_code())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Vec<String> {
        let argv = std::iter::once("gitjuggling")
            .chain(args.iter().copied())
            .map(OsString::from);
        Cli::forwarded_args(argv)
            .unwrap()
            .into_iter()
            .map(|a| a.to_string_lossy().into_owned())
            .collect()
    }

    #[test]
    fn test_arguments_are_forwarded_in_order() {
        assert_eq!(
            parse(&["pull", "--rebase", "-q", "origin", "main"]),
            vec!["pull", "--rebase", "-q", "origin", "main"]
        );
    }

    #[test]
    fn test_own_flags_are_not_recognised() {
        assert_eq!(parse(&["--help"]), vec!["--help"]);
        assert_eq!(parse(&["-C", "sub", "status"]), vec!["-C", "sub", "status"]);
    }

    #[test]
    fn test_leading_double_dash_is_forwarded() {
        assert_eq!(parse(&["--", "status"]), vec!["--", "status"]);
        assert_eq!(parse(&["--"]), vec!["--"]);
    }

    #[test]
    fn test_later_double_dash_is_forwarded() {
        assert_eq!(
            parse(&["log", "--", "README.md"]),
            vec!["log", "--", "README.md"]
        );
    }

    #[test]
    fn test_no_arguments() {
        assert!(parse(&[]).is_empty());
    }

    #[test]
    fn verify_cli() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
