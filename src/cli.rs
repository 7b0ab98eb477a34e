//! Command-line parsing for the `dispenser` binary.

use std::path::PathBuf;

use crate::error::AppError;

pub const USAGE: &str = "\
usage: dispenser --input-file <FILE>...

Runs each input scenario in turn and reports what the machine served.

options:
  --input-file <FILE>...  one or more scenario files (alias: --inputFile)
  -h, --help              show this help message and exit

environment:
  RUST_LOG                     log filter, e.g. info or debug
  DISPENSER_OUTLET_TIMEOUT_MS  give up on an outlet after this many milliseconds
  DISPENSER_FIXED_THRESHOLD    use this low-stock threshold for every ingredient";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Run { input_files: Vec<PathBuf> },
    Help,
}

/// Parses the arguments that follow the program name.
///
/// `--input-file` takes every following argument up to the next flag, and may
/// be repeated. `--input-file=path` is accepted too.
pub fn parse_args<I, S>(args: I) -> Result<Command, AppError>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut input_files = Vec::new();
    let mut collecting = false;

    for arg in args.into_iter().map(Into::into) {
        match arg.as_str() {
            "-h" | "--help" => return Ok(Command::Help),
            "--input-file" | "--inputFile" => collecting = true,
            flag if flag.starts_with("--input-file=") || flag.starts_with("--inputFile=") => {
                let (_, path) = flag.split_once('=').unwrap_or_default();
                if path.is_empty() {
                    return Err(AppError::Usage(format!("missing path in {}\n\n{}", flag, USAGE)));
                }
                input_files.push(PathBuf::from(path));
                collecting = true;
            }
            flag if flag.starts_with('-') => {
                return Err(AppError::Usage(format!("unknown option {}\n\n{}", flag, USAGE)));
            }
            path if collecting => input_files.push(PathBuf::from(path)),
            other => {
                return Err(AppError::Usage(format!(
                    "unexpected argument {}\n\n{}",
                    other, USAGE
                )));
            }
        }
    }

    if input_files.is_empty() {
        return Err(AppError::Usage(format!(
            "the following arguments are required: --input-file\n\n{}",
            USAGE
        )));
    }
    Ok(Command::Run { input_files })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn files(command: Command) -> Vec<PathBuf> {
        match command {
            Command::Run { input_files } => input_files,
            Command::Help => panic!("expected run command"),
        }
    }

    #[test]
    fn test_multiple_files() {
        let command = parse_args(["--input-file", "a.json", "b.json"]).unwrap();
        assert_eq!(files(command), vec![PathBuf::from("a.json"), PathBuf::from("b.json")]);
    }

    #[test]
    fn test_aliases_and_repeats() {
        let command = parse_args(["--inputFile", "a.json", "--input-file=b.json"]).unwrap();
        assert_eq!(files(command), vec![PathBuf::from("a.json"), PathBuf::from("b.json")]);
    }

    #[test]
    fn test_help() {
        assert_eq!(parse_args(["--input-file", "a.json", "-h"]).unwrap(), Command::Help);
    }

    #[test]
    fn test_missing_files_is_usage_error() {
        assert!(matches!(parse_args(Vec::<String>::new()), Err(AppError::Usage(_))));
        assert!(matches!(parse_args(["--input-file"]), Err(AppError::Usage(_))));
        assert!(matches!(parse_args(["--input-file="]), Err(AppError::Usage(_))));
    }

    #[test]
    fn test_rejects_stray_arguments() {
        assert!(matches!(parse_args(["a.json"]), Err(AppError::Usage(_))));
        assert!(matches!(parse_args(["--verbose"]), Err(AppError::Usage(_))));
    }
}
