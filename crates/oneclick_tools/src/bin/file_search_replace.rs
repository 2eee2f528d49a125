//! Replace the first case-insensitive match of a pattern in a file

use std::path::PathBuf;
use std::process::ExitCode;

use clap::error::ErrorKind;
use clap::{crate_version, value_parser, Arg, ArgMatches, Command};

use oneclick_tools::{init_tool_logging, replace_in_file};

const FILE_ARG: &str = "file";
const SEARCH_ARG: &str = "search";
const REPLACE_ARG: &str = "replace";

fn cli() -> Command {
    Command::new("file-search-replace")
        .version(crate_version!())
        .about("Performs a search replace on the input file.")
        .arg(
            Arg::new(FILE_ARG)
                .required(true)
                .value_name("FILE")
                .value_parser(value_parser!(PathBuf))
                .help("File to rewrite in place"),
        )
        .arg(
            Arg::new(SEARCH_ARG)
                .required(true)
                .value_name("SEARCH")
                .allow_hyphen_values(true)
                .help("Case-insensitive regular expression"),
        )
        .arg(
            Arg::new(REPLACE_ARG)
                .required(true)
                .value_name("REPLACE")
                .allow_hyphen_values(true)
                .help("Literal replacement for the first match"),
        )
}

fn parse_args() -> Result<ArgMatches, ExitCode> {
    cli().try_get_matches().map_err(|e| match e.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => e.exit(),
        _ => {
            let _ = e.print();
            ExitCode::FAILURE
        }
    })
}

fn main() -> ExitCode {
    init_tool_logging();

    let matches = match parse_args() {
        Ok(matches) => matches,
        Err(code) => return code,
    };

    let (Some(file), Some(search), Some(replace)) = (
        matches.get_one::<PathBuf>(FILE_ARG),
        matches.get_one::<String>(SEARCH_ARG),
        matches.get_one::<String>(REPLACE_ARG),
    ) else {
        return ExitCode::FAILURE;
    };

    match replace_in_file(file, search, replace) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("ERROR: {}", e);
            ExitCode::FAILURE
        }
    }
}
