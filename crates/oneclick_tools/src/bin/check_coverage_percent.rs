//! Fail when the line coverage in a report tree is below a minimum

use std::path::PathBuf;
use std::process::ExitCode;

use clap::error::ErrorKind;
use clap::{crate_version, value_parser, Arg, ArgMatches, Command};

use oneclick_tools::{check_coverage, init_tool_logging, CoverageVerdict};

const ROOT_ARG: &str = "root_dir";
const MIN_ARG: &str = "min_percent";

fn cli() -> Command {
    Command::new("check-coverage-percent")
        .version(crate_version!())
        .about("Checks the line coverage reported in Summary.xml against a minimum")
        .arg(
            Arg::new(ROOT_ARG)
                .required(true)
                .value_name("DIR")
                .value_parser(value_parser!(PathBuf))
                .help("Directory searched for Summary.xml"),
        )
        .arg(
            Arg::new(MIN_ARG)
                .required(true)
                .value_name("PERCENT")
                .allow_negative_numbers(true)
                .value_parser(value_parser!(f64))
                .help("Minimum line coverage; 0 or less skips the check"),
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

    let (Some(root), Some(minimum)) = (
        matches.get_one::<PathBuf>(ROOT_ARG),
        matches.get_one::<f64>(MIN_ARG),
    ) else {
        return ExitCode::FAILURE;
    };

    match check_coverage(root, *minimum) {
        Ok(verdict) => {
            match verdict {
                CoverageVerdict::Pass { coverage, minimum } => {
                    println!("Coverage {} is above the min percentage of {}.", coverage, minimum)
                }
                CoverageVerdict::Fail { coverage, minimum } => {
                    println!("Coverage {} is below the min percentage of {}.", coverage, minimum)
                }
                CoverageVerdict::Skipped => {}
            }
            if verdict.is_pass() {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            }
        }
        Err(e) => {
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}
