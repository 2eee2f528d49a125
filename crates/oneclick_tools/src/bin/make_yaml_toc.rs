//! Convert a markdown table of contents into `toc.yml`

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::error::ErrorKind;
use clap::{crate_version, value_parser, Arg, ArgMatches, Command};

use oneclick_tools::toc::{DEFAULT_TOC_FILE, OUTPUT_FILE};
use oneclick_tools::{init_tool_logging, write_toc};

const INPUT_ARG: &str = "input";

fn cli() -> Command {
    Command::new("make-yaml-toc")
        .version(crate_version!())
        .about("Turns a markdown bullet list of links into a YAML table of contents")
        .arg(
            Arg::new(INPUT_ARG)
                .value_name("FILE")
                .value_parser(value_parser!(PathBuf))
                .help("Markdown file; defaults to TableOfContents.md, prompts when that is missing"),
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

fn prompt_for_input() -> io::Result<String> {
    print!("Enter the location of the {} file you want to convert: ", DEFAULT_TOC_FILE);
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim().to_string())
}

fn main() -> ExitCode {
    init_tool_logging();

    let matches = match parse_args() {
        Ok(matches) => matches,
        Err(code) => return code,
    };

    let input = match matches.get_one::<PathBuf>(INPUT_ARG) {
        Some(input) => input.clone(),
        None if Path::new(DEFAULT_TOC_FILE).exists() => PathBuf::from(DEFAULT_TOC_FILE),
        None => match prompt_for_input() {
            Ok(line) if !line.is_empty() => PathBuf::from(line),
            Ok(_) => {
                println!(
                    "Can't continue. You need to specify the location of the MD toc file (eg., `{}`)",
                    DEFAULT_TOC_FILE
                );
                return ExitCode::FAILURE;
            }
            Err(e) => {
                eprintln!("Can't continue. {}", e);
                return ExitCode::FAILURE;
            }
        },
    };

    println!("Processing {}...", input.display());
    match write_toc(&input) {
        Ok(_) => {
            println!("Finished creating {} file from {}.", OUTPUT_FILE, input.display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            println!("Can't continue. {}", e);
            println!("Failed to convert the {} file to YAML.", input.display());
            ExitCode::FAILURE
        }
    }
}
