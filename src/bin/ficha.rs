//! Command-line interface for ficha
//! This binary processes ficha match sheets into the available output formats.
//!
//! Usage:
//!   ficha `<path>` `<format>` --teams `<teams.json>`   - Process a sheet and print to stdout
//!   ficha process `<path>` `<format>` --teams `<file>` - Same as above (explicit)
//!   ficha formats                                  - List all available formats

use clap::{Arg, ArgMatches, Command};
use ficha::ficha::processor::{available_formats, process_file, ProcessingSpec};
use ficha::ficha::registry::Registry;
use std::fs;
use std::process;

fn main() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .try_init();

    let matches = Command::new("ficha")
        .version(env!("CARGO_PKG_VERSION"))
        .about("A tool for inspecting and processing ficha match sheets")
        .subcommand_required(false)
        .arg_required_else_help(true)
        // Default command args
        .arg(Arg::new("path").help("Path to the ficha sheet to process").index(1))
        .arg(
            Arg::new("format")
                .help("Output format (e.g., match-simple, standings-json)")
                .index(2),
        )
        .arg(
            Arg::new("teams")
                .long("teams")
                .short('t')
                .help("Path to the JSON team file to validate against"),
        )
        // Subcommands
        .subcommand(
            Command::new("process")
                .about("Process a sheet and print to stdout (default command)")
                .arg(
                    Arg::new("path")
                        .help("Path to the ficha sheet to process")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::new("format")
                        .help("Output format (e.g., match-simple, standings-json)")
                        .required(true)
                        .index(2),
                )
                .arg(
                    Arg::new("teams")
                        .long("teams")
                        .short('t')
                        .help("Path to the JSON team file to validate against"),
                ),
        )
        .subcommand(Command::new("formats").about("List all available output formats"))
        .try_get_matches()
        .unwrap_or_else(|e| {
            eprintln!("{}", e);
            process::exit(1);
        });

    match matches.subcommand() {
        Some(("formats", _)) => {
            for format in available_formats() {
                println!("{}", format);
            }
        }
        Some(("process", sub)) => run(sub),
        _ => {
            if matches.get_one::<String>("path").is_none()
                || matches.get_one::<String>("format").is_none()
            {
                eprintln!("Usage: ficha <path> <format> [--teams <file>]");
                process::exit(1);
            }
            run(&matches);
        }
    }
}

fn run(args: &ArgMatches) {
    let path = args
        .get_one::<String>("path")
        .expect("path is required by clap");
    let format = args
        .get_one::<String>("format")
        .expect("format is required by clap");

    let spec = ProcessingSpec::from_string(format).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        eprintln!("Available formats: {}", available_formats().join(", "));
        process::exit(1);
    });

    let registry = match args.get_one::<String>("teams") {
        Some(teams_path) => {
            let text = fs::read_to_string(teams_path).unwrap_or_else(|e| {
                eprintln!("Error reading team file {}: {}", teams_path, e);
                process::exit(1);
            });
            Registry::from_json(&text).unwrap_or_else(|e| {
                eprintln!("Error: {}", e);
                process::exit(1);
            })
        }
        // Without a team file every team code is unknown; only the token
        // stage is useful.
        None => Registry::new(),
    };

    match process_file(path, &registry, &spec) {
        Ok(output) => print!("{}", output),
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}
