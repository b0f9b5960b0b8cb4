//! `estimate` command line
//!
//! Reads a payload or markdown file (or stdin), runs it through the
//! classifier, normalizer and renderer, and writes the result to stdout.
//! Logs go to stderr.

mod commands;
mod config;

use anyhow::Result;
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use commands::OutputFormat;
use config::{CliConfig, Toolkit};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn input_arg() -> Arg {
    Arg::new("input")
        .value_name("FILE")
        .default_value("-")
        .help("Input file, or - for stdin")
}

fn build_cli() -> Command {
    Command::new("estimate")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Classify, normalize and render generated cost estimates")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("config")
                .long("config")
                .global(true)
                .value_name("PATH")
                .value_parser(value_parser!(PathBuf))
                .help("TOML, YAML or JSON file with [rules], [heuristic], [classifier] and [render] tables"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .global(true)
                .action(ArgAction::Count)
                .help("Log pipeline decisions to stderr (-vv for trace)"),
        )
        .subcommand(
            Command::new("classify")
                .about("Classify a JSON payload and print the result as JSON")
                .arg(input_arg()),
        )
        .subcommand(
            Command::new("normalize")
                .about("Normalize raw estimate markdown")
                .arg(input_arg())
                .arg(
                    Arg::new("explain")
                        .long("explain")
                        .action(ArgAction::SetTrue)
                        .help("List the stages that changed the text on stderr"),
                ),
        )
        .subcommand(
            Command::new("render")
                .about("Classify, normalize and render a payload")
                .arg(input_arg())
                .arg(
                    Arg::new("format")
                        .long("format")
                        .default_value("html")
                        .value_parser(OutputFormat::NAMES)
                        .help("Output format"),
                )
                .arg(
                    Arg::new("raw")
                        .long("raw")
                        .action(ArgAction::SetTrue)
                        .help("Treat the input as markdown text instead of a JSON payload"),
                ),
        )
        .subcommand(
            Command::new("check")
                .about("Report whether text looks like estimate content")
                .arg(input_arg())
                .arg(
                    Arg::new("strict")
                        .long("strict")
                        .action(ArgAction::SetTrue)
                        .help("Require several markers unless a table is present"),
                ),
        )
}

fn init_tracing(verbosity: u8) {
    let filter = match verbosity {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn load_toolkit(matches: &ArgMatches) -> Result<Toolkit> {
    let config = match matches.get_one::<PathBuf>("config") {
        Some(path) => CliConfig::load(path)?,
        None => CliConfig::default(),
    };
    Toolkit::from_config(&config)
}

fn input(args: &ArgMatches) -> Result<String> {
    let source = args.get_one::<String>("input").map_or("-", String::as_str);
    commands::read_input(source)
}

fn run(matches: &ArgMatches) -> Result<ExitCode> {
    let tools = load_toolkit(matches)?;

    match matches.subcommand() {
        Some(("classify", args)) => {
            println!("{}", commands::classify(&tools, &input(args)?)?);
        }
        Some(("normalize", args)) => {
            let (text, changed) = commands::normalize(&tools, &input(args)?);
            if args.get_flag("explain") {
                if changed.is_empty() {
                    eprintln!("no stage changed the text");
                }
                for stage in changed {
                    eprintln!("changed: {stage}");
                }
            }
            println!("{text}");
        }
        Some(("render", args)) => {
            let format = args
                .get_one::<String>("format")
                .map_or(OutputFormat::Html, |name| OutputFormat::from_name(name));
            let out = commands::render(&tools, &input(args)?, format, args.get_flag("raw"))?;
            println!("{out}");
        }
        Some(("check", args)) => {
            let is_estimate = commands::check(&tools, &input(args)?, args.get_flag("strict"));
            println!("{}", if is_estimate { "estimate" } else { "not an estimate" });
            if !is_estimate {
                return Ok(ExitCode::FAILURE);
            }
        }
        _ => {}
    }
    Ok(ExitCode::SUCCESS)
}

fn main() -> Result<ExitCode> {
    let matches = build_cli().get_matches();
    init_tracing(matches.get_count("verbose"));
    run(&matches)
}
