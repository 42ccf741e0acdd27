//! Command-line interface for the PL parser
//!
//! Usage:
//!   pl parse `<path>` [--format `<format>`] [--config `<file>`]  - Parse a file and print the document
//!   pl list-formats                                        - List available output formats
//!   pl list-components                                     - List components usable with `=:`
//!
//! Configuration is read from the embedded defaults, then `./pl.toml` if present, then
//! `--config`, then flags.

use clap::{Arg, ArgAction, ArgMatches, Command};
use pl_parser::pl::components::ComponentCatalog;
use pl_parser::pl::config::{Loader, PlConfig};
use pl_parser::pl::formats::OutputFormat;
use pl_parser::{FsLocationResolver, ParseOptions, ParserRegistry, ScopeIds};
use std::path::PathBuf;
use std::process::exit;
use std::sync::Arc;

fn main() {
    let matches = Command::new("pl")
        .version(env!("CARGO_PKG_VERSION"))
        .about("A tool for parsing PL exercise files")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Log parser progress to stderr")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .subcommand(
            Command::new("parse")
                .about("Parse a file and print the resulting document")
                .arg(
                    Arg::new("path")
                        .help("Path to the file to parse")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::new("format")
                        .long("format")
                        .short('f')
                        .help("Output format (e.g., 'json', 'yaml')"),
                )
                .arg(
                    Arg::new("config")
                        .long("config")
                        .short('c')
                        .help("Configuration file layered over the defaults"),
                )
                .arg(
                    Arg::new("no-mandatory-keys")
                        .long("no-mandatory-keys")
                        .help("Accept files lacking title, author, version or statement")
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("resource-id")
                        .long("resource-id")
                        .help("Resource the file belongs to")
                        .value_parser(clap::value_parser!(i64))
                        .default_value("0"),
                )
                .arg(
                    Arg::new("circle-id")
                        .long("circle-id")
                        .help("Circle the file belongs to")
                        .value_parser(clap::value_parser!(i64))
                        .default_value("0"),
                ),
        )
        .subcommand(Command::new("list-formats").about("List available output formats"))
        .subcommand(
            Command::new("list-components").about("List components available to `key =: Name`"),
        )
        .get_matches();

    init_logging(matches.get_flag("verbose"));

    match matches.subcommand() {
        Some(("parse", parse_matches)) => handle_parse_command(parse_matches),
        Some(("list-formats", _)) => handle_list_formats_command(),
        Some(("list-components", _)) => handle_list_components_command(),
        _ => unreachable!(),
    }
}

fn init_logging(verbose: bool) {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(if verbose {
                tracing::Level::DEBUG.into()
            } else {
                tracing::Level::WARN.into()
            }),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(matches: &ArgMatches) -> PlConfig {
    let mut loader = Loader::new().with_optional_file("pl.toml");
    if let Some(path) = matches.get_one::<String>("config") {
        loader = loader.with_file(path);
    }
    if let Some(format) = matches.get_one::<String>("format") {
        loader = loader
            .set_override("output.format", format.as_str())
            .unwrap_or_else(|e| {
                eprintln!("Invalid --format: {e}");
                exit(1);
            });
    }
    if matches.get_flag("no-mandatory-keys") {
        loader = loader
            .set_override("parsing.check_mandatory_keys", false)
            .unwrap_or_else(|e| {
                eprintln!("Invalid --no-mandatory-keys: {e}");
                exit(1);
            });
    }

    loader.build().unwrap_or_else(|e| {
        eprintln!("Error loading configuration: {e}");
        exit(1);
    })
}

/// Handle the parse command
fn handle_parse_command(matches: &ArgMatches) {
    let path = PathBuf::from(matches.get_one::<String>("path").unwrap());
    let scope = ScopeIds::new(
        *matches.get_one::<i64>("resource-id").unwrap(),
        *matches.get_one::<i64>("circle-id").unwrap(),
    );
    let config = load_config(matches);

    let format = OutputFormat::from_name(&config.output.format).unwrap_or_else(|e| {
        eprintln!("{e}");
        exit(1);
    });

    let options = ParseOptions::from(&config.parsing);
    let document = ParserRegistry::with_defaults()
        .parse_file(&path, scope, Arc::new(FsLocationResolver), &options)
        .unwrap_or_else(|e| {
            eprintln!("Error: {e}");
            exit(1);
        });

    for warning in &document.warnings {
        tracing::warn!(path = %document.path, "{warning}");
    }

    let output = format.serialize(&document).unwrap_or_else(|e| {
        eprintln!("Error: {e}");
        exit(1);
    });
    println!("{output}");
}

/// Handle the list-formats command
fn handle_list_formats_command() {
    println!("Available formats:\n");
    for format in OutputFormat::ALL {
        println!("  {}", format.name());
        println!("    {}", format.description());
    }
}

/// Handle the list-components command
fn handle_list_components_command() {
    println!("Available components:\n");
    for name in ComponentCatalog::with_defaults().list_components() {
        println!("  {name}");
    }
}
