//! Command-line interface for fnlang
//! Parses fnlang source with a chosen grammar rule and prints the resulting AST.
//!
//! Usage:
//!   fnlang `<code>` [--rule `<rule>`] [--format json|tree]   - Parse code given as an argument
//!   fnlang --file `<path>` [--rule `<rule>`]                  - Parse a file
//!   fnlang --explain-operators [`<symbol>`]                 - Print the operator table, or
//!                                                             classify a single symbol
//!
//! Source is read from stdin when neither code nor `--file` is given.

use clap::{Arg, ArgAction, ArgMatches, Command};
use fnlang_parser::fnlang::config::{FnlangConfig, Loader, OutputFormat};
use fnlang_parser::fnlang::parsing::{operators, Parser, Rule};
use std::io::Read;
use tracing_subscriber::EnvFilter;

/// Layered under `--config` when present in the working directory
const LOCAL_CONFIG: &str = "fnlang.toml";

fn main() {
    let matches = Command::new("fnlang")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Parse fnlang source and print its AST")
        .arg(
            Arg::new("code")
                .help("Source code to parse")
                .index(1)
                .conflicts_with("file"),
        )
        .arg(
            Arg::new("rule")
                .long("rule")
                .short('r')
                .help("Grammar rule (program, expr, type_instance, block, assignment, type_def, type_alias)"),
        )
        .arg(
            Arg::new("file")
                .long("file")
                .short('f')
                .help("Read the source from a file"),
        )
        .arg(
            Arg::new("format")
                .long("format")
                .value_parser(["json", "tree"])
                .help("Output format (default from configuration: json)"),
        )
        .arg(
            Arg::new("compact")
                .long("compact")
                .help("Print JSON on a single line")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .help("Configuration file layered over the defaults"),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Log pipeline stages to stderr")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("explain-operators")
                .long("explain-operators")
                .value_name("SYMBOL")
                .num_args(0..=1)
                .default_missing_value("")
                .help("List the named operators, or show how SYMBOL binds"),
        )
        .get_matches();

    init_logging(matches.get_flag("verbose"));

    if let Some(symbol) = matches.get_one::<String>("explain-operators") {
        handle_explain_operators_command(symbol);
        return;
    }

    let config = load_config(&matches).unwrap_or_else(|e| {
        eprintln!("Configuration error: {}", e);
        std::process::exit(2);
    });

    let rule = match matches.get_one::<String>("rule") {
        Some(name) => name.parse::<Rule>().unwrap_or_else(|e| {
            eprintln!("{}", e);
            std::process::exit(2);
        }),
        None => config.output.default_rule,
    };

    let source = read_source(&matches).unwrap_or_else(|e| {
        eprintln!("Error reading input: {}", e);
        std::process::exit(2);
    });

    handle_parse_command(&config, rule, &source);
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        return;
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(matches: &ArgMatches) -> Result<FnlangConfig, config::ConfigError> {
    let mut loader = Loader::new().with_optional_file(LOCAL_CONFIG);
    if let Some(path) = matches.get_one::<String>("config") {
        loader = loader.with_file(path);
    }
    if let Some(format) = matches.get_one::<String>("format") {
        loader = loader.set_override("output.format", format.as_str())?;
    }
    if matches.get_flag("compact") {
        loader = loader.set_override("output.pretty", false)?;
    }
    loader.build()
}

fn read_source(matches: &ArgMatches) -> std::io::Result<String> {
    if let Some(path) = matches.get_one::<String>("file") {
        return std::fs::read_to_string(path);
    }
    if let Some(code) = matches.get_one::<String>("code") {
        return Ok(code.clone());
    }
    let mut source = String::new();
    std::io::stdin().read_to_string(&mut source)?;
    Ok(source)
}

/// Parse and print; failures print `no result` with the reason and exit with status 1
fn handle_parse_command(config: &FnlangConfig, rule: Rule, source: &str) {
    let parser = Parser::new(config.limits.clone());
    let node = parser.try_parse(source, rule).unwrap_or_else(|e| {
        eprintln!("no result: {}", e);
        std::process::exit(1);
    });

    let formatted = match config.output.format {
        OutputFormat::Tree => node.to_string(),
        OutputFormat::Json => {
            let json = node.to_json();
            let rendered = if config.output.pretty {
                serde_json::to_string_pretty(&json)
            } else {
                serde_json::to_string(&json)
            };
            rendered.unwrap_or_else(|e| {
                eprintln!("Error formatting JSON: {}", e);
                std::process::exit(1);
            })
        }
    };

    println!("{}", formatted.trim_end());
}

/// An empty symbol lists the whole table
fn handle_explain_operators_command(symbol: &str) {
    if !symbol.is_empty() {
        match operators::lookup(symbol) {
            Some(info) => println!("{}", info),
            None => {
                eprintln!("`{}` is not an operator symbol", symbol);
                std::process::exit(1);
            }
        }
        return;
    }

    println!("Named operators, tightest binding first:\n");
    for info in operators::known_operators() {
        println!("  {}", info);
    }
    println!();
    println!(
        "Other operator symbols bind tightest (precedence {}) and are right-associative.",
        operators::UNKNOWN_PRECEDENCE
    );
    println!("`__name__` between operands applies `name` and binds tighter still.");
}
