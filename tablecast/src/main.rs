//! # tablecast
//!
//! A CLI for rendering JSON table documents as HTML fragments or CSV exports.
//!
//! ## Overview
//!
//! tablecast is built on top of tablecastlib. It reads one table document,
//! builds the table (rejecting values that cannot be rendered) and writes
//! either format from the same description.
//!
//! ## Usage
//!
//! ```bash
//! # HTML fragment on stdout
//! tablecast render people.json
//!
//! # CSV export to a file
//! tablecast render people.json --format csv --output people.csv
//!
//! # Show datetimes in another zone
//! tablecast render people.json --timezone Europe/Paris
//!
//! # Date patterns and timezone from a file
//! tablecast render people.json --options render.json
//!
//! # One line per row, for eyeballing what was parsed
//! tablecast inspect people.json
//! ```
//!
//! Set `TABLECAST_LOG=debug` (or `trace`) to see what the library does.

mod document;

use std::fs;
use std::io::{self, Read};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Arg, ArgMatches, Command};
use console::Style;
use tablecastlib::{Format, RenderOptions, Table};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use crate::document::TableDocument;

/// Environment variable holding the log filter
const LOG_ENV: &str = "TABLECAST_LOG";

/// Build the clap Command structure
fn build_command() -> Command {
    Command::new("tablecast")
        .version(env!("CARGO_PKG_VERSION"))
        .author("Arthur Debert")
        .about("Render one table description as an HTML fragment or a CSV export")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("render")
                .about("Render a table document")
                .arg(
                    Arg::new("input")
                        .required(true)
                        .help("Table document (JSON), or - for stdin"),
                )
                .arg(
                    Arg::new("format")
                        .short('f')
                        .long("format")
                        .default_value("html")
                        .value_parser(["html", "csv"])
                        .help("Output format"),
                )
                .arg(
                    Arg::new("output")
                        .short('o')
                        .long("output")
                        .help("Write to this file instead of stdout"),
                )
                .arg(
                    Arg::new("options")
                        .long("options")
                        .help("Render options file (JSON)"),
                )
                .arg(
                    Arg::new("timezone")
                        .short('z')
                        .long("timezone")
                        .help("Timezone for datetimes, e.g. America/New_York"),
                ),
        )
        .subcommand(
            Command::new("inspect")
                .about("Print each parsed row on one line")
                .arg(
                    Arg::new("input")
                        .required(true)
                        .help("Table document (JSON), or - for stdin"),
                ),
        )
}

/// Read the input file, or stdin for `-`
fn read_input(path: &str) -> Result<String> {
    if path == "-" {
        let mut text = String::new();
        io::stdin()
            .read_to_string(&mut text)
            .context("failed to read stdin")?;
        Ok(text)
    } else {
        fs::read_to_string(path).with_context(|| format!("failed to read '{}'", path))
    }
}

/// Build render options from `--options` and `--timezone`
fn load_options(matches: &ArgMatches) -> Result<RenderOptions> {
    let mut options = match matches.get_one::<String>("options") {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("failed to read options file '{}'", path))?;
            serde_json::from_str::<RenderOptions>(&text)
                .with_context(|| format!("invalid options file '{}'", path))?
        }
        None => RenderOptions::default(),
    };
    if let Some(name) = matches.get_one::<String>("timezone") {
        options = options.with_timezone(RenderOptions::parse_timezone(name)?);
    }
    options.validate()?;
    Ok(options)
}

fn load_table(path: &str, options: RenderOptions) -> Result<Table> {
    let text = read_input(path)?;
    let table = TableDocument::parse(&text)?.into_table(options)?;
    debug!(
        input = path,
        headers = table.headers().len(),
        rows = table.rows().len(),
        "loaded table document"
    );
    Ok(table)
}

/// Handler for the render command
fn render_handler(matches: &ArgMatches) -> Result<()> {
    let input = matches
        .get_one::<String>("input")
        .map(|s| s.as_str())
        .unwrap_or("-");
    let format: Format = matches
        .get_one::<String>("format")
        .map(|s| s.as_str())
        .unwrap_or("html")
        .parse()?;
    let options = load_options(matches)?;
    let table = load_table(input, options)?;

    match (format, matches.get_one::<String>("output")) {
        (Format::Html, Some(path)) => {
            fs::write(path, table.render_html() + "\n")
                .with_context(|| format!("failed to write '{}'", path))?;
        }
        (Format::Html, None) => println!("{}", table.render_html()),
        (Format::Csv, Some(path)) => {
            let mut writer = csv::Writer::from_path(path)
                .with_context(|| format!("failed to create '{}'", path))?;
            table.write_csv(&mut writer)?;
            writer.flush()?;
        }
        (Format::Csv, None) => print!("{}", table.to_csv_string()?),
    }
    Ok(())
}

/// Handler for the inspect command
fn inspect_handler(matches: &ArgMatches) -> Result<()> {
    let input = matches
        .get_one::<String>("input")
        .map(|s| s.as_str())
        .unwrap_or("-");
    let table = load_table(input, RenderOptions::default())?;
    let dim = Style::new().dim();

    let headers: Vec<String> = table.headers().iter().map(ToString::to_string).collect();
    println!("{} [{}]", dim.apply_to("headers"), headers.join(", "));
    for (index, row) in table.rows().iter().enumerate() {
        println!("{} {}", dim.apply_to(format!("{:>4}", index)), row);
    }
    Ok(())
}

/// Log to stderr so stdout carries only rendered output
fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn main() -> ExitCode {
    init_tracing();
    let matches = build_command().get_matches();

    let result = match matches.subcommand() {
        Some(("render", sub)) => render_handler(sub),
        Some(("inspect", sub)) => inspect_handler(sub),
        _ => Ok(()),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            let label = Style::new().for_stderr().red().bold();
            eprintln!("{} {:#}", label.apply_to("Error:"), e);
            ExitCode::FAILURE
        }
    }
}
