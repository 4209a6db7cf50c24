mod demo;
mod output;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use argot_core::{ArgParser, DispatchError, Outcome, ParserConfig};
use colored::Colorize;
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Environment variable naming an optional TOML parser config.
const CONFIG_ENV: &str = "ARGOT_CONFIG";

/// Exit status when the parser cannot be set up.
const SETUP_FAILURE: u8 = 1;

fn main() -> ExitCode {
    init_tracing();

    match run() {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            eprintln!("{} {:#}", "error:".bright_red().bold(), e);
            ExitCode::from(SETUP_FAILURE)
        }
    }
}

fn run() -> Result<u8> {
    let config = load_config(std::env::var_os(CONFIG_ENV).map(PathBuf::from))?;
    let mut parser = build_parser(config)?;

    let tokens: Vec<String> = std::env::args().skip(1).collect();
    debug!(?tokens, "dispatching");

    let result = parser.dispatch(&tokens);
    match &result {
        Ok(outcome) => {
            output::render_outcome(outcome);
            if let Some(command) = verbose_command(&parser, outcome) {
                output::render_verbose(command);
            }
        }
        Err(err) => output::render_error(err),
    }
    Ok(exit_code_for(&result))
}

fn load_config(path: Option<PathBuf>) -> Result<ParserConfig> {
    match path {
        Some(path) => ParserConfig::load(&path)
            .with_context(|| format!("Failed to load config from {}", path.display())),
        None => Ok(ParserConfig::default()),
    }
}

fn build_parser(config: ParserConfig) -> Result<ArgParser> {
    let mut parser = ArgParser::with_config(config)?;
    demo::register(&mut parser)?;
    Ok(parser)
}

fn exit_code_for(result: &std::result::Result<Outcome, DispatchError>) -> u8 {
    match result {
        Ok(outcome) => outcome.exit_code(),
        Err(err) => err.kind().exit_code(),
    }
}

/// The command to report as executed, when verbose output was asked for.
fn verbose_command<'a>(parser: &ArgParser, outcome: &'a Outcome) -> Option<&'a str> {
    match outcome {
        Outcome::Executed { command } if parser.has_flag(&demo::verbose_flag(parser)) => {
            Some(command.as_str())
        }
        _ => None,
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("argot=warn,argot_core=warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
