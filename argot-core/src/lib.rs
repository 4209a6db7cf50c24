//! Typed command dispatch for command line programs.
//!
//! Commands are bound to ordinary functions or closures. Each parameter of a
//! handler is filled from one positional token, converted with the converter
//! registered for the parameter's type. Flags are presence-only switches
//! recognised by their prefix anywhere after the command name.

mod command;
mod config;
mod converter;
mod dispatcher;
mod error;
mod flags;
mod help;
mod parser;

pub use command::{Command, CommandTable, Handler};
pub use config::{DuplicatePolicy, ParserConfig};
pub use converter::ConverterRegistry;
pub use dispatcher::{Dispatcher, Invocation, Outcome};
pub use error::{ConfigError, DispatchError, ErrorKind, Result};
pub use flags::FlagRegistry;
pub use help::HelpReporter;
pub use parser::ArgParser;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
