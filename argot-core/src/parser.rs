//! The caller-facing parser that owns all registries.

use std::fmt::Display;

use tracing::warn;

use crate::command::{CommandTable, Handler};
use crate::config::ParserConfig;
use crate::converter::ConverterRegistry;
use crate::dispatcher::{Dispatcher, Outcome};
use crate::error::{ConfigError, Result};
use crate::flags::FlagRegistry;
use crate::help::HelpReporter;

/// A set of commands, converters and flags.
///
/// Parsers are independent values; a process can hold as many as it likes.
/// Handlers are not required to be `Send`, so a parser stays on the thread
/// that built it.
///
/// ```
/// use argot_core::ArgParser;
///
/// let mut parser = ArgParser::new();
/// parser
///     .add_command("add", "Add two numbers", |a: i32, b: i32| println!("{}", a + b))
///     .unwrap();
/// parser.add_flag("--verbose").unwrap();
///
/// let outcome = parser.dispatch(&["add", "3", "4", "--verbose"]).unwrap();
/// assert!(outcome.is_executed());
/// assert!(parser.has_flag("--verbose"));
/// ```
#[derive(Debug, Default)]
pub struct ArgParser {
    converters: ConverterRegistry,
    commands: CommandTable,
    flags: FlagRegistry,
    dispatcher: Dispatcher,
}

impl ArgParser {
    /// Create a parser with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ParserConfig) -> std::result::Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            converters: ConverterRegistry::new(),
            commands: CommandTable::with_policy(config.duplicate_commands),
            flags: FlagRegistry::new(),
            dispatcher: Dispatcher::new(config.flag_prefix),
        })
    }

    /// Bind `handler` to `name`. Fails only under `DuplicatePolicy::Reject`.
    pub fn add_command<Args, H>(
        &mut self,
        name: impl Into<String>,
        description: impl Into<String>,
        handler: H,
    ) -> std::result::Result<(), ConfigError>
    where
        H: Handler<Args>,
    {
        self.commands.register(name, description, handler)
    }

    /// Add or replace the converter for `T`.
    pub fn add_conversion<T, E, F>(&mut self, converter: F)
    where
        T: 'static,
        E: Display,
        F: Fn(&str) -> std::result::Result<T, E> + 'static,
    {
        self.converters.register(converter);
    }

    /// Declare a flag. The name must start with the configured flag prefix,
    /// otherwise the dispatcher could never observe it.
    pub fn add_flag(&mut self, name: impl Into<String>) -> std::result::Result<(), ConfigError> {
        let name = name.into();
        let prefix = self.dispatcher.flag_prefix();
        if name.len() <= prefix.len() || !self.dispatcher.is_flag(&name) {
            warn!(flag = %name, prefix, "flag name does not carry the flag prefix");
            return Err(ConfigError::FlagWithoutPrefix {
                flag: name,
                prefix: prefix.to_string(),
            });
        }
        self.flags.register(name);
        Ok(())
    }

    pub fn has_flag(&self, name: &str) -> bool {
        self.flags.is_set(name)
    }

    /// Marker that distinguishes flag tokens from positional arguments.
    pub fn flag_prefix(&self) -> &str {
        self.dispatcher.flag_prefix()
    }

    /// Dispatch one command line; see [`Dispatcher::dispatch`].
    pub fn dispatch<S: AsRef<str>>(&mut self, tokens: &[S]) -> Result<Outcome> {
        self.dispatcher
            .dispatch(tokens, &self.commands, &self.converters, &mut self.flags)
    }

    pub fn help(&self) -> String {
        HelpReporter::new(&self.commands, &self.flags).render()
    }

    pub fn converters(&self) -> &ConverterRegistry {
        &self.converters
    }

    pub fn converters_mut(&mut self) -> &mut ConverterRegistry {
        &mut self.converters
    }

    pub fn commands(&self) -> &CommandTable {
        &self.commands
    }

    pub fn flags(&self) -> &FlagRegistry {
        &self.flags
    }

    pub fn flags_mut(&mut self) -> &mut FlagRegistry {
        &mut self.flags
    }
}
