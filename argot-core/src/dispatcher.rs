//! Token classification and command dispatch.
//!
//! A dispatch call takes the raw tokens of one command line, where the first
//! token names the command. Remaining tokens that start with the flag prefix
//! are flags, wherever they appear; everything else is a positional argument.
//! Flags never take values and there is no end-of-flags marker.

use tracing::{debug, warn};

use crate::command::CommandTable;
use crate::converter::ConverterRegistry;
use crate::error::{DispatchError, ErrorKind, Result};
use crate::flags::FlagRegistry;
use crate::help::HelpReporter;

/// Tokens of one command line, split by role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub command: String,
    pub positional: Vec<String>,
    pub flags: Vec<String>,
}

/// How a dispatch call ended, short of a conversion error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The command's handler ran
    Executed { command: String },

    /// No handler ran; the caller should show `text`.
    ///
    /// `reason` is `None` when no command was given, otherwise an
    /// `UnknownCommand` or `InsufficientArguments` error.
    Help {
        reason: Option<DispatchError>,
        text: String,
    },
}

impl Outcome {
    pub fn is_executed(&self) -> bool {
        matches!(self, Outcome::Executed { .. })
    }

    /// Kind of the rejection that led to help, if any.
    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            Outcome::Help {
                reason: Some(reason),
                ..
            } => Some(reason.kind()),
            _ => None,
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.kind().map_or(0, ErrorKind::exit_code)
    }
}

/// Routes token sequences to commands. Holds no state between calls.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    flag_prefix: String,
}

impl Dispatcher {
    pub fn new(flag_prefix: impl Into<String>) -> Self {
        Self {
            flag_prefix: flag_prefix.into(),
        }
    }

    pub fn flag_prefix(&self) -> &str {
        &self.flag_prefix
    }

    pub fn is_flag(&self, token: &str) -> bool {
        token.starts_with(&self.flag_prefix)
    }

    /// Split tokens into command name, positional arguments and flags.
    ///
    /// Returns `None` when there is no command token.
    pub fn classify<S: AsRef<str>>(&self, tokens: &[S]) -> Option<Invocation> {
        let (command, rest) = tokens.split_first()?;

        let (flags, positional): (Vec<String>, Vec<String>) = rest
            .iter()
            .map(|token| token.as_ref().to_string())
            .partition(|token| self.is_flag(token));

        Some(Invocation {
            command: command.as_ref().to_string(),
            positional,
            flags,
        })
    }

    /// Dispatch one command line.
    ///
    /// Unknown commands and short argument lists are answered with
    /// [`Outcome::Help`]. Missing converters and unparsable tokens are
    /// returned as errors and the handler does not run.
    pub fn dispatch<S: AsRef<str>>(
        &self,
        tokens: &[S],
        commands: &CommandTable,
        converters: &ConverterRegistry,
        flags: &mut FlagRegistry,
    ) -> Result<Outcome> {
        let Some(invocation) = self.classify(tokens) else {
            debug!("no command given");
            return Ok(Self::help(None, commands, flags));
        };

        for flag in &invocation.flags {
            flags.observe(flag);
        }

        debug!(
            command = %invocation.command,
            positional = invocation.positional.len(),
            flags = invocation.flags.len(),
            "classified tokens"
        );

        let Some(command) = commands.lookup(&invocation.command) else {
            warn!(command = %invocation.command, "invalid command");
            let reason = DispatchError::UnknownCommand(invocation.command);
            return Ok(Self::help(Some(reason), commands, flags));
        };

        if !command.is_sufficient(&invocation.positional) {
            warn!(
                command = command.name(),
                required = command.arity(),
                supplied = invocation.positional.len(),
                "insufficient arguments"
            );
            let reason = DispatchError::InsufficientArguments {
                command: invocation.command,
                required: command.arity(),
                supplied: invocation.positional.len(),
            };
            return Ok(Self::help(Some(reason), commands, flags));
        }

        command.execute(converters, &invocation.positional)?;
        debug!(command = command.name(), "executed command");

        Ok(Outcome::Executed {
            command: invocation.command,
        })
    }

    fn help(reason: Option<DispatchError>, commands: &CommandTable, flags: &FlagRegistry) -> Outcome {
        Outcome::Help {
            reason,
            text: HelpReporter::new(commands, flags).render(),
        }
    }
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new("--")
    }
}
