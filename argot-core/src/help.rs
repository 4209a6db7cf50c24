//! Plain-text help listing.

use std::fmt;

use crate::command::CommandTable;
use crate::flags::FlagRegistry;

/// Renders registered commands and flags. Flag state is not shown.
pub struct HelpReporter<'a> {
    commands: &'a CommandTable,
    flags: &'a FlagRegistry,
}

impl<'a> HelpReporter<'a> {
    pub fn new(commands: &'a CommandTable, flags: &'a FlagRegistry) -> Self {
        Self { commands, flags }
    }

    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for HelpReporter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Available commands:")?;
        for command in self.commands.commands() {
            writeln!(f, "  {} - {}", command.usage(), command.description())?;
        }

        if !self.flags.is_empty() {
            writeln!(f, "Available flags:")?;
            for name in self.flags.names() {
                writeln!(f, "  {}", name)?;
            }
        }

        Ok(())
    }
}
