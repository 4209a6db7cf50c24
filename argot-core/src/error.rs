//! Error types for argot.

use std::path::PathBuf;

use thiserror::Error;

/// Broad category of a dispatch failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A handler parameter type has no registered converter
    UnknownType,

    /// A token could not be parsed into its declared type
    ConversionFailure,

    /// No command is registered under the dispatched name
    UnknownCommand,

    /// Fewer positional arguments than the command's arity
    InsufficientArguments,
}

impl ErrorKind {
    /// Process exit status a host program should report for this kind.
    pub fn exit_code(self) -> u8 {
        match self {
            ErrorKind::UnknownCommand => 2,
            ErrorKind::InsufficientArguments => 3,
            ErrorKind::UnknownType => 4,
            ErrorKind::ConversionFailure => 5,
        }
    }
}

/// Errors raised while dispatching a token sequence.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DispatchError {
    #[error("No converter registered for type {type_name}")]
    UnknownType { type_name: &'static str },

    #[error("Cannot convert '{token}' to {type_name}: {reason}")]
    ConversionFailure {
        token: String,
        type_name: &'static str,
        reason: String,
    },

    #[error("Invalid command: {0}")]
    UnknownCommand(String),

    #[error("Insufficient arguments for {command}: expected {required}, got {supplied}")]
    InsufficientArguments {
        command: String,
        required: usize,
        supplied: usize,
    },
}

impl DispatchError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            DispatchError::UnknownType { .. } => ErrorKind::UnknownType,
            DispatchError::ConversionFailure { .. } => ErrorKind::ConversionFailure,
            DispatchError::UnknownCommand(_) => ErrorKind::UnknownCommand,
            DispatchError::InsufficientArguments { .. } => ErrorKind::InsufficientArguments,
        }
    }
}

/// Errors raised while configuring a parser.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Flag prefix must not be empty")]
    EmptyFlagPrefix,

    #[error("Command already registered: {0}")]
    DuplicateCommand(String),

    #[error("Flag {flag} does not start with the flag prefix '{prefix}'")]
    FlagWithoutPrefix { flag: String, prefix: String },
}

/// Result type alias for dispatch operations
pub type Result<T> = std::result::Result<T, DispatchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_are_distinct_and_nonzero() {
        let kinds = [
            ErrorKind::UnknownType,
            ErrorKind::ConversionFailure,
            ErrorKind::UnknownCommand,
            ErrorKind::InsufficientArguments,
        ];
        let mut codes: Vec<u8> = kinds.iter().map(|k| k.exit_code()).collect();
        assert!(codes.iter().all(|&c| c != 0));
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), kinds.len());
    }

    #[test]
    fn kind_matches_variant() {
        let err = DispatchError::InsufficientArguments {
            command: "add".to_string(),
            required: 2,
            supplied: 1,
        };
        assert_eq!(err.kind(), ErrorKind::InsufficientArguments);
        assert_eq!(
            err.to_string(),
            "Insufficient arguments for add: expected 2, got 1"
        );
        assert_eq!(
            DispatchError::UnknownCommand("nope".into()).to_string(),
            "Invalid command: nope"
        );
    }
}
