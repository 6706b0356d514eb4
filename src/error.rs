//! Error types for dispatch and declaration.
//!
//! Dispatch failures are returned as [`CommandError`] values, never panics.
//! Misconfiguration is caught once, when a command is built, as
//! [`DeclarationError`].

use thiserror::Error;

/// Why a dispatch did not run the handler to completion.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    /// Fewer tokens than required parameters.
    #[error("Not enough arguments")]
    ArgumentCount,

    /// Sender type rejected or permission tag missing.
    #[error("{message}")]
    NotPermitted { message: String },

    /// No coercion function registered for a parameter type.
    #[error("No resolver registered for type '{type_name}'")]
    ResolverMissing { type_name: String },

    /// A token failed coercion to its parameter type.
    #[error("Cannot resolve parameter '{token}' for type {type_name}")]
    InvalidValue { token: String, type_name: String },

    /// The handler body failed. The cause is logged, not carried.
    #[error("Handler '{handler}' failed")]
    Internal { handler: String },
}

/// Fieldless mirror of [`CommandError`] for hosts that only branch on kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    ArgumentCount,
    NotPermitted,
    ResolverMissing,
    InvalidValue,
    Internal,
}

impl CommandError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            CommandError::ArgumentCount => ErrorKind::ArgumentCount,
            CommandError::NotPermitted { .. } => ErrorKind::NotPermitted,
            CommandError::ResolverMissing { .. } => ErrorKind::ResolverMissing,
            CommandError::InvalidValue { .. } => ErrorKind::InvalidValue,
            CommandError::Internal { .. } => ErrorKind::Internal,
        }
    }

    pub(crate) fn not_permitted(message: impl Into<String>) -> Self {
        CommandError::NotPermitted {
            message: message.into(),
        }
    }

    pub(crate) fn invalid_value(token: &str, type_name: &str) -> Self {
        CommandError::InvalidValue {
            token: token.to_string(),
            type_name: type_name.to_string(),
        }
    }
}

/// Errors raised while building a command from its declarations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeclarationError {
    #[error("Command '{command}' declares more than one main handler")]
    DuplicateMain { command: String },

    #[error("Command or subcommand name must not be empty")]
    MissingName,

    #[error("Parameter at position {position} has no name")]
    MissingParameterName { position: usize },

    #[error("Greedy parameter '{parameter}' must be declared last")]
    GreedyNotLast { parameter: String },

    #[error("Repeated parameter '{parameter}' must be declared last")]
    RepeatedNotLast { parameter: String },
}
