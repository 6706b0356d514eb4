//! Usage lines and user-facing error text.

use crate::command::metadata::HandlerMetadata;
use crate::config::Messages;
use crate::error::CommandError;

/// Turns a dispatch error into the line shown to the sender.
///
/// Hosts plug in their own to add colour or markup.
pub trait MessageFormatter: Send + Sync {
    fn format_error(&self, error: &CommandError) -> String;
}

/// Plain text from the configured [`Messages`].
#[derive(Debug, Clone, Default)]
pub struct PlainFormatter {
    messages: Messages,
}

impl PlainFormatter {
    pub fn new(messages: Messages) -> Self {
        Self { messages }
    }
}

impl MessageFormatter for PlainFormatter {
    fn format_error(&self, error: &CommandError) -> String {
        match error {
            CommandError::ArgumentCount => self.messages.usage_header_single.trim_end().to_string(),
            CommandError::NotPermitted { message } => message.clone(),
            CommandError::ResolverMissing { type_name } => {
                format!("{}{}", self.messages.resolver_missing, type_name)
            }
            CommandError::InvalidValue { token, type_name } => self
                .messages
                .invalid_value
                .replace("{token}", token)
                .replace("{type}", type_name),
            CommandError::Internal { .. } => self.messages.internal_error.clone(),
        }
    }
}

/// `/<command><usage> - <description>` or `/<command> <sub><usage> - <description>`.
pub fn usage_line(command: &str, handler: &HandlerMetadata) -> String {
    if handler.is_main() {
        format!("/{}{} - {}", command, handler.usage(), handler.description())
    } else {
        format!(
            "/{} {}{} - {}",
            command,
            handler.name(),
            handler.usage(),
            handler.description()
        )
    }
}

/// Wrap usage lines with the matching header.
pub fn usage_message(messages: &Messages, lines: &[String]) -> Vec<String> {
    match lines {
        [] => vec![messages.no_syntaxes.clone()],
        [single] => vec![messages.usage_header_single.clone(), single.clone()],
        many => std::iter::once(messages.usage_header_multiple.clone())
            .chain(many.iter().cloned())
            .collect(),
    }
}
