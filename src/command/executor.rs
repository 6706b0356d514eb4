//! Parameter resolution and handler invocation.
//!
//! ```text
//! tokens → count check → sender check → bind each parameter → invoke
//! ```
//!
//! Every failure is decided before the handler runs, so a handler either
//! runs with a fully bound argument vector or not at all.

use std::panic::{self, AssertUnwindSafe};

use crate::command::metadata::{HandlerMetadata, ParameterSpec};
use crate::error::CommandError;
use crate::resolvers::{Arguments, Bound, ResolverRegistry, Value};
use crate::sender::Sender;

/// Message carried by `NotPermitted` when the sender type is rejected.
pub const SENDER_REJECTED: &str = "You are not allowed to execute this command.";

/// Binds tokens to one handler's parameters and invokes it.
///
/// Tokens are parameter tokens only: a subcommand's own literal has already
/// been stripped (see [`HandlerMetadata::parameter_tokens`]).
pub struct Executor<'a> {
    handler: &'a HandlerMetadata,
    registry: &'a ResolverRegistry,
}

impl<'a> Executor<'a> {
    pub fn new(handler: &'a HandlerMetadata, registry: &'a ResolverRegistry) -> Self {
        Self { handler, registry }
    }

    /// Resolve and invoke.
    pub fn execute(&self, sender: &dyn Sender, tokens: &[&str]) -> Result<(), CommandError> {
        let arguments = self.resolve(sender, tokens)?;
        self.invoke(sender, arguments)
    }

    /// Resolve every parameter without invoking the handler.
    pub fn resolve(&self, sender: &dyn Sender, tokens: &[&str]) -> Result<Arguments, CommandError> {
        if tokens.len() < self.handler.required_count() {
            return Err(CommandError::ArgumentCount);
        }

        if !self.handler.sender_spec().accepts_sender(sender) {
            tracing::debug!(
                handler = %self.handler.name(),
                sender = %sender.name(),
                expected = %self.handler.sender_spec().type_name(),
                "Sender type rejected"
            );
            return Err(CommandError::not_permitted(SENDER_REJECTED));
        }

        let parameters = self.handler.parameters();
        let mut arguments = Arguments::with_capacity(parameters.len());

        for (index, parameter) in parameters.iter().enumerate() {
            let Some(&token) = tokens.get(index) else {
                if !parameter.is_optional() {
                    return Err(CommandError::ArgumentCount);
                }
                // Greedy text always binds a string, even an empty one.
                if parameter.is_greedy() && parameter.is_textual() {
                    arguments.push(Bound::Single(Box::new(String::new())));
                } else {
                    arguments.push(Bound::Absent);
                }
                continue;
            };

            if let Some(spec) = parameter.enum_spec() {
                let value = spec
                    .coerce(token)
                    .ok_or_else(|| invalid(token, parameter))?;
                arguments.push(Bound::Single(value));
                continue;
            }

            let Some(resolve) = self.registry.resolve_type(parameter.type_key()) else {
                tracing::warn!(
                    handler = %self.handler.name(),
                    parameter = %parameter.name(),
                    type_name = %parameter.type_key(),
                    "No resolver registered for parameter type"
                );
                return Err(CommandError::ResolverMissing {
                    type_name: parameter.type_key().name().to_string(),
                });
            };

            if parameter.is_greedy() && parameter.is_textual() {
                arguments.push(Bound::Single(Box::new(tokens[index..].join(" "))));
                break;
            }

            if parameter.is_repeated() {
                let values = tokens[index..]
                    .iter()
                    .map(|&token| resolve(token).ok_or_else(|| invalid(token, parameter)))
                    .collect::<Result<Vec<Value>, _>>()?;
                arguments.push(Bound::Many(values));
                break;
            }

            let value = resolve(token).ok_or_else(|| invalid(token, parameter))?;
            arguments.push(Bound::Single(value));
        }

        Ok(arguments)
    }

    /// Run the handler body. Errors and panics become `Internal`; the
    /// concrete cause only reaches the log.
    pub fn invoke(&self, sender: &dyn Sender, arguments: Arguments) -> Result<(), CommandError> {
        let handler = &self.handler.handler;
        let result = panic::catch_unwind(AssertUnwindSafe(|| handler(sender, arguments)));

        let cause = match result {
            Ok(Ok(())) => return Ok(()),
            Ok(Err(err)) => format!("{:#}", err),
            Err(payload) => panic_message(payload.as_ref()),
        };

        tracing::error!(
            handler = %self.handler.name(),
            sender = %sender.name(),
            error = %cause,
            "Command handler failed"
        );
        Err(CommandError::Internal {
            handler: self.handler.name().to_string(),
        })
    }
}

fn invalid(token: &str, parameter: &ParameterSpec) -> CommandError {
    CommandError::invalid_value(token, parameter.type_key().name())
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        format!("panic: {}", message)
    } else if let Some(message) = payload.downcast_ref::<String>() {
        format!("panic: {}", message)
    } else {
        "panic with non-string payload".to_string()
    }
}
