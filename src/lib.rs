//! Platform-agnostic command resolution engine.
//!
//! Hosts declare handlers with [`command::HandlerDecl`], group them into a
//! [`command::Command`], and feed it pre-split argument tokens:
//!
//! ```text
//! tokens → Router (pick handler) → Executor (bind arguments) → handler
//!        ↘ Router → Completion engine → suggestions
//! ```
//!
//! Type coercion and suggestion providers live in a shared
//! [`resolvers::ResolverRegistry`] that the host populates at startup.

pub mod command;
pub mod config;
pub mod error;
pub mod logging;
pub mod resolvers;
pub mod sender;

pub use command::{Command, CommandBuilder, HandlerDecl, Outcome, ParameterSpec};
pub use error::{CommandError, DeclarationError, ErrorKind};
pub use resolvers::{Arguments, ResolverRegistry, TypeKey};
pub use sender::Sender;
