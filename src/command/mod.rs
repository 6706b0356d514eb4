//! Command declaration, routing, execution and completion.
//!
//! ```text
//! HandlerDecl → parse → HandlerMetadata ─┐
//!                                        ├→ Command::route → Executor / completion
//! ResolverRegistry ──────────────────────┘
//! ```
//!
//! Each stage is a plain function over immutable metadata, so concurrent
//! dispatch needs no locking beyond the registry's read path.

mod completion;
mod executor;
mod matching;
mod metadata;
mod parser;
mod router;
mod usage;

pub use completion::complete;
pub use executor::{Executor, SENDER_REJECTED};
pub use matching::{eq_ignore_case, filter_partial, starts_with_ignore_case};
pub use metadata::{
    CommandEnum, EnumSpec, HandlerFn, HandlerKind, HandlerMetadata, ParamShape, ParameterSpec,
    SenderSpec,
};
pub use parser::{parse, parse_aliases, synthesize_usage, HandlerDecl};
pub use router::{Command, CommandBuilder, Outcome, Route};
pub use usage::{usage_line, usage_message, MessageFormatter, PlainFormatter};
