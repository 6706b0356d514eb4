//! Type coercion and completion providers.
//!
//! ```text
//! raw token → ResolverRegistry::resolve_type(TypeKey) → Value → Arguments
//! ```

mod builtin;
mod registry;
mod value;

pub(crate) use builtin::is_bool_literal;
pub use registry::{CompletionFn, CompletionKey, ResolverRegistry, TypeResolverFn};
pub use value::{Arguments, Bound, TypeKey, Value};
