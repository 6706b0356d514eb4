//! Resolver registry — single source of truth for type coercion and suggestions.
//!
//! Populated by the host at startup, then shared read-only by every command.
//! Registration is last-write-wins per key. The maps sit behind `RwLock`s so
//! late registration stays sound, but dispatch never writes.

use std::any::Any;
use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::resolvers::builtin;
use crate::resolvers::value::{TypeKey, Value};
use crate::sender::Sender;

/// Coerces one raw token into a typed value. `None` means the token is invalid.
pub type TypeResolverFn = Arc<dyn Fn(&str) -> Option<Value> + Send + Sync>;

/// Produces suggestion candidates for the token currently being typed.
pub type CompletionFn = Arc<dyn Fn(&dyn Sender, &str) -> Vec<String> + Send + Sync>;

/// Key for a completion provider: a parameter type or a named tag.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CompletionKey {
    Type(TypeKey),
    Tag(String),
}

impl From<TypeKey> for CompletionKey {
    fn from(key: TypeKey) -> Self {
        CompletionKey::Type(key)
    }
}

impl From<&str> for CompletionKey {
    fn from(tag: &str) -> Self {
        CompletionKey::Tag(tag.to_string())
    }
}

const DEFAULT_TAG_MARKER: char = '@';

pub struct ResolverRegistry {
    types: RwLock<HashMap<TypeKey, TypeResolverFn>>,
    completions: RwLock<HashMap<CompletionKey, CompletionFn>>,
    tag_marker: char,
}

impl Default for ResolverRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ResolverRegistry {
    /// Registry pre-populated with the built-in resolvers
    /// (`String`, `bool`, `i32`, `f64`, `f32`, `i64`, `Uuid`).
    pub fn new() -> Self {
        let registry = Self::empty();
        builtin::install(&registry);
        registry
    }

    /// Registry with nothing registered.
    pub fn empty() -> Self {
        Self {
            types: RwLock::new(HashMap::new()),
            completions: RwLock::new(HashMap::new()),
            tag_marker: DEFAULT_TAG_MARKER,
        }
    }

    /// Change the single leading character stripped from tag lookups.
    pub fn with_tag_marker(mut self, marker: char) -> Self {
        self.tag_marker = marker;
        self
    }

    pub fn tag_marker(&self) -> char {
        self.tag_marker
    }

    /// Register a coercion function for `T`.
    pub fn register_type<T, F>(&self, resolve: F)
    where
        T: Any + Send + Sync,
        F: Fn(&str) -> Option<T> + Send + Sync + 'static,
    {
        let erased: TypeResolverFn = Arc::new(move |token: &str| {
            resolve(token).map(|value| Box::new(value) as Value)
        });
        self.register_type_resolver(TypeKey::of::<T>(), erased);
    }

    /// Register an already type-erased coercion function.
    pub fn register_type_resolver(&self, key: TypeKey, resolve: TypeResolverFn) {
        let replaced = self.types.write().insert(key, resolve).is_some();
        tracing::trace!(type_name = %key, replaced, "Registered type resolver");
    }

    /// Register a completion provider under a type or tag key.
    ///
    /// Tag keys are stored without their marker character.
    pub fn register_completion<F>(&self, key: impl Into<CompletionKey>, complete: F)
    where
        F: Fn(&dyn Sender, &str) -> Vec<String> + Send + Sync + 'static,
    {
        let key = match key.into() {
            CompletionKey::Tag(tag) => CompletionKey::Tag(self.strip_marker(&tag).to_string()),
            key => key,
        };
        tracing::trace!(key = ?key, "Registered completion provider");
        self.completions.write().insert(key, Arc::new(complete));
    }

    /// Register a completion provider for values of type `T`.
    pub fn register_type_completion<T, F>(&self, complete: F)
    where
        T: Any,
        F: Fn(&dyn Sender, &str) -> Vec<String> + Send + Sync + 'static,
    {
        self.register_completion(TypeKey::of::<T>(), complete);
    }

    /// Register one provider under several tags at once.
    pub fn register_tags<F>(&self, tags: &[&str], complete: F)
    where
        F: Fn(&dyn Sender, &str) -> Vec<String> + Send + Sync + 'static,
    {
        let shared: CompletionFn = Arc::new(complete);
        let mut completions = self.completions.write();
        for tag in tags {
            let key = CompletionKey::Tag(self.strip_marker(tag).to_string());
            completions.insert(key, Arc::clone(&shared));
        }
    }

    /// Look up the coercion function for a type.
    ///
    /// Repeated parameters store their element type, so this also serves them.
    pub fn resolve_type(&self, key: TypeKey) -> Option<TypeResolverFn> {
        self.types.read().get(&key).cloned()
    }

    /// Look up a tag provider. `@players` and `players` are equivalent.
    pub fn lookup_completion(&self, tag: &str) -> Option<CompletionFn> {
        let key = CompletionKey::Tag(self.strip_marker(tag).to_string());
        self.completions.read().get(&key).cloned()
    }

    /// Look up the provider registered for a type.
    pub fn type_completion(&self, key: TypeKey) -> Option<CompletionFn> {
        self.completions.read().get(&CompletionKey::Type(key)).cloned()
    }

    fn strip_marker<'a>(&self, tag: &'a str) -> &'a str {
        tag.strip_prefix(self.tag_marker).unwrap_or(tag)
    }
}
