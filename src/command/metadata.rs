//! Handler metadata — immutable descriptors built once per declared handler.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use crate::command::matching::eq_ignore_case;
use crate::resolvers::{Arguments, TypeKey, Value};
use crate::sender::Sender;

/// The invocable bound to a handler: sender first, then declared parameters.
pub type HandlerFn = Arc<dyn Fn(&dyn Sender, Arguments) -> anyhow::Result<()> + Send + Sync>;

/// Enumerations usable as parameter types.
///
/// Tokens match variant names case-insensitively; completion offers the
/// names lower-cased, in declaration order.
pub trait CommandEnum: Clone + Send + Sync + 'static {
    fn variants() -> &'static [Self];
    fn name(&self) -> &'static str;
}

/// Variant names plus a type-erased coercion for one enum type.
#[derive(Clone)]
pub struct EnumSpec {
    names: Vec<&'static str>,
    coerce: Arc<dyn Fn(&str) -> Option<Value> + Send + Sync>,
}

impl EnumSpec {
    fn of<E: CommandEnum>() -> Self {
        Self {
            names: E::variants().iter().map(|variant| variant.name()).collect(),
            coerce: Arc::new(|token: &str| {
                E::variants()
                    .iter()
                    .find(|variant| eq_ignore_case(variant.name(), token))
                    .map(|variant| Box::new(variant.clone()) as Value)
            }),
        }
    }

    pub fn names(&self) -> &[&'static str] {
        &self.names
    }

    pub fn accepts(&self, token: &str) -> bool {
        self.names.iter().any(|name| eq_ignore_case(name, token))
    }

    pub(crate) fn coerce(&self, token: &str) -> Option<Value> {
        (self.coerce)(token)
    }

    /// Candidates for completion: every name, lower-cased.
    pub fn suggestions(&self) -> Vec<String> {
        self.names.iter().map(|name| name.to_lowercase()).collect()
    }
}

/// How many tokens a parameter consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamShape {
    /// Exactly one token.
    Single,
    /// Every remaining token, each coerced with the element type.
    Repeated,
}

/// One declared parameter after the sender.
#[derive(Clone)]
pub struct ParameterSpec {
    name: String,
    ty: TypeKey,
    shape: ParamShape,
    optional: bool,
    greedy: bool,
    completion: Option<String>,
    enumeration: Option<EnumSpec>,
}

impl ParameterSpec {
    /// A single-token parameter of type `T`.
    pub fn new<T: Any>(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ty: TypeKey::of::<T>(),
            shape: ParamShape::Single,
            optional: false,
            greedy: false,
            completion: None,
            enumeration: None,
        }
    }

    /// Shorthand for a `String` parameter.
    pub fn text(name: impl Into<String>) -> Self {
        Self::new::<String>(name)
    }

    /// A trailing parameter collecting every remaining token as `T`.
    pub fn repeated<T: Any>(name: impl Into<String>) -> Self {
        Self {
            shape: ParamShape::Repeated,
            ..Self::new::<T>(name)
        }
    }

    /// An enumeration parameter.
    pub fn enumeration<E: CommandEnum>(name: impl Into<String>) -> Self {
        Self {
            enumeration: Some(EnumSpec::of::<E>()),
            ..Self::new::<E>(name)
        }
    }

    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    /// Consume the rest of the line, joined by single spaces (text only).
    pub fn greedy(mut self) -> Self {
        self.greedy = true;
        self
    }

    /// Suggest from the provider registered under `tag` (e.g. `@players`).
    pub fn completion(mut self, tag: impl Into<String>) -> Self {
        self.completion = Some(tag.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Semantic type; the element type for repeated parameters.
    pub fn type_key(&self) -> TypeKey {
        self.ty
    }

    pub fn shape(&self) -> ParamShape {
        self.shape
    }

    pub fn is_optional(&self) -> bool {
        self.optional
    }

    pub fn is_greedy(&self) -> bool {
        self.greedy
    }

    pub fn is_repeated(&self) -> bool {
        self.shape == ParamShape::Repeated
    }

    pub fn is_textual(&self) -> bool {
        self.ty.is::<String>()
    }

    /// Greedy text or repeated: swallows every remaining token.
    pub fn is_trailing(&self) -> bool {
        self.is_repeated() || (self.greedy && self.is_textual())
    }

    pub fn completion_tag(&self) -> Option<&str> {
        self.completion.as_deref()
    }

    pub fn enum_spec(&self) -> Option<&EnumSpec> {
        self.enumeration.as_ref()
    }

    /// Rendered usage fragment: `<name>` or `<name...>`.
    pub fn usage_fragment(&self) -> String {
        match self.shape {
            ParamShape::Single => format!("<{}>", self.name),
            ParamShape::Repeated => format!("<{}...>", self.name),
        }
    }
}

impl fmt::Debug for ParameterSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParameterSpec")
            .field("name", &self.name)
            .field("type", &self.ty)
            .field("shape", &self.shape)
            .field("optional", &self.optional)
            .field("greedy", &self.greedy)
            .field("completion", &self.completion)
            .field("enum", &self.enumeration.as_ref().map(EnumSpec::names))
            .finish()
    }
}

/// Which senders a handler accepts in its first position.
#[derive(Clone)]
pub struct SenderSpec {
    type_name: &'static str,
    accepts: Arc<dyn Fn(&dyn Sender) -> bool + Send + Sync>,
}

impl SenderSpec {
    /// Any sender.
    pub fn any() -> Self {
        Self {
            type_name: "any",
            accepts: Arc::new(|_: &dyn Sender| true),
        }
    }

    /// Only senders whose concrete type is `T`.
    pub fn of<T: Sender>() -> Self {
        Self {
            type_name: TypeKey::of::<T>().name(),
            accepts: Arc::new(|sender: &dyn Sender| sender.as_any().is::<T>()),
        }
    }

    /// Custom capability check.
    pub fn predicate<F>(type_name: &'static str, accepts: F) -> Self
    where
        F: Fn(&dyn Sender) -> bool + Send + Sync + 'static,
    {
        Self {
            type_name,
            accepts: Arc::new(accepts),
        }
    }

    pub fn accepts_sender(&self, sender: &dyn Sender) -> bool {
        (self.accepts)(sender)
    }

    pub fn type_name(&self) -> &'static str {
        self.type_name
    }
}

impl Default for SenderSpec {
    fn default() -> Self {
        Self::any()
    }
}

impl fmt::Debug for SenderSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SenderSpec({})", self.type_name)
    }
}

/// Main handler or named subcommand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandlerKind {
    Main,
    Subcommand,
}

/// Immutable descriptor for one handler.
#[derive(Clone)]
pub struct HandlerMetadata {
    pub(crate) kind: HandlerKind,
    pub(crate) name: String,
    pub(crate) aliases: Vec<String>,
    pub(crate) description: String,
    pub(crate) permission: Option<String>,
    pub(crate) usage: String,
    pub(crate) parameters: Vec<ParameterSpec>,
    pub(crate) sender: SenderSpec,
    pub(crate) handler: HandlerFn,
}

impl HandlerMetadata {
    pub fn kind(&self) -> HandlerKind {
        self.kind
    }

    pub fn is_main(&self) -> bool {
        self.kind == HandlerKind::Main
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn aliases(&self) -> &[String] {
        &self.aliases
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn permission(&self) -> Option<&str> {
        self.permission.as_deref()
    }

    /// Usage suffix, empty or starting with a single space.
    pub fn usage(&self) -> &str {
        &self.usage
    }

    pub fn parameters(&self) -> &[ParameterSpec] {
        &self.parameters
    }

    pub fn sender_spec(&self) -> &SenderSpec {
        &self.sender
    }

    /// Case-insensitive match against the name or any alias.
    pub fn matches(&self, token: &str) -> bool {
        eq_ignore_case(&self.name, token) || self.aliases.iter().any(|a| eq_ignore_case(a, token))
    }

    pub fn required_count(&self) -> usize {
        self.parameters.iter().filter(|p| !p.is_optional()).count()
    }

    pub fn total_count(&self) -> usize {
        self.parameters.len()
    }

    /// Upper bound on accepted tokens; unbounded when the last parameter is trailing.
    pub fn max_tokens(&self) -> usize {
        match self.parameters.last() {
            Some(last) if last.is_trailing() => usize::MAX,
            _ => self.parameters.len(),
        }
    }

    /// Tokens this handler binds against: subcommands skip their own literal.
    pub fn parameter_tokens<'t, 's>(&self, tokens: &'t [&'s str]) -> &'t [&'s str] {
        match self.kind {
            HandlerKind::Subcommand if !tokens.is_empty() => &tokens[1..],
            _ => tokens,
        }
    }
}

impl fmt::Debug for HandlerMetadata {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandlerMetadata")
            .field("kind", &self.kind)
            .field("name", &self.name)
            .field("aliases", &self.aliases)
            .field("description", &self.description)
            .field("permission", &self.permission)
            .field("usage", &self.usage)
            .field("parameters", &self.parameters)
            .field("sender", &self.sender)
            .finish_non_exhaustive()
    }
}
