//! Completion engine: suggestions for the token currently being typed.

use crate::command::matching::filter_partial;
use crate::command::metadata::HandlerMetadata;
use crate::resolvers::ResolverRegistry;
use crate::sender::Sender;

/// Some hosts send NUL for "cursor after a trailing space".
const EMPTY_TOKEN_PLACEHOLDER: &str = "\u{0}";

/// Suggest values for the last of `tokens` against one handler.
///
/// `tokens` are parameter tokens (subcommand literal already stripped).
/// Lookup order: the parameter's completion tag, a provider registered for
/// its type, then enum variant names. Candidates keep provider order.
pub fn complete(
    handler: &HandlerMetadata,
    registry: &ResolverRegistry,
    sender: &dyn Sender,
    tokens: &[&str],
) -> Vec<String> {
    let parameters = handler.parameters();
    if tokens.len() > parameters.len() {
        return Vec::new();
    }

    let index = tokens.len().saturating_sub(1);
    let Some(parameter) = parameters.get(index) else {
        return Vec::new();
    };

    let partial = tokens.last().map(|&token| normalize_partial(token));

    let tagged = parameter
        .completion_tag()
        .and_then(|tag| registry.lookup_completion(tag));
    let provider = tagged.or_else(|| registry.type_completion(parameter.type_key()));

    let candidates = match (provider, parameter.enum_spec()) {
        (Some(provider), _) => provider(sender, partial.unwrap_or("")),
        (None, Some(spec)) => spec.suggestions(),
        (None, None) => {
            tracing::trace!(
                handler = %handler.name(),
                parameter = %parameter.name(),
                "No completion source for parameter"
            );
            return Vec::new();
        }
    };

    filter_partial(partial, candidates)
}

pub(crate) fn normalize_partial(token: &str) -> &str {
    if token == EMPTY_TOKEN_PLACEHOLDER {
        ""
    } else {
        token
    }
}
