//! Built-in resolvers, installed before any host registration.

use uuid::Uuid;

use crate::resolvers::registry::ResolverRegistry;

pub(crate) fn install(registry: &ResolverRegistry) {
    registry.register_type(|token: &str| Some(token.to_string()));
    registry.register_type(|token: &str| Some(parse_bool(token)));
    registry.register_type(|token: &str| token.parse::<i32>().ok());
    registry.register_type(|token: &str| token.parse::<f64>().ok());
    registry.register_type(|token: &str| token.parse::<i64>().ok());
    registry.register_type(|token: &str| token.parse::<f32>().ok());
    registry.register_type(|token: &str| Uuid::parse_str(token).ok());
}

/// Lenient: `true` in any case is true, everything else is false.
fn parse_bool(token: &str) -> bool {
    token.eq_ignore_ascii_case("true")
}

/// Strict literal check used by overload selection.
pub(crate) fn is_bool_literal(token: &str) -> bool {
    token.eq_ignore_ascii_case("true") || token.eq_ignore_ascii_case("false")
}
