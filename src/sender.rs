//! Caller handle abstraction.
//!
//! The core never inspects a sender beyond these capabilities: permission
//! checks, the console bypass, and downcasting for sender-type restrictions.

use std::any::Any;

/// Whoever issued a command. Concrete types are host-defined.
pub trait Sender: Any + Send + Sync {
    /// Display name, used only for logging.
    fn name(&self) -> &str;

    /// Whether this sender holds the given permission tag.
    fn has_permission(&self, permission: &str) -> bool;

    /// Console senders bypass permission tags.
    fn is_console(&self) -> bool {
        false
    }

    /// Upcast for sender-type checks (`SenderSpec::of`).
    fn as_any(&self) -> &dyn Any;
}

/// Check an optional permission tag against a sender.
///
/// Absence of a tag means "always allowed".
pub fn permits(sender: &dyn Sender, permission: Option<&str>) -> bool {
    match permission {
        None => true,
        Some(_) if sender.is_console() => true,
        Some(node) => sender.has_permission(node),
    }
}
