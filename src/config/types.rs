use serde::{Deserialize, Serialize};

/// Per-command behaviour knobs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommandConfig {
    /// How to choose between several main-handler overloads.
    #[serde(default)]
    pub overload_policy: OverloadPolicy,
    /// Allow more than one main handler per command (default: true).
    #[serde(default = "default_allow_multiple_main")]
    pub allow_multiple_main: bool,
    /// Description used when a handler declares none.
    #[serde(default = "default_description")]
    pub default_description: String,
    /// User-facing message text.
    #[serde(default)]
    pub messages: Messages,
}

/// Tie-break when several main handlers could take the same tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverloadPolicy {
    /// First overload (declaration order) that passes the structural check.
    #[default]
    FirstCompatible,
    /// First declared overload, no check.
    FirstDeclared,
    /// Exactly one compatible overload, otherwise show usage.
    ErrorIfAmbiguous,
}

/// Text shown to senders.
///
/// `invalid_value` may contain `{token}` and `{type}` placeholders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Messages {
    #[serde(default = "default_permission_denied")]
    pub permission_denied: String,
    #[serde(default = "default_resolver_missing")]
    pub resolver_missing: String,
    #[serde(default = "default_invalid_value")]
    pub invalid_value: String,
    #[serde(default = "default_internal_error")]
    pub internal_error: String,
    #[serde(default = "default_usage_header_single")]
    pub usage_header_single: String,
    #[serde(default = "default_usage_header_multiple")]
    pub usage_header_multiple: String,
    #[serde(default = "default_no_syntaxes")]
    pub no_syntaxes: String,
}

fn default_allow_multiple_main() -> bool {
    true
}

fn default_description() -> String {
    "No description provided".to_string()
}

fn default_permission_denied() -> String {
    "You do not have permission to use this command.".to_string()
}

fn default_resolver_missing() -> String {
    "A context resolver was not found for: ".to_string()
}

fn default_invalid_value() -> String {
    "Cannot resolve parameter {token} for type {type}".to_string()
}

fn default_internal_error() -> String {
    "An error occurred while executing this command.".to_string()
}

fn default_usage_header_single() -> String {
    "Invalid command syntax. Correct command syntax is: ".to_string()
}

fn default_usage_header_multiple() -> String {
    "Invalid command syntax. Correct command syntax's are:".to_string()
}

fn default_no_syntaxes() -> String {
    "No available command syntaxes.".to_string()
}

impl Default for CommandConfig {
    fn default() -> Self {
        Self {
            overload_policy: OverloadPolicy::default(),
            allow_multiple_main: default_allow_multiple_main(),
            default_description: default_description(),
            messages: Messages::default(),
        }
    }
}

impl Default for Messages {
    fn default() -> Self {
        Self {
            permission_denied: default_permission_denied(),
            resolver_missing: default_resolver_missing(),
            invalid_value: default_invalid_value(),
            internal_error: default_internal_error(),
            usage_header_single: default_usage_header_single(),
            usage_header_multiple: default_usage_header_multiple(),
            no_syntaxes: default_no_syntaxes(),
        }
    }
}

impl Messages {
    /// Every message with its field name, for validation.
    pub(crate) fn entries(&self) -> [(&'static str, &str); 7] {
        [
            ("permission_denied", self.permission_denied.as_str()),
            ("resolver_missing", self.resolver_missing.as_str()),
            ("invalid_value", self.invalid_value.as_str()),
            ("internal_error", self.internal_error.as_str()),
            ("usage_header_single", self.usage_header_single.as_str()),
            ("usage_header_multiple", self.usage_header_multiple.as_str()),
            ("no_syntaxes", self.no_syntaxes.as_str()),
        ]
    }
}
