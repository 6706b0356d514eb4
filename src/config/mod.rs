//! Command configuration, loaded from TOML.
//!
//! ```toml
//! overload_policy = "first_compatible"
//! allow_multiple_main = true
//! default_description = "No description provided"
//!
//! [messages]
//! permission_denied = "You do not have permission to use this command."
//! ```

mod loader;
mod types;

pub use loader::ConfigError;
pub use types::{CommandConfig, Messages, OverloadPolicy};
