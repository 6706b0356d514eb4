//! Handler declarations → metadata.
//!
//! A [`HandlerDecl`] carries what a handler declares about itself; [`parse`]
//! applies the defaulting rules (command name for mains, alias splitting,
//! default description, synthesized usage) and rejects misconfiguration.

use std::sync::Arc;

use crate::command::metadata::{
    HandlerFn, HandlerKind, HandlerMetadata, ParameterSpec, SenderSpec,
};
use crate::error::DeclarationError;
use crate::resolvers::Arguments;
use crate::sender::Sender;

const ALIAS_SEPARATOR: char = '|';

/// Declarative description of one handler, built fluently.
#[derive(Clone)]
pub struct HandlerDecl {
    kind: HandlerKind,
    tag: Option<String>,
    aliases: Option<String>,
    description: Option<String>,
    permission: Option<String>,
    usage: Option<String>,
    parameters: Vec<ParameterSpec>,
    sender: SenderSpec,
    handler: HandlerFn,
}

impl HandlerDecl {
    /// The command's default action.
    pub fn main<F>(handler: F) -> Self
    where
        F: Fn(&dyn Sender, Arguments) -> anyhow::Result<()> + Send + Sync + 'static,
    {
        Self::new(HandlerKind::Main, None, Arc::new(handler))
    }

    /// A subcommand selected by `tag` or one of its aliases.
    pub fn subcommand<F>(tag: impl Into<String>, handler: F) -> Self
    where
        F: Fn(&dyn Sender, Arguments) -> anyhow::Result<()> + Send + Sync + 'static,
    {
        Self::new(HandlerKind::Subcommand, Some(tag.into()), Arc::new(handler))
    }

    fn new(kind: HandlerKind, tag: Option<String>, handler: HandlerFn) -> Self {
        Self {
            kind,
            tag,
            aliases: None,
            description: None,
            permission: None,
            usage: None,
            parameters: Vec::new(),
            sender: SenderSpec::any(),
            handler,
        }
    }

    /// Alias text; `"ban|b"` declares two aliases.
    pub fn aliases(mut self, aliases: impl Into<String>) -> Self {
        self.aliases = Some(aliases.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn permission(mut self, permission: impl Into<String>) -> Self {
        self.permission = Some(permission.into());
        self
    }

    /// Explicit usage; suppresses synthesis from the parameter list.
    pub fn usage(mut self, usage: impl Into<String>) -> Self {
        self.usage = Some(usage.into());
        self
    }

    pub fn param(mut self, parameter: ParameterSpec) -> Self {
        self.parameters.push(parameter);
        self
    }

    /// Restrict which senders may invoke the handler.
    pub fn sender(mut self, sender: SenderSpec) -> Self {
        self.sender = sender;
        self
    }

    pub fn kind(&self) -> HandlerKind {
        self.kind
    }
}

/// Build metadata for one declared handler of `command_name`.
pub fn parse(
    command_name: &str,
    decl: HandlerDecl,
    default_description: &str,
) -> Result<HandlerMetadata, DeclarationError> {
    let name = match decl.kind {
        HandlerKind::Main => command_name.to_string(),
        HandlerKind::Subcommand => decl.tag.clone().unwrap_or_default(),
    };
    if name.trim().is_empty() {
        return Err(DeclarationError::MissingName);
    }

    validate_parameters(&decl.parameters)?;

    let usage = match decl.usage {
        Some(explicit) => explicit,
        None => synthesize_usage(&decl.parameters),
    };
    let usage = if usage.is_empty() {
        usage
    } else {
        format!(" {}", usage)
    };

    Ok(HandlerMetadata {
        kind: decl.kind,
        name,
        aliases: parse_aliases(decl.aliases.as_deref().unwrap_or("")),
        description: decl
            .description
            .unwrap_or_else(|| default_description.to_string()),
        permission: decl.permission,
        usage,
        parameters: decl.parameters,
        sender: decl.sender,
        handler: decl.handler,
    })
}

/// `"ban|b"` → `["ban", "b"]`; `""` → `[]`. Duplicates keep their first position.
pub fn parse_aliases(text: &str) -> Vec<String> {
    let mut aliases: Vec<String> = Vec::new();
    for alias in text.split(ALIAS_SEPARATOR) {
        let alias = alias.trim();
        if alias.is_empty() || aliases.iter().any(|seen| seen == alias) {
            continue;
        }
        aliases.push(alias.to_string());
    }
    aliases
}

/// `<name>` per parameter, `<name...>` for repeated ones, space-separated.
pub fn synthesize_usage(parameters: &[ParameterSpec]) -> String {
    parameters
        .iter()
        .map(ParameterSpec::usage_fragment)
        .collect::<Vec<_>>()
        .join(" ")
}

fn validate_parameters(parameters: &[ParameterSpec]) -> Result<(), DeclarationError> {
    let last = parameters.len().saturating_sub(1);
    for (position, parameter) in parameters.iter().enumerate() {
        if parameter.name().trim().is_empty() {
            // Position 0 is the sender.
            return Err(DeclarationError::MissingParameterName {
                position: position + 1,
            });
        }
        if position == last {
            continue;
        }
        if parameter.is_repeated() {
            return Err(DeclarationError::RepeatedNotLast {
                parameter: parameter.name().to_string(),
            });
        }
        if parameter.is_greedy() && parameter.is_textual() {
            return Err(DeclarationError::GreedyNotLast {
                parameter: parameter.name().to_string(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn noop() -> HandlerDecl {
        HandlerDecl::subcommand("give", |_, _| Ok(()))
    }

    #[test]
    fn test_main_takes_command_name() {
        let meta = parse("kit", HandlerDecl::main(|_, _| Ok(())), "none").unwrap();
        assert_eq!(meta.name(), "kit");
        assert!(meta.is_main());
    }

    #[test]
    fn test_subcommand_takes_tag() {
        let meta = parse("kit", noop(), "none").unwrap();
        assert_eq!(meta.name(), "give");
        assert_eq!(meta.kind(), HandlerKind::Subcommand);
    }

    #[test]
    fn test_empty_tag_rejected() {
        let decl = HandlerDecl::subcommand("", |_, _| Ok(()));
        assert_eq!(parse("kit", decl, "none").unwrap_err(), DeclarationError::MissingName);
    }

    #[test]
    fn test_alias_parsing() {
        assert_eq!(parse_aliases("ban|b"), vec!["ban", "b"]);
        assert_eq!(parse_aliases("ban"), vec!["ban"]);
        assert!(parse_aliases("").is_empty());
        assert_eq!(parse_aliases("b|b|"), vec!["b"]);
    }

    #[test]
    fn test_default_description() {
        let meta = parse("kit", noop(), "No description provided").unwrap();
        assert_eq!(meta.description(), "No description provided");

        let meta = parse("kit", noop().description("Give a kit"), "unused").unwrap();
        assert_eq!(meta.description(), "Give a kit");
    }

    #[test]
    fn test_usage_synthesized_with_leading_space() {
        let decl = noop()
            .param(ParameterSpec::text("player"))
            .param(ParameterSpec::repeated::<String>("kits"));
        let meta = parse("kit", decl, "none").unwrap();
        assert_eq!(meta.usage(), " <player> <kits...>");
    }

    #[test]
    fn test_empty_usage_has_no_space() {
        let meta = parse("kit", noop(), "none").unwrap();
        assert_eq!(meta.usage(), "");
    }

    #[test]
    fn test_explicit_usage_wins() {
        let decl = noop().param(ParameterSpec::text("player")).usage("<who>");
        let meta = parse("kit", decl, "none").unwrap();
        assert_eq!(meta.usage(), " <who>");
    }

    #[test]
    fn test_greedy_must_be_last() {
        let decl = noop()
            .param(ParameterSpec::text("reason").greedy())
            .param(ParameterSpec::text("player"));
        assert!(matches!(
            parse("kit", decl, "none"),
            Err(DeclarationError::GreedyNotLast { parameter }) if parameter == "reason"
        ));
    }

    #[test]
    fn test_repeated_must_be_last() {
        let decl = noop()
            .param(ParameterSpec::repeated::<i32>("ids"))
            .param(ParameterSpec::text("player"));
        assert!(matches!(
            parse("kit", decl, "none"),
            Err(DeclarationError::RepeatedNotLast { .. })
        ));
    }

    #[test]
    fn test_unnamed_parameter_rejected() {
        let decl = noop().param(ParameterSpec::text(""));
        assert_eq!(
            parse("kit", decl, "none").unwrap_err(),
            DeclarationError::MissingParameterName { position: 1 }
        );
    }
}
