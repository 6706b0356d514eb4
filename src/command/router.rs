//! Command router — picks the handler for a token line.
//!
//! ```text
//! tokens[0] matches a subcommand name/alias → that subcommand
//! otherwise                                 → main handler (overload policy)
//! nothing applies                           → permission-filtered usage
//! ```
//!
//! Routing is stateless and single-pass: the only search is the first-match
//! scan over main-handler overloads, in declaration order.

use std::collections::HashSet;
use std::sync::Arc;

use crate::command::completion::{self, normalize_partial};
use crate::command::executor::Executor;
use crate::command::matching::filter_partial;
use crate::command::metadata::{HandlerKind, HandlerMetadata, ParameterSpec};
use crate::command::parser::{parse, HandlerDecl};
use crate::command::usage::{self, MessageFormatter, PlainFormatter};
use crate::config::{CommandConfig, OverloadPolicy};
use crate::error::{CommandError, DeclarationError};
use crate::resolvers::{is_bool_literal, ResolverRegistry};
use crate::sender::{permits, Sender};

/// Routing decision for one token line.
#[derive(Debug, Clone, Copy)]
pub enum Route<'a> {
    Handler(&'a HandlerMetadata),
    /// No handler applies; show usage.
    Usage,
}

/// Result of [`Command::execute`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Success,
    /// No handler applied. Carries the permission-filtered usage lines.
    Usage(Vec<String>),
    Failed(CommandError),
}

impl Outcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success)
    }

    pub fn error(&self) -> Option<&CommandError> {
        match self {
            Outcome::Failed(err) => Some(err),
            _ => None,
        }
    }
}

/// Collects handler declarations for one command.
pub struct CommandBuilder {
    name: String,
    registry: Arc<ResolverRegistry>,
    config: CommandConfig,
    formatter: Option<Arc<dyn MessageFormatter>>,
    handlers: Vec<HandlerDecl>,
}

impl CommandBuilder {
    pub fn config(mut self, config: CommandConfig) -> Self {
        self.config = config;
        self
    }

    pub fn formatter(mut self, formatter: Arc<dyn MessageFormatter>) -> Self {
        self.formatter = Some(formatter);
        self
    }

    pub fn handler(mut self, decl: HandlerDecl) -> Self {
        self.handlers.push(decl);
        self
    }

    /// Parse every declaration. Fails fast on misconfiguration.
    pub fn build(self) -> Result<Command, DeclarationError> {
        if self.name.trim().is_empty() {
            return Err(DeclarationError::MissingName);
        }

        let mut mains = Vec::new();
        let mut subcommands: Vec<HandlerMetadata> = Vec::new();
        for decl in self.handlers {
            let meta = parse(&self.name, decl, &self.config.default_description)?;
            match meta.kind() {
                HandlerKind::Main => mains.push(meta),
                HandlerKind::Subcommand => {
                    if subcommands.iter().any(|s| s.matches(meta.name())) {
                        tracing::warn!(
                            command = %self.name,
                            subcommand = %meta.name(),
                            "Subcommand shadowed by an earlier declaration"
                        );
                    }
                    subcommands.push(meta);
                }
            }
        }

        if mains.len() > 1 && !self.config.allow_multiple_main {
            return Err(DeclarationError::DuplicateMain { command: self.name });
        }

        let formatter: Arc<dyn MessageFormatter> = match self.formatter {
            Some(formatter) => formatter,
            None => Arc::new(PlainFormatter::new(self.config.messages.clone())),
        };

        let command = Command {
            name: self.name,
            mains,
            subcommands,
            registry: self.registry,
            config: self.config,
            formatter,
        };

        tracing::info!(
            command = %command.name,
            mains = command.mains.len(),
            subcommands = command.subcommands.len(),
            aliases = ?command.aliases(),
            "Registered command"
        );
        Ok(command)
    }
}

/// One command: optional main handler(s) plus subcommands.
pub struct Command {
    name: String,
    mains: Vec<HandlerMetadata>,
    subcommands: Vec<HandlerMetadata>,
    registry: Arc<ResolverRegistry>,
    config: CommandConfig,
    formatter: Arc<dyn MessageFormatter>,
}

impl Command {
    pub fn builder(name: impl Into<String>, registry: Arc<ResolverRegistry>) -> CommandBuilder {
        CommandBuilder {
            name: name.into(),
            registry,
            config: CommandConfig::default(),
            formatter: None,
            handlers: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn main_handlers(&self) -> &[HandlerMetadata] {
        &self.mains
    }

    pub fn subcommands(&self) -> &[HandlerMetadata] {
        &self.subcommands
    }

    pub fn config(&self) -> &CommandConfig {
        &self.config
    }

    pub fn registry(&self) -> &ResolverRegistry {
        &self.registry
    }

    /// Aliases of every main handler: the command's own alternate names.
    pub fn aliases(&self) -> Vec<String> {
        let mut aliases: Vec<String> = Vec::new();
        for alias in self.mains.iter().flat_map(|m| m.aliases()) {
            if !aliases.contains(alias) {
                aliases.push(alias.clone());
            }
        }
        aliases
    }

    /// Permission guarding the whole command, set only when every main
    /// handler carries one.
    pub fn required_permission(&self) -> Option<&str> {
        if self.mains.is_empty() || self.mains.iter().any(|m| m.permission().is_none()) {
            return None;
        }
        self.mains.first().and_then(HandlerMetadata::permission)
    }

    /// First subcommand whose name or alias matches `token`.
    pub fn find_subcommand(&self, token: &str) -> Option<&HandlerMetadata> {
        self.subcommands.iter().find(|sub| sub.matches(token))
    }

    /// Decide which handler applies to `tokens`.
    pub fn route(&self, tokens: &[&str]) -> Route<'_> {
        if let Some(sub) = tokens.first().and_then(|first| self.find_subcommand(first)) {
            return Route::Handler(sub);
        }
        match self.select_main(tokens) {
            Some(main) => Route::Handler(main),
            None => Route::Usage,
        }
    }

    /// Route, check permission, resolve, invoke.
    pub fn execute(&self, sender: &dyn Sender, tokens: &[&str]) -> Outcome {
        let handler = match self.route(tokens) {
            Route::Handler(handler) => handler,
            Route::Usage => {
                tracing::debug!(
                    command = %self.name,
                    sender = %sender.name(),
                    "No handler matched"
                );
                return Outcome::Usage(self.usage_lines(sender));
            }
        };

        tracing::debug!(
            command = %self.name,
            handler = %handler.name(),
            sender = %sender.name(),
            args = %tokens.join(" "),
            "Dispatching command"
        );

        if !permits(sender, handler.permission()) {
            return Outcome::Failed(CommandError::not_permitted(
                self.config.messages.permission_denied.as_str(),
            ));
        }

        let executor = Executor::new(handler, &self.registry);
        match executor.execute(sender, handler.parameter_tokens(tokens)) {
            Ok(()) => Outcome::Success,
            Err(err) => Outcome::Failed(err),
        }
    }

    /// Suggestions for the last token, deduplicated, first occurrence wins.
    ///
    /// Permitted main handlers contribute first. The first token then adds
    /// subcommand names while it is being typed, or the matched subcommand's
    /// own suggestions once it is complete.
    pub fn complete(&self, sender: &dyn Sender, tokens: &[&str]) -> Vec<String> {
        let mut options = Vec::new();
        for main in self.permitted(&self.mains, sender) {
            options.extend(completion::complete(main, &self.registry, sender, tokens));
        }

        match tokens {
            [] => options.extend(self.subcommand_names(sender)),
            [partial] => {
                options.extend(self.subcommand_names(sender));
                options = filter_partial(Some(normalize_partial(partial)), options);
            }
            [first, ..] => {
                let matched = self
                    .find_subcommand(first)
                    .filter(|sub| permits(sender, sub.permission()));
                if let Some(sub) = matched {
                    let tokens = sub.parameter_tokens(tokens);
                    options.extend(completion::complete(sub, &self.registry, sender, tokens));
                }
            }
        }

        dedupe(options)
    }

    /// `/<command>...` lines for every handler the sender may use.
    pub fn usage_lines(&self, sender: &dyn Sender) -> Vec<String> {
        self.permitted(&self.mains, sender)
            .chain(self.permitted(&self.subcommands, sender))
            .map(|handler| usage::usage_line(&self.name, handler))
            .collect()
    }

    /// Usage lines with their header, ready to send.
    pub fn usage_message(&self, sender: &dyn Sender) -> Vec<String> {
        usage::usage_message(&self.config.messages, &self.usage_lines(sender))
    }

    /// Lines a host should send back for an outcome.
    pub fn render(&self, sender: &dyn Sender, outcome: &Outcome) -> Vec<String> {
        match outcome {
            Outcome::Success => Vec::new(),
            Outcome::Usage(lines) => usage::usage_message(&self.config.messages, lines),
            Outcome::Failed(CommandError::ArgumentCount) => self.usage_message(sender),
            Outcome::Failed(err) => vec![self.formatter.format_error(err)],
        }
    }

    fn permitted<'a>(
        &'a self,
        handlers: &'a [HandlerMetadata],
        sender: &'a dyn Sender,
    ) -> impl Iterator<Item = &'a HandlerMetadata> + 'a {
        handlers
            .iter()
            .filter(move |handler| permits(sender, handler.permission()))
    }

    fn subcommand_names<'a>(
        &'a self,
        sender: &'a dyn Sender,
    ) -> impl Iterator<Item = String> + 'a {
        self.permitted(&self.subcommands, sender)
            .map(|sub| sub.name().to_string())
    }

    fn select_main(&self, tokens: &[&str]) -> Option<&HandlerMetadata> {
        let overloads = match self.mains.as_slice() {
            [] => return None,
            [only] => return Some(only),
            overloads => overloads,
        };

        match self.config.overload_policy {
            OverloadPolicy::FirstDeclared => overloads.first(),
            OverloadPolicy::FirstCompatible => overloads
                .iter()
                .find(|main| self.accepts_structurally(main, tokens)),
            OverloadPolicy::ErrorIfAmbiguous => {
                let mut compatible = overloads
                    .iter()
                    .filter(|main| self.accepts_structurally(main, tokens));
                let first = compatible.next();
                if compatible.next().is_some() {
                    tracing::warn!(
                        command = %self.name,
                        tokens = tokens.len(),
                        "Ambiguous main-handler overloads"
                    );
                    return None;
                }
                first
            }
        }
    }

    /// Cheap arity and per-token type check; not a full resolution.
    fn accepts_structurally(&self, handler: &HandlerMetadata, tokens: &[&str]) -> bool {
        if tokens.len() < handler.required_count() || tokens.len() > handler.max_tokens() {
            tracing::trace!(
                command = %self.name,
                usage = %handler.usage(),
                tokens = tokens.len(),
                "Overload rejected by arity"
            );
            return false;
        }

        // Tokens past the parameter list belong to a trailing repeated parameter.
        let parameters = handler.parameters();
        let repeated = parameters.last().filter(|last| last.is_repeated());
        tokens.iter().enumerate().all(|(index, token)| {
            match parameters.get(index).or(repeated) {
                Some(parameter) => self.token_compatible(token, parameter),
                None => true,
            }
        })
    }

    fn token_compatible(&self, token: &str, parameter: &ParameterSpec) -> bool {
        let ty = parameter.type_key();
        if ty.is::<i32>() {
            return token.parse::<i32>().is_ok();
        }
        if ty.is::<f64>() {
            return token.parse::<f64>().is_ok();
        }
        if ty.is::<f32>() {
            return token.parse::<f32>().is_ok();
        }
        if ty.is::<i64>() {
            return token.parse::<i64>().is_ok();
        }
        if ty.is::<bool>() {
            return is_bool_literal(token);
        }
        if let Some(spec) = parameter.enum_spec() {
            return spec.accepts(token);
        }
        if let Some(resolve) = self.registry.resolve_type(ty) {
            return resolve(token).is_some();
        }
        parameter.is_textual()
    }
}

fn dedupe(options: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    options
        .into_iter()
        .filter(|option| seen.insert(option.clone()))
        .collect()
}
