//! Shared senders, resolvers and spies for integration tests.

#![allow(dead_code, unused_imports)]

use commandlib::command::{CommandEnum, HandlerDecl, ParameterSpec, SenderSpec};
use commandlib::{Arguments, Command, ResolverRegistry, Sender};
use parking_lot::Mutex;
use std::any::Any;
use std::sync::Arc;

pub const ONLINE: &[&str] = &["Steve", "Alex", "Stella"];

/// In-game sender holding a fixed permission list.
pub struct Player {
    pub name: String,
    pub permissions: Vec<String>,
}

impl Player {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            permissions: Vec::new(),
        }
    }

    pub fn with_permissions(name: &str, permissions: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            permissions: permissions.iter().map(|p| p.to_string()).collect(),
        }
    }
}

impl Sender for Player {
    fn name(&self) -> &str {
        &self.name
    }

    fn has_permission(&self, permission: &str) -> bool {
        self.permissions.iter().any(|p| p == permission)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Server console; bypasses permission tags.
pub struct Console;

impl Sender for Console {
    fn name(&self) -> &str {
        "CONSOLE"
    }

    fn has_permission(&self, _permission: &str) -> bool {
        false
    }

    fn is_console(&self) -> bool {
        true
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// A player resolved from a name token.
#[derive(Debug, Clone, PartialEq)]
pub struct OnlinePlayer(pub String);

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Mode {
    Easy,
    Hard,
}

impl CommandEnum for Mode {
    fn variants() -> &'static [Self] {
        &[Mode::Easy, Mode::Hard]
    }

    fn name(&self) -> &'static str {
        match self {
            Mode::Easy => "EASY",
            Mode::Hard => "HARD",
        }
    }
}

/// Registry with an `OnlinePlayer` resolver and `@players` completion.
pub fn registry() -> Arc<ResolverRegistry> {
    let registry = ResolverRegistry::new();
    registry.register_type(|token: &str| {
        ONLINE
            .iter()
            .find(|name| name.eq_ignore_ascii_case(token))
            .map(|name| OnlinePlayer(name.to_string()))
    });
    registry.register_tags(&["@players"], |_, _| {
        ONLINE.iter().map(|name| name.to_string()).collect()
    });
    Arc::new(registry)
}

/// Records every handler invocation as (handler, rendered arguments).
#[derive(Clone, Default)]
pub struct Spy {
    calls: Arc<Mutex<Vec<(String, Vec<String>)>>>,
}

impl Spy {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, handler: &str, values: Vec<String>) {
        self.calls.lock().push((handler.to_string(), values));
    }

    pub fn calls(&self) -> Vec<(String, Vec<String>)> {
        self.calls.lock().clone()
    }

    pub fn count(&self) -> usize {
        self.calls.lock().len()
    }
}

/// `/kit` with a `list` main, `give <player> <kitname>` and a guarded `reset`.
pub fn kit_command(spy: &Spy) -> Command {
    let list_spy = spy.clone();
    let give_spy = spy.clone();
    let reset_spy = spy.clone();

    Command::builder("kit", registry())
        .handler(
            HandlerDecl::main(move |_, _| {
                list_spy.record("kit", Vec::new());
                Ok(())
            })
            .description("List kits"),
        )
        .handler(
            HandlerDecl::subcommand("give", move |_, args: Arguments| {
                let player = args.get::<OnlinePlayer>(0).map(|p| p.0.clone());
                let kit = args.get::<String>(1).cloned();
                give_spy.record(
                    "give",
                    vec![player.unwrap_or_default(), kit.unwrap_or_default()],
                );
                Ok(())
            })
            .param(ParameterSpec::new::<OnlinePlayer>("player").completion("@players"))
            .param(ParameterSpec::text("kitname")),
        )
        .handler(
            HandlerDecl::subcommand("list", |_, _| Ok(())).description("List kits"),
        )
        .handler(
            HandlerDecl::subcommand("reset", move |_, _| {
                reset_spy.record("reset", Vec::new());
                Ok(())
            })
            .permission("kit.give")
            .sender(SenderSpec::of::<Player>()),
        )
        .build()
        .expect("kit command declarations are valid")
}
