mod common;

use common::{kit_command, registry, Console, Mode, Player, Spy};
use commandlib::command::{filter_partial, HandlerDecl, ParameterSpec};
use commandlib::Command;

fn difficulty() -> Command {
    Command::builder("difficulty", registry())
        .handler(HandlerDecl::main(|_, _| Ok(())).param(ParameterSpec::enumeration::<Mode>("mode")))
        .build()
        .unwrap()
}

// ===== SUBCOMMAND NAMES =====

#[test]
fn test_partial_subcommand_name() {
    let kit = kit_command(&Spy::new());
    assert_eq!(kit.complete(&Player::new("Alex"), &["gi"]), vec!["give"]);
    assert_eq!(kit.complete(&Player::new("Alex"), &["GI"]), vec!["give"]);
}

#[test]
fn test_hidden_subcommands_not_suggested() {
    let kit = kit_command(&Spy::new());

    assert_eq!(kit.complete(&Player::new("Alex"), &[""]), vec!["give", "list"]);
    assert_eq!(kit.complete(&Console, &[""]), vec!["give", "list", "reset"]);
}

#[test]
fn test_subcommand_parameter_uses_tag_provider() {
    let kit = kit_command(&Spy::new());
    let sender = Player::new("Alex");

    assert_eq!(kit.complete(&sender, &["give", "St"]), vec!["Steve", "Stella"]);
    assert_eq!(
        kit.complete(&sender, &["give", ""]),
        vec!["Steve", "Alex", "Stella"]
    );
    // kitname has no completion source
    assert!(kit.complete(&sender, &["give", "Steve", "st"]).is_empty());
}

#[test]
fn test_guarded_subcommand_parameters_hidden() {
    let command = Command::builder("kit", registry())
        .handler(
            HandlerDecl::subcommand("give", |_, _| Ok(()))
                .permission("kit.give")
                .param(ParameterSpec::text("player").completion("@players")),
        )
        .build()
        .unwrap();

    assert!(command.complete(&Player::new("Alex"), &["give", ""]).is_empty());
    assert_eq!(command.complete(&Console, &["give", "A"]), vec!["Alex"]);
}

#[test]
fn test_main_suggestions_precede_matched_subcommand() {
    let registry = registry();
    registry.register_completion("@reasons", |_, _| vec!["spam".into(), "grief".into()]);
    registry.register_completion("@pages", |_, _| vec!["1".into(), "2".into()]);
    let command = Command::builder("report", registry)
        .handler(
            HandlerDecl::main(|_, _| Ok(()))
                .param(ParameterSpec::text("player").completion("@players"))
                .param(ParameterSpec::text("reason").completion("@reasons")),
        )
        .handler(
            HandlerDecl::subcommand("list", |_, _| Ok(()))
                .permission("report.list")
                .param(ParameterSpec::new::<i32>("page").completion("@pages")),
        )
        .build()
        .unwrap();

    assert_eq!(
        command.complete(&Console, &["list", ""]),
        vec!["spam", "grief", "1", "2"]
    );
    assert_eq!(
        command.complete(&Player::new("Alex"), &["list", ""]),
        vec!["spam", "grief"]
    );
    assert_eq!(command.complete(&Console, &["l"]), vec!["list"]);
    assert!(command.complete(&Player::new("Alex"), &["l"]).is_empty());
}

// ===== ENUMS =====

#[test]
fn test_enum_suggestions_in_declaration_order() {
    let command = difficulty();
    assert_eq!(command.complete(&Console, &[""]), vec!["easy", "hard"]);
    assert_eq!(command.complete(&Console, &["\u{0}"]), vec!["easy", "hard"]);
    assert_eq!(command.complete(&Console, &["h"]), vec!["hard"]);
}

#[test]
fn test_mains_and_subcommands_merged_without_duplicates() {
    let command = Command::builder("difficulty", registry())
        .handler(HandlerDecl::main(|_, _| Ok(())).param(ParameterSpec::enumeration::<Mode>("mode")))
        .handler(HandlerDecl::subcommand("easy", |_, _| Ok(())))
        .handler(HandlerDecl::subcommand("reset", |_, _| Ok(())))
        .build()
        .unwrap();

    assert_eq!(
        command.complete(&Console, &[""]),
        vec!["easy", "hard", "reset"]
    );
}

// ===== FILTERING =====

#[test]
fn test_filtering_is_idempotent_and_order_preserving() {
    let candidates: Vec<String> = ["Steve", "alex", "Stella", "STONE", "bob"]
        .iter()
        .map(|s| s.to_string())
        .collect();

    let once = filter_partial(Some("st"), candidates);
    assert_eq!(once, vec!["Steve", "Stella", "STONE"]);

    let twice = filter_partial(Some("st"), once.clone());
    assert_eq!(twice, once);
}

#[test]
fn test_empty_partial_keeps_everything() {
    let candidates = vec!["b".to_string(), "a".to_string()];
    assert_eq!(filter_partial(Some(""), candidates.clone()), candidates);
    assert_eq!(filter_partial(None, candidates.clone()), candidates);
}
