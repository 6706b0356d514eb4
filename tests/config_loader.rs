mod common;

use common::{registry, Console};
use commandlib::command::{HandlerDecl, ParameterSpec};
use commandlib::config::{CommandConfig, ConfigError, Messages, OverloadPolicy};
use commandlib::{Command, Outcome};
use std::fs;
use tempfile::TempDir;

fn write_config(content: &str) -> (TempDir, std::path::PathBuf) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("commands.toml");
    fs::write(&path, content).expect("Failed to write config");
    (temp_dir, path)
}

#[test]
fn test_config_default_values() {
    let config = CommandConfig::default();

    assert_eq!(config.overload_policy, OverloadPolicy::FirstCompatible);
    assert!(config.allow_multiple_main);
    assert_eq!(config.default_description, "No description provided");
    assert_eq!(
        config.messages.permission_denied,
        "You do not have permission to use this command."
    );
    assert!(config.validate().is_ok());
}

#[test]
fn test_missing_file_returns_default() {
    let temp_dir = TempDir::new().unwrap();
    let config = CommandConfig::load_from(&temp_dir.path().join("absent.toml")).unwrap();
    assert_eq!(config, CommandConfig::default());
}

#[test]
fn test_partial_file_keeps_other_defaults() {
    let (_dir, path) = write_config(
        r#"
overload_policy = "error_if_ambiguous"

[messages]
permission_denied = "Nope."
"#,
    );

    let config = CommandConfig::load_from(&path).unwrap();

    assert_eq!(config.overload_policy, OverloadPolicy::ErrorIfAmbiguous);
    assert!(config.allow_multiple_main);
    assert_eq!(config.messages.permission_denied, "Nope.");
    assert_eq!(config.messages.no_syntaxes, Messages::default().no_syntaxes);
}

#[test]
fn test_invalid_toml_is_parse_error() {
    let (_dir, path) = write_config("overload_policy = [");
    assert!(matches!(
        CommandConfig::load_from(&path),
        Err(ConfigError::ParseError { .. })
    ));
}

#[test]
fn test_unknown_policy_is_parse_error() {
    assert!(matches!(
        CommandConfig::from_toml_str(r#"overload_policy = "random""#),
        Err(ConfigError::ParseError { .. })
    ));
}

#[test]
fn test_blank_message_fails_validation() {
    let err = CommandConfig::from_toml_str("[messages]\nno_syntaxes = \"  \"\n").unwrap_err();
    match err {
        ConfigError::ValidationError { message } => assert!(message.contains("no_syntaxes")),
        other => panic!("expected validation error, got {:?}", other),
    }
}

#[test]
fn test_blank_default_description_fails_validation() {
    let result = CommandConfig::from_toml_str(r#"default_description = """#);
    assert!(matches!(result, Err(ConfigError::ValidationError { .. })));
}

#[test]
fn test_loaded_messages_reach_the_sender() {
    let (_dir, path) = write_config(
        r#"
default_description = "Undocumented"

[messages]
usage_header_single = "Usage: "
"#,
    );
    let config = CommandConfig::load_from(&path).unwrap();

    let command = Command::builder("warn", registry())
        .config(config)
        .handler(HandlerDecl::main(|_, _| Ok(())).param(ParameterSpec::text("player")))
        .build()
        .unwrap();

    let outcome = command.execute(&Console, &[]);
    assert!(matches!(outcome, Outcome::Failed(_)));
    assert_eq!(
        command.render(&Console, &outcome),
        vec!["Usage: ", "/warn <player> - Undocumented"]
    );
}
