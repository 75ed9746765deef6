use std::io::Write;

use base_compound_actions::config::Settings;
use base_compound_actions::models::Network;
use base_compound_actions::SettingsError;

fn config_file(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(".toml")
        .tempfile()
        .unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
fn test_load_from_file() {
    let file = config_file(
        r#"
[network]
id = "base-mainnet"
rpc_url = "https://mainnet.base.org"

[logging]
json = true
"#,
    );

    let settings = Settings::load(Some(file.path())).unwrap();
    assert_eq!(settings.network(), Network::Mainnet);
    assert_eq!(settings.network.rpc_url, "https://mainnet.base.org");
    assert!(settings.logging.json);
    assert_eq!(settings.confirmation.poll_interval_ms, 2000);
}

#[test]
fn test_invalid_file_values_rejected() {
    let file = config_file(
        r#"
[network]
rpc_url = "::not a url::"
"#,
    );

    let err = Settings::load(Some(file.path())).unwrap_err();
    assert!(matches!(err, SettingsError::Invalid(_)));
}

#[test]
fn test_missing_explicit_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("absent.toml");
    assert!(matches!(Settings::load(Some(&missing)), Err(SettingsError::Load(_))));
}

#[test]
fn test_environment_overrides() {
    std::env::set_var("COMPOUND__CONFIRMATION__MAX_POLLS", "7");
    let file = config_file("[confirmation]\nmax_polls = 30\n");

    let settings = Settings::load(Some(file.path())).unwrap();
    std::env::remove_var("COMPOUND__CONFIRMATION__MAX_POLLS");
    assert_eq!(settings.confirmation.max_polls, 7);
}
