//! CLI command handler tests

#[cfg(feature = "cli")]
use cv_showcase::cli::CliError;
#[cfg(feature = "cli")]
use cv_showcase::cli::commands::convert::{
    ToPlatformArgs, handle_to_platform, handle_to_simplified,
};
#[cfg(feature = "cli")]
use cv_showcase::cli::commands::init::handle_init;
#[cfg(feature = "cli")]
use cv_showcase::cli::commands::{load_config, load_config_or_default};
#[cfg(feature = "cli")]
use cv_showcase::cli::commands::variant::{
    handle_create, handle_delete, handle_info, handle_list, handle_rename, open_store,
};
#[cfg(feature = "cli")]
use cv_showcase::config::{CONFIG_FILENAME, ShowcaseConfig};
#[cfg(feature = "cli")]
use cv_showcase::store::StoreError;
#[cfg(feature = "cli")]
use std::process::{Command, Output};
#[cfg(feature = "cli")]
use tempfile::TempDir;

#[cfg(feature = "cli")]
fn write_profile(dir: &std::path::Path) -> std::path::PathBuf {
    let path = dir.join("export.json");
    std::fs::write(
        &path,
        r#"{
  "owner": {"firstname": "Alan", "lastname": "Turing", "login": "alan@example.com", "url": ""},
  "title": {"value": "Mathematician"},
  "presentation": {"text": "On computable numbers."},
  "contacts": {"address": {"country": "UK"}},
  "experiences": [],
  "skills": []
}"#,
    )
    .unwrap();
    path
}

#[cfg(feature = "cli")]
#[test]
fn test_cli_to_simplified_and_back() {
    let temp = TempDir::new().unwrap();
    let input = write_profile(temp.path());
    let showcase = temp.path().join("showcases").join("baseline.yaml");
    let output = temp.path().join("profile.json");

    handle_to_simplified(&input, &showcase).unwrap();
    assert!(showcase.exists());
    assert!(temp.path().join("showcases").join("baseline.original.json").exists());

    let args = ToPlatformArgs {
        input: showcase,
        output: output.clone(),
        template: None,
        pretty: false,
    };
    handle_to_platform(&args).unwrap();
    let content = std::fs::read_to_string(&output).unwrap();
    assert!(!content.contains('\n'));
    let profile: serde_json::Value = serde_json::from_str(&content).unwrap();
    assert_eq!(profile["owner"]["lastname"], "Turing");
}

#[cfg(feature = "cli")]
#[test]
fn test_cli_missing_input() {
    let temp = TempDir::new().unwrap();
    let result = handle_to_simplified(
        &temp.path().join("missing.json"),
        &temp.path().join("out.yaml"),
    );
    assert!(matches!(result, Err(CliError::FileNotFound(_))));
}

#[cfg(feature = "cli")]
#[test]
fn test_cli_variant_commands() {
    let temp = TempDir::new().unwrap();
    let config = load_config(temp.path()).unwrap();
    let store = open_store(temp.path(), &config);

    let input = write_profile(temp.path());
    handle_to_simplified(&input, &store.path(store.baseline())).unwrap();

    handle_create(&store, "research", None, "Academic roles").unwrap();
    handle_create(&store, "teaching", Some("research"), "").unwrap();
    assert_eq!(
        handle_list(&store).unwrap(),
        vec!["baseline", "research", "teaching"]
    );

    let info = handle_info(&store, "teaching").unwrap();
    assert_eq!(info.variant.unwrap().created_from, "research");

    handle_rename(&store, "teaching", "lecturing").unwrap();
    handle_delete(&store, "lecturing").unwrap();
    assert_eq!(handle_list(&store).unwrap(), vec!["baseline", "research"]);

    let result = handle_delete(&store, "baseline");
    assert!(matches!(
        result,
        Err(CliError::StoreError(StoreError::ProtectedBaseline(_)))
    ));
}

#[cfg(feature = "cli")]
#[test]
fn test_cli_init_writes_config_once() {
    let temp = TempDir::new().unwrap();
    let path = handle_init(temp.path(), false).unwrap();
    assert!(path.exists());

    assert!(matches!(
        handle_init(temp.path(), false),
        Err(CliError::InvalidArgument(_))
    ));
    handle_init(temp.path(), true).unwrap();
}

#[cfg(feature = "cli")]
fn run_cli(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_cv-showcase"))
        .args(args)
        .output()
        .unwrap()
}

#[cfg(feature = "cli")]
#[test]
fn test_cli_unknown_mode_prints_usage() {
    let output = run_cli(&["bogus"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Usage"), "{}", stderr);
}

#[cfg(feature = "cli")]
#[test]
fn test_cli_missing_argument_prints_usage() {
    let output = run_cli(&["toSimplified", "only-one"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Usage"), "{}", stderr);
}

#[cfg(feature = "cli")]
#[test]
fn test_cli_malformed_config_only_blocks_store_commands() {
    let temp = TempDir::new().unwrap();
    std::fs::write(temp.path().join(CONFIG_FILENAME), "[store\nbaseline = ").unwrap();
    assert!(load_config(temp.path()).is_err());
    assert_eq!(load_config_or_default(temp.path()), ShowcaseConfig::default());

    let input = write_profile(temp.path());
    let output = temp.path().join("cv.yaml");
    let workspace = temp.path().to_str().unwrap();
    let converted = run_cli(&[
        "-w",
        workspace,
        "toSimplified",
        input.to_str().unwrap(),
        output.to_str().unwrap(),
    ]);
    assert!(converted.status.success());
    assert!(output.exists());

    let json = temp.path().join("cv.json");
    let exported = run_cli(&[
        "-w",
        workspace,
        "toPlatform",
        output.to_str().unwrap(),
        json.to_str().unwrap(),
    ]);
    assert!(exported.status.success());
    assert!(json.exists());

    let listed = run_cli(&["-w", workspace, "list"]);
    assert!(!listed.status.success());
}
