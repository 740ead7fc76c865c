use assert_cmd::cargo::cargo_bin_cmd;
use predicates::str::contains;

#[test]
fn top_level_help_lists_commands() {
    let mut cmd = cargo_bin_cmd!("shelfctl");
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(contains("libraries"))
        .stdout(contains("create-library"))
        .stdout(contains("--base-url"));
}

#[test]
fn items_help_documents_paging() {
    let mut cmd = cargo_bin_cmd!("shelfctl");
    let output = cmd
        .arg("items")
        .arg("--help")
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let text = String::from_utf8_lossy(&output);
    assert!(text.contains("--limit"), "items help missing --limit");
    assert!(text.contains("--collapse-series"), "items help missing --collapse-series");
}

#[test]
fn missing_server_address_fails_cleanly() {
    let dir = tempfile::TempDir::new().unwrap();
    let mut cmd = cargo_bin_cmd!("shelfctl");
    cmd.current_dir(dir.path())
        .env_remove("SHELF_BASE_URL")
        .env_remove("SHELF_CONFIG")
        .arg("--env-file")
        .arg(dir.path().join("absent.env"))
        .arg("libraries")
        .assert()
        .failure()
        .stderr(contains("failed to load configuration"));
}
