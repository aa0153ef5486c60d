use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// Binary command with configuration isolated to a temp directory
fn labelsync(config_home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("labelsync").unwrap();
    cmd.env("XDG_CONFIG_HOME", config_home.path());
    cmd
}

/// Fill in the full service/storage configuration via environment
fn with_service_config(cmd: &mut Command) -> &mut Command {
    cmd.env("LABELSYNC_SERVICE__URL", "http://127.0.0.1:9") // closed port, never reached
        .env("LABELSYNC_SERVICE__USER", "ann")
        .env("LABELSYNC_STORAGE__ACCOUNT", "labelstore")
        .env("LABELSYNC_STORAGE__ACCOUNT_KEY", "key")
        .env("LABELSYNC_STORAGE__CONTAINER", "perm")
        .env("LABELSYNC_STORAGE__TEMP_CONTAINER", "temp")
        .env("LABELSYNC_STORAGE__SAS_TOKEN", "sv=x&sig=y")
}

#[test]
fn test_version() {
    let config_home = TempDir::new().unwrap();
    labelsync(&config_home)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_onboard_missing_folder() {
    let config_home = TempDir::new().unwrap();
    labelsync(&config_home)
        .arg("onboard")
        .arg("/definitely/not/a/folder")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Folder not found"));
}

#[test]
fn test_onboard_requires_configuration() {
    let config_home = TempDir::new().unwrap();
    let folder = TempDir::new().unwrap();

    labelsync(&config_home)
        .arg("onboard")
        .arg(folder.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Missing configuration value"));
}

#[test]
fn test_onboard_empty_folder_reports_and_succeeds() {
    let config_home = TempDir::new().unwrap();
    let folder = TempDir::new().unwrap();
    fs::write(folder.path().join("notes.txt"), b"not an image").unwrap();

    with_service_config(labelsync(&config_home).arg("onboard").arg(folder.path()))
        .assert()
        .success()
        .stdout(predicate::str::contains("No supported image files found"));
}

#[test]
fn test_download_rejects_zero_count() {
    let config_home = TempDir::new().unwrap();

    with_service_config(
        labelsync(&config_home)
            .arg("download")
            .arg("--count")
            .arg("0"),
    )
    .assert()
    .failure()
    .stderr(predicate::str::contains("image count must be between 1 and"));
}

#[test]
fn test_download_rejects_count_over_limit() {
    let config_home = TempDir::new().unwrap();

    with_service_config(
        labelsync(&config_home)
            .arg("download")
            .arg("--count")
            .arg("101"),
    )
    .assert()
    .failure()
    .stderr(predicate::str::contains("got 101"));
}

#[test]
fn test_upload_without_downloaded_document() {
    let config_home = TempDir::new().unwrap();
    let tagging = TempDir::new().unwrap();

    with_service_config(labelsync(&config_home).arg("upload"))
        .env(
            "LABELSYNC_TAGGING__LOCATION",
            tagging.path().to_str().unwrap(),
        )
        .assert()
        .failure()
        .stderr(predicate::str::contains("data.json"));
}

#[test]
fn test_config_set_and_get() {
    let config_home = TempDir::new().unwrap();

    labelsync(&config_home)
        .arg("config")
        .arg("set")
        .arg("tagging.image_count")
        .arg("25")
        .assert()
        .success();

    labelsync(&config_home)
        .arg("config")
        .arg("get")
        .arg("tagging.image_count")
        .assert()
        .success()
        .stdout(predicate::str::contains("25"));
}

#[test]
fn test_config_set_rejects_invalid_image_count() {
    let config_home = TempDir::new().unwrap();

    labelsync(&config_home)
        .arg("config")
        .arg("set")
        .arg("tagging.image_count")
        .arg("0")
        .assert()
        .failure();
}

#[test]
fn test_config_list_shows_sections() {
    let config_home = TempDir::new().unwrap();

    labelsync(&config_home)
        .arg("config")
        .arg("list")
        .assert()
        .success()
        .stderr(predicate::str::contains("service"))
        .stderr(predicate::str::contains("tagging"));
}

#[test]
fn test_completions_generate() {
    let config_home = TempDir::new().unwrap();

    labelsync(&config_home)
        .arg("completions")
        .arg("bash")
        .assert()
        .success()
        .stdout(predicate::str::contains("labelsync"));
}
