use anyhow::Result;
use httpmock::prelude::*;
use nvr_fw_check::app::checker::{EXIT_OK, EXIT_UPDATE_AVAILABLE};
use nvr_fw_check::{App, AppConfig, ConfigStore, FirmwareChecker};
use std::io::Cursor;
use tempfile::TempDir;

fn write_config(temp_dir: &TempDir, base_url: &str, current_version: &str) -> Result<ConfigStore> {
    let config_content = format!(
        r#"
[device]
model = "RLN8-410"
hardware_version = "N2MB02"
current_firmware_version = "{}"

[settings]
check_on_startup = true
verbose_output = false
auto_open_browser_on_manual = false

[vendor]
base_url = "{}"
timeout_seconds = 5
"#,
        current_version, base_url
    );

    let path = temp_dir.path().join("config");
    std::fs::write(&path, config_content)?;
    Ok(ConfigStore::new(path))
}

async fn mock_latest(server: &MockServer, version: &str) {
    server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/wp-json/reo-v2/download/firmware/")
                .query_param("dlProductId", "33")
                .query_param("hardwareVersion", "231");
            then.status(200).json_body(serde_json::json!({
                "data": [{
                    "firmwares": [
                        {"version": "v3.4.0.293_24010832", "updated_at": 1708309607000_i64},
                        {"version": version, "updated_at": 1736325210000_i64}
                    ]
                }]
            }));
        })
        .await;
}

async fn run_automatic(store: ConfigStore) -> Result<(i32, String)> {
    let mut input = Cursor::new("");
    let mut sink = Vec::new();
    let config = store.load_or_init(&mut input, &mut sink)?;

    let checker = FirmwareChecker::from_config(&config)?;
    let app = App::new(store, config);

    let mut out = Vec::new();
    let code = app.run_check(&checker, &mut out).await?;
    Ok((code, String::from_utf8(out)?))
}

#[tokio::test]
async fn test_automatic_check_reports_update() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let server = MockServer::start_async().await;
    mock_latest(&server, "v3.5.1.368_25010326").await;

    let store = write_config(&temp_dir, &server.base_url(), "v3.5.1.368_25010324")?;
    let (code, output) = run_automatic(store).await?;

    assert_eq!(code, EXIT_UPDATE_AVAILABLE);
    assert!(output.contains("New version available: v3.5.1.368_25010326 (current: v3.5.1.368_25010324)"));
    assert!(output.contains("Update available!"));
    Ok(())
}

#[tokio::test]
async fn test_automatic_check_up_to_date() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let server = MockServer::start_async().await;
    mock_latest(&server, "v3.5.1.368_25010326").await;

    let store = write_config(&temp_dir, &server.base_url(), "v3.5.1.368_25010326")?;
    let (code, output) = run_automatic(store).await?;

    assert_eq!(code, EXIT_OK);
    assert!(output.contains("Already on latest: v3.5.1.368_25010326"));
    assert!(output.contains("No updates needed"));
    Ok(())
}

#[tokio::test]
async fn test_automatic_check_current_newer() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let server = MockServer::start_async().await;
    mock_latest(&server, "v3.5.1.368_25010326").await;

    let store = write_config(&temp_dir, &server.base_url(), "v3.6.0.400_26010101")?;
    let (code, output) = run_automatic(store).await?;

    assert_eq!(code, EXIT_OK);
    assert!(output.contains("is newer than listed v3.5.1.368_25010326"));
    Ok(())
}

#[tokio::test]
async fn test_automatic_check_lookup_failed_exits_zero() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let server = MockServer::start_async().await;

    let store = write_config(&temp_dir, &server.base_url(), "v3.5.1.368_25010326")?;
    let (code, output) = run_automatic(store).await?;

    assert_eq!(code, EXIT_OK);
    assert!(output.contains("Could not find firmware information automatically"));
    assert!(output.contains(&format!("{}/download-center/", server.base_url())));
    Ok(())
}

#[tokio::test]
async fn test_update_version_then_check_sees_new_version() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let server = MockServer::start_async().await;
    mock_latest(&server, "v3.5.1.368_25010326").await;

    let store = write_config(&temp_dir, &server.base_url(), "v3.4.0.293_24010832")?;
    let config: AppConfig = store.load()?;
    let mut app = App::new(store.clone(), config);

    let mut out = Vec::new();
    assert_eq!(app.update_version("v3.5.1.368_25010326", &mut out)?, EXIT_OK);

    let (code, output) = run_automatic(store).await?;
    assert_eq!(code, EXIT_OK);
    assert!(output.contains("Already on latest"));
    Ok(())
}

#[tokio::test]
async fn test_manual_check_against_stored_config() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let store = write_config(&temp_dir, "https://example.invalid", "v3.5.1.368_25010324")?;
    let config = store.load()?;
    let mut app = App::new(store.clone(), config);

    let mut input = Cursor::new("v3.5.1.368_25010326\ny\n");
    let mut out = Vec::new();
    let code = app.run_manual(&mut input, &mut out, |_| Ok(()))?;

    assert_eq!(code, EXIT_UPDATE_AVAILABLE);
    let output = String::from_utf8(out)?;
    assert!(output.contains("Open https://example.invalid/download-center/ in your browser"));
    assert_eq!(
        store.load()?.device.current_firmware_version,
        "v3.5.1.368_25010326"
    );
    Ok(())
}
