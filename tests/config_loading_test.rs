use entitlements_clients::{
    ams::{self, AccountQuotaClient},
    bop::{self, UserIdentityClient},
    config::load_config,
    ClientVariant,
};
use std::io::Write;

fn write_config(contents: &str) -> anyhow::Result<tempfile::NamedTempFile> {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile()?;
    file.write_all(contents.as_bytes())?;
    Ok(file)
}

#[tokio::test]
async fn test_debug_config_builds_mock_clients() -> anyhow::Result<()> {
    let file = write_config(
        r#"
[ams]
debug = true

[bop]
debug = true
mock_org_id = "7654321"

[logging]
level = "debug"
format = "json"
"#,
    )?;

    let cfg = load_config(file.path())?;
    assert!(cfg.ams.client_id.is_empty());
    assert_eq!(cfg.logging.format, "json");

    let ams_client = ams::get_client(&cfg.ams).await?;
    assert_eq!(ams_client.variant(), ClientVariant::Mock);
    let subs = ams_client.get_subscriptions(10, 1).await?;
    assert_eq!(subs.len(), 1);

    let bop_client = bop::get_client_with(&cfg.bop)?;
    let user = bop_client.get_user("jdoe").await?;
    assert_eq!(user.org_id, "7654321");

    Ok(())
}

#[tokio::test]
async fn test_live_config_without_credentials_is_rejected() -> anyhow::Result<()> {
    let file = write_config(
        r#"
[ams]
url = "https://api.example.com"
"#,
    )?;

    let err = load_config(file.path()).unwrap_err();
    assert!(err.to_string().contains("ams.client_id must be set"));

    Ok(())
}

#[tokio::test]
async fn test_missing_file_falls_back_to_defaults() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let missing = dir.path().join("absent.toml");

    // Defaults select the live AMS client, which needs credentials
    let err = load_config(&missing).unwrap_err();
    assert_eq!(err.kind(), "config_error");

    Ok(())
}
