//! Settings file tests

use catmgr::filesys::file::File;
use catmgr::http::endpoint::QueryCharset;
use catmgr::logs::LogLevel;
use catmgr::storage::settings::Settings;

#[tokio::test]
async fn test_load_settings_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("settings.json");
    std::fs::write(
        &path,
        r#"{
            "log_level": "debug",
            "manager": {
                "url": "http://tomcat.internal:8080/manager/text",
                "username": "deployer",
                "password": "s3cret",
                "charset": "UTF-8",
                "user_agent": "ci-pipeline",
                "timeout_secs": 30
            }
        }"#,
    )
    .unwrap();

    let settings = Settings::load(&File::new(&path)).await.unwrap();
    assert_eq!(settings.log_level, LogLevel::Debug);

    let endpoint = settings.manager.endpoint().unwrap();
    assert_eq!(endpoint.url(), "http://tomcat.internal:8080/manager/text");
    assert_eq!(endpoint.username(), Some("deployer"));
    assert_eq!(endpoint.password(), Some("s3cret"));
    assert_eq!(endpoint.charset(), QueryCharset::Utf8);
    assert_eq!(endpoint.user_agent(), Some("ci-pipeline"));
    assert_eq!(endpoint.timeout(), Some(std::time::Duration::from_secs(30)));
}

#[tokio::test]
async fn test_missing_file_uses_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let file = File::new(dir.path().join("absent.json"));

    let settings = Settings::load_or_default(&file).await.unwrap();

    assert_eq!(settings.manager.url, "http://localhost:8080/manager/text");
    assert!(Settings::load(&file).await.is_err());
}
