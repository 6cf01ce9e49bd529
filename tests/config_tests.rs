//! Integration tests for configuration and credential sources.

use std::io::Write;

use jss_api::config::{JssConfigBuilder, PASSWORD_KEY, USER_KEY};
use jss_api::{
    ConfigError, CredentialSource, Credentials, EnvCredentials, JssConfig, JssPrefs, Session,
};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn prefs_file(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

// ============================================================================
// Preferences document
// ============================================================================

#[test]
fn test_prefs_missing_password_names_key() {
    let file = prefs_file(r#"{"jss_url": "https://jss.example.com", "jss_user": "api"}"#);
    let result = JssConfig::from_source(&JssPrefs::new(file.path()));

    assert_eq!(
        result.unwrap_err(),
        ConfigError::PreferencesMissingKey {
            key: PASSWORD_KEY.to_string()
        }
    );
}

#[test]
fn test_prefs_blank_value_counts_as_missing() {
    let file = prefs_file(
        r#"{"jss_url": "https://jss.example.com", "jss_user": "  ", "jss_pass": "secret"}"#,
    );
    let result = JssPrefs::new(file.path()).load();

    assert!(matches!(
        result,
        Err(ConfigError::PreferencesMissingKey { key }) if key == USER_KEY
    ));
}

#[test]
fn test_prefs_malformed_document_is_invalid() {
    let file = prefs_file("jss_url = https://jss.example.com");
    let result = JssPrefs::new(file.path()).load();

    assert!(matches!(
        result,
        Err(ConfigError::InvalidPreferences { .. })
    ));
}

#[test]
fn test_prefs_invalid_url_is_rejected() {
    let file = prefs_file(r#"{"jss_url": "jss.example.com", "jss_user": "api", "jss_pass": "secret"}"#);
    let result = JssPrefs::new(file.path()).load();

    assert!(matches!(result, Err(ConfigError::InvalidUrl { .. })));
}

// ============================================================================
// Environment
// ============================================================================

#[test]
fn test_env_credentials_read_prefixed_variables() {
    std::env::set_var("CONFIG_TESTS_JSS_URL", "https://jss.example.com:8443");
    std::env::set_var("CONFIG_TESTS_JSS_USER", "api");
    std::env::set_var("CONFIG_TESTS_JSS_PASSWORD", "secret");

    let config = JssConfig::from_source(&EnvCredentials::with_prefix("CONFIG_TESTS_JSS")).unwrap();

    assert_eq!(
        config.url().api_root(),
        "https://jss.example.com:8443/JSSResource"
    );
    assert_eq!(config.user().as_ref(), "api");
}

#[test]
fn test_env_credentials_report_variable_name() {
    std::env::set_var("CONFIG_TESTS_PARTIAL_URL", "https://jss.example.com");
    std::env::remove_var("CONFIG_TESTS_PARTIAL_USER");

    let result = EnvCredentials::with_prefix("CONFIG_TESTS_PARTIAL").load();

    assert!(matches!(
        result,
        Err(ConfigError::PreferencesMissingKey { key }) if key == "CONFIG_TESTS_PARTIAL_USER"
    ));
}

// ============================================================================
// Builder and session
// ============================================================================

#[test]
fn test_builder_from_credentials_keeps_defaults() {
    let credentials = Credentials::new("https://jss.example.com/", "api", "secret").unwrap();
    let config = JssConfigBuilder::from_credentials(credentials)
        .user_agent_prefix("jss_helper/1.0")
        .build()
        .unwrap();

    assert_eq!(config.url().api_root(), "https://jss.example.com/JSSResource");
    assert_eq!(config.user_agent_prefix(), Some("jss_helper/1.0"));
    assert!(config.ssl_verify());
    assert_eq!(config.created_id_path(), "id");
}

#[test]
fn test_session_from_missing_prefs_fails_before_network() {
    let dir = tempfile::tempdir().unwrap();
    let prefs = JssPrefs::new(dir.path().join(JssPrefs::FILE_NAME));

    let result = Session::from_source(&prefs);
    assert!(matches!(
        result,
        Err(ConfigError::PreferencesMissingKey { .. })
    ));
}

#[tokio::test]
async fn test_session_from_prefs_authenticates_with_stored_credentials() {
    let server = MockServer::start().await;
    let file = prefs_file(&format!(
        r#"{{"jss_url": "{}", "jss_user": "api", "jss_pass": "secret"}}"#,
        server.uri()
    ));

    Mock::given(method("GET"))
        .and(path("/JSSResource/sites"))
        .and(header("Authorization", "Basic YXBpOnNlY3JldA=="))
        .respond_with(ResponseTemplate::new(200).set_body_string("<sites><size>0</size></sites>"))
        .expect(1)
        .mount(&server)
        .await;

    let session = Session::from_source(&JssPrefs::new(file.path())).unwrap();
    let body = session.raw_get("sites").await.unwrap();

    assert!(body.contains("<size>0</size>"));
    assert_eq!(session.base_uri(), format!("{}/JSSResource", server.uri()));
}
