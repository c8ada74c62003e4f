use graphdesk::config::Config;
use graphdesk::ui::core::Session;

#[test]
fn test_session_from_config() {
    let mut config = Config::default();
    config.server.url = "https://graph.example.com".to_string();
    config.server.username = "grace".to_string();
    config.server.api_key = "abcdef123456".to_string();

    let session = Session::from_config(&config);
    assert_eq!(session.server_url, "https://graph.example.com");
    assert!(session.has_api_key());
    assert_eq!(session.masked_key(), "****3456");
}

#[test]
fn test_recovery_command() {
    let mut session = Session {
        server_url: "http://localhost:8765".to_string(),
        username: "ada".to_string(),
        api_key: String::new(),
    };
    assert_eq!(
        session.recovery_command(),
        "graphdesk login --username ada --server http://localhost:8765"
    );

    session.username.clear();
    assert_eq!(
        session.recovery_command(),
        "graphdesk login --username <username> --server http://localhost:8765"
    );
}

#[test]
fn test_blank_key_is_not_configured() {
    let session = Session {
        api_key: "   ".to_string(),
        ..Session::default()
    };
    assert!(!session.has_api_key());
    assert_eq!(session.masked_key(), "not configured");

    let short = Session {
        api_key: "xy".to_string(),
        ..Session::default()
    };
    assert_eq!(short.masked_key(), "****xy");
}
