use pretty_assertions::assert_eq;
use studypact_api::config::ApiConfig;

// Env-var access is process-global, so everything lives in one test.
#[test]
fn test_config_from_env() {
    unsafe {
        std::env::set_var("DATABASE_URL", "postgres://localhost/studypact");
        std::env::set_var("API_HOST", "127.0.0.1");
        std::env::set_var("API_PORT", "8080");
        std::env::set_var("API_CORS_ORIGINS", "http://a.test, http://b.test");
        std::env::set_var("SETTLEMENT_TIMEZONE", "Asia/Seoul");
    }

    let config = ApiConfig::from_env().expect("config should load");

    assert_eq!(config.host, "127.0.0.1");
    assert_eq!(config.port, 8080);
    assert_eq!(config.database_url, "postgres://localhost/studypact");
    assert_eq!(
        config.cors_origins,
        Some(vec!["http://a.test".to_string(), "http://b.test".to_string()])
    );
    assert_eq!(config.settlement_timezone, chrono_tz::Asia::Seoul);
    assert_eq!(config.server_addr(), "127.0.0.1:8080");

    // A bad timezone is a startup error, not a silent default.
    unsafe {
        std::env::set_var("SETTLEMENT_TIMEZONE", "Mars/Olympus_Mons");
    }
    assert!(ApiConfig::from_env().is_err());

    unsafe {
        std::env::remove_var("SETTLEMENT_TIMEZONE");
    }
}
