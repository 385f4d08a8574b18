use super::*;

// =============================================================================
// env_parse
// =============================================================================

#[test]
fn env_parse_missing_returns_default() {
    let val: u64 = env_parse("__EASEL_TEST_NONEXISTENT_KEY__", 42);
    assert_eq!(val, 42);
}

#[test]
fn env_parse_present_valid() {
    unsafe { std::env::set_var("__EASEL_TEST_EP_VALID__", "99") };
    let val: u64 = env_parse("__EASEL_TEST_EP_VALID__", 0);
    assert_eq!(val, 99);
    unsafe { std::env::remove_var("__EASEL_TEST_EP_VALID__") };
}

#[test]
fn env_parse_present_invalid_returns_default() {
    unsafe { std::env::set_var("__EASEL_TEST_EP_INVALID__", "soon") };
    let val: u64 = env_parse("__EASEL_TEST_EP_INVALID__", 7);
    assert_eq!(val, 7);
    unsafe { std::env::remove_var("__EASEL_TEST_EP_INVALID__") };
}

// =============================================================================
// StoreConfig
// =============================================================================

#[test]
fn default_config_matches_constants() {
    let config = StoreConfig::default();
    assert_eq!(config.base_url, DEFAULT_BASE_URL);
    assert_eq!(config.request_timeout_secs, DEFAULT_REQUEST_TIMEOUT_SECS);
    assert_eq!(config.connect_timeout_secs, DEFAULT_CONNECT_TIMEOUT_SECS);
}

#[test]
fn with_base_url_strips_trailing_slash() {
    let config = StoreConfig::default().with_base_url("http://paint.example:8080///");
    assert_eq!(config.base_url, "http://paint.example:8080");
}
