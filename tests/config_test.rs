use stockreport::config::Config;

#[test]
fn test_config_missing_finnhub_api_key() {
    std::env::remove_var("FINNHUB_API_KEY");
    let result = Config::load();
    assert!(result.is_err());
    let err = result.unwrap_err();
    assert!(err.to_string().to_lowercase().contains("finnhub_api_key"));
}
