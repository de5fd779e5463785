/*!
 * Tests for application configuration functionality
 */

use std::collections::HashMap;

use anyhow::Result;

use kisanroute::app_config::{
    Config, ENV_HANDLER_TIMEOUT_SECS, ENV_MIN_DISPATCH_CONFIDENCE, ENV_MIN_REPORT_CONFIDENCE, HandlerConfig,
    LogLevel,
};
use kisanroute::classification::IntentCategory;

use crate::common::{create_temp_dir, create_test_file};

fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect::<HashMap<_, _>>();
    move |key| map.get(key).cloned()
}

/// Test default configuration values
#[test]
fn test_default_config_withNoParameters_shouldHaveCorrectDefaults() {
    let config = Config::default();

    assert_eq!(config.min_dispatch_confidence, 0.35);
    assert_eq!(config.min_report_confidence, 0.4);
    assert_eq!(config.handler_timeout_secs, 5);
    assert_eq!(config.log_level, LogLevel::Info);
    assert!(config.lexicon_path.is_none());
    assert!(config.handlers.is_empty());
    assert!(config.validate().is_ok());
}

/// Test configuration validation
#[test]
fn test_config_validation_withVariousConfigs_shouldValidateCorrectly() {
    let mut config = Config::default();

    config.min_dispatch_confidence = 1.5;
    assert!(config.validate().is_err());
    config.min_dispatch_confidence = 0.35;

    config.min_report_confidence = f64::NAN;
    assert!(config.validate().is_err());
    config.min_report_confidence = 0.4;

    config.handler_timeout_secs = 0;
    assert!(config.validate().is_err());
    config.handler_timeout_secs = 5;

    config.handlers = vec![HandlerConfig::new(IntentCategory::Weather, "not a url")];
    assert!(config.validate().is_err());

    config.handlers = vec![HandlerConfig::new(IntentCategory::Unclassified, "http://localhost:9000")];
    assert!(config.validate().is_err());

    config.handlers = vec![
        HandlerConfig::new(IntentCategory::Market, "http://localhost:9000/market"),
        HandlerConfig::new(IntentCategory::Market, "http://localhost:9001/market"),
    ];
    assert!(config.validate().is_err());

    config.handlers = vec![HandlerConfig::new(IntentCategory::Market, "http://localhost:9000/market")];
    assert!(config.validate().is_ok());
}

#[test]
fn test_envOverrides_withValidValues_shouldReplaceFileValues() -> Result<()> {
    let mut config = Config::default();
    config.apply_env_overrides_from(lookup(&[
        (ENV_MIN_DISPATCH_CONFIDENCE, "0.5"),
        (ENV_MIN_REPORT_CONFIDENCE, " 0.6 "),
        (ENV_HANDLER_TIMEOUT_SECS, "12"),
    ]))?;

    assert_eq!(config.min_dispatch_confidence, 0.5);
    assert_eq!(config.min_report_confidence, 0.6);
    assert_eq!(config.handler_timeout_secs, 12);
    Ok(())
}

#[test]
fn test_envOverrides_withUnsetKeys_shouldKeepValues() -> Result<()> {
    let mut config = Config::default();
    config.apply_env_overrides_from(lookup(&[]))?;
    assert_eq!(config, Config::default());
    Ok(())
}

#[test]
fn test_envOverrides_withGarbage_shouldFail() {
    let mut config = Config::default();
    let result = config.apply_env_overrides_from(lookup(&[(ENV_HANDLER_TIMEOUT_SECS, "soon")]));
    assert!(result.is_err());
}

#[test]
fn test_loadOrCreate_withMissingFile_shouldWriteDefaults() -> Result<()> {
    let dir = create_temp_dir()?;
    let path = dir.path().join("conf.json");

    let config = Config::load_or_create(&path)?;
    assert_eq!(config, Config::default());
    assert!(path.exists());

    let reloaded = Config::load_or_create(&path)?;
    assert_eq!(reloaded, config);
    Ok(())
}

#[test]
fn test_loadOrCreate_withPartialFile_shouldFillDefaults() -> Result<()> {
    let dir = create_temp_dir()?;
    let path = create_test_file(
        dir.path(),
        "conf.json",
        r#"{
            "min_report_confidence": 0.5,
            "log_level": "debug",
            "handlers": [
                {"category": "weather", "endpoint": "https://imd.example/api", "api_key": "k", "timeout_secs": 2}
            ]
        }"#,
    )?;

    let config = Config::load_or_create(&path)?;
    assert_eq!(config.min_report_confidence, 0.5);
    assert_eq!(config.min_dispatch_confidence, 0.35);
    assert_eq!(config.log_level, LogLevel::Debug);

    let weather = config.handler_for(IntentCategory::Weather).unwrap();
    assert_eq!(weather.api_key, "k");
    assert_eq!(weather.timeout(config.handler_timeout_secs).as_secs(), 2);
    assert!(config.handler_for(IntentCategory::Market).is_none());
    assert!(config.validate().is_ok());
    Ok(())
}

#[test]
fn test_loadOrCreate_withInvalidJson_shouldFail() -> Result<()> {
    let dir = create_temp_dir()?;
    let path = create_test_file(dir.path(), "conf.json", "{ broken")?;
    assert!(Config::load_or_create(&path).is_err());
    Ok(())
}

#[test]
fn test_orchestratorConfig_shouldMirrorThresholds() {
    let config = Config {
        min_dispatch_confidence: 0.2,
        min_report_confidence: 0.3,
        ..Config::default()
    };
    let thresholds = config.orchestrator_config();
    assert_eq!(thresholds.min_dispatch_confidence, 0.2);
    assert_eq!(thresholds.min_report_confidence, 0.3);
}
