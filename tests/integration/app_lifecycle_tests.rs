/*!
 * Full app lifecycle tests: config file to controller to answers
 */

use std::io::Cursor;
use std::sync::Arc;

use anyhow::Result;

use kisanroute::app_config::{Config, HandlerConfig};
use kisanroute::classification::IntentCategory;
use kisanroute::handlers::{DomainHandler, HandlerRegistry, MockHandler};
use kisanroute::orchestrator::{FALLBACK_SOURCE, Orchestrator};
use kisanroute::Controller;

use crate::common::{create_temp_dir, create_test_file, registry_for_all};

#[test]
fn test_controller_withDefaultConfig_shouldUseOfflineHandlers() -> Result<()> {
    let registry = Controller::build_registry(&Config::default())?;

    assert_eq!(
        registry.categories(),
        vec![
            IntentCategory::Pest,
            IntentCategory::Irrigation,
            IntentCategory::Crop,
            IntentCategory::Finance
        ]
    );
    assert_eq!(registry.get(IntentCategory::Crop).unwrap().name(), "offline_advisory");
    Ok(())
}

#[test]
fn test_controller_withRemoteEndpoint_shouldRegisterRemoteHandler() -> Result<()> {
    let mut config = Config::default();
    config.handlers = vec![HandlerConfig {
        timeout_secs: Some(2),
        ..HandlerConfig::new(IntentCategory::Weather, "http://localhost:9000/weather")
    }];

    let registry = Controller::build_registry(&config)?;
    assert_eq!(registry.get(IntentCategory::Weather).unwrap().name(), "weather");
    assert_eq!(registry.timeout_for(IntentCategory::Weather).as_secs(), 2);
    assert_eq!(registry.timeout_for(IntentCategory::Crop).as_secs(), 5);
    Ok(())
}

#[test]
fn test_controller_withInvalidConfig_shouldRefuseToStart() {
    let config = Config {
        min_report_confidence: 2.0,
        ..Config::default()
    };
    assert!(Controller::with_config(config).is_err());
}

#[test]
fn test_controller_withMissingLexiconFile_shouldFail() {
    let config = Config {
        lexicon_path: Some("/nonexistent/lexicon.json".to_string()),
        ..Config::default()
    };
    assert!(Controller::with_config(config).is_err());
}

#[tokio::test]
async fn test_controller_ask_withOfflineCropQuestion_shouldAnswer() -> Result<()> {
    let controller = Controller::new_for_test()?;
    let result = controller.ask("Which crop variety to sow in rabi season?", None).await;

    assert_eq!(result.category, IntentCategory::Crop);
    assert_eq!(result.source, "offline_advisory");
    assert!(!result.fallback);
    Ok(())
}

#[tokio::test]
async fn test_controller_ask_withOfflineMarketQuestion_shouldFallBack() -> Result<()> {
    let controller = Controller::new_for_test()?;
    let result = controller.ask("wheat price today", None).await;

    assert_eq!(result.category, IntentCategory::Market);
    assert_eq!(result.source, FALLBACK_SOURCE);
    assert!(result.fallback);
    Ok(())
}

#[tokio::test]
async fn test_controller_withLexiconOverlay_shouldTranslateNewLanguage() -> Result<()> {
    let dir = create_temp_dir()?;
    let lexicon = create_test_file(
        dir.path(),
        "lexicon.json",
        r#"{"punjabi": {"terms": [
            {"native": "ਕੀਟ", "pivot": "pest"},
            {"native": "ਕਪਾਹ", "pivot": "cotton"},
            {"native": "ਪੱਤੇ", "pivot": "leaves"}
        ]}}"#,
    )?;
    let config = Config {
        lexicon_path: Some(lexicon.to_string_lossy().to_string()),
        ..Config::default()
    };

    let controller = Controller::with_config(config)?;
    let result = controller.ask("ਕਪਾਹ ਕੀਟ", None).await;

    assert_eq!(result.query.pivot_text, "cotton pest");
    assert_eq!(result.category, IntentCategory::Pest);
    assert!(result.response_text.contains("ਪੱਤੇ"));
    Ok(())
}

#[tokio::test]
async fn test_runRepl_shouldAnswerQueriesUntilQuit() -> Result<()> {
    let orchestrator = Orchestrator::with_registry(registry_for_all(Arc::new(MockHandler::working())))?;
    let controller = Controller::with_orchestrator(Config::default(), orchestrator);

    let input = Cursor::new("help\n\nWill it rain tomorrow?\ncategories\nquit\nwheat price today\n");
    let mut output = Vec::new();
    let answered = controller.run_repl(input, &mut output, Some("Nashik")).await?;

    let printed = String::from_utf8(output)?;
    assert_eq!(answered, 1);
    assert!(printed.contains("[weather] advice for: Will it rain tomorrow?"));
    assert!(printed.contains("Source: mock"));
    assert!(printed.contains("pest - Pest identification"));
    assert!(!printed.contains("wheat price today"));
    Ok(())
}

#[tokio::test]
async fn test_runRepl_languages_shouldMarkDetectionOnlyLanguages() -> Result<()> {
    let controller = Controller::with_orchestrator(
        Config::default(),
        Orchestrator::with_registry(HandlerRegistry::builder().build()?)?,
    );

    let mut output = Vec::new();
    controller.run_repl(Cursor::new("languages\n"), &mut output, None).await?;

    let printed = String::from_utf8(output)?;
    assert!(printed.contains("hi - Hindi\n"));
    assert!(printed.contains("kn - Kannada (detection only)"));
    Ok(())
}
