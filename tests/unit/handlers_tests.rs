/*!
 * Tests for the handler registry and built-in handlers
 */

use std::sync::Arc;
use std::time::Duration;

use kisanroute::classification::IntentCategory;
use kisanroute::errors::Degradation;
use kisanroute::handlers::{
    DEFAULT_HANDLER_TIMEOUT, DomainHandler, HandlerRegistry, MockHandler, OfflineAdvisoryHandler,
};

use crate::common::mock_handlers::{BlockingHandler, MisroutingHandler, PanickingHandler, RecordingHandler};

#[tokio::test]
async fn test_dispatch_withWorkingHandler_shouldPassArgumentsThrough() {
    let handler = Arc::new(RecordingHandler::new("Expect light showers", 0.8));
    let registry = HandlerRegistry::builder()
        .register(IntentCategory::Weather, handler.clone())
        .build()
        .unwrap();

    let outcome = registry
        .dispatch(IntentCategory::Weather, "will it rain tomorrow", Some("Nashik"))
        .await;

    assert!(outcome.failure.is_none());
    assert_eq!(outcome.response.text, "Expect light showers");
    assert_eq!(outcome.response.confidence, 0.8);

    let calls = handler.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].pivot_text, "will it rain tomorrow");
    assert_eq!(calls[0].location_hint.as_deref(), Some("Nashik"));
}

#[tokio::test]
async fn test_dispatch_withFailingHandler_shouldReturnNoDataAndRecordError() {
    let registry = HandlerRegistry::builder()
        .register(IntentCategory::Crop, Arc::new(MockHandler::failing()))
        .build()
        .unwrap();

    let outcome = registry.dispatch(IntentCategory::Crop, "best seed", None).await;

    assert_eq!(outcome.response.confidence, 0.0);
    assert!(outcome.response.text.is_empty());
    assert!(matches!(
        outcome.failure,
        Some(Degradation::HandlerError {
            category: IntentCategory::Crop,
            ..
        })
    ));
}

#[tokio::test]
async fn test_dispatch_withMisroutedAnswer_shouldRejectIt() {
    let registry = HandlerRegistry::builder()
        .register(IntentCategory::Pest, Arc::new(MisroutingHandler))
        .build()
        .unwrap();

    let outcome = registry.dispatch(IntentCategory::Pest, "aphids", None).await;

    assert_eq!(outcome.response.category, IntentCategory::Pest);
    assert_eq!(outcome.response.confidence, 0.0);
    assert!(outcome.failure.is_some());
}

#[tokio::test]
async fn test_dispatch_withOutOfRangeConfidence_shouldClamp() {
    let registry = HandlerRegistry::builder()
        .register(IntentCategory::Market, Arc::new(MockHandler::with_confidence(3.5)))
        .register(IntentCategory::Crop, Arc::new(MockHandler::with_confidence(-1.0)))
        .build()
        .unwrap();

    let market = registry.dispatch(IntentCategory::Market, "wheat price", None).await;
    let crop = registry.dispatch(IntentCategory::Crop, "wheat seed", None).await;

    assert_eq!(market.response.confidence, 1.0);
    assert_eq!(crop.response.confidence, 0.0);
}

#[tokio::test]
async fn test_dispatch_withSlowHandlerUnderBudget_shouldAnswer() {
    let registry = HandlerRegistry::builder()
        .register_with_timeout(
            IntentCategory::Irrigation,
            Arc::new(MockHandler::slow(10)),
            Duration::from_secs(2),
        )
        .build()
        .unwrap();

    let outcome = registry.dispatch(IntentCategory::Irrigation, "drip", None).await;
    assert!(outcome.failure.is_none());
    assert_eq!(outcome.response.confidence, 0.9);
}

#[tokio::test]
async fn test_dispatch_withIntermittentHandler_shouldRecoverOnNextCall() {
    let handler = Arc::new(MockHandler::intermittent(2));
    let registry = HandlerRegistry::builder()
        .register(IntentCategory::Finance, handler.clone())
        .build()
        .unwrap();

    let first = registry.dispatch(IntentCategory::Finance, "kcc loan", None).await;
    let second = registry.dispatch(IntentCategory::Finance, "kcc loan", None).await;
    let third = registry.dispatch(IntentCategory::Finance, "kcc loan", None).await;

    assert!(first.failure.is_none());
    assert!(second.failure.is_some());
    assert!(third.failure.is_none());
    assert_eq!(handler.request_count(), 3);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_dispatchSpawned_withBlockingHandler_shouldTimeOut() {
    let registry = Arc::new(
        HandlerRegistry::builder()
            .register_with_timeout(
                IntentCategory::Weather,
                Arc::new(BlockingHandler::new(300)),
                Duration::from_millis(30),
            )
            .build()
            .unwrap(),
    );

    let outcome = registry
        .dispatch_spawned(IntentCategory::Weather, "will it rain".to_string(), None)
        .await;

    assert_eq!(outcome.response.confidence, 0.0);
    assert_eq!(outcome.response.source, "blocking");
    assert_eq!(
        outcome.failure,
        Some(Degradation::HandlerTimeout {
            category: IntentCategory::Weather
        })
    );
}

#[tokio::test]
async fn test_dispatchSpawned_withPanickingHandler_shouldRecordError() {
    let registry = Arc::new(
        HandlerRegistry::builder()
            .register(IntentCategory::Pest, Arc::new(PanickingHandler))
            .build()
            .unwrap(),
    );

    let outcome = registry
        .dispatch_spawned(IntentCategory::Pest, "aphids on mustard".to_string(), Some("Alwar".to_string()))
        .await;

    assert_eq!(outcome.response.confidence, 0.0);
    assert!(outcome.response.text.is_empty());
    assert!(matches!(
        outcome.failure,
        Some(Degradation::HandlerError {
            category: IntentCategory::Pest,
            ..
        })
    ));
}

#[test]
fn test_registry_timeoutFor_shouldPreferPerCategoryBudget() {
    let registry = HandlerRegistry::builder()
        .default_timeout(Duration::from_secs(3))
        .register(IntentCategory::Crop, Arc::new(MockHandler::working()))
        .register_with_timeout(
            IntentCategory::Weather,
            Arc::new(MockHandler::working()),
            Duration::from_secs(1),
        )
        .build()
        .unwrap();

    assert_eq!(registry.timeout_for(IntentCategory::Crop), Duration::from_secs(3));
    assert_eq!(registry.timeout_for(IntentCategory::Weather), Duration::from_secs(1));
    assert_eq!(
        HandlerRegistry::builder().build().unwrap().timeout_for(IntentCategory::Crop),
        DEFAULT_HANDLER_TIMEOUT
    );
}

#[test]
fn test_registry_registerAll_shouldListCategoriesByPriority() {
    let registry = HandlerRegistry::builder()
        .register_all(OfflineAdvisoryHandler::covered(), Arc::new(OfflineAdvisoryHandler::new()))
        .build()
        .unwrap();

    assert_eq!(
        registry.categories(),
        vec![
            IntentCategory::Pest,
            IntentCategory::Irrigation,
            IntentCategory::Crop,
            IntentCategory::Finance
        ]
    );
    assert!(registry.get(IntentCategory::Weather).is_none());
}

#[test]
fn test_builder_withZeroTimeout_shouldFail() {
    let result = HandlerRegistry::builder()
        .register_with_timeout(IntentCategory::Crop, Arc::new(MockHandler::working()), Duration::ZERO)
        .build();
    assert!(result.is_err());

    let result = HandlerRegistry::builder().default_timeout(Duration::ZERO).build();
    assert!(result.is_err());
}

#[tokio::test]
async fn test_offlineHandler_forPest_shouldGiveGeneralGuidance() {
    let handler = OfflineAdvisoryHandler::new();
    let response = handler.invoke(IntentCategory::Pest, "aphids on mustard", None).await.unwrap();

    assert_eq!(response.source, "offline_advisory");
    assert_eq!(response.confidence, 0.6);
    assert!(response.text.contains("Neem"));
}
