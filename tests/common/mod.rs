/*!
 * Common test utilities for the kisanroute test suite
 */

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Result;
use tempfile::TempDir;

use kisanroute::classification::IntentCategory;
use kisanroute::handlers::{DomainHandler, HandlerRegistry};
use kisanroute::language_utils::LanguageTag;
use kisanroute::orchestrator::Orchestrator;

// Re-export the mock handlers module
pub mod mock_handlers;

/// One unambiguous question per supported language
pub const SAMPLE_QUERIES: &[(LanguageTag, &str)] = &[
    (LanguageTag::English, "Will it rain tomorrow in Nashik?"),
    (LanguageTag::Hindi, "आज बारिश होगी क्या?"),
    (LanguageTag::Bengali, "আজ বৃষ্টি হবে?"),
    (LanguageTag::Telugu, "ఈరోజు వర్షం పడుతుందా?"),
    (LanguageTag::Tamil, "இன்று மழை பெய்யுமா?"),
    (LanguageTag::Malayalam, "ഇന്ന് മഴ പെയ്യുമോ?"),
    (LanguageTag::Kannada, "ಇಂದು ಮಳೆ ಬರುತ್ತದೆಯೇ?"),
    (LanguageTag::Gujarati, "આજે વરસાદ પડશે?"),
    (LanguageTag::Punjabi, "ਅੱਜ ਮੀਂਹ ਪਵੇਗਾ?"),
];

/// Creates a temporary directory for test files
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Creates a test file with the given content in the specified directory
pub fn create_test_file(dir: &Path, filename: &str, content: &str) -> Result<PathBuf> {
    let file_path = dir.join(filename);
    fs::write(&file_path, content)?;
    Ok(file_path)
}

/// Registry with the same handler behind every routable category
pub fn registry_for_all(handler: Arc<dyn DomainHandler>) -> HandlerRegistry {
    HandlerRegistry::builder()
        .register_all(&IntentCategory::BY_PRIORITY, handler)
        .build()
        .unwrap()
}

/// Orchestrator with built-in tables and default thresholds
pub fn orchestrator_with(registry: HandlerRegistry) -> Orchestrator {
    Orchestrator::with_registry(registry).unwrap()
}

/// Send test logs to stderr when RUST_LOG is set
pub fn init_test_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}
