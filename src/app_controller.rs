use anyhow::{Context, Result};
use log::debug;
use std::io::{BufRead, Write};
use std::sync::Arc;

use crate::app_config::Config;
use crate::classification::{Classifier, IntentCategory};
use crate::handlers::{DomainHandler, HandlerRegistry, OfflineAdvisoryHandler, RemoteHandler};
use crate::language_utils::LanguageTag;
use crate::orchestrator::{OrchestrationResult, Orchestrator};
use crate::translation::{Lexicon, Translator};

// @module: Application controller wiring configuration into the router

const REPL_HELP: &str = "Type a farming question in any supported language.
Commands: help, languages, categories, quit";

/// Main application controller for query routing
pub struct Controller {
    // @field: App configuration
    config: Config,
    // @field: Router built from the configuration
    orchestrator: Orchestrator,
}

impl Controller {
    /// Create a new controller for test purposes with default configuration
    pub fn new_for_test() -> Result<Self> {
        Self::with_config(Config::default())
    }

    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        config.validate().context("Configuration validation failed")?;

        let translator = Self::build_translator(&config)?;
        let registry = Self::build_registry(&config)?;
        let orchestrator = Orchestrator::new(
            config.orchestrator_config(),
            Arc::new(translator),
            Arc::new(Classifier::new()),
            Arc::new(registry),
        );

        Ok(Self { config, orchestrator })
    }

    /// Use a prebuilt orchestrator, e.g. one with scripted handlers
    pub fn with_orchestrator(config: Config, orchestrator: Orchestrator) -> Self {
        Self { config, orchestrator }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn orchestrator(&self) -> &Orchestrator {
        &self.orchestrator
    }

    /// Built-in dictionary, extended by the configured overlay file
    pub fn build_translator(config: &Config) -> Result<Translator> {
        let lexicon = match &config.lexicon_path {
            Some(path) => Lexicon::with_overlay_file(path)
                .with_context(|| format!("Failed to load lexicon overlay: {}", path))?,
            None => Lexicon::builtin(),
        };
        Translator::new(&lexicon)
    }

    /// Remote handlers for configured endpoints, offline guidance for the
    /// other categories it covers
    pub fn build_registry(config: &Config) -> Result<HandlerRegistry> {
        let offline: Arc<dyn DomainHandler> = Arc::new(OfflineAdvisoryHandler::new());
        let mut builder = HandlerRegistry::builder().default_timeout(config.handler_timeout());

        for category in IntentCategory::BY_PRIORITY {
            match config.handler_for(category) {
                Some(handler) => {
                    let timeout = handler.timeout(config.handler_timeout_secs);
                    debug!("Using remote handler for '{}' at {}", category, handler.endpoint);
                    builder = builder.register_with_timeout(
                        category,
                        Arc::new(RemoteHandler::new(
                            category.as_str(),
                            handler.endpoint.clone(),
                            handler.api_key.clone(),
                            timeout,
                        )),
                        timeout,
                    );
                }
                None if OfflineAdvisoryHandler::covered().contains(&category) => {
                    builder = builder.register(category, Arc::clone(&offline));
                }
                None => debug!("No handler for '{}'", category),
            }
        }

        builder.build()
    }

    /// Route a single query
    pub async fn ask(&self, query: &str, location: Option<&str>) -> OrchestrationResult {
        self.orchestrator.handle(query, location).await
    }

    /// Answer queries line by line until `quit` or end of input.
    /// Returns the number of queries answered.
    pub async fn run_repl<R: BufRead, W: Write>(
        &self,
        input: R,
        mut output: W,
        location: Option<&str>,
    ) -> Result<usize> {
        writeln!(output, "{}", REPL_HELP)?;
        let mut answered = 0;

        for line in input.lines() {
            let line = line.context("Failed to read input")?;
            let query = line.trim();

            match query.to_lowercase().as_str() {
                "" => continue,
                "quit" | "exit" | "q" => break,
                "help" => writeln!(output, "{}", REPL_HELP)?,
                "languages" => {
                    for tag in LanguageTag::KNOWN {
                        let marker = if self.orchestrator.translator().supports(tag) || tag.is_pivot() {
                            ""
                        } else {
                            " (detection only)"
                        };
                        writeln!(output, "  {} - {}{}", tag.code(), tag.name(), marker)?;
                    }
                }
                "categories" => {
                    for category in IntentCategory::BY_PRIORITY {
                        writeln!(output, "  {} - {}", category, category.description())?;
                    }
                }
                _ => {
                    let result = self.ask(query, location).await;
                    writeln!(output, "{}\n", result.render())?;
                    answered += 1;
                }
            }
        }

        Ok(answered)
    }
}
