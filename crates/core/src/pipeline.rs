//! One run, from source token to rendered output.
//!
//! ```text
//! resolve_source -> load -> gate -> (extract -> after_extraction) -> render
//! ```
//!
//! The configuration is built once and only borrowed. Warnings are handed to
//! the caller's sink as soon as they arise, so they always precede the
//! output write.

use crate::document::LoadedDocument;
use crate::extract::{EngineOptions, ReaderEngine, extract_article};
use crate::fetch::FetchOptions;
use crate::gate::{self, ConfidencePolicy, Decision, Demand};
use crate::render::{self, OutputOptions, Outcome};
use crate::source::{SourceOptions, resolve_source};
use crate::{Result, Warning};

/// Immutable configuration for one run.
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub source: SourceOptions,
    pub fetch: FetchOptions,
    pub policy: ConfidencePolicy,
    pub output: OutputOptions,
    pub engine: EngineOptions,
}

impl Config {
    /// What kind of output the run needs.
    pub fn demand(&self) -> Demand {
        if self.output.json {
            Demand::Json
        } else if !self.output.properties.is_empty() {
            Demand::Properties
        } else {
            Demand::Document
        }
    }
}

/// Decides, extracts and renders a loaded document.
///
/// The engine is asked to extract at most once.
pub fn process(
    doc: &LoadedDocument, config: &Config, engine: &dyn ReaderEngine, on_warning: &mut dyn FnMut(Warning),
) -> Result<String> {
    let demand = config.demand();

    if gate::gate(config.policy, demand, || engine.is_probably_readable(doc))? == Decision::Attempt {
        match extract_article(engine, doc)? {
            Some(article) => return render::render(Outcome::Article(&article), &config.output),
            None => on_warning(gate::after_extraction(config.policy, demand)?),
        }
    }

    render::render(Outcome::Passthrough(doc), &config.output)
}

/// Resolves, loads and processes the configured source.
#[cfg(feature = "fetch")]
pub async fn run(
    config: &Config, stdin_is_terminal: bool, engine: &dyn ReaderEngine, on_warning: &mut dyn FnMut(Warning),
) -> Result<String> {
    let source = resolve_source(&config.source, stdin_is_terminal)?;
    let loaded = crate::document::load(&source, &config.fetch).await?;
    loaded.warnings.into_iter().for_each(&mut *on_warning);
    process(&loaded.document, config, engine, on_warning)
}
