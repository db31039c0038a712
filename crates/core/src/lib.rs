pub mod article;
pub mod document;
pub mod error;
pub mod extract;
pub mod fetch;
pub mod gate;
pub mod pipeline;
pub mod properties;
pub mod render;
pub mod sanitize;
pub mod source;
mod warning;

pub use article::{Article, Direction};
pub use document::{Loaded, LoadedDocument};
pub use error::{ExitCode, ReadableError, Result};
pub use extract::{EngineOptions, ReaderEngine, SmoothieEngine, extract_article};
pub use fetch::{FetchOptions, default_user_agent, fetch_file, fetch_stdin};
#[cfg(feature = "fetch")]
pub use fetch::fetch_url;
pub use gate::{ConfidencePolicy, Decision, Demand, ParsedPolicy};
#[cfg(feature = "fetch")]
pub use pipeline::run;
pub use pipeline::{Config, process};
pub use properties::{Property, PropertyValue, ResolveContext, parse_properties};
pub use render::{DEFAULT_STYLE, OutputOptions, Outcome, escape_html, render};
pub use sanitize::sanitize_html;
pub use source::{ResolvedSource, SourceOptions, SourceSpec, resolve_source};
pub use warning::Warning;
