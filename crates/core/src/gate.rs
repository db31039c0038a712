//! Readability gate and the extraction decision table.
//!
//! Two checkpoints decide what a run produces:
//!
//! 1. [`gate`] runs before extraction, from the confidence heuristic.
//! 2. [`after_extraction`] runs when the engine found no article.
//!
//! Both end in a plain `match` over ([`ConfidencePolicy`], requested
//! output) so every combination is visible in one place.

use std::fmt;
use std::str::FromStr;

use crate::{ReadableError, Result, Warning};

/// What to do when the document does not look readable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConfidencePolicy {
    /// Emit the original document unchanged.
    #[default]
    Keep,
    /// Extract anyway.
    Force,
    /// Fail with a data error.
    Exit,
}

/// A policy parsed from user input, remembering whether a legacy alias was used.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParsedPolicy {
    pub policy: ConfidencePolicy,
    pub deprecated_alias: bool,
}

impl ParsedPolicy {
    /// Warning to report for a legacy spelling.
    pub fn warning(&self) -> Option<Warning> {
        self.deprecated_alias.then_some(Warning::DeprecatedOption {
            option: "--low-confidence no-op",
            hint: "use --low-confidence keep",
        })
    }
}

impl ConfidencePolicy {
    /// Parses a policy name, accepting the legacy `no-op` spelling of `keep`.
    pub fn parse(value: &str) -> Result<ParsedPolicy> {
        match value.to_lowercase().as_str() {
            "no-op" => Ok(ParsedPolicy { policy: Self::Keep, deprecated_alias: true }),
            other => other.parse().map(|policy| ParsedPolicy { policy, deprecated_alias: false }),
        }
    }
}

impl FromStr for ConfidencePolicy {
    type Err = ReadableError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "keep" => Ok(Self::Keep),
            "force" => Ok(Self::Force),
            "exit" => Ok(Self::Exit),
            _ => Err(ReadableError::UnknownPolicy(s.to_string())),
        }
    }
}

impl fmt::Display for ConfidencePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Keep => "keep",
            Self::Force => "force",
            Self::Exit => "exit",
        })
    }
}

/// Whether the requested output needs an article.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Demand {
    /// Any rendering is acceptable, including the original document.
    Document,
    /// JSON output was requested.
    Json,
    /// Specific properties were requested.
    Properties,
}

impl Demand {
    fn describe(self) -> &'static str {
        match self {
            Self::Document => "a document",
            Self::Json => "JSON output",
            Self::Properties => "the requested properties",
        }
    }
}

/// Outcome of the readability gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Run the extraction engine.
    Attempt,
    /// Emit the original document and skip property logic.
    Passthrough,
}

/// Decides whether to extract, given the heuristic's verdict.
///
/// `probably_readable` is only called when the policy needs it.
pub fn gate(policy: ConfidencePolicy, demand: Demand, probably_readable: impl FnOnce() -> bool) -> Result<Decision> {
    if policy == ConfidencePolicy::Force {
        tracing::debug!("low-confidence policy is force; skipping readability check");
        return Ok(Decision::Attempt);
    }

    let readable = probably_readable();
    tracing::debug!(readable, %policy, "readability check");

    if readable {
        return Ok(Decision::Attempt);
    }

    match (policy, demand) {
        (ConfidencePolicy::Exit, _) => Err(ReadableError::NotReadable),
        (_, Demand::Document) => Ok(Decision::Passthrough),
        (_, demand) => Err(ReadableError::PassthroughIncompatible(demand.describe())),
    }
}

/// Decides what happens when the engine ran and found no article.
///
/// Only `keep` may fall back to the original document, which is reported
/// with the returned warning. `force` and `exit` promised an article, so its
/// absence is fatal.
pub fn after_extraction(policy: ConfidencePolicy, demand: Demand) -> Result<Warning> {
    match (policy, demand) {
        (ConfidencePolicy::Keep, Demand::Document) => Ok(Warning::NoArticleFallback),
        (ConfidencePolicy::Keep, demand) => Err(ReadableError::PassthroughIncompatible(demand.describe())),
        (ConfidencePolicy::Force | ConfidencePolicy::Exit, _) => Err(ReadableError::NoArticle),
    }
}
