//! Classification of the source argument.
//!
//! Turns the raw source token into a [`SourceSpec`] and works out the
//! effective base URL. Nothing here touches the network or the filesystem;
//! loading lives in [`crate::document`].

use std::path::PathBuf;
use std::sync::LazyLock;

use regex::Regex;
use url::Url;

use crate::{ReadableError, Result};

static SCHEME: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[A-Za-z][A-Za-z0-9+.\-]*://").unwrap());

/// Where the document comes from. Exactly one variant is active per run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceSpec {
    LocalFile(PathBuf),
    RemoteUrl(String),
    StandardInput,
}

impl SourceSpec {
    /// Human readable description used in log lines.
    pub fn describe(&self) -> String {
        match self {
            Self::LocalFile(path) => format!("file {}", path.display()),
            Self::RemoteUrl(url) => format!("URL {url}"),
            Self::StandardInput => "standard input".to_string(),
        }
    }
}

/// Options that influence how the source token is interpreted.
#[derive(Debug, Clone, Default)]
pub struct SourceOptions {
    /// Raw positional argument; `None` or empty means "read standard input".
    pub token: Option<String>,
    /// `--is-file`: never interpret the token as a URL.
    pub is_file: bool,
    /// Legacy `--is-url`: prepend `https://` when the token has no scheme.
    pub is_url: bool,
    /// `--base`: explicit base URL for relative links.
    pub base: Option<String>,
}

/// Result of source classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedSource {
    pub spec: SourceSpec,
    pub base_url: Option<Url>,
}

/// Returns true when `token` starts with a `scheme://` prefix.
pub fn has_scheme(token: &str) -> bool {
    SCHEME.is_match(token)
}

/// Classifies the source token.
///
/// `stdin_is_terminal` tells whether an interactive terminal is attached to
/// standard input; an empty token is only accepted when it is not.
pub fn resolve_source(options: &SourceOptions, stdin_is_terminal: bool) -> Result<ResolvedSource> {
    let token = options.token.as_deref().unwrap_or_default();

    let spec = if token.is_empty() {
        if stdin_is_terminal {
            return Err(ReadableError::NoInputTerminal);
        }
        SourceSpec::StandardInput
    } else {
        let token = if options.is_url && !has_scheme(token) {
            format!("https://{token}")
        } else {
            token.to_string()
        };

        if !options.is_file && has_scheme(&token) {
            SourceSpec::RemoteUrl(token)
        } else if token == "-" {
            SourceSpec::StandardInput
        } else {
            SourceSpec::LocalFile(PathBuf::from(token))
        }
    };

    let base_url = match (&options.base, &spec) {
        (Some(base), _) => Some(parse_url(base)?),
        (None, SourceSpec::RemoteUrl(url)) => Some(parse_url(url)?),
        (None, _) => None,
    };

    tracing::debug!(source = %spec.describe(), base = ?base_url.as_ref().map(Url::as_str), "resolved source");

    Ok(ResolvedSource { spec, base_url })
}

fn parse_url(raw: &str) -> Result<Url> {
    Url::parse(raw).map_err(|e| ReadableError::InvalidUrl { url: raw.to_string(), reason: e.to_string() })
}
