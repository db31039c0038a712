//! Document loading.
//!
//! A [`LoadedDocument`] keeps the source text together with its effective
//! base URL. The DOM is rebuilt from that text by whoever needs it, so the
//! readability engine and the passthrough renderer never share mutable
//! tree state.
//!
//! # Example
//!
//! ```rust
//! use readable_core::LoadedDocument;
//!
//! let doc = LoadedDocument::from_html("<html><head><title>Test</title></head><body></body></html>", None);
//! assert_eq!(doc.title(), Some("Test".to_string()));
//! ```

use scraper::{Html, Selector};
use url::Url;

use crate::fetch::{self, FetchOptions};
use crate::source::{ResolvedSource, SourceSpec};
use crate::{Result, Warning};

/// Source text plus the URL relative links resolve against.
#[derive(Debug, Clone)]
pub struct LoadedDocument {
    html: String,
    base_url: Option<Url>,
}

impl LoadedDocument {
    /// Wraps already loaded HTML.
    pub fn from_html(html: impl Into<String>, base_url: Option<Url>) -> Self {
        Self { html: html.into(), base_url }
    }

    /// The source text as loaded.
    pub fn source(&self) -> &str {
        &self.html
    }

    /// Effective base URL, if known.
    pub fn base_url(&self) -> Option<&Url> {
        self.base_url.as_ref()
    }

    /// Parses the source into a fresh DOM.
    pub fn dom(&self) -> Html {
        Html::parse_document(&self.html)
    }

    /// Serializes the whole document as the parser sees it.
    pub fn outer_html(&self) -> String {
        self.dom().html()
    }

    /// Gets the content of the `<title>` element if present.
    pub fn title(&self) -> Option<String> {
        let selector = Selector::parse("title").ok()?;
        self.dom()
            .select(&selector)
            .next()
            .map(|el| el.text().collect::<String>())
    }
}

/// A loaded document and the warnings raised while loading it.
#[derive(Debug)]
pub struct Loaded {
    pub document: LoadedDocument,
    pub warnings: Vec<Warning>,
}

/// Loads the resolved source.
///
/// Reading a file or standard input without a base URL succeeds with a
/// [`Warning::MissingBaseUrl`].
#[cfg(feature = "fetch")]
pub async fn load(source: &ResolvedSource, options: &FetchOptions) -> Result<Loaded> {
    let html = match &source.spec {
        SourceSpec::RemoteUrl(url) => fetch::fetch_url(url, options).await?,
        SourceSpec::LocalFile(path) => fetch::fetch_file(path)?,
        SourceSpec::StandardInput => fetch::fetch_stdin()?,
    };
    Ok(finish(source, html))
}

/// Loads the resolved source, rejecting remote URLs.
#[cfg(not(feature = "fetch"))]
pub fn load(source: &ResolvedSource, _options: &FetchOptions) -> Result<Loaded> {
    let html = match &source.spec {
        SourceSpec::RemoteUrl(url) => {
            return Err(crate::ReadableError::Usage(format!(
                "cannot load {url}: built without network support"
            )));
        }
        SourceSpec::LocalFile(path) => fetch::fetch_file(path)?,
        SourceSpec::StandardInput => fetch::fetch_stdin()?,
    };
    Ok(finish(source, html))
}

/// Attaches the base URL and collects load warnings.
pub fn finish(source: &ResolvedSource, html: String) -> Loaded {
    let mut warnings = Vec::new();
    if source.base_url.is_none() && !matches!(source.spec, SourceSpec::RemoteUrl(_)) {
        warnings.push(Warning::MissingBaseUrl);
    }

    tracing::debug!(source = %source.spec.describe(), bytes = html.len(), "loaded document");

    Loaded { document: LoadedDocument::from_html(html, source.base_url.clone()), warnings }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    const SAMPLE_HTML: &str = r#"
        <!DOCTYPE html>
        <html lang="en">
        <head><title>Test Page</title></head>
        <body><p>Paragraph</p></body>
        </html>
    "#;

    #[test]
    fn test_title() {
        let doc = LoadedDocument::from_html(SAMPLE_HTML, None);
        assert_eq!(doc.title(), Some("Test Page".to_string()));
    }

    #[test]
    fn test_outer_html_is_a_full_document() {
        let doc = LoadedDocument::from_html("<p>hi</p>", None);
        let html = doc.outer_html();
        assert!(html.starts_with("<html>"));
        assert!(html.contains("<body><p>hi</p></body>"));
    }

    #[test]
    fn test_stdin_without_base_warns_once() {
        let source = ResolvedSource { spec: SourceSpec::StandardInput, base_url: None };
        let loaded = finish(&source, SAMPLE_HTML.to_string());
        assert_eq!(loaded.warnings, vec![Warning::MissingBaseUrl]);
    }

    #[test]
    fn test_file_with_base_does_not_warn() {
        let source = ResolvedSource {
            spec: SourceSpec::LocalFile(PathBuf::from("page.html")),
            base_url: Some(Url::parse("https://example.com/").unwrap()),
        };
        let loaded = finish(&source, SAMPLE_HTML.to_string());
        assert!(loaded.warnings.is_empty());
        assert_eq!(loaded.document.base_url().unwrap().as_str(), "https://example.com/");
    }

    #[cfg(feature = "fetch")]
    #[tokio::test]
    async fn test_load_missing_file() {
        let source = ResolvedSource { spec: SourceSpec::LocalFile(PathBuf::from("/nonexistent/a.html")), base_url: None };
        let err = load(&source, &FetchOptions::default()).await.unwrap_err();
        assert_eq!(err.exit_code(), crate::ExitCode::NoInput);
    }

    #[cfg(feature = "fetch")]
    #[tokio::test]
    async fn test_load_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("page.html");
        std::fs::write(&path, SAMPLE_HTML).unwrap();

        let source = ResolvedSource { spec: SourceSpec::LocalFile(path), base_url: None };
        let loaded = load(&source, &FetchOptions::default()).await.unwrap();
        assert_eq!(loaded.document.source(), SAMPLE_HTML);
        assert_eq!(loaded.warnings.len(), 1);
    }
}
