//! Extraction adapter around the readability engine.
//!
//! The scoring algorithm itself is external. [`ReaderEngine`] is the seam:
//! it answers the confidence question and performs one extraction, turning
//! "nothing found" into `Ok(None)` and reserving `Err` for real failures.
//! [`SmoothieEngine`] is the default implementation, backed by
//! `dom_smoothie`.

use dom_smoothie::{Config as SmoothieConfig, Readability, ReadabilityError};

use crate::article::Article;
use crate::document::LoadedDocument;
use crate::{ReadableError, Result};

/// The readability algorithm as seen by the pipeline.
pub trait ReaderEngine {
    /// Quick heuristic: does the document look like a content page?
    fn is_probably_readable(&self, doc: &LoadedDocument) -> bool;

    /// Runs the full extraction. `Ok(None)` means no article was found.
    fn extract(&self, doc: &LoadedDocument) -> Result<Option<Article>>;
}

/// Engine options exposed on the command line.
#[derive(Debug, Clone, Default)]
pub struct EngineOptions {
    /// Keep `class` attributes in the extracted content.
    pub keep_classes: bool,
}

/// [`ReaderEngine`] backed by the `dom_smoothie` Readability port.
///
/// Every call builds its own DOM from the source text, so extraction never
/// alters what the passthrough renderer sees.
#[derive(Debug, Clone, Default)]
pub struct SmoothieEngine {
    options: EngineOptions,
}

impl SmoothieEngine {
    pub fn new(options: EngineOptions) -> Self {
        Self { options }
    }

    fn config(&self) -> SmoothieConfig {
        SmoothieConfig { keep_classes: self.options.keep_classes, ..Default::default() }
    }

    fn reader(&self, doc: &LoadedDocument) -> Result<Readability> {
        let base = doc.base_url().map(|url| url.as_str());
        Readability::new(doc.source(), base, Some(self.config())).map_err(|e| ReadableError::Engine(e.to_string()))
    }
}

impl ReaderEngine for SmoothieEngine {
    fn is_probably_readable(&self, doc: &LoadedDocument) -> bool {
        match self.reader(doc) {
            Ok(reader) => reader.is_probably_readable(),
            Err(err) => {
                tracing::debug!(%err, "readability check could not build a reader");
                false
            }
        }
    }

    fn extract(&self, doc: &LoadedDocument) -> Result<Option<Article>> {
        let mut reader = self.reader(doc)?;
        match reader.parse() {
            Ok(article) => {
                let text_content = article.text_content.to_string();
                let length = text_content.chars().count();
                Ok(Some(Article {
                    title: article.title,
                    byline: article.byline.filter(|b| !b.trim().is_empty()),
                    excerpt: article.excerpt.unwrap_or_default(),
                    content: article.content.to_string(),
                    text_content,
                    length,
                    dir: article.dir.as_deref().and_then(|d| d.parse().ok()),
                }))
            }
            Err(ReadabilityError::GrabFailed) => Ok(None),
            Err(err) => Err(ReadableError::Engine(err.to_string())),
        }
    }
}

/// Runs the engine once and logs the outcome.
pub fn extract_article(engine: &dyn ReaderEngine, doc: &LoadedDocument) -> Result<Option<Article>> {
    let article = engine.extract(doc)?;
    match &article {
        Some(article) => tracing::debug!(title = %article.title, length = article.length, "extracted article"),
        None => tracing::debug!("engine found no article"),
    }
    Ok(article)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ARTICLE_HTML: &str = r#"<!DOCTYPE html>
        <html lang="en" dir="ltr">
        <head><title>Understanding Ownership</title></head>
        <body>
            <nav><a href="/">Home</a> <a href="/about">About</a></nav>
            <article>
                <h1>Understanding Ownership</h1>
                <p>Ownership is a set of rules that govern how a program manages memory. All programs have to
                manage the way they use memory while running. Some languages have garbage collection that
                regularly looks for no longer used memory as the program runs.</p>
                <p>In other languages, the programmer must explicitly allocate and free the memory. A third
                approach manages memory through a system of ownership with a set of rules that the compiler
                checks. If any of the rules are violated, the program will not compile.</p>
                <p>None of the features of ownership will slow down your program while it is running. Because
                ownership is a new concept for many programmers, it does take some time to get used to, but
                the more experienced you become, the easier it gets to write code that is safe and efficient.</p>
            </article>
            <footer>Copyright</footer>
        </body>
        </html>"#;

    #[test]
    fn test_smoothie_extracts_article() {
        let doc = LoadedDocument::from_html(ARTICLE_HTML, None);
        let engine = SmoothieEngine::default();

        assert!(engine.is_probably_readable(&doc));
        let article = extract_article(&engine, &doc).unwrap().expect("article");
        assert!(article.title.contains("Ownership"));
        assert!(article.text_content.contains("garbage collection"));
        assert_eq!(article.length, article.text_content.chars().count());
        assert!(!article.content.contains("<nav"));
    }

    #[test]
    fn test_extraction_leaves_source_untouched() {
        let doc = LoadedDocument::from_html(ARTICLE_HTML, None);
        let before = doc.outer_html();
        let _ = SmoothieEngine::default().extract(&doc).unwrap();
        assert_eq!(doc.outer_html(), before);
    }

    #[test]
    fn test_navigation_page_is_not_readable() {
        let doc = LoadedDocument::from_html(
            r##"<html><body><nav><a href="#">One</a><a href="#">Two</a></nav></body></html>"##,
            None,
        );
        assert!(!SmoothieEngine::default().is_probably_readable(&doc));
    }
}
