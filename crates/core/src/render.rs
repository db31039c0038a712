//! Output rendering.
//!
//! [`render`] turns the outcome of a run into the exact text written to the
//! output target. The branches, in priority order:
//!
//! 1. passthrough: the (sanitized) original document
//! 2. JSON: one object of resolved properties
//! 3. selected properties, one value per line
//! 4. full reader-mode document with the default stylesheet
//! 5. simpler document referencing a custom stylesheet

use std::fmt::Write as _;

use serde_json::{Map, Value};

use crate::article::Article;
use crate::document::LoadedDocument;
use crate::properties::{Property, ResolveContext};
use crate::sanitize::sanitize_html;
use crate::Result;

/// Stylesheet the default full-document skeleton is built for.
pub const DEFAULT_STYLE: &str = "chrome://global/skin/aboutReader.css";

/// How the run wants its output.
#[derive(Debug, Clone)]
pub struct OutputOptions {
    /// Emit a JSON object instead of text.
    pub json: bool,
    /// Requested properties; empty means "not requested".
    pub properties: Vec<Property>,
    /// Custom stylesheet path or URL (`--style`).
    pub style: Option<String>,
    /// Sanitize emitted HTML (disabled by `--insane`).
    pub sanitize: bool,
}

impl Default for OutputOptions {
    fn default() -> Self {
        Self { json: false, properties: Vec::new(), style: None, sanitize: true }
    }
}

impl OutputOptions {
    fn context(&self) -> ResolveContext {
        ResolveContext { sanitize: self.sanitize }
    }
}

/// What the pipeline produced and the renderer consumes.
#[derive(Debug, Clone, Copy)]
pub enum Outcome<'a> {
    /// Extraction was skipped or found nothing; emit the original document.
    Passthrough(&'a LoadedDocument),
    /// Extraction succeeded.
    Article(&'a Article),
}

/// Serializes the outcome. The result is written to the output target as is.
pub fn render(outcome: Outcome<'_>, options: &OutputOptions) -> Result<String> {
    match outcome {
        Outcome::Passthrough(doc) => {
            tracing::debug!("rendering passthrough document");
            let html = doc.outer_html();
            Ok(if options.sanitize { sanitize_html(&html) } else { html })
        }
        Outcome::Article(article) if options.json => {
            tracing::debug!("rendering JSON");
            render_json(article, options)
        }
        Outcome::Article(article) if !options.properties.is_empty() => {
            tracing::debug!(count = options.properties.len(), "rendering property lines");
            Ok(render_properties(article, options))
        }
        Outcome::Article(article) => match &options.style {
            None => {
                tracing::debug!("rendering reader-mode document");
                Ok(render_reader_document(article, options))
            }
            Some(style) => {
                tracing::debug!(style, "rendering custom-style document");
                Ok(render_styled_document(article, style, options))
            }
        },
    }
}

fn render_json(article: &Article, options: &OutputOptions) -> Result<String> {
    let properties: &[Property] =
        if options.properties.is_empty() { &Property::ALL } else { &options.properties };
    let ctx = options.context();

    let mut object = Map::new();
    for property in properties {
        if let Some(value) = property.resolve(article, false, &ctx) {
            object.insert(property.name().to_string(), serde_json::to_value(value)?);
        }
    }

    let mut json = serde_json::to_string(&Value::Object(object))?;
    json.push('\n');
    Ok(json)
}

fn render_properties(article: &Article, options: &OutputOptions) -> String {
    let ctx = options.context();
    let mut output = String::new();
    for property in &options.properties {
        if let Some(value) = property.resolve(article, true, &ctx) {
            let _ = writeln!(output, "{value}");
        }
    }
    output
}

fn head(title: &str, stylesheet: &str) -> String {
    format!(
        "<!DOCTYPE html>\n\
         <html>\n\
         <head>\n\
         <meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
         <title>{}</title>\n\
         <link rel=\"stylesheet\" href=\"{}\" type=\"text/css\">\n\
         </head>\n",
        escape_html(title),
        escape_html(stylesheet),
    )
}

fn render_reader_document(article: &Article, options: &OutputOptions) -> String {
    let mut output = head(&article.title, DEFAULT_STYLE);
    let dir = article.dir.map(|d| format!(" dir=\"{d}\"")).unwrap_or_default();

    output.push_str("<body class=\"light sans-serif loaded\" style=\"--font-size: 14pt; --content-width: 40em;\">\n");
    let _ = writeln!(output, "<div class=\"container\"{dir}>");
    output.push_str("<div class=\"header reader-header reader-show-element\">\n");
    let _ = writeln!(output, "<h1 class=\"reader-title\">{}</h1>", escape_html(&article.title));
    if let Some(byline) = &article.byline {
        let _ = writeln!(output, "<div class=\"credits reader-credits\">{}</div>", escape_html(byline));
    }
    output.push_str("</div>\n<hr>\n");
    output.push_str("<div class=\"content\">\n<div class=\"moz-reader-content reader-show-element\">\n");
    output.push_str(&options.context().content_html(article));
    output.push_str("\n</div>\n</div>\n</div>\n</body>\n</html>\n");
    output
}

fn render_styled_document(article: &Article, style: &str, options: &OutputOptions) -> String {
    let mut output = head(&article.title, style);
    output.push_str("<body>\n");
    let _ = writeln!(output, "<h1>{}</h1>", escape_html(&article.title));
    if let Some(byline) = &article.byline {
        let _ = writeln!(output, "<p><i>{}</i></p>", escape_html(byline));
    }
    output.push_str("<hr>\n");
    output.push_str(&options.context().content_html(article));
    output.push_str("\n</body>\n</html>\n");
    output
}

/// Escapes text for use in HTML content and attribute values.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
