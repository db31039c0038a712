//! Named, independently retrievable article fields.
//!
//! [`Property::ALL`] is the canonical table in its fixed default order.
//! Resolution is a pure read of the [`Article`]; absent values (`byline`,
//! `dir`) resolve to `None` and are left out of every output.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::article::Article;
use crate::render::escape_html;
use crate::sanitize::sanitize_html;
use crate::{ReadableError, Result};

static NEWLINES: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[\r\n]+").unwrap());

/// A property that can be requested with `--properties`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Property {
    Title,
    HtmlTitle,
    Excerpt,
    Byline,
    Length,
    Dir,
    TextContent,
    HtmlContent,
}

impl Property {
    /// Every property, in default output order.
    pub const ALL: [Property; 8] = [
        Property::Title,
        Property::HtmlTitle,
        Property::Excerpt,
        Property::Byline,
        Property::Length,
        Property::Dir,
        Property::TextContent,
        Property::HtmlContent,
    ];

    /// Canonical name, as accepted on the command line and used as JSON key.
    pub fn name(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::HtmlTitle => "html-title",
            Self::Excerpt => "excerpt",
            Self::Byline => "byline",
            Self::Length => "length",
            Self::Dir => "dir",
            Self::TextContent => "text-content",
            Self::HtmlContent => "html-content",
        }
    }

    /// Whether the value may span several lines in text output.
    pub fn is_multiline(self) -> bool {
        matches!(self, Self::TextContent | Self::HtmlContent)
    }

    /// Resolves the property against an article.
    ///
    /// In `single_line` mode newline runs in string values collapse to one
    /// space, except for the multi-line properties.
    pub fn resolve(self, article: &Article, single_line: bool, ctx: &ResolveContext) -> Option<PropertyValue> {
        let value = match self {
            Self::Title => PropertyValue::Text(article.title.clone()),
            Self::HtmlTitle => PropertyValue::Text(format!("<h1>{}</h1>", escape_html(&article.title))),
            Self::Excerpt => PropertyValue::Text(article.excerpt.clone()),
            Self::Byline => PropertyValue::Text(article.byline.clone()?),
            Self::Length => PropertyValue::Number(article.length),
            Self::Dir => PropertyValue::Text(article.dir?.as_str().to_string()),
            Self::TextContent => PropertyValue::Text(article.text_content.clone()),
            Self::HtmlContent => PropertyValue::Text(ctx.content_html(article)),
        };

        Some(match value {
            PropertyValue::Text(text) if single_line && !self.is_multiline() => {
                PropertyValue::Text(collapse_newlines(&text))
            }
            other => other,
        })
    }
}

impl FromStr for Property {
    type Err = ReadableError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Property::ALL
            .into_iter()
            .find(|p| p.name() == s)
            .ok_or_else(|| ReadableError::UnknownProperty(s.to_string()))
    }
}

impl fmt::Display for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Parses a list of property names, failing on the first unknown one.
pub fn parse_properties<S: AsRef<str>>(names: &[S]) -> Result<Vec<Property>> {
    names.iter().map(|name| name.as_ref().parse()).collect()
}

/// A resolved property value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum PropertyValue {
    Text(String),
    Number(usize),
}

impl fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.write_str(text),
            Self::Number(n) => write!(f, "{n}"),
        }
    }
}

/// Settings that affect how HTML-bearing properties are produced.
#[derive(Debug, Clone, Copy)]
pub struct ResolveContext {
    /// Sanitize HTML content (disabled by `--insane`).
    pub sanitize: bool,
}

impl Default for ResolveContext {
    fn default() -> Self {
        Self { sanitize: true }
    }
}

impl ResolveContext {
    /// The article content as it may be emitted.
    pub fn content_html(&self, article: &Article) -> String {
        if self.sanitize { sanitize_html(&article.content) } else { article.content.clone() }
    }
}

fn collapse_newlines(text: &str) -> String {
    NEWLINES.replace_all(text, " ").into_owned()
}
