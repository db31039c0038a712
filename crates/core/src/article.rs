//! The normalized extraction result.
//!
//! An [`Article`] is produced at most once per run by the extraction
//! adapter and only read afterwards.

use std::fmt;
use std::str::FromStr;

/// Text direction of the article.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Ltr,
    Rtl,
}

impl Direction {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ltr => "ltr",
            Self::Rtl => "rtl",
        }
    }
}

impl FromStr for Direction {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ltr" => Ok(Self::Ltr),
            "rtl" => Ok(Self::Rtl),
            _ => Err(()),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Readable content and metadata extracted from a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Article {
    /// Article title.
    pub title: String,

    /// Author line, when one was found.
    pub byline: Option<String>,

    /// Short description or first paragraph.
    pub excerpt: String,

    /// Extracted content as an HTML fragment, not yet sanitized.
    pub content: String,

    /// Plain text version of content.
    pub text_content: String,

    /// Length of the text content in characters.
    pub length: usize,

    /// Text direction, when declared by the page.
    pub dir: Option<Direction>,
}

impl Article {
    /// Builds an article, deriving `length` from the text content.
    pub fn new(title: impl Into<String>, content: impl Into<String>, text_content: impl Into<String>) -> Self {
        let text_content = text_content.into();
        let length = text_content.chars().count();
        Self {
            title: title.into(),
            byline: None,
            excerpt: String::new(),
            content: content.into(),
            text_content,
            length,
            dir: None,
        }
    }

    pub fn with_byline(mut self, byline: impl Into<String>) -> Self {
        self.byline = Some(byline.into());
        self
    }

    pub fn with_excerpt(mut self, excerpt: impl Into<String>) -> Self {
        self.excerpt = excerpt.into();
        self
    }

    pub fn with_dir(mut self, dir: Direction) -> Self {
        self.dir = Some(dir);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_article_creation() {
        let article = Article::new("Test Article", "<p>Héllo</p>", "Héllo");
        assert_eq!(article.title, "Test Article");
        assert_eq!(article.length, 5);
        assert!(article.byline.is_none());
        assert!(article.dir.is_none());
        assert!(article.excerpt.is_empty());
    }

    #[test]
    fn test_builders() {
        let article = Article::new("T", "<p>x</p>", "x")
            .with_byline("Jane Doe")
            .with_excerpt("An excerpt")
            .with_dir(Direction::Rtl);
        assert_eq!(article.byline.as_deref(), Some("Jane Doe"));
        assert_eq!(article.excerpt, "An excerpt");
        assert_eq!(article.dir, Some(Direction::Rtl));
    }

    #[test]
    fn test_direction_parsing() {
        assert_eq!("ltr".parse::<Direction>(), Ok(Direction::Ltr));
        assert_eq!(" RTL ".parse::<Direction>(), Ok(Direction::Rtl));
        assert!("auto".parse::<Direction>().is_err());
        assert_eq!(Direction::Rtl.to_string(), "rtl");
    }
}
