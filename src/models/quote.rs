//! Quote model
//!
//! A quote with its author, optional context and tags. Fields are private so
//! that the slug can only change through [`Quote::set_body`].

use chrono::Local;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::slug::Slug;
use super::tag::{parse_tags, Tag};
use crate::error::{QuillError, QuillResult};
use crate::obfuscation::{decode_field, encode_field};

/// A single quote entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Quote {
    body: String,
    author: String,
    context: String,
    tags: Vec<Tag>,
    date_added: String,
    slug: Slug,
}

/// Field changes for an edit; `None` keeps the current value
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuoteUpdate {
    pub body: Option<String>,
    pub author: Option<String>,
    pub context: Option<String>,
    pub tags: Option<Vec<Tag>>,
}

impl QuoteUpdate {
    /// Check if no field is being changed
    pub fn is_empty(&self) -> bool {
        self.body.is_none() && self.author.is_none() && self.context.is_none() && self.tags.is_none()
    }
}

/// On-disk shape: text fields are base64 encoded
///
/// Reading accepts the date under either `date` or `date_added`; writing
/// always uses `date`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredQuote {
    #[serde(default)]
    pub quote: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub context: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_added: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
}

/// Export-only shape with the text fields left readable
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlainQuote {
    pub quote: String,
    pub author: String,
    pub context: String,
    pub tags: Vec<String>,
    pub date_added: String,
    pub slug: String,
}

/// Today's date as `YYYY-MM-DD`
pub fn today() -> String {
    Local::now().date_naive().format("%Y-%m-%d").to_string()
}

impl Quote {
    /// Create a new quote dated today
    pub fn new(
        body: impl Into<String>,
        author: impl Into<String>,
        context: impl Into<String>,
        tags: Vec<Tag>,
    ) -> QuillResult<Self> {
        Self::with_date(body, author, context, tags, today())
    }

    /// Create a new quote with an explicit date
    pub fn with_date(
        body: impl Into<String>,
        author: impl Into<String>,
        context: impl Into<String>,
        tags: Vec<Tag>,
        date_added: impl Into<String>,
    ) -> QuillResult<Self> {
        let body = body.into();
        let author = author.into();

        if body.trim().is_empty() {
            return Err(QuillError::MissingField("Quote"));
        }
        if author.trim().is_empty() {
            return Err(QuillError::MissingField("Author"));
        }

        let mut date_added = date_added.into();
        if date_added.trim().is_empty() {
            date_added = today();
        }

        Ok(Self {
            slug: Slug::from_body(&body),
            body,
            author,
            context: context.into(),
            tags,
            date_added,
        })
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn author(&self) -> &str {
        &self.author
    }

    pub fn context(&self) -> &str {
        &self.context
    }

    pub fn tags(&self) -> &[Tag] {
        &self.tags
    }

    pub fn date_added(&self) -> &str {
        &self.date_added
    }

    pub fn slug(&self) -> &Slug {
        &self.slug
    }

    /// Replace the body and recompute the slug from it
    pub fn set_body(&mut self, body: impl Into<String>) -> QuillResult<()> {
        let body = body.into();
        if body.trim().is_empty() {
            return Err(QuillError::MissingField("Quote"));
        }
        self.slug = Slug::from_body(&body);
        self.body = body;
        Ok(())
    }

    /// Replace the author
    pub fn set_author(&mut self, author: impl Into<String>) -> QuillResult<()> {
        let author = author.into();
        if author.trim().is_empty() {
            return Err(QuillError::MissingField("Author"));
        }
        self.author = author;
        Ok(())
    }

    pub fn set_context(&mut self, context: impl Into<String>) {
        self.context = context.into();
    }

    pub fn set_tags(&mut self, tags: Vec<Tag>) {
        self.tags = tags;
    }

    /// Apply an edit, returning whether anything changed
    ///
    /// Validation happens before any field is touched, so a rejected update
    /// leaves the quote as it was.
    pub fn apply(&mut self, update: QuoteUpdate) -> QuillResult<bool> {
        if matches!(&update.body, Some(b) if b.trim().is_empty()) {
            return Err(QuillError::MissingField("Quote"));
        }
        if matches!(&update.author, Some(a) if a.trim().is_empty()) {
            return Err(QuillError::MissingField("Author"));
        }

        let mut changed = false;

        if let Some(body) = update.body {
            if body != self.body {
                self.set_body(body)?;
                changed = true;
            }
        }
        if let Some(author) = update.author {
            if author != self.author {
                self.set_author(author)?;
                changed = true;
            }
        }
        if let Some(context) = update.context {
            if context != self.context {
                self.set_context(context);
                changed = true;
            }
        }
        if let Some(tags) = update.tags {
            if tags != self.tags {
                self.set_tags(tags);
                changed = true;
            }
        }

        Ok(changed)
    }

    /// Check if the body, author or context contains `query` (case-insensitive)
    pub fn matches(&self, query: &str) -> bool {
        let query = query.to_lowercase();
        self.body.to_lowercase().contains(&query)
            || self.author.to_lowercase().contains(&query)
            || self.context.to_lowercase().contains(&query)
    }

    fn tag_names(&self) -> Vec<String> {
        self.tags.iter().map(|t| t.as_str().to_string()).collect()
    }

    /// Convert to the obfuscated storage shape
    pub fn to_stored(&self) -> StoredQuote {
        StoredQuote {
            quote: encode_field(&self.body),
            author: encode_field(&self.author),
            context: encode_field(&self.context),
            tags: self.tag_names(),
            date: Some(self.date_added.clone()),
            date_added: None,
            slug: Some(self.slug.to_string()),
        }
    }

    /// Convert to the readable export shape
    pub fn to_plain(&self) -> PlainQuote {
        PlainQuote {
            quote: self.body.clone(),
            author: self.author.clone(),
            context: self.context.clone(),
            tags: self.tag_names(),
            date_added: self.date_added.clone(),
            slug: self.slug.to_string(),
        }
    }

    /// Rebuild a quote from its storage shape
    ///
    /// Never fails: undecodable text is kept as stored, unknown tags are
    /// dropped and returned so the caller can warn, and a missing slug or
    /// date is regenerated.
    pub fn from_stored(stored: StoredQuote) -> (Self, Vec<String>) {
        let (tags, rejected) = parse_tags(&stored.tags);
        let body = decode_field(&stored.quote);

        let date_added = stored
            .date_added
            .or(stored.date)
            .filter(|d| !d.trim().is_empty())
            .unwrap_or_else(today);

        let slug = stored
            .slug
            .filter(|s| !s.is_empty())
            .map(Slug::from_stored)
            .unwrap_or_else(|| Slug::from_body(&body));

        let quote = Self {
            author: decode_field(&stored.author),
            context: decode_field(&stored.context),
            body,
            tags,
            date_added,
            slug,
        };

        (quote, rejected)
    }
}

impl fmt::Display for Quote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\"{}\" - {}", self.body, self.author)?;
        if !self.context.is_empty() {
            write!(f, " ({})", self.context)?;
        }
        if self.tags.is_empty() {
            write!(f, " [no tags]")?;
        } else {
            write!(f, " [{}]", self.tag_names().join(", "))?;
        }
        write!(f, " (slug: {})", self.slug)
    }
}
