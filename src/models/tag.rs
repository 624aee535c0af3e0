//! Quote tags
//!
//! A small closed set of categories describing where a quote came from.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::QuillError;

/// Where a quote came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Tag {
    Lyric,
    Book,
    Movie,
    Interview,
    Comedy,
    Friend,
}

impl Tag {
    /// Every tag, in display order
    pub const ALL: [Tag; 6] = [
        Tag::Lyric,
        Tag::Book,
        Tag::Movie,
        Tag::Interview,
        Tag::Comedy,
        Tag::Friend,
    ];

    /// Parse a tag name, ignoring case and surrounding whitespace
    pub fn parse(s: &str) -> Result<Self, QuillError> {
        match s.trim().to_uppercase().as_str() {
            "LYRIC" => Ok(Self::Lyric),
            "BOOK" => Ok(Self::Book),
            "MOVIE" => Ok(Self::Movie),
            "INTERVIEW" => Ok(Self::Interview),
            "COMEDY" => Ok(Self::Comedy),
            "FRIEND" => Ok(Self::Friend),
            _ => Err(QuillError::InvalidTag(s.trim().to_string())),
        }
    }

    /// Canonical upper-case name, used for display and storage
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Lyric => "LYRIC",
            Self::Book => "BOOK",
            Self::Movie => "MOVIE",
            Self::Interview => "INTERVIEW",
            Self::Comedy => "COMEDY",
            Self::Friend => "FRIEND",
        }
    }

    /// Comma-joined list of every tag name
    pub fn available() -> String {
        Self::ALL
            .iter()
            .map(Tag::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Tag {
    type Err = QuillError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Parse names one by one, splitting out the ones that are not tags
///
/// Returns the valid tags in input order and the rejected names.
pub fn parse_tags<I, S>(names: I) -> (Vec<Tag>, Vec<String>)
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut tags = Vec::new();
    let mut rejected = Vec::new();

    for name in names {
        let name = name.as_ref().trim();
        if name.is_empty() {
            continue;
        }
        match Tag::parse(name) {
            Ok(tag) => tags.push(tag),
            Err(_) => rejected.push(name.to_string()),
        }
    }

    (tags, rejected)
}

/// Parse a comma-separated tag list as typed at a prompt
pub fn parse_tag_list(input: &str) -> (Vec<Tag>, Vec<String>) {
    parse_tags(input.split(','))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_case_insensitive() {
        assert_eq!(Tag::parse("lyric").unwrap(), Tag::Lyric);
        assert_eq!(Tag::parse("LYRIC").unwrap(), Tag::Lyric);
        assert_eq!(Tag::parse("Lyric").unwrap(), Tag::Lyric);
        assert_eq!(Tag::parse("  book ").unwrap(), Tag::Book);
    }

    #[test]
    fn test_parse_invalid() {
        let err = Tag::parse("podcast").unwrap_err();
        assert!(matches!(err, QuillError::InvalidTag(ref name) if name == "podcast"));
        assert_eq!(err.to_string(), "'podcast' is not a valid tag");
    }

    #[test]
    fn test_text_round_trip() {
        for tag in Tag::ALL {
            assert_eq!(Tag::parse(&tag.to_string()).unwrap(), tag);
        }
    }

    #[test]
    fn test_available() {
        assert_eq!(
            Tag::available(),
            "LYRIC, BOOK, MOVIE, INTERVIEW, COMEDY, FRIEND"
        );
    }

    #[test]
    fn test_parse_tag_list() {
        let (tags, rejected) = parse_tag_list("book, Movie ,nope,, friend");
        assert_eq!(tags, vec![Tag::Book, Tag::Movie, Tag::Friend]);
        assert_eq!(rejected, vec!["nope".to_string()]);
    }

    #[test]
    fn test_parse_tag_list_empty() {
        let (tags, rejected) = parse_tag_list("");
        assert!(tags.is_empty());
        assert!(rejected.is_empty());
    }

    #[test]
    fn test_serialization() {
        let json = serde_json::to_string(&vec![Tag::Comedy, Tag::Interview]).unwrap();
        assert_eq!(json, r#"["COMEDY","INTERVIEW"]"#);
    }
}
