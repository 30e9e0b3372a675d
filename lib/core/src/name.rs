//! Name tokenization
//!
//! A name is lower-cased and split on whitespace into an ordered list of
//! parts. The first part is taken as the given name and, when there is more
//! than one part, the last part as the family name.

/// A lower-cased personal name and its whitespace-delimited parts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Name {
    full: String,
    parts: Vec<String>,
}

impl Name {
    /// Lower-case and tokenize a raw name. Never fails: empty or
    /// whitespace-only input yields no parts.
    pub fn parse(raw: &str) -> Self {
        let full = raw.to_lowercase();
        let parts = full.split_whitespace().map(str::to_string).collect();
        Self { full, parts }
    }

    /// The whole lower-cased string, whitespace preserved
    pub fn full(&self) -> &str {
        &self.full
    }

    pub fn parts(&self) -> &[String] {
        &self.parts
    }

    /// Length of the full name in characters
    pub fn char_len(&self) -> usize {
        self.full.chars().count()
    }

    pub fn name_parts(&self) -> NameParts<'_> {
        NameParts::from_parts(&self.parts)
    }
}

/// First and last token view of a [`Name`]
///
/// `last` stays empty for single-token names; it is never set to `first`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NameParts<'a> {
    pub first: &'a str,
    pub last: &'a str,
}

impl<'a> NameParts<'a> {
    pub fn from_parts(parts: &'a [String]) -> Self {
        let first = parts.first().map(String::as_str).unwrap_or("");
        let last = if parts.len() > 1 {
            parts.last().map(String::as_str).unwrap_or("")
        } else {
            ""
        };
        Self { first, last }
    }
}
