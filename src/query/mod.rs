pub mod fast_lowercase;

pub use fast_lowercase::FastLowercase;

use std::fmt;

/// Case-insensitive name of a logical table, stored lowercased.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TableName(String);

impl TableName {
    pub fn new(name: &str) -> Self {
        Self(name.fast_to_lowercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TableName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A search key in its whole-word matching form.
#[derive(Debug, Clone)]
pub struct KeyPattern {
    padded: String,
}

impl KeyPattern {
    pub fn new(key: &str) -> Self {
        Self {
            padded: key.padded_lowercase(),
        }
    }

    /// True when the key occurs in `field` as a standalone word or phrase.
    ///
    /// `an` matches `an apple` but not `banana`.
    pub fn matches_field(&self, field: &str) -> bool {
        field.padded_lowercase().contains(&self.padded)
    }

    pub fn matches_any<'a, I>(&self, fields: I) -> bool
    where
        I: IntoIterator<Item = &'a str>,
    {
        fields.into_iter().any(|field| self.matches_field(field))
    }
}
