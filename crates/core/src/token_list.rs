//! Comma-joined name lists.
//!
//! Catalog records store cast and label references as plain text such as
//! `"Maria Ozawa, Sora Aoi"`. [`TokenList`] is the single place that parses
//! and formats these strings; propagation and master data fields both go
//! through it.

use std::fmt;

use serde::de::{self, SeqAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Separator used when formatting a list back to text.
pub const TOKEN_SEPARATOR: &str = ", ";

/// An ordered list of trimmed, non-empty names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenList(Vec<String>);

impl TokenList {
    /// Split on `,`, trim each token, drop empty tokens.
    pub fn parse(raw: &str) -> Self {
        Self(
            raw.split(',')
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .map(str::to_string)
                .collect(),
        )
    }

    /// Build from already-separated tokens, applying the same trimming rules.
    pub fn from_tokens<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self(
            tokens
                .into_iter()
                .map(|t| t.as_ref().trim().to_string())
                .filter(|t| !t.is_empty())
                .collect(),
        )
    }

    /// Canonical text form, joined with `", "`.
    pub fn format(&self) -> String {
        self.0.join(TOKEN_SEPARATOR)
    }

    /// Replace every token exactly equal to `old` with `new`.
    ///
    /// Matching is whole-token, so renaming `Ai` never touches `Aiko`.
    /// Returns whether any token changed.
    pub fn replace(&mut self, old: &str, new: &str) -> bool {
        let mut changed = false;
        for token in self.0.iter_mut().filter(|t| t.as_str() == old) {
            if token != new {
                *token = new.to_string();
                changed = true;
            }
        }
        changed
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.iter().any(|t| t == name)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn tokens(&self) -> &[String] {
        &self.0
    }
}

impl fmt::Display for TokenList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format())
    }
}

/// Rewrite a comma-joined field, returning the new text only if the parsed
/// token sequence changed.
///
/// Untouched fields are never re-formatted, so irregular spacing in records
/// that do not mention `old` is preserved.
pub fn rewrite_token_field(raw: &str, old: &str, new: &str) -> Option<String> {
    let mut list = TokenList::parse(raw);
    list.replace(old, new).then(|| list.format())
}

// ---------------------------------------------------------------------------
// Serde: stored as a string, accepted as a string or an array of strings
// ---------------------------------------------------------------------------

impl Serialize for TokenList {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.format())
    }
}

impl<'de> Deserialize<'de> for TokenList {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct TokenListVisitor;

        impl<'de> Visitor<'de> for TokenListVisitor {
            type Value = TokenList;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a comma-separated string or an array of strings")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<TokenList, E> {
                Ok(TokenList::parse(v))
            }

            fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<TokenList, A::Error> {
                let mut tokens = Vec::new();
                while let Some(token) = seq.next_element::<String>()? {
                    tokens.push(token);
                }
                Ok(TokenList::from_tokens(tokens))
            }
        }

        deserializer.deserialize_any(TokenListVisitor)
    }
}
