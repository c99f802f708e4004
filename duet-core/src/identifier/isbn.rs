//! Synthetic ISBN used as the package identifier
//!
//! Never a registered ISBN. Distinct titles can collide: at most seven
//! hash digits survive into the identifier.

use super::{checksum_digit, stable_hash};
use crate::error::IdentifierError;
use std::fmt;

/// Fixed prefix of every synthesized identifier
pub const ISBN_PREFIX: &str = "978001";

/// Length of a synthesized identifier
pub const ISBN_LEN: usize = 13;

/// A 13-character synthetic ISBN
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Isbn(String);

impl Isbn {
    /// Derive the identifier for `title`
    pub fn synthesize(title: &str) -> Result<Self, IdentifierError> {
        synthesize_isbn(title).map(Isbn)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Isbn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Isbn {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Prefix + hash (at least six digits) + check digit, cut to 13 characters.
///
/// Hashes of seven or eight digits push the string past 13 characters, in
/// which case the cut drops the check digit and keeps the leading hash
/// digits.
pub fn synthesize_isbn(title: &str) -> Result<String, IdentifierError> {
    let body = format!("{ISBN_PREFIX}{:06}", stable_hash(title));
    let check = checksum_digit(&body)?;

    let mut isbn = format!("{body}{check}");
    isbn.truncate(ISBN_LEN);
    Ok(isbn)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_short_hash_keeps_check_digit() {
        // hash("") == 0, body 978001000000, check digit 9
        assert_eq!(synthesize_isbn("").unwrap(), "9780010000009");
    }

    #[test]
    fn test_long_hash_is_cut() {
        // hash("My Novel") == 38448750
        assert_eq!(synthesize_isbn("My Novel").unwrap(), "9780013844875");
        assert_eq!(synthesize_isbn("a").unwrap(), "9780014220124");
    }

    #[test]
    fn test_newtype_matches_free_function() {
        let isbn = Isbn::synthesize("Journey to the West").unwrap();
        assert_eq!(isbn.as_str(), "9780016827733");
        assert_eq!(isbn.to_string(), isbn.as_str());
    }

    proptest! {
        #[test]
        fn isbn_shape(title in ".*") {
            let isbn = synthesize_isbn(&title).unwrap();
            prop_assert_eq!(isbn.len(), ISBN_LEN);
            prop_assert!(isbn.starts_with(ISBN_PREFIX));
            prop_assert!(isbn.chars().all(|c| c.is_ascii_digit()));
            prop_assert_eq!(isbn, synthesize_isbn(&title).unwrap());
        }
    }
}
