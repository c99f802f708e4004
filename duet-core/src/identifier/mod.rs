//! Deterministic identifiers derived from the book title

mod checksum;
mod hash;
mod isbn;

pub use checksum::checksum_digit;
pub use hash::{stable_hash, HASH_BOUND};
pub use isbn::{synthesize_isbn, Isbn, ISBN_LEN, ISBN_PREFIX};
