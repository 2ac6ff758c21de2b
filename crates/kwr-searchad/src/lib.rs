//! Client for the search-advertising keyword statistics API.
//!
//! Signs each request with HMAC-SHA256, decodes the `keywordList` payload and
//! normalizes raw rows into [`kwr_core::KeywordRecord`]s. Also hosts the
//! web-search duplication check used for draft copy.

pub mod client;
pub mod duplication;
pub mod error;
pub mod normalize;
pub mod signature;
pub mod source;
pub mod types;

pub use client::{SearchAdClient, SearchAdCredentials};
pub use duplication::{
    extract_sentences, visible_text, DuplicationCheck, DuplicationChecker, DuplicationStatus,
};
pub use error::SearchAdError;
pub use normalize::{normalize_keyword, parse_competition, to_float, to_int};
pub use source::KeywordSource;
pub use types::{KeywordToolResponse, RawKeyword};
