//! URL handling module for Term-Ripple
//!
//! Anchors are canonicalized with a fixed set of textual rewriting rules.
//! The resulting string is the dedup key for the crawl, so the rules are
//! intentionally literal rather than RFC 3986 resolution.

mod normalize;

pub use normalize::normalize_href;
