//! Term counting module
//!
//! Search terms are regular expressions matched against the extracted text of
//! each page. Counting is sequential and non-overlapping.

mod counter;

pub use counter::TermCounter;
