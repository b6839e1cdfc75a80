//! Record date parsing, caching and rendering
//!
//! Dates are parsed once per distinct raw string with a strict fixed-width
//! format (`YYYY-MM-DDTHH:mm:ss.SSSZ`) and rendered into period labels and
//! page paths in the offset they were written in.

pub mod cache;
pub mod format;
pub mod parse;

pub use cache::DateCache;
pub use format::Period;
pub use parse::{ParsedDate, parse_strict};
