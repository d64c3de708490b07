//! Token stream transformations
//!
//! Each transformation receives a TokenStream and returns a TokenStream, preserving byte ranges.

pub mod generic_brackets;
pub mod spaced_dots;

pub use generic_brackets::GenericBracketMapper;
pub use spaced_dots::map_spaced_dots;
