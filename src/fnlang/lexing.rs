//! Lexer
//!
//!     This module orchestrates tokenization for fnlang. The logos lexer produces a flat
//!     TokenStream of `(Token, byte range)` pairs, then transformations run one by one, each
//!     receiving a TokenStream and returning a TokenStream.
//!
//! The Lexing Pipeline
//!
//!     1. Core tokenization using logos. See [base_tokenization](base_tokenization).
//!        Whitespace and comments are dropped; unmatched input is an error.
//!
//!     2. Spaced dots. See [spaced_dots](transformations::spaced_dots).
//!        A `.` surrounded by whitespace becomes an operator.
//!
//!     3. Generic brackets. See [generic_brackets](transformations::generic_brackets).
//!        Operator runs that close `.<` brackets are split back into `>` tokens.
//!
//!     Byte ranges are never rewritten, only subdivided, so every token still points at the
//!     source text it came from.

pub mod base_tokenization;
pub mod common;
pub mod transformations;

pub use base_tokenization::tokenize;
pub use common::{LexError, TokenSpan, TokenStream};
pub use crate::fnlang::token::Token;

use transformations::{map_spaced_dots, GenericBracketMapper};

/// Run the full lexing pipeline, producing the token stream the grammar consumes.
pub fn lex(source: &str) -> Result<TokenStream, LexError> {
    let tokens = tokenize(source)?;
    let tokens = map_spaced_dots(tokens);
    Ok(GenericBracketMapper::new().map(tokens))
}
