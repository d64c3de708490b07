//! Common lexer module
//!
//! Shared types for the tokenizer and the token transformations.

use crate::fnlang::token::Token;
use std::fmt;
use std::ops::Range;

/// A token with the byte range it covers in the source
pub type TokenSpan = (Token, Range<usize>);

/// Flat sequence of tokens, trivia already removed
pub type TokenStream = Vec<TokenSpan>;

/// Errors that can occur during lexing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LexError {
    /// No token matches the text at `span`
    UnrecognizedInput { span: Range<usize>, slice: String },
}

impl fmt::Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LexError::UnrecognizedInput { span, slice } => write!(
                f,
                "Lexing error: unrecognized input {:?} at {}..{}",
                slice, span.start, span.end
            ),
        }
    }
}

impl std::error::Error for LexError {}
