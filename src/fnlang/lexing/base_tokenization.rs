//! Core tokenization using logos
//!
//! Produces the flat token stream with byte ranges. Trivia is dropped here; input logos cannot
//! match is reported, never skipped.

use crate::fnlang::lexing::common::{LexError, TokenStream};
use crate::fnlang::token::Token;
use logos::Logos;

/// Tokenize a string, keeping the byte range of every significant token
pub fn tokenize(source: &str) -> Result<TokenStream, LexError> {
    let mut lexer = Token::lexer(source);
    let mut tokens = Vec::new();

    while let Some(result) = lexer.next() {
        match result {
            Ok(token) if token.is_trivia() => {}
            Ok(token) => tokens.push((token, lexer.span())),
            Err(()) => {
                return Err(LexError::UnrecognizedInput {
                    span: lexer.span(),
                    slice: lexer.slice().to_string(),
                })
            }
        }
    }

    Ok(tokens)
}
