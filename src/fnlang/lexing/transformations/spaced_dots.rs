//! Spaced dot operator
//!
//!     A single `.` is element access when glued to its neighbours (`pair.0`) and the
//!     composition-style operator when written with whitespace (or a comment) on both sides
//!     (`f . g`). Logos cannot see whitespace it has already skipped, so the distinction is made
//!     here from the byte ranges: a `Dot` whose neighbours do not touch it becomes
//!     `Operator(".")`.
use crate::fnlang::lexing::common::TokenStream;
use crate::fnlang::token::Token;

pub fn map_spaced_dots(tokens: TokenStream) -> TokenStream {
    let mut output = tokens.clone();

    for (index, (token, span)) in tokens.iter().enumerate() {
        if *token != Token::Dot || index == 0 {
            continue;
        }
        let Some((_, next)) = tokens.get(index + 1) else {
            continue;
        };
        let (_, previous) = &tokens[index - 1];
        if previous.end < span.start && span.end < next.start {
            output[index].0 = Token::Operator(".".to_string());
        }
    }

    output
}
