//! Generic bracket splitter
//!
//!     Generic instantiations are written `name.<T, U>`. Maximal munch merges the closing `>`
//!     with whatever operator characters follow it, so `map.<f.<T>>` ends with the single
//!     operator run `>>`, `f.<int>+1` carries `>+` and `g.<int->int>` carries `->>`.
//!
//!     This mapper tracks how many `.<` brackets are open. While at least one is open, operator
//!     runs are split into `->` arrows, `>` closers and whatever is left. Once every bracket is
//!     closed the remainder of the run stays a single operator, as the lexer produced it.
//!     Byte ranges of the split pieces are carved out of the run they came from.
use crate::fnlang::lexing::common::TokenStream;
use crate::fnlang::token::Token;
use std::ops::Range;

/// Splits operator runs inside `.<` ... `>` into bracket and arrow tokens.
pub struct GenericBracketMapper {
    depth: usize,
}

impl GenericBracketMapper {
    pub fn new() -> Self {
        GenericBracketMapper { depth: 0 }
    }

    pub fn map(&mut self, tokens: TokenStream) -> TokenStream {
        let mut output = Vec::with_capacity(tokens.len());

        for (token, span) in tokens {
            match token {
                Token::GenericOpen => {
                    self.depth += 1;
                    output.push((token, span));
                }
                Token::Gt if self.depth > 0 => {
                    self.depth -= 1;
                    output.push((token, span));
                }
                Token::Operator(run) if self.depth > 0 => self.split_run(&run, span, &mut output),
                other => output.push((other, span)),
            }
        }

        output
    }

    fn split_run(&mut self, run: &str, span: Range<usize>, output: &mut TokenStream) {
        let mut pending_start: Option<usize> = None;
        let mut offset = 0;

        while offset < run.len() {
            if self.depth == 0 {
                // Brackets balanced: the rest of the run is an ordinary operator
                pending_start.get_or_insert(offset);
                break;
            }
            let rest = &run[offset..];
            let (piece, width) = if rest.starts_with("->") {
                (Some(Token::Arrow), 2)
            } else if rest.starts_with('>') {
                self.depth -= 1;
                (Some(Token::Gt), 1)
            } else {
                (None, 1)
            };

            match piece {
                Some(piece) => {
                    flush(run, &span, &mut pending_start, offset, output);
                    output.push((piece, span.start + offset..span.start + offset + width));
                }
                None => {
                    pending_start.get_or_insert(offset);
                }
            }
            offset += width;
        }

        flush(run, &span, &mut pending_start, run.len(), output);
    }
}

impl Default for GenericBracketMapper {
    fn default() -> Self {
        Self::new()
    }
}

/// Emit the pending operator characters `run[start..end]`, if any.
fn flush(
    run: &str,
    span: &Range<usize>,
    pending_start: &mut Option<usize>,
    end: usize,
    output: &mut TokenStream,
) {
    if let Some(start) = pending_start.take() {
        if start < end {
            output.push((
                Token::Operator(run[start..end].to_string()),
                span.start + start..span.start + end,
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fnlang::lexing::base_tokenization::tokenize;

    fn split(source: &str) -> Vec<Token> {
        let tokens = tokenize(source).unwrap();
        GenericBracketMapper::new()
            .map(tokens)
            .into_iter()
            .map(|(token, _)| token)
            .collect()
    }

    #[test]
    fn test_nested_closers() {
        assert_eq!(
            split("map.<f.<g.<T>>>"),
            vec![
                Token::Ident("map".to_string()),
                Token::GenericOpen,
                Token::Ident("f".to_string()),
                Token::GenericOpen,
                Token::Ident("g".to_string()),
                Token::GenericOpen,
                Token::Ident("T".to_string()),
                Token::Gt,
                Token::Gt,
                Token::Gt,
            ]
        );
    }

    #[test]
    fn test_trailing_operator_survives() {
        assert_eq!(
            split("f.<int>+1"),
            vec![
                Token::Ident("f".to_string()),
                Token::GenericOpen,
                Token::Int,
                Token::Gt,
                Token::Operator("+".to_string()),
                Token::Integer("1".to_string()),
            ]
        );
    }

    #[test]
    fn test_arrow_inside_brackets() {
        assert_eq!(
            split("g.<int->int>"),
            vec![
                Token::Ident("g".to_string()),
                Token::GenericOpen,
                Token::Int,
                Token::Arrow,
                Token::Int,
                Token::Gt,
            ]
        );
        assert_eq!(
            split("g.<int->>"),
            vec![
                Token::Ident("g".to_string()),
                Token::GenericOpen,
                Token::Int,
                Token::Arrow,
                Token::Gt,
            ]
        );
    }

    #[test]
    fn test_runs_outside_brackets_untouched() {
        assert_eq!(
            split("a >> b"),
            vec![
                Token::Ident("a".to_string()),
                Token::Operator(">>".to_string()),
                Token::Ident("b".to_string()),
            ]
        );
    }

    #[test]
    fn test_split_spans() {
        let tokens = GenericBracketMapper::new().map(tokenize("f.<T>>= x").unwrap());
        // `>>=` closes one bracket and leaves `>=`
        assert_eq!(tokens[3], (Token::Gt, 4..5));
        assert_eq!(tokens[4], (Token::Operator(">=".to_string()), 5..7));
    }
}
