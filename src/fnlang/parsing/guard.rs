//! Resource limits checked on the token stream before parsing
//!
//!     The grammar and the visitor recurse once per nesting level, so an adversarial input such
//!     as ten thousand nested parentheses would exhaust the call stack. This guard scans the
//!     tokens once, without recursion, and rejects inputs that go beyond the configured
//!     [LimitsConfig].
//!
//!     Nesting depth counts open brackets (`(`, `{`, `.<`) plus operators in prefix position,
//!     since `- - - x` nests just like `(((x)))`. Chain length counts infix operators, `->`
//!     arrows and postfix applications (calls and element accesses) still open along the
//!     current nesting path; `,` `;` and `=` close the chain of their bracket level.

use std::fmt;
use std::ops::Range;

use crate::fnlang::config::LimitsConfig;
use crate::fnlang::lexing::TokenSpan;
use crate::fnlang::token::Token;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LimitError {
    NestingTooDeep { limit: usize, span: Range<usize> },
    ChainTooLong { limit: usize, span: Range<usize> },
}

impl fmt::Display for LimitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LimitError::NestingTooDeep { limit, span } => write!(
                f,
                "nesting deeper than {} levels at {}..{}",
                limit, span.start, span.end
            ),
            LimitError::ChainTooLong { limit, span } => write!(
                f,
                "more than {} chained operators at {}..{}",
                limit, span.start, span.end
            ),
        }
    }
}

impl std::error::Error for LimitError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Bracket {
    Paren,
    Brace,
    Generic,
}

#[derive(Debug)]
struct Level {
    bracket: Option<Bracket>,
    prefixes: usize,
    chain: usize,
}

impl Level {
    fn new(bracket: Option<Bracket>) -> Self {
        Level {
            bracket,
            prefixes: 0,
            chain: 0,
        }
    }
}

struct Guard<'a> {
    limits: &'a LimitsConfig,
    levels: Vec<Level>,
    depth: usize,
    chain: usize,
    /// Whether the previous token completed an operand
    after_operand: bool,
}

impl<'a> Guard<'a> {
    fn new(limits: &'a LimitsConfig) -> Self {
        Guard {
            limits,
            levels: vec![Level::new(None)],
            depth: 0,
            chain: 0,
            after_operand: false,
        }
    }

    fn top(&mut self) -> &mut Level {
        // The outermost level is never popped
        let last = self.levels.len() - 1;
        &mut self.levels[last]
    }

    fn deepen(&mut self, span: &Range<usize>) -> Result<(), LimitError> {
        self.depth += 1;
        if self.depth > self.limits.max_nesting_depth {
            return Err(LimitError::NestingTooDeep {
                limit: self.limits.max_nesting_depth,
                span: span.clone(),
            });
        }
        Ok(())
    }

    fn extend_chain(&mut self, span: &Range<usize>) -> Result<(), LimitError> {
        self.top().chain += 1;
        self.chain += 1;
        if self.chain > self.limits.max_operator_chain {
            return Err(LimitError::ChainTooLong {
                limit: self.limits.max_operator_chain,
                span: span.clone(),
            });
        }
        Ok(())
    }

    fn open(&mut self, bracket: Bracket, span: &Range<usize>) -> Result<(), LimitError> {
        self.levels.push(Level::new(Some(bracket)));
        self.deepen(span)
    }

    /// Close the innermost bracket if it matches; stray closers are left to the grammar.
    fn close(&mut self, bracket: Bracket) -> bool {
        if self.levels.len() == 1 || self.top().bracket != Some(bracket) {
            return false;
        }
        if let Some(level) = self.levels.pop() {
            self.depth -= 1 + level.prefixes;
            self.chain -= level.chain;
        }
        true
    }

    /// `,` `;` `=`: a new expression starts at this level
    fn separate(&mut self) {
        let level = self.top();
        let (prefixes, chain) = (level.prefixes, level.chain);
        level.prefixes = 0;
        level.chain = 0;
        self.depth -= prefixes;
        self.chain -= chain;
    }

    fn operator(&mut self, span: &Range<usize>) -> Result<(), LimitError> {
        if self.after_operand {
            self.extend_chain(span)
        } else {
            self.top().prefixes += 1;
            self.deepen(span)
        }
    }

    fn visit(&mut self, token: &Token, span: &Range<usize>) -> Result<(), LimitError> {
        let ends_operand = match token {
            Token::LParen => {
                if self.after_operand {
                    self.extend_chain(span)?;
                }
                self.open(Bracket::Paren, span)?;
                false
            }
            Token::LBrace => {
                self.open(Bracket::Brace, span)?;
                false
            }
            Token::GenericOpen => {
                self.open(Bracket::Generic, span)?;
                false
            }
            Token::RParen => {
                self.close(Bracket::Paren);
                true
            }
            Token::RBrace => {
                self.close(Bracket::Brace);
                true
            }
            Token::Gt => {
                if !self.close(Bracket::Generic) {
                    self.operator(span)?;
                    false
                } else {
                    true
                }
            }
            Token::Comma | Token::Semicolon | Token::Assign => {
                self.separate();
                false
            }
            Token::Dot | Token::Arrow => {
                self.extend_chain(span)?;
                false
            }
            Token::WrappedId(_) if self.after_operand => {
                self.extend_chain(span)?;
                false
            }
            token if token.is_operator_like() => {
                self.operator(span)?;
                false
            }
            token => token.ends_operand(),
        };
        self.after_operand = ends_operand;
        Ok(())
    }
}

/// Check the token stream against the nesting and chain limits.
pub fn check_limits(tokens: &[TokenSpan], limits: &LimitsConfig) -> Result<(), LimitError> {
    let mut guard = Guard::new(limits);
    for (token, span) in tokens {
        guard.visit(token, span)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fnlang::lexing::lex;

    fn limits(max_nesting_depth: usize, max_operator_chain: usize) -> LimitsConfig {
        LimitsConfig {
            max_nesting_depth,
            max_operator_chain,
        }
    }

    fn check(source: &str, limits: &LimitsConfig) -> Result<(), LimitError> {
        check_limits(&lex(source).unwrap(), limits)
    }

    #[test]
    fn test_nesting_counts_brackets() {
        let limits = limits(3, 100);
        assert!(check("((x))", &limits).is_ok());
        assert!(check("(((x)))", &limits).is_ok());
        assert!(matches!(
            check("((((x))))", &limits),
            Err(LimitError::NestingTooDeep { limit: 3, .. })
        ));
        assert!(check("(x)(y)(z)(w)", &limits).is_ok());
    }

    #[test]
    fn test_nesting_counts_prefix_operators() {
        let limits = limits(3, 100);
        assert!(check("- - - x", &limits).is_ok());
        assert!(check("- - - - x", &limits).is_err());
        assert!(check("{ a = - - x; b = - - y; - - z }", &limits).is_ok());
    }

    #[test]
    fn test_chain_counts_infix_and_postfix() {
        let limits = limits(10, 3);
        assert!(check("a + b + c + d", &limits).is_ok());
        assert!(check("a + b + c + d + e", &limits).is_err());
        assert!(check("f(1)(2)(3)", &limits).is_ok());
        assert!(check("f(1)(2)(3)(4)", &limits).is_err());
        assert!(check("x.0.1.2.3", &limits).is_err());
    }

    #[test]
    fn test_chain_spans_nesting_levels() {
        let limits = limits(10, 3);
        assert!(check("a + (b + (c + d))", &limits).is_ok());
        assert!(check("a + (b + (c + d + e))", &limits).is_err());
        assert!(check("(a + b + c) + (d + e)", &limits).is_ok());
    }

    #[test]
    fn test_separators_close_chains() {
        let limits = limits(10, 2);
        assert!(check("{ a = 1 + 2 + 3; b = 4 + 5 + 6; 7 + 8 }", &limits).is_ok());
        assert!(check("f(1 + 2, 3 + 4)", &limits).is_ok());
        assert!(check("f(1 + 2 + 3)", &limits).is_err());
    }

    #[test]
    fn test_generic_brackets_close_on_gt() {
        let limits = limits(2, 10);
        assert!(check("f.<g.<int>>(x)", &limits).is_ok());
        assert!(check("f.<g.<h.<int>>>", &limits).is_err());
        assert!(check("a > b", &limits).is_ok());
    }
}
