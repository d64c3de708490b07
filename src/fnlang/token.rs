//! Token definitions for fnlang
//!
//! The tokens are defined using the logos derive macro. Trivia (whitespace and comments) is
//! produced as tokens too and dropped by [base_tokenization](crate::fnlang::lexing::base_tokenization)
//! so that spans of the remaining tokens still point into the source text.
//!
//! Operator handling
//!
//!     Any run of operator characters is a single [Token::Operator]. The handful of symbols that
//!     also play a structural role (`=`, `<`, `>`, `|`, `:`, `->`, `.`) have their own tokens and
//!     win over the operator run when they appear alone. The parser decides, by position, whether
//!     `<`, `>`, `|` and `:` are acting as infix operators.
//!
//!     Generic instantiation brackets (`.<` ... `>`) clash with maximal munch: in `f.<g.<T>>` the
//!     closing `>>` is lexed as one operator run. This is undone by the
//!     [generic_brackets](crate::fnlang::lexing::transformations::generic_brackets) transformation.
use logos::{Lexer, Logos};
use std::fmt;

/// All possible tokens in fnlang source
#[derive(Logos, Debug, PartialEq, Eq, Hash, Clone)]
pub enum Token {
    // Trivia
    #[regex(r"[ \t\r\n\f]+")]
    Whitespace,
    #[regex(r"//[^\n]*", priority = 10)]
    LineComment,
    #[token("/*", block_comment)]
    BlockComment,

    // Keywords
    #[token("typedef")]
    Typedef,
    #[token("typealias")]
    Typealias,
    #[token("if")]
    If,
    #[token("else")]
    Else,
    #[token("match")]
    Match,
    #[token("int")]
    Int,
    #[token("bool")]
    Bool,
    #[token("true")]
    True,
    #[token("false")]
    False,

    // Punctuation
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token(",")]
    Comma,
    #[token(";")]
    Semicolon,
    #[token("=")]
    Assign,
    #[token("->")]
    Arrow,
    #[token(".<")]
    GenericOpen,
    #[token(".")]
    Dot,
    #[token("<")]
    Lt,
    #[token(">")]
    Gt,
    #[token("|")]
    Pipe,
    #[token(":")]
    Colon,

    // Names
    /// `__name__`: a bound name when defined or referenced, an infix operator between operands
    #[regex(r"__[a-zA-Z_][a-zA-Z0-9_]*'*__", |lex| lex.slice().to_string(), priority = 3)]
    WrappedId(String),
    /// `__op__`: an operator symbol escaped so it can be bound or referenced by name
    #[regex(r"__([&!+/\-^$<>@:*|%=]+|\.\.+)__", |lex| operator_id(lex.slice()))]
    OperatorId(String),
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*'*", |lex| lex.slice().to_string(), priority = 2)]
    Ident(String),

    // Literals
    #[regex(r"[0-9]+", |lex| lex.slice().to_string())]
    Integer(String),

    /// A run of operator characters, or two or more dots. A run never contains `/*`, which
    /// always opens a comment.
    #[regex(
        r"([&!+\-^$<>@:*|%=]|/+[&!+\-^$<>@:|%=])+/*|/+|\.\.+",
        |lex| lex.slice().to_string(),
        priority = 1
    )]
    Operator(String),
}

/// Consume a block comment up to the first `*/`.
///
/// Without a closing `*/` the opener is not a comment and lexing fails at `/*`.
fn block_comment(lex: &mut Lexer<Token>) -> bool {
    match lex.remainder().find("*/") {
        Some(end) => {
            lex.bump(end + 2);
            true
        }
        None => false,
    }
}

/// Strip the `__` fences of an operator identifier.
///
/// `__=__` is rejected: a bare `=` is the assignment symbol, never an operator name.
fn operator_id(slice: &str) -> Option<String> {
    let inner = slice.strip_prefix("__")?.strip_suffix("__")?;
    if inner == "=" {
        None
    } else {
        Some(inner.to_string())
    }
}

impl Token {
    /// Whitespace and comments, dropped before parsing
    pub fn is_trivia(&self) -> bool {
        matches!(
            self,
            Token::Whitespace | Token::LineComment | Token::BlockComment
        )
    }

    /// Tokens that can end an operand, so that an operator right after them is infix
    pub fn ends_operand(&self) -> bool {
        matches!(
            self,
            Token::Ident(_)
                | Token::WrappedId(_)
                | Token::OperatorId(_)
                | Token::Integer(_)
                | Token::True
                | Token::False
                | Token::Int
                | Token::Bool
                | Token::RParen
                | Token::RBrace
                | Token::Gt
        )
    }

    /// Tokens that may act as an operator symbol in expression position
    pub fn is_operator_like(&self) -> bool {
        matches!(
            self,
            Token::Operator(_) | Token::Lt | Token::Gt | Token::Pipe | Token::Colon
        )
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Token::Whitespace => "<whitespace>",
            Token::LineComment | Token::BlockComment => "<comment>",
            Token::Typedef => "typedef",
            Token::Typealias => "typealias",
            Token::If => "if",
            Token::Else => "else",
            Token::Match => "match",
            Token::Int => "int",
            Token::Bool => "bool",
            Token::True => "true",
            Token::False => "false",
            Token::LParen => "(",
            Token::RParen => ")",
            Token::LBrace => "{",
            Token::RBrace => "}",
            Token::Comma => ",",
            Token::Semicolon => ";",
            Token::Assign => "=",
            Token::Arrow => "->",
            Token::GenericOpen => ".<",
            Token::Dot => ".",
            Token::Lt => "<",
            Token::Gt => ">",
            Token::Pipe => "|",
            Token::Colon => ":",
            Token::WrappedId(s) | Token::Ident(s) | Token::Integer(s) | Token::Operator(s) => {
                s.as_str()
            }
            Token::OperatorId(s) => return write!(f, "__{}__", s),
        };
        write!(f, "{}", text)
    }
}
