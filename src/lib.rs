//! # fnlang-parser
//!
//! Parser front end for fnlang, a small expression-oriented language with user-defined
//! operators, generics, tuples, tagged unions and pattern matching.
//!
//! Source text goes through the [lexer](fnlang::lexing), a limits guard, a chumsky
//! [grammar](fnlang::parsing) and a visitor that resolves operator precedence, producing a
//! syntactic [AST](fnlang::ast). The AST can be projected to JSON for downstream tools.
//!
//! ```text
//! use fnlang_parser::fnlang::parsing::{parse, Rule};
//!
//! let node = parse("3 + 4 * 5", Rule::Expr).unwrap();
//! assert_eq!(node.to_string(), "+(3, *(4, 5))");
//! ```

pub mod fnlang;
