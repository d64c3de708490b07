//! Parsing for fnlang
//!
//!     Turns a token stream into an AST, for a chosen grammar [Rule].
//!
//!     - [grammar] holds the chumsky parsers, which build the concrete [tree].
//!     - [guard] rejects inputs nested or chained beyond the configured limits before the
//!       grammar runs.
//!     - [visitor] converts the concrete tree into AST nodes, resolving operator precedence
//!       with the [operators] table.
//!     - [parser] ties the stages together behind [parse] and [try_parse].

pub(crate) mod grammar;
pub mod guard;
pub mod operators;
#[allow(clippy::module_inception)]
pub mod parser;
pub(crate) mod tree;
pub mod visitor;

pub use guard::LimitError;
pub use parser::{
    parse, parse_expression, parse_program, parse_type_instance, try_parse, Node, ParseError,
    Parser, Rule, UnknownRule,
};
pub use visitor::StructureError;
