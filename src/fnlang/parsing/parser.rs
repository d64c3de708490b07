//! Parser front door
//!
//!     Parsing one input runs four stages, each of which can reject it:
//!
//!         1. lexing (unrecognized input),
//!         2. the limits guard (nesting or chains beyond [LimitsConfig]),
//!         3. the grammar for the requested [Rule], which must consume every token,
//!         4. the visitor (structural errors such as `a == b == c`).
//!
//!     [Parser::try_parse] reports which stage failed and why. [Parser::parse] is the plain
//!     contract used by most callers: a complete AST or nothing.

use chumsky::prelude::end;
use chumsky::Parser as _;
use serde::Deserialize;
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

use super::grammar::{self, ParserError};
use super::guard::{check_limits, LimitError};
use super::visitor::{self, StructureError};
use crate::fnlang::ast::{
    Assignment, Block, Definition, Expression, Program, ToJson, TypeInstance,
};
use crate::fnlang::config::LimitsConfig;
use crate::fnlang::lexing::{lex, LexError, TokenSpan, TokenStream};

/// The grammar rule an input is parsed as
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rule {
    Program,
    Expr,
    TypeInstance,
    Block,
    Assignment,
    TypeDef,
    TypeAlias,
}

impl Rule {
    pub const ALL: [Rule; 7] = [
        Rule::Program,
        Rule::Expr,
        Rule::TypeInstance,
        Rule::Block,
        Rule::Assignment,
        Rule::TypeDef,
        Rule::TypeAlias,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Rule::Program => "program",
            Rule::Expr => "expr",
            Rule::TypeInstance => "type_instance",
            Rule::Block => "block",
            Rule::Assignment => "assignment",
            Rule::TypeDef => "type_def",
            Rule::TypeAlias => "type_alias",
        }
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownRule(pub String);

impl fmt::Display for UnknownRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = Rule::ALL.iter().map(Rule::name).collect();
        write!(
            f,
            "unknown rule '{}' (expected one of: {})",
            self.0,
            names.join(", ")
        )
    }
}

impl std::error::Error for UnknownRule {}

impl FromStr for Rule {
    type Err = UnknownRule;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Rule::ALL
            .into_iter()
            .find(|rule| rule.name() == s)
            .ok_or_else(|| UnknownRule(s.to_string()))
    }
}

/// The result of parsing with a given rule
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Program(Program),
    Expression(Expression),
    TypeInstance(TypeInstance),
    Block(Block),
    Assignment(Assignment),
    /// From `type_def` and `type_alias`
    Definition(Definition),
}

impl Node {
    /// JSON projection of the root node (the root itself is not wrapped).
    pub fn to_json(&self) -> Value {
        match self {
            Node::Program(program) => program.to_json(),
            Node::Expression(expression) => expression.to_json(),
            Node::TypeInstance(type_instance) => type_instance.to_json(),
            Node::Block(block) => block.to_json(),
            Node::Assignment(assignment) => assignment.to_json(),
            Node::Definition(definition) => definition.to_json(),
        }
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Program(program) => write!(f, "{}", program),
            Node::Expression(expression) => write!(f, "{}", expression),
            Node::TypeInstance(type_instance) => write!(f, "{}", type_instance),
            Node::Block(block) => write!(f, "{}", block),
            Node::Assignment(assignment) => write!(f, "{}", assignment),
            Node::Definition(definition) => write!(f, "{}", definition),
        }
    }
}

/// Why an input produced no result
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    Lex(LexError),
    Limit(LimitError),
    Syntax { rule: Rule, message: String },
    Structure(StructureError),
}

impl ParseError {
    fn syntax(rule: Rule, errors: Vec<ParserError>) -> Self {
        let message = match errors.first() {
            Some(error) => match error.found() {
                Some((token, range)) => format!(
                    "unexpected `{}` at {}..{}{}",
                    token,
                    range.start,
                    range.end,
                    describe_reason(error)
                ),
                None => format!("unexpected end of input{}", describe_reason(error)),
            },
            None => "no parse".to_string(),
        };
        ParseError::Syntax { rule, message }
    }
}

fn describe_reason(error: &ParserError) -> String {
    match error.reason() {
        chumsky::error::SimpleReason::Custom(message) => format!(" ({})", message),
        _ => String::new(),
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::Lex(error) => write!(f, "lexical error: {}", error),
            ParseError::Limit(error) => write!(f, "input too complex: {}", error),
            ParseError::Syntax { rule, message } => {
                write!(f, "syntax error in {}: {}", rule, message)
            }
            ParseError::Structure(error) => write!(f, "invalid structure: {}", error),
        }
    }
}

impl std::error::Error for ParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ParseError::Lex(error) => Some(error),
            ParseError::Limit(error) => Some(error),
            ParseError::Syntax { .. } => None,
            ParseError::Structure(error) => Some(error),
        }
    }
}

impl From<LexError> for ParseError {
    fn from(error: LexError) -> Self {
        ParseError::Lex(error)
    }
}

impl From<LimitError> for ParseError {
    fn from(error: LimitError) -> Self {
        ParseError::Limit(error)
    }
}

impl From<StructureError> for ParseError {
    fn from(error: StructureError) -> Self {
        ParseError::Structure(error)
    }
}

/// Run one grammar rule over the whole token stream.
fn run<T>(
    rule: Rule,
    parser: impl chumsky::Parser<TokenSpan, T, Error = ParserError>,
    tokens: TokenStream,
) -> Result<T, ParseError> {
    parser
        .then_ignore(end())
        .parse(tokens)
        .map_err(|errors| ParseError::syntax(rule, errors))
}

/// A parser configured with resource limits
#[derive(Debug, Clone, Default)]
pub struct Parser {
    limits: LimitsConfig,
}

impl Parser {
    pub fn new(limits: LimitsConfig) -> Self {
        Parser { limits }
    }

    /// Parse `source` as `rule`, reporting why it failed.
    pub fn try_parse(&self, source: &str, rule: Rule) -> Result<Node, ParseError> {
        let tokens = lex(source)?;
        tracing::trace!(%rule, tokens = tokens.len(), "lexed input");
        check_limits(&tokens, &self.limits)?;

        let node = match rule {
            Rule::Program => {
                Node::Program(visitor::visit_program(run(rule, grammar::program(), tokens)?)?)
            }
            Rule::Expr => Node::Expression(visitor::visit_expression(run(
                rule,
                grammar::expression(),
                tokens,
            )?)?),
            Rule::TypeInstance => Node::TypeInstance(visitor::visit_type(run(
                rule,
                grammar::type_instance(),
                tokens,
            )?)),
            Rule::Block => Node::Block(visitor::visit_block(run(rule, grammar::block(), tokens)?)?),
            Rule::Assignment => Node::Assignment(visitor::visit_assignment(run(
                rule,
                grammar::assignment(),
                tokens,
            )?)?),
            Rule::TypeDef => Node::Definition(visitor::visit_definition(run(
                rule,
                grammar::type_definition(),
                tokens,
            )?)?),
            Rule::TypeAlias => Node::Definition(visitor::visit_definition(run(
                rule,
                grammar::type_alias(),
                tokens,
            )?)?),
        };
        tracing::trace!(%rule, "parsed input");
        Ok(node)
    }

    /// Parse `source` as `rule`: a complete AST, or `None`.
    pub fn parse(&self, source: &str, rule: Rule) -> Option<Node> {
        match self.try_parse(source, rule) {
            Ok(node) => Some(node),
            Err(error) => {
                tracing::debug!(%rule, %error, "no result");
                None
            }
        }
    }

    pub fn parse_program(&self, source: &str) -> Option<Program> {
        match self.parse(source, Rule::Program)? {
            Node::Program(program) => Some(program),
            _ => None,
        }
    }

    pub fn parse_expression(&self, source: &str) -> Option<Expression> {
        match self.parse(source, Rule::Expr)? {
            Node::Expression(expression) => Some(expression),
            _ => None,
        }
    }

    pub fn parse_type_instance(&self, source: &str) -> Option<TypeInstance> {
        match self.parse(source, Rule::TypeInstance)? {
            Node::TypeInstance(type_instance) => Some(type_instance),
            _ => None,
        }
    }
}

/// Parse with the default limits.
pub fn parse(source: &str, rule: Rule) -> Option<Node> {
    Parser::default().parse(source, rule)
}

/// Parse with the default limits, reporting why it failed.
pub fn try_parse(source: &str, rule: Rule) -> Result<Node, ParseError> {
    Parser::default().try_parse(source, rule)
}

pub fn parse_program(source: &str) -> Option<Program> {
    Parser::default().parse_program(source)
}

pub fn parse_expression(source: &str) -> Option<Expression> {
    Parser::default().parse_expression(source)
}

pub fn parse_type_instance(source: &str) -> Option<TypeInstance> {
    Parser::default().parse_type_instance(source)
}
