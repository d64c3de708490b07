//! Expressions and blocks
//!
//! Operator applications are ordinary [FunctionCall]s whose function is a [GenericVariable]
//! named after the operator, so `3 + 4` is `FunctionCall(+, [3, 4])` and `3 __add__ 4` is
//! `FunctionCall(add, [3, 4])`.

use super::definitions::{Assignee, Assignment};
use super::traits::AstNode;
use super::types::{write_list, write_tuple, Id, TypeInstance};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionCall {
    pub function: Box<Expression>,
    pub arguments: Vec<Expression>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Integer {
    pub value: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Boolean {
    pub value: bool,
}

/// `expression.index`, where the index is always a literal
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementAccess {
    pub expression: Box<Expression>,
    pub index: usize,
}

/// A variable, optionally instantiated: `map.<int>`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenericVariable {
    pub id: Id,
    pub type_instances: Vec<TypeInstance>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IfExpression {
    pub condition: Box<Expression>,
    pub true_block: Block,
    pub false_block: Block,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchExpression {
    pub subject: Box<Expression>,
    pub blocks: Vec<MatchBlock>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TupleExpression {
    pub expressions: Vec<Expression>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionDefinition {
    pub parameters: Vec<TypedAssignee>,
    pub return_type: TypeInstance,
    pub body: Block,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstructorCall {
    pub constructor: GenericConstructor,
    pub arguments: Vec<Expression>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expression {
    FunctionCall(FunctionCall),
    Integer(Integer),
    Boolean(Boolean),
    ElementAccess(ElementAccess),
    GenericVariable(GenericVariable),
    IfExpression(IfExpression),
    MatchExpression(MatchExpression),
    TupleExpression(TupleExpression),
    FunctionDefinition(FunctionDefinition),
    ConstructorCall(ConstructorCall),
}

impl Expression {
    /// A plain variable reference
    pub fn var(id: impl Into<Id>) -> Self {
        Expression::GenericVariable(GenericVariable {
            id: id.into(),
            type_instances: Vec::new(),
        })
    }

    pub fn generic_var(id: impl Into<Id>, type_instances: Vec<TypeInstance>) -> Self {
        Expression::GenericVariable(GenericVariable {
            id: id.into(),
            type_instances,
        })
    }

    pub fn int(value: i64) -> Self {
        Expression::Integer(Integer { value })
    }

    pub fn boolean(value: bool) -> Self {
        Expression::Boolean(Boolean { value })
    }

    pub fn call(function: Expression, arguments: Vec<Expression>) -> Self {
        Expression::FunctionCall(FunctionCall {
            function: Box::new(function),
            arguments,
        })
    }

    /// Binary application of the operator (or function) named `operator`
    pub fn binary(operator: impl Into<Id>, left: Expression, right: Expression) -> Self {
        Self::call(Self::var(operator), vec![left, right])
    }

    pub fn tuple(expressions: Vec<Expression>) -> Self {
        Expression::TupleExpression(TupleExpression { expressions })
    }

    pub fn access(expression: Expression, index: usize) -> Self {
        Expression::ElementAccess(ElementAccess {
            expression: Box::new(expression),
            index,
        })
    }
}

impl AstNode for Expression {
    fn node_type(&self) -> &'static str {
        match self {
            Expression::FunctionCall(_) => "FunctionCall",
            Expression::Integer(_) => "Integer",
            Expression::Boolean(_) => "Boolean",
            Expression::ElementAccess(_) => "ElementAccess",
            Expression::GenericVariable(_) => "GenericVariable",
            Expression::IfExpression(_) => "IfExpression",
            Expression::MatchExpression(_) => "MatchExpression",
            Expression::TupleExpression(_) => "TupleExpression",
            Expression::FunctionDefinition(_) => "FunctionDefinition",
            Expression::ConstructorCall(_) => "ConstructorCall",
        }
    }
}

/// A parameter with its declared type: `x: int`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypedAssignee {
    pub assignee: Assignee,
    pub type_: TypeInstance,
}

/// Assignments followed by exactly one trailing expression
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    pub assignments: Vec<Assignment>,
    pub expression: Box<Expression>,
}

impl Block {
    pub fn new(assignments: Vec<Assignment>, expression: Expression) -> Self {
        Block {
            assignments,
            expression: Box::new(expression),
        }
    }
}

/// One alternative of a match block: a variant name and an optional binding
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchItem {
    pub type_name: Id,
    pub assignee: Option<Assignee>,
}

/// Or-patterns sharing one body: `Some x | None: { ... }`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchBlock {
    pub matches: Vec<MatchItem>,
    pub block: Block,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenericConstructor {
    pub id: Id,
    pub type_instances: Vec<TypeInstance>,
}

fn write_instantiation(f: &mut fmt::Formatter<'_>, types: &[TypeInstance]) -> fmt::Result {
    if types.is_empty() {
        return Ok(());
    }
    write!(f, ".<")?;
    write_list(f, types)?;
    write!(f, ">")
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expression::FunctionCall(call) => {
                match call.function.as_ref() {
                    Expression::GenericVariable(_) => write!(f, "{}", call.function)?,
                    other => write!(f, "({})", other)?,
                }
                write!(f, "(")?;
                write_list(f, &call.arguments)?;
                write!(f, ")")
            }
            Expression::Integer(integer) => write!(f, "{}", integer.value),
            Expression::Boolean(boolean) => write!(f, "{}", boolean.value),
            Expression::ElementAccess(access) => {
                write!(f, "{}.{}", access.expression, access.index)
            }
            Expression::GenericVariable(variable) => {
                write!(f, "{}", variable.id)?;
                write_instantiation(f, &variable.type_instances)
            }
            Expression::IfExpression(if_expr) => write!(
                f,
                "if ({}) {} else {}",
                if_expr.condition, if_expr.true_block, if_expr.false_block
            ),
            Expression::MatchExpression(match_expr) => {
                write!(f, "match ({}) {{", match_expr.subject)?;
                write_list(f, &match_expr.blocks)?;
                write!(f, "}}")
            }
            Expression::TupleExpression(tuple) => write_tuple(f, &tuple.expressions),
            Expression::FunctionDefinition(definition) => {
                write!(f, "(")?;
                write_list(f, &definition.parameters)?;
                write!(f, ") -> {} {}", definition.return_type, definition.body)
            }
            Expression::ConstructorCall(constructor_call) => {
                write!(f, "{}", constructor_call.constructor.id)?;
                write_instantiation(f, &constructor_call.constructor.type_instances)?;
                write!(f, "{{")?;
                write_list(f, &constructor_call.arguments)?;
                write!(f, "}}")
            }
        }
    }
}

impl fmt::Display for TypedAssignee {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.assignee.id, self.type_)
    }
}

impl fmt::Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for assignment in &self.assignments {
            write!(f, "{}; ", assignment)?;
        }
        write!(f, "{}}}", self.expression)
    }
}

impl fmt::Display for MatchItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.assignee {
            Some(assignee) => write!(f, "{} {}", self.type_name, assignee.id),
            None => write!(f, "{}", self.type_name),
        }
    }
}

impl fmt::Display for MatchBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, item) in self.matches.iter().enumerate() {
            if i > 0 {
                write!(f, " | ")?;
            }
            write!(f, "{}", item)?;
        }
        write!(f, ": {}", self.block)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operator_calls_display_as_prefix_applications() {
        let expr = Expression::binary(
            "+",
            Expression::int(3),
            Expression::binary("*", Expression::int(4), Expression::int(5)),
        );
        assert_eq!(expr.to_string(), "+(3, *(4, 5))");
    }

    #[test]
    fn test_curried_call_display() {
        let expr = Expression::call(
            Expression::call(Expression::var("foo"), vec![Expression::int(4)]),
            vec![Expression::int(-5), Expression::boolean(true)],
        );
        assert_eq!(expr.to_string(), "(foo(4))(-5, true)");
    }

    #[test]
    fn test_access_and_tuple_display() {
        let pair = Expression::tuple(vec![Expression::var("a"), Expression::var("b")]);
        assert_eq!(Expression::access(pair, 1).to_string(), "(a, b).1");
        assert_eq!(Expression::tuple(vec![Expression::int(3)]).to_string(), "(3,)");
    }

    #[test]
    fn test_block_display() {
        let block = Block::new(vec![], Expression::tuple(vec![]));
        assert_eq!(block.to_string(), "{()}");
    }
}
