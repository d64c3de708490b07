//! Parse tree to AST conversion
//!
//!     The visitor walks the concrete [tree](super::tree) once and builds AST nodes. It owns
//!     every check the grammar cannot express:
//!
//!     - operator chains are regrouped by precedence and associativity (see [infix]);
//!     - integer literals must not have leading zeros and must fit in an `i64`;
//!     - operator identifiers (`__op__`), prefix operators and constructor names are checked
//!       against the operator shape;
//!     - an empty `typedef` cannot take generic parameters.
//!
//!     Any failure aborts the conversion with a [StructureError]; no partial tree is returned.

mod infix;

use std::fmt;
use std::ops::Range;

use super::operators::is_valid_operator;
use super::tree::{
    AssignmentTree, BlockTree, DefinitionTree, ExprTree, MatchBlockTree, NameTree, ProgramTree,
    TypeBodyTree, TypeTree, TypeVariableTree, TypedAssigneeTree,
};
use crate::fnlang::ast::{
    Assignee, Assignment, Block, ConstructorCall, Definition, ElementAccess, EmptyTypeDefinition,
    Expression, FunctionDefinition, GenericConstructor, GenericTypeVariable, IfExpression,
    MatchBlock, MatchExpression, MatchItem, OpaqueTypeDefinition, ParametricAssignee, Program,
    TransparentTypeDefinition, TypeInstance, TypeItem, TypedAssignee, UnionTypeDefinition,
};

/// A tree that parsed but does not form a valid AST
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StructureError {
    /// `a == b == c`, or two different comparisons of the same rank: `a < b == c`
    NonAssociativeChain {
        operator: String,
        previous: String,
        span: Range<usize>,
    },
    InvalidPrefixOperator {
        operator: String,
        span: Range<usize>,
    },
    /// `__op__` whose inner text is not an operator
    InvalidOperatorId { operator: String },
    InvalidConstructorName { id: String },
    /// `typedef None<T>`
    GenericEmptyType { id: String },
    LeadingZero {
        literal: String,
        span: Range<usize>,
    },
    IntegerOverflow {
        literal: String,
        span: Range<usize>,
    },
    /// An underscore-only name used as a value
    InvalidVariable { id: String },
}

impl fmt::Display for StructureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StructureError::NonAssociativeChain {
                operator,
                previous,
                span,
            } => write!(
                f,
                "operator `{}` at {}..{} cannot be chained with `{}` without parentheses",
                operator, span.start, span.end, previous
            ),
            StructureError::InvalidPrefixOperator { operator, span } => write!(
                f,
                "`{}` at {}..{} cannot be used as a prefix operator",
                operator, span.start, span.end
            ),
            StructureError::InvalidOperatorId { operator } => {
                write!(f, "`__{}__` does not name an operator", operator)
            }
            StructureError::InvalidConstructorName { id } => {
                write!(f, "`{}` cannot be used as a constructor name", id)
            }
            StructureError::GenericEmptyType { id } => {
                write!(f, "empty type `{}` cannot have generic parameters", id)
            }
            StructureError::LeadingZero { literal, span } => write!(
                f,
                "integer literal `{}` at {}..{} has a leading zero",
                literal, span.start, span.end
            ),
            StructureError::IntegerOverflow { literal, span } => write!(
                f,
                "integer literal `{}` at {}..{} does not fit in 64 bits",
                literal, span.start, span.end
            ),
            StructureError::InvalidVariable { id } => {
                write!(f, "`{}` can be assigned to but not read", id)
            }
        }
    }
}

impl std::error::Error for StructureError {}

pub(crate) fn visit_program(tree: ProgramTree) -> Result<Program, StructureError> {
    let definitions = tree
        .definitions
        .into_iter()
        .map(visit_definition)
        .collect::<Result<_, _>>()?;
    Ok(Program { definitions })
}

pub(crate) fn visit_definition(tree: DefinitionTree) -> Result<Definition, StructureError> {
    match tree {
        DefinitionTree::TypeDef { head, body } => match body {
            TypeBodyTree::Opaque(type_) => {
                Ok(Definition::OpaqueTypeDefinition(OpaqueTypeDefinition {
                    variable: visit_type_variable(head),
                    type_: visit_type(type_),
                }))
            }
            TypeBodyTree::Union(items) => Ok(Definition::UnionTypeDefinition(UnionTypeDefinition {
                variable: visit_type_variable(head),
                items: items
                    .into_iter()
                    .map(|item| TypeItem {
                        id: item.id,
                        type_: item.type_.map(visit_type),
                    })
                    .collect(),
            })),
            TypeBodyTree::Empty => {
                if !head.generics.is_empty() {
                    return Err(StructureError::GenericEmptyType { id: head.id });
                }
                Ok(Definition::EmptyTypeDefinition(EmptyTypeDefinition { id: head.id }))
            }
        },
        DefinitionTree::TypeAlias { head, type_ } => Ok(Definition::TransparentTypeDefinition(
            TransparentTypeDefinition {
                variable: visit_type_variable(head),
                type_: visit_type(type_),
            },
        )),
        DefinitionTree::Assignment(assignment) => {
            Ok(Definition::Assignment(visit_assignment(assignment)?))
        }
    }
}

fn visit_type_variable(tree: TypeVariableTree) -> GenericTypeVariable {
    GenericTypeVariable::new(tree.id, tree.generics)
}

pub(crate) fn visit_assignment(tree: AssignmentTree) -> Result<Assignment, StructureError> {
    let assignee = visit_assignee(tree.assignee.name)?;
    Ok(Assignment::new(
        ParametricAssignee {
            assignee,
            generic_variables: tree.assignee.generics,
        },
        visit_expression(tree.expression)?,
    ))
}

/// Bound names: identifiers and `__wrapped__` names are kept verbatim, `__op__` binds `op`.
fn visit_assignee(name: NameTree) -> Result<Assignee, StructureError> {
    match name {
        NameTree::Ident(id) | NameTree::Wrapped(id) => Ok(Assignee::new(id)),
        NameTree::OperatorId(operator) => Ok(Assignee::new(operator_id(operator)?)),
    }
}

fn operator_id(operator: String) -> Result<String, StructureError> {
    if operator != "=" && is_valid_operator(&operator) {
        Ok(operator)
    } else {
        Err(StructureError::InvalidOperatorId { operator })
    }
}

fn is_discard(id: &str) -> bool {
    id.chars().all(|c| c == '_')
}

pub(crate) fn visit_block(tree: BlockTree) -> Result<Block, StructureError> {
    let assignments = tree
        .assignments
        .into_iter()
        .map(visit_assignment)
        .collect::<Result<_, _>>()?;
    Ok(Block::new(assignments, visit_expression(*tree.expression)?))
}

pub(crate) fn visit_type(tree: TypeTree) -> TypeInstance {
    match tree {
        TypeTree::Int => TypeInstance::int(),
        TypeTree::Bool => TypeInstance::bool(),
        TypeTree::Named { id, arguments } => {
            TypeInstance::generic(id, arguments.into_iter().map(visit_type).collect())
        }
        TypeTree::Parenthesized(inner) => visit_type(*inner),
        TypeTree::Tuple(types) => TypeInstance::tuple(types.into_iter().map(visit_type).collect()),
        TypeTree::Function { head, tail } => {
            // A tuple head spells out the argument list
            let argument_types = match visit_type(*head) {
                TypeInstance::TupleType(tuple) => tuple.types,
                other => vec![other],
            };
            TypeInstance::function(argument_types, visit_type(*tail))
        }
    }
}

fn visit_types(trees: Vec<TypeTree>) -> Vec<TypeInstance> {
    trees.into_iter().map(visit_type).collect()
}

fn visit_expressions(trees: Vec<ExprTree>) -> Result<Vec<Expression>, StructureError> {
    trees.into_iter().map(visit_expression).collect()
}

fn visit_typed_assignee(tree: TypedAssigneeTree) -> Result<TypedAssignee, StructureError> {
    Ok(TypedAssignee {
        assignee: visit_assignee(tree.name)?,
        type_: visit_type(tree.type_),
    })
}

fn visit_match_block(tree: MatchBlockTree) -> Result<MatchBlock, StructureError> {
    let matches = tree
        .items
        .into_iter()
        .map(|item| {
            Ok(MatchItem {
                type_name: item.type_name,
                assignee: item.binding.map(visit_assignee).transpose()?,
            })
        })
        .collect::<Result<_, StructureError>>()?;
    Ok(MatchBlock {
        matches,
        block: visit_block(tree.block)?,
    })
}

fn has_leading_zero(digits: &str) -> bool {
    digits.len() > 1 && digits.starts_with('0')
}

fn visit_integer(
    digits: String,
    negative: bool,
    span: Range<usize>,
) -> Result<Expression, StructureError> {
    let literal = if negative {
        format!("-{}", digits)
    } else {
        digits.clone()
    };
    if has_leading_zero(&digits) {
        return Err(StructureError::LeadingZero { literal, span });
    }
    match literal.parse::<i64>() {
        Ok(value) => Ok(Expression::int(value)),
        Err(_) => Err(StructureError::IntegerOverflow { literal, span }),
    }
}

fn visit_index(digits: String, span: Range<usize>) -> Result<usize, StructureError> {
    if has_leading_zero(&digits) {
        return Err(StructureError::LeadingZero {
            literal: digits,
            span,
        });
    }
    digits
        .parse::<usize>()
        .map_err(|_| StructureError::IntegerOverflow {
            literal: digits,
            span,
        })
}

fn visit_variable(name: NameTree, generics: Vec<TypeTree>) -> Result<Expression, StructureError> {
    let id = match name {
        NameTree::Ident(id) | NameTree::Wrapped(id) if is_discard(&id) => {
            return Err(StructureError::InvalidVariable { id });
        }
        NameTree::Ident(id) | NameTree::Wrapped(id) => id,
        NameTree::OperatorId(operator) => operator_id(operator)?,
    };
    Ok(Expression::generic_var(id, visit_types(generics)))
}

pub(crate) fn visit_expression(tree: ExprTree) -> Result<Expression, StructureError> {
    match tree {
        ExprTree::Integer {
            digits,
            negative,
            span,
        } => visit_integer(digits, negative, span),
        ExprTree::Boolean(value) => Ok(Expression::boolean(value)),
        ExprTree::Variable { name, generics } => visit_variable(name, generics),
        ExprTree::Parenthesized(inner) => visit_expression(*inner),
        ExprTree::Tuple(expressions) => Ok(Expression::tuple(visit_expressions(expressions)?)),
        ExprTree::Call {
            function,
            arguments,
        } => Ok(Expression::call(
            visit_expression(*function)?,
            visit_expressions(arguments)?,
        )),
        ExprTree::Access {
            expression,
            index,
            span,
        } => {
            let index = visit_index(index, span)?;
            Ok(Expression::ElementAccess(ElementAccess {
                expression: Box::new(visit_expression(*expression)?),
                index,
            }))
        }
        ExprTree::If {
            condition,
            true_block,
            false_block,
        } => Ok(Expression::IfExpression(IfExpression {
            condition: Box::new(visit_expression(*condition)?),
            true_block: visit_block(true_block)?,
            false_block: visit_block(false_block)?,
        })),
        ExprTree::Match { subject, blocks } => Ok(Expression::MatchExpression(MatchExpression {
            subject: Box::new(visit_expression(*subject)?),
            blocks: blocks
                .into_iter()
                .map(visit_match_block)
                .collect::<Result<_, _>>()?,
        })),
        ExprTree::FunctionDefinition {
            parameters,
            return_type,
            body,
        } => Ok(Expression::FunctionDefinition(FunctionDefinition {
            parameters: parameters
                .into_iter()
                .map(visit_typed_assignee)
                .collect::<Result<_, _>>()?,
            return_type: visit_type(return_type),
            body: visit_block(body)?,
        })),
        ExprTree::Constructor {
            name,
            generics,
            arguments,
        } => {
            let id = match name {
                NameTree::Ident(id) | NameTree::Wrapped(id) if !is_valid_operator(&id) => id,
                other => {
                    return Err(StructureError::InvalidConstructorName {
                        id: other.text().to_string(),
                    })
                }
            };
            Ok(Expression::ConstructorCall(ConstructorCall {
                constructor: GenericConstructor {
                    id,
                    type_instances: visit_types(generics),
                },
                arguments: visit_expressions(arguments)?,
            }))
        }
        ExprTree::Infix {
            left,
            operator,
            right,
        } => infix::resolve(*left, operator, *right),
        ExprTree::Prefix { operator, operand } => {
            let name = operator.name();
            if !is_valid_operator(name) {
                return Err(StructureError::InvalidPrefixOperator {
                    operator: operator.text.clone(),
                    span: operator.span.clone(),
                });
            }
            Ok(Expression::call(
                Expression::var(name),
                vec![visit_expression(*operand)?],
            ))
        }
    }
}
