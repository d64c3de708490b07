//! Definitions and programs
//!
//! A program is a sequence of top-level definitions: type definitions introduced by `typedef`,
//! transparent aliases introduced by `typealias`, and assignments.

use super::expressions::Expression;
use super::traits::AstNode;
use super::types::{write_list, Id, TypeInstance};
use std::fmt;

/// A bound name. Underscore-only names (`_`, `__`, ...) are valid, distinct names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignee {
    pub id: Id,
}

impl Assignee {
    pub fn new(id: impl Into<Id>) -> Self {
        Assignee { id: id.into() }
    }
}

/// A bound name with its generic parameters: `map<T, U>`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParametricAssignee {
    pub assignee: Assignee,
    pub generic_variables: Vec<Id>,
}

impl ParametricAssignee {
    pub fn new(id: impl Into<Id>, generic_variables: Vec<Id>) -> Self {
        ParametricAssignee {
            assignee: Assignee::new(id),
            generic_variables,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    pub assignee: ParametricAssignee,
    pub expression: Expression,
}

impl Assignment {
    pub fn new(assignee: ParametricAssignee, expression: Expression) -> Self {
        Assignment {
            assignee,
            expression,
        }
    }
}

/// Head of a type definition: `Maybe<T>`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenericTypeVariable {
    pub id: Id,
    pub generic_variables: Vec<Id>,
}

impl GenericTypeVariable {
    pub fn new(id: impl Into<Id>, generic_variables: Vec<Id>) -> Self {
        GenericTypeVariable {
            id: id.into(),
            generic_variables,
        }
    }
}

/// One variant of a union, with an optional payload type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeItem {
    pub id: Id,
    pub type_: Option<TypeInstance>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnionTypeDefinition {
    pub variable: GenericTypeVariable,
    pub items: Vec<TypeItem>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpaqueTypeDefinition {
    pub variable: GenericTypeVariable,
    pub type_: TypeInstance,
}

/// A type with no values and no generic parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyTypeDefinition {
    pub id: Id,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransparentTypeDefinition {
    pub variable: GenericTypeVariable,
    pub type_: TypeInstance,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Definition {
    UnionTypeDefinition(UnionTypeDefinition),
    OpaqueTypeDefinition(OpaqueTypeDefinition),
    EmptyTypeDefinition(EmptyTypeDefinition),
    TransparentTypeDefinition(TransparentTypeDefinition),
    Assignment(Assignment),
}

impl AstNode for Definition {
    fn node_type(&self) -> &'static str {
        match self {
            Definition::UnionTypeDefinition(_) => "UnionTypeDefinition",
            Definition::OpaqueTypeDefinition(_) => "OpaqueTypeDefinition",
            Definition::EmptyTypeDefinition(_) => "EmptyTypeDefinition",
            Definition::TransparentTypeDefinition(_) => "TransparentTypeDefinition",
            Definition::Assignment(_) => "Assignment",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Program {
    pub definitions: Vec<Definition>,
}

fn write_generics(f: &mut fmt::Formatter<'_>, generics: &[Id]) -> fmt::Result {
    if generics.is_empty() {
        return Ok(());
    }
    write!(f, "<")?;
    write_list(f, generics)?;
    write!(f, ">")
}

impl fmt::Display for ParametricAssignee {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.assignee.id)?;
        write_generics(f, &self.generic_variables)
    }
}

impl fmt::Display for GenericTypeVariable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id)?;
        write_generics(f, &self.generic_variables)
    }
}

impl fmt::Display for Assignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = {}", self.assignee, self.expression)
    }
}

impl fmt::Display for TypeItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.type_ {
            Some(type_) => write!(f, "{} {}", self.id, type_),
            None => write!(f, "{}", self.id),
        }
    }
}

impl fmt::Display for Definition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Definition::UnionTypeDefinition(union) => {
                write!(f, "typedef {} {{", union.variable)?;
                for (i, item) in union.items.iter().enumerate() {
                    if i > 0 {
                        write!(f, " | ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "}}")
            }
            Definition::OpaqueTypeDefinition(opaque) => {
                write!(f, "typedef {} {}", opaque.variable, opaque.type_)
            }
            Definition::EmptyTypeDefinition(empty) => write!(f, "typedef {}", empty.id),
            Definition::TransparentTypeDefinition(alias) => {
                write!(f, "typealias {} {}", alias.variable, alias.type_)
            }
            Definition::Assignment(assignment) => write!(f, "{}", assignment),
        }
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for definition in &self.definitions {
            writeln!(f, "{};", definition)?;
        }
        Ok(())
    }
}
