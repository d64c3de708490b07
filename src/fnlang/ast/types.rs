//! Type instances
//!
//! Types are recorded exactly as written and never checked. A bare name such as `T` or `foo` is
//! a [GenericType] with no type variables.

use super::traits::AstNode;
use std::fmt;

/// Identifiers are kept as their source text
pub type Id = String;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AtomicTypeEnum {
    Int,
    Bool,
}

impl AtomicTypeEnum {
    /// Symbolic name used by the JSON projection
    pub fn name(&self) -> &'static str {
        match self {
            AtomicTypeEnum::Int => "INT",
            AtomicTypeEnum::Bool => "BOOL",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AtomicType {
    pub type_: AtomicTypeEnum,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenericType {
    pub id: Id,
    pub type_variables: Vec<TypeInstance>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TupleType {
    pub types: Vec<TypeInstance>,
}

/// An n-ary function type; `a -> b` and `(a,) -> b` both have one argument type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionType {
    pub argument_types: Vec<TypeInstance>,
    pub return_type: Box<TypeInstance>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeInstance {
    FunctionType(FunctionType),
    GenericType(GenericType),
    TupleType(TupleType),
    AtomicType(AtomicType),
}

impl TypeInstance {
    pub fn int() -> Self {
        TypeInstance::AtomicType(AtomicType {
            type_: AtomicTypeEnum::Int,
        })
    }

    pub fn bool() -> Self {
        TypeInstance::AtomicType(AtomicType {
            type_: AtomicTypeEnum::Bool,
        })
    }

    /// A plain type name such as `T`
    pub fn typename(id: impl Into<Id>) -> Self {
        Self::generic(id, Vec::new())
    }

    pub fn generic(id: impl Into<Id>, type_variables: Vec<TypeInstance>) -> Self {
        TypeInstance::GenericType(GenericType {
            id: id.into(),
            type_variables,
        })
    }

    pub fn tuple(types: Vec<TypeInstance>) -> Self {
        TypeInstance::TupleType(TupleType { types })
    }

    pub fn function(argument_types: Vec<TypeInstance>, return_type: TypeInstance) -> Self {
        TypeInstance::FunctionType(FunctionType {
            argument_types,
            return_type: Box::new(return_type),
        })
    }
}

impl AstNode for TypeInstance {
    fn node_type(&self) -> &'static str {
        match self {
            TypeInstance::FunctionType(_) => "FunctionType",
            TypeInstance::GenericType(_) => "GenericType",
            TypeInstance::TupleType(_) => "TupleType",
            TypeInstance::AtomicType(_) => "AtomicType",
        }
    }
}

/// Write `items` separated by `", "`, with a trailing comma for a single item.
pub(crate) fn write_tuple<T: fmt::Display>(f: &mut fmt::Formatter<'_>, items: &[T]) -> fmt::Result {
    write!(f, "(")?;
    write_list(f, items)?;
    if items.len() == 1 {
        write!(f, ",")?;
    }
    write!(f, ")")
}

/// Write `items` separated by `", "`.
pub(crate) fn write_list<T: fmt::Display>(f: &mut fmt::Formatter<'_>, items: &[T]) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{}", item)?;
    }
    Ok(())
}

impl fmt::Display for TypeInstance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeInstance::AtomicType(atomic) => match atomic.type_ {
                AtomicTypeEnum::Int => write!(f, "int"),
                AtomicTypeEnum::Bool => write!(f, "bool"),
            },
            TypeInstance::GenericType(generic) => {
                write!(f, "{}", generic.id)?;
                if !generic.type_variables.is_empty() {
                    write!(f, ".<")?;
                    write_list(f, &generic.type_variables)?;
                    write!(f, ">")?;
                }
                Ok(())
            }
            TypeInstance::TupleType(tuple) => write_tuple(f, &tuple.types),
            TypeInstance::FunctionType(function) => {
                write_tuple(f, &function.argument_types)?;
                write!(f, " -> {}", function.return_type)
            }
        }
    }
}
