//! Concrete parse tree produced by the grammar
//!
//! These structures mirror the surface syntax: they keep parentheses, unresolved infix chains
//! and literal digit strings, plus the byte ranges the visitor needs for error reporting.
//! They are converted to AST nodes by the [visitor](super::visitor) after parsing completes.
//!
//! Infix chains are always right-nested: `a + b * c - d` is
//! `Infix(a, +, Infix(b, *, Infix(c, -, d)))`. Grouping by precedence happens in the visitor.

use std::ops::Range;

/// A name as it was written
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum NameTree {
    /// Plain identifier, including the underscore-only family
    Ident(String),
    /// `__name__`, kept with its underscores
    Wrapped(String),
    /// `__op__`, holding only the inner operator
    OperatorId(String),
}

impl NameTree {
    pub(crate) fn text(&self) -> &str {
        match self {
            NameTree::Ident(name) | NameTree::Wrapped(name) | NameTree::OperatorId(name) => name,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum TypeTree {
    Int,
    Bool,
    Named {
        id: String,
        arguments: Vec<TypeTree>,
    },
    /// `(T)`
    Parenthesized(Box<TypeTree>),
    /// `()`, `(T,)`, `(T, U)`
    Tuple(Vec<TypeTree>),
    /// `head -> tail`, right-nested
    Function {
        head: Box<TypeTree>,
        tail: Box<TypeTree>,
    },
}

/// An operator in infix or prefix position
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct OperatorTree {
    pub(crate) text: String,
    /// Written as `__name__`
    pub(crate) wrapped: bool,
    pub(crate) span: Range<usize>,
}

impl OperatorTree {
    pub(crate) fn symbol(text: impl Into<String>, span: Range<usize>) -> Self {
        OperatorTree {
            text: text.into(),
            wrapped: false,
            span,
        }
    }

    pub(crate) fn wrapped(text: impl Into<String>, span: Range<usize>) -> Self {
        OperatorTree {
            text: text.into(),
            wrapped: true,
            span,
        }
    }

    /// The name the operator is applied by: `__add__` is `add`, `+` is `+`.
    pub(crate) fn name(&self) -> &str {
        if self.wrapped && self.text.len() >= 4 {
            &self.text[2..self.text.len() - 2]
        } else {
            &self.text
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum ExprTree {
    Integer {
        digits: String,
        negative: bool,
        span: Range<usize>,
    },
    Boolean(bool),
    Variable {
        name: NameTree,
        generics: Vec<TypeTree>,
    },
    Parenthesized(Box<ExprTree>),
    Tuple(Vec<ExprTree>),
    Call {
        function: Box<ExprTree>,
        arguments: Vec<ExprTree>,
    },
    Access {
        expression: Box<ExprTree>,
        index: String,
        span: Range<usize>,
    },
    If {
        condition: Box<ExprTree>,
        true_block: BlockTree,
        false_block: BlockTree,
    },
    Match {
        subject: Box<ExprTree>,
        blocks: Vec<MatchBlockTree>,
    },
    FunctionDefinition {
        parameters: Vec<TypedAssigneeTree>,
        return_type: TypeTree,
        body: BlockTree,
    },
    Constructor {
        name: NameTree,
        generics: Vec<TypeTree>,
        arguments: Vec<ExprTree>,
    },
    Infix {
        left: Box<ExprTree>,
        operator: OperatorTree,
        right: Box<ExprTree>,
    },
    Prefix {
        operator: OperatorTree,
        operand: Box<ExprTree>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct AssigneeTree {
    pub(crate) name: NameTree,
    pub(crate) generics: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct AssignmentTree {
    pub(crate) assignee: AssigneeTree,
    pub(crate) expression: ExprTree,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct BlockTree {
    pub(crate) assignments: Vec<AssignmentTree>,
    pub(crate) expression: Box<ExprTree>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct TypedAssigneeTree {
    pub(crate) name: NameTree,
    pub(crate) type_: TypeTree,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct MatchItemTree {
    pub(crate) type_name: String,
    pub(crate) binding: Option<NameTree>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct MatchBlockTree {
    pub(crate) items: Vec<MatchItemTree>,
    pub(crate) block: BlockTree,
}

/// `Name<T, U>` at the head of a type definition
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct TypeVariableTree {
    pub(crate) id: String,
    pub(crate) generics: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct TypeItemTree {
    pub(crate) id: String,
    pub(crate) type_: Option<TypeTree>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum TypeBodyTree {
    Opaque(TypeTree),
    Union(Vec<TypeItemTree>),
    Empty,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum DefinitionTree {
    TypeDef {
        head: TypeVariableTree,
        body: TypeBodyTree,
    },
    TypeAlias {
        head: TypeVariableTree,
        type_: TypeTree,
    },
    Assignment(AssignmentTree),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ProgramTree {
    pub(crate) definitions: Vec<DefinitionTree>,
}
