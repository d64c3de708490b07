//! AST for fnlang
//!
//!     The AST is purely syntactic: it records programs, definitions, expressions and type
//!     annotations exactly as written, without checking them. Nodes are built once by the
//!     parse-tree visitor and never mutated; children are owned by their parent (`Box`/`Vec`),
//!     so the tree has no sharing and no cycles.
//!
//!     Three families are closed sum types: [TypeInstance], [Expression] and [Definition].
//!     Everything else is a plain record.
//!
//!     All nodes implement `Display` with a compact rendering (`+(3, *(4, 5))`) used for
//!     debugging and CLI tree output, and [ToJson] for the JSON projection consumed downstream.

pub mod definitions;
pub mod expressions;
pub mod json;
pub mod traits;
pub mod types;

pub use definitions::{
    Assignee, Assignment, Definition, EmptyTypeDefinition, GenericTypeVariable,
    OpaqueTypeDefinition, ParametricAssignee, Program, TransparentTypeDefinition, TypeItem,
    UnionTypeDefinition,
};
pub use expressions::{
    Block, Boolean, ConstructorCall, ElementAccess, Expression, FunctionCall, FunctionDefinition,
    GenericConstructor, GenericVariable, IfExpression, Integer, MatchBlock, MatchExpression,
    MatchItem, TupleExpression, TypedAssignee,
};
pub use json::ToJson;
pub use traits::AstNode;
pub use types::{
    AtomicType, AtomicTypeEnum, FunctionType, GenericType, Id, TupleType, TypeInstance,
};
