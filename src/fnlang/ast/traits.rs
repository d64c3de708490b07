//! AST traits - common interfaces for AST nodes

/// Common interface for AST nodes that are one alternative of a sum type
///
/// The node type is the variant name used when the node is wrapped by the JSON projection,
/// e.g. `{"FunctionCall": {...}}`.
pub trait AstNode {
    fn node_type(&self) -> &'static str;
}
