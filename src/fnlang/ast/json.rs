//! JSON projection of the AST
//!
//!     Downstream consumers (the type checker and code generator) read the AST as JSON. Every
//!     node serializes to an object of its fields, in declaration order, with these rules:
//!
//!         - A field whose type is a sum type (Expression, TypeInstance, Definition) holds the
//!           value wrapped in its variant name: `{"Integer": {"value": 3}}`. The same applies
//!           to the elements of lists of sum types and to `Option<TypeInstance>` when present.
//!         - Fields holding a single concrete node (a Block, an Assignee, ...) are not wrapped,
//!           and neither is an optional concrete node (`MatchItem::assignee`).
//!         - Identifiers are strings, integers and booleans are JSON scalars, absence is `null`
//!           and [AtomicTypeEnum] is its symbolic name (`"INT"`, `"BOOL"`).
//!         - The field `type` is always emitted as `type_`.
//!
//!     Each impl below states, for each field, which of these cases applies. Nothing is decided
//!     at runtime from the value.

use super::definitions::{
    Assignee, Assignment, Definition, EmptyTypeDefinition, GenericTypeVariable,
    OpaqueTypeDefinition, ParametricAssignee, Program, TransparentTypeDefinition, TypeItem,
    UnionTypeDefinition,
};
use super::expressions::{
    Block, Boolean, ConstructorCall, ElementAccess, Expression, FunctionCall, FunctionDefinition,
    GenericConstructor, GenericVariable, IfExpression, Integer, MatchBlock, MatchExpression,
    MatchItem, TupleExpression, TypedAssignee,
};
use super::traits::AstNode;
use super::types::{
    AtomicType, AtomicTypeEnum, FunctionType, GenericType, TupleType, TypeInstance,
};
use serde_json::{json, Map, Value};

/// Serialize a node to its JSON object form (never wrapped).
pub trait ToJson {
    fn to_json(&self) -> Value;
}

/// A sum-typed value wrapped in its variant name
fn tagged<T: AstNode + ToJson>(node: &T) -> Value {
    let mut wrapper = Map::new();
    wrapper.insert(node.node_type().to_string(), node.to_json());
    Value::Object(wrapper)
}

fn tagged_list<T: AstNode + ToJson>(nodes: &[T]) -> Value {
    Value::Array(nodes.iter().map(tagged).collect())
}

fn plain_list<T: ToJson>(nodes: &[T]) -> Value {
    Value::Array(nodes.iter().map(ToJson::to_json).collect())
}

impl ToJson for AtomicTypeEnum {
    fn to_json(&self) -> Value {
        Value::String(self.name().to_string())
    }
}

impl ToJson for AtomicType {
    fn to_json(&self) -> Value {
        json!({ "type_": self.type_.to_json() })
    }
}

impl ToJson for GenericType {
    fn to_json(&self) -> Value {
        json!({
            "id": self.id,
            "type_variables": tagged_list(&self.type_variables),
        })
    }
}

impl ToJson for TupleType {
    fn to_json(&self) -> Value {
        json!({ "types": tagged_list(&self.types) })
    }
}

impl ToJson for FunctionType {
    fn to_json(&self) -> Value {
        json!({
            "argument_types": tagged_list(&self.argument_types),
            "return_type": tagged(self.return_type.as_ref()),
        })
    }
}

impl ToJson for TypeInstance {
    fn to_json(&self) -> Value {
        match self {
            TypeInstance::FunctionType(node) => node.to_json(),
            TypeInstance::GenericType(node) => node.to_json(),
            TypeInstance::TupleType(node) => node.to_json(),
            TypeInstance::AtomicType(node) => node.to_json(),
        }
    }
}

impl ToJson for FunctionCall {
    fn to_json(&self) -> Value {
        json!({
            "function": tagged(self.function.as_ref()),
            "arguments": tagged_list(&self.arguments),
        })
    }
}

impl ToJson for Integer {
    fn to_json(&self) -> Value {
        json!({ "value": self.value })
    }
}

impl ToJson for Boolean {
    fn to_json(&self) -> Value {
        json!({ "value": self.value })
    }
}

impl ToJson for ElementAccess {
    fn to_json(&self) -> Value {
        json!({
            "expression": tagged(self.expression.as_ref()),
            "index": self.index,
        })
    }
}

impl ToJson for GenericVariable {
    fn to_json(&self) -> Value {
        json!({
            "id": self.id,
            "type_instances": tagged_list(&self.type_instances),
        })
    }
}

impl ToJson for IfExpression {
    fn to_json(&self) -> Value {
        json!({
            "condition": tagged(self.condition.as_ref()),
            "true_block": self.true_block.to_json(),
            "false_block": self.false_block.to_json(),
        })
    }
}

impl ToJson for MatchExpression {
    fn to_json(&self) -> Value {
        json!({
            "subject": tagged(self.subject.as_ref()),
            "blocks": plain_list(&self.blocks),
        })
    }
}

impl ToJson for TupleExpression {
    fn to_json(&self) -> Value {
        json!({ "expressions": tagged_list(&self.expressions) })
    }
}

impl ToJson for FunctionDefinition {
    fn to_json(&self) -> Value {
        json!({
            "parameters": plain_list(&self.parameters),
            "return_type": tagged(&self.return_type),
            "body": self.body.to_json(),
        })
    }
}

impl ToJson for ConstructorCall {
    fn to_json(&self) -> Value {
        json!({
            "constructor": self.constructor.to_json(),
            "arguments": tagged_list(&self.arguments),
        })
    }
}

impl ToJson for Expression {
    fn to_json(&self) -> Value {
        match self {
            Expression::FunctionCall(node) => node.to_json(),
            Expression::Integer(node) => node.to_json(),
            Expression::Boolean(node) => node.to_json(),
            Expression::ElementAccess(node) => node.to_json(),
            Expression::GenericVariable(node) => node.to_json(),
            Expression::IfExpression(node) => node.to_json(),
            Expression::MatchExpression(node) => node.to_json(),
            Expression::TupleExpression(node) => node.to_json(),
            Expression::FunctionDefinition(node) => node.to_json(),
            Expression::ConstructorCall(node) => node.to_json(),
        }
    }
}

impl ToJson for TypedAssignee {
    fn to_json(&self) -> Value {
        json!({
            "assignee": self.assignee.to_json(),
            "type_": tagged(&self.type_),
        })
    }
}

impl ToJson for Block {
    fn to_json(&self) -> Value {
        json!({
            "assignments": plain_list(&self.assignments),
            "expression": tagged(self.expression.as_ref()),
        })
    }
}

impl ToJson for MatchItem {
    fn to_json(&self) -> Value {
        json!({
            "type_name": self.type_name,
            "assignee": self.assignee.as_ref().map(ToJson::to_json),
        })
    }
}

impl ToJson for MatchBlock {
    fn to_json(&self) -> Value {
        json!({
            "matches": plain_list(&self.matches),
            "block": self.block.to_json(),
        })
    }
}

impl ToJson for GenericConstructor {
    fn to_json(&self) -> Value {
        json!({
            "id": self.id,
            "type_instances": tagged_list(&self.type_instances),
        })
    }
}

impl ToJson for Assignee {
    fn to_json(&self) -> Value {
        json!({ "id": self.id })
    }
}

impl ToJson for ParametricAssignee {
    fn to_json(&self) -> Value {
        json!({
            "assignee": self.assignee.to_json(),
            "generic_variables": self.generic_variables,
        })
    }
}

impl ToJson for Assignment {
    fn to_json(&self) -> Value {
        json!({
            "assignee": self.assignee.to_json(),
            "expression": tagged(&self.expression),
        })
    }
}

impl ToJson for GenericTypeVariable {
    fn to_json(&self) -> Value {
        json!({
            "id": self.id,
            "generic_variables": self.generic_variables,
        })
    }
}

impl ToJson for TypeItem {
    fn to_json(&self) -> Value {
        json!({
            "id": self.id,
            "type_": self.type_.as_ref().map(tagged),
        })
    }
}

impl ToJson for UnionTypeDefinition {
    fn to_json(&self) -> Value {
        json!({
            "variable": self.variable.to_json(),
            "items": plain_list(&self.items),
        })
    }
}

impl ToJson for OpaqueTypeDefinition {
    fn to_json(&self) -> Value {
        json!({
            "variable": self.variable.to_json(),
            "type_": tagged(&self.type_),
        })
    }
}

impl ToJson for EmptyTypeDefinition {
    fn to_json(&self) -> Value {
        json!({ "id": self.id })
    }
}

impl ToJson for TransparentTypeDefinition {
    fn to_json(&self) -> Value {
        json!({
            "variable": self.variable.to_json(),
            "type_": tagged(&self.type_),
        })
    }
}

impl ToJson for Definition {
    fn to_json(&self) -> Value {
        match self {
            Definition::UnionTypeDefinition(node) => node.to_json(),
            Definition::OpaqueTypeDefinition(node) => node.to_json(),
            Definition::EmptyTypeDefinition(node) => node.to_json(),
            Definition::TransparentTypeDefinition(node) => node.to_json(),
            Definition::Assignment(node) => node.to_json(),
        }
    }
}

impl ToJson for Program {
    fn to_json(&self) -> Value {
        json!({ "definitions": tagged_list(&self.definitions) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_atomic_types() {
        assert_eq!(AtomicTypeEnum::Int.to_json(), json!("INT"));
        assert_eq!(TypeInstance::bool().to_json(), json!({"type_": "BOOL"}));
    }

    #[test]
    fn test_list_elements_are_tagged() {
        let tuple = TypeInstance::tuple(vec![TypeInstance::int(), TypeInstance::tuple(vec![])]);
        assert_eq!(
            tuple.to_json(),
            json!({
                "types": [
                    {"AtomicType": {"type_": "INT"}},
                    {"TupleType": {"types": []}},
                ]
            })
        );
    }

    #[test]
    fn test_function_type() {
        let function = TypeInstance::function(vec![TypeInstance::int()], TypeInstance::int());
        assert_eq!(
            function.to_json(),
            json!({
                "argument_types": [{"AtomicType": {"type_": "INT"}}],
                "return_type": {"AtomicType": {"type_": "INT"}},
            })
        );
    }

    #[test]
    fn test_optional_type_is_tagged_when_present() {
        let some = TypeItem {
            id: "Some".to_string(),
            type_: Some(TypeInstance::typename("T")),
        };
        let none = TypeItem {
            id: "None".to_string(),
            type_: None,
        };
        assert_eq!(
            some.to_json(),
            json!({"id": "Some", "type_": {"GenericType": {"id": "T", "type_variables": []}}})
        );
        assert_eq!(none.to_json(), json!({"id": "None", "type_": null}));
    }

    #[test]
    fn test_optional_assignee_is_not_tagged() {
        let item = MatchItem {
            type_name: "Some".to_string(),
            assignee: Some(Assignee::new("x")),
        };
        assert_eq!(item.to_json(), json!({"type_name": "Some", "assignee": {"id": "x"}}));
    }

    #[test]
    fn test_expressions() {
        assert_eq!(Expression::int(-128).to_json(), json!({"value": -128}));
        assert_eq!(Expression::boolean(true).to_json(), json!({"value": true}));
        assert_eq!(
            Expression::tuple(vec![Expression::boolean(false), Expression::int(5)]).to_json(),
            json!({"expressions": [{"Boolean": {"value": false}}, {"Integer": {"value": 5}}]})
        );
        assert_eq!(
            Expression::generic_var("map", vec![TypeInstance::int()]).to_json(),
            json!({"id": "map", "type_instances": [{"AtomicType": {"type_": "INT"}}]})
        );
    }

    #[test]
    fn test_definitions() {
        let opaque = Definition::OpaqueTypeDefinition(OpaqueTypeDefinition {
            variable: GenericTypeVariable::new("Pair", vec!["T".to_string(), "U".to_string()]),
            type_: TypeInstance::tuple(vec![
                TypeInstance::typename("T"),
                TypeInstance::typename("U"),
            ]),
        });
        assert_eq!(
            opaque.to_json(),
            json!({
                "variable": {"id": "Pair", "generic_variables": ["T", "U"]},
                "type_": {
                    "TupleType": {
                        "types": [
                            {"GenericType": {"id": "T", "type_variables": []}},
                            {"GenericType": {"id": "U", "type_variables": []}},
                        ]
                    }
                },
            })
        );
        let empty = Definition::EmptyTypeDefinition(EmptyTypeDefinition {
            id: "None".to_string(),
        });
        assert_eq!(empty.to_json(), json!({"id": "None"}));
        let program = Program {
            definitions: vec![empty],
        };
        assert_eq!(
            program.to_json(),
            json!({"definitions": [{"EmptyTypeDefinition": {"id": "None"}}]})
        );
    }

    #[test]
    fn test_fields_keep_declaration_order() {
        let assignment = Assignment::new(ParametricAssignee::new("x", vec![]), Expression::int(0));
        let text = serde_json::to_string(&assignment.to_json()).unwrap();
        assert_eq!(
            text,
            r#"{"assignee":{"assignee":{"id":"x"},"generic_variables":[]},"expression":{"Integer":{"value":0}}}"#
        );
    }
}
