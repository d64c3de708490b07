//! Operator resolution
//!
//!     The grammar hands over an operator chain nested to the right:
//!     `Infix(a, op1, Infix(b, op2, Infix(c, op3, d)))`. This module walks the chain from left
//!     to right and regroups it by precedence, carrying two things along:
//!
//!     - the root: the operator at the top of the tree built so far (initially a sentinel that
//!       ranks below every operator);
//!     - the builder: a stack of calls still waiting for their right operand.
//!
//!     For each `left op` step, `op` either takes over the root (the whole tree built so far,
//!     completed with `left`, becomes its left operand) or nests below the current holes with
//!     `left` as its left operand. The last operand fills every remaining hole.
//!
//!     `op` takes over when it binds looser than the root. On equal rank its own associativity
//!     decides: Right takes over, Left nests and None is an error. This covers an operator
//!     repeated with itself (`a + b + c`, `a $ b $ c`, `a == b == c`) and distinct operators
//!     sharing a rank (`a + b - c`, `a :: b ++ c`, `a < b == c`).
//!
//!     The walk is a loop over the chain and the builder is an explicit stack, so long chains
//!     need no recursion.

use super::{visit_expression, StructureError};
use crate::fnlang::ast::Expression;
use crate::fnlang::parsing::operators::{
    associativity, precedence, Associativity, INVALID_PRECEDENCE,
};
use crate::fnlang::parsing::tree::{ExprTree, OperatorTree};

enum Root {
    Sentinel,
    Operator(String),
}

impl Root {
    fn precedence(&self) -> i32 {
        match self {
            Root::Sentinel => INVALID_PRECEDENCE,
            Root::Operator(operator) => precedence(operator),
        }
    }

    fn name(&self) -> &str {
        match self {
            Root::Sentinel => "",
            Root::Operator(operator) => operator,
        }
    }
}

/// `operator(left, _)`
struct Hole {
    operator: String,
    left: Expression,
}

/// Calls waiting for their right operand, outermost first
#[derive(Default)]
struct Builder {
    holes: Vec<Hole>,
}

impl Builder {
    /// `x ↦ builder(operator(left, x))`
    fn nest(&mut self, operator: String, left: Expression) {
        self.holes.push(Hole { operator, left });
    }

    /// `x ↦ operator(builder(left), x)`
    fn take_over(&mut self, operator: String, left: Expression) {
        let left = std::mem::take(self).fill(left);
        self.holes.push(Hole { operator, left });
    }

    fn fill(self, operand: Expression) -> Expression {
        self.holes
            .into_iter()
            .rev()
            .fold(operand, |right, hole| {
                Expression::binary(hole.operator, hole.left, right)
            })
    }
}

enum Step {
    TakeOver,
    Nest,
}

fn step(root: &Root, operator: &OperatorTree) -> Result<Step, StructureError> {
    let name = operator.name();
    let (root_rank, rank) = (root.precedence(), precedence(name));
    if root_rank < rank {
        return Ok(Step::TakeOver);
    }
    if root_rank > rank {
        return Ok(Step::Nest);
    }
    match associativity(name) {
        Associativity::Right => Ok(Step::TakeOver),
        Associativity::Left => Ok(Step::Nest),
        Associativity::None => Err(StructureError::NonAssociativeChain {
            operator: name.to_string(),
            previous: root.name().to_string(),
            span: operator.span.clone(),
        }),
    }
}

/// Resolve the chain `left operator right`, where `right` may continue the chain.
pub(super) fn resolve(
    left: ExprTree,
    operator: OperatorTree,
    right: ExprTree,
) -> Result<Expression, StructureError> {
    let mut root = Root::Sentinel;
    let mut builder = Builder::default();
    let (mut left, mut operator, mut right) = (left, operator, right);

    loop {
        let operand = visit_expression(left)?;
        let name = operator.name().to_string();
        match step(&root, &operator)? {
            Step::TakeOver => {
                builder.take_over(name.clone(), operand);
                root = Root::Operator(name);
            }
            Step::Nest => builder.nest(name, operand),
        }

        match right {
            ExprTree::Infix {
                left: next_left,
                operator: next_operator,
                right: next_right,
            } => {
                left = *next_left;
                operator = next_operator;
                right = *next_right;
            }
            last => return Ok(builder.fill(visit_expression(last)?)),
        }
    }
}
