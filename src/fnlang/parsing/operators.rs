//! Operator table
//!
//!     Any run of operator characters can be used as an infix or prefix operator, and any
//!     identifier can be used infix when wrapped as `__name__`. This module classifies operator
//!     names: whether they have a valid operator shape, how tightly they bind and how chains of
//!     them associate.
//!
//! Precedence
//!
//!     Ranks are sparse and grouped, and a larger rank binds looser: `*` (4) binds tighter than
//!     `+` (7), and `$` (18) is the loosest named operator. Operators with a valid shape that are
//!     not in the table rank [UNKNOWN_PRECEDENCE], tighter than every named operator. Names that
//!     fail the shape check (for example the `add` in `__add__`) rank [INVALID_PRECEDENCE].
//!
//! Associativity
//!
//!     `$ @ :: ** ++ --` and every malformed name are [Associativity::Left]; the comparison
//!     operators `< <= > >= <=> == !=` are [Associativity::None] and cannot be chained with
//!     themselves; everything else is [Associativity::Right].
//!
//!     Note that the names describe how the resolver treats a repeated operator, not the shape
//!     of the resulting tree: a Right operator takes over as the root of the tree built so far
//!     (`a + b + c` groups as `(a + b) + c`) while a Left operator nests into the right operand
//!     (`a $ b $ c` groups as `a $ (b $ c)`).

use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

/// Rank of operators with a valid shape that are not in the table
pub const UNKNOWN_PRECEDENCE: i32 = -1;

/// Rank of names that are not operators at all
pub const INVALID_PRECEDENCE: i32 = -2;

static OPERATOR_SHAPE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[&!+/\-^$<>@:*|%=.]+$").unwrap());

/// Named operators and their ranks, tightest first
static PRECEDENCE_TABLE: &[(&str, i32)] = &[
    ("@", 2),
    ("**", 3),
    ("*", 4),
    ("/", 5),
    ("%", 6),
    ("+", 7),
    ("-", 7),
    (">>", 8),
    ("<<", 8),
    ("::", 9),
    ("++", 9),
    ("--", 9),
    ("<=>", 10),
    ("<", 11),
    ("<=", 11),
    (">", 11),
    (">=", 11),
    ("==", 11),
    ("!=", 11),
    ("&", 12),
    ("^", 13),
    ("|", 14),
    ("&&", 15),
    ("||", 16),
    ("|>", 17),
    ("$", 18),
];

static LEFT_ASSOCIATIVE: &[&str] = &["$", "@", "::", "**", "++", "--"];

static NON_ASSOCIATIVE: &[&str] = &["<", "<=", ">", ">=", "<=>", "==", "!="];

/// How a chain of operators of the same rank is resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Associativity {
    Left,
    Right,
    None,
}

impl fmt::Display for Associativity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Associativity::Left => write!(f, "left"),
            Associativity::Right => write!(f, "right"),
            Associativity::None => write!(f, "none"),
        }
    }
}

/// Everything the table knows about one operator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperatorInfo {
    pub symbol: String,
    pub precedence: i32,
    pub associativity: Associativity,
}

impl fmt::Display for OperatorInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rank = match self.precedence {
            UNKNOWN_PRECEDENCE => "unlisted".to_string(),
            rank => format!("precedence {:>2}", rank),
        };
        write!(f, "{:<4} {}  {}", self.symbol, rank, self.associativity)
    }
}

/// Whether `token` is made only of operator characters.
pub fn is_valid_operator(token: &str) -> bool {
    OPERATOR_SHAPE.is_match(token)
}

/// Binding rank of `token`; larger binds looser.
pub fn precedence(token: &str) -> i32 {
    if !is_valid_operator(token) {
        return INVALID_PRECEDENCE;
    }
    PRECEDENCE_TABLE
        .iter()
        .find(|(symbol, _)| *symbol == token)
        .map(|(_, rank)| *rank)
        .unwrap_or(UNKNOWN_PRECEDENCE)
}

pub fn associativity(token: &str) -> Associativity {
    if !is_valid_operator(token) || LEFT_ASSOCIATIVE.contains(&token) {
        Associativity::Left
    } else if NON_ASSOCIATIVE.contains(&token) {
        Associativity::None
    } else {
        Associativity::Right
    }
}

/// Full classification of `token`, or `None` when it is not an operator.
pub fn lookup(token: &str) -> Option<OperatorInfo> {
    if !is_valid_operator(token) {
        return None;
    }
    Some(OperatorInfo {
        symbol: token.to_string(),
        precedence: precedence(token),
        associativity: associativity(token),
    })
}

/// The named operators, tightest binding first.
pub fn known_operators() -> impl Iterator<Item = OperatorInfo> {
    PRECEDENCE_TABLE.iter().map(|(symbol, rank)| OperatorInfo {
        symbol: symbol.to_string(),
        precedence: *rank,
        associativity: associativity(symbol),
    })
}
