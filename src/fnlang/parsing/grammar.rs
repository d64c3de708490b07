//! Grammar
//!
//!     chumsky parsers over the lexed token stream, one entry point per target rule. They build
//!     the concrete [tree](super::tree) and never look at operator precedence: an expression is
//!     parsed as a flat chain `operand (operator operand)*` folded to the right, and the visitor
//!     regroups it.
//!
//!     None of the entry points require end of input; the [parser](super::parser) appends
//!     `end()` so that leftover tokens are a syntax error.
//!
//! Ambiguities
//!
//!     - `(` starts a function definition, a tuple or a parenthesized expression. The function
//!       definition is tried first; it fails within a token or two unless the parameter list is
//!       really there.
//!     - `-` directly followed by an integer (no gap between them) at the start of an operand is
//!       a negative literal. With a gap it is a prefix operator.
//!     - A name followed by `{` is a constructor call.

use chumsky::prelude::*;
use std::ops::Range;

use super::tree::{
    AssigneeTree, AssignmentTree, BlockTree, DefinitionTree, ExprTree, MatchBlockTree,
    MatchItemTree, NameTree, OperatorTree, ProgramTree, TypeBodyTree, TypeItemTree, TypeTree,
    TypeVariableTree, TypedAssigneeTree,
};
use crate::fnlang::lexing::TokenSpan;
use crate::fnlang::token::Token;

/// Type alias for parser error
pub(crate) type ParserError = Simple<TokenSpan>;

/// Helper: match a specific token type, ignoring its span
pub(crate) fn token(t: Token) -> impl Parser<TokenSpan, (), Error = ParserError> + Clone {
    filter(move |(tok, _): &TokenSpan| tok == &t).ignored()
}

/// Helper: match a token carrying data and extract it
fn select_token<T>(
    expected: &'static str,
    extract: impl Fn(&Token, &Range<usize>) -> Option<T> + Clone,
) -> impl Parser<TokenSpan, T, Error = ParserError> + Clone {
    filter_map(move |span, (token, range): TokenSpan| {
        extract(&token, &range).ok_or_else(|| {
            Simple::custom(span, format!("expected {}, found `{}`", expected, token))
        })
    })
}

fn ident() -> impl Parser<TokenSpan, String, Error = ParserError> + Clone {
    select_token("identifier", |token, _| match token {
        Token::Ident(name) => Some(name.clone()),
        _ => None,
    })
}

/// Identifier or `__wrapped__` identifier
fn name() -> impl Parser<TokenSpan, NameTree, Error = ParserError> + Clone {
    select_token("name", |token, _| match token {
        Token::Ident(name) => Some(NameTree::Ident(name.clone())),
        Token::WrappedId(name) => Some(NameTree::Wrapped(name.clone())),
        _ => None,
    })
}

fn operator_id() -> impl Parser<TokenSpan, String, Error = ParserError> + Clone {
    select_token("operator identifier", |token, _| match token {
        Token::OperatorId(operator) => Some(operator.clone()),
        _ => None,
    })
}

fn integer() -> impl Parser<TokenSpan, (String, Range<usize>), Error = ParserError> + Clone {
    select_token("integer", |token, range| match token {
        Token::Integer(digits) => Some((digits.clone(), range.clone())),
        _ => None,
    })
}

fn minus() -> impl Parser<TokenSpan, Range<usize>, Error = ParserError> + Clone {
    select_token("`-`", |token, range| match token {
        Token::Operator(operator) if operator == "-" => Some(range.clone()),
        _ => None,
    })
}

/// Anything that can sit between two operands
fn infix_operator() -> impl Parser<TokenSpan, OperatorTree, Error = ParserError> + Clone {
    select_token("operator", |token, range| {
        let span = range.clone();
        match token {
            Token::Operator(operator) => Some(OperatorTree::symbol(operator.clone(), span)),
            Token::Lt => Some(OperatorTree::symbol("<", span)),
            Token::Gt => Some(OperatorTree::symbol(">", span)),
            Token::Pipe => Some(OperatorTree::symbol("|", span)),
            Token::Colon => Some(OperatorTree::symbol(":", span)),
            Token::WrappedId(name) => Some(OperatorTree::wrapped(name.clone(), span)),
            _ => None,
        }
    })
}

/// Generic parameter names in angle brackets: `<T, U>`, or the empty `<>`
fn generic_parameters() -> impl Parser<TokenSpan, Vec<String>, Error = ParserError> + Clone {
    let empty = select_token("`<>`", |token, _| {
        matches!(token, Token::Operator(operator) if operator == "<>").then(Vec::new)
    });
    choice((
        ident()
            .separated_by(token(Token::Comma))
            .allow_trailing()
            .delimited_by(token(Token::Lt), token(Token::Gt)),
        empty,
    ))
}

/// Right-fold `a -> b -> c` into `a -> (b -> c)`
fn fold_function_type(first: TypeTree, rest: Vec<TypeTree>) -> TypeTree {
    let mut heads = rest;
    let Some(mut tail) = heads.pop() else {
        return first;
    };
    while let Some(head) = heads.pop() {
        tail = TypeTree::Function {
            head: Box::new(head),
            tail: Box::new(tail),
        };
    }
    TypeTree::Function {
        head: Box::new(first),
        tail: Box::new(tail),
    }
}

pub(crate) fn type_instance() -> impl Parser<TokenSpan, TypeTree, Error = ParserError> + Clone {
    recursive(|type_instance| {
        let type_list = type_instance
            .clone()
            .separated_by(token(Token::Comma))
            .allow_trailing();

        let generic_arguments = type_list
            .clone()
            .at_least(1)
            .delimited_by(token(Token::GenericOpen), token(Token::Gt));

        let named = ident()
            .then(generic_arguments.or_not())
            .map(|(id, arguments)| TypeTree::Named {
                id,
                arguments: arguments.unwrap_or_default(),
            });

        let parenthesized = token(Token::LParen).ignore_then(choice((
            token(Token::RParen).to(TypeTree::Tuple(Vec::new())),
            type_instance
                .clone()
                .then(token(Token::Comma).ignore_then(type_list).or_not())
                .then_ignore(token(Token::RParen))
                .map(|(first, rest)| match rest {
                    None => TypeTree::Parenthesized(Box::new(first)),
                    Some(rest) => TypeTree::Tuple(std::iter::once(first).chain(rest).collect()),
                }),
        )));

        let head = choice((
            token(Token::Int).to(TypeTree::Int),
            token(Token::Bool).to(TypeTree::Bool),
            named,
            parenthesized,
        ))
        .boxed();

        head.clone()
            .then(token(Token::Arrow).ignore_then(head).repeated())
            .map(|(first, rest)| fold_function_type(first, rest))
    })
}

fn assignee() -> impl Parser<TokenSpan, AssigneeTree, Error = ParserError> + Clone {
    choice((
        operator_id().map(|operator| AssigneeTree {
            name: NameTree::OperatorId(operator),
            generics: Vec::new(),
        }),
        name()
            .then(generic_parameters().or_not())
            .map(|(name, generics)| AssigneeTree {
                name,
                generics: generics.unwrap_or_default(),
            }),
    ))
}

fn typed_assignee() -> impl Parser<TokenSpan, TypedAssigneeTree, Error = ParserError> + Clone {
    name()
        .then_ignore(token(Token::Colon))
        .then(type_instance())
        .map(|(name, type_)| TypedAssigneeTree { name, type_ })
}

fn type_variable() -> impl Parser<TokenSpan, TypeVariableTree, Error = ParserError> + Clone {
    ident()
        .then(generic_parameters().or_not())
        .map(|(id, generics)| TypeVariableTree {
            id,
            generics: generics.unwrap_or_default(),
        })
}

fn assignment_with<P>(
    expression: P,
) -> impl Parser<TokenSpan, AssignmentTree, Error = ParserError> + Clone
where
    P: Parser<TokenSpan, ExprTree, Error = ParserError> + Clone,
{
    assignee()
        .then_ignore(token(Token::Assign))
        .then(expression)
        .map(|(assignee, expression)| AssignmentTree {
            assignee,
            expression,
        })
}

fn block_with<P>(expression: P) -> impl Parser<TokenSpan, BlockTree, Error = ParserError> + Clone
where
    P: Parser<TokenSpan, ExprTree, Error = ParserError> + Clone,
{
    assignment_with(expression.clone())
        .then_ignore(token(Token::Semicolon))
        .repeated()
        .then(expression)
        .delimited_by(token(Token::LBrace), token(Token::RBrace))
        .map(|(assignments, expression)| BlockTree {
            assignments,
            expression: Box::new(expression),
        })
}

/// Right-fold `a op1 b op2 c` into `Infix(a, op1, Infix(b, op2, c))`
fn fold_infix(first: ExprTree, rest: Vec<(OperatorTree, ExprTree)>) -> ExprTree {
    let mut lefts = Vec::with_capacity(rest.len());
    let mut operators = Vec::with_capacity(rest.len());
    let mut current = first;
    for (operator, operand) in rest {
        lefts.push(std::mem::replace(&mut current, operand));
        operators.push(operator);
    }
    for (left, operator) in lefts.into_iter().zip(operators).rev() {
        current = ExprTree::Infix {
            left: Box::new(left),
            operator,
            right: Box::new(current),
        };
    }
    current
}

enum Postfix {
    Call(Vec<ExprTree>),
    Access(String, Range<usize>),
}

fn apply_postfix(expression: ExprTree, postfix: Postfix) -> ExprTree {
    match postfix {
        Postfix::Call(arguments) => ExprTree::Call {
            function: Box::new(expression),
            arguments,
        },
        Postfix::Access(index, span) => ExprTree::Access {
            expression: Box::new(expression),
            index,
            span,
        },
    }
}

pub(crate) fn expression() -> impl Parser<TokenSpan, ExprTree, Error = ParserError> + Clone {
    recursive(|expression| {
        let block = block_with(expression.clone()).boxed();

        let arguments = expression
            .clone()
            .separated_by(token(Token::Comma))
            .allow_trailing();

        let braced_arguments = arguments
            .clone()
            .delimited_by(token(Token::LBrace), token(Token::RBrace));

        let generic_arguments = type_instance()
            .separated_by(token(Token::Comma))
            .allow_trailing()
            .at_least(1)
            .delimited_by(token(Token::GenericOpen), token(Token::Gt));

        let integer_literal = integer().map(|(digits, span)| ExprTree::Integer {
            digits,
            negative: false,
            span,
        });

        let negative_literal = minus()
            .then(integer())
            .try_map(|(minus, (digits, span)), at| {
                if minus.end == span.start {
                    Ok(ExprTree::Integer {
                        digits,
                        negative: true,
                        span: minus.start..span.end,
                    })
                } else {
                    Err(Simple::custom(at, "`-` is not attached to the literal"))
                }
            });

        let boolean = choice((
            token(Token::True).to(ExprTree::Boolean(true)),
            token(Token::False).to(ExprTree::Boolean(false)),
        ));

        let parenthesized_subject = expression
            .clone()
            .delimited_by(token(Token::LParen), token(Token::RParen));

        let if_expression = token(Token::If)
            .ignore_then(parenthesized_subject.clone())
            .then(block.clone())
            .then_ignore(token(Token::Else))
            .then(block.clone())
            .map(|((condition, true_block), false_block)| ExprTree::If {
                condition: Box::new(condition),
                true_block,
                false_block,
            });

        let match_item = ident()
            .then(name().or_not())
            .map(|(type_name, binding)| MatchItemTree { type_name, binding });

        let match_block = match_item
            .separated_by(token(Token::Pipe))
            .at_least(1)
            .then_ignore(token(Token::Colon))
            .then(block.clone())
            .map(|(items, block)| MatchBlockTree { items, block });

        let match_expression = token(Token::Match)
            .ignore_then(parenthesized_subject)
            .then(
                match_block
                    .separated_by(token(Token::Comma))
                    .allow_trailing()
                    .at_least(1)
                    .delimited_by(token(Token::LBrace), token(Token::RBrace)),
            )
            .map(|(subject, blocks)| ExprTree::Match {
                subject: Box::new(subject),
                blocks,
            });

        let function_definition = typed_assignee()
            .separated_by(token(Token::Comma))
            .allow_trailing()
            .delimited_by(token(Token::LParen), token(Token::RParen))
            .then_ignore(token(Token::Arrow))
            .then(type_instance())
            .then(block)
            .map(
                |((parameters, return_type), body)| ExprTree::FunctionDefinition {
                    parameters,
                    return_type,
                    body,
                },
            );

        let parenthesized = token(Token::LParen).ignore_then(choice((
            token(Token::RParen).to(ExprTree::Tuple(Vec::new())),
            expression
                .clone()
                .then(token(Token::Comma).ignore_then(arguments.clone()).or_not())
                .then_ignore(token(Token::RParen))
                .map(|(first, rest)| match rest {
                    None => ExprTree::Parenthesized(Box::new(first)),
                    Some(rest) => ExprTree::Tuple(std::iter::once(first).chain(rest).collect()),
                }),
        )));

        let named = name()
            .then(generic_arguments.or_not())
            .then(braced_arguments.clone().or_not())
            .map(|((name, generics), arguments)| {
                let generics = generics.unwrap_or_default();
                match arguments {
                    Some(arguments) => ExprTree::Constructor {
                        name,
                        generics,
                        arguments,
                    },
                    None => ExprTree::Variable { name, generics },
                }
            });

        let operator_name = operator_id()
            .then(braced_arguments.or_not())
            .map(|(operator, arguments)| {
                let name = NameTree::OperatorId(operator);
                match arguments {
                    Some(arguments) => ExprTree::Constructor {
                        name,
                        generics: Vec::new(),
                        arguments,
                    },
                    None => ExprTree::Variable {
                        name,
                        generics: Vec::new(),
                    },
                }
            });

        let atom = choice((
            negative_literal,
            integer_literal,
            boolean,
            if_expression,
            match_expression,
            function_definition,
            parenthesized,
            named,
            operator_name,
        ))
        .boxed();

        let postfix = choice((
            arguments
                .delimited_by(token(Token::LParen), token(Token::RParen))
                .map(Postfix::Call),
            token(Token::Dot)
                .ignore_then(integer())
                .map(|(index, span)| Postfix::Access(index, span)),
        ));

        let operand = atom.then(postfix.repeated()).foldl(apply_postfix).boxed();

        let prefix = infix_operator()
            .then(expression)
            .map(|(operator, operand)| ExprTree::Prefix {
                operator,
                operand: Box::new(operand),
            })
            .boxed();

        let chain = operand
            .clone()
            .then(
                infix_operator()
                    .then(choice((operand, prefix.clone())))
                    .repeated(),
            )
            .map(|(first, rest)| fold_infix(first, rest));

        choice((chain, prefix))
    })
}

pub(crate) fn block() -> impl Parser<TokenSpan, BlockTree, Error = ParserError> + Clone {
    block_with(expression())
}

pub(crate) fn assignment() -> impl Parser<TokenSpan, AssignmentTree, Error = ParserError> + Clone {
    assignment_with(expression())
}

/// `typedef Name<T> type`, `typedef Name<T> { A T | B }` or `typedef Name`
pub(crate) fn type_definition(
) -> impl Parser<TokenSpan, DefinitionTree, Error = ParserError> + Clone {
    let item = ident()
        .then(type_instance().or_not())
        .map(|(id, type_)| TypeItemTree { id, type_ });

    let union = item
        .separated_by(token(Token::Pipe))
        .at_least(2)
        .delimited_by(token(Token::LBrace), token(Token::RBrace))
        .map(TypeBodyTree::Union);

    token(Token::Typedef)
        .ignore_then(type_variable())
        .then(choice((union, type_instance().map(TypeBodyTree::Opaque))).or_not())
        .map(|(head, body)| DefinitionTree::TypeDef {
            head,
            body: body.unwrap_or(TypeBodyTree::Empty),
        })
}

pub(crate) fn type_alias() -> impl Parser<TokenSpan, DefinitionTree, Error = ParserError> + Clone
{
    token(Token::Typealias)
        .ignore_then(type_variable())
        .then(type_instance())
        .map(|(head, type_)| DefinitionTree::TypeAlias { head, type_ })
}

pub(crate) fn program() -> impl Parser<TokenSpan, ProgramTree, Error = ParserError> + Clone {
    let definition = choice((
        type_definition(),
        type_alias(),
        assignment().map(DefinitionTree::Assignment),
    ));

    definition
        .separated_by(token(Token::Semicolon))
        .allow_trailing()
        .map(|definitions| ProgramTree { definitions })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fnlang::lexing::lex;

    fn parse_expr(source: &str) -> Result<ExprTree, Vec<ParserError>> {
        expression()
            .then_ignore(end())
            .parse(lex(source).expect("lexes"))
    }

    fn operators(tree: &ExprTree) -> Vec<String> {
        let mut names = Vec::new();
        let mut current = tree;
        while let ExprTree::Infix {
            operator, right, ..
        } = current
        {
            names.push(operator.name().to_string());
            current = right;
        }
        names
    }

    #[test]
    fn test_infix_chain_is_right_nested() {
        let tree = parse_expr("a + b * c - d").unwrap();
        assert_eq!(operators(&tree), vec!["+", "*", "-"]);
    }

    #[test]
    fn test_wrapped_identifier_is_an_infix_operator_between_operands() {
        let tree = parse_expr("x __add__ f").unwrap();
        assert_eq!(operators(&tree), vec!["add"]);
    }

    #[test]
    fn test_negative_literal_requires_attached_minus() {
        assert!(matches!(
            parse_expr("-5").unwrap(),
            ExprTree::Integer { negative: true, .. }
        ));
        assert!(matches!(
            parse_expr("- 5").unwrap(),
            ExprTree::Prefix { .. }
        ));
    }

    #[test]
    fn test_parenthesized_and_tuples() {
        assert!(matches!(
            parse_expr("(a)").unwrap(),
            ExprTree::Parenthesized(_)
        ));
        assert_eq!(
            parse_expr("(a,)").unwrap(),
            ExprTree::Tuple(vec![ExprTree::Variable {
                name: NameTree::Ident("a".to_string()),
                generics: vec![]
            }])
        );
        assert_eq!(parse_expr("()").unwrap(), ExprTree::Tuple(vec![]));
        assert!(parse_expr("(,)").is_err());
    }

    #[test]
    fn test_postfix_applications_fold_left() {
        let tree = parse_expr("f(1)(2).0").unwrap();
        let ExprTree::Access { expression, index, .. } = tree else {
            panic!("expected element access");
        };
        assert_eq!(index, "0");
        assert!(matches!(*expression, ExprTree::Call { .. }));
    }

    #[test]
    fn test_function_definition_is_preferred_over_tuple() {
        assert!(matches!(
            parse_expr("(x: int) -> int { x }").unwrap(),
            ExprTree::FunctionDefinition { .. }
        ));
        assert!(matches!(
            parse_expr("() -> () { () }").unwrap(),
            ExprTree::FunctionDefinition { .. }
        ));
    }

    #[test]
    fn test_function_types_nest_to_the_right() {
        let tree = type_instance()
            .then_ignore(end())
            .parse(lex("int -> bool -> ()").unwrap())
            .unwrap();
        let TypeTree::Function { head, tail } = tree else {
            panic!("expected function type");
        };
        assert_eq!(*head, TypeTree::Int);
        assert!(matches!(*tail, TypeTree::Function { .. }));
    }

    #[test]
    fn test_union_needs_two_items() {
        let parse = |source: &str| {
            type_definition()
                .then_ignore(end())
                .parse(lex(source).unwrap())
        };
        assert!(parse("typedef Maybe<T> { Some T | None }").is_ok());
        assert!(parse("typedef Error {Error1}").is_err());
    }

    #[test]
    fn test_block_requires_trailing_expression() {
        let parse = |source: &str| block().then_ignore(end()).parse(lex(source).unwrap());
        assert!(parse("{ a = 3; 9 }").is_ok());
        assert!(parse("{ a = 3; }").is_err());
        assert!(parse("{ a = 3 }").is_err());
        assert!(parse("{}").is_err());
    }
}
