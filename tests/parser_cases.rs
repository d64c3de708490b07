//! Parser cases by grammar rule
//!
//! Each accepted case is compared through the compact `Display` rendering of the AST, where
//! operator applications print as prefix calls: `3 + 4 * 5` renders as `+(3, *(4, 5))`.
//! Rejected cases must produce no result at all.

use fnlang_parser::fnlang::parsing::{parse, Rule};
use rstest::rstest;

fn render(source: &str, rule: Rule) -> Option<String> {
    parse(source, rule).map(|node| node.to_string())
}

#[rstest]
#[case("int", "int")]
#[case("bool", "bool")]
#[case("(int)", "int")]
#[case("((int))", "int")]
#[case("foo", "foo")]
#[case("foo.<int>", "foo.<int>")]
#[case("foo.<int,>", "foo.<int>")]
#[case("foo.<int,bool>", "foo.<int, bool>")]
#[case("foo.<bar.<int>,bool>", "foo.<bar.<int>, bool>")]
#[case("(int,bool)", "(int, bool)")]
#[case("(int,)", "(int,)")]
#[case("()", "()")]
#[case("((int,int),(bool,bool))", "((int, int), (bool, bool))")]
#[case("((),)", "((),)")]
fn test_type_instances(#[case] source: &str, #[case] expected: &str) {
    assert_eq!(render(source, Rule::TypeInstance).as_deref(), Some(expected));
}

#[rstest]
#[case("(int,bool)->int", "(int, bool) -> int")]
#[case("(int,bool,)->int", "(int, bool) -> int")]
#[case("(int,)->int", "(int,) -> int")]
#[case("(int)->int", "(int,) -> int")]
#[case("int->int", "(int,) -> int")]
#[case("()->()", "() -> ()")]
#[case("int->bool->()", "(int,) -> (bool,) -> ()")]
#[case("(int->bool->())", "(int,) -> (bool,) -> ()")]
#[case("int->(bool->())", "(int,) -> (bool,) -> ()")]
#[case("(int)->(bool->())", "(int,) -> (bool,) -> ()")]
#[case("(int->bool)->()", "((int,) -> bool,) -> ()")]
#[case("(int->(int,),)->(())", "((int,) -> (int,),) -> ()")]
fn test_function_types(#[case] source: &str, #[case] expected: &str) {
    assert_eq!(render(source, Rule::TypeInstance).as_deref(), Some(expected));
}

#[rstest]
#[case("5", "5")]
#[case("0", "0")]
#[case("-8", "-8")]
#[case("10", "10")]
#[case("true", "true")]
#[case("false", "false")]
#[case("x", "x")]
#[case("foo", "foo")]
#[case("r2d2", "r2d2")]
#[case("f'", "f'")]
#[case("g''", "g''")]
#[case("__^__", "^")]
#[case("__^^^__", "^^^")]
#[case("map.<int>", "map.<int>")]
#[case("map.<int,>", "map.<int>")]
#[case("map.<T>", "map.<T>")]
#[case("map.<f.<int>>", "map.<f.<int>>")]
#[case("map.<f.<g.<T>>>", "map.<f.<g.<T>>>")]
#[case("map.<int,bool>", "map.<int, bool>")]
#[case("map.<(int,int)>", "map.<(int, int)>")]
#[case("()", "()")]
#[case("(3,)", "(3,)")]
#[case("(8,5,)", "(8, 5)")]
#[case("(8,5)", "(8, 5)")]
#[case("(())", "()")]
#[case("((),)", "((),)")]
fn test_atoms(#[case] source: &str, #[case] expected: &str) {
    assert_eq!(render(source, Rule::Expr).as_deref(), Some(expected));
}

#[rstest]
#[case("3 + 4", "+(3, 4)")]
#[case("3 * 4", "*(3, 4)")]
#[case("3 &&$& 4", "&&$&(3, 4)")]
#[case("3 __add__ 4", "add(3, 4)")]
#[case("3 _____ 4", "_(3, 4)")]
#[case("3 __f'__ 4", "f'(3, 4)")]
#[case("3 __f''__ 4", "f''(3, 4)")]
#[case("3 ______ 4", "__(3, 4)")]
#[case("3 _______ 4", "___(3, 4)")]
#[case("3 ________ 4", "____(3, 4)")]
#[case("3 + 4 + 5", "+(+(3, 4), 5)")]
#[case("3 * 4 + 5", "+(*(3, 4), 5)")]
#[case("3 + 4 + 5 + 6", "+(+(+(3, 4), 5), 6)")]
#[case("3 __add__ 4 __add__ 5 __add__ 6", "add(3, add(4, add(5, 6)))")]
#[case("3 + 4 * 5", "+(3, *(4, 5))")]
#[case("(3 + 4) * 5", "*(+(3, 4), 5)")]
#[case("2 * 3 + 4 * 5", "+(*(2, 3), *(4, 5))")]
#[case("3 __mul__ 4 + 5", "+(mul(3, 4), 5)")]
#[case("2 * 3 + 4 + 5", "+(+(*(2, 3), 4), 5)")]
#[case("2 + 3 + 4 * 5", "+(+(2, 3), *(4, 5))")]
#[case("2 + 3 * 4 + 5", "+(+(2, *(3, 4)), 5)")]
#[case("2 + 3 __mul__ 4 + 5", "+(+(2, mul(3, 4)), 5)")]
#[case("2 + 3 <!> 4 + 5", "+(+(2, <!>(3, 4)), 5)")]
#[case("2 __add__ 3 <!> 4 __add__ 5", "<!>(add(2, 3), add(4, 5))")]
#[case("g $ h(x)", "$(g, h(x))")]
#[case("g $ h $ i(x)", "$(g, $(h, i(x)))")]
#[case("x __add__ f __add__ g", "add(x, add(f, g))")]
#[case("x |> f |> g", "|>(|>(x, f), g)")]
#[case("(h @ g @ f)(x)", "(@(h, @(g, f)))(x)")]
#[case("3 :: 4 :: t", "::(3, ::(4, t))")]
#[case("3 == 4", "==(3, 4)")]
#[case("(3 == 4) == (5 == 6)", "==(==(3, 4), ==(5, 6))")]
fn test_operator_chains(#[case] source: &str, #[case] expected: &str) {
    assert_eq!(render(source, Rule::Expr).as_deref(), Some(expected));
}

#[rstest]
#[case("foo()", "foo()")]
#[case("foo(4,)", "foo(4)")]
#[case("foo(4)", "foo(4)")]
#[case("foo(4,5)", "foo(4, 5)")]
#[case("foo(4,5,)", "foo(4, 5)")]
#[case("(foo)(4)", "foo(4)")]
#[case("__^__(4)", "^(4)")]
#[case("foo(4)(-5,0)", "(foo(4))(-5, 0)")]
#[case("foo(4)(a)(-5,bar(true))", "((foo(4))(a))(-5, bar(true))")]
#[case("x.0", "x.0")]
#[case("(a, b).1", "(a, b).1")]
#[case("f . g", ".(f, g)")]
#[case("(f . g)(x)", "(.(f, g))(x)")]
#[case("a ... b", "...(a, b)")]
#[case("a .. b", "..(a, b)")]
#[case("x.0.4+1", "+(x.0.4, 1)")]
#[case("++x", "++(x)")]
#[case("-x", "-(x)")]
#[case("++ (++x)", "++(++(x))")]
#[case("++ ++x", "++(++(x))")]
#[case("++++x", "++++(x)")]
fn test_calls_accesses_and_prefixes(#[case] source: &str, #[case] expected: &str) {
    assert_eq!(render(source, Rule::Expr).as_deref(), Some(expected));
}

#[rstest]
#[case("if (g) { 1 } else { 2 }", "if (g) {1} else {2}")]
#[case(
    "if (x > 0) { x = 0; true } else { x = 1; false }",
    "if (>(x, 0)) {x = 0; true} else {x = 1; false}"
)]
#[case(
    "match (maybe()) { Some x: { t }, None : { y },}",
    "match (maybe()) {Some x: {t}, None: {y}}"
)]
#[case(
    "match (maybe()) { Some x: { t }, None : { y }}",
    "match (maybe()) {Some x: {t}, None: {y}}"
)]
#[case("match(()) { Some x | None: { () }, }", "match (()) {Some x | None: {()}}")]
#[case("() -> () { () }", "() -> () {()}")]
#[case("(x: int) -> int { a = 3; 9 }", "(x: int) -> int {a = 3; 9}")]
#[case("(x: int,) -> int { a = 3; 9 }", "(x: int) -> int {a = 3; 9}")]
#[case("(x: int, y: ()) -> int { a = 3; 9 }", "(x: int, y: ()) -> int {a = 3; 9}")]
#[case("(x: int, y: (),) -> int { a = 3; 9 }", "(x: int, y: ()) -> int {a = 3; 9}")]
#[case("Integer{8}", "Integer{8}")]
#[case("Integer{8,}", "Integer{8}")]
#[case("Integer{8,9}", "Integer{8, 9}")]
#[case("Integer{8,9,}", "Integer{8, 9}")]
#[case(
    "Cons.<U>{(f(h),map.<T,U>(f, t))}",
    "Cons.<U>{(f(h), map.<T, U>(f, t))}"
)]
fn test_compound_expressions(#[case] source: &str, #[case] expected: &str) {
    assert_eq!(render(source, Rule::Expr).as_deref(), Some(expected));
}

#[rstest]
#[case("05")]
#[case("-07")]
#[case("00")]
#[case("f'f")]
#[case("___^__")]
#[case("3 ____ 4")]
#[case("3 __^__ 4")]
#[case("3 == 4 == 5")]
#[case("x.-1")]
#[case("a .>. b")]
#[case("x.b")]
#[case("x.0.(4)")]
#[case("x.0.(4+1)")]
#[case("(x: int, y: (),) { a = 3; 9 }")]
#[case("(x: int,,) -> bool { a = 3; 9 }")]
#[case("(,) -> bool { a = 3; 9 }")]
#[case("(x, y: bool) -> bool { a = 3; 9 }")]
#[case("(x: int, y: bool) -> bool { a = 3;; 9 }")]
#[case("(x: int, y: bool) -> bool { a = 3 }")]
#[case("__add__ x")]
#[case("__^__{8}")]
fn test_rejected_expressions(#[case] source: &str) {
    assert_eq!(render(source, Rule::Expr), None);
}

#[rstest]
#[case("a = 3", "a = 3")]
#[case("__a__ = 3", "__a__ = 3")]
#[case("__&&__ = 3", "&& = 3")]
#[case("__>__ = 3", "> = 3")]
#[case("__$__ = 3", "$ = 3")]
#[case("__==__ = 4", "== = 4")]
#[case("a0 = 0", "a0 = 0")]
#[case("_ = 0", "_ = 0")]
#[case("__ = 0", "__ = 0")]
#[case("___ = 0", "___ = 0")]
#[case("____ = 0", "____ = 0")]
#[case("_____ = 0", "_____ = 0")]
#[case("a<T> = f.<T>", "a<T> = f.<T>")]
#[case("a<T,> = t.<T,>", "a<T> = t.<T>")]
#[case("a<T,U> = -4", "a<T, U> = -4")]
#[case("a<T,U> = f.<U,T>", "a<T, U> = f.<U, T>")]
#[case("a<T,U,> = 0", "a<T, U> = 0")]
fn test_assignments(#[case] source: &str, #[case] expected: &str) {
    assert_eq!(render(source, Rule::Assignment).as_deref(), Some(expected));
}

#[rstest]
#[case("__$ $__ = 3")]
#[case("a == 3")]
#[case("0 = 3")]
#[case("__=__ = 4")]
#[case("__.__ = 4")]
fn test_rejected_assignments(#[case] source: &str) {
    assert_eq!(render(source, Rule::Assignment), None);
}

#[rstest]
#[case("{5}", Some("{5}"))]
#[case("{}", None)]
#[case("{a = -9; 8}", Some("{a = -9; 8}"))]
#[case("{a = -9}", None)]
#[case("{a = -9;}", None)]
#[case("{; 8}", None)]
#[case("{w = x;; 8}", None)]
#[case("{w = x;y<T> = x.<T,T>; -8}", Some("{w = x; y<T> = x.<T, T>; -8}"))]
#[case("{w = x; ()}", Some("{w = x; ()}"))]
fn test_blocks(#[case] source: &str, #[case] expected: Option<&str>) {
    assert_eq!(render(source, Rule::Block).as_deref(), expected);
}

#[rstest]
#[case("typedef tuple (int, int)", Some("typedef tuple (int, int)"))]
#[case("typedef tuple ()", Some("typedef tuple ()"))]
#[case("typedef tuple<T> (T, T)", Some("typedef tuple<T> (T, T)"))]
#[case("typedef tuple<T,U> (F.<U>, T)", Some("typedef tuple<T, U> (F.<U>, T)"))]
#[case("typedef apply<T,U> T.<U>", Some("typedef apply<T, U> T.<U>"))]
#[case("typedef alias<T,> T", Some("typedef alias<T> T"))]
#[case("typedef Integer int", Some("typedef Integer int"))]
#[case("typedef Integer<> int", Some("typedef Integer int"))]
#[case("typedef None", Some("typedef None"))]
#[case("typedef None<T>", None)]
#[case("typedef Maybe<T> { Some T | None }", Some("typedef Maybe<T> {Some T | None}"))]
#[case(
    "typedef Choice<T, U> { Left T | Right U }",
    Some("typedef Choice<T, U> {Left T | Right U}")
)]
#[case("typedef Error {Error1|Error2}", Some("typedef Error {Error1 | Error2}"))]
#[case("typedef Error {Error1}", None)]
#[case("typedef Error {}", None)]
#[case("typedef Error<T> {Error1{T} | Error2}", None)]
#[case("typedef Error<T> {Error1 | Error2}", Some("typedef Error<T> {Error1 | Error2}"))]
fn test_type_definitions(#[case] source: &str, #[case] expected: Option<&str>) {
    assert_eq!(render(source, Rule::TypeDef).as_deref(), expected);
}

#[rstest]
#[case("typealias int8 int", Some("typealias int8 int"))]
#[case("typealias int8 (int,)", Some("typealias int8 (int,)"))]
#[case("typealias id<T> T -> T", Some("typealias id<T> (T,) -> T"))]
#[case("typealias int8<> int", Some("typealias int8 int"))]
#[case("typealias id<T> (T -> T)", Some("typealias id<T> (T,) -> T"))]
#[case("typealias MaybeInt {Some int | None}", None)]
#[case("typealias int", None)]
fn test_type_aliases(#[case] source: &str, #[case] expected: Option<&str>) {
    assert_eq!(render(source, Rule::TypeAlias).as_deref(), expected);
}

#[rstest]
#[case("z = -y;", Some("z = -(y);\n"))]
#[case("z = -y", Some("z = -(y);\n"))]
#[case("z = -y; typedef int8 int", Some("z = -(y);\ntypedef int8 int;\n"))]
#[case("z = -y; typedef int8 int;", Some("z = -(y);\ntypedef int8 int;\n"))]
#[case("z = -y ; typedef int8 int ; ", Some("z = -(y);\ntypedef int8 int;\n"))]
#[case("x = () -> () { 3 }", Some("x = () -> () {3};\n"))]
#[case("x = () -> () { typedef int8 int; 3 }", None)]
#[case("x = () -> () { typealias int8 int; 3 }", None)]
#[case("x + 3", None)]
fn test_programs(#[case] source: &str, #[case] expected: Option<&str>) {
    assert_eq!(render(source, Rule::Program).as_deref(), expected);
}

#[rstest]
#[case("typedef None ", Some("typedef None;\n"))]
#[case("typedef /* None */ Nada", Some("typedef Nada;\n"))]
#[case("typedef  None /* Nada", None)]
#[case("typedef  None // Nada", Some("typedef None;\n"))]
#[case("typedef  None ; // Nada", Some("typedef None;\n"))]
#[case("typedef // Nada \n None ;", Some("typedef None;\n"))]
#[case("typedef /* Nada \n Not */ None;", Some("typedef None;\n"))]
#[case("typedef /* Nada \n Not * / // ;", None)]
#[case("typedef /* Nada \n Not */ None // ;", Some("typedef None;\n"))]
#[case("typedef /* Nada \n Not */ // None;", None)]
#[case("typedef /* Nada \n Not /* */ None;", Some("typedef None;\n"))]
#[case("typedef /* Nada \n Not // */ None;", Some("typedef None;\n"))]
#[case("x = 3 /*/ 4 // */", Some("x = 3;\n"))]
#[case("x = 3 /-/ 4 // */", Some("x = /-/(3, 4);\n"))]
fn test_comments(#[case] source: &str, #[case] expected: Option<&str>) {
    assert_eq!(render(source, Rule::Program).as_deref(), expected);
}
