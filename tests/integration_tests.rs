//! End-to-end tests: whole programs through lexer, parser, inference and
//! evaluation.

use elmscene::ast::Node;
use elmscene::interpreter::{Error, EvalError, Interpreter};
use elmscene::parser::Parser;
use elmscene::types::infer_top;

fn compile(src: &str) -> Result<Node, Error> {
    Interpreter::new().compile(src)
}

#[test]
fn e2e_view_value() {
    let program = r"
width = 4.0
height = 2.5
area w h = w * h
view = area width height
";
    assert_eq!(compile(program).unwrap(), Node::FloatingPoint(10.0));
}

#[test]
fn e2e_multi_line_declarations() {
    let program = r"
clamp lo hi x =
    if x < lo then
        lo
    else if x > hi then
        hi
    else
        x

view =
    clamp 0 10 15
";
    assert_eq!(compile(program).unwrap(), Node::Integer(10));
}

#[test]
fn e2e_comments_are_ignored() {
    let program = r"
-- the radius of the scene's sun
radius = 3 {- integer, promoted below -}

{- a block comment
   {- with a nested one -}
   spanning lines -}
view = radius * 1.5 -- Float
";
    assert_eq!(compile(program).unwrap(), Node::FloatingPoint(4.5));
}

#[test]
fn e2e_recursion() {
    let program = r"
sumTo n = if n == 0 then 0 else n + sumTo (n - 1)
view = sumTo 100
";
    assert_eq!(compile(program).unwrap(), Node::Integer(5050));
}

#[test]
fn e2e_pipelines() {
    let program = r"
double x = x * 2
inc x = x + 1
view = 5 |> double |> inc
";
    assert_eq!(compile(program).unwrap(), Node::Integer(11));
}

#[test]
fn e2e_function_as_root() {
    let program = r"
offset = 2
view = \t -> t + offset
";
    let value = compile(program).unwrap();
    assert_eq!(value.to_string(), r"(\t -> (t+2))");
}

#[test]
fn e2e_custom_root() {
    let mut interpreter = Interpreter::with_root("main");
    let value = interpreter.compile("main = not (1 > 2)").unwrap();
    assert_eq!(value, Node::Boolean(true));
}

#[test]
fn e2e_missing_root() {
    let err = compile("scene = 1").unwrap_err();
    assert!(matches!(err, Error::Eval(EvalError::NotImplemented { .. })));
}

#[test]
fn e2e_declaration_order_matters() {
    let err = compile("view = later\nlater = 1").unwrap_err();
    assert!(matches!(
        err,
        Error::Eval(EvalError::UnknownIdentifier { ref name }) if name == "later"
    ));
}

#[test]
fn e2e_compile_only_accepts_declarations() {
    let err = compile("x = 1\n1 + 2\n").unwrap_err();
    assert!(matches!(err, Error::Parse(_)));
}

#[test]
fn e2e_sessions_accumulate_declarations() {
    let mut interpreter = Interpreter::new();
    interpreter.compile("base = 10\nview = base").unwrap();
    assert_eq!(interpreter.interpret("base + 1").unwrap(), Node::Integer(11));
}

#[test]
fn e2e_type_check_then_evaluate() {
    let program = r"
scale k x = k * x
half = scale 0.5
view = half 8
";
    let (nodes, errors) = Parser::new(program).unwrap().parse_all();
    assert!(errors.is_empty());

    let env = infer_top(&nodes).unwrap();
    assert_eq!(env.lookup("scale").unwrap().to_string(), "number -> number -> number");
    assert_eq!(env.lookup("half").unwrap().to_string(), "Float -> Float");
    assert_eq!(env.lookup("view").unwrap().to_string(), "Float");

    assert_eq!(compile(program).unwrap(), Node::FloatingPoint(4.0));
}
