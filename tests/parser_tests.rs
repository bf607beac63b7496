use elmscene::ast::{BinOpKind, Node};
use elmscene::parser::Parser;

fn parse(src: &str) -> Node {
    let mut parser = Parser::new(src).expect("lexes");
    let node = parser.parse().expect("parses");
    assert!(parser.is_done(), "leftover input in {src:?}");
    node
}

fn render(src: &str) -> String {
    parse(src).to_string()
}

#[test]
fn parse_literals() {
    assert_eq!(parse("42"), Node::Integer(42));
    assert_eq!(parse("2.5"), Node::FloatingPoint(2.5));
    assert_eq!(parse("True"), Node::Boolean(true));
    assert_eq!(parse("False"), Node::Boolean(false));
}

#[test]
fn parse_operator_precedence() {
    assert_eq!(render("1 + 2 * 3"), "(1+(2*3))");
    assert_eq!(render("(1 + 2) * 3"), "((1+2)*3)");
    assert_eq!(render("1 + 2 <= 3 * 4"), "((1+2)<=(3*4))");
    assert_eq!(render("a || b && c"), "(a||(b&&c))");
    assert_eq!(render("x /= 1"), "(x/=1)");
}

#[test]
fn parse_binary_tiers_are_left_associative() {
    assert_eq!(render("8 / 4 / 2"), "((8/4)/2)");
    assert_eq!(render("1 - 2 + 3"), "((1-2)+3)");
}

#[test]
fn parse_binary_node_shape() {
    let node = parse("3 + 4");
    assert_eq!(
        node,
        Node::binary(Node::Integer(3), Node::Integer(4), BinOpKind::Add)
    );
}

#[test]
fn parse_if_else_chain_is_one_node() {
    let node = parse("if a then 1 else if b then 2 else 3");
    let Node::IfElse(if_else) = &node else {
        panic!("expected if-else, got {node:?}");
    };
    assert_eq!(if_else.conditions.len(), 2);
    assert_eq!(if_else.branches.len(), 3);
    assert_eq!(node.to_string(), "if a then 1 else if b then 2 else 3");
}

#[test]
fn parse_lambda_with_several_parameters() {
    assert_eq!(render(r"\x y -> x + y"), r"(\x -> (\y -> (x+y)))");
}

#[test]
fn parse_declaration_desugars_parameters() {
    let mut parser = Parser::new("fix f = f (fix f)").unwrap();
    let node = parser.parse_declaration().unwrap();
    assert_eq!(node.to_string(), r"fix = (\f -> (f (fix f)))");
}

#[test]
fn parse_application_is_left_nested() {
    assert_eq!(render("f a b"), "((f a) b)");
    assert_eq!(render("f (g a)"), "(f (g a))");
}

#[test]
fn parse_pipes_become_applications() {
    assert_eq!(render("3 |> f"), "(f 3)");
    assert_eq!(render("f <| 3"), "(f 3)");
}

#[test]
fn parse_prefix_minus() {
    assert_eq!(parse("-4"), Node::Integer(-4));
    assert_eq!(parse("-1.5"), Node::FloatingPoint(-1.5));
    assert_eq!(render("-x"), "(0-x)");
}

#[test]
fn parse_custom_type_definition() {
    assert_eq!(
        render("type Shape = Circle Float | Square Float | Empty"),
        "type Shape = Circle Float | Square Float | Empty"
    );
}

#[test]
fn parse_constructor_instance() {
    assert_eq!(render("Circle 2.0"), "(Circle 2.0)");
}

#[test]
fn parse_several_units() {
    let mut parser = Parser::new("a = 1\nb = a + 1\n\nmain =\n  b * 2\n").unwrap();
    let (nodes, errors) = parser.parse_all();
    assert!(errors.is_empty());
    let rendered: Vec<String> = nodes.iter().map(Node::to_string).collect();
    assert_eq!(rendered, vec!["a = 1", "b = (a+1)", "main = (b*2)"]);
}

#[test]
fn parse_all_recovers_after_errors() {
    let mut parser = Parser::new("a = 1 +\nb = 2\nc = )\n").unwrap();
    let (nodes, errors) = parser.parse_all();
    assert_eq!(nodes.len(), 1);
    assert_eq!(nodes[0].to_string(), "b = 2");
    assert_eq!(errors.len(), 2);
}

#[test]
fn unterminated_parenthesis_fails_at_end_of_input() {
    let mut parser = Parser::new("(1 + 2").unwrap();
    let err = parser.parse().unwrap_err();
    assert_eq!(err.message, "unexpected end of input");
}

#[test]
fn unexpected_token_is_reported() {
    let mut parser = Parser::new("1 + then").unwrap();
    let err = parser.parse().unwrap_err();
    assert_eq!(err.message, "unexpected token");
    assert_eq!(err.found.as_deref(), Some("'then'"));
}

#[test]
fn parse_declaration_rejects_expressions() {
    let mut parser = Parser::new("1 + 2").unwrap();
    assert!(parser.parse_declaration().is_err());
}
