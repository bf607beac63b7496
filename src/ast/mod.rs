pub mod custom;
pub mod expression;

pub use custom::{Constructor, CustomTypeDefinition, CustomTypeInstance, TypeName};
pub use expression::{
    BinOpKind, BinaryOp, Declaration, Function, FunctionApplication, IfElse, UnaryOp, UnaryOpKind,
};

/// A node of the syntax tree.
///
/// Nodes are immutable values; evaluation builds new nodes instead of
/// mutating existing ones.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Integer(i64),
    FloatingPoint(f64),
    Boolean(bool),
    /// Bound in scope, but the value is not available yet.
    NoValue,
    BinaryOp(BinaryOp),
    UnaryOp(UnaryOp),
    IfElse(IfElse),
    Variable(String),
    Function(Function),
    FunctionApplication(FunctionApplication),
    Declaration(Declaration),
    TypeName(TypeName),
    CustomTypeDefinition(CustomTypeDefinition),
    CustomTypeInstance(CustomTypeInstance),
}

impl Node {
    pub fn variable(name: impl Into<String>) -> Self {
        Node::Variable(name.into())
    }

    pub fn binary(left: Node, right: Node, op: BinOpKind) -> Self {
        Node::BinaryOp(BinaryOp {
            op,
            left: Box::new(left),
            right: Box::new(right),
        })
    }

    pub fn not(operand: Node) -> Self {
        Node::UnaryOp(UnaryOp {
            op: UnaryOpKind::Not,
            operand: Box::new(operand),
        })
    }

    pub fn if_else(conditions: Vec<Node>, branches: Vec<Node>) -> Self {
        debug_assert_eq!(branches.len(), conditions.len() + 1);
        Node::IfElse(IfElse {
            conditions,
            branches,
        })
    }

    pub fn function(parameter: impl Into<String>, body: Node) -> Self {
        Node::Function(Function {
            parameter: parameter.into(),
            body: Box::new(body),
        })
    }

    /// Nest `body` under one function per parameter, outermost first.
    pub fn curried<S: Into<String>>(parameters: Vec<S>, body: Node) -> Self {
        parameters
            .into_iter()
            .rev()
            .fold(body, |body, parameter| Node::function(parameter, body))
    }

    pub fn apply(function: Node, argument: Node) -> Self {
        Node::FunctionApplication(FunctionApplication {
            function: Box::new(function),
            argument: Box::new(argument),
        })
    }

    pub fn declaration(name: impl Into<String>, body: Node) -> Self {
        Node::Declaration(Declaration {
            name: name.into(),
            body: Box::new(body),
        })
    }

    /// Integer, float and boolean literals.
    pub fn is_literal(&self) -> bool {
        matches!(
            self,
            Node::Integer(_) | Node::FloatingPoint(_) | Node::Boolean(_)
        )
    }

    /// Short name of the variant, used in diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Node::Integer(_) => "integer",
            Node::FloatingPoint(_) => "float",
            Node::Boolean(_) => "boolean",
            Node::NoValue => "no value",
            Node::BinaryOp(_) => "binary operation",
            Node::UnaryOp(_) => "unary operation",
            Node::IfElse(_) => "if expression",
            Node::Variable(_) => "variable",
            Node::Function(_) => "function",
            Node::FunctionApplication(_) => "function application",
            Node::Declaration(_) => "declaration",
            Node::TypeName(_) => "type name",
            Node::CustomTypeDefinition(_) => "custom type definition",
            Node::CustomTypeInstance(_) => "custom type instance",
        }
    }
}
