//! Diagnostic rendering for syntax trees
//!
//! Every node renders to a compact, fully parenthesized form such as
//! `(3+4)` or `(\x -> (x+1))`. The output is meant for messages and tests;
//! it is not guaranteed to parse back.

use std::fmt::{self, Display, Write};

use crate::ast::{
    BinOpKind, BinaryOp, Constructor, CustomTypeDefinition, CustomTypeInstance, Declaration,
    Function, FunctionApplication, IfElse, Node, TypeName, UnaryOp, UnaryOpKind,
};

/// Render a float so that integral values keep a fractional part (`2.0`).
pub fn format_float(value: f64) -> String {
    let mut rendered = value.to_string();
    if value.is_finite() && !rendered.contains('.') {
        rendered.push_str(".0");
    }
    rendered
}

impl Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Integer(value) => write!(f, "{value}"),
            Node::FloatingPoint(value) => f.write_str(&format_float(*value)),
            Node::Boolean(true) => f.write_str("True"),
            Node::Boolean(false) => f.write_str("False"),
            Node::NoValue => f.write_str("NOVALUE"),
            Node::BinaryOp(op) => op.fmt(f),
            Node::UnaryOp(op) => op.fmt(f),
            Node::IfElse(if_else) => if_else.fmt(f),
            Node::Variable(name) => f.write_str(name),
            Node::Function(function) => function.fmt(f),
            Node::FunctionApplication(application) => application.fmt(f),
            Node::Declaration(declaration) => declaration.fmt(f),
            Node::TypeName(type_name) => type_name.fmt(f),
            Node::CustomTypeDefinition(definition) => definition.fmt(f),
            Node::CustomTypeInstance(instance) => instance.fmt(f),
        }
    }
}

impl Display for BinOpKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl Display for UnaryOpKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let right = self.right.to_string();
        // `3--2` would lex as the start of a line comment
        if right.starts_with('-') {
            write!(f, "({}{}({right}))", self.left, self.op)
        } else {
            write!(f, "({}{}{right})", self.left, self.op)
        }
    }
}

impl Display for UnaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({} {})", self.op, self.operand)
    }
}

impl Display for IfElse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (condition, branch) in self.arms() {
            write!(f, "if {condition} then {branch} else ")?;
        }
        match self.else_branch() {
            Some(branch) => branch.fmt(f),
            None => f.write_str("NOVALUE"),
        }
    }
}

impl Display for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(\\{} -> {})", self.parameter, self.body)
    }
}

impl Display for FunctionApplication {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({} {})", self.function, self.argument)
    }
}

impl Display for Declaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = {}", self.name, self.body)
    }
}

impl Display for TypeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl Display for Constructor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)?;
        for field in self.fields() {
            write!(f, " {field}")?;
        }
        Ok(())
    }
}

impl Display for CustomTypeDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut buffer = String::new();
        write!(buffer, "type {}", self.name)?;
        for parameter in &self.parameters {
            write!(buffer, " {parameter}")?;
        }
        buffer.push_str(" =");

        for (index, constructor) in self.constructors.iter().enumerate() {
            if index > 0 {
                buffer.push_str(" |");
            }
            write!(buffer, " {constructor}")?;
        }

        f.write_str(&buffer)
    }
}

impl Display for CustomTypeInstance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}", self.type_name)?;
        for argument in &self.arguments {
            write!(f, " {argument}")?;
        }
        f.write_str(")")
    }
}
