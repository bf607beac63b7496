use crate::ast::{
    BinOpKind, BinaryOp, Declaration, Function, FunctionApplication, IfElse, Node, UnaryOp,
    UnaryOpKind,
};

use super::Interpreter;
use super::error::EvalError;
use super::scope::Scope;

/// A simplified node and whether it was fully evaluated.
pub type Evaluated = (Node, bool);

impl Interpreter {
    /// Evaluate `node` as far as the bindings in `scope` allow.
    ///
    /// A name bound to [`Node::NoValue`] is visible but unresolved: terms
    /// that depend on it come back simplified and flagged as incomplete
    /// instead of failing.
    pub fn evaluate(&mut self, node: &Node, scope: &Scope) -> Result<Evaluated, EvalError> {
        match node {
            Node::Integer(_) | Node::FloatingPoint(_) | Node::Boolean(_) => Ok((node.clone(), true)),
            Node::UnaryOp(unop) => self.evaluate_unary(unop, scope),
            Node::BinaryOp(binop) => self.evaluate_binary(binop, scope),
            Node::Variable(name) => self.evaluate_variable(node, name, scope),
            Node::Declaration(declaration) => self.evaluate_declaration(declaration),
            Node::Function(function) => self.evaluate_function(function, scope),
            Node::FunctionApplication(call) => self.evaluate_application(call, scope),
            Node::IfElse(if_else) => self.evaluate_if_else(node, if_else, scope),
            Node::NoValue
            | Node::TypeName(_)
            | Node::CustomTypeDefinition(_)
            | Node::CustomTypeInstance(_) => Err(EvalError::NotImplemented {
                what: node.to_string(),
            }),
        }
    }

    fn resolve<'a>(&'a self, name: &str, scope: &'a Scope) -> Option<&'a Node> {
        scope.lookup(name).or_else(|| self.globals.get(name))
    }

    fn evaluate_unary(&mut self, unop: &UnaryOp, scope: &Scope) -> Result<Evaluated, EvalError> {
        let (operand, complete) = self.evaluate(&unop.operand, scope)?;
        if !complete {
            let rebuilt = Node::UnaryOp(UnaryOp {
                op: unop.op,
                operand: Box::new(operand),
            });
            return Ok((rebuilt, false));
        }

        match (unop.op, operand) {
            (UnaryOpKind::Not, Node::Boolean(value)) => Ok((Node::Boolean(!value), true)),
            (op, other) => Err(EvalError::UnsupportedOperation {
                operation: format!("{} applied to {other}", op.symbol()),
            }),
        }
    }

    fn evaluate_binary(&mut self, binop: &BinaryOp, scope: &Scope) -> Result<Evaluated, EvalError> {
        let (left, left_complete) = self.evaluate(&binop.left, scope)?;
        let (right, right_complete) = self.evaluate(&binop.right, scope)?;
        if !left_complete || !right_complete {
            return Ok((Node::binary(left, right, binop.op), false));
        }

        let result = apply_binary(binop.op, &left, &right)?;
        Ok((result, true))
    }

    fn evaluate_variable(&self, node: &Node, name: &str, scope: &Scope) -> Result<Evaluated, EvalError> {
        match self.resolve(name, scope) {
            None => Err(EvalError::UnknownIdentifier {
                name: name.to_string(),
            }),
            Some(Node::NoValue) => Ok((node.clone(), false)),
            Some(value) => Ok((value.clone(), true)),
        }
    }

    /// Top-level declarations see the globals plus their own name, so a body
    /// may refer to itself. Nothing is stored unless the body evaluates
    /// completely.
    fn evaluate_declaration(&mut self, declaration: &Declaration) -> Result<Evaluated, EvalError> {
        if self.globals.contains_key(&declaration.name) {
            return Err(EvalError::VariableShadowing {
                name: declaration.name.clone(),
            });
        }

        let scope = Scope::new().bind_unresolved(&declaration.name);
        let (body, complete) = self.evaluate(&declaration.body, &scope)?;
        if !complete {
            return Err(EvalError::UnresolvedDeclaration {
                name: declaration.name.clone(),
                body: body.to_string(),
            });
        }

        self.globals.insert(declaration.name.clone(), body.clone());
        Ok((Node::declaration(declaration.name.clone(), body), true))
    }

    /// A function is a value whether or not its body reduces.
    fn evaluate_function(&mut self, function: &Function, scope: &Scope) -> Result<Evaluated, EvalError> {
        let inner = scope.bind_unresolved(&function.parameter);
        let (body, _) = self.evaluate(&function.body, &inner)?;
        Ok((Node::function(function.parameter.clone(), body), true))
    }

    /// A function body only sees the globals and its own parameter. An
    /// application that mentions a parameter of an enclosing function which
    /// is still unbound is left unreduced until that function is applied.
    fn evaluate_application(
        &mut self,
        call: &FunctionApplication,
        scope: &Scope,
    ) -> Result<Evaluated, EvalError> {
        let (function, function_complete) = self.evaluate(&call.function, scope)?;
        let (argument, argument_complete) = self.evaluate(&call.argument, scope)?;
        if !function_complete {
            return Ok((self.rebuild_application(call, function, argument, scope), false));
        }

        let (parameter, body) = match function {
            Node::Function(Function { parameter, body }) => (parameter, body),
            other => {
                let found = other.to_string();
                return Err(match *call.function {
                    Node::FunctionApplication(_) => EvalError::TooManyArguments { found },
                    _ => EvalError::TypeIsNotAFunction { found },
                });
            }
        };

        if !argument_complete
            || mentions_unbound(&call.function, scope)
            || mentions_unbound(&call.argument, scope)
        {
            let function = Node::function(parameter, *body);
            return Ok((self.rebuild_application(call, function, argument, scope), false));
        }

        let inner = Scope::new().bind(parameter, argument);
        self.evaluate(&body, &inner)
    }

    /// Operands naming a global function stay names, so the function's body
    /// is never evaluated again under local bindings.
    fn rebuild_application(
        &self,
        call: &FunctionApplication,
        function: Node,
        argument: Node,
        scope: &Scope,
    ) -> Node {
        Node::apply(
            self.global_name_or(&call.function, function, scope),
            self.global_name_or(&call.argument, argument, scope),
        )
    }

    fn global_name_or(&self, source: &Node, evaluated: Node, scope: &Scope) -> Node {
        match source {
            Node::Variable(name)
                if scope.lookup(name).is_none()
                    && matches!(self.globals.get(name), Some(Node::Function(_))) =>
            {
                source.clone()
            }
            _ => evaluated,
        }
    }

    /// Each condition is evaluated together with its branch, in order. The
    /// first true condition selects its branch and the else branch is only
    /// evaluated when no condition holds. If anything evaluated on the way is
    /// incomplete, the whole expression is returned with the known bindings
    /// filled in.
    fn evaluate_if_else(
        &mut self,
        node: &Node,
        if_else: &IfElse,
        scope: &Scope,
    ) -> Result<Evaluated, EvalError> {
        for (condition, branch) in if_else.arms() {
            let (condition, condition_complete) = self.evaluate(condition, scope)?;
            let (branch, branch_complete) = self.evaluate(branch, scope)?;
            if !condition_complete || !branch_complete {
                return Ok((substitute(node, scope), false));
            }
            match condition {
                Node::Boolean(true) => return Ok((branch, true)),
                Node::Boolean(false) => {}
                other => {
                    return Err(EvalError::ConditionMustBeBool {
                        found: other.to_string(),
                    });
                }
            }
        }

        let Some(else_branch) = if_else.else_branch() else {
            return Err(EvalError::NotImplemented {
                what: node.to_string(),
            });
        };

        match self.evaluate(else_branch, scope)? {
            (value, true) => Ok((value, true)),
            (_, false) => Ok((substitute(node, scope), false)),
        }
    }
}

fn apply_binary(op: BinOpKind, left: &Node, right: &Node) -> Result<Node, EvalError> {
    match (left, right) {
        (Node::Boolean(a), Node::Boolean(b)) => match op {
            BinOpKind::And => Ok(Node::Boolean(*a && *b)),
            BinOpKind::Or => Ok(Node::Boolean(*a || *b)),
            _ => Err(unsupported(op, left, right)),
        },
        (Node::Boolean(_), _) | (_, Node::Boolean(_)) => Err(unsupported(op, left, right)),
        (Node::Integer(a), Node::Integer(b)) => integer_op(op, *a, *b)
            .ok_or_else(|| unsupported(op, left, right))?,
        _ => match (promote(left), promote(right)) {
            (Some(a), Some(b)) => float_op(op, a, b).ok_or_else(|| unsupported(op, left, right))?,
            _ => Err(EvalError::NotImplemented {
                what: format!("({left}{}{right})", op.symbol()),
            }),
        },
    }
}

/// Integers become floats when mixed with floats.
fn promote(node: &Node) -> Option<f64> {
    match node {
        Node::Integer(value) => Some(*value as f64),
        Node::FloatingPoint(value) => Some(*value),
        _ => None,
    }
}

/// `None` for operators that do not apply to numbers.
fn integer_op(op: BinOpKind, a: i64, b: i64) -> Option<Result<Node, EvalError>> {
    let node = match op {
        BinOpKind::Add => Node::Integer(a.wrapping_add(b)),
        BinOpKind::Sub => Node::Integer(a.wrapping_sub(b)),
        BinOpKind::Mul => Node::Integer(a.wrapping_mul(b)),
        BinOpKind::Div if b == 0 => return Some(Err(EvalError::DivisionByZero)),
        BinOpKind::Div => Node::Integer(a.wrapping_div(b)),
        BinOpKind::Eq => Node::Boolean(a == b),
        BinOpKind::NotEq => Node::Boolean(a != b),
        BinOpKind::Lt => Node::Boolean(a < b),
        BinOpKind::Gt => Node::Boolean(a > b),
        BinOpKind::LtEq => Node::Boolean(a <= b),
        BinOpKind::GtEq => Node::Boolean(a >= b),
        BinOpKind::And | BinOpKind::Or => return None,
    };
    Some(Ok(node))
}

fn float_op(op: BinOpKind, a: f64, b: f64) -> Option<Result<Node, EvalError>> {
    let node = match op {
        BinOpKind::Add => Node::FloatingPoint(a + b),
        BinOpKind::Sub => Node::FloatingPoint(a - b),
        BinOpKind::Mul => Node::FloatingPoint(a * b),
        BinOpKind::Div if b == 0.0 => return Some(Err(EvalError::DivisionByZero)),
        BinOpKind::Div => Node::FloatingPoint(a / b),
        BinOpKind::Eq => Node::Boolean(a == b),
        BinOpKind::NotEq => Node::Boolean(a != b),
        BinOpKind::Lt => Node::Boolean(a < b),
        BinOpKind::Gt => Node::Boolean(a > b),
        BinOpKind::LtEq => Node::Boolean(a <= b),
        BinOpKind::GtEq => Node::Boolean(a >= b),
        BinOpKind::And | BinOpKind::Or => return None,
    };
    Some(Ok(node))
}

fn unsupported(op: BinOpKind, left: &Node, right: &Node) -> EvalError {
    EvalError::UnsupportedOperation {
        operation: format!("({left}{}{right})", op.symbol()),
    }
}

/// Whether `node` refers to a name that `scope` binds but cannot resolve yet.
fn mentions_unbound(node: &Node, scope: &Scope) -> bool {
    let mut names = Vec::new();
    free_names(node, &mut Vec::new(), &mut names);
    names
        .into_iter()
        .any(|name| matches!(scope.lookup(name), Some(Node::NoValue)))
}

fn free_names<'a>(node: &'a Node, bound: &mut Vec<&'a str>, names: &mut Vec<&'a str>) {
    match node {
        Node::Variable(name) => {
            if !bound.contains(&name.as_str()) {
                names.push(name);
            }
        }
        Node::Function(function) => {
            bound.push(&function.parameter);
            free_names(&function.body, bound, names);
            bound.pop();
        }
        Node::FunctionApplication(call) => {
            free_names(&call.function, bound, names);
            free_names(&call.argument, bound, names);
        }
        Node::BinaryOp(binop) => {
            free_names(&binop.left, bound, names);
            free_names(&binop.right, bound, names);
        }
        Node::UnaryOp(unop) => free_names(&unop.operand, bound, names),
        Node::IfElse(if_else) => {
            for child in if_else.conditions.iter().chain(&if_else.branches) {
                free_names(child, bound, names);
            }
        }
        _ => {}
    }
}

/// Replace variables bound to values in `scope`. Unresolved and unknown
/// names are left in place.
fn substitute(node: &Node, scope: &Scope) -> Node {
    match node {
        Node::Variable(name) => match scope.lookup(name) {
            Some(Node::NoValue) | None => node.clone(),
            Some(value) => value.clone(),
        },
        Node::Function(function) => {
            let inner = scope.bind_unresolved(&function.parameter);
            Node::function(function.parameter.clone(), substitute(&function.body, &inner))
        }
        Node::FunctionApplication(call) => Node::apply(
            substitute(&call.function, scope),
            substitute(&call.argument, scope),
        ),
        Node::BinaryOp(binop) => Node::binary(
            substitute(&binop.left, scope),
            substitute(&binop.right, scope),
            binop.op,
        ),
        Node::UnaryOp(unop) => Node::UnaryOp(UnaryOp {
            op: unop.op,
            operand: Box::new(substitute(&unop.operand, scope)),
        }),
        Node::IfElse(if_else) => Node::IfElse(IfElse {
            conditions: if_else.conditions.iter().map(|c| substitute(c, scope)).collect(),
            branches: if_else.branches.iter().map(|b| substitute(b, scope)).collect(),
        }),
        _ => node.clone(),
    }
}
