use super::Node;

/// Binary operator kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinOpKind {
    Add,
    Sub,
    Mul,
    Div,
    Eq,
    NotEq,
    Lt,
    Gt,
    LtEq,
    GtEq,
    And,
    Or,
}

impl BinOpKind {
    /// Surface symbol of the operator.
    pub fn symbol(self) -> &'static str {
        match self {
            BinOpKind::Add => "+",
            BinOpKind::Sub => "-",
            BinOpKind::Mul => "*",
            BinOpKind::Div => "/",
            BinOpKind::Eq => "==",
            BinOpKind::NotEq => "/=",
            BinOpKind::Lt => "<",
            BinOpKind::Gt => ">",
            BinOpKind::LtEq => "<=",
            BinOpKind::GtEq => ">=",
            BinOpKind::And => "&&",
            BinOpKind::Or => "||",
        }
    }

    pub fn is_arithmetic(self) -> bool {
        matches!(
            self,
            BinOpKind::Add | BinOpKind::Sub | BinOpKind::Mul | BinOpKind::Div
        )
    }

    pub fn is_comparison(self) -> bool {
        matches!(
            self,
            BinOpKind::Eq
                | BinOpKind::NotEq
                | BinOpKind::Lt
                | BinOpKind::Gt
                | BinOpKind::LtEq
                | BinOpKind::GtEq
        )
    }

    pub fn is_logical(self) -> bool {
        matches!(self, BinOpKind::And | BinOpKind::Or)
    }
}

/// Unary operator kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryOpKind {
    Not,
}

impl UnaryOpKind {
    pub fn symbol(self) -> &'static str {
        match self {
            UnaryOpKind::Not => "not",
        }
    }
}

/// Binary operation expression
#[derive(Debug, Clone, PartialEq)]
pub struct BinaryOp {
    pub op: BinOpKind,
    pub left: Box<Node>,
    pub right: Box<Node>,
}

/// Unary operation expression
#[derive(Debug, Clone, PartialEq)]
pub struct UnaryOp {
    pub op: UnaryOpKind,
    pub operand: Box<Node>,
}

/// Multi-way conditional.
///
/// `branches` holds one entry per condition followed by the else branch, so
/// `branches.len() == conditions.len() + 1` for every node the parser builds.
#[derive(Debug, Clone, PartialEq)]
pub struct IfElse {
    pub conditions: Vec<Node>,
    pub branches: Vec<Node>,
}

impl IfElse {
    /// The branch taken when no condition holds.
    pub fn else_branch(&self) -> Option<&Node> {
        self.branches.get(self.conditions.len())
    }

    /// Pairs of condition and the branch it guards.
    pub fn arms(&self) -> impl Iterator<Item = (&Node, &Node)> {
        self.conditions.iter().zip(self.branches.iter())
    }
}

/// A single parameter function. Multi parameter functions nest.
#[derive(Debug, Clone, PartialEq)]
pub struct Function {
    pub parameter: String,
    pub body: Box<Node>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FunctionApplication {
    pub function: Box<Node>,
    pub argument: Box<Node>,
}

/// A named binding, `name = body`.
#[derive(Debug, Clone, PartialEq)]
pub struct Declaration {
    pub name: String,
    pub body: Box<Node>,
}
