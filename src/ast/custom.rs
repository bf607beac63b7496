use super::Node;

/// Reference to a type by name, e.g. `Float` or `Shape`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypeName {
    pub name: String,
}

impl TypeName {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// One alternative of a custom type.
///
/// The signature is a curried `Function` chain whose parameters are the
/// field type names and whose innermost body is the defined type. A
/// constructor without fields carries the defined type directly.
#[derive(Debug, Clone, PartialEq)]
pub struct Constructor {
    pub name: String,
    pub signature: Node,
}

impl Constructor {
    pub fn new(name: impl Into<String>, fields: Vec<String>, result: TypeName) -> Self {
        let signature = fields
            .into_iter()
            .rev()
            .fold(Node::TypeName(result), |body, field| {
                Node::function(field, body)
            });

        Self {
            name: name.into(),
            signature,
        }
    }

    /// Field type names in declaration order.
    pub fn fields(&self) -> Vec<&str> {
        let mut fields = vec![];
        let mut current = &self.signature;
        while let Node::Function(function) = current {
            fields.push(function.parameter.as_str());
            current = &function.body;
        }
        fields
    }
}

/// `type Name a b = C1 T1 | C2`
#[derive(Debug, Clone, PartialEq)]
pub struct CustomTypeDefinition {
    pub name: TypeName,
    pub parameters: Vec<String>,
    pub constructors: Vec<Constructor>,
}

/// A constructor applied to its arguments, e.g. `Circle 2.0`.
#[derive(Debug, Clone, PartialEq)]
pub struct CustomTypeInstance {
    pub type_name: TypeName,
    pub arguments: Vec<Node>,
}
