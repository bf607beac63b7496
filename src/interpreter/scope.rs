use std::rc::Rc;

use crate::ast::Node;

struct Frame {
    name: String,
    value: Node,
    parent: Option<Rc<Frame>>,
}

/// Local bindings layered over the global table.
///
/// Each frame holds one parameter. Extending a scope shares its frames, so
/// binding a parameter does not copy the bindings beneath it.
#[derive(Clone, Default)]
pub struct Scope {
    head: Option<Rc<Frame>>,
}

impl Scope {
    /// A scope with no local bindings; lookups fall through to globals.
    pub fn new() -> Self {
        Self::default()
    }

    /// A new scope with `name` bound on top of this one.
    pub fn bind(&self, name: impl Into<String>, value: Node) -> Scope {
        Scope {
            head: Some(Rc::new(Frame {
                name: name.into(),
                value,
                parent: self.head.clone(),
            })),
        }
    }

    /// Bind `name` to the unresolved placeholder.
    pub fn bind_unresolved(&self, name: impl Into<String>) -> Scope {
        self.bind(name, Node::NoValue)
    }

    /// Resolve a local name, innermost frame first.
    pub fn lookup(&self, name: &str) -> Option<&Node> {
        let mut current = self.head.as_deref();
        while let Some(frame) = current {
            if frame.name == name {
                return Some(&frame.value);
            }
            current = frame.parent.as_deref();
        }
        None
    }

    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }
}
