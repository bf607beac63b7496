//! Hindley-Milner type inference with a defaultable numeric type.
//!
//! Integer literals get a fresh `number` type. A `number` unified with
//! `Float` becomes `Float`; unified with anything else it is an error.

pub mod env;
pub mod error;
pub mod infer;
pub mod subst;
pub mod ty;
pub mod unify;

pub use env::TypeEnv;
pub use error::TypeError;
pub use infer::{Infer, infer_program, infer_top};
pub use subst::Substitution;
pub use ty::{Type, TypeScheme, TypeVar};
pub use unify::{UnifyError, unify};
