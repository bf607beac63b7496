//! # elmscene
//!
//! Front end for a small Elm-inspired language used to describe declarative
//! scenes: source text is lexed, parsed into a syntax tree, type-checked with
//! let-polymorphic inference and reduced by a partial evaluator.
//!
//! ```text
//! Source Code (String)
//!     ↓
//! [Lexer] → Token Stream (units split at column zero)
//!     ↓
//! [Parser] → ast::Node per top-level unit
//!     ↓
//! [Types] → TypeEnv of generalized schemes (optional)
//!     ↓
//! [Interpreter] → simplified ast::Node
//! ```
//!
//! ## Numbers
//!
//! Integer literals have the type `number` until they meet a `Float`, so
//! `addone x = x + 1` is `number -> number` while `p x = x <= 2.2` is
//! `Float -> Bool`. At run time integer arithmetic is exact and mixing in a
//! float promotes the integer operand.
//!
//! ## Partial evaluation
//!
//! The evaluator reduces a term as far as its bindings allow. A name that is
//! visible but has no value yet (a function parameter, or a declaration
//! inside its own body) leaves the dependent part of the term in place:
//!
//! ```
//! use elmscene::interpreter::Interpreter;
//!
//! let mut interpreter = Interpreter::new();
//! interpreter.interpret("fac x = if x == 0 then 1 else x * fac (x - 1)").unwrap();
//! let value = interpreter.interpret("fac 5").unwrap();
//! assert_eq!(value.to_string(), "120");
//! ```
//!
//! ## Module Structure
//!
//! - [`lexer`] - Tokenization using lachs
//! - [`parser`] - Combinator-based recursive descent parser
//! - [`ast`] - Syntax tree shared by every stage
//! - [`fmt`] - Diagnostic rendering of syntax trees
//! - [`types`] - Hindley-Milner inference with a defaultable numeric type
//! - [`interpreter`] - Partial evaluator and interpreter sessions

pub mod ast;
pub mod fmt;
pub mod interpreter;
pub mod lexer;
pub mod parser;
pub mod types;
