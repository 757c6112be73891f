//! A tree-walk interpreter for Pym, a small indentation-sensitive,
//! dynamically typed, object-oriented scripting language.
//!
//! Pym programs are classes with single inheritance, methods, fields behind
//! dotted chains, integer/string/boolean/None values, arithmetic and
//! comparison operators, short-circuiting `and`/`or`, `if/else`, `print` and
//! `return`.  Operators dispatch to user-defined dunder methods (`__init__`,
//! `__add__`, `__eq__`, `__lt__`, `__str__`).
//!
//! # Examples
//!
//! See [`crate::interpreter::Interpreter`].
//!
//! # Limitations
//!
//! - The lexer and parser do not attempt any error recovery.  They bail out
//! on the first encountered error.
//! - There are no loops and no floating-point numbers.
//! - Reference cycles built through instance fields are never reclaimed.

#![warn(rust_2018_idioms)]
#![warn(missing_debug_implementations)]

pub mod interpreter;

mod ast;
mod byte_reader;
mod ctx;
mod diag;
mod eval;
mod interner;
mod lexer;
mod parser;
mod runtime;
mod token;
