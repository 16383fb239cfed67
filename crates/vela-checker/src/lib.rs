//! Vela Program Model and Symbol Queries
//!
//! This crate provides the semantic surface compile-time transforms consume:
//! - A [`Program`] holding parsed source files keyed by absolute path
//! - Module specifier resolution (the emit resolver)
//! - Module-level name binding (AST → symbol table)
//! - A [`TypeChecker`] with symbol-at-location and declaration-of-symbol
//!   queries, following imports to their originating files
//!
//! # Usage
//!
//! ```ignore
//! use vela_checker::{Program, TypeChecker};
//!
//! let mut program = Program::new();
//! program.add_file("/app/model.vela", model_module);
//! program.add_file("/app/main.vela", main_module);
//!
//! let mut checker = TypeChecker::new(&program);
//! let symbol = checker.symbol_at(Path::new("/app/main.vela"), "Model");
//! ```

#![warn(rust_2018_idioms)]

pub mod checker;
pub mod program;
pub mod symbols;

pub use checker::{DeclRef, TypeChecker};
pub use program::{Program, SourceFile};
pub use symbols::{Binder, ImportTarget, Symbol, SymbolKind, SymbolTable};
