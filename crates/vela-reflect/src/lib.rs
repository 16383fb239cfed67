//! Vela Type Reflection Transformer
//!
//! Compile-time type reflection for Vela: walks declarations during
//! compilation and attaches a compact, portable encoding of their static
//! type signatures to the emitted program, so runtime consumers can do
//! schema-driven work (validation, serialization, dependency injection)
//! without re-parsing source.
//!
//! The pipeline:
//! - [`op::TypeOp`] — the instruction set, one 6-bit slot per opcode
//! - [`pack`] — the pack/unpack codec between instruction streams and
//!   printable base-36 text
//! - [`extract::TypeExtractor`] — compiles type annotations into
//!   instruction streams, resolving references across modules
//! - [`mode::ReflectionOracle`] — per-declaration never/default/always
//!   gating from doc tags, a session override and `vela.json` files
//! - [`decorate`] — installs packed metadata as `__type` members,
//!   post-assignments and `Object.assign` wraps
//! - [`transform::Transformer`] — the per-file pass
//!
//! # Usage
//!
//! ```ignore
//! use vela_checker::Program;
//! use vela_reflect::Transformer;
//!
//! let mut transformer = Transformer::new();
//! for path in paths {
//!     transformer.transform_file(&mut program, &path);
//! }
//! ```

#![warn(rust_2018_idioms)]

pub mod decorate;
pub mod extract;
pub mod mode;
pub mod op;
pub mod pack;
pub mod resolve;
pub mod transform;

pub use decorate::TYPE_MEMBER;
pub use extract::TypeExtractor;
pub use mode::{ConfigError, ReflectionMode, ReflectionOracle, CONFIG_FILE};
pub use op::TypeOp;
pub use pack::{pack, unpack, DecodeError, PackStruct, Packed, StackEntry};
pub use transform::{Transformer, REFLECTION_TAG};
