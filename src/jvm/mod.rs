//! In-memory model of JVM classes and method bodies
//!
//! This is the representation the injection preview operates on. Classes are
//! assumed to have already been parsed into [`model::Class`] values by some
//! class-file reader; this module only cares about holding and mutating them.
//!
//! Method bodies are flat instruction sequences ([`code::InsnList`]) rather
//! than a CFG of basic blocks: the preview rewrites code around existing
//! instructions and never needs to re-verify or re-serialize, so the flat
//! form (with stable per-instruction identities for jump targets and
//! exception ranges) is the convenient one.

mod access_flags;
pub mod code;
mod descriptors;
pub mod model;
mod names;

pub use access_flags::*;
pub use descriptors::*;
pub use names::*;
