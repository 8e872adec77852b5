//! Instruction-level representation of method bodies
//!
//! Bodies are flat, ordered instruction sequences. Every instruction carries a
//! stable [`InsnId`] handle, allocated per method body, which is what jumps
//! and exception-table entries point at (never a raw reference). This makes
//! cloning a body a matter of allocating new handles, copying the sequence
//! and remapping handles through a lookup table - see [`clone_body`].

mod clone;
mod insn;
mod insn_list;

pub use clone::*;
pub use insn::*;
pub use insn_list::*;
