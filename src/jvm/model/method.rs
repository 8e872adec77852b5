use crate::jvm::code::{ExceptionHandler, InsnList};
use crate::jvm::{BinaryName, MethodAccessFlags, MethodDescriptor, UnqualifiedName};

/// Semantic representation of a method
///
/// A method is owned by exactly one [`Class`](super::Class) at a time;
/// "copying" a method into another class always goes through a deep copy of
/// the body (see [`clone_body`](crate::jvm::code::clone_body)), never through
/// sharing instructions by reference.
#[derive(Clone, Debug)]
pub struct Method {
    pub name: UnqualifiedName,

    /// Parameter and return types
    pub descriptor: MethodDescriptor,

    pub access_flags: MethodAccessFlags,

    /// Declared (checked) exceptions
    pub exceptions: Vec<BinaryName>,

    /// Number of local variable slots, covering parameters and every slot
    /// touched by the body (including slots introduced by injected code)
    pub max_locals: u16,

    /// Maximum operand stack depth
    pub max_stack: u16,

    /// Instruction sequence of the body
    pub code: InsnList,

    pub exception_table: Vec<ExceptionHandler>,
}

impl Method {
    /// Create a new method with an empty body
    ///
    /// `max_locals` starts out covering the parameters (plus `this` for
    /// non-static methods); it grows as the body comes to use more slots.
    pub fn new(
        name: UnqualifiedName,
        descriptor: MethodDescriptor,
        access_flags: MethodAccessFlags,
    ) -> Method {
        let max_locals =
            descriptor.parameter_length(!access_flags.contains(MethodAccessFlags::STATIC)) as u16;
        Method {
            name,
            descriptor,
            access_flags,
            exceptions: vec![],
            max_locals,
            max_stack: 0,
            code: InsnList::new(),
            exception_table: vec![],
        }
    }

    pub fn is_static(&self) -> bool {
        self.access_flags.contains(MethodAccessFlags::STATIC)
    }
}
