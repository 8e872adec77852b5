use crate::jvm::model::{Field, Method};
use crate::jvm::{BinaryName, ClassAccessFlags, MethodDescriptor, UnqualifiedName};

/// Semantic representation of a class
///
/// Classes are constructed once (by whatever parsed them) and then mutated in
/// place by the injection preview. The invariant [`add_method`] maintains is
/// that (name, descriptor) pairs stay unique across `methods`.
///
/// [`add_method`]: Class::add_method
#[derive(Clone, Debug)]
pub struct Class {
    /// Name of the class, in internal `foo/bar/Baz` form
    pub name: BinaryName,

    pub access_flags: ClassAccessFlags,

    /// Superclass (`None` only for `java/lang/Object`)
    pub superclass: Option<BinaryName>,

    /// Implemented interfaces
    pub interfaces: Vec<BinaryName>,

    /// Methods, unique by (name, descriptor)
    ///
    /// Use [`Self::add_method`] so the uniqueness invariant gets checked.
    pub methods: Vec<Method>,

    /// Fields
    pub fields: Vec<Field>,
}

impl Class {
    /// Create a new class with no members
    pub fn new(name: BinaryName) -> Class {
        Class {
            name,
            access_flags: ClassAccessFlags::PUBLIC | ClassAccessFlags::SUPER,
            superclass: Some(BinaryName::JAVA_LANG_OBJECT),
            interfaces: vec![],
            methods: vec![],
            fields: vec![],
        }
    }

    /// Add a method to the class
    ///
    /// Panics if a method with the same (name, descriptor) is already
    /// present - two such methods in one class is a programming defect, not
    /// a recoverable condition.
    pub fn add_method(&mut self, method: Method) {
        assert!(
            self.find_method(&method.name, &method.descriptor).is_none(),
            "Method {:?}{:?} is already defined on this class",
            method.name,
            method.descriptor,
        );
        self.methods.push(method);
    }

    /// Find a method by exact name and descriptor
    pub fn find_method(
        &self,
        name: &UnqualifiedName,
        descriptor: &MethodDescriptor,
    ) -> Option<&Method> {
        self.methods
            .iter()
            .find(|method| method.name == *name && method.descriptor == *descriptor)
    }

    /// Check whether any method (of any descriptor) uses the given name
    pub fn has_method_named(&self, name: &UnqualifiedName) -> bool {
        self.methods.iter().any(|method| method.name == *name)
    }
}
