//! Simulate how injection annotations rewrite a target class
//!
//! ### Simple example
//!
//! Suppose a mixin class carries a static handler `int onValue(int v)`
//! annotated with `@ModifyVariable(method = "update", at = @At("STORE"))`.
//! Previewing it against a target class rewrites `update` so that every
//! local store is immediately followed by a reload, a call to the (copied)
//! handler, and a store of its result - and installs the copied handler on
//! the target class:
//!
//! ```
//! use mixvis::inject::{apply_annotation, Annotation, AnnotationValue};
//! use mixvis::jvm::code::{InsnKind, StorableType, VarAccess, ConstValue};
//! use mixvis::jvm::model::{Class, Method};
//! use mixvis::jvm::{BinaryName, MethodAccessFlags, MethodDescriptor, Name, ParseDescriptor,
//!                   UnqualifiedName};
//!
//! // Target class with `void update()` storing a constant into slot 1
//! let mut target = Class::new(BinaryName::from_string("net/example/Target".into()).unwrap());
//! let mut update = Method::new(
//!     UnqualifiedName::from_string("update".into()).unwrap(),
//!     MethodDescriptor::parse("()V").unwrap(),
//!     MethodAccessFlags::PUBLIC,
//! );
//! update.max_locals = 2;
//! update.code.push(InsnKind::Const(ConstValue::Int(3)));
//! update.code.push(InsnKind::Var {
//!     access: VarAccess::Store, ty: StorableType::Int, slot: 1,
//! });
//! update.code.push(InsnKind::Return(None));
//! target.add_method(update);
//!
//! // Mixin class with the annotated handler
//! let mixin = Class::new(BinaryName::from_string("net/example/MixinTarget".into()).unwrap());
//! let handler = Method::new(
//!     UnqualifiedName::from_string("onValue".into()).unwrap(),
//!     MethodDescriptor::parse("(I)I").unwrap(),
//!     MethodAccessFlags::PRIVATE | MethodAccessFlags::STATIC,
//! );
//! let annotation = Annotation::new("Lorg/spongepowered/asm/mixin/injection/ModifyVariable;")
//!     .with("method", AnnotationValue::Str("update".into()))
//!     .with("at", AnnotationValue::Nested(
//!         Annotation::new("LAt;").with("value", AnnotationValue::Str("STORE".into())),
//!     ));
//!
//! assert!(apply_annotation(&mut target, &mixin, &handler, &annotation));
//! assert_eq!(target.methods.len(), 2); // `update` plus the copied handler
//! ```
//!
//! Everything is best effort: references that resolve to nothing, anchors a
//! strategy does not implement, and type mismatches skip the affected piece
//! of work and never abort the rest (see [`Injector`]).

pub mod annotation;
mod copy;
mod handlers;
mod matcher;
mod slice;

pub use annotation::{Annotation, AnnotationValue};
pub use copy::{copy_method_to_target, remap_owners};
pub use handlers::Injector;
pub use matcher::{find_target_methods, InsnTarget, MethodRef};
pub use slice::{resolve_slice, SliceRange};

use crate::jvm::model::{Class, Method};
use crate::jvm::{MethodDescriptor, UnqualifiedName};

/// Apply one annotated mixin method to the target class
///
/// Dispatches to the strategy recognizing the annotation's descriptor and
/// returns whether one was found. The mixin class is never mutated.
pub fn apply_annotation(
    target: &mut Class,
    mixin: &Class,
    source: &Method,
    annotation: &Annotation,
) -> bool {
    for injector in Injector::TABLE {
        if injector.can_handle(&annotation.descriptor) {
            log::trace!(
                "Applying {:?} from {:?}.{:?} to {:?}",
                injector,
                mixin.name,
                source.name,
                target.name
            );
            injector.apply(target, mixin, source, annotation);
            return true;
        }
    }
    log::debug!("No strategy handles {}", annotation.descriptor);
    false
}

/// Annotations attached to one method of a mixin class
#[derive(Clone, Debug)]
pub struct MethodAnnotations {
    pub method: UnqualifiedName,
    pub descriptor: MethodDescriptor,
    pub annotations: Vec<Annotation>,
}

/// Apply every annotation of a mixin class to the target class
///
/// `annotations` associates each annotated mixin method (by name and
/// descriptor) with its injection annotations, in the order they should be
/// applied. Entries naming no method of the mixin are skipped.
pub fn preview(target: &mut Class, mixin: &Class, annotations: &[MethodAnnotations]) {
    for entry in annotations {
        let source = match mixin.find_method(&entry.method, &entry.descriptor) {
            Some(source) => source,
            None => {
                log::debug!(
                    "Mixin {:?} has no method {:?}{:?}; skipping its annotations",
                    mixin.name,
                    entry.method,
                    entry.descriptor
                );
                continue;
            }
        };
        for annotation in &entry.annotations {
            apply_annotation(target, mixin, source, annotation);
        }
    }
}
