//! Rewrite strategies, one per injection annotation kind
//!
//! Each strategy decides from the annotation's type descriptor whether it
//! applies ([`Injector::can_handle`]) and then mutates the target class in
//! place ([`Injector::apply`]). Strategies never fail: an unresolved
//! reference, an anchor kind a strategy does not implement, or a type
//! mismatch just skips the affected target or candidate and continues with
//! the rest.

mod modify_arg;
mod modify_constant;
mod modify_return_value;
mod modify_variable;

use crate::inject::annotation::Annotation;
use crate::jvm::model::{Class, Method};

/// The closed set of supported injection strategies
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Injector {
    ModifyConstant,
    ModifyVariable,
    ModifyArg,
    ModifyReturnValue,
}

impl Injector {
    /// Every strategy, in dispatch order
    pub const TABLE: [Injector; 4] = [
        Injector::ModifyConstant,
        Injector::ModifyVariable,
        Injector::ModifyArg,
        Injector::ModifyReturnValue,
    ];

    /// Whether this strategy recognizes the annotation's type descriptor
    ///
    /// Substring matching on the simple annotation name, so both the Mixin
    /// and the MixinExtras descriptor spellings are recognized.
    pub fn can_handle(&self, annotation_desc: &str) -> bool {
        let simple_name = match self {
            Injector::ModifyConstant => "ModifyConstant",
            Injector::ModifyVariable => "ModifyVariable",
            Injector::ModifyArg => "ModifyArg",
            Injector::ModifyReturnValue => "ModifyReturnValue",
        };
        annotation_desc.contains(simple_name)
    }

    /// Rewrite `target` according to one annotated mixin method
    ///
    /// `source` is the annotated method of `mixin` carrying `annotation`.
    /// The mixin class is read-only; only `target` is mutated.
    pub fn apply(&self, target: &mut Class, mixin: &Class, source: &Method, annotation: &Annotation) {
        match self {
            Injector::ModifyConstant => modify_constant::apply(target, mixin, source, annotation),
            Injector::ModifyVariable => modify_variable::apply(target, mixin, source, annotation),
            Injector::ModifyArg => modify_arg::apply(target, source, annotation),
            Injector::ModifyReturnValue => {
                modify_return_value::apply(target, mixin, source, annotation)
            }
        }
    }
}
