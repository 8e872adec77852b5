//! `@ModifyConstant`: route literal constants through a handler method
//!
//! The mixin handler is copied into the target class once. Within each
//! matched target method's slice, every literal push whose type matches the
//! handler's return type gets a call to the copied handler appended right
//! after it: the literal stays on the stack as the call argument, so the
//! region still nets out to one value of the same computed type.

use crate::inject::annotation::Annotation;
use crate::inject::copy::copy_method_to_target;
use crate::inject::matcher::find_target_methods;
use crate::inject::slice::resolve_slice;
use crate::jvm::code::{ConstValue, InsnKind, InvokeKind, StorableType, VarAccess};
use crate::jvm::model::{Class, Method};
use crate::jvm::{BinaryName, FieldType, RefType};

pub(crate) fn apply(target: &mut Class, mixin: &Class, source: &Method, annotation: &Annotation) {
    let return_type = match &source.descriptor.return_type {
        Some(return_type) => return_type.clone(),
        None => {
            log::debug!(
                "@ModifyConstant handler {:?} returns void; nothing to substitute",
                source.name
            );
            return;
        }
    };

    let copied_name = copy_method_to_target(target, mixin, source);
    let target_class_name = target.name.clone();
    let is_static = source.is_static();

    for reference in annotation.str_list("method") {
        for index in find_target_methods(target, reference) {
            let range = resolve_slice(&target.methods[index], annotation);

            // Collect eligible constants first; insertion below shifts
            // positions but never invalidates ids
            let eligible: Vec<_> = range
                .iter_within(&target.methods[index].code)
                .filter_map(|insn| match &insn.kind {
                    InsnKind::Const(value) if constant_type_matches(value, &return_type) => {
                        Some(insn.id)
                    }
                    _ => None,
                })
                .collect();

            let method = &mut target.methods[index];
            for constant in eligible {
                let mut call_site = vec![];
                if !is_static {
                    // Receiver must sit beneath the literal
                    call_site.push(InsnKind::Var {
                        access: VarAccess::Load,
                        ty: StorableType::Reference,
                        slot: 0,
                    });
                    call_site.push(InsnKind::Swap);
                }
                call_site.push(InsnKind::Invoke {
                    kind: if is_static {
                        InvokeKind::Static
                    } else {
                        InvokeKind::Virtual
                    },
                    owner: target_class_name.clone(),
                    name: copied_name.clone(),
                    descriptor: source.descriptor.clone(),
                });
                method.code.insert_after(constant, call_site);
            }
        }
    }
}

/// Whether a literal's type matches the handler's declared return type
///
/// Integral-family literals unify with `int`/`byte`/`short`; `float`,
/// `long`, and `double` require their exact family; a string literal
/// requires the return type `java/lang/String`, and a class literal matches
/// any other object return type. `boolean` and `char` return types match no
/// literal at all.
fn constant_type_matches(value: &ConstValue, return_type: &FieldType) -> bool {
    use crate::jvm::BaseType;
    match return_type {
        FieldType::Base(BaseType::Int | BaseType::Byte | BaseType::Short) => {
            matches!(value, ConstValue::Int(_))
        }
        FieldType::Base(BaseType::Float) => matches!(value, ConstValue::Float(_)),
        FieldType::Base(BaseType::Long) => matches!(value, ConstValue::Long(_)),
        FieldType::Base(BaseType::Double) => matches!(value, ConstValue::Double(_)),
        FieldType::Ref(RefType::Object(class)) if *class == BinaryName::JAVA_LANG_STRING => {
            matches!(value, ConstValue::Str(_))
        }
        FieldType::Ref(RefType::Object(_)) => matches!(value, ConstValue::ClassRef(_)),
        _ => false,
    }
}
