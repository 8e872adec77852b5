//! `@ModifyVariable`: route local variable reads or writes through a handler
//!
//! The anchor sub-kind picks what to match: `STORE` wraps stores, `LOAD`
//! wraps loads. At a matched store, the inserted sequence runs right after
//! it - reload the just-stored slot, call the copied handler, store the
//! result back. At a matched load the same sequence runs right before it,
//! so the slot is pre-processed before the original load executes. An
//! explicit ordinal rewrites only that occurrence; an unset ordinal rewrites
//! every occurrence in the slice.

use crate::inject::annotation::Annotation;
use crate::inject::copy::copy_method_to_target;
use crate::inject::matcher::find_target_methods;
use crate::inject::slice::resolve_slice;
use crate::jvm::code::{InsnKind, InvokeKind, StorableType, VarAccess};
use crate::jvm::model::{Class, Method};

pub(crate) fn apply(target: &mut Class, mixin: &Class, source: &Method, annotation: &Annotation) {
    let match_access = match annotation.at_kind() {
        Some("STORE") => VarAccess::Store,
        Some("LOAD") => VarAccess::Load,
        other => {
            log::debug!(
                "@ModifyVariable anchor {:?} is not STORE/LOAD; skipping {:?}",
                other,
                source.name
            );
            return;
        }
    };
    let handler_type = match &source.descriptor.return_type {
        Some(return_type) => StorableType::of(return_type),
        None => {
            log::debug!(
                "@ModifyVariable handler {:?} returns void; nothing to wrap",
                source.name
            );
            return;
        }
    };
    let ordinal = annotation.ordinal();

    let copied_name = copy_method_to_target(target, mixin, source);
    let target_class_name = target.name.clone();
    let is_static = source.is_static();

    for reference in annotation.str_list("method") {
        for index in find_target_methods(target, reference) {
            let range = resolve_slice(&target.methods[index], annotation);

            // Occurrence counting restarts for every target method
            let matched: Vec<_> = range
                .iter_within(&target.methods[index].code)
                .filter_map(|insn| match insn.kind {
                    InsnKind::Var { access, slot, .. } if access == match_access => {
                        Some((insn.id, slot))
                    }
                    _ => None,
                })
                .collect();
            let selected: Vec<_> = match ordinal {
                Some(ordinal) => matched.into_iter().nth(ordinal as usize).into_iter().collect(),
                None => matched,
            };

            let method = &mut target.methods[index];
            for (insn_id, slot) in selected {
                let mut wrap = vec![InsnKind::Var {
                    access: VarAccess::Load,
                    ty: handler_type,
                    slot,
                }];
                if !is_static {
                    wrap.push(InsnKind::Var {
                        access: VarAccess::Load,
                        ty: StorableType::Reference,
                        slot: 0,
                    });
                    wrap.push(InsnKind::Swap);
                }
                wrap.push(InsnKind::Invoke {
                    kind: if is_static {
                        InvokeKind::Static
                    } else {
                        InvokeKind::Virtual
                    },
                    owner: target_class_name.clone(),
                    name: copied_name.clone(),
                    descriptor: source.descriptor.clone(),
                });
                wrap.push(InsnKind::Var {
                    access: VarAccess::Store,
                    ty: handler_type,
                    slot,
                });

                match match_access {
                    VarAccess::Store => method.code.insert_after(insn_id, wrap),
                    VarAccess::Load => method.code.insert_before(insn_id, wrap),
                }
            }
        }
    }
}
