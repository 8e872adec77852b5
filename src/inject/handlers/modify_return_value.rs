//! `@ModifyReturnValue`: inline the handler body at every return site
//!
//! Only the `TAIL`/`RETURN` anchor kinds are implemented; any other anchor
//! makes this strategy a no-op. The handler body is not installed as a
//! separate method - a fresh clone of it (fresh labels, cloned exception
//! entries) is inlined directly before each return instruction, after the
//! original return value has been parked in a newly allocated local slot and
//! pushed back (preceded by the receiver for a non-static handler). Each
//! return site gets its own slot and its own clone; nothing is shared
//! between sites.
//!
//! The dataflow between the reloaded value and the inlined body is kept
//! exactly as sequenced above; the inlined code is expected to leave the
//! replacement value on the stack for the original return instruction.

use crate::inject::annotation::Annotation;
use crate::inject::copy::remap_owners;
use crate::inject::matcher::find_target_methods;
use crate::jvm::code::{clone_body, InsnKind, InsnList, StorableType, VarAccess};
use crate::jvm::model::{Class, Method};

pub(crate) fn apply(target: &mut Class, mixin: &Class, source: &Method, annotation: &Annotation) {
    // An absent anchor means RETURN
    let at_kind = annotation.at_kind().unwrap_or("RETURN");
    if at_kind != "TAIL" && at_kind != "RETURN" {
        log::debug!(
            "@ModifyReturnValue anchor {} not implemented; skipping {:?}",
            at_kind,
            source.name
        );
        return;
    }

    let target_class_name = target.name.clone();
    let is_static = source.is_static();

    // Handler body with self-references already pointing at the target class;
    // every injection site below clones this prepared form
    let mut prepared_code = InsnList::new();
    let prepared = clone_body(&source.code, &source.exception_table, &mut prepared_code);
    prepared_code.append(prepared.insns);
    remap_owners(&mut prepared_code, &mixin.name, &target_class_name);
    let prepared_exceptions = prepared.exception_table;

    for reference in annotation.str_list("method") {
        for index in find_target_methods(target, reference) {
            // Every return instruction in the method is a TAIL site; the
            // slice deliberately plays no part here
            let return_sites: Vec<(_, Option<StorableType>)> = target.methods[index]
                .code
                .iter()
                .filter_map(|insn| match insn.kind {
                    InsnKind::Return(value_type) => Some((insn.id, value_type)),
                    _ => None,
                })
                .collect();

            let method = &mut target.methods[index];
            for (return_site, value_type) in return_sites {
                // Fresh slot range per site, past everything used so far
                let slot = method.max_locals;
                method.max_locals += source.max_locals;

                let mut prelude = vec![];
                if let Some(ty) = value_type {
                    prelude.push(InsnKind::Var {
                        access: VarAccess::Store,
                        ty,
                        slot,
                    });
                }
                if !is_static {
                    prelude.push(InsnKind::Var {
                        access: VarAccess::Load,
                        ty: StorableType::Reference,
                        slot: 0,
                    });
                }
                if let Some(ty) = value_type {
                    prelude.push(InsnKind::Var {
                        access: VarAccess::Load,
                        ty,
                        slot,
                    });
                }
                method.code.insert_before(return_site, prelude);

                let inlined = clone_body(&prepared_code, &prepared_exceptions, &mut method.code);
                method.code.splice_before(return_site, inlined.insns);
                method.exception_table.extend(inlined.exception_table);
            }
        }
    }
}
