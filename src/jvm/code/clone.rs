use super::{ExceptionHandler, Insn, InsnId, InsnKind, InsnList};
use std::collections::HashMap;

/// An instruction sequence plus exception entries, cloned and relabeled
///
/// The ids inside were allocated from the destination list handed to
/// [`clone_body`]; splice the instructions in with
/// [`InsnList::splice_before`] (or [`InsnList::append`] for a fresh body)
/// and merge the exception entries into the destination's table.
#[derive(Debug)]
pub struct ClonedBody {
    pub insns: Vec<Insn>,
    pub exception_table: Vec<ExceptionHandler>,
}

/// Deep-copy an instruction sequence and its exception entries
///
/// Every label in `code` maps to exactly one fresh label in the clone, and
/// every jump target and exception-entry label is remapped through that one
/// shared table - a label referenced both by a jump and by an exception
/// entry clones to the same new label. Calling this twice yields two fully
/// independent clones.
///
/// All new ids are drawn from `dest`'s allocator, so the result can only be
/// placed into `dest`.
pub fn clone_body(
    code: &InsnList,
    exception_table: &[ExceptionHandler],
    dest: &mut InsnList,
) -> ClonedBody {
    // First pass: reserve a fresh id for every label in the sequence
    let mut label_map: HashMap<InsnId, InsnId> = HashMap::new();
    for insn in code {
        if let InsnKind::Label = insn.kind {
            label_map.insert(insn.id, dest.alloc_id());
        }
    }

    let remap = |id: InsnId| -> InsnId {
        debug_assert!(label_map.contains_key(&id), "dangling label reference");
        *label_map.get(&id).unwrap_or(&id)
    };

    // Second pass: copy instructions, remapping label references
    let mut insns = Vec::with_capacity(code.len());
    for insn in code {
        let (id, kind) = match &insn.kind {
            InsnKind::Label => (label_map[&insn.id], InsnKind::Label),
            InsnKind::Jump { target, condition } => (
                dest.alloc_id(),
                InsnKind::Jump {
                    target: remap(*target),
                    condition: *condition,
                },
            ),
            other => (dest.alloc_id(), other.clone()),
        };
        insns.push(Insn { id, kind });
    }

    // Exception entries go through the same label table
    let exception_table = exception_table
        .iter()
        .map(|entry| ExceptionHandler {
            start: remap(entry.start),
            end: remap(entry.end),
            handler: remap(entry.handler),
            catch_type: entry.catch_type.clone(),
        })
        .collect();

    ClonedBody {
        insns,
        exception_table,
    }
}
