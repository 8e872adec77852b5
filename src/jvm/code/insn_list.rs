use super::{Insn, InsnId, InsnKind};

/// Ordered, mutable instruction sequence with stable identities
///
/// The list owns the id allocator for its body: every instruction that ever
/// lives in this list got its id from [`alloc_id`](InsnList::alloc_id), so
/// ids stay unique across arbitrary insertions and removals. Lookups by id
/// are linear scans; bodies are small and the preview only rewrites them
/// once, so nothing fancier is warranted.
#[derive(Clone, Default, Debug)]
pub struct InsnList {
    insns: Vec<Insn>,
    next_id: u32,
}

impl InsnList {
    pub fn new() -> InsnList {
        InsnList::default()
    }

    /// Allocate a fresh id, not yet attached to any instruction
    ///
    /// Useful for forward references: allocate the id of a label first, emit
    /// jumps to it, then append the label itself under the reserved id.
    pub fn alloc_id(&mut self) -> InsnId {
        let id = InsnId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Append an instruction, allocating its id
    pub fn push(&mut self, kind: InsnKind) -> InsnId {
        let id = self.alloc_id();
        self.insns.push(Insn { id, kind });
        id
    }

    /// Append instructions whose ids were already allocated from this list
    pub fn append(&mut self, insns: Vec<Insn>) {
        for insn in &insns {
            debug_assert!(insn.id.0 < self.next_id, "id not from this list");
            debug_assert!(self.position(insn.id).is_none(), "id already placed");
        }
        self.insns.extend(insns);
    }

    pub fn len(&self) -> usize {
        self.insns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.insns.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Insn> {
        self.insns.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Insn> {
        self.insns.iter_mut()
    }

    /// Position of an instruction in the current sequence, if present
    pub fn position(&self, id: InsnId) -> Option<usize> {
        self.insns.iter().position(|insn| insn.id == id)
    }

    pub fn get(&self, id: InsnId) -> Option<&Insn> {
        self.insns.iter().find(|insn| insn.id == id)
    }

    pub fn first(&self) -> Option<&Insn> {
        self.insns.first()
    }

    /// Insert new instructions immediately before `at`, allocating their ids
    ///
    /// Does nothing if `at` is no longer in the list.
    pub fn insert_before(&mut self, at: InsnId, kinds: impl IntoIterator<Item = InsnKind>) {
        if let Some(index) = self.position(at) {
            let insns: Vec<Insn> = kinds
                .into_iter()
                .map(|kind| Insn {
                    id: self.alloc_id(),
                    kind,
                })
                .collect();
            self.insns.splice(index..index, insns);
        }
    }

    /// Insert new instructions immediately after `at`, allocating their ids
    ///
    /// Does nothing if `at` is no longer in the list.
    pub fn insert_after(&mut self, at: InsnId, kinds: impl IntoIterator<Item = InsnKind>) {
        if let Some(index) = self.position(at) {
            let insns: Vec<Insn> = kinds
                .into_iter()
                .map(|kind| Insn {
                    id: self.alloc_id(),
                    kind,
                })
                .collect();
            self.insns.splice(index + 1..index + 1, insns);
        }
    }

    /// Insert already-id-carrying instructions (eg. a cloned body) before `at`
    pub fn splice_before(&mut self, at: InsnId, insns: Vec<Insn>) {
        if let Some(index) = self.position(at) {
            for insn in &insns {
                debug_assert!(insn.id.0 < self.next_id, "id not from this list");
            }
            self.insns.splice(index..index, insns);
        }
    }

    /// Remove the instruction with the given id, returning it
    pub fn remove(&mut self, id: InsnId) -> Option<Insn> {
        let index = self.position(id)?;
        Some(self.insns.remove(index))
    }
}

impl<'a> IntoIterator for &'a InsnList {
    type Item = &'a Insn;
    type IntoIter = std::slice::Iter<'a, Insn>;

    fn into_iter(self) -> Self::IntoIter {
        self.insns.iter()
    }
}
