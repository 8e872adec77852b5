//! Slice resolution: bounding the instruction range a strategy scans
//!
//! An annotation may carry a nested `slice` annotation whose `from` and `to`
//! attributes are `@At`-style anchors (an instruction-target pattern plus an
//! optional ordinal). The resolved range starts at the `from` match
//! (inclusive) and stops at the `to` match (exclusive). Either side degrades
//! to unbounded when the anchor is absent or matches nothing - a slice never
//! makes resolution fail.

use crate::inject::annotation::{Annotation, AnnotationValue};
use crate::inject::matcher::InsnTarget;
use crate::jvm::code::{Insn, InsnId, InsnList};
use crate::jvm::model::Method;

/// Bounded sub-range of one method's instruction sequence
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct SliceRange {
    /// Inclusive start; `None` scans from the first instruction
    pub start: Option<InsnId>,

    /// Exclusive end; `None` scans through the last instruction
    pub end: Option<InsnId>,
}

impl SliceRange {
    /// The whole method body
    pub fn unbounded() -> SliceRange {
        SliceRange {
            start: None,
            end: None,
        }
    }

    /// Iterate the instructions inside the range, in sequence order
    ///
    /// The instruction at `end` is never yielded.
    pub fn iter_within<'a>(&self, code: &'a InsnList) -> impl Iterator<Item = &'a Insn> + 'a {
        let start = self.start;
        let end = self.end;
        let mut started = start.is_none();
        code.iter()
            .filter(move |insn| {
                if Some(insn.id) == start {
                    started = true;
                }
                started
            })
            .take_while(move |insn| Some(insn.id) != end)
    }
}

/// Resolve the slice of an annotation against a target method
pub fn resolve_slice(method: &Method, annotation: &Annotation) -> SliceRange {
    let slice = match annotation.nested("slice") {
        Some(slice) => slice,
        None => return SliceRange::unbounded(),
    };
    SliceRange {
        start: resolve_anchor(method, slice.nested("from")),
        end: resolve_anchor(method, slice.nested("to")),
    }
}

/// Locate the instruction an anchor selects, if any
///
/// Scans the body in sequence order for instructions matching the anchor's
/// `target` pattern and picks the one at the anchor's ordinal (first match by
/// default). A pattern that matches nothing leaves the bound absent.
fn resolve_anchor(method: &Method, anchor: Option<&Annotation>) -> Option<InsnId> {
    let anchor = anchor?;
    let pattern = match anchor.get("target") {
        Some(AnnotationValue::Str(value)) => value.as_str(),
        _ => return None,
    };
    let target = InsnTarget::parse(pattern)?;
    let ordinal = anchor.ordinal().unwrap_or(0) as usize;

    let found = method
        .code
        .iter()
        .filter(|insn| target.matches(&insn.kind))
        .nth(ordinal)
        .map(|insn| insn.id);
    if found.is_none() {
        log::debug!(
            "Slice anchor {:?} (ordinal {}) matches nothing in {:?}; bound left open",
            target,
            ordinal,
            method.name
        );
    }
    found
}
