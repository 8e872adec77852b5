//! `@ModifyArg`: mark matched call sites, without substituting anything
//!
//! This strategy is intentionally a best-effort simulation. Replacing one
//! argument of an arbitrary call would mean spilling and reordering the
//! stack around the call site; instead of approximating that badly, the
//! preview inserts a side-effect-free marker (push a descriptive string,
//! discard it) right before each matched call so the injection point is at
//! least visible in the output. Do not "complete" this into real argument
//! replacement.

use crate::inject::annotation::Annotation;
use crate::inject::matcher::{find_target_methods, InsnTarget};
use crate::jvm::code::{ConstValue, InsnKind};
use crate::jvm::model::{Class, Method};
use crate::jvm::Name;

pub(crate) fn apply(target: &mut Class, source: &Method, annotation: &Annotation) {
    let pattern = match annotation.at_target().and_then(InsnTarget::parse) {
        Some(pattern) => pattern,
        None => {
            log::debug!(
                "@ModifyArg on {:?} has no usable target pattern; skipping",
                source.name
            );
            return;
        }
    };
    let index = annotation.int("index").unwrap_or(0);
    let marker = format!(
        ">>> @ModifyArg(index={}) applied here calling {} <<<",
        index,
        source.name.as_str()
    );

    for reference in annotation.str_list("method") {
        for method_index in find_target_methods(target, reference) {
            // No slice restriction for this strategy: the whole body is scanned
            let call_sites: Vec<_> = target.methods[method_index]
                .code
                .iter()
                .filter(|insn| pattern.matches(&insn.kind))
                .map(|insn| insn.id)
                .collect();

            let method = &mut target.methods[method_index];
            for call_site in call_sites {
                method.code.insert_before(
                    call_site,
                    [
                        InsnKind::Const(ConstValue::Str(marker.clone())),
                        InsnKind::Pop,
                    ],
                );
            }
        }
    }
}
