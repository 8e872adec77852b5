//! Relocating a mixin method into the target class
//!
//! A handler method written inside a mixin class refers to its own members
//! through the mixin's name. Once the body physically lives in the target
//! class those self-references must point at the new home, otherwise the
//! injected call sites would call back into a class that does not exist in
//! the previewed output.

use crate::jvm::code::{clone_body, InsnKind, InsnList};
use crate::jvm::model::{Class, Method};
use crate::jvm::{BinaryName, MethodAccessFlags, Name, UnqualifiedName};

/// Rewrite member owners equal to `from` into `to`
///
/// Applies to method calls and field accesses; owners naming any other class
/// are left untouched.
pub fn remap_owners(code: &mut InsnList, from: &BinaryName, to: &BinaryName) {
    for insn in code.iter_mut() {
        match &mut insn.kind {
            InsnKind::Invoke { owner, .. } | InsnKind::Field { owner, .. } if *owner == *from => {
                *owner = to.clone();
            }
            _ => {}
        }
    }
}

/// Copy a mixin method into the target class, returning its name there
///
/// Idempotent: if the target already holds a method with the source's
/// (name, descriptor), or an earlier copy under the synthesized name, that
/// existing name is returned and nothing is added. Otherwise the source is
/// deep-copied (instructions and exception table, with fresh labels), its
/// self-references are remapped to the target class, its access is coerced
/// to non-private so injected call sites can reach it, and the copy is
/// appended to the target under a name that collides with no existing
/// method.
pub fn copy_method_to_target(
    target: &mut Class,
    mixin: &Class,
    source: &Method,
) -> UnqualifiedName {
    if let Some(existing) = target.find_method(&source.name, &source.descriptor) {
        return existing.name.clone();
    }

    // Deterministic candidate names, so a repeated copy request finds the
    // method installed by the first one
    let mut candidate = derived_name(&source.name, 1);
    let mut attempt = 2;
    loop {
        if let Some(existing) = target.find_method(&candidate, &source.descriptor) {
            return existing.name.clone();
        }
        if !target.has_method_named(&candidate) {
            break;
        }
        candidate = derived_name(&source.name, attempt);
        attempt += 1;
    }

    let mut code = InsnList::new();
    let cloned = clone_body(&source.code, &source.exception_table, &mut code);
    code.append(cloned.insns);
    remap_owners(&mut code, &mixin.name, &target.name);

    let copied = Method {
        name: candidate.clone(),
        descriptor: source.descriptor.clone(),
        access_flags: (source.access_flags - MethodAccessFlags::PRIVATE)
            | MethodAccessFlags::PUBLIC,
        exceptions: source.exceptions.clone(),
        max_locals: source.max_locals,
        max_stack: source.max_stack,
        code,
        exception_table: cloned.exception_table,
    };
    log::debug!(
        "Copied {:?}.{:?} into {:?} as {:?}",
        mixin.name,
        source.name,
        target.name,
        candidate
    );
    target.add_method(copied);
    candidate
}

fn derived_name(source: &UnqualifiedName, attempt: u32) -> UnqualifiedName {
    let suffix = if attempt <= 1 {
        String::from("$preview")
    } else {
        format!("$preview{}", attempt)
    };
    // The suffix contains no illegal name characters, so this cannot fail
    source.concat(&UnqualifiedName::from_string(suffix).unwrap())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jvm::code::{ConstValue, InvokeKind, StorableType, VarAccess};
    use crate::jvm::{MethodDescriptor, ParseDescriptor};

    fn name(raw: &str) -> UnqualifiedName {
        UnqualifiedName::from_string(String::from(raw)).unwrap()
    }

    fn class_name(raw: &str) -> BinaryName {
        BinaryName::from_string(String::from(raw)).unwrap()
    }

    fn mixin_with_self_call() -> (Class, Method) {
        let mixin = Class::new(class_name("net/example/MixinTarget"));
        let mut source = Method::new(
            name("onValue"),
            MethodDescriptor::parse("(I)I").unwrap(),
            MethodAccessFlags::PRIVATE | MethodAccessFlags::STATIC,
        );
        source.code.push(InsnKind::Var {
            access: VarAccess::Load,
            ty: StorableType::Int,
            slot: 0,
        });
        source.code.push(InsnKind::Invoke {
            kind: InvokeKind::Static,
            owner: mixin.name.clone(),
            name: name("helper"),
            descriptor: MethodDescriptor::parse("(I)I").unwrap(),
        });
        source.code.push(InsnKind::Invoke {
            kind: InvokeKind::Virtual,
            owner: class_name("net/example/World"),
            name: name("unrelated"),
            descriptor: MethodDescriptor::parse("(I)I").unwrap(),
        });
        source.code.push(InsnKind::Return(Some(StorableType::Int)));
        (mixin, source)
    }

    #[test]
    fn copy_remaps_self_references_only() {
        let (mixin, source) = mixin_with_self_call();
        let mut target = Class::new(class_name("net/example/Target"));

        let copied = copy_method_to_target(&mut target, &mixin, &source);
        let method = target
            .find_method(&copied, &source.descriptor)
            .expect("copied method installed");

        let owners: Vec<&str> = method
            .code
            .iter()
            .filter_map(|insn| match &insn.kind {
                InsnKind::Invoke { owner, .. } => Some(owner.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(owners, vec!["net/example/Target", "net/example/World"]);
    }

    #[test]
    fn copy_coerces_access_to_non_private() {
        let (mixin, source) = mixin_with_self_call();
        let mut target = Class::new(class_name("net/example/Target"));

        let copied = copy_method_to_target(&mut target, &mixin, &source);
        let method = target.find_method(&copied, &source.descriptor).unwrap();
        assert!(method.access_flags.contains(MethodAccessFlags::PUBLIC));
        assert!(!method.access_flags.contains(MethodAccessFlags::PRIVATE));
        assert!(method.access_flags.contains(MethodAccessFlags::STATIC));
    }

    #[test]
    fn repeated_copy_is_idempotent() {
        let (mixin, source) = mixin_with_self_call();
        let mut target = Class::new(class_name("net/example/Target"));

        let first = copy_method_to_target(&mut target, &mixin, &source);
        let methods_after_first = target.methods.len();
        let second = copy_method_to_target(&mut target, &mixin, &source);

        assert_eq!(first, second);
        assert_eq!(target.methods.len(), methods_after_first);
    }

    #[test]
    fn existing_identity_in_target_short_circuits() {
        let (mixin, source) = mixin_with_self_call();
        let mut target = Class::new(class_name("net/example/Target"));
        target.add_method(Method::new(
            source.name.clone(),
            source.descriptor.clone(),
            MethodAccessFlags::PUBLIC,
        ));

        let copied = copy_method_to_target(&mut target, &mixin, &source);
        assert_eq!(copied, source.name);
        assert_eq!(target.methods.len(), 1);
    }

    #[test]
    fn name_collisions_bump_the_suffix() {
        let (mixin, source) = mixin_with_self_call();
        let mut target = Class::new(class_name("net/example/Target"));
        // Occupy the first candidate name with an unrelated descriptor
        target.add_method(Method::new(
            name("onValue$preview"),
            MethodDescriptor::parse("()V").unwrap(),
            MethodAccessFlags::PUBLIC,
        ));

        let copied = copy_method_to_target(&mut target, &mixin, &source);
        assert_eq!(copied, name("onValue$preview2"));
    }

    #[test]
    fn copied_body_shares_no_ids_with_source() {
        let (mixin, mut source) = mixin_with_self_call();
        source.code.push(InsnKind::Const(ConstValue::Int(5)));
        let mut target = Class::new(class_name("net/example/Target"));

        let copied = copy_method_to_target(&mut target, &mixin, &source);
        let method = target.find_method(&copied, &source.descriptor).unwrap();
        assert_eq!(method.code.len(), source.code.len());
    }
}
