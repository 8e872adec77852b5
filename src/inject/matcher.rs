//! Resolution of textual method and instruction references
//!
//! Two reference syntaxes are consumed here:
//!
//!   - a target-method reference: a bare method name (`"update"`) or a name
//!     plus descriptor (`"update(I)V"`). Name-only references match every
//!     overload ("loose" matching); callers are expected to process all of
//!     the matches, not just the first.
//!
//!   - an instruction-target reference: an owner+name+descriptor triple
//!     identifying a call site, in either the `Lfoo/Bar;baz(I)V` or the
//!     `foo/Bar.baz(I)V` spelling. Matching is exact, no wildcards.
//!
//! A reference that resolves to nothing is not an error - callers skip the
//! annotation (or the candidate instruction) and move on.

use crate::jvm::code::InsnKind;
use crate::jvm::model::Class;
use crate::jvm::{BinaryName, MethodDescriptor, Name, ParseDescriptor, UnqualifiedName};

/// Parsed target-method reference
#[derive(Clone, PartialEq, Debug)]
pub struct MethodRef {
    pub name: String,

    /// `None` means the reference was name-only and matches any overload
    pub descriptor: Option<MethodDescriptor>,
}

impl MethodRef {
    /// Parse a method reference; `None` if the string is malformed
    pub fn parse(reference: &str) -> Option<MethodRef> {
        match reference.find('(') {
            None => Some(MethodRef {
                name: reference.to_string(),
                descriptor: None,
            }),
            Some(paren) => {
                let descriptor = match MethodDescriptor::parse(&reference[paren..]) {
                    Ok(descriptor) => descriptor,
                    Err(err) => {
                        log::debug!("Malformed method reference '{}': {}", reference, err);
                        return None;
                    }
                };
                Some(MethodRef {
                    name: reference[..paren].to_string(),
                    descriptor: Some(descriptor),
                })
            }
        }
    }
}

/// Indices of all methods in `class` matching the textual reference
///
/// Returns indices (not references) so callers can go on to mutate the
/// matched methods one at a time.
pub fn find_target_methods(class: &Class, reference: &str) -> Vec<usize> {
    let parsed = match MethodRef::parse(reference) {
        Some(parsed) => parsed,
        None => return vec![],
    };
    let matches: Vec<usize> = class
        .methods
        .iter()
        .enumerate()
        .filter(|(_, method)| {
            method.name.as_str() == parsed.name
                && parsed
                    .descriptor
                    .as_ref()
                    .map_or(true, |descriptor| method.descriptor == *descriptor)
        })
        .map(|(index, _)| index)
        .collect();
    if matches.is_empty() {
        log::debug!(
            "Reference '{}' matches no method in {:?}",
            reference,
            class.name
        );
    }
    matches
}

/// Parsed instruction-target reference (a call site)
#[derive(Clone, PartialEq, Debug)]
pub struct InsnTarget {
    pub owner: BinaryName,
    pub name: UnqualifiedName,
    pub descriptor: MethodDescriptor,
}

impl InsnTarget {
    /// Parse an instruction-target reference; `None` if malformed
    pub fn parse(reference: &str) -> Option<InsnTarget> {
        let paren = reference.find('(')?;
        let (member, descriptor) = reference.split_at(paren);

        // `Lfoo/Bar;baz` or `foo/Bar.baz`
        let (owner, name) = if let Some(rest) = member.strip_prefix('L') {
            let semi = rest.find(';')?;
            (&rest[..semi], &rest[semi + 1..])
        } else {
            let dot = member.rfind('.')?;
            (&member[..dot], &member[dot + 1..])
        };

        let parsed = (|| -> Result<InsnTarget, String> {
            Ok(InsnTarget {
                owner: BinaryName::from_string(owner.to_string())?,
                name: UnqualifiedName::from_string(name.to_string())?,
                descriptor: MethodDescriptor::parse(descriptor).map_err(|err| err.to_string())?,
            })
        })();
        match parsed {
            Ok(target) => Some(target),
            Err(err) => {
                log::debug!("Malformed instruction target '{}': {}", reference, err);
                None
            }
        }
    }

    /// Exact owner+name+descriptor equality against a method call
    pub fn matches(&self, kind: &InsnKind) -> bool {
        match kind {
            InsnKind::Invoke {
                owner,
                name,
                descriptor,
                ..
            } => *owner == self.owner && *name == self.name && *descriptor == self.descriptor,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jvm::code::InvokeKind;
    use crate::jvm::model::Method;
    use crate::jvm::MethodAccessFlags;

    fn class_with_overloads() -> Class {
        let mut class =
            Class::new(BinaryName::from_string(String::from("net/example/Target")).unwrap());
        for desc in ["()V", "(I)V", "(Ljava/lang/String;)V"] {
            class.add_method(Method::new(
                UnqualifiedName::from_string(String::from("update")).unwrap(),
                MethodDescriptor::parse(desc).unwrap(),
                MethodAccessFlags::PUBLIC,
            ));
        }
        class.add_method(Method::new(
            UnqualifiedName::from_string(String::from("tick")).unwrap(),
            MethodDescriptor::parse("()V").unwrap(),
            MethodAccessFlags::PUBLIC,
        ));
        class
    }

    #[test]
    fn name_only_reference_matches_every_overload() {
        let class = class_with_overloads();
        assert_eq!(find_target_methods(&class, "update"), vec![0, 1, 2]);
    }

    #[test]
    fn qualified_reference_matches_one_overload() {
        let class = class_with_overloads();
        assert_eq!(find_target_methods(&class, "update(I)V"), vec![1]);
    }

    #[test]
    fn unresolved_reference_matches_nothing() {
        let class = class_with_overloads();
        assert!(find_target_methods(&class, "missing").is_empty());
        assert!(find_target_methods(&class, "update(bogus").is_empty());
    }

    #[test]
    fn insn_target_accepts_both_spellings() {
        let expected = InsnTarget {
            owner: BinaryName::from_string(String::from("net/example/World")).unwrap(),
            name: UnqualifiedName::from_string(String::from("getTime")).unwrap(),
            descriptor: MethodDescriptor::parse("()J").unwrap(),
        };
        assert_eq!(
            InsnTarget::parse("Lnet/example/World;getTime()J"),
            Some(expected.clone())
        );
        assert_eq!(
            InsnTarget::parse("net/example/World.getTime()J"),
            Some(expected)
        );
        assert_eq!(InsnTarget::parse("nonsense"), None);
    }

    #[test]
    fn insn_target_matching_is_exact() {
        let target = InsnTarget::parse("Lnet/example/World;getTime()J").unwrap();
        let call = InsnKind::Invoke {
            kind: InvokeKind::Virtual,
            owner: BinaryName::from_string(String::from("net/example/World")).unwrap(),
            name: UnqualifiedName::from_string(String::from("getTime")).unwrap(),
            descriptor: MethodDescriptor::parse("()J").unwrap(),
        };
        let other_owner = InsnKind::Invoke {
            kind: InvokeKind::Virtual,
            owner: BinaryName::from_string(String::from("net/example/Clock")).unwrap(),
            name: UnqualifiedName::from_string(String::from("getTime")).unwrap(),
            descriptor: MethodDescriptor::parse("()J").unwrap(),
        };
        assert!(target.matches(&call));
        assert!(!target.matches(&other_owner));
        assert!(!target.matches(&InsnKind::Pop));
    }
}
