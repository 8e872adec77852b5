use crate::jvm::{FieldAccessFlags, FieldType, UnqualifiedName};

/// Semantic representation of a field
#[derive(Clone, Debug)]
pub struct Field {
    pub name: UnqualifiedName,
    pub descriptor: FieldType,
    pub access_flags: FieldAccessFlags,
}
