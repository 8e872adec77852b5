use crate::jvm::{BaseType, BinaryName, FieldType, MethodDescriptor, UnqualifiedName};
use std::fmt;

/// Stable identity of an instruction within one method body
///
/// Jumps and exception-table entries refer to [`Label`](InsnKind::Label)
/// instructions through their id, never through positions: positions shift as
/// code is inserted, ids do not. Ids are only meaningful within the body that
/// allocated them.
#[derive(Copy, Clone, Hash, Eq, PartialEq, PartialOrd, Ord)]
pub struct InsnId(pub(crate) u32);

impl fmt::Debug for InsnId {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_fmt(format_args!("i{}", self.0))
    }
}

/// JVM computational type of a value in a local slot or on the stack
///
/// `byte`, `short`, `char`, and `boolean` all collapse into [`Int`] here,
/// matching how loads, stores, and returns treat them.
///
/// [`Int`]: StorableType::Int
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum StorableType {
    Int,
    Long,
    Float,
    Double,
    Reference,
}

impl StorableType {
    /// Computational type of a declared field type
    pub fn of(field_type: &FieldType) -> StorableType {
        match field_type {
            FieldType::Base(BaseType::Long) => StorableType::Long,
            FieldType::Base(BaseType::Float) => StorableType::Float,
            FieldType::Base(BaseType::Double) => StorableType::Double,
            FieldType::Base(_) => StorableType::Int,
            FieldType::Ref(_) => StorableType::Reference,
        }
    }
}

/// Literal constant pushed by a constant instruction
///
/// Covers the immediate push forms (`iconst_*`, `bipush`, `sipush`,
/// `lconst_*`, ...) as well as `ldc` of a string or class literal. Which
/// opcode would produce the value is irrelevant to the preview, only the
/// value and its type are.
#[derive(Clone, PartialEq, Debug)]
pub enum ConstValue {
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    Str(String),
    ClassRef(BinaryName),
}

impl ConstValue {
    pub fn storable_type(&self) -> StorableType {
        match self {
            ConstValue::Int(_) => StorableType::Int,
            ConstValue::Long(_) => StorableType::Long,
            ConstValue::Float(_) => StorableType::Float,
            ConstValue::Double(_) => StorableType::Double,
            ConstValue::Str(_) | ConstValue::ClassRef(_) => StorableType::Reference,
        }
    }
}

/// Direction of a local variable access
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum VarAccess {
    Load,
    Store,
}

/// Kind of method invocation
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum InvokeKind {
    Virtual,
    Static,
    Special,
    Interface,
}

/// Kind of field access
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum FieldAccess {
    GetField,
    PutField,
    GetStatic,
    PutStatic,
}

/// Comparison condition of a conditional jump
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[allow(clippy::upper_case_acronyms)]
pub enum OrdComparison {
    EQ,
    NE,
    LT,
    GE,
    GT,
    LE,
}

/// One instruction in a method body
///
/// Only the shapes the preview actually transforms are modelled; everything
/// else rides along as [`Other`](InsnKind::Other) and is copied verbatim.
#[derive(Clone, PartialEq, Debug)]
pub enum InsnKind {
    /// Position marker; the only thing a jump or exception entry may target
    Label,

    /// Push a literal constant
    Const(ConstValue),

    /// Load from or store to a local variable slot
    Var {
        access: VarAccess,
        ty: StorableType,
        slot: u16,
    },

    /// Call a method
    Invoke {
        kind: InvokeKind,
        owner: BinaryName,
        name: UnqualifiedName,
        descriptor: MethodDescriptor,
    },

    /// Read or write a field
    Field {
        access: FieldAccess,
        owner: BinaryName,
        name: UnqualifiedName,
        field_type: FieldType,
    },

    /// Return from the method (`None` is a `void` return)
    Return(Option<StorableType>),

    /// Jump to a label (`condition: None` is an unconditional `goto`)
    Jump {
        target: InsnId,
        condition: Option<OrdComparison>,
    },

    /// Swap the top two (category 1) stack values
    Swap,

    /// Discard the top (category 1) stack value
    Pop,

    /// Opaque passthrough for anything the preview never touches
    Other(String),
}

/// An instruction together with its stable identity
#[derive(Clone, Debug)]
pub struct Insn {
    pub id: InsnId,
    pub kind: InsnKind,
}

/// Entry in a method's exception table
///
/// All three ids must refer to [`Label`](InsnKind::Label) instructions
/// present in the owning method's body. `catch_type: None` catches any
/// throwable (a `finally` range).
#[derive(Clone, PartialEq, Debug)]
pub struct ExceptionHandler {
    pub start: InsnId,
    pub end: InsnId,
    pub handler: InsnId,
    pub catch_type: Option<BinaryName>,
}
