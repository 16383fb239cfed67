//! Reflection instruction set
//!
//! Every opcode fits in a 6-bit slot of the packed stream. Most opcodes
//! produce a type onto the reader's implicit type stack; the aggregate
//! opcodes (`Union`, `ObjectLiteral`, `Class`, ...) consume the current
//! frame; `Frame` opens a scope boundary. Opcodes with a parameter slot are
//! immediately followed by one extra slot holding a literal-stack index.

/// Width of one instruction slot in bits
pub const OP_BITS: u32 = 6;

/// Exclusive upper bound of a slot value (2^OP_BITS)
pub const OP_BOUND: u8 = 1 << OP_BITS;

/// Reflection opcode enumeration
///
/// Opcodes are organized into categories:
/// - 0: stream terminator
/// - 1-8: primitive types
/// - 9-22: built-in nominal references
/// - 23-26: literals and structural aggregates
/// - 27-31: collection constructors
/// - 32-37: members
/// - 38-41: member modifiers
/// - 42-48: type algebra
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeOp {
    /// Stream terminator (the zero sentinel)
    End = 0,

    // ===== Primitives (1-8) =====
    /// string
    String = 1,
    /// number
    Number = 2,
    /// boolean
    Boolean = 3,
    /// bigint
    BigInt = 4,
    /// void
    Void = 5,
    /// null
    Null = 6,
    /// undefined
    Undefined = 7,
    /// any (also the recovery opcode for unhandled shapes)
    Any = 8,

    // ===== Built-in nominal references (9-22) =====
    /// Date
    Date = 9,
    /// ArrayBuffer
    ArrayBuffer = 10,
    /// Int8Array
    Int8Array = 11,
    /// Uint8Array
    Uint8Array = 12,
    /// Uint8ClampedArray
    Uint8ClampedArray = 13,
    /// Int16Array
    Int16Array = 14,
    /// Uint16Array
    Uint16Array = 15,
    /// Int32Array
    Int32Array = 16,
    /// Uint32Array
    Uint32Array = 17,
    /// Float32Array
    Float32Array = 18,
    /// Float64Array
    Float64Array = 19,
    /// BigInt64Array
    BigInt64Array = 20,
    /// BigUint64Array
    BigUint64Array = 21,
    /// Promise<T>: consumes one operand type
    Promise = 22,

    // ===== Literals & structural aggregates (23-26) =====
    /// Push the literal at stack index i (operand: index)
    Literal = 23,
    /// Consume the current frame's members into one structural type
    ObjectLiteral = 24,
    /// Consume a class reference and its generic arguments (operand: index
    /// of the lazy class reference)
    Class = 25,
    /// Const enum marker
    ConstEnum = 26,

    // ===== Collection constructors (27-31) =====
    /// Array<T>: consume 1 element type
    Array = 27,
    /// Set<T>: consume 1 element type
    Set = 28,
    /// Map<K, V>: consume 2 types
    Map = 29,
    /// Index signature: consume key type then value type
    IndexSignature = 30,
    /// Enum reference (operand: index of the lazy enum reference)
    Enum = 31,

    // ===== Members (32-37) =====
    /// Class property: consume 1 type
    Property = 32,
    /// Named property signature (operand: index of the name string)
    PropertySignature = 33,
    /// Class method or constructor: consume parameter and return types
    Method = 34,
    /// Named method signature (operand: index of the name string)
    MethodSignature = 35,
    /// Constructor member
    Constructor = 36,
    /// Free-standing callable: consume parameter and return types
    Function = 37,

    // ===== Member modifiers (38-41) =====
    /// Mark the top member optional
    Optional = 38,
    /// Mark the top member private
    Private = 39,
    /// Mark the top member protected
    Protected = 40,
    /// Mark the top member abstract
    Abstract = 41,

    // ===== Type algebra (42-48) =====
    /// Consume the current frame into a union
    Union = 42,
    /// Consume the current frame into an intersection
    Intersection = 43,
    /// Open a frame on the reader's type stack
    Frame = 44,
    /// Push the stack entry at index i (operand: index)
    Push = 45,
    /// typeof query
    Query = 46,
    /// Conditional type
    Condition = 47,
    /// Extends test
    Extends = 48,
}

impl TypeOp {
    /// Convert a slot value to an opcode
    ///
    /// Returns None if the value does not correspond to a valid opcode.
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::End),
            1 => Some(Self::String),
            2 => Some(Self::Number),
            3 => Some(Self::Boolean),
            4 => Some(Self::BigInt),
            5 => Some(Self::Void),
            6 => Some(Self::Null),
            7 => Some(Self::Undefined),
            8 => Some(Self::Any),
            9 => Some(Self::Date),
            10 => Some(Self::ArrayBuffer),
            11 => Some(Self::Int8Array),
            12 => Some(Self::Uint8Array),
            13 => Some(Self::Uint8ClampedArray),
            14 => Some(Self::Int16Array),
            15 => Some(Self::Uint16Array),
            16 => Some(Self::Int32Array),
            17 => Some(Self::Uint32Array),
            18 => Some(Self::Float32Array),
            19 => Some(Self::Float64Array),
            20 => Some(Self::BigInt64Array),
            21 => Some(Self::BigUint64Array),
            22 => Some(Self::Promise),
            23 => Some(Self::Literal),
            24 => Some(Self::ObjectLiteral),
            25 => Some(Self::Class),
            26 => Some(Self::ConstEnum),
            27 => Some(Self::Array),
            28 => Some(Self::Set),
            29 => Some(Self::Map),
            30 => Some(Self::IndexSignature),
            31 => Some(Self::Enum),
            32 => Some(Self::Property),
            33 => Some(Self::PropertySignature),
            34 => Some(Self::Method),
            35 => Some(Self::MethodSignature),
            36 => Some(Self::Constructor),
            37 => Some(Self::Function),
            38 => Some(Self::Optional),
            39 => Some(Self::Private),
            40 => Some(Self::Protected),
            41 => Some(Self::Abstract),
            42 => Some(Self::Union),
            43 => Some(Self::Intersection),
            44 => Some(Self::Frame),
            45 => Some(Self::Push),
            46 => Some(Self::Query),
            47 => Some(Self::Condition),
            48 => Some(Self::Extends),
            _ => None,
        }
    }

    /// Convert opcode to its slot value
    #[inline]
    pub fn to_u8(self) -> u8 {
        self as u8
    }

    /// Number of inline parameter slots following this opcode (0 or 1)
    pub fn param_slots(self) -> usize {
        match self {
            Self::Literal
            | Self::Class
            | Self::Enum
            | Self::PropertySignature
            | Self::MethodSignature
            | Self::Push => 1,
            _ => 0,
        }
    }

    /// Get the human-readable name of the opcode
    pub fn name(self) -> &'static str {
        match self {
            Self::End => "end",
            Self::String => "string",
            Self::Number => "number",
            Self::Boolean => "boolean",
            Self::BigInt => "bigint",
            Self::Void => "void",
            Self::Null => "null",
            Self::Undefined => "undefined",
            Self::Any => "any",
            Self::Date => "date",
            Self::ArrayBuffer => "arrayBuffer",
            Self::Int8Array => "int8Array",
            Self::Uint8Array => "uint8Array",
            Self::Uint8ClampedArray => "uint8ClampedArray",
            Self::Int16Array => "int16Array",
            Self::Uint16Array => "uint16Array",
            Self::Int32Array => "int32Array",
            Self::Uint32Array => "uint32Array",
            Self::Float32Array => "float32Array",
            Self::Float64Array => "float64Array",
            Self::BigInt64Array => "bigInt64Array",
            Self::BigUint64Array => "bigUint64Array",
            Self::Promise => "promise",
            Self::Literal => "literal",
            Self::ObjectLiteral => "objectLiteral",
            Self::Class => "class",
            Self::ConstEnum => "constEnum",
            Self::Array => "array",
            Self::Set => "set",
            Self::Map => "map",
            Self::IndexSignature => "indexSignature",
            Self::Enum => "enum",
            Self::Property => "property",
            Self::PropertySignature => "propertySignature",
            Self::Method => "method",
            Self::MethodSignature => "methodSignature",
            Self::Constructor => "constructor",
            Self::Function => "function",
            Self::Optional => "optional",
            Self::Private => "private",
            Self::Protected => "protected",
            Self::Abstract => "abstract",
            Self::Union => "union",
            Self::Intersection => "intersection",
            Self::Frame => "frame",
            Self::Push => "push",
            Self::Query => "query",
            Self::Condition => "condition",
            Self::Extends => "extends",
        }
    }

    /// Check if this opcode is a member modifier
    pub fn is_modifier(self) -> bool {
        matches!(
            self,
            Self::Optional | Self::Private | Self::Protected | Self::Abstract
        )
    }

    /// Check if this opcode consumes the current frame
    pub fn is_aggregate(self) -> bool {
        matches!(
            self,
            Self::Union | Self::Intersection | Self::ObjectLiteral | Self::Class
        )
    }
}
