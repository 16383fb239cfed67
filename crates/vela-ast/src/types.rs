//! Type annotation AST nodes
//!
//! This module defines the static type surface of Vela:
//! - Primitive types (string, number, boolean, bigint, void, null, undefined, any)
//! - Type references (Model, Box<T>)
//! - Union types (A | B | C)
//! - Function types ((x: number) => number)
//! - Array types (T[])
//! - Object types with property, method and index-signature members
//! - Literal types ("id", 42, true)
//! - Mapped types ({ [K in keyof T]: T[K] })

use super::*;
use crate::span::Span;

/// Type annotation (compile-time type)
#[derive(Debug, Clone, PartialEq)]
pub struct TypeAnnotation {
    pub ty: Type,
    pub span: Span,
}

impl TypeAnnotation {
    /// Wrap a type with a synthesized span
    pub fn synthesized(ty: Type) -> Self {
        TypeAnnotation {
            ty,
            span: Span::synthesized(),
        }
    }
}

/// Type
#[derive(Debug, Clone, PartialEq)]
pub enum Type {
    /// Primitive keyword type: number, string, boolean, ...
    Primitive(PrimitiveType),

    /// Type reference: Model, Box<T>
    Reference(TypeReference),

    /// Union type: number | string | null
    Union(UnionType),

    /// Function type: (x: number) => number
    Function(FunctionType),

    /// Array type: number[]
    Array(ArrayType),

    /// Object type: { x: number; y?: string }
    Object(ObjectType),

    /// Mapped type: { [K in keyof T]: T[K] }
    Mapped(MappedType),

    /// String literal type: "foo"
    StringLiteral(String),

    /// Number literal type: 42
    NumberLiteral(f64),

    /// Boolean literal type: true | false
    BooleanLiteral(bool),

    /// Parenthesized type: (number | string)
    Parenthesized(Box<TypeAnnotation>),
}

impl Type {
    /// Check if this type is a primitive keyword
    pub fn is_primitive(&self) -> bool {
        matches!(self, Type::Primitive(_))
    }

    /// Check if this type is a union
    pub fn is_union(&self) -> bool {
        matches!(self, Type::Union(_))
    }

    /// Check if this type is a literal type
    pub fn is_literal(&self) -> bool {
        matches!(
            self,
            Type::StringLiteral(_) | Type::NumberLiteral(_) | Type::BooleanLiteral(_)
        )
    }
}

// ============================================================================
// Primitive Types
// ============================================================================

/// Primitive keyword type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimitiveType {
    Number,    // number
    String,    // string
    Boolean,   // boolean
    BigInt,    // bigint
    Null,      // null
    Undefined, // undefined
    Void,      // void
    Any,       // any
}

impl PrimitiveType {
    /// Get the keyword for this primitive type
    pub fn name(&self) -> &'static str {
        match self {
            PrimitiveType::Number => "number",
            PrimitiveType::String => "string",
            PrimitiveType::Boolean => "boolean",
            PrimitiveType::BigInt => "bigint",
            PrimitiveType::Null => "null",
            PrimitiveType::Undefined => "undefined",
            PrimitiveType::Void => "void",
            PrimitiveType::Any => "any",
        }
    }
}

// ============================================================================
// Type Reference
// ============================================================================

/// Type reference: Model, Box<K, V>
#[derive(Debug, Clone, PartialEq)]
pub struct TypeReference {
    pub name: Identifier,
    pub type_args: Option<Vec<TypeAnnotation>>,
}

impl TypeReference {
    /// Create a simple type reference without type arguments
    pub fn simple(name: Identifier) -> Self {
        Self {
            name,
            type_args: None,
        }
    }

    /// Create a generic type reference with type arguments
    pub fn generic(name: Identifier, type_args: Vec<TypeAnnotation>) -> Self {
        Self {
            name,
            type_args: Some(type_args),
        }
    }

    /// Check if this is a generic type reference
    pub fn is_generic(&self) -> bool {
        self.type_args.is_some()
    }
}

// ============================================================================
// Union Type
// ============================================================================

/// Union type: A | B | C
#[derive(Debug, Clone, PartialEq)]
pub struct UnionType {
    pub types: Vec<TypeAnnotation>,
}

impl UnionType {
    /// Create a new union type
    pub fn new(types: Vec<TypeAnnotation>) -> Self {
        Self { types }
    }

    /// Get the number of constituents
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Check if this union has no constituents
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

// ============================================================================
// Function Type
// ============================================================================

/// Function type: (x: number, y: string) => number
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionType {
    pub params: Vec<FunctionTypeParam>,
    pub return_type: Box<TypeAnnotation>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FunctionTypeParam {
    pub name: Option<Identifier>,
    pub ty: TypeAnnotation,
}

// ============================================================================
// Array Type
// ============================================================================

/// Array type: T[]
#[derive(Debug, Clone, PartialEq)]
pub struct ArrayType {
    pub element_type: Box<TypeAnnotation>,
}

impl ArrayType {
    /// Create a new array type
    pub fn new(element_type: TypeAnnotation) -> Self {
        Self {
            element_type: Box::new(element_type),
        }
    }
}

// ============================================================================
// Object Type
// ============================================================================

/// Object type: { x: number; y?: string; [key: string]: number }
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectType {
    pub members: Vec<ObjectTypeMember>,
}

impl ObjectType {
    /// Create a new object type
    pub fn new(members: Vec<ObjectTypeMember>) -> Self {
        Self { members }
    }
}

/// Member of an object type or interface body
#[derive(Debug, Clone, PartialEq)]
pub enum ObjectTypeMember {
    Property(PropertySignature),
    Method(MethodSignature),
    Index(IndexSignature),
}

impl ObjectTypeMember {
    /// Declared name of the member; index signatures have none
    pub fn name(&self) -> Option<&str> {
        match self {
            ObjectTypeMember::Property(p) => Some(&p.name.name),
            ObjectTypeMember::Method(m) => Some(&m.name.name),
            ObjectTypeMember::Index(_) => None,
        }
    }
}

/// Property signature: name?: Type
#[derive(Debug, Clone, PartialEq)]
pub struct PropertySignature {
    pub name: Identifier,
    pub type_annotation: Option<TypeAnnotation>,
    pub optional: bool,
    pub span: Span,
}

/// Method signature: name(params): Type
#[derive(Debug, Clone, PartialEq)]
pub struct MethodSignature {
    pub name: Identifier,
    pub params: Vec<FunctionTypeParam>,
    pub return_type: Option<TypeAnnotation>,
    pub optional: bool,
    pub span: Span,
}

/// Index signature: [key: string]: Type
#[derive(Debug, Clone, PartialEq)]
pub struct IndexSignature {
    pub key_type: Option<TypeAnnotation>,
    pub value_type: TypeAnnotation,
    pub span: Span,
}

// ============================================================================
// Mapped Type
// ============================================================================

/// Mapped type: { [K in keyof T]: T[K] }
///
/// Carried through the AST but never evaluated by the reflection pass.
#[derive(Debug, Clone, PartialEq)]
pub struct MappedType {
    pub key_name: Identifier,
    pub constraint: Box<TypeAnnotation>,
    pub value_type: Box<TypeAnnotation>,
    pub span: Span,
}

// ============================================================================
// Type Parameters (Generics)
// ============================================================================

/// Type parameter (generic): T, K extends string
#[derive(Debug, Clone, PartialEq)]
pub struct TypeParameter {
    pub name: Identifier,
    pub constraint: Option<TypeAnnotation>,
    pub default: Option<TypeAnnotation>,
    pub span: Span,
}

impl TypeParameter {
    /// Create a simple type parameter without constraint or default
    pub fn simple(name: Identifier, span: Span) -> Self {
        Self {
            name,
            constraint: None,
            default: None,
            span,
        }
    }
}
