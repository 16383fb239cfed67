//! Statement and declaration AST nodes
//!
//! This module defines the statement surface the reflection transformer
//! operates on: class, interface, enum, type alias, function and variable
//! declarations, plus the module system (imports, exports, re-exports).
//! Vela has more statement forms than these; control flow lives inside
//! function bodies, which the transformer treats as opaque blocks.

use super::*;
use crate::span::Span;

/// Top-level or block-level statement
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// Variable declaration: let/const
    VariableDecl(VariableDecl),

    /// Function declaration
    FunctionDecl(FunctionDecl),

    /// Class declaration
    ClassDecl(ClassDecl),

    /// Interface declaration
    InterfaceDecl(InterfaceDecl),

    /// Type alias declaration
    TypeAliasDecl(TypeAliasDecl),

    /// Enum declaration
    EnumDecl(EnumDecl),

    /// Import statement
    ImportDecl(ImportDecl),

    /// Export statement
    ExportDecl(ExportDecl),

    /// Expression statement (e.g., a call or assignment)
    Expression(ExpressionStatement),

    /// Empty statement (;)
    Empty(Span),
}

impl Statement {
    /// Get the span of this statement
    pub fn span(&self) -> &Span {
        match self {
            Statement::VariableDecl(s) => &s.span,
            Statement::FunctionDecl(s) => &s.span,
            Statement::ClassDecl(s) => &s.span,
            Statement::InterfaceDecl(s) => &s.span,
            Statement::TypeAliasDecl(s) => &s.span,
            Statement::EnumDecl(s) => &s.span,
            Statement::ImportDecl(s) => &s.span,
            Statement::ExportDecl(s) => s.span(),
            Statement::Expression(s) => &s.span,
            Statement::Empty(span) => span,
        }
    }

    /// Check if this statement is a declaration
    pub fn is_declaration(&self) -> bool {
        matches!(
            self,
            Statement::VariableDecl(_)
                | Statement::FunctionDecl(_)
                | Statement::ClassDecl(_)
                | Statement::InterfaceDecl(_)
                | Statement::TypeAliasDecl(_)
                | Statement::EnumDecl(_)
        )
    }
}

// ============================================================================
// Variable Declaration
// ============================================================================

/// Variable declaration: let x = 42; or const y: number = 10;
#[derive(Debug, Clone, PartialEq)]
pub struct VariableDecl {
    /// Attached doc comment, if any
    pub doc: Option<DocComment>,

    /// let or const
    pub kind: VariableKind,

    pub name: Identifier,

    /// Optional type annotation
    pub type_annotation: Option<TypeAnnotation>,

    /// Initializer expression (required for const)
    pub initializer: Option<Expression>,

    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VariableKind {
    Let,
    Const,
}

// ============================================================================
// Function Declaration
// ============================================================================

/// Function declaration
///
/// # Example
/// ```text
/// function add(x: number, y: number): number {
///     return x + y;
/// }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDecl {
    /// Attached doc comment, if any
    pub doc: Option<DocComment>,

    /// Function name
    pub name: Identifier,

    /// Type parameters (generics)
    pub type_params: Option<Vec<TypeParameter>>,

    /// Parameters
    pub params: Vec<Parameter>,

    /// Return type annotation
    pub return_type: Option<TypeAnnotation>,

    /// Function body
    pub body: BlockStatement,

    /// Is async function?
    pub is_async: bool,

    pub span: Span,
}

/// Function or method parameter
#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    pub name: Identifier,
    pub type_annotation: Option<TypeAnnotation>,
    /// Default value for the parameter (e.g., `x: number = 10`)
    pub default_value: Option<Expression>,
    pub optional: bool,
    pub span: Span,
}

impl Parameter {
    /// Create a parameter with just a name and type
    pub fn typed(name: Identifier, ty: TypeAnnotation) -> Self {
        let span = name.span;
        Self {
            name,
            type_annotation: Some(ty),
            default_value: None,
            optional: false,
            span,
        }
    }
}

// ============================================================================
// Class Declaration
// ============================================================================

/// Class declaration
///
/// # Example
/// ```text
/// abstract class Shape {
///     protected origin: Point;
///     abstract area(): number;
/// }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ClassDecl {
    /// Attached doc comment, if any
    pub doc: Option<DocComment>,

    /// Abstract modifier
    pub is_abstract: bool,

    pub name: Identifier,
    pub type_params: Option<Vec<TypeParameter>>,
    pub extends: Option<TypeReference>,
    pub members: Vec<ClassMember>,
    pub span: Span,
}

impl ClassDecl {
    /// Find a static property member with the given name
    pub fn static_property(&self, name: &str) -> Option<&PropertyDecl> {
        self.members.iter().find_map(|m| match m {
            ClassMember::Property(p) if p.is_static && p.name.name == name => Some(p),
            _ => None,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ClassMember {
    Property(PropertyDecl),
    Method(MethodDecl),
    Constructor(ConstructorDecl),
}

/// Visibility modifier for class members
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Visibility {
    /// Private - only accessible within the same class
    Private,
    /// Protected - accessible within the same class and subclasses
    Protected,
    /// Public - accessible from anywhere (default)
    #[default]
    Public,
}

/// Property declaration
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyDecl {
    /// Attached doc comment, if any
    pub doc: Option<DocComment>,

    /// Visibility modifier (private/protected/public)
    pub visibility: Visibility,

    pub name: Identifier,
    pub type_annotation: Option<TypeAnnotation>,
    pub initializer: Option<Expression>,
    pub optional: bool,
    pub is_static: bool,
    pub is_abstract: bool,
    pub span: Span,
}

/// Method declaration
#[derive(Debug, Clone, PartialEq)]
pub struct MethodDecl {
    /// Attached doc comment, if any
    pub doc: Option<DocComment>,

    /// Visibility modifier (private/protected/public)
    pub visibility: Visibility,

    /// Abstract modifier (method has no body)
    pub is_abstract: bool,

    pub name: Identifier,
    pub type_params: Option<Vec<TypeParameter>>,
    pub params: Vec<Parameter>,
    pub return_type: Option<TypeAnnotation>,

    /// None if is_abstract is true
    pub body: Option<BlockStatement>,

    pub is_static: bool,
    pub is_async: bool,
    pub span: Span,
}

/// Constructor declaration
#[derive(Debug, Clone, PartialEq)]
pub struct ConstructorDecl {
    /// Attached doc comment, if any
    pub doc: Option<DocComment>,

    pub params: Vec<Parameter>,
    pub body: BlockStatement,
    pub span: Span,
}

// ============================================================================
// Interface Declaration
// ============================================================================

/// Interface declaration: a named, extendable object type
///
/// # Example
/// ```text
/// interface Timed extends Created {
///     updated: number;
/// }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct InterfaceDecl {
    /// Attached doc comment, if any
    pub doc: Option<DocComment>,

    pub name: Identifier,
    pub type_params: Option<Vec<TypeParameter>>,
    pub extends: Vec<TypeReference>,
    pub members: Vec<ObjectTypeMember>,
    pub span: Span,
}

// ============================================================================
// Type Alias
// ============================================================================

/// Type alias: type Point = { x: number; y: number; }
#[derive(Debug, Clone, PartialEq)]
pub struct TypeAliasDecl {
    /// Attached doc comment, if any
    pub doc: Option<DocComment>,

    pub name: Identifier,
    pub type_params: Option<Vec<TypeParameter>>,
    pub type_annotation: TypeAnnotation,
    pub span: Span,
}

// ============================================================================
// Enum Declaration
// ============================================================================

/// Enum declaration
///
/// # Example
/// ```text
/// const enum Status { Active = "active", Disabled = "disabled" }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct EnumDecl {
    /// Attached doc comment, if any
    pub doc: Option<DocComment>,

    /// `const enum` — inlined by the emitter, no runtime object
    pub is_const: bool,

    pub name: Identifier,
    pub members: Vec<EnumMember>,
    pub span: Span,
}

/// A single enum member with an optional explicit initializer
#[derive(Debug, Clone, PartialEq)]
pub struct EnumMember {
    pub name: Identifier,
    pub initializer: Option<Expression>,
    pub span: Span,
}

// ============================================================================
// Blocks and expression statements
// ============================================================================

/// Block statement - a sequence of statements wrapped in { }
#[derive(Debug, Clone, PartialEq)]
pub struct BlockStatement {
    pub statements: Vec<Statement>,
    pub span: Span,
}

impl BlockStatement {
    /// An empty body with a synthesized span
    pub fn empty() -> Self {
        BlockStatement {
            statements: Vec::new(),
            span: Span::synthesized(),
        }
    }
}

/// Expression statement
#[derive(Debug, Clone, PartialEq)]
pub struct ExpressionStatement {
    pub expression: Expression,
    pub span: Span,
}

// ============================================================================
// Module System
// ============================================================================

/// Import declaration
///
/// # Example
/// ```text
/// import { Model, Status } from "./model";
/// import * as util from "./util";
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ImportDecl {
    pub specifiers: Vec<ImportSpecifier>,
    pub source: String,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ImportSpecifier {
    /// import { foo } or import { foo as bar }
    Named(NamedImport),
    /// import * as foo
    Namespace(ImportBinding),
    /// import foo (default)
    Default(ImportBinding),
}

impl ImportSpecifier {
    /// Local binding name introduced by this specifier
    pub fn local_name(&self) -> &str {
        match self {
            ImportSpecifier::Named(named) => named
                .alias
                .as_ref()
                .map(|a| a.name.as_str())
                .unwrap_or(&named.name.name),
            ImportSpecifier::Namespace(binding) | ImportSpecifier::Default(binding) => {
                &binding.name.name
            }
        }
    }
}

/// A named import binding: `{ foo }` or `{ foo as bar }`
#[derive(Debug, Clone, PartialEq)]
pub struct NamedImport {
    pub name: Identifier,
    pub alias: Option<Identifier>,
    /// Marked by transforms that need the binding to survive import elision.
    /// The emitter keeps synthesized specifiers even when they only appear
    /// in type positions.
    pub synthesized: bool,
}

impl NamedImport {
    /// A plain named import without alias
    pub fn plain(name: Identifier) -> Self {
        NamedImport {
            name,
            alias: None,
            synthesized: false,
        }
    }
}

/// A default or namespace import binding: `foo` or `* as foo`
#[derive(Debug, Clone, PartialEq)]
pub struct ImportBinding {
    pub name: Identifier,
    /// Marked by transforms that need the binding to survive import
    /// elision, like [`NamedImport::synthesized`]
    pub synthesized: bool,
}

impl ImportBinding {
    /// An unmarked binding
    pub fn plain(name: Identifier) -> Self {
        ImportBinding {
            name,
            synthesized: false,
        }
    }
}

/// Export declaration
#[derive(Debug, Clone, PartialEq)]
pub enum ExportDecl {
    /// export class Model { ... }
    Declaration(Box<Statement>),

    /// export default class Model { ... }
    Default(Box<Statement>),

    /// export { foo, bar } or export { foo as bar } from "./m"
    Named {
        specifiers: Vec<ExportSpecifier>,
        source: Option<String>,
        span: Span,
    },

    /// export * from "./m"
    All { source: String, span: Span },
}

impl ExportDecl {
    pub fn span(&self) -> &Span {
        match self {
            ExportDecl::Declaration(stmt) | ExportDecl::Default(stmt) => stmt.span(),
            ExportDecl::Named { span, .. } => span,
            ExportDecl::All { span, .. } => span,
        }
    }
}

/// A single name in an `export { ... }` clause
#[derive(Debug, Clone, PartialEq)]
pub struct ExportSpecifier {
    pub name: Identifier,
    pub alias: Option<Identifier>,
}

impl ExportSpecifier {
    /// Name the binding is exported under
    pub fn exported_name(&self) -> &str {
        self.alias
            .as_ref()
            .map(|a| a.name.as_str())
            .unwrap_or(&self.name.name)
    }
}
