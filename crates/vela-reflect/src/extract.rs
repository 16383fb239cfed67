//! AST-to-instruction type extraction
//!
//! Walks type nodes and declarations, appending opcodes to the pack under
//! construction and pushing non-primitive literals onto its literal stack.
//! One extractor is created per reflected declaration; its pack is
//! serialized immediately afterwards and does not survive the declaration.
//!
//! Type references go through the resolver half of this type, which lives
//! in [`crate::resolve`].

use std::path::PathBuf;

use rustc_hash::FxHashSet;
use vela_ast::*;
use vela_checker::TypeChecker;

use crate::op::TypeOp;
use crate::pack::{PackStruct, StackEntry};

/// Compiles type annotations and declarations into a [`PackStruct`]
pub struct TypeExtractor<'c, 'p> {
    pub(crate) checker: &'c mut TypeChecker<'p>,
    /// File the extracted declaration lives in; names resolve here
    pub(crate) file: PathBuf,
    pub(crate) pack: PackStruct,
    /// Local names of import bindings the pack references at runtime
    pub(crate) used_imports: FxHashSet<String>,
    /// Interfaces currently being flattened; a nested occurrence of one of
    /// these is a structural cycle
    active_interfaces: FxHashSet<String>,
}

impl<'c, 'p> TypeExtractor<'c, 'p> {
    /// Create an extractor for one declaration in `file`
    pub fn new(checker: &'c mut TypeChecker<'p>, file: impl Into<PathBuf>) -> Self {
        TypeExtractor {
            checker,
            file: file.into(),
            pack: PackStruct::new(),
            used_imports: FxHashSet::default(),
            active_interfaces: FxHashSet::default(),
        }
    }

    /// Check whether nothing has been emitted yet
    pub fn is_empty(&self) -> bool {
        self.pack.is_empty()
    }

    /// Finish extraction, yielding the pack and the import bindings that
    /// must survive elision
    pub fn finish(self) -> (PackStruct, FxHashSet<String>) {
        (self.pack, self.used_imports)
    }

    /// Extract a type annotation
    pub fn extract_type(&mut self, annotation: &TypeAnnotation) {
        match &annotation.ty {
            Type::Parenthesized(inner) => self.extract_type(inner),

            Type::Primitive(primitive) => {
                let op = match primitive {
                    PrimitiveType::String => TypeOp::String,
                    PrimitiveType::Number => TypeOp::Number,
                    PrimitiveType::Boolean => TypeOp::Boolean,
                    PrimitiveType::BigInt => TypeOp::BigInt,
                    PrimitiveType::Void => TypeOp::Void,
                    PrimitiveType::Null => TypeOp::Null,
                    PrimitiveType::Undefined => TypeOp::Undefined,
                    PrimitiveType::Any => TypeOp::Any,
                };
                self.pack.push_op(op);
            }

            Type::Array(array) => {
                self.extract_type(&array.element_type);
                self.pack.push_op(TypeOp::Array);
            }

            Type::Union(union) => self.extract_union(union),

            Type::StringLiteral(value) => {
                let index = self.pack.stack_index(StackEntry::String(value.clone()));
                self.pack.push_op(TypeOp::Literal);
                self.pack.push_param(index);
            }
            Type::NumberLiteral(value) => {
                let index = self.pack.stack_index(StackEntry::Number(*value));
                self.pack.push_op(TypeOp::Literal);
                self.pack.push_param(index);
            }
            Type::BooleanLiteral(value) => {
                let index = self.pack.stack_index(StackEntry::Boolean(*value));
                self.pack.push_op(TypeOp::Literal);
                self.pack.push_param(index);
            }

            Type::Object(object) => {
                self.extract_object_members(&object.members);
                self.pack.push_op(TypeOp::ObjectLiteral);
            }

            // Mapped types are not evaluated; the member is omitted
            // upstream when nothing was emitted for it
            Type::Mapped(_) => {}

            Type::Function(function) => {
                for param in &function.params {
                    self.extract_type(&param.ty);
                }
                self.extract_type(&function.return_type);
                self.pack.push_op(TypeOp::Function);
            }

            Type::Reference(reference) => self.extract_reference(reference),
        }
    }

    /// Union rule: nothing for zero constituents, transparent for one, and
    /// a frame boundary ahead of two or more when prior opcodes exist so
    /// the reader's `union` consumes only the subtypes just emitted
    fn extract_union(&mut self, union: &UnionType) {
        match union.types.len() {
            0 => {}
            1 => self.extract_type(&union.types[0]),
            _ => {
                if !self.pack.is_empty() {
                    self.pack.push_op(TypeOp::Frame);
                }
                for constituent in &union.types {
                    self.extract_type(constituent);
                }
                self.pack.push_op(TypeOp::Union);
            }
        }
    }

    /// Extract an interface body: all members including those inherited
    /// through extends clauses, then one structural aggregate
    pub fn extract_interface(&mut self, decl: &InterfaceDecl) {
        if !self.active_interfaces.insert(decl.name.name.clone()) {
            // Structural cycle; the nested occurrence decodes as any
            self.pack.push_op(TypeOp::Any);
            return;
        }
        let mut members = Vec::new();
        let mut seen = FxHashSet::default();
        let mut visited = FxHashSet::default();
        self.collect_interface_members(decl, &mut members, &mut seen, &mut visited);
        self.extract_object_members(&members);
        self.pack.push_op(TypeOp::ObjectLiteral);
        self.active_interfaces.remove(&decl.name.name);
    }

    /// Depth-first member collection, deduplicated by declared name with
    /// child members first so overrides in subinterfaces win. `visited`
    /// bounds extends cycles.
    fn collect_interface_members(
        &mut self,
        decl: &InterfaceDecl,
        members: &mut Vec<ObjectTypeMember>,
        seen: &mut FxHashSet<String>,
        visited: &mut FxHashSet<String>,
    ) {
        if !visited.insert(decl.name.name.clone()) {
            return;
        }
        for member in &decl.members {
            match member.name() {
                Some(name) => {
                    if seen.insert(name.to_string()) {
                        members.push(member.clone());
                    }
                }
                None => members.push(member.clone()),
            }
        }
        for parent in &decl.extends {
            if let Some(vela_checker::DeclRef::Interface(parent_decl)) =
                self.resolve_declaration(&parent.name.name)
            {
                self.collect_interface_members(parent_decl, members, seen, visited);
            }
        }
    }

    fn extract_object_members(&mut self, members: &[ObjectTypeMember]) {
        for member in members {
            match member {
                ObjectTypeMember::Property(property) => {
                    let before = self.pack.ops.len();
                    match &property.type_annotation {
                        Some(ty) => self.extract_type(ty),
                        None => self.pack.push_op(TypeOp::Any),
                    }
                    if self.pack.ops.len() == before {
                        // Unserialized type (e.g. mapped): omit the member
                        continue;
                    }
                    let index = self
                        .pack
                        .stack_index(StackEntry::String(property.name.name.clone()));
                    self.pack.push_op(TypeOp::PropertySignature);
                    self.pack.push_param(index);
                }
                ObjectTypeMember::Method(method) => {
                    if method.params.is_empty() && method.return_type.is_none() {
                        continue;
                    }
                    for param in &method.params {
                        self.extract_type(&param.ty);
                    }
                    match &method.return_type {
                        Some(ty) => self.extract_type(ty),
                        None => self.pack.push_op(TypeOp::Any),
                    }
                    let index = self
                        .pack
                        .stack_index(StackEntry::String(method.name.name.clone()));
                    self.pack.push_op(TypeOp::MethodSignature);
                    self.pack.push_param(index);
                }
                ObjectTypeMember::Index(index_sig) => {
                    match &index_sig.key_type {
                        Some(ty) => self.extract_type(ty),
                        None => self.pack.push_op(TypeOp::Any),
                    }
                    self.extract_type(&index_sig.value_type);
                    self.pack.push_op(TypeOp::IndexSignature);
                }
            }
        }
    }

    /// Extract a class property declaration: its type, the member opcode,
    /// then the optional flag and modifiers in fixed order
    pub fn extract_property(&mut self, property: &PropertyDecl) {
        let before = self.pack.ops.len();
        match &property.type_annotation {
            Some(ty) => self.extract_type(ty),
            None => self.pack.push_op(TypeOp::Any),
        }
        if self.pack.ops.len() == before {
            // Unserialized type (e.g. mapped): omit the member
            return;
        }
        self.pack.push_op(TypeOp::Property);
        if property.optional {
            self.pack.push_op(TypeOp::Optional);
        }
        self.push_modifiers(property.visibility, property.is_abstract);
    }

    /// Extract a class method declaration
    pub fn extract_method(&mut self, method: &MethodDecl) {
        if !self.extract_callable(&method.params, method.return_type.as_ref(), TypeOp::Method) {
            return;
        }
        self.push_modifiers(method.visibility, method.is_abstract);
    }

    /// Extract a class constructor declaration
    pub fn extract_constructor(&mut self, ctor: &ConstructorDecl) {
        self.extract_callable(&ctor.params, None, TypeOp::Method);
    }

    /// Extract a function declaration's signature
    pub fn extract_function_decl(&mut self, func: &FunctionDecl) {
        self.extract_callable(&func.params, func.return_type.as_ref(), TypeOp::Function);
    }

    /// Extract an arrow function's signature
    pub fn extract_arrow(&mut self, func: &ArrowFunction) {
        self.extract_callable(&func.params, func.return_type.as_ref(), TypeOp::Function);
    }

    /// Extract a function expression's signature
    pub fn extract_function_expression(&mut self, func: &FunctionExpression) {
        self.extract_callable(&func.params, func.return_type.as_ref(), TypeOp::Function);
    }

    /// Shared callable rule: a signature with no parameters and no explicit
    /// return annotation emits nothing; otherwise annotated parameter types
    /// in order, then the return type (or `any`), then the closing opcode.
    /// Returns whether anything was emitted.
    fn extract_callable(
        &mut self,
        params: &[Parameter],
        return_type: Option<&TypeAnnotation>,
        op: TypeOp,
    ) -> bool {
        if params.is_empty() && return_type.is_none() {
            return false;
        }
        for param in params {
            if let Some(ty) = &param.type_annotation {
                self.extract_type(ty);
            }
        }
        match return_type {
            Some(ty) => self.extract_type(ty),
            None => self.pack.push_op(TypeOp::Any),
        }
        self.pack.push_op(op);
        true
    }

    /// Modifier opcodes decorate the member just produced, always in the
    /// order private, protected, abstract
    fn push_modifiers(&mut self, visibility: Visibility, is_abstract: bool) {
        match visibility {
            Visibility::Private => self.pack.push_op(TypeOp::Private),
            Visibility::Protected => self.pack.push_op(TypeOp::Protected),
            Visibility::Public => {}
        }
        if is_abstract {
            self.pack.push_op(TypeOp::Abstract);
        }
    }
}
