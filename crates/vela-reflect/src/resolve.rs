//! Type reference resolution
//!
//! The resolver half of [`TypeExtractor`]: follows identifiers in type
//! positions to their originating declarations, traversing import
//! specifiers and re-exports across files. Classes and enums become lazy
//! references (zero-parameter closures around the local binding), and the
//! import bindings they go through are recorded so the emitter keeps them
//! alive at runtime.

use std::path::{Path, PathBuf};

use rustc_hash::FxHashSet;
use vela_ast::{factory, ExportDecl, Statement, TypeReference};
use vela_checker::{DeclRef, SymbolKind};

use crate::extract::TypeExtractor;
use crate::op::TypeOp;
use crate::pack::StackEntry;

impl<'c, 'p> TypeExtractor<'c, 'p> {
    /// Extract a type reference: built-ins first, then symbol resolution;
    /// unresolvable references recover as `any`
    pub(crate) fn extract_reference(&mut self, reference: &TypeReference) {
        if let Some(op) = builtin_op(&reference.name.name) {
            if consumes_operand(op) {
                match reference.type_args.as_deref().and_then(|args| args.first()) {
                    Some(arg) => self.extract_type(arg),
                    None => self.pack.push_op(TypeOp::Any),
                }
                if op == TypeOp::Map {
                    match reference.type_args.as_deref().and_then(|args| args.get(1)) {
                        Some(arg) => self.extract_type(arg),
                        None => self.pack.push_op(TypeOp::Any),
                    }
                }
            }
            self.pack.push_op(op);
            return;
        }

        let Some(declaration) = self.resolve_declaration(&reference.name.name) else {
            // Global or unresolved identifier
            self.pack.push_op(TypeOp::Any);
            return;
        };

        match declaration {
            DeclRef::TypeAlias(alias) => self.extract_type(&alias.type_annotation),
            DeclRef::Interface(interface) => self.extract_interface(interface),
            DeclRef::Enum(decl) => {
                if decl.is_const {
                    // Const enums are inlined by the emitter; there is no
                    // runtime object to reference lazily
                    self.pack.push_op(TypeOp::ConstEnum);
                    return;
                }
                self.preserve_import(&reference.name.name);
                let thunk = factory::arrow_thunk(factory::ident(&reference.name.name));
                let index = self.pack.stack_index(StackEntry::LazyRef(thunk));
                self.pack.push_op(TypeOp::Enum);
                self.pack.push_param(index);
            }
            DeclRef::Class(_) => {
                self.preserve_import(&reference.name.name);
                let thunk = factory::arrow_thunk(factory::ident(&reference.name.name));
                let index = self.pack.stack_index(StackEntry::LazyRef(thunk));
                if let Some(args) = &reference.type_args {
                    for arg in args {
                        self.extract_type(arg);
                    }
                }
                self.pack.push_op(TypeOp::Class);
                self.pack.push_param(index);
            }
            DeclRef::Function(func) => self.extract_function_decl(func),
            DeclRef::Variable(var) => match &var.type_annotation {
                Some(annotation) => self.extract_type(annotation),
                None => self.pack.push_op(TypeOp::Any),
            },
        }
    }

    /// Resolve an identifier in this file to its originating declaration.
    ///
    /// Import bindings first try the checker's direct declared-type query;
    /// when the target module only re-exports the name, traversal continues
    /// through `export { x as y } from` and `export * from` clauses with
    /// the source-side name.
    pub(crate) fn resolve_declaration(&mut self, name: &str) -> Option<DeclRef<'p>> {
        let symbol = self.checker.symbol_at(&self.file, name)?;

        if symbol.kind != SymbolKind::Import {
            return self.checker.declaration_of(&self.file, &symbol);
        }

        if let Some(decl) = self.checker.declaration_of(&self.file, &symbol) {
            return Some(decl);
        }

        let target = symbol.import.as_ref()?;
        let start = self
            .checker
            .resolve_specifier(&self.file, &target.source)?
            .path
            .clone();
        let mut seen = FxHashSet::default();
        self.find_export(&start, &target.imported_name, &mut seen)
    }

    /// Search `file` for a declaration exported under `name`, recursing
    /// through its re-export clauses. `seen` guards against cycles.
    fn find_export(
        &mut self,
        file: &Path,
        name: &str,
        seen: &mut FxHashSet<PathBuf>,
    ) -> Option<DeclRef<'p>> {
        if !seen.insert(file.to_path_buf()) {
            return None;
        }

        if let Some(decl) = self.checker.exported_declaration(file, name) {
            return Some(decl);
        }

        let source = self.checker.program().file(file)?;
        for stmt in &source.module.statements {
            let Statement::ExportDecl(export) = stmt else {
                continue;
            };
            match export {
                ExportDecl::Named {
                    specifiers,
                    source: Some(from),
                    ..
                } => {
                    for spec in specifiers {
                        if spec.exported_name() != name {
                            continue;
                        }
                        let Some(target) = self.checker.program().resolve_specifier(file, from)
                        else {
                            continue;
                        };
                        let path = target.path.clone();
                        // Recurse with the source-side name so renames
                        // compose across hops
                        if let Some(decl) = self.find_export(&path, &spec.name.name, seen) {
                            return Some(decl);
                        }
                    }
                }
                ExportDecl::All { source: from, .. } => {
                    let Some(target) = self.checker.program().resolve_specifier(file, from) else {
                        continue;
                    };
                    let path = target.path.clone();
                    if let Some(decl) = self.find_export(&path, name, seen) {
                        return Some(decl);
                    }
                }
                _ => {}
            }
        }
        None
    }

    /// Record that `name`'s import binding carries a runtime value and must
    /// not be elided, if the name came in through an import
    fn preserve_import(&mut self, name: &str) {
        if let Some(symbol) = self.checker.symbol_at(&self.file, name) {
            if symbol.kind == SymbolKind::Import {
                self.used_imports.insert(name.to_string());
            }
        }
    }
}

/// Built-in nominal references resolved without consulting the checker
fn builtin_op(name: &str) -> Option<TypeOp> {
    let op = match name {
        "Date" => TypeOp::Date,
        "ArrayBuffer" => TypeOp::ArrayBuffer,
        "Int8Array" => TypeOp::Int8Array,
        "Uint8Array" => TypeOp::Uint8Array,
        "Uint8ClampedArray" => TypeOp::Uint8ClampedArray,
        "Int16Array" => TypeOp::Int16Array,
        "Uint16Array" => TypeOp::Uint16Array,
        "Int32Array" => TypeOp::Int32Array,
        "Uint32Array" => TypeOp::Uint32Array,
        "Float32Array" => TypeOp::Float32Array,
        "Float64Array" => TypeOp::Float64Array,
        "BigInt64Array" => TypeOp::BigInt64Array,
        "BigUint64Array" => TypeOp::BigUint64Array,
        "Promise" => TypeOp::Promise,
        "Set" => TypeOp::Set,
        "Map" => TypeOp::Map,
        _ => return None,
    };
    Some(op)
}

/// Built-ins whose opcode consumes operand types from the stream
fn consumes_operand(op: TypeOp) -> bool {
    matches!(op, TypeOp::Promise | TypeOp::Set | TypeOp::Map)
}
