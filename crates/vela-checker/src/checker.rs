//! Symbol and declaration queries over a program
//!
//! The checker answers the two questions transforms ask: which binding does
//! a name refer to at a location, and which declaration does a symbol
//! originate from. Symbol tables are built lazily, once per file, and kept
//! for the lifetime of the checker.

use std::path::{Path, PathBuf};

use rustc_hash::FxHashMap;
use vela_ast::{
    ClassDecl, EnumDecl, ExportDecl, FunctionDecl, InterfaceDecl, Statement, TypeAliasDecl,
    VariableDecl,
};

use crate::program::{Program, SourceFile};
use crate::symbols::{Binder, Symbol, SymbolKind, SymbolTable};

/// A resolved declaration, borrowed from the program
#[derive(Debug, Clone, Copy)]
pub enum DeclRef<'a> {
    Class(&'a ClassDecl),
    Interface(&'a InterfaceDecl),
    Enum(&'a EnumDecl),
    TypeAlias(&'a TypeAliasDecl),
    Function(&'a FunctionDecl),
    Variable(&'a VariableDecl),
}

impl<'a> DeclRef<'a> {
    /// Convert a statement into a declaration reference, unwrapping an
    /// export wrapper if present
    pub fn from_statement(stmt: &'a Statement) -> Option<Self> {
        match stmt {
            Statement::ClassDecl(d) => Some(DeclRef::Class(d)),
            Statement::InterfaceDecl(d) => Some(DeclRef::Interface(d)),
            Statement::EnumDecl(d) => Some(DeclRef::Enum(d)),
            Statement::TypeAliasDecl(d) => Some(DeclRef::TypeAlias(d)),
            Statement::FunctionDecl(d) => Some(DeclRef::Function(d)),
            Statement::VariableDecl(d) => Some(DeclRef::Variable(d)),
            Statement::ExportDecl(ExportDecl::Declaration(inner))
            | Statement::ExportDecl(ExportDecl::Default(inner)) => DeclRef::from_statement(inner),
            _ => None,
        }
    }

    /// Declared name
    pub fn name(&self) -> &str {
        match self {
            DeclRef::Class(d) => &d.name.name,
            DeclRef::Interface(d) => &d.name.name,
            DeclRef::Enum(d) => &d.name.name,
            DeclRef::TypeAlias(d) => &d.name.name,
            DeclRef::Function(d) => &d.name.name,
            DeclRef::Variable(d) => &d.name.name,
        }
    }
}

/// Symbol and declaration queries over one [`Program`]
pub struct TypeChecker<'a> {
    program: &'a Program,
    tables: FxHashMap<PathBuf, SymbolTable>,
}

impl<'a> TypeChecker<'a> {
    /// Create a checker over a program
    pub fn new(program: &'a Program) -> Self {
        TypeChecker {
            program,
            tables: FxHashMap::default(),
        }
    }

    /// The underlying program
    pub fn program(&self) -> &'a Program {
        self.program
    }

    /// Resolve a name at a location to its module-level binding
    pub fn symbol_at(&mut self, file: &Path, name: &str) -> Option<Symbol> {
        self.table(file)?.resolve(name).cloned()
    }

    /// Find the declaration a symbol in `file` originates from.
    ///
    /// For import bindings this follows the module specifier and looks up
    /// the target module's own exported declaration. Indirect exports
    /// (re-export chains) are not chased here; callers fall back to an
    /// export search when this yields nothing.
    pub fn declaration_of(&mut self, file: &Path, symbol: &Symbol) -> Option<DeclRef<'a>> {
        if symbol.kind != SymbolKind::Import {
            let source = self.program.file(file)?;
            return DeclRef::from_statement(source.module.statements.get(symbol.stmt_index)?);
        }

        let target = symbol.import.as_ref()?;
        let resolved = self.program.resolve_specifier(file, &target.source)?;
        let resolved_path = resolved.path.clone();
        self.exported_declaration(&resolved_path, &target.imported_name)
    }

    /// Find a declaration exported directly from `file` under `name`
    pub fn exported_declaration(&mut self, file: &Path, name: &str) -> Option<DeclRef<'a>> {
        let table = self.table(file)?;
        let symbol = table.resolve(name)?.clone();
        if symbol.kind == SymbolKind::Import || !symbol.exported {
            return None;
        }
        let source = self.program.file(file)?;
        DeclRef::from_statement(source.module.statements.get(symbol.stmt_index)?)
    }

    /// Resolve a module specifier relative to `from`
    pub fn resolve_specifier(&self, from: &Path, specifier: &str) -> Option<&'a SourceFile> {
        self.program.resolve_specifier(from, specifier)
    }

    fn table(&mut self, file: &Path) -> Option<&SymbolTable> {
        let source = self.program.file(file)?;
        let path = source.path.clone();
        Some(
            self.tables
                .entry(path)
                .or_insert_with(|| Binder::bind_module(&source.module)),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vela_ast::*;

    fn exported_class(name: &str) -> Statement {
        Statement::ExportDecl(ExportDecl::Declaration(Box::new(Statement::ClassDecl(
            ClassDecl {
                doc: None,
                is_abstract: false,
                name: Identifier::new(name),
                type_params: None,
                extends: None,
                members: Vec::new(),
                span: Span::synthesized(),
            },
        ))))
    }

    fn import_of(name: &str, source: &str) -> Statement {
        Statement::ImportDecl(ImportDecl {
            specifiers: vec![ImportSpecifier::Named(NamedImport::plain(Identifier::new(
                name,
            )))],
            source: source.to_string(),
            span: Span::synthesized(),
        })
    }

    #[test]
    fn follows_import_to_declaration() {
        let mut program = Program::new();
        program.add_file("/app/model.vela", Module::new(vec![exported_class("Model")]));
        program.add_file(
            "/app/main.vela",
            Module::new(vec![import_of("Model", "./model")]),
        );

        let mut checker = TypeChecker::new(&program);
        let symbol = checker
            .symbol_at(Path::new("/app/main.vela"), "Model")
            .expect("symbol");
        assert_eq!(symbol.kind, SymbolKind::Import);

        let decl = checker
            .declaration_of(Path::new("/app/main.vela"), &symbol)
            .expect("declaration");
        assert!(matches!(decl, DeclRef::Class(c) if c.name.name == "Model"));
    }

    #[test]
    fn import_of_reexported_name_is_not_direct() {
        // main imports from barrel, which only re-exports from model
        let mut program = Program::new();
        program.add_file("/app/model.vela", Module::new(vec![exported_class("Model")]));
        program.add_file(
            "/app/barrel.vela",
            Module::new(vec![Statement::ExportDecl(ExportDecl::Named {
                specifiers: vec![ExportSpecifier {
                    name: Identifier::new("Model"),
                    alias: None,
                }],
                source: Some("./model".to_string()),
                span: Span::synthesized(),
            })]),
        );
        program.add_file(
            "/app/main.vela",
            Module::new(vec![import_of("Model", "./barrel")]),
        );

        let mut checker = TypeChecker::new(&program);
        let symbol = checker
            .symbol_at(Path::new("/app/main.vela"), "Model")
            .expect("symbol");
        // The direct query fails; re-export traversal is the caller's fallback
        assert!(checker
            .declaration_of(Path::new("/app/main.vela"), &symbol)
            .is_none());
    }
}
