//! Module-level symbol tables
//!
//! Binding is flat: one table per module covering its top-level
//! declarations and import bindings. Block scoping inside function bodies
//! is not modeled here; transforms only resolve names in type positions,
//! which always refer to module scope.

use rustc_hash::FxHashMap;
use vela_ast::{ExportDecl, ImportSpecifier, Module, Statement};

/// Symbol kind (class, enum, import binding, etc.)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolKind {
    /// Variable binding (let/const)
    Variable,
    /// Function declaration
    Function,
    /// Class declaration
    Class,
    /// Interface declaration
    Interface,
    /// Type alias
    TypeAlias,
    /// Enum declaration
    Enum,
    /// Import binding
    Import,
}

/// Where an import binding points
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportTarget {
    /// Module specifier as written in the import
    pub source: String,
    /// Name in the target module (`default` for default imports,
    /// `*` for namespace imports)
    pub imported_name: String,
}

/// A named module-level binding
#[derive(Debug, Clone, PartialEq)]
pub struct Symbol {
    /// Local binding name
    pub name: String,
    /// What kind of declaration introduced the binding
    pub kind: SymbolKind,
    /// Index of the introducing statement in the module
    pub stmt_index: usize,
    /// Is this binding exported from the module?
    pub exported: bool,
    /// Import target, for `SymbolKind::Import` bindings
    pub import: Option<ImportTarget>,
}

/// Symbol table for one module
#[derive(Debug, Default)]
pub struct SymbolTable {
    symbols: FxHashMap<String, Symbol>,
}

impl SymbolTable {
    /// Create an empty table
    pub fn new() -> Self {
        SymbolTable::default()
    }

    /// Define a binding. Later definitions shadow earlier ones, matching
    /// the host language's last-wins module semantics.
    pub fn define(&mut self, symbol: Symbol) {
        self.symbols.insert(symbol.name.clone(), symbol);
    }

    /// Resolve a name to its binding
    pub fn resolve(&self, name: &str) -> Option<&Symbol> {
        self.symbols.get(name)
    }

    /// Iterate all bindings (unordered)
    pub fn iter(&self) -> impl Iterator<Item = &Symbol> {
        self.symbols.values()
    }
}

/// Builds symbol tables from modules
pub struct Binder;

impl Binder {
    /// Bind a module's top-level statements into a symbol table
    pub fn bind_module(module: &Module) -> SymbolTable {
        let mut table = SymbolTable::new();
        for (index, stmt) in module.statements.iter().enumerate() {
            Self::bind_statement(&mut table, stmt, index, false);
        }
        table
    }

    fn bind_statement(table: &mut SymbolTable, stmt: &Statement, index: usize, exported: bool) {
        let define = |table: &mut SymbolTable, name: &str, kind: SymbolKind| {
            table.define(Symbol {
                name: name.to_string(),
                kind,
                stmt_index: index,
                exported,
                import: None,
            });
        };

        match stmt {
            Statement::VariableDecl(decl) => define(table, &decl.name.name, SymbolKind::Variable),
            Statement::FunctionDecl(decl) => define(table, &decl.name.name, SymbolKind::Function),
            Statement::ClassDecl(decl) => define(table, &decl.name.name, SymbolKind::Class),
            Statement::InterfaceDecl(decl) => {
                define(table, &decl.name.name, SymbolKind::Interface)
            }
            Statement::TypeAliasDecl(decl) => define(table, &decl.name.name, SymbolKind::TypeAlias),
            Statement::EnumDecl(decl) => define(table, &decl.name.name, SymbolKind::Enum),
            Statement::ImportDecl(decl) => {
                for spec in &decl.specifiers {
                    let imported_name = match spec {
                        ImportSpecifier::Named(named) => named.name.name.clone(),
                        ImportSpecifier::Default(_) => "default".to_string(),
                        ImportSpecifier::Namespace(_) => "*".to_string(),
                    };
                    table.define(Symbol {
                        name: spec.local_name().to_string(),
                        kind: SymbolKind::Import,
                        stmt_index: index,
                        exported: false,
                        import: Some(ImportTarget {
                            source: decl.source.clone(),
                            imported_name,
                        }),
                    });
                }
            }
            Statement::ExportDecl(ExportDecl::Declaration(inner)) => {
                Self::bind_statement(table, inner, index, true);
            }
            Statement::ExportDecl(ExportDecl::Default(inner)) => {
                // The declaration's own name binds locally; the module
                // exports it under "default"
                Self::bind_statement(table, inner, index, false);
                if let Some(kind) = declaration_kind(inner) {
                    table.define(Symbol {
                        name: "default".to_string(),
                        kind,
                        stmt_index: index,
                        exported: true,
                        import: None,
                    });
                }
            }
            _ => {}
        }
    }
}

fn declaration_kind(stmt: &Statement) -> Option<SymbolKind> {
    match stmt {
        Statement::VariableDecl(_) => Some(SymbolKind::Variable),
        Statement::FunctionDecl(_) => Some(SymbolKind::Function),
        Statement::ClassDecl(_) => Some(SymbolKind::Class),
        Statement::InterfaceDecl(_) => Some(SymbolKind::Interface),
        Statement::TypeAliasDecl(_) => Some(SymbolKind::TypeAlias),
        Statement::EnumDecl(_) => Some(SymbolKind::Enum),
        _ => None,
    }
}
