//! The per-file transformer pass
//!
//! Runs in two phases so extraction can read the whole program while
//! decoration mutates one file. The read phase visits the file's top-level
//! declarations in order, consults the mode oracle, and extracts a pack
//! per reflectable declaration (per member, for classes). The mutation
//! phase installs the packs and marks consumed import specifiers as
//! synthesized so the emitter keeps them.
//!
//! The pass is synchronous and single-threaded; the only process-wide
//! state is the one-shot activation banner.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};

use rustc_hash::FxHashSet;
use vela_ast::visitor::Visitor;
use vela_ast::*;
use vela_checker::{Program, SourceFile, TypeChecker};

use crate::decorate::{decorate_class, function_type_assignment, wrap_callable};
use crate::extract::TypeExtractor;
use crate::mode::{ReflectionMode, ReflectionOracle};
use crate::pack::{pack, Packed};

/// Doc tag controlling per-declaration reflection
pub const REFLECTION_TAG: &str = "reflection";

static ANNOUNCED: AtomicBool = AtomicBool::new(false);

/// The reflection transformer
///
/// One instance covers one compilation; it owns the configuration cache
/// and the session override, and builds symbol tables lazily per file.
pub struct Transformer {
    oracle: ReflectionOracle,
}

impl Default for Transformer {
    fn default() -> Self {
        Transformer::new()
    }
}

impl Transformer {
    /// Create a transformer, announcing activation on first construction
    pub fn new() -> Self {
        if !ANNOUNCED.swap(true, Ordering::Relaxed) {
            eprintln!("vela-reflect: type reflection transformer active");
        }
        Transformer {
            oracle: ReflectionOracle::new(),
        }
    }

    /// Set or clear the session-wide reflection mode override
    pub fn set_reflection_override(&mut self, mode: Option<ReflectionMode>) {
        self.oracle.set_override(mode);
    }

    /// Transform one file of the program in place
    pub fn transform_file(&mut self, program: &mut Program, path: &Path) {
        let Some(source) = program.file(path) else {
            return;
        };
        let mut collector = Collector {
            checker: TypeChecker::new(program),
            oracle: &mut self.oracle,
            file_path: source.path.clone(),
            index: 0,
            decorations: Vec::new(),
            used_imports: FxHashSet::default(),
        };
        collector.visit_module(&source.module);
        let (decorations, used_imports) = (collector.decorations, collector.used_imports);

        if decorations.is_empty() && used_imports.is_empty() {
            return;
        }
        if let Some(file) = program.file_mut(path) {
            apply(file, decorations, &used_imports);
        }
    }
}

/// A recorded installation, applied after the read phase
enum Decoration {
    /// Static `__type` object on the class at `index`
    ClassType {
        index: usize,
        packs: Vec<(String, Packed)>,
    },
    /// `name.__type = <packed>;` inserted after the declaration at `index`
    FunctionType {
        index: usize,
        name: String,
        packed: Packed,
    },
    /// `Object.assign` wrap of the initializer at `index`
    InitializerWrap { index: usize, packed: Packed },
}

/// Read-phase visitor over one file's top-level declarations
struct Collector<'a, 'p> {
    checker: TypeChecker<'p>,
    oracle: &'a mut ReflectionOracle,
    file_path: PathBuf,
    /// Index of the top-level statement currently visited
    index: usize,
    decorations: Vec<Decoration>,
    /// Local names of import bindings the packs reference at runtime
    used_imports: FxHashSet<String>,
}

impl Visitor for Collector<'_, '_> {
    fn visit_module(&mut self, module: &Module) {
        for (index, stmt) in module.statements.iter().enumerate() {
            self.index = index;
            self.visit_statement(stmt);
        }
    }

    fn visit_class_decl(&mut self, class: &ClassDecl) {
        // Deliberately no descent: nested declarations keep their
        // enclosing statement's index and are not decorated
        let class_tag = doc_mode(class.doc.as_ref());
        if !self.oracle.resolve(class_tag, &self.file_path).enabled() {
            return;
        }

        let mut packs = Vec::new();
        for member in &class.members {
            let (name, doc) = match member {
                ClassMember::Property(p) => (p.name.name.as_str(), p.doc.as_ref()),
                ClassMember::Method(m) => (m.name.name.as_str(), m.doc.as_ref()),
                ClassMember::Constructor(c) => ("constructor", c.doc.as_ref()),
            };
            // Member tags shadow the class tag in the parent chain
            let annotated = doc_mode(doc).or(class_tag);
            if !self.oracle.resolve(annotated, &self.file_path).enabled() {
                continue;
            }

            let mut extractor = TypeExtractor::new(&mut self.checker, &self.file_path);
            match member {
                ClassMember::Property(p) => extractor.extract_property(p),
                ClassMember::Method(m) => extractor.extract_method(m),
                ClassMember::Constructor(c) => extractor.extract_constructor(c),
            }
            let (ps, used) = extractor.finish();
            if ps.is_empty() {
                continue;
            }
            self.used_imports.extend(used);
            packs.push((name.to_string(), pack(ps)));
        }

        if !packs.is_empty() {
            self.decorations.push(Decoration::ClassType {
                index: self.index,
                packs,
            });
        }
    }

    fn visit_function_decl(&mut self, func: &FunctionDecl) {
        if !self
            .oracle
            .resolve(doc_mode(func.doc.as_ref()), &self.file_path)
            .enabled()
        {
            return;
        }
        let mut extractor = TypeExtractor::new(&mut self.checker, &self.file_path);
        extractor.extract_function_decl(func);
        let (ps, used) = extractor.finish();
        if ps.is_empty() {
            return;
        }
        self.used_imports.extend(used);
        self.decorations.push(Decoration::FunctionType {
            index: self.index,
            name: func.name.name.clone(),
            packed: pack(ps),
        });
    }

    fn visit_variable_decl(&mut self, var: &VariableDecl) {
        let Some(init) = &var.initializer else {
            return;
        };
        if !self
            .oracle
            .resolve(doc_mode(var.doc.as_ref()), &self.file_path)
            .enabled()
        {
            return;
        }
        let mut extractor = TypeExtractor::new(&mut self.checker, &self.file_path);
        match peel(init) {
            Expression::Arrow(arrow) => extractor.extract_arrow(arrow),
            Expression::FunctionExpr(func) if func.name.is_none() => {
                extractor.extract_function_expression(func)
            }
            _ => return,
        }
        let (ps, used) = extractor.finish();
        if ps.is_empty() {
            return;
        }
        self.used_imports.extend(used);
        self.decorations.push(Decoration::InitializerWrap {
            index: self.index,
            packed: pack(ps),
        });
    }
}

/// Mutation phase: install decorations back-to-front so recorded indices
/// stay valid across insertions, then flag the consumed imports
fn apply(file: &mut SourceFile, decorations: Vec<Decoration>, used_imports: &FxHashSet<String>) {
    for decoration in decorations.into_iter().rev() {
        match decoration {
            Decoration::ClassType { index, packs } => {
                if let Some(class) = class_decl_mut(&mut file.module.statements[index]) {
                    decorate_class(class, packs);
                }
            }
            Decoration::FunctionType {
                index,
                name,
                packed,
            } => {
                file.module
                    .statements
                    .insert(index + 1, function_type_assignment(&name, packed));
            }
            Decoration::InitializerWrap { index, packed } => {
                if let Some(var) = variable_decl_mut(&mut file.module.statements[index]) {
                    if let Some(init) = var.initializer.take() {
                        var.initializer = Some(wrap_callable(init, packed));
                    }
                }
            }
        }
    }

    if used_imports.is_empty() {
        return;
    }
    for stmt in &mut file.module.statements {
        let Statement::ImportDecl(import) = stmt else {
            continue;
        };
        for spec in &mut import.specifiers {
            match spec {
                ImportSpecifier::Named(named) => {
                    let local = named
                        .alias
                        .as_ref()
                        .map(|a| a.name.as_str())
                        .unwrap_or(&named.name.name);
                    if used_imports.contains(local) {
                        named.synthesized = true;
                    }
                }
                ImportSpecifier::Default(binding) | ImportSpecifier::Namespace(binding) => {
                    if used_imports.contains(binding.name.name.as_str()) {
                        binding.synthesized = true;
                    }
                }
            }
        }
    }
}

fn doc_mode(doc: Option<&DocComment>) -> Option<ReflectionMode> {
    doc.and_then(|d| d.tag(REFLECTION_TAG))
        .and_then(ReflectionMode::parse)
}

fn peel(expr: &Expression) -> &Expression {
    match expr {
        Expression::Parenthesized(inner) => peel(inner),
        other => other,
    }
}

fn class_decl_mut(stmt: &mut Statement) -> Option<&mut ClassDecl> {
    match stmt {
        Statement::ClassDecl(class) => Some(class),
        Statement::ExportDecl(ExportDecl::Declaration(inner))
        | Statement::ExportDecl(ExportDecl::Default(inner)) => class_decl_mut(inner),
        _ => None,
    }
}

fn variable_decl_mut(stmt: &mut Statement) -> Option<&mut VariableDecl> {
    match stmt {
        Statement::VariableDecl(var) => Some(var),
        Statement::ExportDecl(ExportDecl::Declaration(inner))
        | Statement::ExportDecl(ExportDecl::Default(inner)) => variable_decl_mut(inner),
        _ => None,
    }
}
