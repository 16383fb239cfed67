//! Program model and module specifier resolution
//!
//! A [`Program`] is the set of parsed source files taking part in one
//! compilation, keyed by absolute path. Specifier resolution handles the
//! relative forms the emitter understands (`./model`, `../lib/ids.vela`),
//! probing the `.vela` extension when the specifier omits it.

use std::path::{Component, Path, PathBuf};

use rustc_hash::FxHashMap;
use vela_ast::Module;

/// Source file extension probed when a specifier omits it
pub const SOURCE_EXTENSION: &str = "vela";

/// A parsed source file
#[derive(Debug, Clone)]
pub struct SourceFile {
    /// Absolute path the file was loaded from
    pub path: PathBuf,
    /// Parsed module
    pub module: Module,
}

/// The set of source files in one compilation
#[derive(Debug, Default)]
pub struct Program {
    files: FxHashMap<PathBuf, SourceFile>,
}

impl Program {
    /// Create an empty program
    pub fn new() -> Self {
        Program::default()
    }

    /// Add a parsed file. Replaces any previous file at the same path.
    pub fn add_file(&mut self, path: impl Into<PathBuf>, module: Module) {
        let path = normalize(&path.into());
        self.files.insert(
            path.clone(),
            SourceFile { path, module },
        );
    }

    /// Look up a file by path
    pub fn file(&self, path: &Path) -> Option<&SourceFile> {
        self.files.get(&normalize(path))
    }

    /// Look up a file mutably by path
    pub fn file_mut(&mut self, path: &Path) -> Option<&mut SourceFile> {
        self.files.get_mut(&normalize(path))
    }

    /// Number of files in the program
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Check whether the program holds no files
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Resolve a module specifier appearing in `from` to the referenced
    /// source file.
    ///
    /// Only relative specifiers resolve; bare package names are outside the
    /// emitter's purview and yield `None`.
    pub fn resolve_specifier(&self, from: &Path, specifier: &str) -> Option<&SourceFile> {
        if !specifier.starts_with("./") && !specifier.starts_with("../") {
            return None;
        }
        let base = from.parent()?;
        let candidate = normalize(&base.join(specifier));
        if let Some(file) = self.files.get(&candidate) {
            return Some(file);
        }
        let with_ext = candidate.with_extension(SOURCE_EXTENSION);
        self.files.get(&with_ext)
    }
}

/// Lexical path normalization: folds `.` and `..` without touching the
/// filesystem. Paths in a program are already absolute, so `..` at the root
/// simply drops.
fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empty_module() -> Module {
        Module::new(Vec::new())
    }

    #[test]
    fn resolves_relative_specifier_with_extension_probe() {
        let mut program = Program::new();
        program.add_file("/app/src/main.vela", empty_module());
        program.add_file("/app/src/model.vela", empty_module());

        let found = program
            .resolve_specifier(Path::new("/app/src/main.vela"), "./model")
            .expect("resolved");
        assert_eq!(found.path, Path::new("/app/src/model.vela"));
    }

    #[test]
    fn resolves_parent_directory_specifier() {
        let mut program = Program::new();
        program.add_file("/app/src/sub/main.vela", empty_module());
        program.add_file("/app/src/ids.vela", empty_module());

        let found = program
            .resolve_specifier(Path::new("/app/src/sub/main.vela"), "../ids.vela")
            .expect("resolved");
        assert_eq!(found.path, Path::new("/app/src/ids.vela"));
    }

    #[test]
    fn bare_specifiers_do_not_resolve() {
        let mut program = Program::new();
        program.add_file("/app/main.vela", empty_module());
        assert!(program
            .resolve_specifier(Path::new("/app/main.vela"), "logging")
            .is_none());
    }
}
