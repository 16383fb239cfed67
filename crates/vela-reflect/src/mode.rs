//! Reflection-mode oracle
//!
//! Decides per declaration whether reflection metadata is emitted. First
//! match wins: the nearest enclosing `@reflection` doc tag, then the
//! session override supplied by the host application, then the nearest
//! ancestor directory whose `vela.json` carries a `reflection` field, and
//! finally `never`.
//!
//! Configuration files are JSON with comments permitted; lookups are
//! memoized per directory so each unique path is read once per pass.

use std::path::{Path, PathBuf};

use rustc_hash::FxHashMap;
use serde::Deserialize;
use thiserror::Error;

/// Configuration file probed in each ancestor directory
pub const CONFIG_FILE: &str = "vela.json";

/// Per-declaration reflection policy
///
/// Only `Never` suppresses emission; `Default` and `Always` gate
/// identically and differ solely for runtime consumers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReflectionMode {
    /// Skip the declaration entirely
    Never,
    /// Emit metadata
    Default,
    /// Emit metadata
    Always,
}

impl ReflectionMode {
    /// Parse a mode string; boolean-like spellings map onto the
    /// default/never pair
    pub fn parse(text: &str) -> Option<Self> {
        match text {
            "never" | "false" => Some(ReflectionMode::Never),
            "default" | "true" => Some(ReflectionMode::Default),
            "always" => Some(ReflectionMode::Always),
            _ => None,
        }
    }

    /// Check whether this mode allows emission
    pub fn enabled(self) -> bool {
        !matches!(self, ReflectionMode::Never)
    }
}

/// Errors raised while loading a configuration file
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file exists but could not be read
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file's JSON did not parse
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Deserialize)]
struct ConfigFile {
    reflection: Option<serde_json::Value>,
}

/// Resolves the effective reflection mode for declarations
#[derive(Debug, Default)]
pub struct ReflectionOracle {
    session_override: Option<ReflectionMode>,
    dir_cache: FxHashMap<PathBuf, Option<ReflectionMode>>,
}

impl ReflectionOracle {
    /// Create an oracle with no override and an empty cache
    pub fn new() -> Self {
        ReflectionOracle::default()
    }

    /// Set or clear the session override supplied by the host application
    pub fn set_override(&mut self, mode: Option<ReflectionMode>) {
        self.session_override = mode;
    }

    /// Resolve the effective mode for a declaration in `source_path`.
    ///
    /// `annotated` is the nearest `@reflection` tag on the declaration or
    /// an enclosing one, already parsed by the caller walking the parent
    /// chain.
    pub fn resolve(&mut self, annotated: Option<ReflectionMode>, source_path: &Path) -> ReflectionMode {
        if let Some(mode) = annotated {
            return mode;
        }
        if let Some(mode) = self.session_override {
            return mode;
        }
        if let Some(mode) = self.configured(source_path) {
            return mode;
        }
        ReflectionMode::Never
    }

    /// Walk the file's directory upward; the first ancestor whose config
    /// carries the field wins
    fn configured(&mut self, source_path: &Path) -> Option<ReflectionMode> {
        let mut dir = source_path.parent();
        while let Some(current) = dir {
            if let Some(mode) = self.dir_mode(current) {
                return Some(mode);
            }
            dir = current.parent();
        }
        None
    }

    fn dir_mode(&mut self, dir: &Path) -> Option<ReflectionMode> {
        if let Some(cached) = self.dir_cache.get(dir) {
            return *cached;
        }
        let mode = match load_config(&dir.join(CONFIG_FILE)) {
            Ok(Some(config)) => config.reflection.and_then(mode_from_value),
            Ok(None) => None,
            Err(err) => {
                eprintln!("vela-reflect: warning: {err}");
                None
            }
        };
        self.dir_cache.insert(dir.to_path_buf(), mode);
        mode
    }
}

/// Read and parse a config file; a missing file is not an error
fn load_config(path: &Path) -> Result<Option<ConfigFile>, ConfigError> {
    let text = match std::fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(err) => {
            return Err(ConfigError::Io {
                path: path.to_path_buf(),
                source: err,
            })
        }
    };
    serde_json::from_str(&strip_comments(&text))
        .map(Some)
        .map_err(|err| ConfigError::Parse {
            path: path.to_path_buf(),
            source: err,
        })
}

fn mode_from_value(value: serde_json::Value) -> Option<ReflectionMode> {
    match value {
        serde_json::Value::String(text) => ReflectionMode::parse(&text),
        serde_json::Value::Bool(true) => Some(ReflectionMode::Default),
        serde_json::Value::Bool(false) => Some(ReflectionMode::Never),
        _ => None,
    }
}

/// Remove `//` and `/* */` comments from JSON text, leaving string
/// contents untouched
fn strip_comments(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    let mut in_string = false;

    while let Some(c) = chars.next() {
        if in_string {
            out.push(c);
            match c {
                '\\' => {
                    if let Some(escaped) = chars.next() {
                        out.push(escaped);
                    }
                }
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match c {
            '"' => {
                in_string = true;
                out.push(c);
            }
            '/' => match chars.peek() {
                Some('/') => {
                    for next in chars.by_ref() {
                        if next == '\n' {
                            out.push('\n');
                            break;
                        }
                    }
                }
                Some('*') => {
                    chars.next();
                    let mut prev = '\0';
                    for next in chars.by_ref() {
                        if prev == '*' && next == '/' {
                            break;
                        }
                        prev = next;
                    }
                }
                _ => out.push(c),
            },
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_mode_strings_and_booleans() {
        assert_eq!(ReflectionMode::parse("never"), Some(ReflectionMode::Never));
        assert_eq!(ReflectionMode::parse("default"), Some(ReflectionMode::Default));
        assert_eq!(ReflectionMode::parse("always"), Some(ReflectionMode::Always));
        assert_eq!(ReflectionMode::parse("true"), Some(ReflectionMode::Default));
        assert_eq!(ReflectionMode::parse("false"), Some(ReflectionMode::Never));
        assert_eq!(ReflectionMode::parse("sometimes"), None);
    }

    #[test]
    fn only_never_suppresses() {
        assert!(!ReflectionMode::Never.enabled());
        assert!(ReflectionMode::Default.enabled());
        assert!(ReflectionMode::Always.enabled());
    }

    #[test]
    fn annotation_beats_override() {
        let mut oracle = ReflectionOracle::new();
        oracle.set_override(Some(ReflectionMode::Default));
        let mode = oracle.resolve(Some(ReflectionMode::Never), Path::new("/nowhere/a.vela"));
        assert_eq!(mode, ReflectionMode::Never);
    }

    #[test]
    fn override_beats_configuration_fallback() {
        let mut oracle = ReflectionOracle::new();
        oracle.set_override(Some(ReflectionMode::Always));
        let mode = oracle.resolve(None, Path::new("/nowhere/a.vela"));
        assert_eq!(mode, ReflectionMode::Always);
    }

    #[test]
    fn defaults_to_never() {
        let mut oracle = ReflectionOracle::new();
        let mode = oracle.resolve(None, Path::new("/nowhere/a.vela"));
        assert_eq!(mode, ReflectionMode::Never);
    }

    #[test]
    fn strips_line_and_block_comments() {
        let text = "{\n  // enable\n  \"reflection\": /* inline */ true\n}";
        let config: ConfigFile = serde_json::from_str(&strip_comments(text)).unwrap();
        assert_eq!(config.reflection, Some(serde_json::Value::Bool(true)));
    }

    #[test]
    fn comment_markers_inside_strings_survive() {
        let text = "{ \"reflection\": \"never\", \"note\": \"see https://example\" }";
        let stripped = strip_comments(text);
        assert!(stripped.contains("https://example"));
        let config: ConfigFile = serde_json::from_str(&stripped).unwrap();
        assert_eq!(
            config.reflection,
            Some(serde_json::Value::String("never".into()))
        );
    }

    #[test]
    fn config_walk_reads_nearest_ancestor() {
        let root = tempfile::tempdir().unwrap();
        let nested = root.path().join("a/b");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(
            root.path().join(CONFIG_FILE),
            "{ \"reflection\": \"default\" }",
        )
        .unwrap();
        std::fs::write(nested.join(CONFIG_FILE), "{ \"reflection\": \"never\" }").unwrap();

        let mut oracle = ReflectionOracle::new();
        let inner = oracle.resolve(None, &nested.join("m.vela"));
        assert_eq!(inner, ReflectionMode::Never);

        let outer = oracle.resolve(None, &root.path().join("m.vela"));
        assert_eq!(outer, ReflectionMode::Default);
    }

    #[test]
    fn ancestors_without_the_field_defer_upward() {
        let root = tempfile::tempdir().unwrap();
        let nested = root.path().join("src");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(root.path().join(CONFIG_FILE), "{ \"reflection\": true }").unwrap();
        // Present but silent on reflection
        std::fs::write(nested.join(CONFIG_FILE), "{ \"strict\": true }").unwrap();

        let mut oracle = ReflectionOracle::new();
        let mode = oracle.resolve(None, &nested.join("m.vela"));
        assert_eq!(mode, ReflectionMode::Default);
    }

    #[test]
    fn unparseable_config_falls_through() {
        let root = tempfile::tempdir().unwrap();
        let nested = root.path().join("src");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(root.path().join(CONFIG_FILE), "{ \"reflection\": true }").unwrap();
        std::fs::write(nested.join(CONFIG_FILE), "{ not json").unwrap();

        let mut oracle = ReflectionOracle::new();
        let mode = oracle.resolve(None, &nested.join("m.vela"));
        assert_eq!(mode, ReflectionMode::Default);
    }

    #[test]
    fn lookups_are_cached_per_directory() {
        let root = tempfile::tempdir().unwrap();
        let config = root.path().join(CONFIG_FILE);
        std::fs::write(&config, "{ \"reflection\": \"always\" }").unwrap();

        let mut oracle = ReflectionOracle::new();
        assert_eq!(
            oracle.resolve(None, &root.path().join("m.vela")),
            ReflectionMode::Always
        );

        // A change on disk is not observed within the same pass
        std::fs::write(&config, "{ \"reflection\": \"never\" }").unwrap();
        assert_eq!(
            oracle.resolve(None, &root.path().join("m.vela")),
            ReflectionMode::Always
        );
    }
}
