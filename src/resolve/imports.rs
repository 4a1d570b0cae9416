// src/resolve/imports.rs

//! Regex-based extraction of module specifiers from JavaScript source.
//!
//! This is deliberately shallow: it finds string-literal specifiers in
//! `require(...)`, `import ... from`, `export ... from` and `import(...)`
//! forms. Anything computed at runtime is invisible to it.

use std::sync::OnceLock;

use regex::Regex;

use crate::types::ModuleFormat;

/// The syntactic form an import was found in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportKind {
    /// `const x = require("./module")`
    Cjs,
    /// `import x from "./module"`, `import "./module"`, `export { x } from "./module"`
    Esm,
    /// `import("./module")`
    DynamicImport,
}

/// A single import found in a source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportInfo {
    pub kind: ImportKind,
    /// The raw specifier, e.g. `"./utils"` or `"lodash"`.
    pub specifier: String,
}

impl ImportInfo {
    /// Local specifiers point at a file in the project (`./`, `../` or `/`);
    /// everything else is a package import and is never followed.
    pub fn is_local(&self) -> bool {
        let s = self.specifier.as_str();
        s.starts_with("./") || s.starts_with("../") || s.starts_with('/') || s == "." || s == ".."
    }
}

fn block_comment_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?s)/\*.*?\*/").expect("valid regex"))
}

fn line_comment_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?m)^\s*//.*$").expect("valid regex"))
}

fn require_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"\brequire\s*\(\s*['"]([^'"\n]+)['"]\s*\)"#).expect("valid regex")
    })
}

fn static_import_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"(?m)^\s*import\s+(?:[\w$*{}\s,]+?\s+from\s*)?['"]([^'"\n]+)['"]"#)
            .expect("valid regex")
    })
}

fn export_from_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"(?m)^\s*export\s+[\w$*{}\s,]*?\bfrom\s*['"]([^'"\n]+)['"]"#)
            .expect("valid regex")
    })
}

fn dynamic_import_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"\bimport\s*\(\s*['"]([^'"\n]+)['"]\s*\)"#).expect("valid regex")
    })
}

/// Extract imports from `source` according to `format`.
///
/// CommonJS sources only follow `require`; ESM sources follow static,
/// re-export and dynamic imports. Results keep source order within each
/// form and are not deduplicated.
pub fn extract_imports(source: &str, format: ModuleFormat) -> Vec<ImportInfo> {
    let without_blocks = block_comment_re().replace_all(source, "");
    let code = line_comment_re().replace_all(&without_blocks, "");

    let mut out = Vec::new();
    let mut collect = |re: &Regex, kind: ImportKind| {
        for caps in re.captures_iter(&code) {
            if let Some(m) = caps.get(1) {
                out.push(ImportInfo {
                    kind,
                    specifier: m.as_str().to_string(),
                });
            }
        }
    };

    match format {
        ModuleFormat::CommonJs => collect(require_re(), ImportKind::Cjs),
        ModuleFormat::Esm => {
            collect(static_import_re(), ImportKind::Esm);
            collect(export_from_re(), ImportKind::Esm);
            collect(dynamic_import_re(), ImportKind::DynamicImport);
        }
    }

    out
}
