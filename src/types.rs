use std::fmt;

/// How the dependency resolver should read module source.
///
/// - `CommonJs`: follow `require("./x")` calls (default).
/// - `Esm`: follow `import ... from "./x"`, bare `import "./x"`,
///   `export ... from "./x"` and dynamic `import("./x")`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ModuleFormat {
    #[default]
    CommonJs,
    Esm,
}

impl ModuleFormat {
    /// Map the `use_esm` configuration flag onto a format.
    pub fn from_esm_flag(is_esm: bool) -> Self {
        if is_esm {
            ModuleFormat::Esm
        } else {
            ModuleFormat::CommonJs
        }
    }
}

impl fmt::Display for ModuleFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModuleFormat::CommonJs => f.write_str("commonjs"),
            ModuleFormat::Esm => f.write_str("esm"),
        }
    }
}
