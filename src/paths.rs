// src/paths.rs

//! Path normalization shared by the target registry, the dependency graph and
//! the watcher.
//!
//! Every path that enters the registry goes through [`add_leading_dot_slash`],
//! so identity is plain string equality: `a.js`, `./a.js` and `.\a.js` all
//! become `./a.js`.

use std::path::{Component, Path};

use crate::fs::FileSystem;

/// Canonical relative form: forward slashes, and a `./` prefix on anything
/// that is not already absolute or explicitly relative.
///
/// - `"."` / `".."` become `"./"` / `"../"`.
/// - `"/abs/x.js"`, `"./x.js"` and `"../x.js"` are kept as-is.
/// - Everything else, globs included, gets `"./"` prepended.
pub fn add_leading_dot_slash(path: &str) -> String {
    let path = path.replace('\\', "/");

    if path == "." || path == ".." {
        return format!("{path}/");
    }

    if path.starts_with("./")
        || path.starts_with("../")
        || path.starts_with('/')
        || Path::new(&path).is_absolute()
    {
        return path;
    }

    format!("./{path}")
}

/// Convert a target into a pattern matching it and everything beneath it.
///
/// An empty target means the project root (`./**`). A directory gets `/**`
/// appended. Files and patterns are only normalized.
pub fn to_recursive_glob(fs: &dyn FileSystem, path: &str) -> String {
    if path.is_empty() {
        return "./**".to_string();
    }

    let path = add_leading_dot_slash(path);
    if fs.is_dir(Path::new(&path)) {
        if path.ends_with('/') {
            format!("{path}**")
        } else {
            format!("{path}/**")
        }
    } else {
        path
    }
}

/// Collapse `.` and `..` segments lexically, then apply
/// [`add_leading_dot_slash`].
///
/// Leading `..` segments that climb above the starting point are kept, so
/// `./a/../../b.js` becomes `../b.js`. Nothing is read from disk.
pub fn clean(path: &Path) -> String {
    let mut parts: Vec<String> = Vec::new();
    let mut absolute_prefix = String::new();

    for component in path.components() {
        match component {
            Component::Prefix(p) => absolute_prefix.push_str(&p.as_os_str().to_string_lossy()),
            Component::RootDir => absolute_prefix.push('/'),
            Component::CurDir => {}
            Component::ParentDir => match parts.last() {
                Some(last) if last != ".." => {
                    parts.pop();
                }
                _ if !absolute_prefix.is_empty() => {}
                _ => parts.push("..".to_string()),
            },
            Component::Normal(s) => parts.push(s.to_string_lossy().into_owned()),
        }
    }

    let joined = parts.join("/");
    if !absolute_prefix.is_empty() {
        return format!("{absolute_prefix}{joined}");
    }
    if joined.is_empty() {
        return "./".to_string();
    }
    add_leading_dot_slash(&joined)
}
