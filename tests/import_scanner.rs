// tests/import_scanner.rs

use std::error::Error;
use std::sync::Arc;

use watchgraph::errors::WatchgraphError;
use watchgraph::fs::mock::MockFileSystem;
use watchgraph::resolve::{extract_imports, DependencyResolver, ImportKind, ImportScanner};
use watchgraph::types::ModuleFormat;
use watchgraph_test_utils::init_tracing;

type TestResult = Result<(), Box<dyn Error>>;

fn scanner(fs: &MockFileSystem) -> ImportScanner {
    ImportScanner::new(Arc::new(fs.clone()))
}

fn entries(paths: &[&str]) -> Vec<String> {
    paths.iter().map(|p| p.to_string()).collect()
}

fn sorted(mut v: Vec<String>) -> Vec<String> {
    v.sort();
    v
}

#[test]
fn extract_imports_commonjs_follows_require_only() {
    let source = r#"
        const a = require("./a");
        const b = require('../lib/b.js');
        import c from "./c.mjs";
        const lodash = require("lodash");
    "#;

    let imports = extract_imports(source, ModuleFormat::CommonJs);
    let specifiers: Vec<&str> = imports.iter().map(|i| i.specifier.as_str()).collect();

    assert_eq!(specifiers, vec!["./a", "../lib/b.js", "lodash"]);
    assert!(imports.iter().all(|i| i.kind == ImportKind::Cjs));
}

#[test]
fn extract_imports_esm_follows_static_reexport_and_dynamic_forms() {
    let source = r#"
import fs from "node:fs";
import { a, b } from "./a.js";
import "./side-effect.js";
export { helper } from "./helper.js";
export * from "./all.js";
const lazy = await import("./lazy.js");
const cjs = require("./ignored.js");
"#;

    let imports = extract_imports(source, ModuleFormat::Esm);
    let esm: Vec<&str> = imports
        .iter()
        .filter(|i| i.kind == ImportKind::Esm)
        .map(|i| i.specifier.as_str())
        .collect();
    let dynamic: Vec<&str> = imports
        .iter()
        .filter(|i| i.kind == ImportKind::DynamicImport)
        .map(|i| i.specifier.as_str())
        .collect();

    assert_eq!(
        esm,
        vec!["node:fs", "./a.js", "./side-effect.js", "./helper.js", "./all.js"]
    );
    assert_eq!(dynamic, vec!["./lazy.js"]);
    assert!(!imports.iter().any(|i| i.specifier == "./ignored.js"));
}

#[test]
fn extract_imports_skips_commented_out_code() {
    let source = r#"
// const old = require("./old.js");
/* const older = require("./older.js"); */
const current = require("./current.js");
"#;

    let imports = extract_imports(source, ModuleFormat::CommonJs);

    assert_eq!(imports.len(), 1);
    assert_eq!(imports[0].specifier, "./current.js");
}

#[test]
fn only_relative_and_absolute_specifiers_are_local() {
    let imports = extract_imports(
        r#"require("./a"); require("../b"); require("/c"); require("pkg"); require("@scope/pkg");"#,
        ModuleFormat::CommonJs,
    );
    let local: Vec<bool> = imports.iter().map(|i| i.is_local()).collect();

    assert_eq!(local, vec![true, true, true, false, false]);
}

#[test]
fn scan_follows_transitive_local_requires() -> TestResult {
    init_tracing();
    let fs = MockFileSystem::new();
    fs.add_file(
        "./eleventy.config.js",
        r#"const a = require("./lib/a"); const md = require("markdown-it");"#,
    );
    fs.add_file("./lib/a.js", r#"module.exports = require("./b.js");"#);
    fs.add_file("./lib/b.js", r#"module.exports = require("../data.json");"#);
    fs.add_file("./data.json", r#"{ "require": "require(\"./nope.js\")" }"#);

    let found = scanner(&fs).scan(&entries(&["eleventy.config.js"]), ModuleFormat::CommonJs)?;

    assert_eq!(found, vec!["./lib/a.js", "./lib/b.js", "./data.json"]);
    Ok(())
}

#[test]
fn scan_probes_extensions_and_directory_index() -> TestResult {
    init_tracing();
    let fs = MockFileSystem::new();
    fs.add_file(
        "./config.js",
        r#"require("./filters"); require("./shortcodes"); require("./settings");"#,
    );
    fs.add_file("./filters/index.js", "module.exports = {};");
    fs.add_file("./shortcodes.cjs", "module.exports = {};");
    fs.add_file("./settings.json", "{}");

    let found = scanner(&fs).scan(&entries(&["./config.js"]), ModuleFormat::CommonJs)?;

    assert_eq!(
        sorted(found),
        vec!["./filters/index.js", "./settings.json", "./shortcodes.cjs"]
    );
    Ok(())
}

#[test]
fn scan_uses_esm_syntax_when_asked() -> TestResult {
    init_tracing();
    let fs = MockFileSystem::new();
    fs.add_file(
        "./config.mjs",
        "import filters from \"./filters.mjs\";\nconst x = require(\"./cjs-only.js\");\n",
    );
    fs.add_file("./filters.mjs", "export default {};\n");
    fs.add_file("./cjs-only.js", "module.exports = {};\n");

    let esm = scanner(&fs).scan(&entries(&["config.mjs"]), ModuleFormat::Esm)?;
    let cjs = scanner(&fs).scan(&entries(&["config.mjs"]), ModuleFormat::CommonJs)?;

    assert_eq!(esm, vec!["./filters.mjs"]);
    assert_eq!(cjs, vec!["./cjs-only.js"]);
    Ok(())
}

#[test]
fn scan_terminates_on_import_cycles_and_excludes_entries() -> TestResult {
    init_tracing();
    let fs = MockFileSystem::new();
    fs.add_file("./a.js", r#"require("./b.js");"#);
    fs.add_file("./b.js", r#"require("./a.js"); require("./c.js");"#);
    fs.add_file("./c.js", "");

    let found = scanner(&fs).scan(&entries(&["a.js"]), ModuleFormat::CommonJs)?;

    assert_eq!(found, vec!["./b.js", "./c.js"]);
    Ok(())
}

#[test]
fn entry_imported_by_another_entry_is_reported() -> TestResult {
    init_tracing();
    let fs = MockFileSystem::new();
    fs.add_file("./a.js", r#"require("./b.js");"#);
    fs.add_file("./b.js", r#"require("./c.js");"#);
    fs.add_file("./c.js", "");

    let found = scanner(&fs).scan(&entries(&["a.js", "b.js"]), ModuleFormat::CommonJs)?;

    assert_eq!(sorted(found), vec!["./b.js", "./c.js"]);
    Ok(())
}

#[test]
fn entries_scanned_together_match_entries_scanned_apart() -> TestResult {
    init_tracing();
    let fs = MockFileSystem::new();
    fs.add_file("./config.js", r#"require("./lib/filters"); require("./lib/dates");"#);
    fs.add_file("./lib/filters.js", r#"require("./dates.js");"#);
    fs.add_file("./lib/dates.js", "");

    let together = scanner(&fs).scan(
        &entries(&["config.js", "lib/filters.js"]),
        ModuleFormat::CommonJs,
    )?;
    let mut apart = scanner(&fs).scan(&entries(&["config.js"]), ModuleFormat::CommonJs)?;
    for dep in scanner(&fs).scan(&entries(&["lib/filters.js"]), ModuleFormat::CommonJs)? {
        if !apart.contains(&dep) {
            apart.push(dep);
        }
    }

    assert_eq!(sorted(together), sorted(apart));
    Ok(())
}

#[test]
fn scan_skips_imports_that_do_not_resolve() -> TestResult {
    init_tracing();
    let fs = MockFileSystem::new();
    fs.add_file("./a.js", r#"require("./missing"); require("./b");"#);
    fs.add_file("./b.js", "");

    let found = scanner(&fs).scan(&entries(&["a.js"]), ModuleFormat::CommonJs)?;

    assert_eq!(found, vec!["./b.js"]);
    Ok(())
}

#[test]
fn unreadable_entry_is_a_resolution_error() {
    init_tracing();
    let fs = MockFileSystem::new();

    let result = scanner(&fs).scan(&entries(&["missing.config.js"]), ModuleFormat::CommonJs);

    match result {
        Err(WatchgraphError::Resolution { target, .. }) => {
            assert_eq!(target, "./missing.config.js");
        }
        other => panic!("Expected Resolution error, got: {:?}", other),
    }
}

#[tokio::test]
async fn resolver_trait_runs_the_scan_off_the_async_thread() -> TestResult {
    init_tracing();
    let fs = MockFileSystem::new();
    fs.add_file("./a.js", r#"require("./b.js");"#);
    fs.add_file("./b.js", "");
    let resolver: Arc<dyn DependencyResolver> = Arc::new(scanner(&fs));

    let targets = entries(&["./a.js"]);
    let found = resolver
        .resolve_dependencies(&targets, ModuleFormat::CommonJs)
        .await?;

    assert_eq!(found, vec!["./b.js"]);
    Ok(())
}
