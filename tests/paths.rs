// tests/paths.rs

use std::path::Path;

use watchgraph::fs::mock::MockFileSystem;
use watchgraph::paths::{add_leading_dot_slash, clean, to_recursive_glob};
use watchgraph::watch::relative_watch_path;

#[test]
fn leading_dot_slash_is_added_once() {
    assert_eq!(add_leading_dot_slash("a.js"), "./a.js");
    assert_eq!(add_leading_dot_slash("./a.js"), "./a.js");
    assert_eq!(add_leading_dot_slash("src/**/*.njk"), "./src/**/*.njk");
    assert_eq!(add_leading_dot_slash("../outside.js"), "../outside.js");
    assert_eq!(add_leading_dot_slash("/abs/a.js"), "/abs/a.js");
}

#[test]
fn dot_paths_and_backslashes_are_normalized() {
    assert_eq!(add_leading_dot_slash("."), "./");
    assert_eq!(add_leading_dot_slash(".."), "../");
    assert_eq!(add_leading_dot_slash(r"src\a.js"), "./src/a.js");
    assert_eq!(add_leading_dot_slash(r".\a.js"), "./a.js");
}

#[test]
fn recursive_glob_only_extends_directories() {
    let fs = MockFileSystem::new();
    fs.add_file("./_includes/base.njk", "");
    fs.add_dir("./assets/");

    assert_eq!(to_recursive_glob(&fs, ""), "./**");
    assert_eq!(to_recursive_glob(&fs, "_includes"), "./_includes/**");
    assert_eq!(to_recursive_glob(&fs, "./_includes"), "./_includes/**");
    assert_eq!(to_recursive_glob(&fs, "assets/"), "./assets/**");
    assert_eq!(to_recursive_glob(&fs, "_includes/base.njk"), "./_includes/base.njk");
    assert_eq!(to_recursive_glob(&fs, "posts/*.md"), "./posts/*.md");
}

#[test]
fn clean_collapses_dot_segments() {
    assert_eq!(clean(Path::new("./lib/../a.js")), "./a.js");
    assert_eq!(clean(Path::new("lib/./b/c.js")), "./lib/b/c.js");
    assert_eq!(clean(Path::new("./a/../../b.js")), "../b.js");
    assert_eq!(clean(Path::new("./a/..")), "./");
    assert_eq!(clean(Path::new("/root/x/../y.js")), "/root/y.js");
}

#[test]
fn watch_paths_are_relative_to_the_root() {
    let root = Path::new("/project");

    assert_eq!(
        relative_watch_path(root, Path::new("/project/src/a.js")),
        Some("./src/a.js".to_string())
    );
    assert_eq!(relative_watch_path(root, Path::new("/project")), None);
}
