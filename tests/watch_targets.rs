// tests/watch_targets.rs

use std::error::Error;
use std::sync::Arc;

use watchgraph::errors::WatchgraphError;
use watchgraph::fs::mock::MockFileSystem;
use watchgraph::targets::WatchTargets;
use watchgraph::types::ModuleFormat;
use watchgraph_test_utils::builders::{targets_with, targets_with_resolver};
use watchgraph_test_utils::fake_resolver::FakeResolver;
use watchgraph_test_utils::init_tracing;

type TestResult = Result<(), Box<dyn Error>>;

fn sorted(mut v: Vec<String>) -> Vec<String> {
    v.sort();
    v
}

#[test]
fn add_is_idempotent_and_only_first_add_is_new() {
    init_tracing();
    let mut targets = targets_with_resolver(FakeResolver::new());

    targets.add(["a.js"]);
    assert!(targets.is_watched("a.js"));
    assert_eq!(targets.new_targets_since_reset(), vec!["./a.js"]);

    targets.reset();
    targets.add(["a.js"]);
    assert!(targets.is_watched("a.js"));
    assert!(targets.new_targets_since_reset().is_empty());
    assert_eq!(targets.all_targets(), vec!["./a.js"]);
}

#[test]
fn add_normalizes_to_leading_dot_slash() {
    init_tracing();
    let mut targets = targets_with_resolver(FakeResolver::new());

    targets.add(["a.js", "./a.js", "src/b.njk"]);

    assert_eq!(sorted(targets.all_targets()), vec!["./a.js", "./src/b.njk"]);
    assert!(targets.is_watched("./src/b.njk"));
    assert!(targets.is_watched("src/b.njk"));
    assert_eq!(targets.new_targets_since_reset().len(), 2);
}

#[test]
fn add_accepts_none_and_single_values() {
    init_tracing();
    let mut targets = targets_with_resolver(FakeResolver::new());

    targets.add(None::<&str>);
    assert!(targets.all_targets().is_empty());

    targets.add(Some("config.js"));
    assert!(targets.is_watched("config.js"));
}

#[test]
fn reset_clears_only_the_new_targets_diff() {
    init_tracing();
    let mut targets = targets_with_resolver(FakeResolver::new());

    targets.add(["a.js", "b.js"]);
    let before = sorted(targets.all_targets());

    targets.reset();

    assert!(targets.new_targets_since_reset().is_empty());
    assert_eq!(sorted(targets.all_targets()), before);
}

#[test]
fn reading_new_targets_is_not_destructive() {
    init_tracing();
    let mut targets = targets_with_resolver(FakeResolver::new());

    targets.add(["a.js"]);
    assert_eq!(targets.new_targets_since_reset(), vec!["./a.js"]);
    assert_eq!(targets.new_targets_since_reset(), vec!["./a.js"]);
}

#[test]
fn glob_expansion_turns_directories_into_recursive_patterns() {
    init_tracing();
    let fs = MockFileSystem::new();
    fs.add_file("./_includes/layout.njk", "{{ content }}");
    fs.add_file("./_data/site.json", "{}");
    let mut targets = targets_with(FakeResolver::new(), fs);

    targets.add_glob_expanded(["_includes", "_data/site.json", ""]);

    assert_eq!(
        sorted(targets.all_targets()),
        vec!["./**", "./_data/site.json", "./_includes/**"]
    );
    assert!(!targets.is_dependency("./_includes/**"));
}

#[tokio::test]
async fn dependency_scenario_a_imports_b() -> TestResult {
    init_tracing();
    let resolver = FakeResolver::new().with_deps("a.js", &["./b.js"]);
    let mut targets = targets_with_resolver(resolver);

    targets.add(["a.js"]);
    targets.add_dependencies(["a.js"], None).await?;

    assert!(targets.is_watched("b.js"));
    assert!(targets.is_dependency("b.js"));
    assert!(!targets.is_dependency("a.js"));
    assert_eq!(targets.dependencies_of("a.js"), vec!["./b.js"]);
    assert_eq!(targets.dependents_of("b.js"), vec!["./a.js"]);
    assert!(targets.uses("a.js", "b.js"));
    assert!(!targets.uses("b.js", "a.js"));

    let invalidation = targets.compute_invalidation_set(["b.js"]);
    let paths: Vec<&str> = invalidation.paths().iter().map(String::as_str).collect();
    assert_eq!(paths, vec!["./a.js", "./b.js"]);

    Ok(())
}

#[tokio::test]
async fn discovered_dependencies_show_up_as_new_targets() -> TestResult {
    init_tracing();
    let resolver = FakeResolver::new().with_deps("config.js", &["./lib/a.js", "./lib/b.js"]);
    let mut targets = targets_with_resolver(resolver);

    targets.add(["config.js"]);
    targets.reset();
    targets.add_dependencies(["config.js"], None).await?;

    assert_eq!(
        sorted(targets.new_targets_since_reset()),
        vec!["./lib/a.js", "./lib/b.js"]
    );
    Ok(())
}

#[tokio::test]
async fn disabled_dependency_watching_is_a_no_op() -> TestResult {
    init_tracing();
    let resolver = FakeResolver::new().with_deps("a.js", &["./b.js"]);
    let calls = resolver.calls();
    let mut targets = targets_with_resolver(resolver);
    targets.set_watch_javascript_dependencies(false);
    assert!(!targets.watch_javascript_dependencies());

    targets.add_dependencies(["a.js"], None).await?;

    assert!(targets.all_targets().is_empty());
    assert!(targets.graph().is_empty());
    assert!(!targets.is_watched("b.js"));
    assert!(calls.lock().unwrap().is_empty());
    Ok(())
}

#[tokio::test]
async fn filter_drops_dependencies_before_they_are_recorded() -> TestResult {
    init_tracing();
    let resolver =
        FakeResolver::new().with_deps("a.js", &["./b.js", "./node_modules/x/index.js"]);
    let mut targets = targets_with_resolver(resolver);

    let keep = |path: &str| !path.contains("node_modules");
    targets.add_dependencies(["a.js"], Some(&keep)).await?;

    assert!(targets.is_dependency("b.js"));
    assert!(!targets.is_watched("./node_modules/x/index.js"));
    assert_eq!(targets.dependencies_of("a.js"), vec!["./b.js"]);
    Ok(())
}

#[tokio::test]
async fn module_format_is_passed_to_the_resolver() -> TestResult {
    init_tracing();
    let resolver = FakeResolver::new().with_deps("a.mjs", &["./b.mjs"]);
    let calls = resolver.calls();
    let mut targets = targets_with_resolver(resolver);

    assert_eq!(targets.module_format(), ModuleFormat::CommonJs);
    targets.set_module_format(ModuleFormat::Esm);
    targets.add_dependencies(["a.mjs"], None).await?;

    let calls = calls.lock().unwrap();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].0, vec!["./a.mjs".to_string()]);
    assert_eq!(calls[0].1, ModuleFormat::Esm);
    Ok(())
}

#[tokio::test]
async fn resolver_failure_propagates_and_leaves_state_untouched() {
    init_tracing();
    let resolver = FakeResolver::new().broken("bad.js");
    let mut targets = targets_with_resolver(resolver);

    let result = targets.add_dependencies(["bad.js"], None).await;

    match result {
        Err(WatchgraphError::Resolution { target, .. }) => assert_eq!(target, "./bad.js"),
        other => panic!("Expected Resolution error, got: {:?}", other),
    }
    assert!(targets.all_targets().is_empty());
    assert!(targets.graph().is_empty());
}

#[tokio::test]
async fn entries_registered_together_keep_their_edges_to_each_other() -> TestResult {
    init_tracing();
    let fs = MockFileSystem::new();
    fs.add_file("./a.js", r#"require("./b.js");"#);
    fs.add_file("./b.js", r#"require("./c.js");"#);
    fs.add_file("./c.js", "");
    let mut targets = WatchTargets::with_import_scanner(Arc::new(fs.clone()));

    targets.add(["a.js", "b.js"]);
    targets.add_dependencies(["a.js", "b.js"], None).await?;

    assert_eq!(sorted(targets.dependencies_of("a.js")), vec!["./b.js", "./c.js"]);
    assert_eq!(targets.dependencies_of("b.js"), vec!["./c.js"]);
    assert!(targets.dependents_of("b.js").contains(&"./a.js".to_string()));
    assert!(targets.is_dependency("b.js"));

    let invalidation = targets.compute_invalidation_set(["b.js"]);
    assert!(invalidation.contains("./a.js"));
    assert!(invalidation.contains("./b.js"));
    assert!(!invalidation.contains("./c.js"));
    Ok(())
}

#[tokio::test]
async fn each_target_is_resolved_on_its_own() -> TestResult {
    init_tracing();
    let resolver = FakeResolver::new()
        .with_deps("a.js", &["./shared.js"])
        .with_deps("b.js", &["./only-b.js"]);
    let calls = resolver.calls();
    let mut targets = targets_with_resolver(resolver);

    targets.add_dependencies(["a.js", "b.js"], None).await?;

    assert_eq!(calls.lock().unwrap().len(), 2);
    assert_eq!(targets.dependencies_of("a.js"), vec!["./shared.js"]);
    assert_eq!(targets.dependencies_of("b.js"), vec!["./only-b.js"]);
    assert!(!targets.uses("a.js", "only-b.js"));
    Ok(())
}

#[tokio::test]
async fn refused_edge_rolls_back_the_whole_call() -> TestResult {
    init_tracing();
    let resolver = FakeResolver::new()
        .with_deps("x.js", &["./y.js"])
        .with_deps("y.js", &["./x.js"])
        .with_deps("z.js", &["./w.js"]);
    let mut targets = targets_with_resolver(resolver);

    targets.add_dependencies(["x.js"], None).await?;
    let nodes_before = targets.graph().len();
    targets.reset();

    // ./z.js is fine on its own; ./y.js -> ./x.js closes a cycle.
    let result = targets.add_dependencies(["z.js", "y.js"], None).await;

    assert!(matches!(result, Err(WatchgraphError::DependencyCycle(_))));
    assert!(!targets.graph().has_node("./z.js"));
    assert!(!targets.graph().has_node("./w.js"));
    assert_eq!(targets.graph().len(), nodes_before);
    assert!(!targets.is_watched("w.js"));
    assert!(targets.new_targets_since_reset().is_empty());
    assert!(targets.is_dependency("y.js"));
    assert_eq!(targets.dependencies_of("x.js"), vec!["./y.js"]);
    Ok(())
}

#[tokio::test]
async fn dependency_knowledge_accumulates_across_resets() -> TestResult {
    init_tracing();
    let resolver = FakeResolver::new()
        .with_deps("a.js", &["./b.js"])
        .with_deps("c.js", &["./b.js", "./d.js"]);
    let mut targets = targets_with_resolver(resolver);

    targets.add_dependencies(["a.js"], None).await?;
    targets.reset();
    targets.add_dependencies(["c.js"], None).await?;

    // ./b.js was already watched, so only ./d.js is new.
    assert_eq!(targets.new_targets_since_reset(), vec!["./d.js"]);
    assert_eq!(
        sorted(targets.dependents_of("b.js")),
        vec!["./a.js", "./c.js"]
    );
    Ok(())
}

#[test]
fn unknown_paths_are_not_watched_or_dependencies() {
    init_tracing();
    let targets = targets_with_resolver(FakeResolver::new());

    assert!(!targets.is_watched("never-added-path"));
    assert!(!targets.is_dependency("never-added-path"));
    assert!(targets.dependencies_of("never-added-path").is_empty());
    assert!(targets.dependents_of("never-added-path").is_empty());
}
