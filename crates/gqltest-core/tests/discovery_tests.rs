use std::fs;
use std::path::Path;

use gqltest_core::discovery::{self, DiscoveryError};
use tempfile::TempDir;

/// Writes a valid case (request + response) into `dir`, creating it.
fn write_case(root: &Path, dir: &str) {
    let dir = if dir.is_empty() {
        root.to_path_buf()
    } else {
        root.join(dir)
    };
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("request.gql"), "query { ping }").unwrap();
    fs::write(dir.join("response.json"), r#"{"data":{"ping":true}}"#).unwrap();
}

#[test]
fn test_builds_forest_with_sequenced_children() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    write_case(root, "");
    write_case(root, "001_First");
    write_case(root, "002_Second");

    let forest = discovery::build(root).unwrap();
    assert_eq!(forest.len(), 3);

    let root_node = forest.get("").unwrap();
    assert!(root_node.base.as_ref().unwrap().is_valid());
    assert_eq!(root_node.children.len(), 2);
    assert_eq!(
        root_node.children.get("First").map(String::as_str),
        Some("001_First")
    );
    assert_eq!(
        root_node.children.get("Second").map(String::as_str),
        Some("002_Second")
    );

    let first = forest.get("001_First").unwrap();
    let base = first.base.as_ref().unwrap();
    assert_eq!(base.name, "First");
    assert_eq!(base.seq, Some(1));
    assert_eq!(base.dir, "001_First");
}

#[test]
fn test_unsequenced_child_is_discovered_but_not_linked() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    write_case(root, "");
    write_case(root, "Extra");

    let forest = discovery::build(root).unwrap();
    let root_node = forest.get("").unwrap();
    assert!(root_node.children.is_empty());

    // Present in the forest as a standalone suite.
    let extra = forest.get("Extra").unwrap();
    assert_eq!(extra.base.as_ref().unwrap().seq, None);
}

#[test]
fn test_all_four_fixture_files_merge_into_one_case() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    write_case(root, "007_Full");
    let dir = root.join("007_Full");
    fs::write(dir.join("variables.json"), r#"{"id": 1}"#).unwrap();
    fs::write(dir.join("transform.jq"), ".\n").unwrap();

    let forest = discovery::build(root).unwrap();
    let base = forest.get("007_Full").unwrap().base.as_ref().unwrap();
    assert_eq!(base.seq, Some(7));
    assert!(base.request.is_some());
    assert!(base.response.is_some());
    assert!(base.variables.is_some());
    assert!(base.transform.is_some());
    assert_eq!(base.abs_dir, fs::canonicalize(&dir).unwrap());
}

#[test]
fn test_unrecognized_files_are_ignored() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    write_case(root, "001_First");
    fs::write(root.join("001_First/README.md"), "notes").unwrap();
    fs::write(root.join("notes.txt"), "stray").unwrap();

    let forest = discovery::build(root).unwrap();
    // The stray root file contributes nothing; the root node is pruned
    // unless a fixture or a sequenced child gives it substance.
    assert!(forest.get("001_First").is_some());
    assert_eq!(forest.len(), 2); // root survives via its child link
}

#[test]
fn test_skip_directories_hide_their_subtree() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    write_case(root, "");
    write_case(root, "SKIP");
    write_case(root, "SKIP_wip/001_Inner");

    let forest = discovery::build(root).unwrap();
    assert!(forest.get("SKIP").is_none());
    assert!(forest.get("SKIP_wip").is_none());
    assert!(forest.get("SKIP_wip/001_Inner").is_none());
    assert_eq!(forest.len(), 1);
}

#[test]
fn test_empty_and_fixtureless_directories_are_pruned() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    write_case(root, "");
    fs::create_dir_all(root.join("empty")).unwrap();
    fs::create_dir_all(root.join("nested/deeper")).unwrap();

    let forest = discovery::build(root).unwrap();
    assert!(forest.get("empty").is_none());
    assert!(forest.get("nested").is_none());
    assert!(forest.get("nested/deeper").is_none());
    assert_eq!(forest.len(), 1);
}

#[test]
fn test_intermediate_directory_with_sequenced_child_survives() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    write_case(root, "");
    // "group" has no fixtures of its own but gains an orderable child.
    write_case(root, "group/001_Inner");

    let forest = discovery::build(root).unwrap();
    let group = forest.get("group").unwrap();
    assert!(group.base.is_none());
    assert_eq!(
        group.children.get("Inner").map(String::as_str),
        Some("group/001_Inner")
    );
}

#[test]
fn test_invalid_case_is_discovered_but_flagged() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    write_case(root, "");
    let dir = root.join("003_Third");
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("request.gql"), "query { ping }").unwrap();

    let forest = discovery::build(root).unwrap();
    let third = forest.get("003_Third").unwrap();
    assert!(!third.base.as_ref().unwrap().is_valid());

    let invalid = forest.invalid_cases();
    assert_eq!(invalid.len(), 1);
    assert_eq!(invalid[0].dir, "003_Third");
}

#[test]
fn test_missing_root_is_a_discovery_error() {
    let result = discovery::build("/nonexistent/suite/root");
    assert!(matches!(result, Err(DiscoveryError::Io { .. })));
}

#[test]
fn test_variables_only_directory_yields_invalid_standalone_case() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    write_case(root, "");
    let dir = root.join("004_Partial");
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("variables.json"), "{}").unwrap();

    let forest = discovery::build(root).unwrap();
    // The first recognized file creates the base and links the sequenced
    // node, even though the case never becomes valid.
    let node = forest.get("004_Partial").unwrap();
    assert!(!node.base.as_ref().unwrap().is_valid());
    assert_eq!(
        forest.get("").unwrap().children.get("Partial").map(String::as_str),
        Some("004_Partial")
    );
}
