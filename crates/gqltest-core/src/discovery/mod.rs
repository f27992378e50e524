//! Suite discovery.
//!
//! A suite is a directory holding fixture files (`request.gql`,
//! `response.json`, optional `variables.json` and `transform.jq`) and,
//! optionally, further nested suites. [`build`] walks a root directory once
//! and produces a [`SuiteForest`]: a flat map from relative suite path to
//! [`SuiteNode`]. The forest is immutable after the walk; ordering and
//! selection (`ordered_cases`, `runnable_paths`) operate on it read-only.
//!
//! Nodes never hold references to each other. A node's parent is derived
//! structurally by dropping the last path segment and looking the result up
//! in the forest, which keeps ownership single-directional.

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};

mod classify;
mod error;
mod order;

pub use classify::classify;
pub use error::DiscoveryError;

use crate::config::SKIP_MARKER;

/// A single test case: one directory's worth of fixture files.
#[derive(Debug, Clone)]
pub struct TestCase {
    /// Test name, the containing directory's base name with any numeric
    /// sequence prefix stripped.
    pub name: String,
    /// Directory path relative to the suite root, "" for the root itself.
    pub dir: String,
    /// Absolute path of the containing directory.
    pub abs_dir: PathBuf,
    /// Sequence number parsed from a `<digits>_` directory-name prefix.
    pub seq: Option<u32>,
    pub request: Option<PathBuf>,
    pub response: Option<PathBuf>,
    pub variables: Option<PathBuf>,
    pub transform: Option<PathBuf>,
}

impl TestCase {
    /// A case is executable only when both required fixtures are present.
    pub fn is_valid(&self) -> bool {
        self.request.is_some() && self.response.is_some()
    }

    /// Merges another fragment for the same directory into this case.
    /// A set field is only replaced by a later non-empty value, so merging
    /// is insensitive to file visitation order.
    fn merge(&mut self, other: TestCase) {
        if other.request.is_some() {
            self.request = other.request;
        }
        if other.response.is_some() {
            self.response = other.response;
        }
        if other.variables.is_some() {
            self.variables = other.variables;
        }
        if other.transform.is_some() {
            self.transform = other.transform;
        }
    }
}

/// One directory in the discovered tree.
#[derive(Debug)]
pub struct SuiteNode {
    /// Relative path from the suite root, "" for the root.
    pub path: String,
    /// The test case owned by this directory, if any fixture file was found.
    pub base: Option<TestCase>,
    /// Child name to child suite path, for sequenced children only.
    pub children: BTreeMap<String, String>,
    /// Times this node was linked into a parent's ordering.
    refs: u32,
}

impl SuiteNode {
    fn new(path: String) -> Self {
        Self {
            path,
            base: None,
            children: BTreeMap::new(),
            refs: 0,
        }
    }
}

/// All discovered suites for one root path, keyed by relative path.
#[derive(Debug, Default)]
pub struct SuiteForest {
    nodes: HashMap<String, SuiteNode>,
}

impl SuiteForest {
    /// Looks up a suite by its relative path ("" for the root).
    pub fn get(&self, path: &str) -> Option<&SuiteNode> {
        self.nodes.get(path)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Base cases missing a request and/or response fixture, in path order.
    ///
    /// These never appear in `ordered_cases` output; callers report them
    /// as skipped.
    pub fn invalid_cases(&self) -> Vec<&TestCase> {
        let mut cases: Vec<&TestCase> = self
            .nodes
            .values()
            .filter_map(|node| node.base.as_ref())
            .filter(|base| !base.is_valid())
            .collect();
        cases.sort_by(|a, b| a.dir.cmp(&b.dir));
        cases
    }
}

/// Walks `root` and discovers all test suites beneath it.
///
/// Directories are always visited before their contents, so the owning
/// suite node exists by the time a fixture file is classified. Any
/// filesystem error aborts the whole build.
pub fn build(root: impl AsRef<Path>) -> Result<SuiteForest, DiscoveryError> {
    let root = root.as_ref();
    let abs_root = fs::canonicalize(root).map_err(|e| DiscoveryError::io(root, e))?;

    let mut forest = SuiteForest::default();
    walk_dir(&abs_root, &abs_root, String::new(), &mut forest)?;

    // Directories that contributed neither fixtures nor orderable children
    // are dead weight; drop them.
    forest
        .nodes
        .retain(|_, node| node.base.is_some() || !node.children.is_empty());

    Ok(forest)
}

fn walk_dir(
    root: &Path,
    dir: &Path,
    key: String,
    forest: &mut SuiteForest,
) -> Result<(), DiscoveryError> {
    forest
        .nodes
        .entry(key.clone())
        .or_insert_with(|| SuiteNode::new(key.clone()));

    let mut entries = Vec::new();
    for entry in fs::read_dir(dir).map_err(|e| DiscoveryError::io(dir, e))? {
        entries.push(entry.map_err(|e| DiscoveryError::io(dir, e))?);
    }
    // Lexical order keeps the walk deterministic across platforms.
    entries.sort_by_key(|entry| entry.file_name());

    let mut subdirs = Vec::new();
    for entry in &entries {
        let path = entry.path();
        let file_type = entry
            .file_type()
            .map_err(|e| DiscoveryError::io(&path, e))?;

        if file_type.is_dir() {
            let name = entry.file_name().to_string_lossy().into_owned();
            if name.starts_with(SKIP_MARKER) {
                continue;
            }
            let child_key = if key.is_empty() {
                name
            } else {
                format!("{key}/{name}")
            };
            subdirs.push((path, child_key));
            continue;
        }

        if let Some(case) = classify(root, &path, false) {
            merge_case(forest, case)?;
        }
    }

    for (path, child_key) in subdirs {
        walk_dir(root, &path, child_key, forest)?;
    }

    Ok(())
}

/// Merges a classified fragment into its owning node and, on the node's
/// first fixture, links sequenced nodes into their structural parent.
fn merge_case(forest: &mut SuiteForest, case: TestCase) -> Result<(), DiscoveryError> {
    let dir = case.dir.clone();
    let name = case.name.clone();
    let seq = case.seq;

    let node = forest
        .nodes
        .get_mut(&dir)
        .ok_or_else(|| DiscoveryError::MissingSuite { path: dir.clone() })?;

    let is_new = node.base.is_none();
    match node.base.as_mut() {
        Some(base) => base.merge(case),
        None => node.base = Some(case),
    }

    // Only sequenced suites participate in their parent's ordering, and the
    // link is established exactly once, on the first fixture file.
    if is_new && !dir.is_empty() && seq.is_some() {
        let parent = parent_path(&dir).to_string();
        let parent_node = forest
            .nodes
            .get_mut(&parent)
            .ok_or_else(|| DiscoveryError::MissingSuite {
                path: parent.clone(),
            })?;
        parent_node.children.insert(name, dir.clone());

        if let Some(node) = forest.nodes.get_mut(&dir) {
            node.refs += 1;
        }
    }

    Ok(())
}

/// Parent of a relative suite path; the root ("") is its own parent.
pub(crate) fn parent_path(path: &str) -> &str {
    match path.rsplit_once('/') {
        Some((parent, _)) => parent,
        None => "",
    }
}
