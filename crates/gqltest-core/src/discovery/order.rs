//! Execution ordering over a completed [`SuiteForest`].

use std::cmp::Ordering;
use std::collections::HashSet;

use super::{parent_path, SuiteForest, TestCase};

impl SuiteForest {
    /// Returns every test case reachable from `start` in legal execution
    /// order: ancestor sequences first, then the suite's own base case,
    /// then its direct children sorted by sequence number (unsequenced
    /// children last, by name).
    ///
    /// `max_seq` restricts which sequenced children of `start` itself are
    /// included; ancestors are always expanded in full. The computation is
    /// pure over the immutable forest, so repeated invocations with the
    /// same inputs yield identical sequences. Each directory's case is
    /// emitted at most once per invocation.
    pub fn ordered_cases(&self, start: &str, max_seq: Option<u32>) -> Vec<TestCase> {
        let mut out = Vec::new();
        let mut visited = HashSet::new();
        let mut emitted = HashSet::new();
        self.collect_ordered(start, max_seq, &mut visited, &mut emitted, &mut out);
        out
    }

    fn collect_ordered(
        &self,
        path: &str,
        max_seq: Option<u32>,
        visited: &mut HashSet<String>,
        emitted: &mut HashSet<String>,
        out: &mut Vec<TestCase>,
    ) {
        if visited.contains(path) {
            return;
        }
        let Some(node) = self.nodes.get(path) else {
            return;
        };

        // A suite's own sequence never runs before its ancestors'.
        if !path.is_empty() {
            self.collect_ordered(parent_path(path), None, visited, emitted, out);
        }

        visited.insert(path.to_string());

        if let Some(base) = &node.base {
            if base.is_valid() && emitted.insert(path.to_string()) {
                out.push(base.clone());
            }
        }

        let mut child_cases: Vec<&TestCase> = Vec::new();
        for child_path in node.children.values() {
            let Some(child) = self.nodes.get(child_path) else {
                continue;
            };
            let Some(base) = &child.base else {
                continue;
            };
            if !base.is_valid() {
                continue;
            }
            if let (Some(limit), Some(seq)) = (max_seq, base.seq) {
                if seq > limit {
                    continue;
                }
            }
            child_cases.push(base);
        }

        child_cases.sort_by(|a, b| match (a.seq, b.seq) {
            (Some(x), Some(y)) => x.cmp(&y),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => a.name.cmp(&b.name),
        });

        for case in child_cases {
            if emitted.insert(case.dir.clone()) {
                out.push(case.clone());
            }
        }
    }

    /// Suite paths that make sense as standalone entry points, sorted.
    ///
    /// A sequenced leaf that a parent already pulls into its ordering is
    /// absorbed and excluded; everything else is runnable.
    pub fn runnable_paths(&self) -> Vec<String> {
        let mut paths: Vec<String> = self
            .nodes
            .values()
            .filter(|node| !(node.refs > 0 && node.children.is_empty()))
            .map(|node| node.path.clone())
            .collect();
        paths.sort();
        paths
    }
}
