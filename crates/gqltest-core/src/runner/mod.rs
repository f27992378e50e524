//! Executes discovered test cases against a [`Transport`].

use std::fs;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use serde_json::{Map, Value};
use thiserror::Error;

use crate::client::{Transport, TransportError};
use crate::compare;
use crate::discovery::TestCase;
use crate::transform::{self, TransformError};

/// Errors that can fail a single test case.
#[derive(Debug, Error)]
pub enum RunnerError {
    #[error("case is missing its request or response fixture")]
    IncompleteCase,

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse variables: {0}")]
    Variables(serde_json::Error),

    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error(transparent)]
    Transform(#[from] TransformError),

    #[error("response mismatch")]
    Mismatch,
}

impl RunnerError {
    fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        RunnerError::Io {
            path: path.into(),
            source,
        }
    }
}

/// Outcome of a single test case.
#[derive(Debug)]
pub struct CaseResult {
    pub case: TestCase,
    pub passed: bool,
    pub duration: Duration,
    pub error: Option<RunnerError>,
    /// Expected payload after transforms, compacted for display.
    pub expected: Option<String>,
    /// Actual payload after transforms, compacted for display.
    pub actual: Option<String>,
}

/// Aggregated counters for one suite run.
#[derive(Debug, Default)]
pub struct SuiteSummary {
    pub passed: usize,
    pub failed: usize,
    pub skipped: usize,
    pub duration: Duration,
}

impl SuiteSummary {
    /// Records one executed case.
    pub fn record(&mut self, result: &CaseResult) {
        if result.passed {
            self.passed += 1;
        } else {
            self.failed += 1;
        }
    }

    /// Folds another summary into this one.
    pub fn merge(&mut self, other: &SuiteSummary) {
        self.passed += other.passed;
        self.failed += other.failed;
        self.skipped += other.skipped;
        self.duration += other.duration;
    }
}

/// Executes test cases against a backend.
pub struct Runner<T: Transport> {
    transport: T,
}

impl<T: Transport> Runner<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    /// Runs one test case to completion. Every failure mode is captured in
    /// the returned [`CaseResult`]; this never returns early.
    pub async fn run_case(&self, case: &TestCase) -> CaseResult {
        let start = Instant::now();
        match self.execute_case(case).await {
            Ok(outcome) => CaseResult {
                case: case.clone(),
                passed: outcome.passed,
                duration: start.elapsed(),
                error: if outcome.passed {
                    None
                } else {
                    Some(RunnerError::Mismatch)
                },
                expected: Some(outcome.expected),
                actual: Some(outcome.actual),
            },
            Err(error) => CaseResult {
                case: case.clone(),
                passed: false,
                duration: start.elapsed(),
                error: Some(error),
                expected: None,
                actual: None,
            },
        }
    }

    async fn execute_case(&self, case: &TestCase) -> Result<CaseOutcome, RunnerError> {
        let (Some(request_path), Some(response_path)) = (&case.request, &case.response) else {
            return Err(RunnerError::IncompleteCase);
        };

        let query =
            fs::read_to_string(request_path).map_err(|e| RunnerError::io(request_path, e))?;

        let variables = match &case.variables {
            Some(path) => {
                let raw = fs::read(path).map_err(|e| RunnerError::io(path, e))?;
                let parsed: Map<String, Value> =
                    serde_json::from_slice(&raw).map_err(RunnerError::Variables)?;
                Some(parsed)
            }
            None => None,
        };

        let mut actual = self.transport.execute(&query, variables).await?;
        let mut expected =
            fs::read(response_path).map_err(|e| RunnerError::io(response_path, e))?;

        // The same normalization applies to both sides of the comparison.
        if let Some(transform_path) = &case.transform {
            actual = transform::apply(transform_path, &actual)?;
            expected = transform::apply(transform_path, &expected)?;
        }

        let passed = compare::json_equal(&expected, &actual);
        Ok(CaseOutcome {
            passed,
            expected: compact(&expected),
            actual: compact(&actual),
        })
    }
}

struct CaseOutcome {
    passed: bool,
    expected: String,
    actual: String,
}

/// Renders a JSON payload on a single compact line for display.
fn compact(json: &[u8]) -> String {
    match serde_json::from_slice::<Value>(json) {
        Ok(value) => value.to_string(),
        Err(_) => String::from_utf8_lossy(json).replace('\n', " "),
    }
}
