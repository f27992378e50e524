//! JSON normalization through jq filters.
//!
//! A `transform.jq` fixture holds one jq filter per line; empty lines and
//! `#` comments are ignored. Filters are applied sequentially, each one
//! consuming the previous filter's output. The runner applies the same
//! pipeline to both the actual and the expected payload before comparison.

use std::fs;
use std::path::{Path, PathBuf};

use jaq_interpret::{Ctx, FilterT, ParseCtx, RcIter, Val};
use serde_json::Value;
use thiserror::Error;

/// Errors that can occur while applying a transform file.
///
/// Any of these is fatal for the test case being transformed.
#[derive(Debug, Error)]
pub enum TransformError {
    #[error("failed to read transform file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse jq expression '{filter}': {detail}")]
    Parse { filter: String, detail: String },

    #[error("jq expression '{filter}' failed: {detail}")]
    Eval { filter: String, detail: String },

    #[error("jq expression '{filter}' produced no output")]
    NoOutput { filter: String },

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Applies the filters in `transform_path` to `json`, returning the
/// transformed payload. An empty filter list returns the input unchanged.
pub fn apply(transform_path: &Path, json: &[u8]) -> Result<Vec<u8>, TransformError> {
    let filters = read_filters(transform_path)?;
    if filters.is_empty() {
        return Ok(json.to_vec());
    }

    let mut value: Value = serde_json::from_slice(json)?;
    for filter in &filters {
        value = apply_filter(filter, value)?;
    }

    Ok(serde_json::to_vec(&value)?)
}

/// Reads a transform file into its list of filter expressions.
fn read_filters(path: &Path) -> Result<Vec<String>, TransformError> {
    let content = fs::read_to_string(path).map_err(|e| TransformError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;

    Ok(content
        .lines()
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect())
}

/// Runs one jq filter over a JSON value, taking the filter's first output.
fn apply_filter(filter: &str, input: Value) -> Result<Value, TransformError> {
    let (main, errs) = jaq_parse::parse(filter, jaq_parse::main());
    let Some(main) = main else {
        return Err(parse_error(filter, &errs));
    };
    if !errs.is_empty() {
        return Err(parse_error(filter, &errs));
    }

    let mut defs = ParseCtx::new(Vec::new());
    defs.insert_natives(jaq_core::core());
    defs.insert_defs(jaq_std::std());
    let compiled = defs.compile(main);
    if !defs.errs.is_empty() {
        return Err(TransformError::Parse {
            filter: filter.to_string(),
            detail: "undefined filter or reference".to_string(),
        });
    }

    let inputs = RcIter::new(core::iter::empty());
    let mut outputs = compiled.run((Ctx::new([], &inputs), Val::from(input)));

    let Some(result) = outputs.next() else {
        return Err(TransformError::NoOutput {
            filter: filter.to_string(),
        });
    };

    let val = result.map_err(|e| TransformError::Eval {
        filter: filter.to_string(),
        detail: e.to_string(),
    })?;

    Ok(Value::from(val))
}

fn parse_error<E: std::fmt::Display>(filter: &str, errs: &[E]) -> TransformError {
    TransformError::Parse {
        filter: filter.to_string(),
        detail: errs
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join("; "),
    }
}
