use std::path::Path;

use crate::config::{
    REQUEST_FILE_NAME, RESPONSE_FILE_NAME, SKIP_MARKER, TRANSFORM_FILE_NAME, VARIABLES_FILE_NAME,
};

use super::TestCase;

/// Classifies a path under `root` as a fixture file.
///
/// Returns a single-field [`TestCase`] fragment for the four recognized
/// fixture file names, `None` for directories, unrecognized names, paths
/// outside `root`, and anything beneath an excluded (`SKIP`) directory.
/// Pure: no filesystem access beyond the inputs.
pub fn classify(root: &Path, path: &Path, is_dir: bool) -> Option<TestCase> {
    if is_dir {
        return None;
    }

    let rel = path.strip_prefix(root).ok()?;

    // An exclusion marker anywhere on the path hides the whole subtree.
    if rel
        .components()
        .any(|c| c.as_os_str().to_string_lossy().starts_with(SKIP_MARKER))
    {
        return None;
    }

    let file_name = rel.file_name()?.to_str()?;
    let rel_dir = rel.parent().unwrap_or(Path::new(""));

    let dir: String = rel_dir
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/");

    let dir_name = match dir.rsplit_once('/') {
        Some((_, last)) => last,
        None => dir.as_str(),
    };
    let (name, seq) = parse_sequence(dir_name);

    let mut case = TestCase {
        name,
        dir: dir.clone(),
        abs_dir: root.join(rel_dir),
        seq,
        request: None,
        response: None,
        variables: None,
        transform: None,
    };

    match file_name {
        REQUEST_FILE_NAME => case.request = Some(path.to_path_buf()),
        RESPONSE_FILE_NAME => case.response = Some(path.to_path_buf()),
        VARIABLES_FILE_NAME => case.variables = Some(path.to_path_buf()),
        TRANSFORM_FILE_NAME => case.transform = Some(path.to_path_buf()),
        _ => return None,
    }

    Some(case)
}

/// Splits a directory name of the form `<digits>_<rest>` into the stripped
/// name and its sequence number. Anything else is unsequenced; a malformed
/// prefix is never an error.
fn parse_sequence(dir_name: &str) -> (String, Option<u32>) {
    if let Some((digits, rest)) = dir_name.split_once('_') {
        if !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit()) {
            if let Ok(n) = digits.parse::<u32>() {
                return (rest.to_string(), Some(n));
            }
        }
    }
    (dir_name.to_string(), None)
}
