//! Task directory layout and artifact naming

use crate::exec::languages::supported_extensions;
use std::path::{Path, PathBuf};

/// Directory for generated inputs and solution outputs
pub fn data_dir(task_dir: &Path) -> PathBuf {
    task_dir.join("data")
}

/// Directory for compiled executables
pub fn build_dir(task_dir: &Path) -> PathBuf {
    task_dir.join("build")
}

/// Name of a generated input file. Takes the subtask number rather than a
/// hard/easy flag so contests may have more than two subtasks.
pub fn input_name(seed: u64, subtask: u32) -> String {
    format!("{}_{}.in", seed, subtask)
}

/// Name of the file a solution writes its output for `input_file` into.
///
/// `output_name("sample.in", "solve_6b")` is `sample.solve_6b.out`.
pub fn output_name(input_file: &Path, solution_name: &str) -> String {
    let stem = input_file
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    format!("{}.{}.out", stem, solution_name)
}

/// Like [`output_name`] with a tag naming the input's directory:
/// `<stem>.<tag>.<solution>.out`. Keeps `a/1.in` and `b/1.in` apart.
pub fn tagged_output_name(input_file: &Path, solution_name: &str) -> String {
    let stem = input_file
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    format!("{}.{}.{}.out", stem, directory_tag(input_file), solution_name)
}

/// First 8 hex digits of the SHA-256 of the directory holding `file`
pub fn directory_tag(file: &Path) -> String {
    use sha2::{Digest, Sha256};
    let parent = file.parent().unwrap_or_else(|| Path::new(""));
    let parent = std::fs::canonicalize(parent).unwrap_or_else(|_| parent.to_path_buf());
    let mut hasher = Sha256::new();
    hasher.update(parent.as_os_str().as_encoded_bytes());
    let digest = format!("{:x}", hasher.finalize());
    digest[..8].to_string()
}

/// True when `file` sits directly inside `dir`; both must exist
pub fn is_directly_in(file: &Path, dir: &Path) -> bool {
    let parent = match file.parent() {
        Some(parent) => parent,
        None => return false,
    };
    match (std::fs::canonicalize(parent), std::fs::canonicalize(dir)) {
        (Ok(parent), Ok(dir)) => parent == dir,
        _ => false,
    }
}

/// Path as a command-line argument
pub fn path_string(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

/// Find a source file for program `name` inside `dir`.
///
/// Tries `name.<ext>` for every supported extension; a name that already
/// carries a supported extension is returned unchanged when the file exists.
/// The first match in extension order wins.
pub fn resolve_extension(dir: &Path, name: &str) -> Option<String> {
    for ext in supported_extensions() {
        let candidate = format!("{}{}", name, ext);
        if dir.join(&candidate).is_file() {
            return Some(candidate);
        }
        if name.ends_with(ext) && dir.join(name).is_file() {
            return Some(name.to_string());
        }
    }
    None
}
