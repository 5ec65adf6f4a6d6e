use crate::exec::adapter::LanguageAdapter;
use crate::utils::paths::path_string;
use std::path::Path;

/// POSIX shell scripts, run through `sh` so no execute bit is needed
#[derive(Debug, Clone, Default)]
pub struct ShellAdapter;

impl LanguageAdapter for ShellAdapter {
    fn language(&self) -> &'static str {
        "shell"
    }

    fn extensions(&self) -> &'static [&'static str] {
        &[".sh"]
    }

    fn compile_command(&self, _source: &Path, _target: &Path) -> Option<Vec<String>> {
        None
    }

    fn run_command(&self, artifact: &Path) -> Vec<String> {
        vec!["/bin/sh".to_string(), path_string(artifact)]
    }
}
