use crate::exec::adapter::LanguageAdapter;
use crate::utils::paths::path_string;
use std::path::Path;

#[derive(Debug, Clone, Default)]
pub struct PythonAdapter;

impl LanguageAdapter for PythonAdapter {
    fn language(&self) -> &'static str {
        "python"
    }

    fn extensions(&self) -> &'static [&'static str] {
        &[".py"]
    }

    fn compile_command(&self, _source: &Path, _target: &Path) -> Option<Vec<String>> {
        None
    }

    fn run_command(&self, artifact: &Path) -> Vec<String> {
        vec!["python3".to_string(), "-B".to_string(), path_string(artifact)]
    }
}
