use crate::exec::adapter::LanguageAdapter;
use crate::utils::paths::path_string;
use std::path::Path;

#[derive(Debug, Clone, Default)]
pub struct RustAdapter;

impl LanguageAdapter for RustAdapter {
    fn language(&self) -> &'static str {
        "rust"
    }

    fn extensions(&self) -> &'static [&'static str] {
        &[".rs"]
    }

    fn compile_command(&self, source: &Path, target: &Path) -> Option<Vec<String>> {
        Some(vec![
            "rustc".to_string(),
            "--edition=2021".to_string(),
            "-O".to_string(),
            "-o".to_string(),
            path_string(target),
            path_string(source),
        ])
    }

    fn run_command(&self, artifact: &Path) -> Vec<String> {
        vec![path_string(artifact)]
    }
}
