use crate::exec::adapter::LanguageAdapter;
use crate::utils::paths::path_string;
use std::path::Path;

#[derive(Debug, Clone, Default)]
pub struct CppAdapter;

#[derive(Debug, Clone, Default)]
pub struct CAdapter;

impl LanguageAdapter for CppAdapter {
    fn language(&self) -> &'static str {
        "cpp"
    }

    fn extensions(&self) -> &'static [&'static str] {
        &[".cpp", ".cc"]
    }

    fn compile_command(&self, source: &Path, target: &Path) -> Option<Vec<String>> {
        Some(vec![
            "g++".to_string(),
            "-std=c++17".to_string(),
            "-O2".to_string(),
            "-pipe".to_string(),
            "-o".to_string(),
            path_string(target),
            path_string(source),
        ])
    }

    fn run_command(&self, artifact: &Path) -> Vec<String> {
        vec![path_string(artifact)]
    }
}

impl LanguageAdapter for CAdapter {
    fn language(&self) -> &'static str {
        "c"
    }

    fn extensions(&self) -> &'static [&'static str] {
        &[".c"]
    }

    fn compile_command(&self, source: &Path, target: &Path) -> Option<Vec<String>> {
        Some(vec![
            "gcc".to_string(),
            "-std=c11".to_string(),
            "-O2".to_string(),
            "-pipe".to_string(),
            "-o".to_string(),
            path_string(target),
            path_string(source),
            "-lm".to_string(),
        ])
    }

    fn run_command(&self, artifact: &Path) -> Vec<String> {
        vec![path_string(artifact)]
    }
}
