//! Language adapters and the extension registry

pub mod cpp;
pub mod python;
pub mod rust;
pub mod shell;

use crate::config::types::{JudgeError, Result};
use crate::exec::adapter::LanguageAdapter;
use cpp::{CAdapter, CppAdapter};
use python::PythonAdapter;
use rust::RustAdapter;
use shell::ShellAdapter;
use std::path::Path;

/// All source extensions scorebox can build or interpret, in lookup order
pub fn supported_extensions() -> &'static [&'static str] {
    &[".cpp", ".cc", ".c", ".py", ".rs", ".sh"]
}

pub fn adapter_for(language: &str) -> Result<Box<dyn LanguageAdapter>> {
    match language {
        "cpp" | "c++" | "cxx" | "cc" => Ok(Box::new(CppAdapter)),
        "c" => Ok(Box::new(CAdapter)),
        "python" | "py" => Ok(Box::new(PythonAdapter)),
        "rust" | "rs" => Ok(Box::new(RustAdapter)),
        "shell" | "sh" => Ok(Box::new(ShellAdapter)),
        _ => Err(JudgeError::Config(format!(
            "unsupported language adapter: {language}"
        ))),
    }
}

/// Pick the adapter from a source file's extension
pub fn adapter_for_source(source: &Path) -> Result<Box<dyn LanguageAdapter>> {
    let ext = source
        .extension()
        .and_then(|e| e.to_str())
        .ok_or_else(|| {
            JudgeError::Config(format!("{} has no file extension", source.display()))
        })?;
    adapter_for(ext)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_extension_has_adapter() {
        for ext in supported_extensions() {
            let source = format!("prog{}", ext);
            let adapter = adapter_for_source(Path::new(&source)).unwrap();
            assert!(adapter.extensions().contains(ext), "{} -> {}", ext, adapter.language());
        }
    }

    #[test]
    fn test_unknown_extension() {
        assert!(matches!(
            adapter_for_source(Path::new("prog.pas")),
            Err(JudgeError::Config(_))
        ));
        assert!(adapter_for_source(Path::new("prog")).is_err());
    }

    #[test]
    fn test_interpreted_languages_skip_compile() {
        let py = adapter_for("python").unwrap();
        assert!(py
            .compile_command(Path::new("a.py"), Path::new("build/a"))
            .is_none());
        assert_eq!(py.run_command(Path::new("a.py")).last().unwrap(), "a.py");
    }
}
