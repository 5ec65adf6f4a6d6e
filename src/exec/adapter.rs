use std::path::Path;

/// Language adapter contract for compile/run stages.
///
/// Compiled languages turn a source into an executable under the task's
/// build directory; interpreted languages run the source in place.
pub trait LanguageAdapter: Send + Sync {
    fn language(&self) -> &'static str;
    /// File extensions including the leading dot, in lookup order
    fn extensions(&self) -> &'static [&'static str];
    /// Command producing `target` from `source`, or `None` when nothing is compiled
    fn compile_command(&self, source: &Path, target: &Path) -> Option<Vec<String>>;
    /// Command prefix launching the program; `artifact` is the compiled
    /// target or, for interpreted languages, the source itself
    fn run_command(&self, artifact: &Path) -> Vec<String>;
}
