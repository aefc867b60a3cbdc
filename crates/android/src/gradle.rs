//! Gradle build system integration
//!
//! Provides wrappers for the project's Gradle wrapper script.

use krita_ci_core::error::Result;
use krita_ci_core::process::stream_command_in_dir_with_env;
use std::ffi::OsString;
use std::path::Path;

/// The Gradle wrapper invocation for the current platform
pub fn wrapper() -> &'static str {
    if cfg!(windows) {
        "gradlew.bat"
    } else {
        "./gradlew"
    }
}

/// Run a Gradle task with output streamed to the parent's stdout/stderr
///
/// The wrapper is resolved relative to `project_dir`, which also becomes the
/// child's working directory. `env` pairs are overlaid on the inherited
/// parent environment. Returns the child's exit code.
pub fn stream_task(project_dir: &Path, task: &str, env: &[(&str, OsString)]) -> Result<i32> {
    stream_command_in_dir_with_env(wrapper(), &[task], project_dir, env)
}

/// Build the release bundle (AAB)
pub fn bundle_release(project_dir: &Path, env: &[(&str, OsString)]) -> Result<i32> {
    stream_task(project_dir, "bundleRelease", env)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrapper_per_platform() {
        if cfg!(windows) {
            assert_eq!(wrapper(), "gradlew.bat");
        } else {
            assert_eq!(wrapper(), "./gradlew");
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_stream_task_missing_wrapper() {
        let temp = tempfile::TempDir::new().unwrap();
        assert!(stream_task(temp.path(), "bundleRelease", &[]).is_err());
    }
}
