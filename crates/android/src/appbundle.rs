//! Krita Android App Bundle packaging
//!
//! CI entry point for producing the Play Store `.aab` artifact: derives the
//! fixed packaging layout from the source checkout, runs the Gradle
//! `bundleRelease` task inside the prepared Android project, and collects
//! the produced bundle files.

use crate::gradle;
use krita_ci_core::error::{Error, Result, ResultExt};
use krita_ci_core::file_ops::{find_files, move_file};
use serde::{Deserialize, Serialize};
use std::ffi::OsString;
use std::fs;
use std::path::PathBuf;

/// Switches the Gradle build into App Bundle mode.
const BUILD_APPBUNDLE_FLAG: &str = "KRITA_BUILD_APPBUNDLE";
/// Tells the Gradle build where to place its outputs.
const APK_PATH_VAR: &str = "APK_PATH";
/// Install prefix handed to the build. CI never installs, so the value is a
/// throwaway placeholder the build scripts only require to be set.
const INSTALL_PREFIX_VAR: &str = "KRITA_INSTALL_PREFIX";
const INSTALL_PREFIX_PLACEHOLDER: &str = ".xxx";

/// Packaging directory name under the source checkout.
const PACKAGING_DIR: &str = "_packaging";
/// Android project directory name under the packaging directory.
const ARTIFACTS_DIR: &str = "krita_build_apk";

/// Resolved directory layout for an App Bundle build
///
/// All paths are derived from the source directory by fixed relative paths;
/// none of them is independently configurable. The directories themselves
/// are prepared by earlier CI stages and are not created here.
#[derive(Debug, Clone)]
pub struct BuildContext {
    /// Source checkout the CI job was started in
    pub source_dir: PathBuf,
    /// Destination for collected artifacts: `<source>/_packaging`
    pub packaging_dir: PathBuf,
    /// Android project built by Gradle: `<packaging>/krita_build_apk`
    pub artifacts_dir: PathBuf,
}

impl BuildContext {
    /// Derive the layout from a source directory
    pub fn new(source_dir: impl Into<PathBuf>) -> Self {
        let source_dir = source_dir.into();
        let packaging_dir = source_dir.join(PACKAGING_DIR);
        let artifacts_dir = packaging_dir.join(ARTIFACTS_DIR);
        Self {
            source_dir,
            packaging_dir,
            artifacts_dir,
        }
    }

    /// Derive the layout from the invocation working directory
    pub fn from_current_dir() -> Result<Self> {
        Ok(Self::new(std::env::current_dir()?))
    }

    /// Directory tree Gradle writes bundle files into
    pub fn bundle_output_dir(&self) -> PathBuf {
        self.artifacts_dir.join("build").join("outputs").join("bundle")
    }

    /// Environment overlay for the Gradle child process
    ///
    /// The child inherits the full parent environment with exactly these
    /// three keys added on top.
    pub fn overlay_env(&self) -> Vec<(&'static str, OsString)> {
        vec![
            (BUILD_APPBUNDLE_FLAG, OsString::from("1")),
            (APK_PATH_VAR, self.artifacts_dir.clone().into_os_string()),
            (INSTALL_PREFIX_VAR, OsString::from(INSTALL_PREFIX_PLACEHOLDER)),
        ]
    }
}

/// A bundle file moved into the packaging directory
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectedBundle {
    /// Final location inside the packaging directory
    pub path: PathBuf,
    /// Size in bytes, recorded before the move
    pub size: u64,
}

/// Run the Gradle `bundleRelease` task for the context
///
/// The child runs with the artifacts directory as its working directory and
/// the context's environment overlay, streaming its output to the parent's
/// stdout/stderr. Blocks until Gradle exits. A launch failure and a
/// non-zero exit are both reported as errors; there is no retry.
pub fn build(ctx: &BuildContext) -> Result<()> {
    let exit = gradle::bundle_release(&ctx.artifacts_dir, &ctx.overlay_env())?;
    if exit != 0 {
        return Err(Error::gradle(format!(
            "Gradle wrapper exited with status {}",
            exit
        )));
    }
    Ok(())
}

/// Collect produced `.aab` files into the packaging directory
///
/// Searches `<artifacts>/build/outputs/bundle/` recursively and moves every
/// match into the packaging directory root, dropping its subdirectory
/// position. Two matches with the same file name silently overwrite each
/// other; the one visited last wins. Zero matches is not an error and
/// returns an empty list.
pub fn collect_bundles(ctx: &BuildContext) -> Result<Vec<CollectedBundle>> {
    let mut collected = Vec::new();

    for bundle in find_files(&ctx.bundle_output_dir(), "*.aab") {
        let size = fs::metadata(&bundle)?.len();
        let path = move_file(&bundle, &ctx.packaging_dir)
            .context(format!("While collecting {}", bundle.display()))?;
        collected.push(CollectedBundle { path, size });
    }

    Ok(collected)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;
    use tempfile::TempDir;

    fn write_bundle(ctx: &BuildContext, rel: &str, contents: &[u8]) -> PathBuf {
        let path = ctx.bundle_output_dir().join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, contents).unwrap();
        path
    }

    fn prepared_context() -> (BuildContext, TempDir) {
        let temp = TempDir::new().unwrap();
        let ctx = BuildContext::new(temp.path());
        fs::create_dir_all(&ctx.artifacts_dir).unwrap();
        (ctx, temp)
    }

    #[test]
    fn test_derived_paths_are_fixed() {
        let ctx = BuildContext::new("/src");
        assert_eq!(ctx.packaging_dir, Path::new("/src/_packaging"));
        assert_eq!(
            ctx.artifacts_dir,
            Path::new("/src/_packaging/krita_build_apk")
        );
    }

    #[test]
    fn test_bundle_output_dir() {
        let ctx = BuildContext::new("/src");
        assert_eq!(
            ctx.bundle_output_dir(),
            Path::new("/src/_packaging/krita_build_apk/build/outputs/bundle")
        );
    }

    #[test]
    fn test_from_current_dir_is_absolute() {
        let ctx = BuildContext::from_current_dir().unwrap();
        assert!(ctx.source_dir.is_absolute());
        assert!(ctx.artifacts_dir.starts_with(&ctx.source_dir));
    }

    #[test]
    fn test_overlay_env_values() {
        let ctx = BuildContext::new("/src");
        let env = ctx.overlay_env();

        assert_eq!(env.len(), 3);
        assert_eq!(env[0], ("KRITA_BUILD_APPBUNDLE", OsString::from("1")));
        assert_eq!(
            env[1],
            (
                "APK_PATH",
                OsString::from("/src/_packaging/krita_build_apk")
            )
        );
        assert_eq!(env[2], ("KRITA_INSTALL_PREFIX", OsString::from(".xxx")));
    }

    #[test]
    fn test_collect_moves_and_flattens() {
        let (ctx, _temp) = prepared_context();
        let release = write_bundle(&ctx, "release/app-release.aab", b"release");
        let debug = write_bundle(&ctx, "debug/app-debug.aab", b"dbg");

        let collected = collect_bundles(&ctx).unwrap();

        assert_eq!(collected.len(), 2);
        assert!(ctx.packaging_dir.join("app-release.aab").exists());
        assert!(ctx.packaging_dir.join("app-debug.aab").exists());
        assert!(!release.exists());
        assert!(!debug.exists());

        let release_size = collected
            .iter()
            .find(|b| b.path.ends_with("app-release.aab"))
            .unwrap()
            .size;
        assert_eq!(release_size, b"release".len() as u64);
    }

    #[test]
    fn test_collect_collision_last_wins() {
        let (ctx, _temp) = prepared_context();
        write_bundle(&ctx, "release/app.aab", b"release");
        write_bundle(&ctx, "debug/app.aab", b"dbg");

        let collected = collect_bundles(&ctx).unwrap();

        assert_eq!(collected.len(), 2);
        let in_packaging: Vec<_> = fs::read_dir(&ctx.packaging_dir)
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.path().extension().is_some_and(|ext| ext == "aab"))
            .collect();
        assert_eq!(in_packaging.len(), 1);
        assert_eq!(in_packaging[0].file_name(), "app.aab");
    }

    #[test]
    fn test_collect_zero_matches_is_success() {
        let (ctx, _temp) = prepared_context();
        fs::create_dir_all(ctx.bundle_output_dir().join("release")).unwrap();

        let collected = collect_bundles(&ctx).unwrap();

        assert!(collected.is_empty());
        assert_eq!(fs::read_dir(&ctx.packaging_dir).unwrap().count(), 1); // only krita_build_apk
    }

    #[test]
    fn test_collect_without_output_tree_is_success() {
        // Gradle never ran, so build/outputs/bundle does not exist.
        let (ctx, _temp) = prepared_context();

        let collected = collect_bundles(&ctx).unwrap();
        assert!(collected.is_empty());
    }
}
