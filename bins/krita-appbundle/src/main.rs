//! Krita Android App Bundle CI builder
//!
//! Runs the Gradle wrapper's `bundleRelease` task inside the prepared
//! Android project and collects the produced `.aab` files into the
//! packaging directory for later CI stages.

use anyhow::Result;
use clap::Parser;
use krita_ci_android::appbundle::{self, BuildContext};
use krita_ci_android::gradle;
use krita_ci_cli::output::{format_duration, format_size, Status};
use krita_ci_core::error::exit_codes;
use std::time::Instant;

/// Build the Krita Android App Bundle on CI
///
/// Runs from the source checkout; the Android project must already be
/// prepared at `_packaging/krita_build_apk` by earlier CI stages.
#[derive(Parser)]
#[command(name = "krita-appbundle")]
#[command(about = "Build the Krita Android App Bundle on CI")]
#[command(version)]
struct Cli {}

fn main() -> Result<()> {
    Cli::parse();

    let ctx = BuildContext::from_current_dir()?;
    std::process::exit(run(&ctx));
}

fn run(ctx: &BuildContext) -> i32 {
    Status::header("Krita Android App Bundle");
    Status::info(&format!(
        "Running {} bundleRelease in {}",
        gradle::wrapper(),
        ctx.artifacts_dir.display()
    ));

    let started = Instant::now();
    if appbundle::build(ctx).is_err() {
        // Gradle's own output has already streamed to the console.
        Status::error("Failed to build an AppBundle");
        return exit_codes::FAILURE;
    }
    Status::success(&format!(
        "Build finished in {}",
        format_duration(started.elapsed())
    ));

    match appbundle::collect_bundles(ctx) {
        Ok(bundles) if bundles.is_empty() => {
            Status::warning("No bundle files found under build/outputs/bundle");
            exit_codes::SUCCESS
        }
        Ok(bundles) => {
            for bundle in &bundles {
                Status::info(&format!(
                    "Found a bundle file: {} ({})",
                    bundle.path.display(),
                    format_size(bundle.size)
                ));
            }
            Status::success(&format!(
                "Collected {} bundle file(s) into {}",
                bundles.len(),
                ctx.packaging_dir.display()
            ));
            exit_codes::SUCCESS
        }
        Err(e) => {
            Status::error(&format!("Failed to collect bundle files: {}", e));
            exit_codes::FAILURE
        }
    }
}
