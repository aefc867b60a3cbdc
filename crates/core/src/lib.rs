//! Core utilities for Krita CI tools
//!
//! This crate provides shared functionality used across the CI tools:
//!
//! - **Error handling**: Structured errors with codes, context, and recovery suggestions
//! - **Process execution**: Child processes with captured or streamed output,
//!   directory context, and environment overlays
//! - **File operations**: Recursive artifact discovery and moves
//!
//! # Example
//!
//! ```rust,no_run
//! use krita_ci_core::process::stream_command_in_dir_with_env;
//! use std::path::Path;
//!
//! let exit = stream_command_in_dir_with_env(
//!     "./gradlew",
//!     &["bundleRelease"],
//!     Path::new("_packaging/krita_build_apk"),
//!     &[("KRITA_BUILD_APPBUNDLE", "1".into())],
//! )
//! .expect("failed to launch gradle");
//! assert_eq!(exit, 0);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod file_ops;
pub mod process;

pub use error::{Error, ErrorCode, Result, ResultExt};
