//! Android packaging for Krita CI
//!
//! This crate provides the Android-specific CI functionality:
//! - Gradle wrapper integration
//! - App Bundle build and artifact collection

#![warn(missing_docs)]

pub mod appbundle;
pub mod gradle;
