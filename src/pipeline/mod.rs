//! Pipeline orchestration: stage sequencing, artifact persistence, and
//! load-or-build reuse of prior runs.

pub mod artifacts;
pub mod persist;
pub mod runner;

pub use runner::{ArtifactPaths, Pipeline, RunSummary};
