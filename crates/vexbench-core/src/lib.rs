//! Core types for vexbench: errors, configuration, and the array fixture
//! shared by every kernel run.

pub mod config;
pub mod error;
pub mod fixture;

pub use config::BenchConfig;
pub use error::{Result, VexbenchError};
pub use fixture::ArrayFixture;
