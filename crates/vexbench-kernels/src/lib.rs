//! Scalar and explicit-width SIMD implementations of the benchmark kernels.
//!
//! Each kernel exists twice: a plain element-by-element loop in [`scalar`]
//! and a lane-width-chunked loop with a scalar remainder tail in [`vector`].
//! The vector side picks one SIMD path per process (AVX2+FMA, NEON, or a
//! portable chunked fallback) via [`dispatch`]; the pairing itself is plain
//! data in [`kernel::KERNELS`].

pub mod chunked;
pub mod dispatch;
pub mod kernel;
pub mod scalar;
pub mod vector;

pub use dispatch::{active_path, lane_width, SimdPath};
pub use kernel::{Kernel, KernelImpl, KernelKind, KERNELS};
