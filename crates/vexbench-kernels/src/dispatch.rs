//! Runtime CPU feature detection and SIMD path selection.
//!
//! The path is probed once per process and cached; every vector kernel
//! dispatches on the cached value.
//!
//! ```text
//! Priority  Path               Lanes  Requirement       Platform
//! ────────  ─────────────────  ─────  ────────────────  ────────
//! 1         AVX2+FMA           8      AVX2 and FMA      x86_64
//! 2         NEON               4      baseline          aarch64
//! 3         Portable chunked   4      none              any
//! ```

use once_cell::sync::Lazy;

/// The SIMD path selected for this process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimdPath {
    /// 256-bit AVX2 with fused multiply-add.
    Avx2,
    /// 128-bit ARM NEON.
    Neon,
    /// Chunked scalar loops the compiler is free to auto-vectorize.
    Portable,
}

impl SimdPath {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Avx2 => "AVX2+FMA",
            Self::Neon => "NEON",
            Self::Portable => "Portable chunked",
        }
    }

    /// f32 elements per vector register on this path.
    pub fn lane_width(&self) -> usize {
        match self {
            Self::Avx2 => 8,
            Self::Neon | Self::Portable => 4,
        }
    }
}

static ACTIVE: Lazy<SimdPath> = Lazy::new(detect);

#[allow(unreachable_code)]
fn detect() -> SimdPath {
    #[cfg(target_arch = "x86_64")]
    {
        if is_x86_feature_detected!("avx2") && is_x86_feature_detected!("fma") {
            log::debug!("SIMD dispatch: AVX2+FMA, 8 lanes");
            return SimdPath::Avx2;
        }
    }
    #[cfg(target_arch = "aarch64")]
    {
        log::debug!("SIMD dispatch: NEON, 4 lanes");
        return SimdPath::Neon;
    }
    log::debug!("SIMD dispatch: portable chunked fallback, 4 lanes");
    SimdPath::Portable
}

/// The path every vector kernel in this process uses.
pub fn active_path() -> SimdPath {
    *ACTIVE
}

/// Hardware-preferred lane width, queried once per session.
pub fn lane_width() -> usize {
    ACTIVE.lane_width()
}

/// Feature probes for display (`vexbench info`).
pub fn detected_features() -> Vec<(&'static str, bool)> {
    #[cfg(target_arch = "x86_64")]
    {
        vec![
            ("sse2", is_x86_feature_detected!("sse2")),
            ("avx", is_x86_feature_detected!("avx")),
            ("avx2", is_x86_feature_detected!("avx2")),
            ("fma", is_x86_feature_detected!("fma")),
            ("avx512f", is_x86_feature_detected!("avx512f")),
        ]
    }
    #[cfg(target_arch = "aarch64")]
    {
        vec![("neon", std::arch::is_aarch64_feature_detected!("neon"))]
    }
    #[cfg(not(any(target_arch = "x86_64", target_arch = "aarch64")))]
    {
        Vec::new()
    }
}
