//! Explicit-width vector implementations with scalar remainder tails.
//!
//! Every public function dispatches once on [`dispatch::active_path`]:
//! AVX2+FMA intrinsics on x86_64, NEON intrinsics on aarch64, and the
//! portable [`chunked`] instantiation everywhere else. All three paths share
//! the same shape: full lane-width chunks, then the scalar operation over
//! the tail.

use crate::chunked;
use crate::dispatch::{self, SimdPath};
use crate::kernel::{FMA_ADDEND, SCALE_FACTOR};

#[cfg(target_arch = "x86_64")]
#[allow(clippy::wildcard_imports)]
use std::arch::x86_64::*;

#[cfg(target_arch = "aarch64")]
#[allow(clippy::wildcard_imports)]
use std::arch::aarch64::*;

// ── Portable chunked paths ──────────────────────────────────────────

/// Lane count for the portable path. Narrow enough that the compiler can
/// keep a whole chunk in one 128-bit register.
const PORTABLE_LANES: usize = 4;

fn portable_vector_add(a: &[f32], b: &[f32], out: &mut [f32]) {
    chunked::map2(
        PORTABLE_LANES,
        a,
        b,
        out,
        |ca, cb, co| {
            for ((o, &x), &y) in co.iter_mut().zip(ca).zip(cb) {
                *o = x + y;
            }
        },
        |x, y| x + y,
    );
}

fn portable_scalar_mul(a: &[f32], out: &mut [f32]) {
    chunked::map1(
        PORTABLE_LANES,
        a,
        out,
        |ca, co| {
            for (o, &x) in co.iter_mut().zip(ca) {
                *o = x * SCALE_FACTOR;
            }
        },
        |x| x * SCALE_FACTOR,
    );
}

fn portable_dot_product(a: &[f32], b: &[f32]) -> f32 {
    chunked::reduce2(
        PORTABLE_LANES,
        a,
        b,
        |ca, cb, acc| {
            for ((s, &x), &y) in acc.iter_mut().zip(ca).zip(cb) {
                *s = x.mul_add(y, *s);
            }
        },
        |x, y| x * y,
    )
}

fn portable_fused_multiply_add(a: &[f32], b: &[f32], out: &mut [f32]) {
    chunked::map2(
        PORTABLE_LANES,
        a,
        b,
        out,
        |ca, cb, co| {
            for ((o, &x), &y) in co.iter_mut().zip(ca).zip(cb) {
                *o = x.mul_add(y, FMA_ADDEND);
            }
        },
        |x, y| x.mul_add(y, FMA_ADDEND),
    );
}

fn portable_sqrt_abs(a: &[f32], out: &mut [f32]) {
    chunked::map1(
        PORTABLE_LANES,
        a,
        out,
        |ca, co| {
            for (o, &x) in co.iter_mut().zip(ca) {
                *o = x.abs().sqrt();
            }
        },
        |x| x.abs().sqrt(),
    );
}

// ── AVX2 paths (x86_64 only) ────────────────────────────────────────

/// Horizontal sum of all 8 lanes in a `__m256`.
#[cfg(target_arch = "x86_64")]
#[target_feature(enable = "avx2")]
unsafe fn hsum_avx2(v: __m256) -> f32 {
    let hi = _mm256_extractf128_ps::<1>(v);
    let lo = _mm256_castps256_ps128(v);
    let sum4 = _mm_add_ps(hi, lo);
    let hi2 = _mm_movehl_ps(sum4, sum4);
    let sum2 = _mm_add_ps(sum4, hi2);
    let hi1 = _mm_shuffle_ps::<0x01>(sum2, sum2);
    _mm_cvtss_f32(_mm_add_ss(sum2, hi1))
}

#[cfg(target_arch = "x86_64")]
#[target_feature(enable = "avx2", enable = "fma")]
unsafe fn avx2_vector_add(a: &[f32], b: &[f32], out: &mut [f32]) {
    let len = out.len();
    let chunks = len / 8;
    for i in 0..chunks {
        let off = i * 8;
        let va = _mm256_loadu_ps(a.as_ptr().add(off));
        let vb = _mm256_loadu_ps(b.as_ptr().add(off));
        _mm256_storeu_ps(out.as_mut_ptr().add(off), _mm256_add_ps(va, vb));
    }
    for i in (chunks * 8)..len {
        out[i] = a[i] + b[i];
    }
}

#[cfg(target_arch = "x86_64")]
#[target_feature(enable = "avx2", enable = "fma")]
unsafe fn avx2_scalar_mul(a: &[f32], out: &mut [f32]) {
    let len = out.len();
    let chunks = len / 8;
    let vk = _mm256_set1_ps(SCALE_FACTOR);
    for i in 0..chunks {
        let off = i * 8;
        let va = _mm256_loadu_ps(a.as_ptr().add(off));
        _mm256_storeu_ps(out.as_mut_ptr().add(off), _mm256_mul_ps(va, vk));
    }
    for i in (chunks * 8)..len {
        out[i] = a[i] * SCALE_FACTOR;
    }
}

#[cfg(target_arch = "x86_64")]
#[target_feature(enable = "avx2", enable = "fma")]
unsafe fn avx2_dot_product(a: &[f32], b: &[f32]) -> f32 {
    let len = a.len();
    let chunks = len / 8;
    let mut acc = _mm256_setzero_ps();
    for i in 0..chunks {
        let off = i * 8;
        let va = _mm256_loadu_ps(a.as_ptr().add(off));
        let vb = _mm256_loadu_ps(b.as_ptr().add(off));
        acc = _mm256_fmadd_ps(va, vb, acc);
    }
    // Horizontal reduce once, then the tail on top.
    let mut sum = hsum_avx2(acc);
    for i in (chunks * 8)..len {
        sum += a[i] * b[i];
    }
    sum
}

#[cfg(target_arch = "x86_64")]
#[target_feature(enable = "avx2", enable = "fma")]
unsafe fn avx2_fused_multiply_add(a: &[f32], b: &[f32], out: &mut [f32]) {
    let len = out.len();
    let chunks = len / 8;
    let vk = _mm256_set1_ps(FMA_ADDEND);
    for i in 0..chunks {
        let off = i * 8;
        let va = _mm256_loadu_ps(a.as_ptr().add(off));
        let vb = _mm256_loadu_ps(b.as_ptr().add(off));
        _mm256_storeu_ps(out.as_mut_ptr().add(off), _mm256_fmadd_ps(va, vb, vk));
    }
    for i in (chunks * 8)..len {
        out[i] = a[i].mul_add(b[i], FMA_ADDEND);
    }
}

#[cfg(target_arch = "x86_64")]
#[target_feature(enable = "avx2", enable = "fma")]
unsafe fn avx2_sqrt_abs(a: &[f32], out: &mut [f32]) {
    let len = out.len();
    let chunks = len / 8;
    // Clearing the sign bit is |x|.
    let sign_mask = _mm256_set1_ps(-0.0);
    for i in 0..chunks {
        let off = i * 8;
        let va = _mm256_loadu_ps(a.as_ptr().add(off));
        let vabs = _mm256_andnot_ps(sign_mask, va);
        _mm256_storeu_ps(out.as_mut_ptr().add(off), _mm256_sqrt_ps(vabs));
    }
    for i in (chunks * 8)..len {
        out[i] = a[i].abs().sqrt();
    }
}

// ── NEON paths (aarch64 only) ───────────────────────────────────────

#[cfg(target_arch = "aarch64")]
fn neon_vector_add(a: &[f32], b: &[f32], out: &mut [f32]) {
    let len = out.len();
    let chunks = len / 4;
    for i in 0..chunks {
        let off = i * 4;
        // SAFETY: off + 4 <= chunks * 4 <= len for all three slices.
        unsafe {
            let va = vld1q_f32(a.as_ptr().add(off));
            let vb = vld1q_f32(b.as_ptr().add(off));
            vst1q_f32(out.as_mut_ptr().add(off), vaddq_f32(va, vb));
        }
    }
    for i in (chunks * 4)..len {
        out[i] = a[i] + b[i];
    }
}

#[cfg(target_arch = "aarch64")]
fn neon_scalar_mul(a: &[f32], out: &mut [f32]) {
    let len = out.len();
    let chunks = len / 4;
    // SAFETY: vdupq_n_f32 broadcasts a valid f32.
    let vk = unsafe { vdupq_n_f32(SCALE_FACTOR) };
    for i in 0..chunks {
        let off = i * 4;
        // SAFETY: off + 4 <= len.
        unsafe {
            let va = vld1q_f32(a.as_ptr().add(off));
            vst1q_f32(out.as_mut_ptr().add(off), vmulq_f32(va, vk));
        }
    }
    for i in (chunks * 4)..len {
        out[i] = a[i] * SCALE_FACTOR;
    }
}

#[cfg(target_arch = "aarch64")]
fn neon_dot_product(a: &[f32], b: &[f32]) -> f32 {
    let len = a.len();
    let chunks = len / 4;
    // SAFETY: zero vector construction is always valid.
    let mut acc = unsafe { vdupq_n_f32(0.0) };
    for i in 0..chunks {
        let off = i * 4;
        // SAFETY: off + 4 <= len for both inputs.
        unsafe {
            let va = vld1q_f32(a.as_ptr().add(off));
            let vb = vld1q_f32(b.as_ptr().add(off));
            acc = vfmaq_f32(acc, va, vb);
        }
    }
    // SAFETY: lane-wise horizontal add of an initialized register.
    let mut sum = unsafe { vaddvq_f32(acc) };
    for i in (chunks * 4)..len {
        sum += a[i] * b[i];
    }
    sum
}

#[cfg(target_arch = "aarch64")]
fn neon_fused_multiply_add(a: &[f32], b: &[f32], out: &mut [f32]) {
    let len = out.len();
    let chunks = len / 4;
    // SAFETY: vdupq_n_f32 broadcasts a valid f32.
    let vk = unsafe { vdupq_n_f32(FMA_ADDEND) };
    for i in 0..chunks {
        let off = i * 4;
        // SAFETY: off + 4 <= len for all three slices.
        unsafe {
            let va = vld1q_f32(a.as_ptr().add(off));
            let vb = vld1q_f32(b.as_ptr().add(off));
            vst1q_f32(out.as_mut_ptr().add(off), vfmaq_f32(vk, va, vb));
        }
    }
    for i in (chunks * 4)..len {
        out[i] = a[i].mul_add(b[i], FMA_ADDEND);
    }
}

#[cfg(target_arch = "aarch64")]
fn neon_sqrt_abs(a: &[f32], out: &mut [f32]) {
    let len = out.len();
    let chunks = len / 4;
    for i in 0..chunks {
        let off = i * 4;
        // SAFETY: off + 4 <= len for both slices.
        unsafe {
            let va = vld1q_f32(a.as_ptr().add(off));
            vst1q_f32(out.as_mut_ptr().add(off), vsqrtq_f32(vabsq_f32(va)));
        }
    }
    for i in (chunks * 4)..len {
        out[i] = a[i].abs().sqrt();
    }
}

// ── Public dispatch functions ───────────────────────────────────────

/// `out[i] = a[i] + b[i]`
///
/// # Panics
///
/// Panics if the slices differ in length.
pub fn vector_add(a: &[f32], b: &[f32], out: &mut [f32]) {
    assert_eq!(a.len(), b.len(), "vector add requires equal-length slices");
    assert_eq!(a.len(), out.len(), "vector add requires equal-length slices");
    match dispatch::active_path() {
        #[cfg(target_arch = "x86_64")]
        // Safety: AVX2 and FMA were confirmed available when the path was selected.
        SimdPath::Avx2 => unsafe { avx2_vector_add(a, b, out) },
        #[cfg(target_arch = "aarch64")]
        SimdPath::Neon => neon_vector_add(a, b, out),
        _ => portable_vector_add(a, b, out),
    }
}

/// `out[i] = a[i] * 2.5`. The second input is ignored; it exists so every
/// map kernel shares one signature.
pub fn scalar_mul(a: &[f32], _b: &[f32], out: &mut [f32]) {
    assert_eq!(a.len(), out.len(), "scalar mul requires equal-length slices");
    match dispatch::active_path() {
        #[cfg(target_arch = "x86_64")]
        // Safety: AVX2 and FMA were confirmed available when the path was selected.
        SimdPath::Avx2 => unsafe { avx2_scalar_mul(a, out) },
        #[cfg(target_arch = "aarch64")]
        SimdPath::Neon => neon_scalar_mul(a, out),
        _ => portable_scalar_mul(a, out),
    }
}

/// `Σ a[i] * b[i]` with a fused-multiply-accumulate vector accumulator,
/// horizontally reduced once before the tail is added.
pub fn dot_product(a: &[f32], b: &[f32]) -> f32 {
    assert_eq!(a.len(), b.len(), "dot product requires equal-length slices");
    match dispatch::active_path() {
        #[cfg(target_arch = "x86_64")]
        // Safety: AVX2 and FMA were confirmed available when the path was selected.
        SimdPath::Avx2 => unsafe { avx2_dot_product(a, b) },
        #[cfg(target_arch = "aarch64")]
        SimdPath::Neon => neon_dot_product(a, b),
        _ => portable_dot_product(a, b),
    }
}

/// `out[i] = fma(a[i], b[i], 1.5)` — a genuine fused multiply-add on every
/// path, single rounding step.
pub fn fused_multiply_add(a: &[f32], b: &[f32], out: &mut [f32]) {
    assert_eq!(a.len(), b.len(), "fma requires equal-length slices");
    assert_eq!(a.len(), out.len(), "fma requires equal-length slices");
    match dispatch::active_path() {
        #[cfg(target_arch = "x86_64")]
        // Safety: AVX2 and FMA were confirmed available when the path was selected.
        SimdPath::Avx2 => unsafe { avx2_fused_multiply_add(a, b, out) },
        #[cfg(target_arch = "aarch64")]
        SimdPath::Neon => neon_fused_multiply_add(a, b, out),
        _ => portable_fused_multiply_add(a, b, out),
    }
}

/// `out[i] = sqrt(|a[i]|)`. Second input ignored, as in [`scalar_mul`].
pub fn sqrt_abs(a: &[f32], _b: &[f32], out: &mut [f32]) {
    assert_eq!(a.len(), out.len(), "sqrt-abs requires equal-length slices");
    match dispatch::active_path() {
        #[cfg(target_arch = "x86_64")]
        // Safety: AVX2 and FMA were confirmed available when the path was selected.
        SimdPath::Avx2 => unsafe { avx2_sqrt_abs(a, out) },
        #[cfg(target_arch = "aarch64")]
        SimdPath::Neon => neon_sqrt_abs(a, out),
        _ => portable_sqrt_abs(a, out),
    }
}

// ── Tests ───────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scalar;

    /// Deterministic pseudo-random values in [0, 100).
    fn gen_input(len: usize, salt: u32) -> Vec<f32> {
        (0..len)
            .map(|i| {
                let v = (i as u32).wrapping_mul(2654435761).wrapping_add(salt) >> 16;
                (v % 10000) as f32 / 100.0
            })
            .collect()
    }

    fn max_abs_error(a: &[f32], b: &[f32]) -> f32 {
        a.iter().zip(b).map(|(x, y)| (x - y).abs()).fold(0.0f32, f32::max)
    }

    // Lengths around the lane-width boundaries: empty, pure tail, exactly
    // one chunk (both 4- and 8-lane), non-multiples, and large.
    const LENGTHS: &[usize] = &[0, 1, 3, 4, 5, 7, 8, 9, 15, 16, 100, 1023, 1024];

    #[test]
    fn test_vector_add_matches_scalar() {
        for &len in LENGTHS {
            let a = gen_input(len, 1);
            let b = gen_input(len, 2);
            let mut got = vec![0.0; len];
            let mut expected = vec![0.0; len];
            vector_add(&a, &b, &mut got);
            scalar::vector_add(&a, &b, &mut expected);
            assert!(
                max_abs_error(&got, &expected) < 1e-3,
                "vector add diverged at len={len}"
            );
        }
    }

    #[test]
    fn test_scalar_mul_matches_scalar() {
        for &len in LENGTHS {
            let a = gen_input(len, 3);
            let mut got = vec![0.0; len];
            let mut expected = vec![0.0; len];
            scalar_mul(&a, &[], &mut got);
            scalar::scalar_mul(&a, &[], &mut expected);
            assert!(
                max_abs_error(&got, &expected) < 1e-3,
                "scalar mul diverged at len={len}"
            );
        }
    }

    #[test]
    fn test_dot_product_matches_scalar() {
        for &len in LENGTHS {
            let a = gen_input(len, 4);
            let b = gen_input(len, 5);
            let got = dot_product(&a, &b);
            let expected = scalar::dot_product(&a, &b);
            // Reduction order differs between the paths; scale the tolerance
            // with the magnitude of the sum.
            let tol = expected.abs() * 1e-4 + 1e-3;
            assert!(
                (got - expected).abs() < tol,
                "dot diverged at len={len}: {got} vs {expected}"
            );
        }
    }

    #[test]
    fn test_fused_multiply_add_matches_scalar() {
        for &len in LENGTHS {
            let a = gen_input(len, 6);
            let b = gen_input(len, 7);
            let mut got = vec![0.0; len];
            let mut expected = vec![0.0; len];
            fused_multiply_add(&a, &b, &mut got);
            scalar::fused_multiply_add(&a, &b, &mut expected);
            // Fused vs unfused differ by at most one rounding of the result.
            assert!(
                max_abs_error(&got, &expected) < 1e-3,
                "fma diverged at len={len}"
            );
        }
    }

    #[test]
    fn test_sqrt_abs_matches_scalar() {
        for &len in LENGTHS {
            let a = gen_input(len, 8);
            let mut got = vec![0.0; len];
            let mut expected = vec![0.0; len];
            sqrt_abs(&a, &[], &mut got);
            scalar::sqrt_abs(&a, &[], &mut expected);
            assert!(
                max_abs_error(&got, &expected) < 1e-3,
                "sqrt-abs diverged at len={len}"
            );
        }
    }

    #[test]
    fn test_add_size_eight_scenario() {
        let a: Vec<f32> = (1..=8).map(|i| i as f32).collect();
        let b = vec![1.0f32; 8];
        let mut got = vec![0.0; 8];
        vector_add(&a, &b, &mut got);
        assert_eq!(got, vec![2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0]);
    }

    #[test]
    fn test_dot_size_eight_scenario() {
        let a: Vec<f32> = (1..=8).map(|i| i as f32).collect();
        let b = vec![1.0f32; 8];
        let got = dot_product(&a, &b);
        assert!((got - 36.0).abs() < 1e-3, "dot of 1..=8 against ones: {got}");
    }

    #[test]
    fn test_scalar_mul_concrete() {
        let mut got = vec![0.0; 3];
        scalar_mul(&[4.0, 0.0, 2.0], &[], &mut got);
        assert_eq!(got, vec![10.0, 0.0, 5.0]);
    }

    #[test]
    fn test_sqrt_abs_perfect_squares() {
        let mut got = vec![0.0; 4];
        sqrt_abs(&[0.0, 1.0, 4.0, 9.0], &[], &mut got);
        assert_eq!(got, vec![0.0, 1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_dot_empty_and_single() {
        assert_eq!(dot_product(&[], &[]), 0.0);
        assert!((dot_product(&[3.0], &[2.0]) - 6.0).abs() < 1e-3);
    }

    #[test]
    #[should_panic(expected = "equal-length")]
    fn test_length_mismatch_rejected() {
        dot_product(&[1.0, 2.0], &[1.0]);
    }

    // The portable path is the only one reachable on every platform; pin it
    // down directly so it stays correct even where intrinsics win dispatch.

    #[test]
    fn test_portable_paths_match_scalar() {
        for &len in LENGTHS {
            let a = gen_input(len, 9);
            let b = gen_input(len, 10);
            let mut got = vec![0.0; len];
            let mut expected = vec![0.0; len];

            portable_vector_add(&a, &b, &mut got);
            scalar::vector_add(&a, &b, &mut expected);
            assert_eq!(got, expected, "portable add at len={len}");

            portable_scalar_mul(&a, &mut got);
            scalar::scalar_mul(&a, &[], &mut expected);
            assert_eq!(got, expected, "portable mul at len={len}");

            portable_sqrt_abs(&a, &mut got);
            scalar::sqrt_abs(&a, &[], &mut expected);
            assert_eq!(got, expected, "portable sqrt-abs at len={len}");

            portable_fused_multiply_add(&a, &b, &mut got);
            scalar::fused_multiply_add(&a, &b, &mut expected);
            assert!(
                max_abs_error(&got, &expected) < 1e-3,
                "portable fma at len={len}"
            );

            let dot = portable_dot_product(&a, &b);
            let dot_expected = scalar::dot_product(&a, &b);
            let tol = dot_expected.abs() * 1e-4 + 1e-3;
            assert!(
                (dot - dot_expected).abs() < tol,
                "portable dot at len={len}: {dot} vs {dot_expected}"
            );
        }
    }
}
