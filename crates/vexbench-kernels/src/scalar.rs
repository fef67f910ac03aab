//! Plain element-by-element reference implementations.
//!
//! These are both the timing baseline and the ground truth the vector paths
//! are verified against. Unary kernels ignore the second input so every
//! kernel shares one map signature.

use crate::kernel::{FMA_ADDEND, SCALE_FACTOR};

/// `out[i] = a[i] + b[i]`
pub fn vector_add(a: &[f32], b: &[f32], out: &mut [f32]) {
    for ((o, &x), &y) in out.iter_mut().zip(a).zip(b) {
        *o = x + y;
    }
}

/// `out[i] = a[i] * 2.5`
pub fn scalar_mul(a: &[f32], _b: &[f32], out: &mut [f32]) {
    for (o, &x) in out.iter_mut().zip(a) {
        *o = x * SCALE_FACTOR;
    }
}

/// `Σ a[i] * b[i]`, sequential accumulation.
pub fn dot_product(a: &[f32], b: &[f32]) -> f32 {
    let mut sum = 0.0f32;
    for (&x, &y) in a.iter().zip(b) {
        sum += x * y;
    }
    sum
}

/// `out[i] = a[i] * b[i] + 1.5`, separate multiply and add.
pub fn fused_multiply_add(a: &[f32], b: &[f32], out: &mut [f32]) {
    for ((o, &x), &y) in out.iter_mut().zip(a).zip(b) {
        *o = x * y + FMA_ADDEND;
    }
}

/// `out[i] = sqrt(|a[i]|)`. The result is defined for negative inputs too.
pub fn sqrt_abs(a: &[f32], _b: &[f32], out: &mut [f32]) {
    for (o, &x) in out.iter_mut().zip(a) {
        *o = x.abs().sqrt();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vector_add() {
        let mut out = vec![0.0; 3];
        vector_add(&[1.0, 2.0, 3.0], &[10.0, 20.0, 30.0], &mut out);
        assert_eq!(out, vec![11.0, 22.0, 33.0]);
    }

    #[test]
    fn test_scalar_mul() {
        let mut out = vec![0.0; 3];
        scalar_mul(&[4.0, 0.0, 2.0], &[0.0; 3], &mut out);
        assert_eq!(out, vec![10.0, 0.0, 5.0]);
    }

    #[test]
    fn test_dot_product() {
        let got = dot_product(&[1.0, 2.0, 3.0, 4.0], &[5.0, 6.0, 7.0, 8.0]);
        assert_eq!(got, 70.0);
    }

    #[test]
    fn test_dot_product_empty() {
        assert_eq!(dot_product(&[], &[]), 0.0);
    }

    #[test]
    fn test_fused_multiply_add() {
        let mut out = vec![0.0; 2];
        fused_multiply_add(&[2.0, 3.0], &[4.0, 5.0], &mut out);
        assert_eq!(out, vec![9.5, 16.5]);
    }

    #[test]
    fn test_sqrt_abs_perfect_squares() {
        let mut out = vec![0.0; 4];
        sqrt_abs(&[0.0, 1.0, 4.0, 9.0], &[0.0; 4], &mut out);
        assert_eq!(out, vec![0.0, 1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_sqrt_abs_negative_input() {
        let mut out = vec![0.0; 1];
        sqrt_abs(&[-16.0], &[0.0], &mut out);
        assert_eq!(out, vec![4.0]);
    }

    #[test]
    fn test_idempotent_on_unchanged_inputs() {
        let a: Vec<f32> = (0..100).map(|i| i as f32 * 0.7).collect();
        let b: Vec<f32> = (0..100).map(|i| i as f32 * 0.3).collect();
        let mut first = vec![0.0; 100];
        let mut second = vec![0.0; 100];
        fused_multiply_add(&a, &b, &mut first);
        fused_multiply_add(&a, &b, &mut second);
        assert_eq!(first, second);
    }
}
