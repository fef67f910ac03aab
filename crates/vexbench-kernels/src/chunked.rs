//! Lane-width-agnostic loop splitting: full chunks of `w`, then a scalar
//! remainder tail.
//!
//! The chunk/remainder bookkeeping is implemented once here and instantiated
//! per kernel, instead of duplicating the split logic in every vector loop.
//! The portable SIMD path is built entirely from these helpers; the `lanes`
//! closures receive slices of exactly `w` elements.

/// Unary map: `lanes` processes each full `w`-wide chunk of `a` into the
/// matching chunk of `out`, `tail` handles the remainder element-by-element.
///
/// # Panics
///
/// Panics if `w == 0` or the slices differ in length.
pub fn map1(
    w: usize,
    a: &[f32],
    out: &mut [f32],
    lanes: impl Fn(&[f32], &mut [f32]),
    tail: impl Fn(f32) -> f32,
) {
    assert!(w > 0, "lane width must be > 0");
    assert_eq!(a.len(), out.len(), "map requires equal-length slices");
    let mut ac = a.chunks_exact(w);
    let mut oc = out.chunks_exact_mut(w);
    for (ca, co) in (&mut ac).zip(&mut oc) {
        lanes(ca, co);
    }
    for (&x, o) in ac.remainder().iter().zip(oc.into_remainder()) {
        *o = tail(x);
    }
}

/// Binary map over `a` and `b` into `out`, same splitting as [`map1`].
pub fn map2(
    w: usize,
    a: &[f32],
    b: &[f32],
    out: &mut [f32],
    lanes: impl Fn(&[f32], &[f32], &mut [f32]),
    tail: impl Fn(f32, f32) -> f32,
) {
    assert!(w > 0, "lane width must be > 0");
    assert_eq!(a.len(), b.len(), "map requires equal-length slices");
    assert_eq!(a.len(), out.len(), "map requires equal-length slices");
    let mut ac = a.chunks_exact(w);
    let mut bc = b.chunks_exact(w);
    let mut oc = out.chunks_exact_mut(w);
    for ((ca, cb), co) in (&mut ac).zip(&mut bc).zip(&mut oc) {
        lanes(ca, cb, co);
    }
    for ((&x, &y), o) in ac
        .remainder()
        .iter()
        .zip(bc.remainder())
        .zip(oc.into_remainder())
    {
        *o = tail(x, y);
    }
}

/// Binary reduction: `accumulate` folds each full chunk into a `w`-wide
/// running accumulator, which is horizontally reduced exactly once after the
/// chunk loop; the scalar tail is added on top of that sum.
///
/// Horizontal-reduce-then-tail ordering keeps the result within tolerance of
/// the sequential scalar loop.
pub fn reduce2(
    w: usize,
    a: &[f32],
    b: &[f32],
    accumulate: impl Fn(&[f32], &[f32], &mut [f32]),
    tail: impl Fn(f32, f32) -> f32,
) -> f32 {
    assert!(w > 0, "lane width must be > 0");
    assert_eq!(a.len(), b.len(), "reduce requires equal-length slices");
    let mut acc = vec![0.0f32; w];
    let mut ac = a.chunks_exact(w);
    let mut bc = b.chunks_exact(w);
    for (ca, cb) in (&mut ac).zip(&mut bc) {
        accumulate(ca, cb, &mut acc);
    }
    let mut sum: f32 = acc.iter().sum();
    for (&x, &y) in ac.remainder().iter().zip(bc.remainder()) {
        sum += tail(x, y);
    }
    sum
}
