//! Kernel descriptor table: five named scalar/vector implementation pairs.
//!
//! Kernels are plain data — a name plus two function values — rather than a
//! trait hierarchy. The harness walks [`KERNELS`] in order.

use crate::{scalar, vector};

/// Multiplier for the Scalar Multiplication kernel.
pub const SCALE_FACTOR: f32 = 2.5;
/// Addend for the Fused Multiply-Add kernel.
pub const FMA_ADDEND: f32 = 1.5;

/// Whether a kernel writes the output buffer or folds to a single value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KernelKind {
    Map,
    Reduce,
}

/// A map implementation: reads `a` (and possibly `b`), writes every element
/// of `out`.
pub type MapFn = fn(&[f32], &[f32], &mut [f32]);
/// A reduce implementation: folds `a` and `b` into a single value.
pub type ReduceFn = fn(&[f32], &[f32]) -> f32;

/// One side (scalar or vector) of a kernel pair.
#[derive(Clone, Copy)]
pub enum KernelImpl {
    Map(MapFn),
    Reduce(ReduceFn),
}

impl KernelImpl {
    pub fn kind(&self) -> KernelKind {
        match self {
            Self::Map(_) => KernelKind::Map,
            Self::Reduce(_) => KernelKind::Reduce,
        }
    }
}

/// A named numeric operation with interchangeable scalar and vector
/// implementations. Stateless and immutable; for any fixture the two sides
/// must agree within the harness tolerance.
#[derive(Clone, Copy)]
pub struct Kernel {
    pub name: &'static str,
    pub kind: KernelKind,
    pub scalar: KernelImpl,
    pub vector: KernelImpl,
}

/// The benchmark suite, in run order.
pub const KERNELS: &[Kernel] = &[
    Kernel {
        name: "Vector Addition",
        kind: KernelKind::Map,
        scalar: KernelImpl::Map(scalar::vector_add),
        vector: KernelImpl::Map(vector::vector_add),
    },
    Kernel {
        name: "Scalar Multiplication",
        kind: KernelKind::Map,
        scalar: KernelImpl::Map(scalar::scalar_mul),
        vector: KernelImpl::Map(vector::scalar_mul),
    },
    Kernel {
        name: "Dot Product",
        kind: KernelKind::Reduce,
        scalar: KernelImpl::Reduce(scalar::dot_product),
        vector: KernelImpl::Reduce(vector::dot_product),
    },
    Kernel {
        name: "Fused Multiply-Add",
        kind: KernelKind::Map,
        scalar: KernelImpl::Map(scalar::fused_multiply_add),
        vector: KernelImpl::Map(vector::fused_multiply_add),
    },
    Kernel {
        name: "Square Root of Abs",
        kind: KernelKind::Map,
        scalar: KernelImpl::Map(scalar::sqrt_abs),
        vector: KernelImpl::Map(vector::sqrt_abs),
    },
];
