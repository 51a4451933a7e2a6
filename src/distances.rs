use crate::memory::Primitive;

/// Squared euclidean distance between two samples of the same dimension.
#[inline(always)]
pub fn squared_euclidean<T: Primitive>(a: &[T], b: &[T]) -> T {
    debug_assert_eq!(a.len(), b.len());
    a.iter().cloned()
        .zip(b.iter().cloned())
        .map(|(av, bv)| av - bv)    // <a> - <b>
        .map(|v| v * v)             // <vec_components> ^2
        .sum()
}

/// Squared norm of a single sample.
#[inline(always)]
pub fn squared_norm<T: Primitive>(a: &[T]) -> T {
    a.iter().cloned().map(|v| v * v).sum()
}

/// Squared euclidean distance, using the (precomputed) squared norms of both samples:
/// `|a|^2 + |b|^2 - 2<a,b>`
///
/// Cancellation can push the result slightly below zero, so it is clamped.
#[inline(always)]
pub(crate) fn squared_euclidean_with_norms<T: Primitive>(a: &[T], a_norm: T, b: &[T], b_norm: T) -> T {
    let dot: T = a.iter().cloned().zip(b.iter().cloned()).map(|(av, bv)| av * bv).sum();
    (a_norm + b_norm - T::from_f64(2.0) * dot).max(T::zero())
}
