//! Symmetric indefinite linear solvers.
//!
//! Both backends factorize a symmetric matrix `K` once at construction,
//! reading only its upper triangle, and then solve `K t = h` any number
//! of times against the same factors.  Numerical failure is reported
//! through [`info`](LdlSolver::info) rather than by error returns, so a
//! handle is always produced and must be checked before use.

use crate::algebra::FloatT;

mod dense;
mod sparse;
pub use dense::*;
pub use sparse::*;

/// A factorization of a symmetric (possibly indefinite) matrix.
pub trait LdlSolver<T: FloatT> {
    /// Factorization status.
    ///
    /// * 0: successful factorization
    /// * i > 0: the matrix is numerically singular with `D(i,i) = 0`,
    ///   where `i` counts in the factor's own elimination order.
    fn info(&self) -> i32;

    /// Solve `K t = h` using the stored factors.
    ///
    /// The factorization itself is never modified, so this may be called
    /// repeatedly.  Must not be called when [`info`](LdlSolver::info) is
    /// nonzero.
    fn solve(&mut self, h: &[T], t: &mut [T]);
}
