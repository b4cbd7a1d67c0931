#![allow(non_snake_case)]

use super::kkt::*;
use super::ActiveSet;
use crate::algebra::*;
use crate::ldl::*;

/// A quadratic program
///
/// ```text
/// minimize    (1/2) x'Px + q'x
/// subject to  l ≤ Ax ≤ u
/// ```
///
/// over the matrix representation chosen by the implementor.  The
/// iteration and polishing code is written entirely against this trait,
/// so the factorization backend follows the problem representation and
/// nothing else.
pub trait QpProblem<T: FloatT> {
    /// Factorization type for the representation
    type Ldl: LdlSolver<T>;
    /// Symmetric matrix type used during polishing
    type SymMat: SymMatrixVectorMultiply<T = T>;

    /// number of decision variables
    fn nvars(&self) -> usize;
    /// number of constraints
    fn ncons(&self) -> usize;

    fn q(&self) -> &[T];
    fn l(&self) -> &[T];
    fn u(&self) -> &[T];

    /// `y = Px`, reading only the upper triangle of `P`
    fn mul_P(&self, x: &[T], y: &mut [T]);
    /// `y = Ax`
    fn mul_A(&self, x: &[T], y: &mut [T]);
    /// `y = A'x`
    fn mul_At(&self, x: &[T], y: &mut [T]);

    /// Assemble and factorize the iteration matrix
    /// `K = [P + sigma*I, A'; ., -(1/rho)*I]`
    fn kkt_ldl(&self, sigma: T, rho: T) -> Self::Ldl;

    /// Assemble the polishing system for the given active set: returns
    /// the unperturbed `H = [P, Ab'; ., 0]` together with a
    /// factorization of `H` perturbed by `+delta` on the primal block
    /// diagonal and `-delta` on the multiplier block diagonal
    fn polish_system(&self, active: &ActiveSet, delta: T) -> (Self::SymMat, Self::Ldl);
}

/// Quadratic program with dense problem data.
///
/// Only the upper triangle of `P` is read.  Infinite bounds are
/// permitted in `l` and `u`.
#[derive(Debug, Clone)]
pub struct QuadraticProgram<T = f64> {
    /// Positive semidefinite square cost
    pub P: Matrix<T>,
    /// Linear cost
    pub q: Vec<T>,
    /// Constraint matrix
    pub A: Matrix<T>,
    /// Constraint lower bound
    pub l: Vec<T>,
    /// Constraint upper bound
    pub u: Vec<T>,
}

/// Quadratic program with sparse problem data.
///
/// `P` is held column major and only its upper triangle is read; `A` is
/// held row major so that the coefficients of each constraint are
/// contiguous.  Infinite bounds are permitted in `l` and `u`.
#[derive(Debug, Clone)]
pub struct SparseQuadraticProgram<T = f64> {
    /// Positive semidefinite square cost
    pub P: CscMatrix<T>,
    /// Linear cost
    pub q: Vec<T>,
    /// Constraint matrix
    pub A: CsrMatrix<T>,
    /// Constraint lower bound
    pub l: Vec<T>,
    /// Constraint upper bound
    pub u: Vec<T>,
}

fn _check_dimensions(pdims: (usize, usize), adims: (usize, usize), q: usize, l: usize, u: usize) {
    let (m, n) = adims;
    assert!(pdims.0 == pdims.1, "P is not square");
    assert!(pdims.1 == n, "P and A have incompatible dimensions");
    assert!(q == n, "q and A have incompatible dimensions");
    assert!(l == m, "l and A have incompatible dimensions");
    assert!(u == m, "u and A have incompatible dimensions");
}

impl<T> QuadraticProgram<T>
where
    T: FloatT,
{
    /// Constructor with dimension checks.
    ///
    /// # Panics
    /// Panics on dimensional incompatibility between the fields.
    pub fn new(P: Matrix<T>, q: Vec<T>, A: Matrix<T>, l: Vec<T>, u: Vec<T>) -> Self {
        _check_dimensions(P.size(), A.size(), q.len(), l.len(), u.len());
        Self { P, q, A, l, u }
    }
}

impl<T> SparseQuadraticProgram<T>
where
    T: FloatT,
{
    /// Constructor with dimension checks.
    ///
    /// # Panics
    /// Panics on dimensional incompatibility between the fields.
    pub fn new(P: CscMatrix<T>, q: Vec<T>, A: CsrMatrix<T>, l: Vec<T>, u: Vec<T>) -> Self {
        _check_dimensions(P.size(), A.size(), q.len(), l.len(), u.len());
        Self { P, q, A, l, u }
    }
}

impl<T> QpProblem<T> for QuadraticProgram<T>
where
    T: FloatT + BlasFloatT,
{
    type Ldl = DenseLdl<T>;
    type SymMat = Matrix<T>;

    fn nvars(&self) -> usize {
        self.A.ncols()
    }
    fn ncons(&self) -> usize {
        self.A.nrows()
    }

    fn q(&self) -> &[T] {
        &self.q
    }
    fn l(&self) -> &[T] {
        &self.l
    }
    fn u(&self) -> &[T] {
        &self.u
    }

    fn mul_P(&self, x: &[T], y: &mut [T]) {
        self.P.symv(y, x, T::one(), T::zero());
    }
    fn mul_A(&self, x: &[T], y: &mut [T]) {
        self.A.gemv(y, x, T::one(), T::zero());
    }
    fn mul_At(&self, x: &[T], y: &mut [T]) {
        self.A.t().gemv(y, x, T::one(), T::zero());
    }

    fn kkt_ldl(&self, sigma: T, rho: T) -> DenseLdl<T> {
        DenseLdl::new(assemble_kkt_dense(&self.P, &self.A, sigma, rho))
    }

    fn polish_system(&self, active: &ActiveSet, delta: T) -> (Matrix<T>, DenseLdl<T>) {
        let (H, Hd) = assemble_polish_dense(&self.P, &self.A, active, delta);
        (H, DenseLdl::new(Hd))
    }
}

impl<T> QpProblem<T> for SparseQuadraticProgram<T>
where
    T: FloatT,
{
    type Ldl = SparseLdl<T>;
    type SymMat = CscMatrix<T>;

    fn nvars(&self) -> usize {
        self.A.ncols()
    }
    fn ncons(&self) -> usize {
        self.A.nrows()
    }

    fn q(&self) -> &[T] {
        &self.q
    }
    fn l(&self) -> &[T] {
        &self.l
    }
    fn u(&self) -> &[T] {
        &self.u
    }

    fn mul_P(&self, x: &[T], y: &mut [T]) {
        self.P.symv(y, x, T::one(), T::zero());
    }
    fn mul_A(&self, x: &[T], y: &mut [T]) {
        self.A.gemv(y, x, T::one(), T::zero());
    }
    fn mul_At(&self, x: &[T], y: &mut [T]) {
        self.A.t().gemv(y, x, T::one(), T::zero());
    }

    fn kkt_ldl(&self, sigma: T, rho: T) -> SparseLdl<T> {
        SparseLdl::new(assemble_kkt_sparse(&self.P, &self.A, sigma, rho))
    }

    fn polish_system(&self, active: &ActiveSet, delta: T) -> (CscMatrix<T>, SparseLdl<T>) {
        let (H, Hd) = assemble_polish_sparse(&self.P, &self.A, active, delta);
        (H, SparseLdl::new(Hd))
    }
}
