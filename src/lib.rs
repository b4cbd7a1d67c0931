//! An operator splitting solver for convex quadratic programs.
//!
//! `splitqp` solves problems of the form
//!
//! ```text
//! minimize    (1/2) x'Px + q'x
//! subject to  l ≤ Ax ≤ u
//! ```
//!
//! with `P` symmetric positive semidefinite, `A` a general constraint
//! matrix and `l ≤ u` componentwise, where infinite bounds are permitted.
//! Problems may be posed with dense matrices
//! ([`QuadraticProgram`](crate::solver::QuadraticProgram)) or sparse ones
//! ([`SparseQuadraticProgram`](crate::solver::SparseQuadraticProgram)); the
//! factorization backend is selected by the problem representation.
//!
//! The algorithm is the ADMM scheme described in
//!
//! * Stellato, B., Banjac, G., Goulart, P. et al.
//!   **OSQP: an operator splitting solver for quadratic programs.**
//!   *Math. Prog. Comp.* 12, 637–672 (2020).

pub mod algebra;
pub mod ldl;
pub mod solver;
