//! The ADMM solver: problem types, parameters, solve and polish entry
//! points.
//!
//! __Example usage__ : to solve
//! ```text
//! minimize    (1/2)(x1² + x2²)
//! subject to  x1 + x2 = 1
//! ```
//!
//! ```no_run
//! use splitqp::algebra::*;
//! use splitqp::solver::*;
//!
//! let pbm = QuadraticProgram {
//!     P: Matrix::identity(2),
//!     q: vec![0., 0.],
//!     A: Matrix::new_from_slice((1, 2), &[1., 1.]),
//!     l: vec![1.],
//!     u: vec![1.],
//! };
//!
//! let sol = solve(&pbm, &SolverParams::default(), None);
//! assert_eq!(sol.code, ExitCode::Optimal);
//! ```

mod admm;
mod kkt;
mod polish;
mod problem;
mod settings;
mod solution;

pub use admm::*;
pub use polish::*;
pub use problem::*;
pub use settings::*;
pub use solution::*;
