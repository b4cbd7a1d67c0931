/// Terminal status of a solve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Optimality tolerances satisfied; primal and dual returned
    Optimal,
    /// Polishing factorization was singular; the unpolished optimal
    /// iterates are returned
    PolishFailed,
    /// A primal infeasibility certificate was found
    PrimalInfeasible,
    /// A dual infeasibility certificate was found
    DualInfeasible,
    /// Iteration cap reached; last iterates returned as best effort
    MaxIterations,
    /// The KKT factorization failed
    Unknown,
}

/// Solver solution.
///
/// `primal` and `dual` are empty when the exit code carries no iterates
/// (infeasibility certificates and factorization failure).
#[derive(Debug, Clone)]
pub struct Solution<T = f64> {
    /// Exit code
    pub code: ExitCode,
    /// Primal vector
    pub primal: Vec<T>,
    /// Dual vector
    pub dual: Vec<T>,
}

impl<T> Solution<T> {
    pub(crate) fn empty(code: ExitCode) -> Self {
        Self {
            code,
            primal: Vec::new(),
            dual: Vec::new(),
        }
    }
}
