#![allow(non_snake_case)]

use super::{ExitCode, QpProblem, Solution, SolverParams};
use crate::algebra::*;
use crate::ldl::LdlSolver;
use std::iter::zip;

/// Active constraint set identified from the signs of the dual
/// variables: negative entries are tight at their lower bound, positive
/// entries at their upper bound.
#[derive(Debug, Clone)]
pub struct ActiveSet {
    /// constraint indices, lower-active first, then upper-active, in
    /// the original order within each group
    pub idx: Vec<usize>,
    /// number of lower-active indices at the head of `idx`
    pub n_lower: usize,
}

impl ActiveSet {
    pub fn from_dual<T: FloatT>(dual: &[T]) -> Self {
        let mut idx: Vec<usize> = (0..dual.len()).filter(|&i| dual[i] < T::zero()).collect();
        let n_lower = idx.len();
        idx.extend((0..dual.len()).filter(|&i| dual[i] > T::zero()));
        Self { idx, n_lower }
    }

    pub fn len(&self) -> usize {
        self.idx.len()
    }

    pub fn is_empty(&self) -> bool {
        self.idx.is_empty()
    }
}

/// Polish a candidate solution on its active constraint set.
///
/// Solves the equality-constrained program obtained by fixing the
/// constraints that the dual identifies as tight, using a factorization
/// perturbed by `params.delta` and `params.polish_iter` sweeps of
/// iterative refinement against the unperturbed system.  On success the
/// primal and dual are replaced by the refined values; if the reduced
/// factorization is singular the solution is left unchanged and its
/// code is set to [`PolishFailed`](ExitCode::PolishFailed).
pub fn polish<T, P>(pbm: &P, sol: &mut Solution<T>, params: &SolverParams<T>)
where
    T: FloatT,
    P: QpProblem<T>,
{
    let n = pbm.nvars();
    let m = pbm.ncons();
    assert_eq!(sol.primal.len(), n, "solution and problem are incompatible");
    assert_eq!(sol.dual.len(), m, "solution and problem are incompatible");

    let active = ActiveSet::from_dual(&sol.dual);
    let na = active.len();
    let r = n + na;

    let (H, mut ldl) = pbm.polish_system(&active, params.delta);

    if ldl.info() != 0 {
        sol.code = ExitCode::PolishFailed;
        return;
    }

    // right-hand side [-q; l over the lower-active; u over the upper-active]
    let mut h = vec![T::zero(); r];
    for (h, &q) in zip(&mut h[..n], pbm.q()) {
        *h = -q;
    }
    for (k, &i) in active.idx.iter().enumerate() {
        h[n + k] = if k < active.n_lower {
            pbm.l()[i]
        } else {
            pbm.u()[i]
        };
    }

    // iterative refinement recovers accuracy lost to the delta
    // perturbation: t <- t + Hd \ (h - H*t)
    let mut t = vec![T::zero(); r];
    let mut e = vec![T::zero(); r];
    let mut dt = vec![T::zero(); r];
    for _ in 0..params.polish_iter {
        e.copy_from(&h);
        H.symv(&mut e, &t, -T::one(), T::one());
        ldl.solve(&e, &mut dt);
        t.axpby(T::one(), &dt, T::one());
    }

    if params.verbose {
        println!("polish: {} active constraints of {}", na, m);
    }

    sol.primal.copy_from(&t[..n]);
    sol.dual.fill(T::zero());
    for (k, &i) in active.idx.iter().enumerate() {
        sol.dual[i] = t[n + k];
    }
}
