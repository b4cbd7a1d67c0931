#![allow(non_snake_case)]

use super::*;
use crate::algebra::*;
use crate::ldl::LdlSolver;
use itertools::izip;

/// Solve a quadratic program by operator splitting.
///
/// `hotstart` optionally seeds the primal and dual iterates from a
/// prior solution of a related problem; the splitting variable is
/// recomputed as `z = Ax`.
///
/// All outcomes are reported through the exit code of the returned
/// [`Solution`](Solution); see [`ExitCode`](ExitCode).
pub fn solve<T, P>(pbm: &P, params: &SolverParams<T>, hotstart: Option<&Solution<T>>) -> Solution<T>
where
    T: FloatT,
    P: QpProblem<T>,
{
    let n = pbm.nvars();
    let m = pbm.ncons();
    let (q, l, u) = (pbm.q(), pbm.l(), pbm.u());
    assert_eq!(q.len(), n, "q and A have incompatible dimensions");
    assert_eq!(l.len(), m, "l and A have incompatible dimensions");
    assert_eq!(u.len(), m, "u and A have incompatible dimensions");

    let inf = T::infinity();
    let rho = params.rho;
    let alpha = params.alpha;
    let sigma = params.sigma;

    // the feasible set must admit at least one point before anything
    // is factorized
    if izip!(l, u).any(|(&li, &ui)| ui - li < T::zero())
        || l.iter().any(|&li| li == inf)
        || u.iter().any(|&ui| ui == -inf)
    {
        return _finish(Solution::empty(ExitCode::PrimalInfeasible), params);
    }

    let mut kkt = pbm.kkt_ldl(sigma, rho);
    if kkt.info() != 0 {
        return _finish(Solution::empty(ExitCode::Unknown), params);
    }

    // working vectors, allocated once and reused across iterations
    let mut x = vec![T::zero(); n];
    let mut y = vec![T::zero(); m];
    let mut z = vec![T::zero(); m];
    let mut x_next = vec![T::zero(); n];
    let mut y_next = vec![T::zero(); m];
    let mut z_next = vec![T::zero(); m];
    let mut z_tilde = vec![T::zero(); m];
    let mut z_interp = vec![T::zero(); m];
    let mut h = vec![T::zero(); n + m];
    let mut p = vec![T::zero(); n + m];

    // residual and certificate workspace
    let mut Px = vec![T::zero(); n];
    let mut Ax = vec![T::zero(); m];
    let mut Aty = vec![T::zero(); n];
    let mut dx = vec![T::zero(); n];
    let mut dy = vec![T::zero(); m];
    let mut Adx = vec![T::zero(); m];
    let mut Atdy = vec![T::zero(); n];

    if let Some(start) = hotstart {
        assert_eq!(start.primal.len(), n, "hotstart has incompatible dimensions");
        assert_eq!(start.dual.len(), m, "hotstart has incompatible dimensions");
        x.copy_from(&start.primal);
        y.copy_from(&start.dual);
        pbm.mul_A(&x, &mut z);
    }

    if params.verbose {
        println!("{:>9}  {:>10}  {:>10}", "iter", "r_prim", "r_dual");
    }

    for i in 0..params.max_iter {
        // h = [sigma*x - q; z - y/rho], then solve K p = h
        for (hj, &xj, &qj) in izip!(&mut h[..n], &x, q) {
            *hj = sigma * xj - qj;
        }
        for (hj, &zj, &yj) in izip!(&mut h[n..], &z, &y) {
            *hj = zj - yj / rho;
        }
        kkt.solve(&h, &mut p);

        // over-relaxed iterate, projection onto [l,u], dual update
        for (zt, &zj, &pj, &yj) in izip!(&mut z_tilde, &z, &p[n..], &y) {
            *zt = zj + (pj - yj) / rho;
        }
        for (xn, &pj, &xj) in izip!(&mut x_next, &p[..n], &x) {
            *xn = alpha * pj + (T::one() - alpha) * xj;
        }
        for (zi, &zt, &zj) in izip!(&mut z_interp, &z_tilde, &z) {
            *zi = alpha * zt + (T::one() - alpha) * zj;
        }
        for (zn, yn, &zi, &yj, &li, &ui) in izip!(&mut z_next, &mut y_next, &z_interp, &y, l, u) {
            *zn = T::min(T::max(zi + yj / rho, li), ui);
            *yn = yj + rho * (zi - *zn);
        }

        // stopping criteria, checked once per batch
        if i % params.stop_check_iter == params.stop_check_iter - 1 {
            // ---------- optimality

            pbm.mul_P(&x, &mut Px);
            pbm.mul_A(&x, &mut Ax);
            pbm.mul_At(&y, &mut Aty);

            let primal_scale = T::max(Ax.norm_inf(), z.norm_inf());
            let dual_scale = T::max(T::max(Px.norm_inf(), q.norm_inf()), Aty.norm_inf());

            let r_prim = Ax.norm_inf_diff(&z);
            let r_dual = izip!(&Px, q, &Aty).fold(T::zero(), |acc, (&pj, &qj, &aj)| {
                T::max(acc, T::abs(pj + qj + aj))
            });

            if params.verbose {
                println!("{:>9}  {:>10.2e}  {:>10.2e}", i + 1, r_prim, r_dual);
            }

            if r_prim <= params.eps_abs + params.eps_rel * primal_scale
                && r_dual <= params.eps_abs + params.eps_abs * dual_scale
            {
                let mut sol = Solution {
                    code: ExitCode::Optimal,
                    primal: x,
                    dual: y,
                };
                if params.polish {
                    polish(pbm, &mut sol, params);
                }
                return _finish(sol, params);
            }

            // ---------- primal infeasibility

            for (dxj, &xn, &xj) in izip!(&mut dx, &x_next, &x) {
                *dxj = xn - xj;
            }
            for (dyj, &yn, &yj) in izip!(&mut dy, &y_next, &y) {
                *dyj = yn - yj;
            }
            let dx_norm = dx.norm_inf();
            let dy_norm = dy.norm_inf();

            pbm.mul_At(&dy, &mut Atdy);
            let At_dy_norm = Atdy.norm_inf();

            // sum of bound contributions along the dual direction.  An
            // unbounded contribution short-circuits to +inf, in which
            // case no certificate can be issued
            let mut bound_sum = T::zero();
            for (&li, &ui, &dyj) in izip!(l, u, &dy) {
                if ui != inf {
                    bound_sum += ui * T::max(T::zero(), dyj);
                } else if dyj > params.eps_primal_inf * dy_norm {
                    bound_sum = inf;
                    break;
                }
                if li != -inf {
                    bound_sum += li * T::min(T::zero(), dyj);
                } else if dyj < -params.eps_primal_inf * dy_norm {
                    bound_sum = inf;
                    break;
                }
            }

            if T::max(At_dy_norm, bound_sum) < params.eps_primal_inf * dy_norm {
                return _finish(Solution::empty(ExitCode::PrimalInfeasible), params);
            }

            // ---------- dual infeasibility

            pbm.mul_P(&dx, &mut Px);
            let mut dual_infeasible = Px.norm_inf() <= params.eps_dual_inf * dx_norm
                && q.dot(&dx) <= params.eps_dual_inf * dx_norm;

            pbm.mul_A(&dx, &mut Adx);
            for (&li, &ui, &Adxj) in izip!(l, u, &Adx) {
                if !dual_infeasible {
                    break;
                }
                if ui == inf {
                    dual_infeasible &= Adxj >= -params.eps_dual_inf * dx_norm;
                } else if li == -inf {
                    dual_infeasible &= Adxj <= params.eps_dual_inf * dx_norm;
                } else {
                    dual_infeasible &= T::abs(Adxj) < params.eps_dual_inf * dx_norm;
                }
            }

            if dual_infeasible {
                return _finish(Solution::empty(ExitCode::DualInfeasible), params);
            }
        }

        x.copy_from(&x_next);
        y.copy_from(&y_next);
        z.copy_from(&z_next);
    }

    _finish(
        Solution {
            code: ExitCode::MaxIterations,
            primal: x,
            dual: y,
        },
        params,
    )
}

fn _finish<T: FloatT>(sol: Solution<T>, params: &SolverParams<T>) -> Solution<T> {
    if params.verbose {
        println!("status: {:?}", sol.code);
    }
    sol
}
