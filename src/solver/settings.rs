use crate::algebra::*;
use derive_builder::Builder;

/// Solver parameters, with defaults.
///
/// Defaults can be overridden selectively through
/// [`SolverParamsBuilder`](SolverParamsBuilder):
///
/// ```no_run
/// use splitqp::solver::SolverParamsBuilder;
///
/// let params = SolverParamsBuilder::<f64>::default()
///     .eps_abs(1e-5)
///     .max_iter(20_000)
///     .build()
///     .unwrap();
/// ```
#[derive(Builder, Debug, Clone)]
#[builder(build_fn(validate = "Self::validate"))]
pub struct SolverParams<T: FloatT> {
    ///over-relaxation parameter, in (0, 2)
    #[builder(default = "(1.6).as_T()")]
    pub alpha: T,

    ///primary dual step size
    #[builder(default = "(0.1).as_T()")]
    pub rho: T,

    ///regularization of the primal block
    #[builder(default = "(1e-6).as_T()")]
    pub sigma: T,

    ///absolute threshold for convergence
    #[builder(default = "(1e-3).as_T()")]
    pub eps_abs: T,

    ///relative threshold for convergence
    #[builder(default = "(1e-3).as_T()")]
    pub eps_rel: T,

    ///threshold for primal infeasibility detection
    #[builder(default = "(1e-4).as_T()")]
    pub eps_primal_inf: T,

    ///threshold for dual infeasibility detection
    #[builder(default = "(1e-4).as_T()")]
    pub eps_dual_inf: T,

    ///maximum number of iterations
    #[builder(default = "u64::MAX")]
    pub max_iter: u64,

    ///iterations between checks of the stopping criteria
    #[builder(default = "10")]
    pub stop_check_iter: u64,

    ///run solution polishing on optimal exit
    #[builder(default = "true")]
    pub polish: bool,

    ///number of refinement sweeps during polishing
    #[builder(default = "5")]
    pub polish_iter: u64,

    ///regularization parameter for polishing
    #[builder(default = "(1e-6).as_T()")]
    pub delta: T,

    ///print residual traces to stdout
    #[builder(default = "false")]
    pub verbose: bool,
}

impl<T> Default for SolverParams<T>
where
    T: FloatT,
{
    fn default() -> SolverParams<T> {
        SolverParamsBuilder::<T>::default().build().unwrap()
    }
}

/// Automatic pre-build validation of the parameter ranges
impl<T> SolverParamsBuilder<T>
where
    T: FloatT,
{
    fn validate(&self) -> Result<(), String> {
        if let Some(alpha) = self.alpha {
            if alpha <= T::zero() || alpha >= (2.0).as_T() {
                return Err(format!("alpha must lie in (0,2), got {alpha}"));
            }
        }
        if let Some(rho) = self.rho {
            if rho <= T::zero() {
                return Err(format!("rho must be positive, got {rho}"));
            }
        }
        if let Some(sigma) = self.sigma {
            if sigma <= T::zero() {
                return Err(format!("sigma must be positive, got {sigma}"));
            }
        }
        if let Some(eps) = self.eps_abs {
            if eps < T::zero() {
                return Err(format!("eps_abs must be nonnegative, got {eps}"));
            }
        }
        if let Some(eps) = self.eps_rel {
            if eps < T::zero() {
                return Err(format!("eps_rel must be nonnegative, got {eps}"));
            }
        }
        if let Some(eps) = self.eps_primal_inf {
            if eps <= T::zero() {
                return Err(format!("eps_primal_inf must be positive, got {eps}"));
            }
        }
        if let Some(eps) = self.eps_dual_inf {
            if eps <= T::zero() {
                return Err(format!("eps_dual_inf must be positive, got {eps}"));
            }
        }
        if let Some(iters) = self.stop_check_iter {
            if iters == 0 {
                return Err("stop_check_iter must be at least 1".to_string());
            }
        }
        if let Some(iters) = self.polish_iter {
            if iters == 0 {
                return Err("polish_iter must be at least 1".to_string());
            }
        }
        if let Some(delta) = self.delta {
            if delta <= T::zero() {
                return Err(format!("delta must be positive, got {delta}"));
            }
        }
        Ok(())
    }
}

#[test]
fn test_params_validate() {
    // all standard settings
    let params = SolverParamsBuilder::<f64>::default().build().unwrap();
    assert_eq!(params.stop_check_iter, 10);
    assert!(params.polish);

    // fail on out of range values
    assert!(SolverParamsBuilder::<f64>::default()
        .alpha(2.5)
        .build()
        .is_err());
    assert!(SolverParamsBuilder::<f64>::default()
        .rho(0.0)
        .build()
        .is_err());
    assert!(SolverParamsBuilder::<f64>::default()
        .stop_check_iter(0)
        .build()
        .is_err());
}
