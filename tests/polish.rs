#![allow(non_snake_case)]

use splitqp::{algebra::*, solver::*};

fn params() -> SolverParams<f64> {
    SolverParamsBuilder::default()
        .max_iter(200_000)
        .build()
        .unwrap()
}

fn bound_qp_dense() -> QuadraticProgram<f64> {
    // minimum at x = (1, 0) with the first constraint tight from above
    QuadraticProgram {
        P: Matrix::identity(2),
        q: vec![-3., 0.],
        A: Matrix::new_from_slice((1, 2), &[1., 0.]),
        l: vec![f64::NEG_INFINITY],
        u: vec![1.],
    }
}

fn bound_qp_sparse() -> SparseQuadraticProgram<f64> {
    SparseQuadraticProgram {
        P: CscMatrix::identity(2),
        q: vec![-3., 0.],
        A: CsrMatrix::new(1, 2, vec![0, 1], vec![0], vec![1.]),
        l: vec![f64::NEG_INFINITY],
        u: vec![1.],
    }
}

#[test]
fn test_polish_recovers_accuracy() {
    //without polishing the solution is only as good as the tolerances
    let rough = SolverParamsBuilder::default()
        .max_iter(200_000)
        .polish(false)
        .build()
        .unwrap();
    let sol = solve(&bound_qp_dense(), &rough, None);
    assert_eq!(sol.code, ExitCode::Optimal);

    //with polishing the active set is resolved exactly
    let sol = solve(&bound_qp_dense(), &params(), None);
    assert_eq!(sol.code, ExitCode::Optimal);
    assert!(sol.primal.norm_inf_diff(&[1., 0.]) <= 1e-9);
    assert!((sol.dual[0] - 2.).abs() <= 1e-9);
}

#[test]
fn test_polish_idempotent() {
    let pbm = bound_qp_sparse();
    let prm = params();

    let sol = solve(&pbm, &prm, None);
    assert_eq!(sol.code, ExitCode::Optimal);

    let mut repolished = sol.clone();
    polish(&pbm, &mut repolished, &prm);

    assert_eq!(repolished.code, ExitCode::Optimal);
    assert!(sol.primal.norm_inf_diff(&repolished.primal) <= prm.eps_abs);
    assert!(sol.dual.norm_inf_diff(&repolished.dual) <= prm.eps_abs);
}

#[test]
fn test_polish_callable_externally() {
    //solve coarsely without polish, then refine in place
    let pbm = bound_qp_sparse();
    let rough = SolverParamsBuilder::default()
        .max_iter(200_000)
        .polish(false)
        .build()
        .unwrap();

    let mut sol = solve(&pbm, &rough, None);
    assert_eq!(sol.code, ExitCode::Optimal);

    polish(&pbm, &mut sol, &rough);
    assert_eq!(sol.code, ExitCode::Optimal);
    assert!(sol.primal.norm_inf_diff(&[1., 0.]) <= 1e-9);
    assert!((sol.dual[0] - 2.).abs() <= 1e-9);
}

#[test]
fn test_polish_equality_constraint() {
    //after polishing, an equality constraint holds to high accuracy
    let pbm = SparseQuadraticProgram {
        P: CscMatrix::identity(2),
        q: vec![0., 0.],
        A: CsrMatrix::new(1, 2, vec![0, 2], vec![0, 1], vec![1., 1.]),
        l: vec![1.],
        u: vec![1.],
    };

    let sol = solve(&pbm, &params(), None);
    assert_eq!(sol.code, ExitCode::Optimal);

    let mut Ax = [0.0];
    pbm.A.gemv(&mut Ax, &sol.primal, 1.0, 0.0);
    assert!((Ax[0] - 1.).abs() <= 1e-9);
}

#[test]
fn test_polish_with_empty_active_set() {
    //interior solution: polishing reduces to the unconstrained system
    let pbm = QuadraticProgram {
        P: Matrix::new_from_slice((2, 2), &[2., 0., 0., 2.]),
        q: vec![-2., -4.],
        A: Matrix::identity(2),
        l: vec![-10., -10.],
        u: vec![10., 10.],
    };

    let sol = solve(&pbm, &params(), None);
    assert_eq!(sol.code, ExitCode::Optimal);
    assert!(sol.primal.norm_inf_diff(&[1., 2.]) <= 1e-9);
    assert!(sol.dual.norm_inf_diff(&[0., 0.]) <= 1e-9);
}
