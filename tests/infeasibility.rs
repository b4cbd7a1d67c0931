#![allow(non_snake_case)]

use splitqp::{algebra::*, solver::*};

fn params() -> SolverParams<f64> {
    SolverParamsBuilder::default()
        .max_iter(200_000)
        .build()
        .unwrap()
}

#[test]
fn test_prescreen_crossed_bounds() {
    // l > u is rejected before any factorization
    let pbm = QuadraticProgram {
        P: Matrix::identity(1),
        q: vec![0.],
        A: Matrix::identity(1),
        l: vec![1.],
        u: vec![0.],
    };

    let sol = solve(&pbm, &params(), None);

    assert_eq!(sol.code, ExitCode::PrimalInfeasible);
    assert!(sol.primal.is_empty());
    assert!(sol.dual.is_empty());
}

#[test]
fn test_prescreen_infinite_bounds() {
    // a lower bound of +inf admits no feasible point
    let pbm = QuadraticProgram {
        P: Matrix::identity(1),
        q: vec![0.],
        A: Matrix::identity(1),
        l: vec![f64::INFINITY],
        u: vec![f64::INFINITY],
    };
    assert_eq!(solve(&pbm, &params(), None).code, ExitCode::PrimalInfeasible);

    // likewise an upper bound of -inf
    let pbm = QuadraticProgram {
        P: Matrix::identity(1),
        q: vec![0.],
        A: Matrix::identity(1),
        l: vec![f64::NEG_INFINITY],
        u: vec![f64::NEG_INFINITY],
    };
    assert_eq!(solve(&pbm, &params(), None).code, ExitCode::PrimalInfeasible);
}

#[test]
fn test_primal_infeasible_dense() {
    // x1 ≥ 1 and -x1 ≥ 1 cannot both hold
    let pbm = QuadraticProgram {
        P: Matrix::identity(2),
        q: vec![0., 0.],
        A: Matrix::new_from_slice((2, 2), &[1., -1., 0., 0.]),
        l: vec![1., 1.],
        u: vec![f64::INFINITY, f64::INFINITY],
    };

    let sol = solve(&pbm, &params(), None);

    assert_eq!(sol.code, ExitCode::PrimalInfeasible);
    assert!(sol.primal.is_empty());
    assert!(sol.dual.is_empty());
}

#[test]
fn test_primal_infeasible_sparse() {
    let pbm = SparseQuadraticProgram {
        P: CscMatrix::identity(2),
        q: vec![0., 0.],
        A: CsrMatrix::new(2, 2, vec![0, 1, 2], vec![0, 0], vec![1., -1.]),
        l: vec![1., 1.],
        u: vec![f64::INFINITY, f64::INFINITY],
    };

    let sol = solve(&pbm, &params(), None);

    assert_eq!(sol.code, ExitCode::PrimalInfeasible);
}

#[test]
fn test_dual_infeasible_dense() {
    // objective is unbounded below in x2
    let pbm = QuadraticProgram {
        P: Matrix::new_from_slice((2, 2), &[1., 0., 0., 0.]),
        q: vec![0., -1.],
        A: Matrix::zeros((0, 2)),
        l: vec![],
        u: vec![],
    };

    let sol = solve(&pbm, &params(), None);

    assert_eq!(sol.code, ExitCode::DualInfeasible);
    assert!(sol.primal.is_empty());
    assert!(sol.dual.is_empty());
}

#[test]
fn test_dual_infeasible_sparse() {
    let pbm = SparseQuadraticProgram {
        P: CscMatrix::new(2, 2, vec![0, 1, 1], vec![0], vec![1.]),
        q: vec![0., -1.],
        A: CsrMatrix::zeros((0, 2)),
        l: vec![],
        u: vec![],
    };

    let sol = solve(&pbm, &params(), None);

    assert_eq!(sol.code, ExitCode::DualInfeasible);
}

#[test]
fn test_dual_infeasible_one_sided_bound() {
    // minimize x subject to x ≤ 1: unbounded below along dx = -1,
    // which the infinite lower bound must permit
    let pbm = SparseQuadraticProgram {
        P: CscMatrix::new(1, 1, vec![0, 0], vec![], vec![]),
        q: vec![1.],
        A: CsrMatrix::identity(1),
        l: vec![f64::NEG_INFINITY],
        u: vec![1.],
    };

    let sol = solve(&pbm, &params(), None);

    assert_eq!(sol.code, ExitCode::DualInfeasible);
}
