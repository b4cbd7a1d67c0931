#![allow(non_snake_case)]

// Assembly of the quasidefinite systems driving the iteration:
//
//   K = [ P + sigma*I   A'          ]      (n+m) x (n+m)
//       [ .            -(1/rho)*I   ]
//
// and, for polishing with na active constraints,
//
//   H = [ P    Ab' ]                       (n+na) x (n+na)
//       [ .    0   ]
//
// where Ab stacks the active rows of A.  Only the upper triangles are
// populated.  Entries of P below the diagonal are ignored, so P may be
// supplied either full or as its upper triangle.

use super::ActiveSet;
use crate::algebra::*;

pub(crate) fn assemble_kkt_dense<T: FloatT>(
    P: &Matrix<T>,
    A: &Matrix<T>,
    sigma: T,
    rho: T,
) -> Matrix<T> {
    let (m, n) = A.size();
    let mut K = Matrix::<T>::zeros((n + m, n + m));

    for col in 0..n {
        for row in 0..=col {
            K[(row, col)] = P[(row, col)];
        }
        K[(col, col)] += sigma;
    }
    for i in 0..m {
        for row in 0..n {
            K[(row, n + i)] = A[(i, row)];
        }
        K[(n + i, n + i)] = -T::recip(rho);
    }
    K
}

// Returns the pair (H, H_delta), where H_delta carries the +/- delta
// diagonal perturbation making the system quasidefinite.  H itself is
// used unperturbed during iterative refinement.
pub(crate) fn assemble_polish_dense<T: FloatT>(
    P: &Matrix<T>,
    A: &Matrix<T>,
    active: &ActiveSet,
    delta: T,
) -> (Matrix<T>, Matrix<T>) {
    let n = P.ncols();
    let na = active.len();
    let mut H = Matrix::<T>::zeros((n + na, n + na));

    for col in 0..n {
        for row in 0..=col {
            H[(row, col)] = P[(row, col)];
        }
    }
    for (k, &i) in active.idx.iter().enumerate() {
        for row in 0..n {
            H[(row, n + k)] = A[(i, row)];
        }
    }

    let mut Hd = H.clone();
    for col in 0..n {
        Hd[(col, col)] += delta;
    }
    for k in 0..na {
        Hd[(n + k, n + k)] -= delta;
    }

    (H, Hd)
}

pub(crate) fn assemble_kkt_sparse<T: FloatT>(
    P: &CscMatrix<T>,
    A: &CsrMatrix<T>,
    sigma: T,
    rho: T,
) -> CscMatrix<T> {
    let (m, n) = A.size();
    let k = n + m;

    // exact nonzero counts per column: the upper triangular entries of
    // P's columns with a guaranteed diagonal slot, then the rows of A
    // with the trailing diagonal
    let mut colptr = Vec::with_capacity(k + 1);
    let mut rowval = Vec::with_capacity(P.nnz() + A.nnz() + k);
    let mut nzval = Vec::with_capacity(P.nnz() + A.nnz() + k);
    colptr.push(0);

    for col in 0..n {
        let mut has_diag = false;
        for ptr in P.colptr[col]..P.colptr[col + 1] {
            let row = P.rowval[ptr];
            if row > col {
                break;
            }
            rowval.push(row);
            if row == col {
                has_diag = true;
                nzval.push(P.nzval[ptr] + sigma);
            } else {
                nzval.push(P.nzval[ptr]);
            }
        }
        if !has_diag {
            rowval.push(col);
            nzval.push(sigma);
        }
        colptr.push(rowval.len());
    }

    for i in 0..m {
        for ptr in A.rowptr[i]..A.rowptr[i + 1] {
            rowval.push(A.colval[ptr]);
            nzval.push(A.nzval[ptr]);
        }
        rowval.push(n + i);
        nzval.push(-T::recip(rho));
        colptr.push(rowval.len());
    }

    CscMatrix::new(k, k, colptr, rowval, nzval)
}

// Sparse counterpart of assemble_polish_dense.  H_delta carries
// explicit structural slots for the perturbed diagonal in both blocks;
// H carries none beyond what P provides.
pub(crate) fn assemble_polish_sparse<T: FloatT>(
    P: &CscMatrix<T>,
    A: &CsrMatrix<T>,
    active: &ActiveSet,
    delta: T,
) -> (CscMatrix<T>, CscMatrix<T>) {
    let n = P.ncols();
    let na = active.len();
    let r = n + na;

    let mut colptr = vec![0];
    let mut rowval = Vec::new();
    let mut nzval = Vec::new();

    let mut dcolptr = vec![0];
    let mut drowval = Vec::new();
    let mut dnzval = Vec::new();

    for col in 0..n {
        let mut has_diag = false;
        for ptr in P.colptr[col]..P.colptr[col + 1] {
            let row = P.rowval[ptr];
            if row > col {
                break;
            }
            rowval.push(row);
            nzval.push(P.nzval[ptr]);
            drowval.push(row);
            if row == col {
                has_diag = true;
                dnzval.push(P.nzval[ptr] + delta);
            } else {
                dnzval.push(P.nzval[ptr]);
            }
        }
        if !has_diag {
            drowval.push(col);
            dnzval.push(delta);
        }
        colptr.push(rowval.len());
        dcolptr.push(drowval.len());
    }

    for (k, &i) in active.idx.iter().enumerate() {
        for ptr in A.rowptr[i]..A.rowptr[i + 1] {
            rowval.push(A.colval[ptr]);
            nzval.push(A.nzval[ptr]);
            drowval.push(A.colval[ptr]);
            dnzval.push(A.nzval[ptr]);
        }
        drowval.push(n + k);
        dnzval.push(-delta);
        colptr.push(rowval.len());
        dcolptr.push(drowval.len());
    }

    let H = CscMatrix::new(r, r, colptr, rowval, nzval);
    let Hd = CscMatrix::new(r, r, dcolptr, drowval, dnzval);
    (H, Hd)
}
