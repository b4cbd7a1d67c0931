#![allow(non_snake_case)]

use super::LdlSolver;
use crate::algebra::*;
use std::iter::zip;

const UNKNOWN: usize = usize::MAX;

/// Sparse LDL' factorization of a symmetric quasidefinite matrix.
///
/// Construction consumes an upper triangular [`CscMatrix`](CscMatrix),
/// applies a fill-reducing AMD ordering and performs an up-looking
/// factorization `PKP' = LDL'` with unit lower triangular `L` and
/// diagonal `D`.  The factorization has a fixed sparsity pattern and is
/// computed exactly once; there is no refactorization path.
#[derive(Debug)]
pub struct SparseLdl<T = f64> {
    // permutation vector
    perm: Vec<usize>,
    // unit lower triangular factor
    L: CscMatrix<T>,
    // diagonal D and its inverse
    D: Vec<T>,
    Dinv: Vec<T>,
    // scratch for the permuted right-hand side
    work: Vec<T>,
    // factorization status
    info: i32,
}

impl<T> SparseLdl<T>
where
    T: FloatT,
{
    /// Factorize the upper triangular matrix `K`.
    ///
    /// Structural entries below the diagonal are a caller error and are
    /// checked in debug builds only.  Numerical singularity is reported
    /// through [`info`](LdlSolver::info), not by panicking.
    ///
    /// # Panics
    /// Panics if `K` is not square.
    pub fn new(K: CscMatrix<T>) -> Self {
        assert!(K.is_square(), "matrix to factor is not square");
        debug_assert!(K.is_triu());

        let n = K.nrows();

        let (perm, iperm) = _amd_ordering(&K);
        let A = _permute_symmetric(&K, &iperm);

        // elimination tree and column counts of L
        let mut etree = vec![UNKNOWN; n];
        let mut Lnz = vec![0; n];
        let mut flag = vec![0; n];
        _etree(n, &A.colptr, &A.rowval, &mut flag, &mut Lnz, &mut etree);

        let sumLnz = Lnz.iter().sum();
        let mut L = CscMatrix::spalloc((n, n), sumLnz);
        let mut D = vec![T::zero(); n];
        let mut Dinv = vec![T::zero(); n];

        let info = match _factor(&A, &mut L, &mut D, &mut Dinv, &Lnz, &etree) {
            Ok(()) => 0,
            Err(col) => (col + 1) as i32,
        };

        Self {
            perm,
            L,
            D,
            Dinv,
            work: vec![T::zero(); n],
            info,
        }
    }

    /// The diagonal of `D` in `PKP' = LDL'`
    pub fn d(&self) -> &[T] {
        &self.D
    }
}

impl<T> LdlSolver<T> for SparseLdl<T>
where
    T: FloatT,
{
    fn info(&self) -> i32 {
        self.info
    }

    fn solve(&mut self, h: &[T], t: &mut [T]) {
        assert_eq!(self.info, 0);
        assert_eq!(h.len(), self.D.len());
        assert_eq!(t.len(), self.D.len());

        // permute the right-hand side
        let tmp = &mut self.work;
        zip(&self.perm, tmp.iter_mut()).for_each(|(&p, w)| *w = h[p]);

        _lsolve(&self.L.colptr, &self.L.rowval, &self.L.nzval, tmp);
        zip(tmp.iter_mut(), &self.Dinv).for_each(|(w, &d)| *w *= d);
        _ltsolve(&self.L.colptr, &self.L.rowval, &self.L.nzval, tmp);

        // inverse permutation puts the unpermuted solution in t
        zip(&self.perm, tmp.iter()).for_each(|(&p, &w)| t[p] = w);
    }
}

// Fill-reducing ordering computed with AMD default parameters, except
// for a more generous dense-row threshold.  KKT-structured problems
// order better with the threshold relaxed.
fn _amd_ordering<T: FloatT>(A: &CscMatrix<T>) -> (Vec<usize>, Vec<usize>) {
    let mut control = amd::Control::default();
    control.dense *= 1.5;
    let (perm, iperm, _info) = amd::order(A.nrows(), &A.colptr, &A.rowval, &control).unwrap();
    (perm, iperm)
}

// Given a sparse symmetric matrix `A` (upper triangular entries only),
// return the permuted matrix `PAP'` (also upper triangular) for the
// inverse permutation vector `iperm`.  Entries within the permuted
// columns are not guaranteed to be sorted by row index.
fn _permute_symmetric<T: FloatT>(A: &CscMatrix<T>, iperm: &[usize]) -> CscMatrix<T> {
    let n = A.ncols();
    let mut P = CscMatrix::<T>::spalloc((n, n), A.nnz());

    // count the entries that land in each column of the permuted matrix
    let mut num_entries = vec![0; n];
    for colA in 0..n {
        let colP = iperm[colA];
        for &rowA in &A.rowval[A.colptr[colA]..A.colptr[colA + 1]] {
            let rowP = iperm[rowA];
            num_entries[std::cmp::max(rowP, colP)] += 1;
        }
    }

    // cumulative sum gives the permuted column pointers
    P.colptr[0] = 0;
    let mut acc = 0;
    for (Pck, ne) in zip(&mut P.colptr[1..], &num_entries) {
        *Pck = acc + ne;
        acc = *Pck;
    }
    // reuse as a cursor for the next free slot in each column
    num_entries.copy_from_slice(&P.colptr[0..n]);
    let mut next_free = num_entries;

    // scatter entries into their permuted positions
    for colA in 0..n {
        let colP = iperm[colA];
        for ptr in A.colptr[colA]..A.colptr[colA + 1] {
            let rowP = iperm[A.rowval[ptr]];
            let col_idx = std::cmp::max(colP, rowP);

            let dest = next_free[col_idx];
            P.rowval[dest] = std::cmp::min(colP, rowP);
            P.nzval[dest] = A.nzval[ptr];
            next_free[col_idx] += 1;
        }
    }
    P
}

// Compute the elimination tree for a quasidefinite matrix in upper
// triangular CSC form, together with the column counts of L.
fn _etree(
    n: usize,
    Ap: &[usize],
    Ai: &[usize],
    flag: &mut [usize],
    Lnz: &mut [usize],
    etree: &mut [usize],
) {
    flag.fill(0);
    Lnz.fill(0);
    etree.fill(UNKNOWN);

    for j in 0..n {
        flag[j] = j;
        for &istart in &Ai[Ap[j]..Ap[j + 1]] {
            let mut i = istart;

            while flag[i] != j {
                if etree[i] == UNKNOWN {
                    etree[i] = j;
                }
                Lnz[i] += 1; // nonzeros in this column of L
                flag[i] = j;
                i = etree[i];
            }
        }
    }
}

// Up-looking numeric factorization.  For each row k of L we solve
// y = L(0:k-1, 0:k-1) \ b, where b is the part of the kth column of A
// above the diagonal; the solution y is the kth row of L with an
// implied unit diagonal.  Returns the offending column on a zero pivot.
fn _factor<T: FloatT>(
    A: &CscMatrix<T>,
    L: &mut CscMatrix<T>,
    D: &mut [T],
    Dinv: &mut [T],
    Lnz: &[usize],
    etree: &[usize],
) -> Result<(), usize> {
    let n = A.ncols();
    let (Ap, Ai, Ax) = (&A.colptr, &A.rowval, &A.nzval);

    let mut y_vals = vec![T::zero(); n];
    let mut y_markers = vec![false; n];
    let mut y_idx = vec![0; n];
    let mut elim_buffer = vec![0; n];

    // set L.colptr to cumsum(Lnz), starting from zero
    L.colptr[0] = 0;
    let mut acc = 0;
    for (Lp, Lnz) in zip(&mut L.colptr[1..], Lnz) {
        *Lp = acc + Lnz;
        acc = *Lp;
    }

    // in each column of L, the next available space starts at the
    // first space in the column
    let mut next_colspace = L.colptr[0..n].to_vec();

    if n == 0 {
        return Ok(());
    }

    // First element of D.  The first column of the upper triangle can
    // hold the (0,0) entry only.
    if Ap[1] > Ap[0] && Ai[Ap[0]] == 0 {
        D[0] = Ax[Ap[0]];
    }
    if D[0] == T::zero() {
        return Err(0);
    }
    Dinv[0] = T::recip(D[0]);

    // The first row of L is trivially empty, so start from k = 1
    for k in 1..n {
        // number of nonzeros in this row of L
        let mut nnz_y = 0;

        // First pass: determine where the nonzeros go in the kth row
        // of L by walking the elimination tree, without computing the
        // actual values.
        for i in Ap[k]..Ap[k + 1] {
            let bidx = Ai[i];

            // the diagonal entry seeds D[k] and takes no part in the
            // elimination below
            if bidx == k {
                D[k] = Ax[i];
                continue;
            }

            y_vals[bidx] = Ax[i]; // initialize y(bidx) = b(bidx)

            if !y_markers[bidx] {
                y_markers[bidx] = true;
                elim_buffer[0] = bidx;
                let mut nnz_e = 1; // unvisited elimination path from here

                let mut next_idx = etree[bidx];
                while next_idx != UNKNOWN && next_idx < k {
                    if y_markers[next_idx] {
                        break;
                    }
                    y_markers[next_idx] = true;
                    elim_buffer[nnz_e] = next_idx;
                    next_idx = etree[next_idx];
                    nnz_e += 1;
                }

                // place the buffered elimination path into the current
                // ordering in reverse
                while nnz_e != 0 {
                    nnz_e -= 1;
                    y_idx[nnz_y] = elim_buffer[nnz_e];
                    nnz_y += 1;
                }
            }
        }

        // Second pass: compute the values of the kth row of L
        for i in (0..nnz_y).rev() {
            let cidx = y_idx[i]; // the column of L we are working on

            // eliminate along this column and solve for y(cidx)
            let tmp_idx = next_colspace[cidx];
            let y_vals_cidx = y_vals[cidx];

            for j in L.colptr[cidx]..tmp_idx {
                y_vals[L.rowval[j]] -= L.nzval[j] * y_vals_cidx;
            }

            // the corresponding element of the kth row of L
            L.nzval[tmp_idx] = y_vals_cidx * Dinv[cidx];
            L.rowval[tmp_idx] = k;
            D[k] -= y_vals_cidx * L.nzval[tmp_idx];
            next_colspace[cidx] += 1;

            // reset workspace for the next row
            y_vals[cidx] = T::zero();
            y_markers[cidx] = false;
        }

        // a zero pivot cannot be factored
        if D[k] == T::zero() {
            return Err(k);
        }
        Dinv[k] = T::recip(D[k]);
    }

    Ok(())
}

// Solves (L+I)x = b, with x replacing b
fn _lsolve<T: FloatT>(Lp: &[usize], Li: &[usize], Lx: &[T], x: &mut [T]) {
    for i in 0..x.len() {
        let xi = x[i];
        let (f, l) = (Lp[i], Lp[i + 1]);
        for (&Lij, &Lxj) in zip(&Li[f..l], &Lx[f..l]) {
            x[Lij] -= Lxj * xi;
        }
    }
}

// Solves (L+I)'x = b, with x replacing b
fn _ltsolve<T: FloatT>(Lp: &[usize], Li: &[usize], Lx: &[T], x: &mut [T]) {
    for i in (0..x.len()).rev() {
        let mut s = T::zero();
        let (f, l) = (Lp[i], Lp[i + 1]);
        for (&Lij, &Lxj) in zip(&Li[f..l], &Lx[f..l]) {
            s += Lxj * x[Lij];
        }
        x[i] -= s;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_matrix_4x4() -> CscMatrix<f64> {
        // K =
        //[ 8.0  -3.0   2.0    ⋅ ]
        //[  ⋅    8.0  -1.0    ⋅ ]
        //[  ⋅     ⋅    8.0  -1.0]
        //[  ⋅     ⋅     ⋅    1.0]
        CscMatrix::new(
            4,
            4,
            vec![0, 1, 3, 6, 8],
            vec![0, 0, 1, 0, 1, 2, 2, 3],
            vec![8., -3., 8., 2., -1., 8., -1., 1.],
        )
    }

    fn inf_norm_diff(a: &[f64], b: &[f64]) -> f64 {
        a.norm_inf_diff(b)
    }

    #[test]
    fn test_etree_and_counts() {
        let A = test_matrix_4x4();
        let n = 4;
        let mut etree = vec![UNKNOWN; n];
        let mut Lnz = vec![0; n];
        let mut flag = vec![0; n];

        _etree(n, &A.colptr, &A.rowval, &mut flag, &mut Lnz, &mut etree);

        assert_eq!(etree, vec![1, 2, 3, UNKNOWN]);
        assert_eq!(Lnz.iter().sum::<usize>(), 4);
    }

    #[test]
    fn test_permute_symmetric() {
        //identity permutation should reproduce the input
        let A = test_matrix_4x4();
        let iperm: Vec<usize> = vec![0, 1, 2, 3];
        let P = _permute_symmetric(&A, &iperm);

        assert_eq!(&A.colptr, &P.colptr);
        assert_eq!(&A.rowval, &P.rowval);
        assert_eq!(&A.nzval, &P.nzval);

        //a proper permutation preserves symmetry of the data.  NB: the
        //permuted columns are not sorted by row index, so compare via
        //column counts only
        let iperm: Vec<usize> = vec![2, 3, 0, 1];
        let P = _permute_symmetric(&A, &iperm);
        assert_eq!(P.nnz(), A.nnz());
        assert_eq!(&P.colptr, &vec![0, 1, 3, 5, 8]);
    }

    #[test]
    fn test_factor_and_solve() {
        let K = test_matrix_4x4();
        let mut ldl = SparseLdl::new(K);
        assert_eq!(ldl.info(), 0);

        let x = [1., -2., 3., -4.];
        let b = [20.0, -22.0, 32.0, -7.0];
        let mut t = [0.0; 4];
        ldl.solve(&b, &mut t);
        assert!(inf_norm_diff(&x, &t) <= 1e-10);

        //same factors must solve repeatedly
        let mut t2 = [0.0; 4];
        ldl.solve(&b, &mut t2);
        assert_eq!(t, t2);
    }

    #[test]
    fn test_quasidefinite() {
        // [ 1.0   1.0]
        // [  ⋅   -1.0]   (indefinite but factorizable)
        let K = CscMatrix::new(2, 2, vec![0, 1, 3], vec![0, 0, 1], vec![1., 1., -1.]);
        let mut ldl = SparseLdl::new(K);
        assert_eq!(ldl.info(), 0);

        //one pivot of each sign
        assert_eq!(ldl.d().iter().filter(|&&d| d > 0.).count(), 1);
        assert_eq!(ldl.d().iter().filter(|&&d| d < 0.).count(), 1);

        // K_sym = [1 1; 1 -1], b = K*[2; -1] = [1; 3]
        let mut t = [0.0; 2];
        ldl.solve(&[1., 3.], &mut t);
        assert!(inf_norm_diff(&t, &[2., -1.]) <= 1e-12);
    }

    #[test]
    fn test_singular_reports_index() {
        // [1. 1.]
        // [ ⋅ 1.]  symmetric form is rank one
        let K = CscMatrix::new(2, 2, vec![0, 1, 3], vec![0, 0, 1], vec![1., 1., 1.]);
        let ldl = SparseLdl::new(K);
        assert!(ldl.info() > 0);
    }
}
