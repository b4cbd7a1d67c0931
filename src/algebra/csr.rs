#![allow(non_snake_case)]

use crate::algebra::*;

/// Sparse matrix in Compressed Sparse Row (CSR) format.
///
/// Used for constraint matrices, where the coefficients of each
/// constraint are contiguous in memory.
///
/// __Example usage__ : To construct the 2 x 3 matrix
/// ```text
/// A = [1.  2.  0.]
///     [0.  0.  3.]
/// ```
///
/// ```no_run
/// use splitqp::algebra::CsrMatrix;
///
/// let A : CsrMatrix<f64> = CsrMatrix::new(
///    2,                  // m
///    3,                  // n
///    vec![0, 2, 3],      // rowptr
///    vec![0, 1, 2],      // colval
///    vec![1., 2., 3.],   // nzval
///  );
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct CsrMatrix<T = f64> {
    /// number of rows
    pub m: usize,
    /// number of columns
    pub n: usize,
    /// CSR format row pointer, of length `m+1`
    pub rowptr: Vec<usize>,
    /// vector of column indices
    pub colval: Vec<usize>,
    /// vector of non-zero matrix elements
    pub nzval: Vec<T>,
}

impl<T> CsrMatrix<T>
where
    T: FloatT,
{
    /// `CsrMatrix` constructor.
    ///
    /// # Panics
    /// Makes rudimentary dimensional compatibility checks and panics on
    /// failure.  Column index bounds and per-row ordering are the
    /// caller's responsibility; see [`check_format`](CsrMatrix::check_format).
    pub fn new(m: usize, n: usize, rowptr: Vec<usize>, colval: Vec<usize>, nzval: Vec<T>) -> Self {
        assert_eq!(colval.len(), nzval.len());
        assert_eq!(rowptr.len(), m + 1);
        assert_eq!(rowptr[m], colval.len());
        CsrMatrix {
            m,
            n,
            rowptr,
            colval,
            nzval,
        }
    }

    /// Identity matrix of size `n`
    pub fn identity(n: usize) -> Self {
        let rowptr = (0usize..=n).collect();
        let colval = (0usize..n).collect();
        let nzval = vec![T::one(); n];

        CsrMatrix::new(n, n, rowptr, colval, nzval)
    }

    /// An m x n matrix with no structural entries.  An empty constraint
    /// block (m = 0) poses an unconstrained problem.
    pub fn zeros(size: (usize, usize)) -> Self {
        let (m, n) = size;
        CsrMatrix::new(m, n, vec![0; m + 1], vec![], vec![])
    }

    /// number of nonzeros
    pub fn nnz(&self) -> usize {
        self.rowptr[self.m]
    }

    /// transpose view
    pub fn t(&self) -> Adjoint<'_, Self> {
        Adjoint { src: self }
    }

    /// Check that matrix data is correctly formatted.
    pub fn check_format(&self) -> Result<(), SparseFormatError> {
        if self.colval.len() != self.nzval.len() {
            return Err(SparseFormatError::IncompatibleDimension);
        }

        if self.rowptr.is_empty()
            || (self.rowptr.len() - 1) != self.m
            || self.rowptr[self.m] != self.colval.len()
        {
            return Err(SparseFormatError::IncompatibleDimension);
        }

        //check for rowptr monotonicity
        if self.rowptr.windows(2).any(|r| r[0] > r[1]) {
            return Err(SparseFormatError::BadPointers);
        }

        //check for colval monotonicity within each row
        for row in 0..self.m {
            let rng = self.rowptr[row]..self.rowptr[row + 1];
            if self.colval[rng].windows(2).any(|c| c[0] >= c[1]) {
                return Err(SparseFormatError::BadIndexOrdering);
            }
        }
        //check for column values out of bounds
        if !self.colval.iter().all(|c| c < &self.n) {
            return Err(SparseFormatError::IndexOutOfBounds);
        }

        Ok(())
    }
}

impl<T> ShapedMatrix for CsrMatrix<T> {
    fn nrows(&self) -> usize {
        self.m
    }
    fn ncols(&self) -> usize {
        self.n
    }
}

impl<T> MatrixVectorMultiply for CsrMatrix<T>
where
    T: FloatT,
{
    type T = T;

    fn gemv(&self, y: &mut [T], x: &[T], a: T, b: T) {
        assert_eq!(x.len(), self.n);
        assert_eq!(y.len(), self.m);

        // y = a*A*x + b*y, row by row.  The b*y term is dropped rather
        // than computed when b is zero
        for (row, yrow) in y.iter_mut().enumerate() {
            let mut s = T::zero();
            for ptr in self.rowptr[row]..self.rowptr[row + 1] {
                s += self.nzval[ptr] * x[self.colval[ptr]];
            }
            *yrow = if b == T::zero() {
                a * s
            } else {
                a * s + b * (*yrow)
            };
        }
    }
}

impl<T> MatrixVectorMultiply for Adjoint<'_, CsrMatrix<T>>
where
    T: FloatT,
{
    type T = T;

    fn gemv(&self, y: &mut [T], x: &[T], a: T, b: T) {
        let A = self.src;
        assert_eq!(x.len(), A.m);
        assert_eq!(y.len(), A.n);

        if b == T::zero() {
            y.fill(T::zero());
        } else {
            y.scale(b);
        }

        // y += a*A'*x, scattering each row of A
        for (row, &xrow) in x.iter().enumerate() {
            let ax = a * xrow;
            for ptr in A.rowptr[row]..A.rowptr[row + 1] {
                y[A.colval[ptr]] += A.nzval[ptr] * ax;
            }
        }
    }
}
