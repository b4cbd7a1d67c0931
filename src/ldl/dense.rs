#![allow(non_snake_case)]

use super::LdlSolver;
use crate::algebra::*;

/// Dense symmetric indefinite factorization via LAPACK `?sysvx`.
///
/// Construction consumes the matrix and factorizes it as `K = UDU'`
/// with `U` a product of permutations and unit upper triangular
/// matrices and `D` block diagonal with 1x1 and 2x2 blocks
/// (Bunch-Kaufman pivoting).  Only the upper triangle of `K` is
/// referenced.  Subsequent solves reuse the stored factors.
#[derive(Debug)]
pub struct DenseLdl<T = f64> {
    n: usize,
    // original matrix, referenced by the expert driver during solves
    K: Matrix<T>,
    // factored form and pivot data
    KF: Matrix<T>,
    ipiv: Vec<i32>,
    info: i32,
}

impl<T> DenseLdl<T>
where
    T: FloatT + XsysvxScalar,
{
    /// Factorize the square symmetric matrix `K`.
    pub fn new(K: Matrix<T>) -> Self {
        assert!(K.is_square(), "matrix to factor is not square");

        let n = K.nrows();
        let mut KF = Matrix::<T>::zeros((n, n));
        let mut ipiv = vec![0_i32; n];
        let mut info = 0_i32;

        if n > 0 {
            // factorize during construction by solving against a
            // zero right-hand side; the factors land in KF and ipiv
            let b = vec![T::zero(); n];
            let mut x = vec![T::zero(); n];
            _sysvx(b'N', &K, &mut KF, &mut ipiv, &b, &mut x, &mut info);
        }

        Self {
            n,
            K,
            KF,
            ipiv,
            info,
        }
    }
}

impl<T> LdlSolver<T> for DenseLdl<T>
where
    T: FloatT + XsysvxScalar,
{
    fn info(&self) -> i32 {
        self.info
    }

    fn solve(&mut self, h: &[T], t: &mut [T]) {
        assert_eq!(self.info, 0);
        assert_eq!(h.len(), self.n);
        assert_eq!(t.len(), self.n);

        if self.n == 0 {
            return;
        }

        let mut info = 0_i32;
        _sysvx(b'F', &self.K, &mut self.KF, &mut self.ipiv, h, t, &mut info);
    }
}

// ?sysvx expert driver call.  FACT = 'N' factorizes into KF/ipiv and
// solves; FACT = 'F' reuses the existing factors.  The condition
// estimate and error bounds are computed but not surfaced.
fn _sysvx<T: FloatT + XsysvxScalar>(
    fact: u8,
    K: &Matrix<T>,
    KF: &mut Matrix<T>,
    ipiv: &mut [i32],
    b: &[T],
    x: &mut [T],
    info: &mut i32,
) {
    let n = K.nrows();
    let ni: i32 = n.try_into().unwrap();

    let mut rcond = T::zero();
    let mut ferr = [T::zero(); 1];
    let mut berr = [T::zero(); 1];
    let mut work = vec![T::zero(); 3 * n];
    let mut iwork = vec![0_i32; n];
    let lwork: i32 = work.len().try_into().unwrap();

    T::xsysvx(
        fact,
        MatrixTriangle::Triu.as_blas_char(),
        ni,
        1, // NRHS
        K.data(),
        ni,
        KF.data_mut(),
        ni,
        ipiv,
        b,
        ni,
        x,
        ni,
        &mut rcond,
        &mut ferr,
        &mut berr,
        &mut work,
        lwork,
        &mut iwork,
        info,
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factor_and_solve() {
        // K = [4. 1.]     (values below the diagonal are ignored)
        //     [*  3.]
        let K = Matrix::new_from_slice((2, 2), &[4., -99., 1., 3.]);
        let mut ldl = DenseLdl::new(K);
        assert_eq!(ldl.info(), 0);

        // b = K_sym * [1; -1] = [3; -2]
        let mut t = [0.0; 2];
        ldl.solve(&[3., -2.], &mut t);
        assert!(t.norm_inf_diff(&[1., -1.]) <= 1e-12);

        //solves are repeatable with the same factors
        let mut t2 = [0.0; 2];
        ldl.solve(&[3., -2.], &mut t2);
        assert_eq!(t, t2);
    }

    #[test]
    fn test_indefinite() {
        // K = [1.  2.]
        //     [2. -1.]    eigenvalues of both signs
        let K = Matrix::new_from_slice((2, 2), &[1., 2., 2., -1.]);
        let mut ldl = DenseLdl::new(K);
        assert_eq!(ldl.info(), 0);

        // b = K*[1; 1] = [3; 1]
        let mut t = [0.0; 2];
        ldl.solve(&[3., 1.], &mut t);
        assert!(t.norm_inf_diff(&[1., 1.]) <= 1e-12);
    }

    #[test]
    fn test_singular() {
        let K = Matrix::new_from_slice((2, 2), &[1., 1., 1., 1.]);
        let ldl = DenseLdl::new(K);
        assert!(ldl.info() > 0);
    }
}
