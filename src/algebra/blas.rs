#![allow(clippy::too_many_arguments)]

// standard imports via blas-lapack-rs crates
extern crate blas_src;
extern crate lapack_src;
use blas::*;
use lapack::*;

/// Floating point types supported by the BLAS/LAPACK-backed dense kernels.
pub trait BlasFloatT: private::BlasFloatSealed + XgemvScalar + XsymvScalar + XsysvxScalar {}

impl BlasFloatT for f32 {}
impl BlasFloatT for f64 {}

mod private {
    pub trait BlasFloatSealed {}
    impl BlasFloatSealed for f32 {}
    impl BlasFloatSealed for f64 {}
}

// --------------------------------------
// ?gemv : matrix vector multiply (general shape)
// --------------------------------------

pub trait XgemvScalar: Sized {
    fn xgemv(
        trans: u8,
        m: i32,
        n: i32,
        alpha: Self,
        a: &[Self],
        lda: i32,
        x: &[Self],
        incx: i32,
        beta: Self,
        y: &mut [Self],
        incy: i32,
    );
}

macro_rules! impl_blas_gemv {
    ($T:ty, $XGEMV:path) => {
        impl XgemvScalar for $T {
            fn xgemv(
                trans: u8,
                m: i32,
                n: i32,
                alpha: Self,
                a: &[Self],
                lda: i32,
                x: &[Self],
                incx: i32,
                beta: Self,
                y: &mut [Self],
                incy: i32,
            ) {
                unsafe {
                    $XGEMV(trans, m, n, alpha, a, lda, x, incx, beta, y, incy);
                }
            }
        }
    };
}

impl_blas_gemv!(f32, sgemv);
impl_blas_gemv!(f64, dgemv);

// --------------------------------------
// ?symv : matrix vector multiply (symmetric)
// --------------------------------------

pub trait XsymvScalar: Sized {
    fn xsymv(
        uplo: u8,
        n: i32,
        alpha: Self,
        a: &[Self],
        lda: i32,
        x: &[Self],
        incx: i32,
        beta: Self,
        y: &mut [Self],
        incy: i32,
    );
}

macro_rules! impl_blas_symv {
    ($T:ty, $XSYMV:path) => {
        impl XsymvScalar for $T {
            fn xsymv(
                uplo: u8,
                n: i32,
                alpha: Self,
                a: &[Self],
                lda: i32,
                x: &[Self],
                incx: i32,
                beta: Self,
                y: &mut [Self],
                incy: i32,
            ) {
                unsafe {
                    $XSYMV(uplo, n, alpha, a, lda, x, incx, beta, y, incy);
                }
            }
        }
    };
}

impl_blas_symv!(f32, ssymv);
impl_blas_symv!(f64, dsymv);

// --------------------------------------
// ?sysvx : symmetric indefinite factorize / solve (expert driver)
// --------------------------------------

pub trait XsysvxScalar: Sized {
    fn xsysvx(
        fact: u8,
        uplo: u8,
        n: i32,
        nrhs: i32,
        a: &[Self],
        lda: i32,
        af: &mut [Self],
        ldaf: i32,
        ipiv: &mut [i32],
        b: &[Self],
        ldb: i32,
        x: &mut [Self],
        ldx: i32,
        rcond: &mut Self,
        ferr: &mut [Self],
        berr: &mut [Self],
        work: &mut [Self],
        lwork: i32,
        iwork: &mut [i32],
        info: &mut i32,
    );
}

macro_rules! impl_blas_xsysvx {
    ($T:ty, $XSYSVX:path) => {
        impl XsysvxScalar for $T {
            fn xsysvx(
                fact: u8,
                uplo: u8,
                n: i32,
                nrhs: i32,
                a: &[Self],
                lda: i32,
                af: &mut [Self],
                ldaf: i32,
                ipiv: &mut [i32],
                b: &[Self],
                ldb: i32,
                x: &mut [Self],
                ldx: i32,
                rcond: &mut Self,
                ferr: &mut [Self],
                berr: &mut [Self],
                work: &mut [Self],
                lwork: i32,
                iwork: &mut [i32],
                info: &mut i32,
            ) {
                unsafe {
                    $XSYSVX(
                        fact, uplo, n, nrhs, a, lda, af, ldaf, ipiv, b, ldb, x, ldx, rcond, ferr,
                        berr, work, lwork, iwork, info,
                    );
                }
            }
        }
    };
}

impl_blas_xsysvx!(f32, ssysvx);
impl_blas_xsysvx!(f64, dsysvx);
