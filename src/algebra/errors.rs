use thiserror::Error;

/// Error type returned by the `check_format` utilities on
/// [`CscMatrix`](crate::algebra::CscMatrix) and
/// [`CsrMatrix`](crate::algebra::CsrMatrix).
#[derive(Error, Debug)]
pub enum SparseFormatError {
    #[error("Matrix dimension fields and/or array lengths are incompatible")]
    IncompatibleDimension,
    #[error("Data is not sorted by index within each compressed axis")]
    BadIndexOrdering,
    #[error("Stored index exceeds the matrix dimension")]
    IndexOutOfBounds,
    #[error("Bad compressed pointer values")]
    BadPointers,
}
