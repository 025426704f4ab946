use thiserror::Error;

/// Canonical result for terminal operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Failures surfaced when a terminal operation drives a pipeline.
///
/// Stages are total: no error is produced while a chain is merely being
/// composed. A checked cast wraps each converted element in a `Result`, and
/// the error inside reaches the caller at the terminal call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("sequence contains no elements")]
    EmptySequence,

    #[error("cannot cast `{from}` to `{to}`")]
    InvalidCast {
        from: &'static str,
        to: &'static str,
    },
}
