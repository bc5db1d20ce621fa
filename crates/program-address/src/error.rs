use thiserror::Error;

/// Program-derived address errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DerivationError {
    #[error("seed {index} is {len} bytes, max is {max}")]
    SeedTooLong { index: usize, len: usize, max: usize },

    #[error("{count} seeds supplied, max is {max} including the bump")]
    TooManySeeds { count: usize, max: usize },

    #[error("no bump seed produced an off-curve address")]
    ExhaustedBumpSpace,

    #[error("derived address lies on the ed25519 curve")]
    OnCurve,

    #[error("invalid address: {0}")]
    InvalidAddress(String),
}
