use thiserror::Error;

/// Missing-oracle errors surfaced when the environment was built without a
/// component an action turned out to need.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum OracleError {
    #[error("catalog oracle not available")]
    CatalogNotAvailable,
    #[error("bestiary oracle not available")]
    BestiaryNotAvailable,
    #[error("word oracle not available")]
    WordNotAvailable,
    #[error("rng oracle not available")]
    RngNotAvailable,
}
