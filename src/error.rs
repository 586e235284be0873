/// Error Module
///
/// Typed failure taxonomy for the ETL pipeline. Anything outside this set
/// (HTTP, database) propagates unchanged inside anyhow context chains.
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EtlError {
    /// Extraction was invoked without an authenticated Reddit client.
    #[error("must pass an authenticated Reddit client")]
    MissingClient,

    /// Unknown source name passed to the source factory.
    #[error("`{0}` is not a supported source")]
    UnsupportedSource(String),

    /// Unknown filter name passed to the transformation factory.
    #[error("`{0}` is not a valid filter")]
    UnsupportedFilter(String),

    /// A statistical filter was applied to an empty batch.
    #[error("cannot apply filter to an empty batch of posts")]
    EmptyInput,
}
