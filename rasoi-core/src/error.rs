use thiserror::Error;

/// Errors that can keep the engine from reaching a ready state.
///
/// These only occur at load time. Operations on a ready engine are total:
/// "no match" is a result, not an error.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("dish dataset not available at {path}: {source}")]
    DataUnavailable {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("dish dataset contains no usable ingredient transactions")]
    EmptyDataset,
}
