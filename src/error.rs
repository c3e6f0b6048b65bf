use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// Invalid or incomplete configuration, including context files.
    #[error("Configuration error: {0}.")]
    Config(String),

    /// Input data could not be loaded or has an unrecognized shape.
    #[error("Data error: {0}.")]
    Data(String),

    /// A path placeholder could not be resolved against the supplied
    /// variables. Configuration-class: raised where output paths are
    /// computed during expansion.
    #[error("Interpolation error: {0}.")]
    Interpolation(String),

    /// Template lookup or evaluation failed.
    #[error("Render error: {0}.")]
    Render(String),

    /// Failure while writing a rendered output file.
    #[error("IO error: {0}.")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results with kiln's Error as the error type.
pub type Result<T> = std::result::Result<T, Error>;
