use thiserror::Error;

#[derive(Error, Debug)]
pub enum FontError {
    #[error("I/O error reading font '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Font '{0}' could not be parsed")]
    Parse(String),

    #[error("No Arabic-capable font available in {0}")]
    MissingFont(String),
}
