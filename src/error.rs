use std::io;

/// Error taxonomy for the icon pipeline. The HTTP layer maps variants onto
/// status codes; the CLI surfaces them through anyhow.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("{0}")]
    Validation(String),

    #[error("failed to decode image: {0}")]
    Decode(String),

    #[error("failed to encode {name}: {reason}")]
    Encode { name: String, reason: String },

    #[error("failed to write descriptor: {0}")]
    Descriptor(String),

    #[error("failed to write archive: {0}")]
    Archive(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error(transparent)]
    Io(#[from] io::Error),
}

impl Error {
    pub fn encode(name: &str, reason: impl std::fmt::Display) -> Self {
        Error::Encode {
            name: name.to_string(),
            reason: reason.to_string(),
        }
    }
}
