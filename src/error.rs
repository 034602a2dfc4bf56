use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Invalid package URL {purl:?}: {reason}")]
    InvalidPurl { purl: String, reason: String },
}

pub type Result<T> = std::result::Result<T, Error>;
