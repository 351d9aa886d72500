use crate::domain::TodoId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("storage i/o failed for key `{key}`")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },
    #[error("stored value under `{key}` is corrupt")]
    Corrupt {
        key: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("stored id counter `{value}` is not a usable positive integer")]
    InvalidCounter { value: String },
    #[error("stored todo id {id} appears more than once")]
    DuplicateId { id: TodoId },
    #[error("stored todo id {id} is too large to issue a next id")]
    IdOutOfRange { id: TodoId },
    #[error("could not encode value for `{key}`")]
    Encode {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}
