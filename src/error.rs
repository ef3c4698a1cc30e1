use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// Malformed input. Rejected before anything is persisted.
    #[error("invalid data: {0}")]
    Validation(String),

    /// An update-by-match or lookup found zero rows.
    #[error("not found: {0}")]
    NotFound(String),

    /// Underlying datastore failure, tagged with the operation that hit it.
    /// Fatal during schema migration, recoverable for ordinary CRUD.
    #[error("storage error during {op}: {source}")]
    Storage {
        op: &'static str,
        #[source]
        source: rusqlite::Error,
    },
}

impl Error {
    pub(crate) fn storage(op: &'static str) -> impl FnOnce(rusqlite::Error) -> Error {
        move |source| Error::Storage { op, source }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
