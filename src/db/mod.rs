pub mod category;
pub mod course;
pub mod lesson;
pub mod module;
pub mod stats;
pub mod video;

/// Failure of an insert into a table keyed by a unique slug.
#[derive(Debug, thiserror::Error)]
pub enum InsertError {
    #[error("slug '{0}' is already taken")]
    SlugTaken(String),
    #[error("{0}")]
    Failed(String),
}

impl From<String> for InsertError {
    fn from(msg: String) -> Self {
        Self::Failed(msg)
    }
}

pub(crate) fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db_err) if db_err.is_unique_violation())
}
