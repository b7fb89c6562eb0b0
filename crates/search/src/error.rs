use thiserror::Error;

pub type Result<T> = std::result::Result<T, SearchError>;

#[derive(Error, Debug)]
pub enum SearchError {
    #[error("search backend error: {0}")]
    Backend(String),

    #[error("rerank backend error: {0}")]
    Rerank(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
