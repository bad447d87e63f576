use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScribaError {
    #[error("a page named \"{0}\" already exists in this project")]
    NameTaken(String),

    #[error("\"{0}\" contains no alphanumeric characters")]
    EmptyName(String),

    #[error("\"{new}\" is too similar to the open page \"{existing}\"")]
    SlugTaken { new: String, existing: String },

    #[error("no page named \"{0}\" is open")]
    PageNotFound(String),

    #[error("no removal is awaiting confirmation")]
    NoPendingRemoval,

    #[error("line {line} is out of range for \"{page}\"")]
    LineOutOfRange { page: String, line: usize },

    #[error("configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ScribaError>;
