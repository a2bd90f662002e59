use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("column name must not be blank")]
    BlankColumnName,
    #[error("table id must not be blank")]
    BlankTableId,
}

pub type Result<T> = std::result::Result<T, ModelError>;
