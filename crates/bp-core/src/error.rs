use crate::layout::FileId;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BpError {
    #[error("malformed disk map at position {position}: {reason}")]
    MalformedInput { position: usize, reason: String },
    #[error("file {id} missing from layout")]
    FileNotFound { id: FileId },
}

pub type Result<T> = std::result::Result<T, BpError>;
