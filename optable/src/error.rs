use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid pattern `{0}`: expected 4 characters, found {1}")]
    PatternLength(String, usize),

    #[error("Invalid pattern `{0}`: unexpected character `{1}`")]
    UnrecognizedPattern(String, char),

    #[error("Failed to open file: {0}")]
    FileOpen(String, #[source] std::io::Error),

    #[error("Failed to read line")]
    FileRead(#[source] std::io::Error),

    #[error("Failed to create file: {0}")]
    FileCreate(String, #[source] std::io::Error),

    #[error("Failed to write file: {0}")]
    FileWrite(String, #[source] std::io::Error),
}

impl Error {
    /// Per-entry errors never abort a generation run.
    pub fn is_fatal(&self) -> bool {
        !matches!(
            self,
            Error::PatternLength(..) | Error::UnrecognizedPattern(..)
        )
    }
}
