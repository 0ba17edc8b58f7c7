use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Table(#[from] optable::Error),

    #[error("Failed to load config: {0}")]
    Config(String, #[source] serde_yaml::Error),

    #[error("Failed to open config: {0}")]
    ConfigOpen(String, #[source] std::io::Error),

    #[error("{0}")]
    UnknownFormat(String),
}
