use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SimError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Config error: {0}")]
    InvalidConfig(String),

    #[error("Invalid command vector: expected {expected} commands, got {got}")]
    InvalidCommand { expected: usize, got: usize },

    #[error("Session is terminal; reset before stepping again")]
    SessionTerminal,

    #[error("Spawn error: {0}")]
    SpawnError(String),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_yaml::Error),
}
