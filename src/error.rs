use crate::opcode::Opcode;
use std::io;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to load image: {path}: {source}")]
    ImageLoad {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("failed to load image: {path}: missing origin")]
    EmptyImage { path: String },

    #[error("illegal opcode {opcode:?} ({instruction:#06x}) at {address:#06x}")]
    IllegalOpcode {
        opcode: Opcode,
        instruction: u16,
        address: u16,
    },

    #[error("invalid breakpoint: {0}")]
    Breakpoint(String),

    #[error("no image file given")]
    MissingImage,

    #[error("{0}")]
    Config(String),

    #[error("{0}")]
    Help(String),

    #[error(transparent)]
    Io(#[from] io::Error),
}

impl Error {
    /// Errors the machine itself cannot recover from, as opposed to host failures.
    pub fn is_fatal(&self) -> bool {
        match self {
            Error::IllegalOpcode { .. } => true,
            _ => false,
        }
    }
}
