use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FormatError {
    #[error("Failed to parse html: {0}")]
    Parse(#[source] io::Error),
    #[error("Failed to write output: {0}")]
    Write(#[source] io::Error),
}

pub type Result<T> = std::result::Result<T, FormatError>;
