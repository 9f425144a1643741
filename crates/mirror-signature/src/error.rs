use std::fmt;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    UnexpectedEof,
    Unexpected { at: usize, found: char },
    EmptyIdentifier { at: usize },
    TrailingInput { at: usize },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::UnexpectedEof => write!(f, "unexpected end of signature"),
            Error::Unexpected { at, found } => {
                write!(f, "unexpected character {found:?} at offset {at}")
            }
            Error::EmptyIdentifier { at } => write!(f, "empty identifier at offset {at}"),
            Error::TrailingInput { at } => write!(f, "trailing input at offset {at}"),
        }
    }
}

impl std::error::Error for Error {}
