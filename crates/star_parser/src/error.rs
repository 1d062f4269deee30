use thiserror::Error;

/// A failure in the token source underneath the parser. Lexical failures are
/// unrecoverable: the parser reports them through
/// [`ErrorHandler::fatal_error`](crate::ErrorHandler::fatal_error) as
/// `Lexer error: …` and unwinds.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("{message}")]
pub struct LexError {
    pub line: u32,
    pub message: String,
}

impl LexError {
    pub fn new(line: u32, message: impl Into<String>) -> Self {
        Self {
            line,
            message: message.into(),
        }
    }
}

pub type LexResult<T> = Result<T, LexError>;
