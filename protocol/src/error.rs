use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("Invalid color {0:?}, expected #RRGGBB or a CSS color name")]
    InvalidColor(String),
    #[error("Unknown command {0:?}")]
    UnknownCommand(String),
    #[error("Malformed payload: {0}")]
    Malformed(String),
}

impl From<serde_json::Error> for ParseError {
    fn from(err: serde_json::Error) -> Self {
        Self::Malformed(err.to_string())
    }
}

pub type Result<T> = core::result::Result<T, ParseError>;
