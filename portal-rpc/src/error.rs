use std::fmt;

pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while setting up a client. Calls themselves never fail
/// with this type; see [`ResponseEnvelope`][crate::ResponseEnvelope].
#[derive(Debug)]
pub enum Error {
    Config(String),
    InvalidOperation(String),
    Http(reqwest::Error),
    Io(std::io::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Config(s) => write!(f, "config error: {s}"),
            Error::InvalidOperation(s) => write!(f, "invalid operation name: {s:?}"),
            Error::Http(e) => write!(f, "http client error: {e}"),
            Error::Io(e) => write!(f, "io error: {e}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Http(e) => Some(e),
            Error::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(value: reqwest::Error) -> Self {
        Error::Http(value)
    }
}

impl From<std::io::Error> for Error {
    fn from(value: std::io::Error) -> Self {
        Error::Io(value)
    }
}

impl From<toml::de::Error> for Error {
    fn from(value: toml::de::Error) -> Self {
        Error::Config(value.to_string())
    }
}
