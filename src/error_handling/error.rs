use std::fmt::{Display, Formatter};

#[derive(Debug)]
pub enum Error {
    EmptyInput,
    MalformedExpression(String),
    InternalInvariantViolation(&'static str),
    YamlParsingError(serde_yaml::Error),
    JsonSerializationError(serde_json::Error),
    IOError(std::io::Error),
    MissingConfigKey(&'static str),
    InvalidConfig(&'static str),
}

impl Error {
    // Invariant violations are defects in this crate, not problems with the user's input.
    pub fn is_internal(&self) -> bool {
        matches!(self, Error::InternalInvariantViolation(_))
    }

    pub fn is_user_error(&self) -> bool {
        matches!(self, Error::EmptyInput | Error::MalformedExpression(_))
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::EmptyInput => write!(f, "Empty regex"),
            Error::MalformedExpression(msg) => write!(f, "Malformed expression: {}", msg),
            Error::InternalInvariantViolation(msg) => {
                write!(f, "Internal invariant violated: {}", msg)
            }
            Error::YamlParsingError(e) => write!(f, "YAML error: {}", e),
            Error::JsonSerializationError(e) => write!(f, "JSON error: {}", e),
            Error::IOError(e) => write!(f, "IO error: {}", e),
            Error::MissingConfigKey(key) => write!(f, "Missing config key: {}", key),
            Error::InvalidConfig(msg) => write!(f, "Invalid config: {}", msg),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::YamlParsingError(e) => Some(e),
            Error::JsonSerializationError(e) => Some(e),
            Error::IOError(e) => Some(e),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
