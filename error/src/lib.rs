use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    BadRequest(String),
    NotFound(String),
    InternalServerError(String),
}

impl Error {
    pub fn message(&self) -> &str {
        match self {
            Error::BadRequest(msg) | Error::NotFound(msg) | Error::InternalServerError(msg) => msg,
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::BadRequest(msg) => write!(f, "Bad request: {msg}"),
            Error::NotFound(msg) => write!(f, "Not found: {msg}"),
            Error::InternalServerError(msg) => write!(f, "Internal server error: {msg}"),
        }
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
mod tests {
    use super::Error;

    #[test]
    fn display_includes_kind_and_message() {
        let err = Error::NotFound("Record RFI-2025-009 not found".to_owned());
        assert_eq!(err.to_string(), "Not found: Record RFI-2025-009 not found");
        assert_eq!(err.message(), "Record RFI-2025-009 not found");
    }
}
