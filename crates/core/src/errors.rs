use thiserror::Error;

pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ApplicationError {
    #[error("persistence failure: {0}")]
    Persistence(String),
}

impl ApplicationError {
    pub fn persistence(error: impl std::fmt::Display) -> Self {
        Self::Persistence(error.to_string())
    }

    pub fn error_class(&self) -> &'static str {
        match self {
            Self::Persistence(_) => "persistence",
        }
    }

    /// Message safe to hand to a client. Internal detail stays in the logs.
    pub fn user_message(&self) -> &'static str {
        INTERNAL_ERROR_MESSAGE
    }
}
