//! Error handling for the vote engine

/// Result type alias for the vote engine
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the vote engine
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Eligible-voter list contains a repeated entry
    #[error("duplicate voter in eligible list: {voter}")]
    DuplicateVoter { voter: String },

    /// No vote session is stored under the given identifier
    #[error("no such vote session: {vote_id}")]
    NoSuchSession { vote_id: String },

    /// Ballot choice is not one of yes, no, neutral
    #[error("invalid choice: {raw}")]
    InvalidChoice { raw: String },

    /// Ledger read or write failure
    #[error("storage error: {message}")]
    Storage { message: String },

    /// Tally resolution reached an invalid state
    #[error("counting error: {message}")]
    Counting { message: String },

    /// History lookup missed
    #[error("no history for: {vote_id}")]
    NoHistory { vote_id: String },

    /// Dispatch-level argument failure (arity or unknown function)
    #[error("invalid arguments: {message}")]
    InvalidArguments { message: String },

    /// Generic internal errors (configuration, environment)
    #[error("internal error: {message}")]
    Internal { message: String },
}

impl Error {
    /// Create a new duplicate-voter error
    pub fn duplicate_voter(voter: impl Into<String>) -> Self {
        Self::DuplicateVoter {
            voter: voter.into(),
        }
    }

    /// Create a new missing-session error
    pub fn no_such_session(vote_id: impl Into<String>) -> Self {
        Self::NoSuchSession {
            vote_id: vote_id.into(),
        }
    }

    /// Create a new invalid-choice error
    pub fn invalid_choice(raw: impl Into<String>) -> Self {
        Self::InvalidChoice { raw: raw.into() }
    }

    /// Create a new storage error
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }

    /// Create a new counting error
    pub fn counting(message: impl Into<String>) -> Self {
        Self::Counting {
            message: message.into(),
        }
    }

    /// Create a new history-miss error
    pub fn no_history(vote_id: impl Into<String>) -> Self {
        Self::NoHistory {
            vote_id: vote_id.into(),
        }
    }

    /// Create a new dispatch argument error
    pub fn invalid_arguments(message: impl Into<String>) -> Self {
        Self::InvalidArguments {
            message: message.into(),
        }
    }

    /// Create a new internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}

/// Convenience macros for creating specific error types
#[macro_export]
macro_rules! storage_error {
    ($msg:expr) => {
        $crate::Error::storage($msg)
    };
    ($fmt:expr, $($arg:tt)*) => {
        $crate::Error::storage(format!($fmt, $($arg)*))
    };
}

#[macro_export]
macro_rules! counting_error {
    ($msg:expr) => {
        $crate::Error::counting($msg)
    };
    ($fmt:expr, $($arg:tt)*) => {
        $crate::Error::counting(format!($fmt, $($arg)*))
    };
}
