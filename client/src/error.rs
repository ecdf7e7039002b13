//! Error types for the expense sync core.
//!
//! Three failure families exist: per-field validation failures (recoverable
//! by re-entering data), network failures from the remote collection
//! (recoverable by retrying the user action) and store logic errors, which
//! signal a programming mistake rather than a user-facing condition.

use shared::ExpenseFormValidation;
use thiserror::Error;

use crate::domain::sync_orchestrator::OperationKind;

/// Failure of a single round trip to the remote collection
#[derive(Debug, Error)]
pub enum NetworkError {
    #[error("connection failed: {0}")]
    Connection(String),

    #[error("remote returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("malformed response: {0}")]
    MalformedResponse(String),
}

impl From<reqwest::Error> for NetworkError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_decode() {
            NetworkError::MalformedResponse(error.to_string())
        } else if let Some(status) = error.status() {
            NetworkError::Status {
                status: status.as_u16(),
                body: error.to_string(),
            }
        } else {
            NetworkError::Connection(error.to_string())
        }
    }
}

/// Store-internal logic errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("expense {0} not found")]
    NotFound(String),

    #[error("expense {0} already exists")]
    DuplicateId(String),
}

/// Outcome of an orchestrated operation that did not succeed
#[derive(Debug, Error)]
pub enum SyncError {
    /// The form gate rejected the input; nothing was sent
    #[error("Invalid input values - please check your entered data!")]
    Validation(ExpenseFormValidation),

    /// The remote call failed. Only the fixed per-operation message is displayed.
    #[error("{}", .kind.failure_message())]
    Remote {
        kind: OperationKind,
        #[source]
        source: NetworkError,
    },

    /// The local store rejected the change
    #[error("{kind} failed: {source}")]
    Store {
        kind: OperationKind,
        #[source]
        source: StoreError,
    },

    /// A conflicting operation on the same target is still pending
    #[error("{kind} already in progress")]
    AlreadyPending { kind: OperationKind },
}

impl SyncError {
    /// Message suitable for the error overlay. Store and concurrency
    /// failures show the operation's fixed message; their detail stays in
    /// `Display` and the logs.
    pub fn user_message(&self) -> String {
        match self {
            SyncError::Validation(_) | SyncError::Remote { .. } => self.to_string(),
            SyncError::Store { kind, .. } | SyncError::AlreadyPending { kind } => {
                kind.failure_message().to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_message_hides_technical_detail() {
        let duplicate = SyncError::Store {
            kind: OperationKind::Create,
            source: StoreError::DuplicateId("a".to_string()),
        };
        assert_eq!(duplicate.to_string(), "create failed: expense a already exists");
        assert_eq!(duplicate.user_message(), "Could not save data, please try again later.");

        let busy = SyncError::AlreadyPending {
            kind: OperationKind::Update,
        };
        assert_eq!(busy.to_string(), "update already in progress");
        assert_eq!(busy.user_message(), "Could not save data, please try again later.");

        let remote = SyncError::Remote {
            kind: OperationKind::Delete,
            source: NetworkError::Connection("refused".to_string()),
        };
        assert_eq!(remote.user_message(), "Could not delete expense, please try again later.");
    }
}

pub type Result<T> = std::result::Result<T, SyncError>;
