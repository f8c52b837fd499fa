use crate::model::RecordId;

/// A payload failed structural validation and was never scored.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("missing required field `{0}`")]
    MissingField(String),
    #[error("field `{field}` has invalid value {value:?}, expected {expected}")]
    InvalidFormat {
        field: String,
        value: String,
        expected: &'static str,
    },
}

impl ValidationError {
    pub fn invalid_format(field: impl Into<String>, value: impl Into<String>, expected: &'static str) -> Self {
        Self::InvalidFormat {
            field: field.into(),
            value: value.into(),
            expected,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// Two minted identifiers collided. Never expected with 122 random bits.
    #[error("record {0} already exists")]
    DuplicateId(RecordId),
    #[error("storage backend failure: {0}")]
    Backend(String),
}

#[derive(Debug, thiserror::Error)]
pub enum ProcessError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl ProcessError {
    /// Client errors are the caller's to fix; everything else is an internal fault.
    pub fn is_client_error(&self) -> bool {
        matches!(self, ProcessError::Validation(_))
    }
}
