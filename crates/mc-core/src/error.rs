/// Alias for `Result<T, CoreError>`.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors that can occur when loading or validating MythCraft records.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// The input was not valid JSON for the expected record.
    #[error("invalid json: {0}")]
    Json(#[from] serde_json::Error),

    /// An attribute name did not match any MythCraft attribute.
    #[error("unknown attribute: \"{0}\"")]
    UnknownAttribute(String),
}
