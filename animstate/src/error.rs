use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("unknown clip: {name}")]
    UnknownClip { name: String },

    #[error("unknown state: {name}")]
    UnknownState { name: String },

    #[error("duplicate state name: {name}")]
    DuplicateState { name: String },

    #[error("clip index {index} referenced by state '{state}' is out of range")]
    InvalidClipIndex { state: String, index: usize },

    #[error("multi-clip state '{state}' has no clips")]
    EmptyMultiClip { state: String },

    #[error("invalid layer index: {index}")]
    InvalidLayerIndex { index: usize },

    #[error("invalid value: {message}")]
    InvalidValue { message: String },

    #[error("snapshot does not match controller: expected {expected}, got {actual}")]
    SnapshotMismatch { expected: String, actual: String },

    #[cfg(feature = "json")]
    #[error("failed to parse controller JSON: {message}")]
    JsonParse { message: String },

    #[cfg(feature = "json")]
    #[error("unsupported or invalid authoring format version: {value}")]
    JsonFormatVersion { value: String },

    #[cfg(feature = "json")]
    #[error("unknown state kind '{kind}' for state '{state}'")]
    JsonUnknownStateKind { state: String, kind: String },

    #[cfg(feature = "binary")]
    #[error("failed to decode snapshot: {message}")]
    SnapshotDecode { message: String },

    #[cfg(feature = "binary")]
    #[error("failed to encode snapshot: {message}")]
    SnapshotEncode { message: String },
}
