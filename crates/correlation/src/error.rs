use thiserror::Error;

pub type Result<T> = std::result::Result<T, CorrelationError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CorrelationError {
    /// Feedback references paragraph numbers that the local segmentation of
    /// the answer text never produced.
    #[error("feedback references unknown paragraph numbers: {unknown:?}")]
    NumberingMismatch { unknown: Vec<u32> },

    /// The backend's numbering fingerprint does not match the one computed
    /// from the locally segmented answer text.
    #[error("numbering fingerprint mismatch: backend {backend}, local {local}")]
    FingerprintMismatch { backend: String, local: String },
}
