use thiserror::Error;

#[derive(Error, Debug)]
pub enum GateError {
    #[error("Image decode error: {0}")]
    Decode(String),

    #[error("Candidate corpus unavailable: {0}")]
    CorpusUnavailable(String),

    #[error("Malformed fingerprint: {0}")]
    MalformedFingerprint(String),
}

pub type Result<T> = std::result::Result<T, GateError>;
