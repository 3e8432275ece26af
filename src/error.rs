use thiserror::Error;

#[derive(Debug, Error)]
pub enum LineCodeError {
    #[error(
        "unknown encoding '{0}' (expected one of NRZ, RZ, Manchester, AMI, CMI)"
    )]
    UnknownEncoding(String),
    #[error("invalid bit value '{0}' (expected 0 or 1)")]
    InvalidBit(String),
    #[error("bit index {index} out of range for a stream of {len} bits")]
    BitIndexOutOfRange { index: usize, len: usize },
    #[error("progress display error: {0}")]
    Progress(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, LineCodeError>;
