use thiserror::Error;

#[derive(Error, Debug)]
pub enum GreeError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("timed out waiting for a device response")]
    Timeout,

    #[error("invalid cipher key length: expected 16 bytes, got {0}")]
    InvalidKey(usize),

    #[error("decrypted payload has invalid padding")]
    Padding,

    #[error("invalid value for {field}: {value}")]
    InvalidConfigValue { field: &'static str, value: String },

    #[error("invalid response: {0}")]
    InvalidResponse(String),

    #[error("unexpected result code: received {received}, expected {expected}")]
    UnexpectedResponse { received: i64, expected: i64 },
}
