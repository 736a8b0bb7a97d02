use thiserror::Error;

/// Errors of the host side
#[derive(Error, Debug)]
pub enum HostError {
    #[error("Config file error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config: {0}")]
    Json(#[from] serde_json::Error),

    /// The HID device refused the packet
    #[error("Failed to send packet: {0}")]
    Transport(String),
}
