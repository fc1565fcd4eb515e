/// Errors that can occur on the serial link.
#[derive(Debug, thiserror::Error)]
pub enum LinkError {
    /// Failed to open the named port (unavailable, held elsewhere, or
    /// misconfigured). Reported once at open time; never retried here.
    #[error("failed to open {port}: {source}")]
    Open {
        port: String,
        source: serialport::Error,
    },

    /// A port-level operation failed after the link was open.
    #[error("serial error: {0}")]
    Serial(#[from] serialport::Error),

    /// An I/O error occurred while reading or writing the port.
    #[error("link I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, LinkError>;
