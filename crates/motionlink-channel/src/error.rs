/// Errors that can occur in channel lifecycle operations.
#[derive(Debug, thiserror::Error)]
pub enum ChannelError {
    /// The serial link could not be opened or cloned.
    #[error("link error: {0}")]
    Link(#[from] motionlink_link::LinkError),

    /// `open` was called on a channel that is already open.
    #[error("channel is already open")]
    AlreadyOpen,

    /// `open` was called after the channel closed. A channel is
    /// single-use; reopening is not supported.
    #[error("channel is closed")]
    Closed,
}

pub type Result<T> = std::result::Result<T, ChannelError>;
